// ==========================================
// 零售商品铺货分配引擎 - 配置层
// ==========================================
// 职责: 配置读取接口、key-value 配置管理器、阈值对象
// ==========================================

pub mod allocation_config_trait;
pub mod config_manager;
pub mod error;
pub mod iteration_profile;
pub mod thresholds;

// 重导出核心配置类型
pub use allocation_config_trait::AllocationConfigReader;
pub use config_manager::{config_keys, ConfigManager};
pub use error::{ConfigError, ConfigResult};
pub use iteration_profile::{default_iteration_definitions, InclusionEntry, IterationDefinition};
pub use thresholds::{RevenueBlendConfig, SegmentationThresholds, StoreTransferThresholds};
