// ==========================================
// 零售商品铺货分配引擎 - 核心库
// ==========================================
// 流程: 表现分层 → 优先级排序 → 多轮迭代分配 → 仓间/店间调拨 → 汇总
// 系统定位: 批处理分配计算 (不做 I/O、不落库)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 配置层 - 配置读取与阈值
pub mod config;

// 引擎层 - 业务规则
pub mod engine;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{IterationPurpose, NodeKind, Segment, SizeTag};

// 领域实体
pub use domain::{
    AllocationInput, AllocationRecord, ConsolidatedRecord, DemandSignal, InventorySnapshot,
    IterationConstraint, IterationKind, PlanogramTarget, Sku, Store, StoreTransfer, Style,
    Warehouse, WarehouseTransfer,
};

// 配置
pub use config::{AllocationConfigReader, ConfigError, ConfigManager};

// 引擎
pub use engine::{
    AllocationOrchestrator, AllocationPipeline, AllocationRunResult, EngineError, EngineResult,
    RankingEngine, RunPlan, RunSettings, SegmentationEngine,
};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "零售商品铺货分配引擎";
