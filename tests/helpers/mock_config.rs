// ==========================================
// Mock 配置实现 - 用于集成测试
// ==========================================

use async_trait::async_trait;
use merch_allocation::config::{
    AllocationConfigReader, ConfigError, ConfigResult, IterationDefinition, RevenueBlendConfig,
    SegmentationThresholds, StoreTransferThresholds,
};
use std::collections::HashMap;

/// Mock 配置结构
#[derive(Debug, Clone)]
pub struct MockConfig {
    pub segmentation: SegmentationThresholds,
    pub iterations: Vec<IterationDefinition>,
    pub psa_benchmarks: HashMap<String, f64>,
    pub cover_multipliers: HashMap<String, f64>,
    pub replenishment_days: u32,
    pub store_transfer: StoreTransferThresholds,
    pub revenue_blend: RevenueBlendConfig,
    /// 读取迭代定义时返回错误 (模拟配置源故障)
    pub fail_iterations: bool,
}

impl MockConfig {
    /// 创建默认配置
    pub fn default() -> Self {
        Self {
            segmentation: SegmentationThresholds::default(),
            iterations: merch_allocation::config::default_iteration_definitions(),
            psa_benchmarks: HashMap::from([("default".to_string(), 80.0)]),
            cover_multipliers: HashMap::from([
                ("default".to_string(), 1.0),
                ("top_seller".to_string(), 1.5),
            ]),
            replenishment_days: 14,
            store_transfer: StoreTransferThresholds::default(),
            revenue_blend: RevenueBlendConfig::LocalOnly,
            fail_iterations: false,
        }
    }

    /// 创建自定义迭代序列的配置
    pub fn with_iterations(iterations: Vec<IterationDefinition>) -> Self {
        let mut config = Self::default();
        config.iterations = iterations;
        config
    }
}

#[async_trait]
impl AllocationConfigReader for MockConfig {
    async fn get_segmentation_thresholds(&self) -> ConfigResult<SegmentationThresholds> {
        Ok(self.segmentation.clone())
    }

    async fn get_iteration_definitions(&self) -> ConfigResult<Vec<IterationDefinition>> {
        if self.fail_iterations {
            return Err(ConfigError::FileReadError("mock source offline".to_string()));
        }
        Ok(self.iterations.clone())
    }

    async fn get_psa_benchmarks(&self) -> ConfigResult<HashMap<String, f64>> {
        Ok(self.psa_benchmarks.clone())
    }

    async fn get_cover_multipliers(&self) -> ConfigResult<HashMap<String, f64>> {
        Ok(self.cover_multipliers.clone())
    }

    async fn get_replenishment_days(&self) -> ConfigResult<u32> {
        Ok(self.replenishment_days)
    }

    async fn get_store_transfer_thresholds(&self) -> ConfigResult<StoreTransferThresholds> {
        Ok(self.store_transfer.clone())
    }

    async fn get_revenue_blend(&self) -> ConfigResult<RevenueBlendConfig> {
        Ok(self.revenue_blend.clone())
    }
}
