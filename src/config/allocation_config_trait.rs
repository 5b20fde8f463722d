// ==========================================
// 零售商品铺货分配引擎 - 分配配置读取 Trait
// ==========================================
// 职责: 定义分配运行所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::config::error::ConfigResult;
use crate::config::iteration_profile::IterationDefinition;
use crate::config::thresholds::{
    RevenueBlendConfig, SegmentationThresholds, StoreTransferThresholds,
};
use async_trait::async_trait;
use std::collections::HashMap;

// ==========================================
// AllocationConfigReader Trait
// ==========================================
// 用途: 编排器在运行开始前一次性读取全部配置
// 实现者: ConfigManager（key-value + JSON 值）
#[async_trait]
pub trait AllocationConfigReader: Send + Sync {
    // ===== 分层配置 =====

    /// 获取分层阈值
    ///
    /// # 默认值
    /// - revenue_multiplier=1.0, min_live_days=30,
    ///   discount_ceiling_pct=40, sell_through_floor_pct=20
    async fn get_segmentation_thresholds(&self) -> ConfigResult<SegmentationThresholds>;

    // ===== 迭代配置 =====

    /// 获取有序迭代定义
    ///
    /// # 默认值
    /// - TOP_SELLER → REPLENISHMENT → WAREHOUSE_TRANSFER →
    ///   REPLENISHMENT_AFTER_TRANSFER → PLANOGRAM_FILL → NON_PIVOTAL_SIZE → MIN_AGE
    async fn get_iteration_definitions(&self) -> ConfigResult<Vec<IterationDefinition>>;

    /// 获取命名的 PSA 健康门槛 (%)
    ///
    /// # 默认值
    /// - {"default": 80.0}
    async fn get_psa_benchmarks(&self) -> ConfigResult<HashMap<String, f64>>;

    /// 获取命名的覆盖天数倍数
    ///
    /// # 默认值
    /// - {"default": 1.0, "top_seller": 1.5}
    async fn get_cover_multipliers(&self) -> ConfigResult<HashMap<String, f64>>;

    /// 获取默认补货天数
    ///
    /// # 默认值
    /// - 14
    async fn get_replenishment_days(&self) -> ConfigResult<u32>;

    // ===== 调拨配置 =====

    /// 获取店间调拨门槛
    async fn get_store_transfer_thresholds(&self) -> ConfigResult<StoreTransferThresholds>;

    // ===== 排序配置 =====

    /// 获取本地/全国营收混合方式
    ///
    /// # 默认值
    /// - local_only
    async fn get_revenue_blend(&self) -> ConfigResult<RevenueBlendConfig>;
}
