// ==========================================
// 零售商品铺货分配引擎 - 阈值配置对象
// ==========================================
// 存储位置: config_kv 中对应 key 的 JSON 值
// 缺失字段回落到默认值
// ==========================================

use serde::{Deserialize, Serialize};

/// 分层阈值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentationThresholds {
    /// 日均营收需超过基准 × 该倍数
    pub revenue_multiplier: f64,
    /// 判定畅销的最少上架天数
    pub min_live_days: u32,
    /// 平均折扣率上限 (%),超过且售罄率偏低判为滞销
    pub discount_ceiling_pct: f64,
    /// 售罄率下限 (%)
    pub sell_through_floor_pct: f64,
}

impl Default for SegmentationThresholds {
    fn default() -> Self {
        Self {
            revenue_multiplier: 1.0,
            min_live_days: 30,
            discount_ceiling_pct: 40.0,
            sell_through_floor_pct: 20.0,
        }
    }
}

/// 店间调拨门槛
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreTransferThresholds {
    /// 单笔最小调拨件数
    pub min_transfer_qty: u32,
    /// 单笔最小调拨货值 (件数 × 单价)
    pub min_transfer_value: f64,
    /// 调出门店日均销量上限 (低动销才允许调出)
    pub max_source_rate_of_sale: f64,
    /// 调出门店需保留的覆盖天数
    pub source_cover_days: u32,
    /// 仅在同区域门店间调拨
    pub same_region_only: bool,
}

impl Default for StoreTransferThresholds {
    fn default() -> Self {
        Self {
            min_transfer_qty: 2,
            min_transfer_value: 0.0,
            max_source_rate_of_sale: 0.2,
            source_cover_days: 14,
            same_region_only: false,
        }
    }
}

/// 本地/全国营收混合方式
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RevenueBlendConfig {
    /// 只使用本店日均营收
    LocalOnly,
    /// 本地历史不足时按权重混入全国款式日均营收
    SparseHistory { min_live_days: u32, peer_weight: f64 },
}

impl Default for RevenueBlendConfig {
    fn default() -> Self {
        RevenueBlendConfig::LocalOnly
    }
}
