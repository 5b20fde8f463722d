// ==========================================
// 零售商品铺货分配引擎 - 需求信号
// ==========================================
// 职责: 上游需求计划产出的销售历史、目标库存、尺码配比
// 说明: 本系统只消费,不计算目标深度/宽度
// ==========================================

use crate::domain::types::Segment;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 门店 × 款式 销售历史
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreStyleSales {
    pub store_id: String,
    pub style_id: String,
    #[serde(default)]
    pub revenue: f64,
    #[serde(default)]
    pub units_sold: u32,
    /// 上架天数 (优先使用)
    #[serde(default)]
    pub live_days: Option<u32>,
    /// 首次上架日期 (live_days 缺失时按快照日期推算)
    #[serde(default)]
    pub first_live_date: Option<NaiveDate>,
    /// 平均折扣率 (%)
    #[serde(default)]
    pub avg_discount_pct: f64,
}

impl StoreStyleSales {
    /// 解析上架天数
    ///
    /// # 返回
    /// - Some(days): 显式天数,或 snapshot_date - first_live_date (不小于 0)
    /// - None: 两者均缺失
    pub fn resolve_live_days(&self, snapshot_date: NaiveDate) -> Option<u32> {
        if let Some(days) = self.live_days {
            return Some(days);
        }
        self.first_live_date.map(|first| {
            let days = (snapshot_date - first).num_days();
            days.max(0) as u32
        })
    }
}

/// 门店 × 款式 目标
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreStyleDemand {
    pub store_id: String,
    pub style_id: String,
    /// 目标库存深度 (款式级)
    pub target_stock: u32,
    /// 上游给定的表现分层 (存在时直接采用)
    #[serde(default)]
    pub classification: Option<Segment>,
}

/// 门店 × SKU 需求
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSkuDemand {
    pub store_id: String,
    pub sku_id: String,
    /// 尺码贡献占比 (0~1)
    #[serde(default)]
    pub size_contribution: f64,
    /// 日均销量
    #[serde(default)]
    pub rate_of_sale: f64,
    /// 尺码最小陈列量
    #[serde(default)]
    pub min_qty: u32,
    /// 尺码最大量 (可选)
    #[serde(default)]
    pub max_qty: Option<u32>,
}

/// 需求信号集合
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DemandSignal {
    #[serde(default)]
    pub sales: Vec<StoreStyleSales>,
    #[serde(default)]
    pub style_demand: Vec<StoreStyleDemand>,
    #[serde(default)]
    pub sku_demand: Vec<StoreSkuDemand>,
}
