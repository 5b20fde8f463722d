// ==========================================
// 零售商品铺货分配引擎 - 表现分层引擎
// ==========================================
// 职责: 将每个 门店×款式 归入 TOP / NORMAL / BOTTOM
// 输入: 快照索引 (销售历史、目标、库存) + 分层阈值
// 输出: 分层结果 (含判定依据)
// 红线: 上游给定分层直接采用; 数据不足一律判为 NORMAL
// ==========================================

use crate::config::SegmentationThresholds;
use crate::domain::types::Segment;
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::snapshot_index::SnapshotIndex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, instrument, warn};

// ==========================================
// 判定原因代码
// ==========================================
pub mod reason_codes {
    pub const UPSTREAM: &str = "UPSTREAM_CLASSIFICATION";
    pub const REVENUE_ABOVE_BENCHMARK: &str = "REVENUE_ABOVE_BENCHMARK";
    pub const DISCOUNT_LOW_SELL_THROUGH: &str = "DISCOUNT_LOW_SELL_THROUGH";
    pub const DEFAULT_NORMAL: &str = "DEFAULT_NORMAL";
    pub const INSUFFICIENT_DATA: &str = "INSUFFICIENT_DATA";
}

/// 门店 × 款式 分层结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentedStoreStyle {
    pub store_id: String,
    pub style_id: String,
    pub category: String,
    pub channel: String,
    pub segment: Segment,
    pub reason: String,
    pub target_stock: u32,
    pub current_stock: u32,
    pub live_days: Option<u32>,
    /// 本店日均营收 (无有效上架天数时为 None)
    pub revenue_per_day: Option<f64>,
    pub store_category_benchmark: Option<f64>,
    pub channel_category_benchmark: Option<f64>,
}

/// 分层判定所需指标
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SegmentMetrics {
    pub has_sales: bool,
    pub revenue_per_day: Option<f64>,
    pub live_days: Option<u32>,
    pub store_category_benchmark: Option<f64>,
    pub channel_category_benchmark: Option<f64>,
    pub units_sold: u32,
    pub current_stock: u32,
    pub avg_discount_pct: f64,
}

impl SegmentMetrics {
    /// 售罄率 (%) = 销量 / (销量 + 当前库存)
    pub fn sell_through_pct(&self) -> Option<f64> {
        let total = self.units_sold as f64 + self.current_stock as f64;
        if total <= 0.0 {
            None
        } else {
            Some(self.units_sold as f64 * 100.0 / total)
        }
    }
}

/// 营收/天数累加器 (基准 = Σ营收 / Σ上架天数)
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct RateAccumulator {
    revenue: f64,
    days: u64,
}

impl RateAccumulator {
    pub(crate) fn add(&mut self, revenue: f64, days: u32) {
        if revenue.is_finite() && days > 0 {
            self.revenue += revenue;
            self.days += days as u64;
        }
    }

    pub(crate) fn rate(&self) -> Option<f64> {
        if self.days == 0 {
            None
        } else {
            Some(self.revenue / self.days as f64)
        }
    }
}

// ==========================================
// SegmentationEngine - 表现分层引擎
// ==========================================
pub struct SegmentationEngine {
    // 无状态引擎
}

impl SegmentationEngine {
    pub fn new() -> Self {
        Self {}
    }

    /// 校验分层阈值
    pub fn validate_thresholds(thresholds: &SegmentationThresholds) -> EngineResult<()> {
        let invalid = |name: &str, message: &str| EngineError::InvalidThreshold {
            name: name.to_string(),
            message: message.to_string(),
        };
        if !thresholds.revenue_multiplier.is_finite() || thresholds.revenue_multiplier <= 0.0 {
            return Err(invalid("revenue_multiplier", "必须为正数"));
        }
        if !(0.0..=100.0).contains(&thresholds.discount_ceiling_pct) {
            return Err(invalid("discount_ceiling_pct", "必须在 0~100 之间"));
        }
        if !(0.0..=100.0).contains(&thresholds.sell_through_floor_pct) {
            return Err(invalid("sell_through_floor_pct", "必须在 0~100 之间"));
        }
        Ok(())
    }

    /// 对分配范围内的全部 门店×款式 分层
    ///
    /// 分配范围 = 需求信号中的款式目标行 (门店和款式必须存在)
    ///
    /// # 参数
    /// - `index`: 快照索引
    /// - `thresholds`: 分层阈值
    ///
    /// # 返回
    /// 分层结果,顺序与款式目标行一致
    #[instrument(skip_all, fields(rows = index.input().demand.style_demand.len()))]
    pub fn segment(
        &self,
        index: &SnapshotIndex<'_>,
        thresholds: &SegmentationThresholds,
    ) -> Vec<SegmentedStoreStyle> {
        let (store_benchmarks, channel_benchmarks) = self.compute_benchmarks(index);
        let snapshot_date = index.snapshot_date();

        let mut seen: HashSet<(&str, &str)> = HashSet::new();
        let mut results = Vec::new();

        for demand in &index.input().demand.style_demand {
            if !seen.insert((demand.store_id.as_str(), demand.style_id.as_str())) {
                debug!(store_id = %demand.store_id, style_id = %demand.style_id, "重复的款式目标行,忽略");
                continue;
            }
            let (Some(store), Some(style)) =
                (index.store(&demand.store_id), index.style(&demand.style_id))
            else {
                warn!(store_id = %demand.store_id, style_id = %demand.style_id, "款式目标引用未知门店或款式,忽略");
                continue;
            };

            let sales = index.sales(&store.store_id, &style.style_id);
            let live_days = sales.and_then(|s| s.resolve_live_days(snapshot_date));
            let revenue_per_day = match (sales, live_days) {
                (Some(s), Some(days)) if days > 0 && s.revenue.is_finite() => {
                    Some(s.revenue / days as f64)
                }
                _ => None,
            };
            let store_category_benchmark = store_benchmarks
                .get(&(store.store_id.as_str(), style.category.as_str()))
                .and_then(|acc| acc.rate());
            let channel_category_benchmark = channel_benchmarks
                .get(&(store.channel.as_str(), style.category.as_str()))
                .and_then(|acc| acc.rate());
            let current_stock = index.store_style_stock(&store.store_id, &style.style_id);

            let metrics = SegmentMetrics {
                has_sales: sales.is_some(),
                revenue_per_day,
                live_days,
                store_category_benchmark,
                channel_category_benchmark,
                units_sold: sales.map(|s| s.units_sold).unwrap_or(0),
                current_stock,
                avg_discount_pct: sales.map(|s| s.avg_discount_pct).unwrap_or(0.0),
            };

            let (segment, reason) = match demand.classification {
                Some(segment) => (segment, reason_codes::UPSTREAM),
                None => self.classify(&metrics, thresholds),
            };

            results.push(SegmentedStoreStyle {
                store_id: store.store_id.clone(),
                style_id: style.style_id.clone(),
                category: style.category.clone(),
                channel: store.channel.clone(),
                segment,
                reason: reason.to_string(),
                target_stock: demand.target_stock,
                current_stock,
                live_days,
                revenue_per_day,
                store_category_benchmark,
                channel_category_benchmark,
            });
        }

        let top = results.iter().filter(|r| r.segment == Segment::TopSeller).count();
        let bottom = results.iter().filter(|r| r.segment == Segment::BottomSeller).count();
        info!(
            total = results.len(),
            top,
            bottom,
            "分层完成"
        );
        results
    }

    /// 单个 门店×款式 的分层判定
    ///
    /// 判定顺序:
    /// 1) 无销售记录 → NORMAL (数据不足)
    /// 2) 上架天数达标,且日均营收同时超过 门店×品类 与 渠道×品类 基准 × 倍数 → TOP
    /// 3) 平均折扣率超过上限,且售罄率低于下限 → BOTTOM
    /// 4) 其余 → NORMAL
    pub fn classify(
        &self,
        metrics: &SegmentMetrics,
        thresholds: &SegmentationThresholds,
    ) -> (Segment, &'static str) {
        if !metrics.has_sales {
            return (Segment::NormalSeller, reason_codes::INSUFFICIENT_DATA);
        }

        if let (Some(rpd), Some(days), Some(store_bm), Some(channel_bm)) = (
            metrics.revenue_per_day,
            metrics.live_days,
            metrics.store_category_benchmark,
            metrics.channel_category_benchmark,
        ) {
            let multiplier = thresholds.revenue_multiplier;
            if days >= thresholds.min_live_days
                && rpd > store_bm * multiplier
                && rpd > channel_bm * multiplier
            {
                return (Segment::TopSeller, reason_codes::REVENUE_ABOVE_BENCHMARK);
            }
        }

        let discount_breach = metrics.avg_discount_pct > thresholds.discount_ceiling_pct;
        let low_sell_through = metrics
            .sell_through_pct()
            .map(|st| st < thresholds.sell_through_floor_pct)
            .unwrap_or(false);
        if discount_breach && low_sell_through {
            return (Segment::BottomSeller, reason_codes::DISCOUNT_LOW_SELL_THROUGH);
        }

        (Segment::NormalSeller, reason_codes::DEFAULT_NORMAL)
    }

    /// 计算 门店×品类 与 渠道×品类 日均营收基准
    ///
    /// 基准包含被判定款式自身; 无有效上架天数的销售行不计入
    fn compute_benchmarks<'a>(
        &self,
        index: &SnapshotIndex<'a>,
    ) -> (
        HashMap<(&'a str, &'a str), RateAccumulator>,
        HashMap<(&'a str, &'a str), RateAccumulator>,
    ) {
        let snapshot_date = index.snapshot_date();
        let mut by_store: HashMap<(&str, &str), RateAccumulator> = HashMap::new();
        let mut by_channel: HashMap<(&str, &str), RateAccumulator> = HashMap::new();

        for row in index.sales_rows() {
            let (Some(store), Some(style)) = (index.store(&row.store_id), index.style(&row.style_id))
            else {
                continue;
            };
            let Some(days) = row.resolve_live_days(snapshot_date) else {
                continue;
            };
            by_store
                .entry((store.store_id.as_str(), style.category.as_str()))
                .or_default()
                .add(row.revenue, days);
            by_channel
                .entry((store.channel.as_str(), style.category.as_str()))
                .or_default()
                .add(row.revenue, days);
        }
        (by_store, by_channel)
    }
}

impl Default for SegmentationEngine {
    fn default() -> Self {
        Self::new()
    }
}
