use super::blend::{LocalOnlyBlend, RevenueBlend};
use crate::domain::types::Segment;
use crate::engine::segmentation::{RateAccumulator, SegmentedStoreStyle};
use crate::engine::snapshot_index::SnapshotIndex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument};

/// 已排序的 门店×款式
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedStoreStyle {
    pub store_id: String,
    pub style_id: String,
    pub category: String,
    pub segment: Segment,
    /// 全局优先级 (1 为最高)
    pub rank: u32,
    pub target_stock: u32,
    pub current_stock: u32,
    pub live_days: Option<u32>,
    /// 本店日均营收 (无历史为 0)
    pub revenue_per_day: f64,
    /// 全国款式日均营收 (无历史为 0)
    pub peer_revenue_per_day: f64,
    /// 混合后的日均营收 (主排序键)
    pub blended_revenue_per_day: f64,
    pub psa: Option<f64>,
}

// ==========================================
// RankingKey - 排序键
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankingKey {
    /// 混合日均营收 降序
    OwnRevenuePerDay,
    /// 全国款式日均营收 降序
    PeerRevenuePerDay,
    /// 陈列达成率 降序 (缺失视为 0)
    Psa,
    /// 当前库存 升序 (缺货门店优先)
    CurrentStock,
    /// 款式编号 升序
    StyleId,
    /// 门店编号 升序
    StoreId,
}

impl RankingKey {
    /// 排序键优先级 (前者主导)
    pub const PRECEDENCE: [RankingKey; 6] = [
        RankingKey::OwnRevenuePerDay,
        RankingKey::PeerRevenuePerDay,
        RankingKey::Psa,
        RankingKey::CurrentStock,
        RankingKey::StyleId,
        RankingKey::StoreId,
    ];

    /// 单键比较 (Less 表示 a 优先)
    pub fn compare(&self, a: &RankedStoreStyle, b: &RankedStoreStyle) -> Ordering {
        match self {
            RankingKey::OwnRevenuePerDay => b
                .blended_revenue_per_day
                .total_cmp(&a.blended_revenue_per_day),
            RankingKey::PeerRevenuePerDay => {
                b.peer_revenue_per_day.total_cmp(&a.peer_revenue_per_day)
            }
            RankingKey::Psa => b.psa.unwrap_or(0.0).total_cmp(&a.psa.unwrap_or(0.0)),
            RankingKey::CurrentStock => a.current_stock.cmp(&b.current_stock),
            RankingKey::StyleId => a.style_id.cmp(&b.style_id),
            RankingKey::StoreId => a.store_id.cmp(&b.store_id),
        }
    }
}

/// 复合比较器: 按 PRECEDENCE 依次比较,首个不相等的键决定顺序
pub fn compare_priority(a: &RankedStoreStyle, b: &RankedStoreStyle) -> Ordering {
    RankingKey::PRECEDENCE
        .iter()
        .map(|key| key.compare(a, b))
        .find(|ord| *ord != Ordering::Equal)
        .unwrap_or(Ordering::Equal)
}

// ==========================================
// RankingEngine - 优先级排序引擎
// ==========================================
#[derive(Debug, Clone)]
pub struct RankingEngine {
    blend: Arc<dyn RevenueBlend>,
}

impl RankingEngine {
    /// # 参数
    /// - `blend`: 本地/全国营收混合策略
    pub fn new(blend: Arc<dyn RevenueBlend>) -> Self {
        Self { blend }
    }

    /// 排序
    ///
    /// # 参数
    /// - `segmented`: 分层结果
    /// - `index`: 快照索引 (全国营收、PSA)
    ///
    /// # 返回
    /// 按优先级从高到低排列,rank 连续且从 1 开始
    #[instrument(skip_all, fields(rows = segmented.len()))]
    pub fn rank(
        &self,
        segmented: &[SegmentedStoreStyle],
        index: &SnapshotIndex<'_>,
    ) -> Vec<RankedStoreStyle> {
        let peer_rates = self.compute_peer_rates(index);

        let mut ranked: Vec<RankedStoreStyle> = segmented
            .iter()
            .map(|s| {
                let own = s.revenue_per_day.unwrap_or(0.0);
                let peer = peer_rates
                    .get(s.style_id.as_str())
                    .and_then(|acc| acc.rate())
                    .unwrap_or(0.0);
                RankedStoreStyle {
                    store_id: s.store_id.clone(),
                    style_id: s.style_id.clone(),
                    category: s.category.clone(),
                    segment: s.segment,
                    rank: 0,
                    target_stock: s.target_stock,
                    current_stock: s.current_stock,
                    live_days: s.live_days,
                    revenue_per_day: own,
                    peer_revenue_per_day: peer,
                    blended_revenue_per_day: self.blend.blend(own, peer, s.live_days),
                    psa: index.psa(&s.store_id, &s.style_id),
                }
            })
            .collect();

        ranked.sort_by(compare_priority);
        for (i, item) in ranked.iter_mut().enumerate() {
            item.rank = (i + 1) as u32;
        }

        info!(ranked = ranked.len(), "优先级排序完成");
        ranked
    }

    /// 全国款式日均营收 = Σ营收 / Σ上架天数 (全部门店)
    fn compute_peer_rates<'a>(
        &self,
        index: &SnapshotIndex<'a>,
    ) -> HashMap<&'a str, RateAccumulator> {
        let snapshot_date = index.snapshot_date();
        let mut rates: HashMap<&str, RateAccumulator> = HashMap::new();
        for row in index.sales_rows() {
            if let Some(days) = row.resolve_live_days(snapshot_date) {
                rates
                    .entry(row.style_id.as_str())
                    .or_default()
                    .add(row.revenue, days);
            }
        }
        rates
    }
}

impl Default for RankingEngine {
    fn default() -> Self {
        Self::new(Arc::new(LocalOnlyBlend))
    }
}
