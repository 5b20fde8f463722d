// ==========================================
// 零售商品铺货分配引擎 - 建议量计算
// ==========================================
// 职责: 尺码目标深度、覆盖天数需求、单轮建议量
// 红线: 纯函数,不读写台账
// ==========================================

use crate::domain::iteration::{IterationConstraint, IterationKind};
use crate::domain::types::Segment;

/// 尺码目标深度
///
/// round(款式目标库存 × 尺码贡献) 后夹在 [min_qty, max_qty] 之间;
/// max_qty 小于 min_qty 时以 min_qty 为准
pub fn target_depth(target_stock: u32, contribution: f64, min_qty: u32, max_qty: Option<u32>) -> u32 {
    let raw = if contribution.is_finite() && contribution > 0.0 {
        (target_stock as f64 * contribution).round() as u32
    } else {
        0
    };
    let floored = raw.max(min_qty);
    match max_qty {
        Some(max) => floored.min(max.max(min_qty)),
        None => floored,
    }
}

/// 覆盖天数需求 = ⌈日均销量 × 天数 × 倍数⌉
pub fn cover_quantity(rate_of_sale: f64, days: u32, multiplier: f64) -> u32 {
    let qty = rate_of_sale * days as f64 * multiplier;
    if !qty.is_finite() || qty <= 0.0 {
        0
    } else {
        qty.ceil() as u32
    }
}

/// 单个 SKU 在本轮的建议量
///
/// # 参数
/// - `constraint`: 本轮迭代
/// - `segment`: 门店×款式 分层
/// - `depth`: 尺码目标深度
/// - `rate_of_sale`: 日均销量
/// - `min_qty`: 尺码最小陈列量
pub fn suggested_qty(
    constraint: &IterationConstraint,
    segment: Segment,
    depth: u32,
    rate_of_sale: f64,
    min_qty: u32,
) -> u32 {
    match &constraint.kind {
        IterationKind::TopSeller {
            replenishment_days,
            cover_multiplier,
            ..
        }
        | IterationKind::Replenishment {
            replenishment_days,
            cover_multiplier,
            ..
        } => {
            if segment == Segment::TopSeller {
                depth.max(cover_quantity(
                    rate_of_sale,
                    *replenishment_days,
                    *cover_multiplier,
                ))
            } else {
                depth
            }
        }
        IterationKind::PlanogramFill { .. } | IterationKind::NonPivotalSize { .. } => depth,
        IterationKind::MinAge { .. } => min_qty,
        IterationKind::Inclusion {
            min_qty_per_size,
            allow_breach,
            ..
        } => {
            if *allow_breach {
                depth.max(*min_qty_per_size)
            } else {
                depth
            }
        }
    }
}
