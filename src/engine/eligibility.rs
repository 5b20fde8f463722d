// ==========================================
// 零售商品铺货分配引擎 - 迭代准入判定
// ==========================================
// 职责: 判定某个 门店×款式 能否参与当前迭代
// 判定顺序: 排除规则 → 分层/名单 → 健康门槛 → 迭代类型专属条件
// 红线: 只读判定,不修改台账
// ==========================================

use crate::domain::iteration::{IterationConstraint, IterationKind};
use crate::domain::types::SizeTag;
use crate::engine::context::{StoreStyle, WarehouseView};
use std::fmt;

/// 跳过原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SkipReason {
    /// 命中排除规则
    Excluded,
    /// 分层不在本轮范围内
    SegmentFiltered,
    /// 不在强制纳入名单内
    NotIncluded,
    /// PSA 低于健康门槛 (或缺失)
    HealthGate,
    /// 门店已陈列该款,不属于陈列填充对象
    AlreadyDisplayed,
    /// 陈列单元款位已满 (或无陈列目标)
    OptionsFull,
    /// 未在前序迭代获得分配且无核心尺码库存
    NotResolved,
    /// 上架天数不足
    TooYoung,
}

impl SkipReason {
    pub fn code(&self) -> &'static str {
        match self {
            SkipReason::Excluded => "EXCLUDED",
            SkipReason::SegmentFiltered => "SEGMENT_FILTERED",
            SkipReason::NotIncluded => "NOT_INCLUDED",
            SkipReason::HealthGate => "HEALTH_GATE",
            SkipReason::AlreadyDisplayed => "ALREADY_DISPLAYED",
            SkipReason::OptionsFull => "OPTIONS_FULL",
            SkipReason::NotResolved => "NOT_RESOLVED",
            SkipReason::TooYoung => "TOO_YOUNG",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// 判定 门店×款式 能否参与本轮
///
/// # 返回
/// - Ok(()): 准入
/// - Err(SkipReason): 跳过原因
pub fn check_eligibility(
    constraint: &IterationConstraint,
    store_style: &StoreStyle,
    view: &WarehouseView<'_>,
) -> Result<(), SkipReason> {
    let catalog = view.catalog();
    let store_id = catalog.store(store_style.store).store.store_id.as_str();
    let style = catalog.style(store_style.style);

    if constraint
        .exclusion
        .excludes(store_id, &style.style_id, &style.category)
    {
        return Err(SkipReason::Excluded);
    }

    match &constraint.kind {
        IterationKind::Inclusion { entries, .. } => {
            if !entries.contains(&(store_id.to_string(), style.style_id.clone())) {
                return Err(SkipReason::NotIncluded);
            }
        }
        kind => {
            if !kind.admits_segment(store_style.segment) {
                return Err(SkipReason::SegmentFiltered);
            }
        }
    }

    if let Some(benchmark) = constraint.psa_benchmark {
        match store_style.psa {
            Some(psa) if psa >= benchmark => {}
            _ => return Err(SkipReason::HealthGate),
        }
    }

    match &constraint.kind {
        IterationKind::PlanogramFill { .. } => {
            let state = view.style_state(store_style.id);
            let displayed = store_style.current_stock > 0
                || state.introduced
                || store_style
                    .skus
                    .iter()
                    .any(|idx| view.store_sku(*idx).warehouse_allocated > 0);
            if displayed {
                return Err(SkipReason::AlreadyDisplayed);
            }
            let has_room = store_style
                .planogram
                .map(|cell| view.planogram_cell(cell).option_room() > 0)
                .unwrap_or(false);
            if !has_room {
                return Err(SkipReason::OptionsFull);
            }
        }
        IterationKind::NonPivotalSize { .. } => {
            let resolved = !view.style_state(store_style.id).resolved_in.is_empty();
            let pivotal_stock = store_style.skus.iter().any(|idx| {
                let sku = view.store_sku(*idx);
                sku.size_tag == SizeTag::Pivotal && sku.position > 0
            });
            if !resolved && !pivotal_stock {
                return Err(SkipReason::NotResolved);
            }
        }
        IterationKind::MinAge { min_live_days, .. } => {
            let old_enough = store_style
                .live_days
                .map(|days| days >= *min_live_days)
                .unwrap_or(false);
            if !old_enough {
                return Err(SkipReason::TooYoung);
            }
        }
        _ => {}
    }

    Ok(())
}
