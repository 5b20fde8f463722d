// ==========================================
// 零售商品铺货分配引擎 - 迭代约束
// ==========================================
// 职责: 描述单轮分配的规则 (不可变值对象)
// 红线: 每种迭代只携带自身需要的参数,不使用布尔开关组合
// ==========================================

use crate::domain::types::{IterationPurpose, Segment, SizeTag};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// ==========================================
// IterationKind - 迭代类型 (和类型)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IterationKind {
    /// 畅销款推送 (仅 TOP_SELLER)
    TopSeller {
        replenishment_days: u32,
        cover_multiplier: f64,
        enforce_planogram: bool,
    },
    /// 补货
    Replenishment {
        segments: BTreeSet<Segment>,
        replenishment_days: u32,
        cover_multiplier: f64,
        enforce_planogram: bool,
    },
    /// 陈列填充 (始终受陈列容量约束)
    PlanogramFill { segments: BTreeSet<Segment> },
    /// 非核心尺码补齐
    NonPivotalSize {
        segments: BTreeSet<Segment>,
        enforce_planogram: bool,
    },
    /// 最低上架天数款的最少陈列
    MinAge {
        segments: BTreeSet<Segment>,
        min_live_days: u32,
        enforce_planogram: bool,
    },
    /// 指定 (门店, 款式) 强制纳入
    Inclusion {
        entries: BTreeSet<(String, String)>,
        min_qty_per_size: u32,
        allow_breach: bool,
    },
}

impl IterationKind {
    pub fn purpose(&self) -> IterationPurpose {
        match self {
            IterationKind::TopSeller { .. } => IterationPurpose::TopSeller,
            IterationKind::Replenishment { .. } => IterationPurpose::Replenishment,
            IterationKind::PlanogramFill { .. } => IterationPurpose::PlanogramFill,
            IterationKind::NonPivotalSize { .. } => IterationPurpose::NonPivotalSize,
            IterationKind::MinAge { .. } => IterationPurpose::MinAge,
            IterationKind::Inclusion { .. } => IterationPurpose::Inclusion,
        }
    }

    /// 是否受陈列容量约束
    pub fn enforces_planogram(&self) -> bool {
        match self {
            IterationKind::TopSeller { enforce_planogram, .. }
            | IterationKind::Replenishment { enforce_planogram, .. }
            | IterationKind::NonPivotalSize { enforce_planogram, .. }
            | IterationKind::MinAge { enforce_planogram, .. } => *enforce_planogram,
            IterationKind::PlanogramFill { .. } => true,
            IterationKind::Inclusion { allow_breach, .. } => !*allow_breach,
        }
    }

    /// 是否为补货型迭代 (畅销款使用覆盖天数公式)
    pub fn is_replenishment_type(&self) -> bool {
        matches!(
            self,
            IterationKind::TopSeller { .. } | IterationKind::Replenishment { .. }
        )
    }

    /// 分层过滤
    ///
    /// 空集合表示不限分层; Inclusion 由名单决定,不做分层过滤
    pub fn admits_segment(&self, segment: Segment) -> bool {
        match self {
            IterationKind::TopSeller { .. } => segment == Segment::TopSeller,
            IterationKind::Replenishment { segments, .. }
            | IterationKind::PlanogramFill { segments }
            | IterationKind::NonPivotalSize { segments, .. }
            | IterationKind::MinAge { segments, .. } => {
                segments.is_empty() || segments.contains(&segment)
            }
            IterationKind::Inclusion { .. } => true,
        }
    }

    /// 本轮需要分配的尺码
    pub fn requires_size(&self, tag: SizeTag) -> bool {
        match self {
            IterationKind::NonPivotalSize { .. } => tag == SizeTag::NonPivotal,
            _ => tag == SizeTag::Pivotal,
        }
    }
}

// ==========================================
// ExclusionRule - 排除规则
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExclusionRule {
    #[serde(default)]
    pub stores: BTreeSet<String>,
    #[serde(default)]
    pub styles: BTreeSet<String>,
    #[serde(default)]
    pub categories: BTreeSet<String>,
}

impl ExclusionRule {
    pub fn excludes(&self, store_id: &str, style_id: &str, category: &str) -> bool {
        self.stores.contains(store_id)
            || self.styles.contains(style_id)
            || self.categories.contains(category)
    }
}

// ==========================================
// IterationConstraint - 单轮迭代约束
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IterationConstraint {
    /// 迭代标签 (写入分配记录)
    pub tag: String,
    pub kind: IterationKind,
    /// 健康门槛: PSA (%) 不低于该值才参与本轮
    #[serde(default)]
    pub psa_benchmark: Option<f64>,
    #[serde(default)]
    pub exclusion: ExclusionRule,
}

impl IterationConstraint {
    pub fn new(tag: &str, kind: IterationKind) -> Self {
        Self {
            tag: tag.to_string(),
            kind,
            psa_benchmark: None,
            exclusion: ExclusionRule::default(),
        }
    }

    pub fn with_psa_benchmark(mut self, benchmark: f64) -> Self {
        self.psa_benchmark = Some(benchmark);
        self
    }

    pub fn with_exclusion(mut self, exclusion: ExclusionRule) -> Self {
        self.exclusion = exclusion;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_seller_admits_only_top_segment() {
        let kind = IterationKind::TopSeller {
            replenishment_days: 7,
            cover_multiplier: 1.0,
            enforce_planogram: false,
        };
        assert!(kind.admits_segment(Segment::TopSeller));
        assert!(!kind.admits_segment(Segment::NormalSeller));
        assert!(kind.is_replenishment_type());
    }

    #[test]
    fn test_empty_segment_set_admits_all() {
        let kind = IterationKind::PlanogramFill {
            segments: BTreeSet::new(),
        };
        for segment in Segment::ALL {
            assert!(kind.admits_segment(segment));
        }
        assert!(kind.enforces_planogram());
    }

    #[test]
    fn test_inclusion_breach_disables_planogram() {
        let kind = IterationKind::Inclusion {
            entries: BTreeSet::new(),
            min_qty_per_size: 1,
            allow_breach: true,
        };
        assert!(!kind.enforces_planogram());
    }

    #[test]
    fn test_non_pivotal_pass_requires_only_non_pivotal_sizes() {
        let kind = IterationKind::NonPivotalSize {
            segments: BTreeSet::new(),
            enforce_planogram: false,
        };
        assert!(kind.requires_size(SizeTag::NonPivotal));
        assert!(!kind.requires_size(SizeTag::Pivotal));
        assert!(!kind.requires_size(SizeTag::Untagged));
    }
}
