// ==========================================
// 零售商品铺货分配引擎 - 运行计划
// ==========================================
// 职责: 将配置中的迭代定义解析为有序、已校验的运行步骤
// 红线: 任何引用错误 (分层/健康门槛/覆盖倍数/类型) 都在此处失败,
//       保证分配开始前整个计划已完全有效
// ==========================================

use crate::config::IterationDefinition;
use crate::domain::iteration::{ExclusionRule, IterationConstraint, IterationKind};
use crate::domain::types::Segment;
use crate::engine::error::{EngineError, EngineResult};
use std::collections::{BTreeSet, HashMap, HashSet};
use tracing::info;

/// 默认覆盖倍数名称
pub const DEFAULT_COVER_MULTIPLIER: &str = "default";

/// 运行步骤
#[derive(Debug, Clone, PartialEq)]
pub enum RunStep {
    /// 一轮仓→店分配
    Allocate(IterationConstraint),
    /// 仓间调拨
    WarehouseTransfer { tag: String },
}

impl RunStep {
    pub fn tag(&self) -> &str {
        match self {
            RunStep::Allocate(c) => &c.tag,
            RunStep::WarehouseTransfer { tag } => tag,
        }
    }
}

/// 已校验的运行计划
#[derive(Debug, Clone, PartialEq)]
pub struct RunPlan {
    steps: Vec<RunStep>,
}

impl RunPlan {
    /// 解析并校验迭代定义
    ///
    /// # 参数
    /// - `definitions`: 有序迭代定义
    /// - `psa_benchmarks`: 命名的健康门槛
    /// - `cover_multipliers`: 命名的覆盖倍数
    /// - `default_replenishment_days`: 未单独配置时的补货天数
    ///
    /// # 返回
    /// - Ok(RunPlan): 全部步骤有效
    /// - Err: 首个无效定义对应的错误
    pub fn resolve(
        definitions: &[IterationDefinition],
        psa_benchmarks: &HashMap<String, f64>,
        cover_multipliers: &HashMap<String, f64>,
        default_replenishment_days: u32,
    ) -> EngineResult<Self> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut steps = Vec::with_capacity(definitions.len());

        for def in definitions {
            let tag = def.tag.trim();
            if tag.is_empty() {
                return Err(EngineError::InvalidIteration {
                    iteration: def.kind.clone(),
                    message: "迭代标签不能为空".to_string(),
                });
            }
            if !seen.insert(tag) {
                return Err(EngineError::DuplicateIterationTag(tag.to_string()));
            }
            steps.push(resolve_step(
                tag,
                def,
                psa_benchmarks,
                cover_multipliers,
                default_replenishment_days,
            )?);
        }

        if !steps.iter().any(|s| matches!(s, RunStep::Allocate(_))) {
            return Err(EngineError::EmptyRunPlan);
        }

        info!(
            steps = steps.len(),
            tags = ?steps.iter().map(|s| s.tag()).collect::<Vec<_>>(),
            "运行计划已解析"
        );
        Ok(Self { steps })
    }

    /// 直接由已构建的步骤组成计划
    pub fn from_steps(steps: Vec<RunStep>) -> EngineResult<Self> {
        if !steps.iter().any(|s| matches!(s, RunStep::Allocate(_))) {
            return Err(EngineError::EmptyRunPlan);
        }
        Ok(Self { steps })
    }

    pub fn steps(&self) -> &[RunStep] {
        &self.steps
    }

    /// 全部分配迭代 (按执行顺序)
    pub fn allocation_constraints(&self) -> impl Iterator<Item = &IterationConstraint> {
        self.steps.iter().filter_map(|s| match s {
            RunStep::Allocate(c) => Some(c),
            RunStep::WarehouseTransfer { .. } => None,
        })
    }
}

fn resolve_step(
    tag: &str,
    def: &IterationDefinition,
    psa_benchmarks: &HashMap<String, f64>,
    cover_multipliers: &HashMap<String, f64>,
    default_replenishment_days: u32,
) -> EngineResult<RunStep> {
    let invalid = |message: &str| EngineError::InvalidIteration {
        iteration: tag.to_string(),
        message: message.to_string(),
    };

    let kind_name = def.kind.trim().to_ascii_uppercase().replace('-', "_");
    if kind_name == "WAREHOUSE_TRANSFER" {
        return Ok(RunStep::WarehouseTransfer {
            tag: tag.to_string(),
        });
    }

    let segments = parse_segments(tag, &def.segments)?;
    let replenishment_days = def.replenishment_days.unwrap_or(default_replenishment_days);

    let kind = match kind_name.as_str() {
        "TOP_SELLER" => {
            if segments.iter().any(|s| *s != Segment::TopSeller) {
                return Err(invalid("TOP_SELLER 迭代只能作用于 TOP_SELLER 分层"));
            }
            if replenishment_days == 0 {
                return Err(invalid("补货天数必须大于 0"));
            }
            IterationKind::TopSeller {
                replenishment_days,
                cover_multiplier: resolve_cover(tag, def, cover_multipliers)?,
                enforce_planogram: def.enforce_planogram,
            }
        }
        "REPLENISHMENT" => {
            if replenishment_days == 0 {
                return Err(invalid("补货天数必须大于 0"));
            }
            IterationKind::Replenishment {
                segments,
                replenishment_days,
                cover_multiplier: resolve_cover(tag, def, cover_multipliers)?,
                enforce_planogram: def.enforce_planogram,
            }
        }
        "PLANOGRAM_FILL" => IterationKind::PlanogramFill { segments },
        "NON_PIVOTAL_SIZE" => IterationKind::NonPivotalSize {
            segments,
            enforce_planogram: def.enforce_planogram,
        },
        "MIN_AGE" => IterationKind::MinAge {
            segments,
            min_live_days: def
                .min_live_days
                .ok_or_else(|| invalid("MIN_AGE 迭代必须配置 min_live_days"))?,
            enforce_planogram: def.enforce_planogram,
        },
        "INCLUSION" => {
            if def.inclusions.is_empty() {
                return Err(invalid("INCLUSION 迭代必须配置纳入名单"));
            }
            IterationKind::Inclusion {
                entries: def
                    .inclusions
                    .iter()
                    .map(|e| (e.store_id.clone(), e.style_id.clone()))
                    .collect(),
                min_qty_per_size: def.inclusion_min_qty.unwrap_or(1),
                allow_breach: def.allow_breach,
            }
        }
        _ => {
            return Err(EngineError::UnknownIterationKind {
                iteration: tag.to_string(),
                kind: def.kind.clone(),
            })
        }
    };

    let psa_benchmark = match def.psa_benchmark.as_deref() {
        Some(name) => {
            let value = *psa_benchmarks
                .get(name)
                .ok_or_else(|| EngineError::UndefinedBenchmark {
                    iteration: tag.to_string(),
                    benchmark: name.to_string(),
                })?;
            if !value.is_finite() || value < 0.0 {
                return Err(EngineError::InvalidThreshold {
                    name: format!("psa_benchmarks.{}", name),
                    message: "必须为非负数".to_string(),
                });
            }
            Some(value)
        }
        None => None,
    };

    let exclusion = ExclusionRule {
        stores: def.exclude_stores.iter().cloned().collect(),
        styles: def.exclude_styles.iter().cloned().collect(),
        categories: def.exclude_categories.iter().cloned().collect(),
    };

    let mut constraint = IterationConstraint::new(tag, kind).with_exclusion(exclusion);
    if let Some(benchmark) = psa_benchmark {
        constraint = constraint.with_psa_benchmark(benchmark);
    }
    Ok(RunStep::Allocate(constraint))
}

fn parse_segments(tag: &str, names: &[String]) -> EngineResult<BTreeSet<Segment>> {
    names
        .iter()
        .map(|name| {
            name.parse::<Segment>()
                .map_err(|_| EngineError::UndefinedSegment {
                    iteration: tag.to_string(),
                    segment: name.clone(),
                })
        })
        .collect()
}

/// 覆盖倍数: 显式名称必须存在; 未配置时取 "default",再缺省为 1.0
fn resolve_cover(
    tag: &str,
    def: &IterationDefinition,
    cover_multipliers: &HashMap<String, f64>,
) -> EngineResult<f64> {
    let value = match def.cover_multiplier.as_deref() {
        Some(name) => *cover_multipliers
            .get(name)
            .ok_or_else(|| EngineError::UndefinedCoverMultiplier {
                iteration: tag.to_string(),
                name: name.to_string(),
            })?,
        None => cover_multipliers
            .get(DEFAULT_COVER_MULTIPLIER)
            .copied()
            .unwrap_or(1.0),
    };
    if !value.is_finite() || value <= 0.0 {
        return Err(EngineError::InvalidThreshold {
            name: format!("cover_multipliers ({})", tag),
            message: "必须为正数".to_string(),
        });
    }
    Ok(value)
}
