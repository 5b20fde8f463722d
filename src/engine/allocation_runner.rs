// ==========================================
// 零售商品铺货分配引擎 - 分配迭代执行器
// ==========================================
// 职责: 按优先级顺序对全部 门店×款式 执行单轮迭代
// 输入: 运行上下文 + 迭代约束
// 输出: 分配记录 + 迭代汇总 (台账已同步扣减)
// ==========================================
// 红线: 严格按 rank 顺序处理,高优先级先占用仓库库存
// 红线: 本轮提交在下一轮开始前对仓库可用量立即可见
// ==========================================

use crate::domain::allocation::{AllocationRecord, IterationSummary};
use crate::domain::iteration::IterationConstraint;
use crate::engine::context::RunContext;
use crate::engine::eligibility::check_eligibility;
use std::collections::BTreeMap;
use tracing::{debug, info, instrument};

/// 单轮迭代结果
#[derive(Debug, Clone)]
pub struct IterationOutcome {
    pub summary: IterationSummary,
    pub allocations: Vec<AllocationRecord>,
}

// ==========================================
// AllocationIterationRunner - 分配迭代执行器
// ==========================================
pub struct AllocationIterationRunner {
    // 无状态引擎,不需要注入依赖
}

impl AllocationIterationRunner {
    pub fn new() -> Self {
        Self {}
    }

    /// 执行单轮迭代
    ///
    /// # 参数
    /// - `ctx`: 运行上下文 (台账会被修改)
    /// - `constraint`: 本轮迭代约束
    ///
    /// # 返回
    /// 本轮分配记录 (按 rank、SKU 顺序) 与汇总
    #[instrument(skip(self, ctx, constraint), fields(
        tag = %constraint.tag,
        purpose = %constraint.kind.purpose()
    ))]
    pub fn run_iteration(
        &self,
        ctx: &mut RunContext,
        constraint: &IterationConstraint,
    ) -> IterationOutcome {
        let (ranked, mut view) = ctx.allocation_view();

        let mut allocations = Vec::new();
        let mut skipped: BTreeMap<String, usize> = BTreeMap::new();
        let mut admitted = 0usize;
        let mut resolved_styles = 0usize;
        let mut allocated_units = 0u64;

        for store_style in ranked {
            if let Err(reason) = check_eligibility(constraint, store_style, &view) {
                *skipped.entry(reason.code().to_string()).or_insert(0) += 1;
                continue;
            }
            admitted += 1;

            let allocation = constraint.apply(store_style, &mut view);
            if !allocation.is_resolved() {
                continue;
            }
            view.mark_resolved(store_style.id, &constraint.tag);
            resolved_styles += 1;
            allocated_units += allocation.total_units();

            let catalog = view.catalog();
            let store_id = &catalog.store(store_style.store).store.store_id;
            for line in &allocation.lines {
                let sku = view.store_sku(line.store_sku).sku;
                allocations.push(AllocationRecord {
                    warehouse_id: catalog.warehouse(line.warehouse).warehouse_id.clone(),
                    store_id: store_id.clone(),
                    sku_id: catalog.sku(sku).sku.sku_id.clone(),
                    quantity: line.quantity,
                    iteration_tag: constraint.tag.clone(),
                });
                debug!(
                    store_id = %store_id,
                    sku_id = %catalog.sku(sku).sku.sku_id,
                    suggested = line.suggested,
                    gap = line.gap,
                    quantity = line.quantity,
                    "分配已提交"
                );
            }
        }

        info!(
            evaluated = ranked.len(),
            admitted,
            resolved_styles,
            allocated_units,
            "迭代完成"
        );

        IterationOutcome {
            summary: IterationSummary {
                tag: constraint.tag.clone(),
                purpose: constraint.kind.purpose(),
                evaluated: ranked.len(),
                admitted,
                resolved_styles,
                allocated_units,
                skipped,
            },
            allocations,
        }
    }

    /// 依次执行多轮迭代
    pub fn run_all(
        &self,
        ctx: &mut RunContext,
        constraints: &[IterationConstraint],
    ) -> Vec<IterationOutcome> {
        constraints
            .iter()
            .map(|c| self.run_iteration(ctx, c))
            .collect()
    }
}

impl Default for AllocationIterationRunner {
    fn default() -> Self {
        Self::new()
    }
}
