// ==========================================
// 零售商品铺货分配引擎 - 迭代规则执行
// ==========================================
// 职责: 对单个已准入的 门店×款式 执行本轮规则并提交分配
// 规则:
//   建议量 = 见 suggestion::suggested_qty
//   缺口   = 建议量 - 当前有效头寸
//   提交量 = min(缺口, 仓库可用量, 陈列剩余容量[受约束时])
// 红线: 只处理本轮要求的尺码; 未标记尺码从不分配
// ==========================================

use crate::domain::iteration::IterationConstraint;
use crate::domain::types::SizeTag;
use crate::engine::context::{StoreSkuIdx, StoreStyle, WarehouseIdx, WarehouseView};
use crate::engine::suggestion::suggested_qty;

/// 单个 SKU 的提交结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocationLine {
    pub store_sku: StoreSkuIdx,
    pub warehouse: WarehouseIdx,
    pub suggested: u32,
    pub gap: u32,
    pub quantity: u32,
}

/// 单个 门店×款式 在本轮的提交结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleAllocation {
    pub lines: Vec<AllocationLine>,
}

impl StyleAllocation {
    /// 本轮是否有任何分配
    pub fn is_resolved(&self) -> bool {
        self.lines.iter().any(|l| l.quantity > 0)
    }

    pub fn total_units(&self) -> u64 {
        self.lines.iter().map(|l| l.quantity as u64).sum()
    }
}

impl IterationConstraint {
    /// 对已准入的 门店×款式 计算并提交分配
    ///
    /// # 参数
    /// - `store_style`: 已通过准入判定的 门店×款式
    /// - `view`: 仓库视图 (提交后立即扣减可用量)
    ///
    /// # 返回
    /// 本轮各 SKU 的提交结果 (只含提交量 > 0 的行)
    pub fn apply(&self, store_style: &StoreStyle, view: &mut WarehouseView<'_>) -> StyleAllocation {
        let mut allocation = StyleAllocation::default();

        // 门店未映射仓库: 本轮无法供货
        let Some(warehouse) = view.warehouse_of(store_style.store) else {
            return allocation;
        };
        let enforce_planogram = self.kind.enforces_planogram();

        for idx in &store_style.skus {
            let (tag, depth, ros, min_qty, position, sku) = {
                let s = view.store_sku(*idx);
                (
                    s.size_tag,
                    s.target_depth,
                    s.rate_of_sale,
                    s.min_qty,
                    s.effective_position(),
                    s.sku,
                )
            };
            if tag == SizeTag::Untagged || !self.kind.requires_size(tag) {
                continue;
            }

            let suggested = suggested_qty(self, store_style.segment, depth, ros, min_qty);
            view.note_suggestion(*idx, suggested);

            let gap = suggested.saturating_sub(position);
            if gap == 0 {
                continue;
            }

            let mut qty = gap.min(view.available(warehouse, sku));
            if enforce_planogram {
                qty = qty.min(view.planogram_room(store_style.planogram));
            }
            if qty == 0 {
                continue;
            }

            let committed = view.commit(store_style, *idx, warehouse, qty);
            if committed > 0 {
                allocation.lines.push(AllocationLine {
                    store_sku: *idx,
                    warehouse,
                    suggested,
                    gap,
                    quantity: committed,
                });
            }
        }

        allocation
    }
}
