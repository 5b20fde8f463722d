// ==========================================
// 零售商品铺货分配引擎 - 输出汇总
// ==========================================
// 职责: 把分配、仓间调拨、店间调拨合并为 节点×SKU 的净变化报表,
//       并生成 门店×款式 诊断
// 红线: 纯函数; 同一输入多次汇总结果完全一致 (BTreeMap 排序)
// ==========================================

use crate::domain::allocation::{
    AllocationRecord, ConsolidatedRecord, StoreStyleDiagnostic, StoreTransfer, WarehouseTransfer,
};
use crate::domain::types::NodeKind;
use crate::engine::context::RunContext;
use std::collections::BTreeMap;
use tracing::debug;

type NodeKey = (NodeKind, String, String);

// ==========================================
// OutputConsolidator - 输出汇总
// ==========================================
pub struct OutputConsolidator {
    // 无状态
}

impl OutputConsolidator {
    pub fn new() -> Self {
        Self {}
    }

    /// 汇总 节点×SKU 净变化
    ///
    /// # 返回
    /// 按 (节点类型, 节点编号, SKU) 排序的汇总行
    pub fn consolidate(
        &self,
        allocations: &[AllocationRecord],
        warehouse_transfers: &[WarehouseTransfer],
        store_transfers: &[StoreTransfer],
    ) -> Vec<ConsolidatedRecord> {
        let mut rows: BTreeMap<NodeKey, ConsolidatedRecord> = BTreeMap::new();

        fn row<'m>(
            rows: &'m mut BTreeMap<NodeKey, ConsolidatedRecord>,
            kind: NodeKind,
            node_id: &str,
            sku_id: &str,
        ) -> &'m mut ConsolidatedRecord {
            rows.entry((kind, node_id.to_string(), sku_id.to_string()))
                .or_insert_with(|| ConsolidatedRecord {
                    node_kind: kind,
                    node_id: node_id.to_string(),
                    sku_id: sku_id.to_string(),
                    allocated_in: 0,
                    allocated_out: 0,
                    warehouse_transfer_in: 0,
                    warehouse_transfer_out: 0,
                    store_transfer_in: 0,
                    store_transfer_out: 0,
                })
        }

        for a in allocations {
            row(&mut rows, NodeKind::Warehouse, &a.warehouse_id, &a.sku_id).allocated_out += a.quantity;
            row(&mut rows, NodeKind::Store, &a.store_id, &a.sku_id).allocated_in += a.quantity;
        }
        for t in warehouse_transfers {
            row(&mut rows, NodeKind::Warehouse, &t.source_warehouse_id, &t.sku_id)
                .warehouse_transfer_out += t.quantity;
            row(&mut rows, NodeKind::Warehouse, &t.destination_warehouse_id, &t.sku_id)
                .warehouse_transfer_in += t.quantity;
        }
        for t in store_transfers {
            row(&mut rows, NodeKind::Store, &t.source_store_id, &t.sku_id).store_transfer_out +=
                t.quantity;
            row(&mut rows, NodeKind::Store, &t.destination_store_id, &t.sku_id)
                .store_transfer_in += t.quantity;
        }

        debug!(rows = rows.len(), "汇总完成");
        rows.into_values().collect()
    }

    /// 合并同一 (仓库, 门店, SKU, 迭代) 的分配记录
    pub fn merge_allocations(&self, allocations: &[AllocationRecord]) -> Vec<AllocationRecord> {
        let mut merged: BTreeMap<(&str, &str, &str, &str), u32> = BTreeMap::new();
        for a in allocations {
            *merged
                .entry((
                    a.warehouse_id.as_str(),
                    a.store_id.as_str(),
                    a.sku_id.as_str(),
                    a.iteration_tag.as_str(),
                ))
                .or_insert(0) += a.quantity;
        }
        merged
            .into_iter()
            .filter(|(_, qty)| *qty > 0)
            .map(|((w, s, k, t), quantity)| AllocationRecord {
                warehouse_id: w.to_string(),
                store_id: s.to_string(),
                sku_id: k.to_string(),
                quantity,
                iteration_tag: t.to_string(),
            })
            .collect()
    }

    /// 门店×款式 诊断 (按 rank 顺序)
    pub fn diagnostics(&self, ctx: &RunContext) -> Vec<StoreStyleDiagnostic> {
        let catalog = ctx.catalog();
        ctx.store_styles()
            .iter()
            .map(|ss| {
                let mut suggested_qty = 0u32;
                let mut allocated_qty = 0u32;
                let mut store_transfer_in = 0u32;
                let mut store_transfer_out = 0u32;
                for idx in &ss.skus {
                    let sku = ctx.store_sku(*idx);
                    suggested_qty += sku.suggested_qty;
                    allocated_qty += sku.warehouse_allocated;
                    store_transfer_in += sku.store_transfer_in;
                    store_transfer_out += sku.store_transfer_out;
                }
                StoreStyleDiagnostic {
                    store_id: catalog.store(ss.store).store.store_id.clone(),
                    style_id: catalog.style(ss.style).style_id.clone(),
                    segment: ss.segment,
                    rank: ss.rank,
                    psa: ss.psa,
                    resolved_iterations: ctx.style_state(ss.id).resolved_in.clone(),
                    suggested_qty,
                    allocated_qty,
                    store_transfer_in,
                    store_transfer_out,
                }
            })
            .collect()
    }
}

impl Default for OutputConsolidator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alloc(w: &str, s: &str, sku: &str, qty: u32, tag: &str) -> AllocationRecord {
        AllocationRecord {
            warehouse_id: w.to_string(),
            store_id: s.to_string(),
            sku_id: sku.to_string(),
            quantity: qty,
            iteration_tag: tag.to_string(),
        }
    }

    #[test]
    fn test_consolidate_nets_all_sources() {
        let consolidator = OutputConsolidator::new();
        let allocations = vec![alloc("W1", "S1", "A-M", 5, "R"), alloc("W1", "S1", "A-M", 3, "F")];
        let wh = vec![WarehouseTransfer {
            source_warehouse_id: "W2".to_string(),
            destination_warehouse_id: "W1".to_string(),
            sku_id: "A-M".to_string(),
            quantity: 4,
            step_tag: "WT".to_string(),
        }];
        let st = vec![StoreTransfer {
            source_store_id: "S2".to_string(),
            destination_store_id: "S1".to_string(),
            sku_id: "A-M".to_string(),
            quantity: 2,
        }];

        let rows = consolidator.consolidate(&allocations, &wh, &st);
        let w1 = rows
            .iter()
            .find(|r| r.node_kind == NodeKind::Warehouse && r.node_id == "W1")
            .unwrap();
        assert_eq!(w1.allocated_out, 8);
        assert_eq!(w1.warehouse_transfer_in, 4);
        assert_eq!(w1.net_change(), -4);

        let s1 = rows
            .iter()
            .find(|r| r.node_kind == NodeKind::Store && r.node_id == "S1")
            .unwrap();
        assert_eq!(s1.net_change(), 10);

        let total: i64 = rows.iter().map(|r| r.net_change()).sum();
        assert_eq!(total, 0);
    }

    #[test]
    fn test_consolidate_is_idempotent() {
        let consolidator = OutputConsolidator::new();
        let allocations = vec![alloc("W1", "S2", "B-L", 1, "R"), alloc("W1", "S1", "A-M", 2, "R")];
        let first = consolidator.consolidate(&allocations, &[], &[]);
        let second = consolidator.consolidate(&allocations, &[], &[]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_merge_allocations_by_tag() {
        let consolidator = OutputConsolidator::new();
        let merged = consolidator.merge_allocations(&[
            alloc("W1", "S1", "A-M", 2, "R"),
            alloc("W1", "S1", "A-M", 3, "R"),
            alloc("W1", "S1", "A-M", 1, "F"),
        ]);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged.iter().find(|a| a.iteration_tag == "R").unwrap().quantity, 5);
    }
}
