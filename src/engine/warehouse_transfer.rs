// ==========================================
// 零售商品铺货分配引擎 - 仓间调拨引擎 (IWHT)
// ==========================================
// 职责: 在两轮分配之间,把富余仓库的 SKU 调往短缺仓库
// 需求: 仓库需求 = 其供货门店未满足缺口之和
//       (缺口 = max(目标深度, 已出现的最大建议量) - 有效头寸)
// 匹配: 按 SKU 贪心匹配 富余 → 短缺,量大优先,同量按仓库编号
// ==========================================
// 红线: 调拨立即写入台账,后续迭代看到的是调拨后的可用量
// 红线: 调出量不超过调出仓可用量
// ==========================================

use crate::domain::allocation::WarehouseTransfer;
use crate::domain::types::SizeTag;
use crate::engine::context::{Catalog, RunContext, SkuIdx, WarehouseIdx};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info, instrument};

// ==========================================
// WarehouseTransferEngine - 仓间调拨引擎
// ==========================================
pub struct WarehouseTransferEngine {
    // 无状态引擎
}

impl WarehouseTransferEngine {
    pub fn new() -> Self {
        Self {}
    }

    /// 执行一次仓间调拨
    ///
    /// # 参数
    /// - `ctx`: 运行上下文 (仓库台账会被修改)
    /// - `step_tag`: 调拨步骤标签 (写入调拨记录)
    ///
    /// # 返回
    /// 调拨记录 (按 SKU、调拨顺序)
    #[instrument(skip(self, ctx))]
    pub fn rebalance(&self, ctx: &mut RunContext, step_tag: &str) -> Vec<WarehouseTransfer> {
        let (catalog, _, ledger) = ctx.parts_mut();

        // 1. 汇总每个仓库的未满足需求
        let mut need: BTreeMap<SkuIdx, BTreeMap<WarehouseIdx, u64>> = BTreeMap::new();
        for store_sku in &ledger.store_skus {
            if store_sku.size_tag == SizeTag::Untagged {
                continue;
            }
            let Some(warehouse) = catalog.store(store_sku.store).warehouse else {
                continue;
            };
            let target = store_sku.target_depth.max(store_sku.suggested_qty);
            let unmet = target.saturating_sub(store_sku.effective_position());
            if unmet > 0 {
                *need
                    .entry(store_sku.sku)
                    .or_default()
                    .entry(warehouse)
                    .or_insert(0) += unmet as u64;
            }
        }

        // 2. 当前各仓可用量
        let mut holdings: HashMap<SkuIdx, Vec<(WarehouseIdx, u64)>> = HashMap::new();
        for cell in ledger.stock.cells() {
            if cell.available > 0 {
                holdings
                    .entry(cell.sku)
                    .or_default()
                    .push((cell.warehouse, cell.available as u64));
            }
        }

        // 3. 逐 SKU 贪心匹配
        let mut transfers = Vec::new();
        for (sku, per_warehouse) in &need {
            let held = holdings.get(sku).map(|v| v.as_slice()).unwrap_or(&[]);
            let available_at = |w: WarehouseIdx| {
                held.iter()
                    .find(|(h, _)| *h == w)
                    .map(|(_, q)| *q)
                    .unwrap_or(0)
            };

            let mut surplus: Vec<(WarehouseIdx, u64)> = held
                .iter()
                .filter_map(|(w, qty)| {
                    let own_need = per_warehouse.get(w).copied().unwrap_or(0);
                    (*qty > own_need).then(|| (*w, qty - own_need))
                })
                .collect();
            let mut shortfall: Vec<(WarehouseIdx, u64)> = per_warehouse
                .iter()
                .filter_map(|(w, qty)| {
                    let available = available_at(*w);
                    (*qty > available).then(|| (*w, qty - available))
                })
                .collect();
            if surplus.is_empty() || shortfall.is_empty() {
                continue;
            }
            surplus.sort_by(|a, b| by_quantity_then_id(catalog, a, b));
            shortfall.sort_by(|a, b| by_quantity_then_id(catalog, a, b));

            let mut source_iter = surplus.into_iter();
            let mut current = source_iter.next();
            for (destination, mut missing) in shortfall {
                while missing > 0 {
                    let Some((source, remaining)) = current.as_mut() else {
                        break;
                    };
                    let qty = (*remaining).min(missing).min(u32::MAX as u64) as u32;
                    let moved = ledger.stock.transfer(*source, destination, *sku, qty);
                    if moved > 0 {
                        let record = WarehouseTransfer {
                            source_warehouse_id: catalog.warehouse(*source).warehouse_id.clone(),
                            destination_warehouse_id: catalog
                                .warehouse(destination)
                                .warehouse_id
                                .clone(),
                            sku_id: catalog.sku(*sku).sku.sku_id.clone(),
                            quantity: moved,
                            step_tag: step_tag.to_string(),
                        };
                        debug!(
                            from = %record.source_warehouse_id,
                            to = %record.destination_warehouse_id,
                            sku_id = %record.sku_id,
                            quantity = moved,
                            "仓间调拨"
                        );
                        transfers.push(record);
                    }
                    *remaining -= moved as u64;
                    missing -= moved as u64;
                    if *remaining == 0 || moved == 0 {
                        current = source_iter.next();
                    }
                }
            }
        }

        info!(
            transfers = transfers.len(),
            units = transfers.iter().map(|t| t.quantity as u64).sum::<u64>(),
            "仓间调拨完成"
        );
        transfers
    }
}

impl Default for WarehouseTransferEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// 数量降序,同量按仓库编号升序
fn by_quantity_then_id(
    catalog: &Catalog,
    a: &(WarehouseIdx, u64),
    b: &(WarehouseIdx, u64),
) -> Ordering {
    b.1.cmp(&a.1).then_with(|| {
        catalog
            .warehouse(a.0)
            .warehouse_id
            .cmp(&catalog.warehouse(b.0).warehouse_id)
    })
}
