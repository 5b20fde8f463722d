// ==========================================
// 零售商品铺货分配引擎 - 店间调拨引擎 (IST)
// ==========================================
// 职责: 仓库库存用尽后,把低动销门店的富余库存调往缺货门店
// 调出门店: 日均销量 ≤ 上限,富余 = 可调在库 - 保留量
//           保留量 = max(目标深度, ⌈日均销量 × 覆盖天数⌉)
//           本次获得仓库分配的门店不参与调出
// 调入门店: 日均销量 > 0,缺口 = 目标深度 - 有效头寸,
//           且其供货仓库已无该 SKU 可用量
// 排除: 调用方传入的仍在分配中的 SKU
// 顺序: 调入门店按 rank; 调出门店按富余量降序、门店编号升序
// ==========================================
// 红线: 单笔需同时满足最小件数和最小货值
// 红线: 调出量不超过调出门店的在库量
// ==========================================

use crate::config::StoreTransferThresholds;
use crate::domain::allocation::StoreTransfer;
use crate::domain::types::SizeTag;
use crate::engine::context::{Catalog, RunContext, RunLedger, SkuIdx, StoreSkuIdx};
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::suggestion::cover_quantity;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info, instrument};

// ==========================================
// StoreTransferEngine - 店间调拨引擎
// ==========================================
pub struct StoreTransferEngine {
    // 无状态引擎
}

impl StoreTransferEngine {
    pub fn new() -> Self {
        Self {}
    }

    /// 校验店间调拨门槛
    pub fn validate_thresholds(thresholds: &StoreTransferThresholds) -> EngineResult<()> {
        if !thresholds.min_transfer_value.is_finite() || thresholds.min_transfer_value < 0.0 {
            return Err(EngineError::InvalidThreshold {
                name: "min_transfer_value".to_string(),
                message: "不能为负数".to_string(),
            });
        }
        if !thresholds.max_source_rate_of_sale.is_finite()
            || thresholds.max_source_rate_of_sale < 0.0
        {
            return Err(EngineError::InvalidThreshold {
                name: "max_source_rate_of_sale".to_string(),
                message: "不能为负数".to_string(),
            });
        }
        Ok(())
    }

    /// 生成店间调拨建议 (立即写入台账)
    ///
    /// # 参数
    /// - `ctx`: 运行上下文
    /// - `thresholds`: 调拨门槛
    /// - `active_skus`: 仍在分配中的 SKU 编号 (不参与调拨)
    ///
    /// # 返回
    /// 调拨记录 (按 SKU、调入门店 rank 顺序)
    #[instrument(skip_all, fields(active_skus = active_skus.len()))]
    pub fn recommend(
        &self,
        ctx: &mut RunContext,
        thresholds: &StoreTransferThresholds,
        active_skus: &BTreeSet<String>,
    ) -> Vec<StoreTransfer> {
        let (catalog, _, ledger) = ctx.parts_mut();

        let mut by_sku: BTreeMap<SkuIdx, Vec<StoreSkuIdx>> = BTreeMap::new();
        for (i, store_sku) in ledger.store_skus.iter().enumerate() {
            if store_sku.size_tag == SizeTag::Untagged
                || active_skus.contains(&catalog.sku(store_sku.sku).sku.sku_id)
            {
                continue;
            }
            by_sku.entry(store_sku.sku).or_default().push(StoreSkuIdx(i));
        }

        let mut transfers = Vec::new();
        for (sku, members) in &by_sku {
            self.transfer_sku(catalog, ledger, thresholds, *sku, members, &mut transfers);
        }

        info!(
            transfers = transfers.len(),
            units = transfers.iter().map(|t| t.quantity as u64).sum::<u64>(),
            "店间调拨完成"
        );
        transfers
    }

    fn transfer_sku(
        &self,
        catalog: &Catalog,
        ledger: &mut RunLedger,
        thresholds: &StoreTransferThresholds,
        sku: SkuIdx,
        members: &[StoreSkuIdx],
        transfers: &mut Vec<StoreTransfer>,
    ) {
        let unit_price = catalog.style(catalog.sku(sku).style).unit_price;
        let min_qty = thresholds.min_transfer_qty.max(1);

        // 调出候选: (句柄, 剩余可调量)
        let mut sources: Vec<(StoreSkuIdx, u32)> = members
            .iter()
            .filter_map(|idx| {
                let s = &ledger.store_skus[idx.0];
                // 本次已获仓库补货的门店不再调出
                if s.warehouse_allocated > 0
                    || s.rate_of_sale > thresholds.max_source_rate_of_sale
                {
                    return None;
                }
                let keep = s
                    .target_depth
                    .max(cover_quantity(s.rate_of_sale, thresholds.source_cover_days, 1.0));
                // 富余只按门店实物在库计算,不计本次分配量
                let surplus = s.remaining_on_hand().saturating_sub(keep);
                (surplus > 0).then_some((*idx, surplus))
            })
            .collect();
        if sources.is_empty() {
            return;
        }
        sources.sort_by(|a, b| {
            b.1.cmp(&a.1).then_with(|| {
                let sa = &catalog.store(ledger.store_skus[a.0 .0].store).store.store_id;
                let sb = &catalog.store(ledger.store_skus[b.0 .0].store).store.store_id;
                sa.cmp(sb)
            })
        });

        // 调入候选: 按 rank
        let mut destinations: Vec<StoreSkuIdx> = members
            .iter()
            .copied()
            .filter(|idx| {
                let s = &ledger.store_skus[idx.0];
                if s.rate_of_sale <= 0.0 || s.target_depth <= s.effective_position() {
                    return false;
                }
                // 供货仓库仍有可用量时由仓库分配负责
                match catalog.store(s.store).warehouse {
                    Some(w) => ledger.stock.available(w, sku) == 0,
                    None => true,
                }
            })
            .collect();
        destinations.sort_by_key(|idx| ledger.store_skus[idx.0].store_style);

        for destination in destinations {
            let dest_store = ledger.store_skus[destination.0].store;
            let mut deficit = {
                let d = &ledger.store_skus[destination.0];
                d.target_depth.saturating_sub(d.effective_position())
            };

            for (source, remaining) in sources.iter_mut() {
                if deficit == 0 {
                    break;
                }
                if *remaining == 0 {
                    continue;
                }
                let source_store = ledger.store_skus[source.0].store;
                if source_store == dest_store {
                    continue;
                }
                if thresholds.same_region_only {
                    let a = &catalog.store(source_store).store.region;
                    let b = &catalog.store(dest_store).store.region;
                    if a.is_none() || a != b {
                        continue;
                    }
                }

                let qty = (*remaining).min(deficit);
                if qty < min_qty || (qty as f64) * unit_price < thresholds.min_transfer_value {
                    continue;
                }

                ledger.store_skus[source.0].store_transfer_out += qty;
                ledger.store_skus[destination.0].store_transfer_in += qty;
                *remaining -= qty;
                deficit -= qty;

                let record = StoreTransfer {
                    source_store_id: catalog.store(source_store).store.store_id.clone(),
                    destination_store_id: catalog.store(dest_store).store.store_id.clone(),
                    sku_id: catalog.sku(sku).sku.sku_id.clone(),
                    quantity: qty,
                };
                debug!(
                    from = %record.source_store_id,
                    to = %record.destination_store_id,
                    sku_id = %record.sku_id,
                    quantity = qty,
                    "店间调拨"
                );
                transfers.push(record);
            }
        }
    }
}

impl Default for StoreTransferEngine {
    fn default() -> Self {
        Self::new()
    }
}
