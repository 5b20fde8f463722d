// ==========================================
// 零售商品铺货分配引擎 - 运行上下文
// ==========================================
// 职责: 单次运行的全部状态 (索引化存储)
// 结构:
//   - Catalog: 仓库/门店/款式/SKU 主数据 (构建后只读)
//   - ranked: 已排序的 门店×款式 (构建后只读,下标 = rank - 1)
//   - RunLedger: 仓库库存、陈列容量、SKU 级累计量 (唯一可变部分)
// 红线: 实体之间只通过下标句柄引用,不持有彼此的引用
// 红线: 仓库可用量永不为负; 任何提交都以可用量为上限
// ==========================================

use crate::domain::allocation::WarehouseStockRow;
use crate::domain::network::{Store, Warehouse};
use crate::domain::planogram::{PlanogramKey, PlanogramTarget};
use crate::domain::product::{Sku, Style};
use crate::domain::types::{Segment, SizeTag};
use crate::engine::ranking::RankedStoreStyle;
use crate::engine::snapshot_index::{CellStock, SnapshotIndex};
use crate::engine::suggestion::target_depth;
use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::{debug, warn};

// ==========================================
// 句柄
// ==========================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WarehouseIdx(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StoreIdx(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StyleIdx(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SkuIdx(pub usize);

/// 门店×款式 句柄,数值即排序位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StoreStyleIdx(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StoreSkuIdx(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StockCellIdx(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlanogramIdx(pub usize);

// ==========================================
// Catalog - 主数据
// ==========================================

#[derive(Debug, Clone)]
pub struct StoreNode {
    pub store: Store,
    /// 供货仓库 (未映射或仓库不存在时为 None)
    pub warehouse: Option<WarehouseIdx>,
}

#[derive(Debug, Clone)]
pub struct SkuNode {
    pub sku: Sku,
    pub style: StyleIdx,
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    warehouses: Vec<Warehouse>,
    stores: Vec<StoreNode>,
    styles: Vec<Style>,
    skus: Vec<SkuNode>,
    warehouse_lookup: HashMap<String, WarehouseIdx>,
    store_lookup: HashMap<String, StoreIdx>,
    style_lookup: HashMap<String, StyleIdx>,
    sku_lookup: HashMap<String, SkuIdx>,
}

impl Catalog {
    fn build(index: &SnapshotIndex<'_>) -> Self {
        let input = index.input();
        let mut catalog = Catalog::default();

        for warehouse in &input.warehouses {
            if catalog.warehouse_lookup.contains_key(&warehouse.warehouse_id) {
                continue;
            }
            let idx = WarehouseIdx(catalog.warehouses.len());
            catalog
                .warehouse_lookup
                .insert(warehouse.warehouse_id.clone(), idx);
            catalog.warehouses.push(warehouse.clone());
        }

        for store in &input.stores {
            if catalog.store_lookup.contains_key(&store.store_id) {
                continue;
            }
            let warehouse = match store.warehouse_id.as_deref() {
                Some(id) => {
                    let mapped = catalog.warehouse_lookup.get(id).copied();
                    if mapped.is_none() {
                        warn!(store_id = %store.store_id, warehouse_id = %id, "门店映射的仓库不存在");
                    }
                    mapped
                }
                None => None,
            };
            let idx = StoreIdx(catalog.stores.len());
            catalog.store_lookup.insert(store.store_id.clone(), idx);
            catalog.stores.push(StoreNode {
                store: store.clone(),
                warehouse,
            });
        }

        for style in &input.styles {
            if catalog.style_lookup.contains_key(&style.style_id) {
                continue;
            }
            let idx = StyleIdx(catalog.styles.len());
            catalog.style_lookup.insert(style.style_id.clone(), idx);
            catalog.styles.push(style.clone());
        }

        for sku in &input.skus {
            if catalog.sku_lookup.contains_key(&sku.sku_id) {
                continue;
            }
            let Some(style) = catalog.style_lookup.get(&sku.style_id).copied() else {
                continue;
            };
            let idx = SkuIdx(catalog.skus.len());
            catalog.sku_lookup.insert(sku.sku_id.clone(), idx);
            catalog.skus.push(SkuNode {
                sku: sku.clone(),
                style,
            });
        }

        catalog
    }

    pub fn warehouse_idx(&self, warehouse_id: &str) -> Option<WarehouseIdx> {
        self.warehouse_lookup.get(warehouse_id).copied()
    }

    pub fn store_idx(&self, store_id: &str) -> Option<StoreIdx> {
        self.store_lookup.get(store_id).copied()
    }

    pub fn style_idx(&self, style_id: &str) -> Option<StyleIdx> {
        self.style_lookup.get(style_id).copied()
    }

    pub fn sku_idx(&self, sku_id: &str) -> Option<SkuIdx> {
        self.sku_lookup.get(sku_id).copied()
    }

    pub fn warehouse(&self, idx: WarehouseIdx) -> &Warehouse {
        &self.warehouses[idx.0]
    }

    pub fn store(&self, idx: StoreIdx) -> &StoreNode {
        &self.stores[idx.0]
    }

    pub fn style(&self, idx: StyleIdx) -> &Style {
        &self.styles[idx.0]
    }

    pub fn sku(&self, idx: SkuIdx) -> &SkuNode {
        &self.skus[idx.0]
    }
}

// ==========================================
// StoreStyle - 已排序的 门店×款式 (只读)
// ==========================================
#[derive(Debug, Clone)]
pub struct StoreStyle {
    pub id: StoreStyleIdx,
    pub store: StoreIdx,
    pub style: StyleIdx,
    pub segment: Segment,
    pub rank: u32,
    pub psa: Option<f64>,
    pub live_days: Option<u32>,
    pub target_stock: u32,
    /// 运行开始时的门店款式头寸
    pub current_stock: u32,
    pub planogram: Option<PlanogramIdx>,
    pub skus: Vec<StoreSkuIdx>,
}

// ==========================================
// 可变台账
// ==========================================

/// 门店×款式 运行状态
#[derive(Debug, Clone, Default)]
pub struct StoreStyleState {
    /// 已有分配的迭代标签 (按执行顺序)
    pub resolved_in: Vec<String>,
    /// 本次运行是否首次引入该款 (占用一个陈列款位)
    pub introduced: bool,
}

/// 门店×SKU 运行状态
#[derive(Debug, Clone)]
pub struct StoreSku {
    pub store: StoreIdx,
    pub sku: SkuIdx,
    pub store_style: StoreStyleIdx,
    pub size_tag: SizeTag,
    /// 可调出的在库量 (on_hand - reserved)
    pub on_hand: u32,
    /// 头寸 = 在库 + 在途 + 在订
    pub position: u32,
    pub rate_of_sale: f64,
    pub size_contribution: f64,
    pub min_qty: u32,
    pub max_qty: Option<u32>,
    pub target_depth: u32,
    /// 本次运行各轮中最大的建议量
    pub suggested_qty: u32,
    pub warehouse_allocated: u32,
    pub store_transfer_in: u32,
    pub store_transfer_out: u32,
}

impl StoreSku {
    /// 计入本次运行所有决策后的头寸
    pub fn effective_position(&self) -> u32 {
        (self.position + self.warehouse_allocated + self.store_transfer_in)
            .saturating_sub(self.store_transfer_out)
    }

    /// 调出后剩余的在库量
    pub fn remaining_on_hand(&self) -> u32 {
        self.on_hand.saturating_sub(self.store_transfer_out)
    }
}

/// 仓库×SKU 库存格
#[derive(Debug, Clone)]
pub struct StockCell {
    pub warehouse: WarehouseIdx,
    pub sku: SkuIdx,
    pub starting: u32,
    pub available: u32,
    pub allocated: u32,
    pub transfer_in: u32,
    pub transfer_out: u32,
}

/// 仓库库存台账
#[derive(Debug, Clone, Default)]
pub struct WarehouseLedger {
    cells: Vec<StockCell>,
    lookup: HashMap<(WarehouseIdx, SkuIdx), StockCellIdx>,
}

impl WarehouseLedger {
    fn cell_idx(&mut self, warehouse: WarehouseIdx, sku: SkuIdx) -> StockCellIdx {
        if let Some(idx) = self.lookup.get(&(warehouse, sku)) {
            return *idx;
        }
        let idx = StockCellIdx(self.cells.len());
        self.cells.push(StockCell {
            warehouse,
            sku,
            starting: 0,
            available: 0,
            allocated: 0,
            transfer_in: 0,
            transfer_out: 0,
        });
        self.lookup.insert((warehouse, sku), idx);
        idx
    }

    /// 写入期初库存
    ///
    /// # 返回
    /// false 表示该 仓库×SKU 已有期初行 (重复行保留首行)
    pub fn seed(&mut self, warehouse: WarehouseIdx, sku: SkuIdx, qty: u32) -> bool {
        if self.lookup.contains_key(&(warehouse, sku)) {
            return false;
        }
        let idx = self.cell_idx(warehouse, sku);
        let cell = &mut self.cells[idx.0];
        cell.starting = qty;
        cell.available = qty;
        true
    }

    pub fn available(&self, warehouse: WarehouseIdx, sku: SkuIdx) -> u32 {
        self.lookup
            .get(&(warehouse, sku))
            .map(|idx| self.cells[idx.0].available)
            .unwrap_or(0)
    }

    /// 扣减可用量用于分配
    ///
    /// # 返回
    /// 实际扣减量 (不超过可用量)
    pub fn allocate(&mut self, warehouse: WarehouseIdx, sku: SkuIdx, qty: u32) -> u32 {
        let Some(idx) = self.lookup.get(&(warehouse, sku)).copied() else {
            return 0;
        };
        let cell = &mut self.cells[idx.0];
        let committed = qty.min(cell.available);
        cell.available -= committed;
        cell.allocated += committed;
        committed
    }

    /// 仓间调拨
    ///
    /// # 返回
    /// 实际调拨量 (不超过调出仓可用量)
    pub fn transfer(
        &mut self,
        from: WarehouseIdx,
        to: WarehouseIdx,
        sku: SkuIdx,
        qty: u32,
    ) -> u32 {
        if from == to {
            return 0;
        }
        let moved = qty.min(self.available(from, sku));
        if moved == 0 {
            return 0;
        }
        let source = self.cell_idx(from, sku);
        let destination = self.cell_idx(to, sku);
        self.cells[source.0].available -= moved;
        self.cells[source.0].transfer_out += moved;
        self.cells[destination.0].available += moved;
        self.cells[destination.0].transfer_in += moved;
        moved
    }

    pub fn cells(&self) -> &[StockCell] {
        &self.cells
    }
}

/// 陈列单元运行状态
#[derive(Debug, Clone)]
pub struct PlanogramCell {
    pub key: PlanogramKey,
    pub target_stock: u32,
    pub option_ceiling: u32,
    pub current_stock: u32,
    pub current_options: u32,
    pub allocated_qty: u32,
    pub added_options: u32,
}

impl PlanogramCell {
    fn new(target: &PlanogramTarget, current: CellStock) -> Self {
        Self {
            key: target.key.clone(),
            target_stock: target.target_stock,
            option_ceiling: target.option_ceiling(),
            current_stock: current.stock,
            current_options: current.options,
            allocated_qty: 0,
            added_options: 0,
        }
    }

    /// 剩余库存容量
    pub fn stock_room(&self) -> u32 {
        self.target_stock
            .saturating_sub(self.current_stock.saturating_add(self.allocated_qty))
    }

    /// 剩余款位
    pub fn option_room(&self) -> u32 {
        self.option_ceiling
            .saturating_sub(self.current_options + self.added_options)
    }
}

/// 运行台账 (可变)
#[derive(Debug, Clone, Default)]
pub struct RunLedger {
    pub stock: WarehouseLedger,
    pub planogram: Vec<PlanogramCell>,
    pub store_skus: Vec<StoreSku>,
    pub styles: Vec<StoreStyleState>,
}

// ==========================================
// WarehouseView - 分配时的读写视图
// ==========================================
// 只读主数据 + 可变台账; 迭代规则只能通过该视图提交分配
pub struct WarehouseView<'a> {
    catalog: &'a Catalog,
    ledger: &'a mut RunLedger,
}

impl<'a> WarehouseView<'a> {
    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    pub fn ledger(&self) -> &RunLedger {
        self.ledger
    }

    pub fn store_sku(&self, idx: StoreSkuIdx) -> &StoreSku {
        &self.ledger.store_skus[idx.0]
    }

    pub fn style_state(&self, idx: StoreStyleIdx) -> &StoreStyleState {
        &self.ledger.styles[idx.0]
    }

    pub fn warehouse_of(&self, store: StoreIdx) -> Option<WarehouseIdx> {
        self.catalog.store(store).warehouse
    }

    pub fn available(&self, warehouse: WarehouseIdx, sku: SkuIdx) -> u32 {
        self.ledger.stock.available(warehouse, sku)
    }

    /// 陈列剩余容量; 无陈列目标时为 0
    pub fn planogram_room(&self, cell: Option<PlanogramIdx>) -> u32 {
        cell.map(|idx| self.ledger.planogram[idx.0].stock_room())
            .unwrap_or(0)
    }

    pub fn planogram_cell(&self, cell: PlanogramIdx) -> &PlanogramCell {
        &self.ledger.planogram[cell.0]
    }

    /// 记录建议量 (保留各轮最大值)
    pub fn note_suggestion(&mut self, idx: StoreSkuIdx, qty: u32) {
        let sku = &mut self.ledger.store_skus[idx.0];
        sku.suggested_qty = sku.suggested_qty.max(qty);
    }

    /// 提交一笔仓→店分配
    ///
    /// # 返回
    /// 实际提交量 (受仓库可用量约束)
    pub fn commit(
        &mut self,
        store_style: &StoreStyle,
        idx: StoreSkuIdx,
        warehouse: WarehouseIdx,
        qty: u32,
    ) -> u32 {
        let sku = self.ledger.store_skus[idx.0].sku;
        let committed = self.ledger.stock.allocate(warehouse, sku, qty);
        if committed == 0 {
            return 0;
        }
        self.ledger.store_skus[idx.0].warehouse_allocated += committed;

        let state = &mut self.ledger.styles[store_style.id.0];
        let newly_introduced = store_style.current_stock == 0 && !state.introduced;
        if newly_introduced {
            state.introduced = true;
        }
        if let Some(cell) = store_style.planogram {
            let cell = &mut self.ledger.planogram[cell.0];
            cell.allocated_qty += committed;
            if newly_introduced {
                cell.added_options += 1;
            }
        }
        committed
    }

    pub fn mark_resolved(&mut self, idx: StoreStyleIdx, tag: &str) {
        self.ledger.styles[idx.0].resolved_in.push(tag.to_string());
    }
}

// ==========================================
// RunContext - 运行上下文
// ==========================================
#[derive(Debug, Clone)]
pub struct RunContext {
    run_id: String,
    snapshot_date: NaiveDate,
    catalog: Catalog,
    ranked: Vec<StoreStyle>,
    ledger: RunLedger,
    store_sku_lookup: HashMap<(StoreIdx, SkuIdx), StoreSkuIdx>,
}

impl RunContext {
    /// 构建运行上下文
    ///
    /// # 参数
    /// - `run_id`: 运行编号
    /// - `index`: 快照索引
    /// - `ranking`: 已排序的 门店×款式
    pub fn build(run_id: &str, index: &SnapshotIndex<'_>, ranking: &[RankedStoreStyle]) -> Self {
        let catalog = Catalog::build(index);
        let mut ledger = RunLedger::default();
        let mut ranked = Vec::with_capacity(ranking.len());
        let mut planogram_lookup: HashMap<PlanogramKey, PlanogramIdx> = HashMap::new();
        let mut store_sku_lookup = HashMap::new();

        for item in ranking {
            let (Some(store), Some(style)) = (
                catalog.store_idx(&item.store_id),
                catalog.style_idx(&item.style_id),
            ) else {
                continue;
            };
            let id = StoreStyleIdx(ranked.len());

            let planogram = index
                .planogram_key_for(&item.store_id, &item.style_id)
                .and_then(|key| {
                    if let Some(idx) = planogram_lookup.get(&key) {
                        return Some(*idx);
                    }
                    let target = index.planogram_target(&key)?;
                    let idx = PlanogramIdx(ledger.planogram.len());
                    ledger
                        .planogram
                        .push(PlanogramCell::new(target, index.cell_stock(&key)));
                    planogram_lookup.insert(key, idx);
                    Some(idx)
                });

            let mut skus = Vec::new();
            for sku in index.style_skus(&item.style_id) {
                let Some(sku_idx) = catalog.sku_idx(&sku.sku_id) else {
                    continue;
                };
                let position = index.store_position(&item.store_id, &sku.sku_id);
                let demand = index.sku_demand(&item.store_id, &sku.sku_id);
                let contribution = demand.map(|d| d.size_contribution).unwrap_or(0.0);
                let min_qty = demand.map(|d| d.min_qty).unwrap_or(0);
                let max_qty = demand.and_then(|d| d.max_qty);

                let idx = StoreSkuIdx(ledger.store_skus.len());
                ledger.store_skus.push(StoreSku {
                    store,
                    sku: sku_idx,
                    store_style: id,
                    size_tag: sku.size_tag,
                    on_hand: position.map(|p| p.allocatable()).unwrap_or(0),
                    position: position.map(|p| p.pipeline_position()).unwrap_or(0),
                    rate_of_sale: demand.map(|d| d.rate_of_sale).unwrap_or(0.0),
                    size_contribution: contribution,
                    min_qty,
                    max_qty,
                    target_depth: target_depth(item.target_stock, contribution, min_qty, max_qty),
                    suggested_qty: 0,
                    warehouse_allocated: 0,
                    store_transfer_in: 0,
                    store_transfer_out: 0,
                });
                store_sku_lookup.insert((store, sku_idx), idx);
                skus.push(idx);
            }

            ledger.styles.push(StoreStyleState::default());
            ranked.push(StoreStyle {
                id,
                store,
                style,
                segment: item.segment,
                rank: item.rank,
                psa: item.psa,
                live_days: item.live_days,
                target_stock: item.target_stock,
                current_stock: item.current_stock,
                planogram,
                skus,
            });
        }

        for pos in &index.input().snapshot.warehouses {
            match (catalog.warehouse_idx(&pos.node_id), catalog.sku_idx(&pos.sku_id)) {
                (Some(warehouse), Some(sku)) => {
                    if !ledger.stock.seed(warehouse, sku, pos.allocatable()) {
                        warn!(warehouse_id = %pos.node_id, sku_id = %pos.sku_id, "重复的仓库库存行,忽略");
                    }
                }
                _ => {
                    warn!(warehouse_id = %pos.node_id, sku_id = %pos.sku_id, "仓库库存引用未知仓库或 SKU,忽略");
                }
            }
        }

        debug!(
            store_styles = ranked.len(),
            store_skus = ledger.store_skus.len(),
            stock_cells = ledger.stock.cells().len(),
            planogram_cells = ledger.planogram.len(),
            "运行上下文已构建"
        );

        Self {
            run_id: run_id.to_string(),
            snapshot_date: index.snapshot_date(),
            catalog,
            ranked,
            ledger,
            store_sku_lookup,
        }
    }

    // ==========================================
    // 只读访问
    // ==========================================

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    pub fn snapshot_date(&self) -> NaiveDate {
        self.snapshot_date
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// 按优先级排列的 门店×款式
    pub fn store_styles(&self) -> &[StoreStyle] {
        &self.ranked
    }

    pub fn ledger(&self) -> &RunLedger {
        &self.ledger
    }

    pub fn store_sku(&self, idx: StoreSkuIdx) -> &StoreSku {
        &self.ledger.store_skus[idx.0]
    }

    pub fn style_state(&self, idx: StoreStyleIdx) -> &StoreStyleState {
        &self.ledger.styles[idx.0]
    }

    /// 按编号查找 门店×SKU
    pub fn find_store_sku(&self, store_id: &str, sku_id: &str) -> Option<&StoreSku> {
        let store = self.catalog.store_idx(store_id)?;
        let sku = self.catalog.sku_idx(sku_id)?;
        self.store_sku_lookup
            .get(&(store, sku))
            .map(|idx| &self.ledger.store_skus[idx.0])
    }

    /// 按编号查询仓库可用量
    pub fn warehouse_available(&self, warehouse_id: &str, sku_id: &str) -> u32 {
        match (
            self.catalog.warehouse_idx(warehouse_id),
            self.catalog.sku_idx(sku_id),
        ) {
            (Some(w), Some(s)) => self.ledger.stock.available(w, s),
            _ => 0,
        }
    }

    /// 仓库×SKU 台账行 (按仓库、SKU 编号排序)
    pub fn stock_rows(&self) -> Vec<WarehouseStockRow> {
        let mut rows: Vec<WarehouseStockRow> = self
            .ledger
            .stock
            .cells()
            .iter()
            .map(|cell| WarehouseStockRow {
                warehouse_id: self.catalog.warehouse(cell.warehouse).warehouse_id.clone(),
                sku_id: self.catalog.sku(cell.sku).sku.sku_id.clone(),
                starting: cell.starting,
                allocated: cell.allocated,
                transfer_in: cell.transfer_in,
                transfer_out: cell.transfer_out,
                remaining: cell.available,
            })
            .collect();
        rows.sort_by(|a, b| {
            a.warehouse_id
                .cmp(&b.warehouse_id)
                .then_with(|| a.sku_id.cmp(&b.sku_id))
        });
        rows
    }

    // ==========================================
    // 可变访问
    // ==========================================

    /// 分配视图: 只读排序列表 + 可写台账
    pub fn allocation_view(&mut self) -> (&[StoreStyle], WarehouseView<'_>) {
        (
            &self.ranked,
            WarehouseView {
                catalog: &self.catalog,
                ledger: &mut self.ledger,
            },
        )
    }

    /// 调拨引擎使用的拆分借用
    pub(crate) fn parts_mut(&mut self) -> (&Catalog, &[StoreStyle], &mut RunLedger) {
        (&self.catalog, &self.ranked, &mut self.ledger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger_with(qty: u32) -> WarehouseLedger {
        let mut ledger = WarehouseLedger::default();
        ledger.seed(WarehouseIdx(0), SkuIdx(0), qty);
        ledger
    }

    #[test]
    fn test_allocate_never_exceeds_available() {
        let mut ledger = ledger_with(5);
        assert_eq!(ledger.allocate(WarehouseIdx(0), SkuIdx(0), 3), 3);
        assert_eq!(ledger.allocate(WarehouseIdx(0), SkuIdx(0), 3), 2);
        assert_eq!(ledger.allocate(WarehouseIdx(0), SkuIdx(0), 3), 0);
        assert_eq!(ledger.available(WarehouseIdx(0), SkuIdx(0)), 0);
        assert_eq!(ledger.allocate(WarehouseIdx(1), SkuIdx(0), 3), 0);
    }

    #[test]
    fn test_duplicate_seed_keeps_first() {
        let mut ledger = ledger_with(5);
        assert!(!ledger.seed(WarehouseIdx(0), SkuIdx(0), 7));
        assert_eq!(ledger.available(WarehouseIdx(0), SkuIdx(0)), 5);
        assert_eq!(ledger.cells().len(), 1);
        assert_eq!(ledger.cells()[0].starting, 5);
    }

    #[test]
    fn test_transfer_creates_destination_cell() {
        let mut ledger = ledger_with(10);
        let moved = ledger.transfer(WarehouseIdx(0), WarehouseIdx(1), SkuIdx(0), 4);
        assert_eq!(moved, 4);
        assert_eq!(ledger.available(WarehouseIdx(0), SkuIdx(0)), 6);
        assert_eq!(ledger.available(WarehouseIdx(1), SkuIdx(0)), 4);
        assert_eq!(ledger.cells()[1].transfer_in, 4);

        assert_eq!(ledger.transfer(WarehouseIdx(0), WarehouseIdx(1), SkuIdx(0), 50), 6);
        assert_eq!(ledger.transfer(WarehouseIdx(0), WarehouseIdx(0), SkuIdx(0), 1), 0);
    }

    #[test]
    fn test_planogram_cell_room() {
        let target = PlanogramTarget {
            key: PlanogramKey::new("S1", "TOPS", None),
            target_options: 2,
            target_stock: 50,
            min_display_options: 3,
        };
        let mut cell = PlanogramCell::new(&target, CellStock { stock: 40, options: 1 });
        assert_eq!(cell.stock_room(), 10);
        assert_eq!(cell.option_room(), 2);
        cell.allocated_qty = 15;
        assert_eq!(cell.stock_room(), 0);
    }
}
