// ==========================================
// 零售商品铺货分配引擎 - 快照索引
// ==========================================
// 职责: 对运行输入建立只读查找表 (分层/排序/上下文构建共用)
// 红线: 缺失的门店/SKU/仓库视为 0 库存、0 需求,不报错
// ==========================================

use crate::domain::demand::{StoreSkuDemand, StoreStyleSales};
use crate::domain::input::AllocationInput;
use crate::domain::inventory::StockPosition;
use crate::domain::network::Store;
use crate::domain::planogram::{PlanogramKey, PlanogramTarget};
use crate::domain::product::{Sku, Style};
use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};
use tracing::warn;

/// 陈列单元当前库存
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellStock {
    pub stock: u32,
    pub options: u32,
}

type PairMap<'a, V> = HashMap<&'a str, HashMap<&'a str, V>>;

fn pair_get<'m, 'a, V>(map: &'m PairMap<'a, V>, a: &str, b: &str) -> Option<&'m V> {
    map.get(a).and_then(|inner| inner.get(b))
}

// ==========================================
// SnapshotIndex - 快照索引
// ==========================================
pub struct SnapshotIndex<'a> {
    input: &'a AllocationInput,
    styles: HashMap<&'a str, &'a Style>,
    skus: HashMap<&'a str, &'a Sku>,
    stores: HashMap<&'a str, &'a Store>,
    style_skus: HashMap<&'a str, Vec<&'a Sku>>,
    store_positions: PairMap<'a, &'a StockPosition>,
    store_style_stock: PairMap<'a, u32>,
    sales: PairMap<'a, &'a StoreStyleSales>,
    sku_demand: PairMap<'a, &'a StoreSkuDemand>,
    planogram: HashMap<PlanogramKey, &'a PlanogramTarget>,
    cell_stock: HashMap<PlanogramKey, CellStock>,
}

impl<'a> SnapshotIndex<'a> {
    /// 构建索引
    pub fn build(input: &'a AllocationInput) -> Self {
        // 重复编号: 保留首行 (与 RunContext 目录一致)
        let mut styles: HashMap<&str, &Style> = HashMap::new();
        for style in &input.styles {
            styles.entry(style.style_id.as_str()).or_insert(style);
        }
        let mut skus: HashMap<&str, &Sku> = HashMap::new();
        for sku in &input.skus {
            skus.entry(sku.sku_id.as_str()).or_insert(sku);
        }
        let mut stores: HashMap<&str, &Store> = HashMap::new();
        for store in &input.stores {
            stores.entry(store.store_id.as_str()).or_insert(store);
        }

        let mut style_skus: HashMap<&str, Vec<&Sku>> = HashMap::new();
        for sku in &input.skus {
            let first = skus
                .get(sku.sku_id.as_str())
                .is_some_and(|kept| std::ptr::eq(*kept, sku));
            if !first {
                warn!(sku_id = %sku.sku_id, "重复的 SKU 行,忽略");
                continue;
            }
            if !styles.contains_key(sku.style_id.as_str()) {
                warn!(sku_id = %sku.sku_id, style_id = %sku.style_id, "SKU 引用的款式不存在,忽略");
                continue;
            }
            style_skus.entry(sku.style_id.as_str()).or_default().push(sku);
        }

        // 门店头寸 + 门店款式库存 (重复的 门店×SKU 行保留首行)
        let mut store_positions: PairMap<&StockPosition> = HashMap::new();
        let mut store_style_stock: PairMap<u32> = HashMap::new();
        for pos in &input.snapshot.stores {
            let Some(sku) = skus.get(pos.sku_id.as_str()) else {
                warn!(store_id = %pos.node_id, sku_id = %pos.sku_id, "门店库存引用未知 SKU,忽略");
                continue;
            };
            let per_store = store_positions.entry(pos.node_id.as_str()).or_default();
            if per_store.contains_key(pos.sku_id.as_str()) {
                warn!(store_id = %pos.node_id, sku_id = %pos.sku_id, "重复的门店库存行,忽略");
                continue;
            }
            per_store.insert(pos.sku_id.as_str(), pos);
            *store_style_stock
                .entry(pos.node_id.as_str())
                .or_default()
                .entry(sku.style_id.as_str())
                .or_insert(0) += pos.pipeline_position();
        }

        let mut sales: PairMap<&StoreStyleSales> = HashMap::new();
        for row in &input.demand.sales {
            sales
                .entry(row.store_id.as_str())
                .or_default()
                .entry(row.style_id.as_str())
                .or_insert(row);
        }

        let mut sku_demand: PairMap<&StoreSkuDemand> = HashMap::new();
        for row in &input.demand.sku_demand {
            sku_demand
                .entry(row.store_id.as_str())
                .or_default()
                .entry(row.sku_id.as_str())
                .or_insert(row);
        }

        let mut planogram: HashMap<PlanogramKey, &PlanogramTarget> = HashMap::new();
        for target in &input.planogram {
            planogram.entry(target.key.clone()).or_insert(target);
        }

        let mut index = Self {
            input,
            styles,
            skus,
            stores,
            style_skus,
            store_positions,
            store_style_stock,
            sales,
            sku_demand,
            planogram,
            cell_stock: HashMap::new(),
        };
        index.cell_stock = index.compute_cell_stock();
        index
    }

    /// 汇总每个陈列单元的当前库存与在陈款数
    fn compute_cell_stock(&self) -> HashMap<PlanogramKey, CellStock> {
        let mut cells: HashMap<PlanogramKey, CellStock> = HashMap::new();
        let mut counted: HashSet<(PlanogramKey, &str)> = HashSet::new();

        for (store_id, per_style) in &self.store_style_stock {
            for (style_id, stock) in per_style {
                let Some(key) = self.planogram_key_for(store_id, style_id) else {
                    continue;
                };
                let cell = cells.entry(key.clone()).or_default();
                cell.stock = cell.stock.saturating_add(*stock);
                if *stock > 0 && counted.insert((key, *style_id)) {
                    cell.options += 1;
                }
            }
        }
        cells
    }

    // ==========================================
    // 查询方法
    // ==========================================

    pub fn input(&self) -> &'a AllocationInput {
        self.input
    }

    pub fn snapshot_date(&self) -> NaiveDate {
        self.input.snapshot.snapshot_date
    }

    pub fn style(&self, style_id: &str) -> Option<&'a Style> {
        self.styles.get(style_id).copied()
    }

    pub fn sku(&self, sku_id: &str) -> Option<&'a Sku> {
        self.skus.get(sku_id).copied()
    }

    pub fn store(&self, store_id: &str) -> Option<&'a Store> {
        self.stores.get(store_id).copied()
    }

    /// 款式下的全部 SKU (输入顺序)
    pub fn style_skus(&self, style_id: &str) -> &[&'a Sku] {
        self.style_skus
            .get(style_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn store_position(&self, store_id: &str, sku_id: &str) -> Option<&'a StockPosition> {
        pair_get(&self.store_positions, store_id, sku_id).copied()
    }

    /// 门店款式当前头寸 (缺失为 0)
    pub fn store_style_stock(&self, store_id: &str, style_id: &str) -> u32 {
        pair_get(&self.store_style_stock, store_id, style_id)
            .copied()
            .unwrap_or(0)
    }

    pub fn sales(&self, store_id: &str, style_id: &str) -> Option<&'a StoreStyleSales> {
        pair_get(&self.sales, store_id, style_id).copied()
    }

    pub fn sales_rows(&self) -> &'a [StoreStyleSales] {
        &self.input.demand.sales
    }

    pub fn sku_demand(&self, store_id: &str, sku_id: &str) -> Option<&'a StoreSkuDemand> {
        pair_get(&self.sku_demand, store_id, sku_id).copied()
    }

    /// 解析门店款式所属陈列单元
    ///
    /// 属性级目标优先,不存在时回落到品类级; 两者均无返回 None
    pub fn planogram_key_for(&self, store_id: &str, style_id: &str) -> Option<PlanogramKey> {
        let style = self.style(style_id)?;
        let key = PlanogramKey::new(store_id, &style.category, style.attribute.as_deref());
        if self.planogram.contains_key(&key) {
            return Some(key);
        }
        let category_key = key.category_level();
        if self.planogram.contains_key(&category_key) {
            return Some(category_key);
        }
        None
    }

    pub fn planogram_target(&self, key: &PlanogramKey) -> Option<&'a PlanogramTarget> {
        self.planogram.get(key).copied()
    }

    pub fn cell_stock(&self, key: &PlanogramKey) -> CellStock {
        self.cell_stock.get(key).copied().unwrap_or_default()
    }

    /// 陈列库存达成率 PSA (%)
    ///
    /// 无陈列目标或目标库存为 0 时返回 None
    pub fn psa(&self, store_id: &str, style_id: &str) -> Option<f64> {
        let key = self.planogram_key_for(store_id, style_id)?;
        let target = self.planogram_target(&key)?;
        if target.target_stock == 0 {
            return None;
        }
        let stock = self.cell_stock(&key).stock;
        Some(stock as f64 * 100.0 / target.target_stock as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::demand::DemandSignal;
    use crate::domain::inventory::InventorySnapshot;
    use crate::domain::types::SizeTag;

    fn position(node: &str, sku: &str, on_hand: u32) -> StockPosition {
        StockPosition {
            node_id: node.to_string(),
            sku_id: sku.to_string(),
            on_hand,
            in_transit: 0,
            open_order: 0,
            reserved: 0,
        }
    }

    fn input() -> AllocationInput {
        let mut snapshot = InventorySnapshot::new(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
        snapshot.stores = vec![
            position("S1", "A-M", 30),
            position("S1", "B-M", 10),
            position("S1", "C-M", 0),
            position("S1", "GHOST", 99),
        ];
        AllocationInput {
            warehouses: vec![],
            stores: vec![],
            styles: vec![
                Style {
                    style_id: "A".to_string(),
                    category: "TOPS".to_string(),
                    attribute: Some("KNIT".to_string()),
                    unit_price: 10.0,
                },
                Style {
                    style_id: "B".to_string(),
                    category: "TOPS".to_string(),
                    attribute: None,
                    unit_price: 10.0,
                },
                Style {
                    style_id: "C".to_string(),
                    category: "TOPS".to_string(),
                    attribute: None,
                    unit_price: 10.0,
                },
            ],
            skus: ["A", "B", "C"]
                .iter()
                .map(|s| Sku {
                    sku_id: format!("{}-M", s),
                    style_id: s.to_string(),
                    size: "M".to_string(),
                    size_tag: SizeTag::Pivotal,
                })
                .collect(),
            snapshot,
            demand: DemandSignal::default(),
            planogram: vec![PlanogramTarget {
                key: PlanogramKey::new("S1", "TOPS", None),
                target_options: 3,
                target_stock: 80,
                min_display_options: 0,
            }],
        }
    }

    #[test]
    fn test_attribute_falls_back_to_category_cell() {
        let input = input();
        let index = SnapshotIndex::build(&input);
        let key = index.planogram_key_for("S1", "A").unwrap();
        assert_eq!(key, PlanogramKey::new("S1", "TOPS", None));
    }

    #[test]
    fn test_cell_stock_and_psa() {
        let input = input();
        let index = SnapshotIndex::build(&input);
        let key = PlanogramKey::new("S1", "TOPS", None);
        let cell = index.cell_stock(&key);
        assert_eq!(cell.stock, 40);
        assert_eq!(cell.options, 2);
        assert_eq!(index.psa("S1", "B"), Some(50.0));
        assert_eq!(index.psa("S2", "B"), None);
    }

    #[test]
    fn test_unknown_sku_position_ignored() {
        let input = input();
        let index = SnapshotIndex::build(&input);
        assert!(index.store_position("S1", "GHOST").is_none());
        assert_eq!(index.store_style_stock("S1", "A"), 30);
        assert_eq!(index.store_style_stock("S9", "A"), 0);
    }

    #[test]
    fn test_duplicate_rows_keep_first() {
        let mut input = input();
        input.snapshot.stores.push(position("S1", "A-M", 5));
        input.styles.push(Style {
            style_id: "A".to_string(),
            category: "BOTTOMS".to_string(),
            attribute: None,
            unit_price: 99.0,
        });
        input.skus.push(Sku {
            sku_id: "A-M".to_string(),
            style_id: "A".to_string(),
            size: "M".to_string(),
            size_tag: SizeTag::Pivotal,
        });
        input.planogram.push(PlanogramTarget {
            key: PlanogramKey::new("S1", "TOPS", None),
            target_options: 9,
            target_stock: 999,
            min_display_options: 0,
        });

        let index = SnapshotIndex::build(&input);
        assert_eq!(index.store_position("S1", "A-M").unwrap().on_hand, 30);
        assert_eq!(index.store_style_stock("S1", "A"), 30);
        assert_eq!(index.style("A").unwrap().category, "TOPS");
        assert_eq!(index.style_skus("A").len(), 1);
        let key = PlanogramKey::new("S1", "TOPS", None);
        assert_eq!(index.planogram_target(&key).unwrap().target_stock, 80);
        assert_eq!(index.cell_stock(&key).stock, 40);
    }
}
