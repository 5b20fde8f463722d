// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use chrono::NaiveDate;
use merch_allocation::domain::{
    AllocationInput, DemandSignal, InventorySnapshot, PlanogramKey, PlanogramTarget, Segment, Sku,
    StockPosition, Store, StoreSkuDemand, StoreStyleDemand, StoreStyleSales, Style, SizeTag,
    Warehouse,
};

/// 运行输入构建器
pub struct InputBuilder {
    input: AllocationInput,
}

impl InputBuilder {
    /// 创建空输入 (快照日期 2026-03-01)
    pub fn new() -> Self {
        Self {
            input: AllocationInput {
                warehouses: Vec::new(),
                stores: Vec::new(),
                styles: Vec::new(),
                skus: Vec::new(),
                snapshot: InventorySnapshot::new(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()),
                demand: DemandSignal::default(),
                planogram: Vec::new(),
            },
        }
    }

    pub fn warehouse(mut self, warehouse_id: &str) -> Self {
        self.input.warehouses.push(Warehouse {
            warehouse_id: warehouse_id.to_string(),
            region: None,
        });
        self
    }

    /// 门店 (渠道 RETAIL,无区域)
    pub fn store(self, store_id: &str, warehouse_id: &str) -> Self {
        self.store_in(store_id, warehouse_id, "RETAIL", None)
    }

    pub fn store_in(
        mut self,
        store_id: &str,
        warehouse_id: &str,
        channel: &str,
        region: Option<&str>,
    ) -> Self {
        self.input.stores.push(Store {
            store_id: store_id.to_string(),
            warehouse_id: Some(warehouse_id.to_string()),
            channel: channel.to_string(),
            region: region.map(|r| r.to_string()),
        });
        self
    }

    /// 未映射仓库的门店
    pub fn unmapped_store(mut self, store_id: &str) -> Self {
        self.input.stores.push(Store {
            store_id: store_id.to_string(),
            warehouse_id: None,
            channel: "RETAIL".to_string(),
            region: None,
        });
        self
    }

    pub fn style(self, style_id: &str, category: &str) -> Self {
        self.style_priced(style_id, category, 10.0)
    }

    pub fn style_priced(mut self, style_id: &str, category: &str, unit_price: f64) -> Self {
        self.input.styles.push(Style {
            style_id: style_id.to_string(),
            category: category.to_string(),
            attribute: None,
            unit_price,
        });
        self
    }

    pub fn sku(mut self, sku_id: &str, style_id: &str, size_tag: SizeTag) -> Self {
        self.input.skus.push(Sku {
            sku_id: sku_id.to_string(),
            style_id: style_id.to_string(),
            size: sku_id.rsplit('-').next().unwrap_or(sku_id).to_string(),
            size_tag,
        });
        self
    }

    pub fn warehouse_stock(mut self, warehouse_id: &str, sku_id: &str, on_hand: u32) -> Self {
        self.input.snapshot.warehouses.push(position(warehouse_id, sku_id, on_hand));
        self
    }

    pub fn store_stock(mut self, store_id: &str, sku_id: &str, on_hand: u32) -> Self {
        self.input.snapshot.stores.push(position(store_id, sku_id, on_hand));
        self
    }

    /// 款式目标 (分层由引擎判定)
    pub fn target(mut self, store_id: &str, style_id: &str, target_stock: u32) -> Self {
        self.input.demand.style_demand.push(StoreStyleDemand {
            store_id: store_id.to_string(),
            style_id: style_id.to_string(),
            target_stock,
            classification: None,
        });
        self
    }

    /// 款式目标 (上游给定分层)
    pub fn classified(
        mut self,
        store_id: &str,
        style_id: &str,
        target_stock: u32,
        segment: Segment,
    ) -> Self {
        self.input.demand.style_demand.push(StoreStyleDemand {
            store_id: store_id.to_string(),
            style_id: style_id.to_string(),
            target_stock,
            classification: Some(segment),
        });
        self
    }

    /// 尺码需求 (贡献占比 1.0)
    pub fn sku_demand(self, store_id: &str, sku_id: &str, rate_of_sale: f64) -> Self {
        self.sku_demand_full(store_id, sku_id, 1.0, rate_of_sale, 0)
    }

    pub fn sku_demand_full(
        mut self,
        store_id: &str,
        sku_id: &str,
        size_contribution: f64,
        rate_of_sale: f64,
        min_qty: u32,
    ) -> Self {
        self.input.demand.sku_demand.push(StoreSkuDemand {
            store_id: store_id.to_string(),
            sku_id: sku_id.to_string(),
            size_contribution,
            rate_of_sale,
            min_qty,
            max_qty: None,
        });
        self
    }

    pub fn sales(
        mut self,
        store_id: &str,
        style_id: &str,
        revenue: f64,
        units_sold: u32,
        live_days: u32,
    ) -> Self {
        self.input.demand.sales.push(StoreStyleSales {
            store_id: store_id.to_string(),
            style_id: style_id.to_string(),
            revenue,
            units_sold,
            live_days: Some(live_days),
            first_live_date: None,
            avg_discount_pct: 0.0,
        });
        self
    }

    /// 品类级陈列目标
    pub fn planogram(
        mut self,
        store_id: &str,
        category: &str,
        target_options: u32,
        target_stock: u32,
    ) -> Self {
        self.input.planogram.push(PlanogramTarget {
            key: PlanogramKey::new(store_id, category, None),
            target_options,
            target_stock,
            min_display_options: 0,
        });
        self
    }

    pub fn build(self) -> AllocationInput {
        self.input
    }
}

impl Default for InputBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn position(node_id: &str, sku_id: &str, on_hand: u32) -> StockPosition {
    StockPosition {
        node_id: node_id.to_string(),
        sku_id: sku_id.to_string(),
        on_hand,
        in_transit: 0,
        open_order: 0,
        reserved: 0,
    }
}
