// ==========================================
// 零售商品铺货分配引擎 - 库存快照
// ==========================================
// 职责: 单次运行的只读库存快照 (仓库 + 门店)
// 红线: 外部预占必须在快照中扣减,不得在运行中并发修改
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 节点 × SKU 库存头寸
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockPosition {
    pub node_id: String,
    pub sku_id: String,
    #[serde(default)]
    pub on_hand: u32,
    #[serde(default)]
    pub in_transit: u32,
    #[serde(default)]
    pub open_order: u32,
    /// 外部预占 (仅对仓库有意义)
    #[serde(default)]
    pub reserved: u32,
}

impl StockPosition {
    /// 仓库可分配量 = 在库 - 预占
    pub fn allocatable(&self) -> u32 {
        self.on_hand.saturating_sub(self.reserved)
    }

    /// 门店头寸 = 在库 + 在途 + 未结订单
    pub fn pipeline_position(&self) -> u32 {
        self.on_hand
            .saturating_add(self.in_transit)
            .saturating_add(self.open_order)
    }
}

/// 库存快照
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventorySnapshot {
    pub snapshot_date: NaiveDate,
    #[serde(default)]
    pub warehouses: Vec<StockPosition>,
    #[serde(default)]
    pub stores: Vec<StockPosition>,
}

impl InventorySnapshot {
    pub fn new(snapshot_date: NaiveDate) -> Self {
        Self {
            snapshot_date,
            warehouses: Vec::new(),
            stores: Vec::new(),
        }
    }
}
