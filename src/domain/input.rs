// ==========================================
// 零售商品铺货分配引擎 - 运行输入
// ==========================================
// 职责: 一次批量运行所需的全部预加载输入
// ==========================================

use crate::domain::demand::DemandSignal;
use crate::domain::inventory::InventorySnapshot;
use crate::domain::network::{Store, Warehouse};
use crate::domain::planogram::PlanogramTarget;
use crate::domain::product::{Sku, Style};
use serde::{Deserialize, Serialize};

/// 分配运行输入 (只读)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationInput {
    pub warehouses: Vec<Warehouse>,
    pub stores: Vec<Store>,
    pub styles: Vec<Style>,
    pub skus: Vec<Sku>,
    pub snapshot: InventorySnapshot,
    #[serde(default)]
    pub demand: DemandSignal,
    #[serde(default)]
    pub planogram: Vec<PlanogramTarget>,
}
