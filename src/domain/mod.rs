// ==========================================
// 零售商品铺货分配引擎 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、输入与输出记录
// 红线: 不含引擎逻辑
// ==========================================

pub mod allocation;
pub mod demand;
pub mod input;
pub mod inventory;
pub mod iteration;
pub mod network;
pub mod planogram;
pub mod product;
pub mod types;

// 重导出核心类型
pub use allocation::{
    AllocationRecord, ConsolidatedRecord, IterationSummary, StoreStyleDiagnostic, StoreTransfer,
    WarehouseStockRow, WarehouseTransfer,
};
pub use demand::{DemandSignal, StoreSkuDemand, StoreStyleDemand, StoreStyleSales};
pub use input::AllocationInput;
pub use inventory::{InventorySnapshot, StockPosition};
pub use iteration::{ExclusionRule, IterationConstraint, IterationKind};
pub use network::{Store, Warehouse};
pub use planogram::{PlanogramKey, PlanogramTarget};
pub use product::{Sku, Style};
pub use types::{IterationPurpose, NodeKind, Segment, SizeTag};
