// ==========================================
// 零售商品铺货分配引擎 - 分配结果
// ==========================================
// 职责: 已提交的分配/调拨决策与诊断记录 (输出给下游)
// ==========================================

use crate::domain::types::{IterationPurpose, NodeKind, Segment};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 仓→店分配
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationRecord {
    pub warehouse_id: String,
    pub store_id: String,
    pub sku_id: String,
    pub quantity: u32,
    pub iteration_tag: String,
}

/// 仓间调拨 (IWHT)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarehouseTransfer {
    pub source_warehouse_id: String,
    pub destination_warehouse_id: String,
    pub sku_id: String,
    pub quantity: u32,
    pub step_tag: String,
}

/// 店间调拨 (IST)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreTransfer {
    pub source_store_id: String,
    pub destination_store_id: String,
    pub sku_id: String,
    pub quantity: u32,
}

/// 节点 × SKU 汇总行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsolidatedRecord {
    pub node_kind: NodeKind,
    pub node_id: String,
    pub sku_id: String,
    /// 门店收到的仓库分配
    pub allocated_in: u32,
    /// 仓库发出的分配
    pub allocated_out: u32,
    pub warehouse_transfer_in: u32,
    pub warehouse_transfer_out: u32,
    pub store_transfer_in: u32,
    pub store_transfer_out: u32,
}

impl ConsolidatedRecord {
    /// 节点净变化量
    pub fn net_change(&self) -> i64 {
        let inbound = self.allocated_in as i64
            + self.warehouse_transfer_in as i64
            + self.store_transfer_in as i64;
        let outbound = self.allocated_out as i64
            + self.warehouse_transfer_out as i64
            + self.store_transfer_out as i64;
        inbound - outbound
    }
}

/// 门店 × 款式 诊断
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreStyleDiagnostic {
    pub store_id: String,
    pub style_id: String,
    pub segment: Segment,
    pub rank: u32,
    pub psa: Option<f64>,
    pub resolved_iterations: Vec<String>,
    pub suggested_qty: u32,
    pub allocated_qty: u32,
    pub store_transfer_in: u32,
    pub store_transfer_out: u32,
}

impl StoreStyleDiagnostic {
    /// 未满足量 (建议 - 实际)
    pub fn shortfall(&self) -> u32 {
        self.suggested_qty
            .saturating_sub(self.allocated_qty.saturating_add(self.store_transfer_in))
    }
}

/// 单轮迭代汇总
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IterationSummary {
    pub tag: String,
    pub purpose: IterationPurpose,
    pub evaluated: usize,
    pub admitted: usize,
    pub resolved_styles: usize,
    pub allocated_units: u64,
    /// 跳过原因 → 次数
    pub skipped: BTreeMap<String, usize>,
}

/// 仓库 × SKU 台账行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarehouseStockRow {
    pub warehouse_id: String,
    pub sku_id: String,
    pub starting: u32,
    pub allocated: u32,
    pub transfer_in: u32,
    pub transfer_out: u32,
    pub remaining: u32,
}

impl WarehouseStockRow {
    /// 守恒校验: 期初 + 调入 = 已分配 + 调出 + 剩余
    pub fn is_balanced(&self) -> bool {
        self.starting as u64 + self.transfer_in as u64
            == self.allocated as u64 + self.transfer_out as u64 + self.remaining as u64
    }
}
