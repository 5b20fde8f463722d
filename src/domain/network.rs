// ==========================================
// 零售商品铺货分配引擎 - 仓店网络
// ==========================================
// 职责: 仓库与门店的参考数据 (只读,由上游提供)
// ==========================================

use serde::{Deserialize, Serialize};

/// 仓库
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warehouse {
    pub warehouse_id: String,
    #[serde(default)]
    pub region: Option<String>,
}

/// 门店
///
/// `warehouse_id` 为门店的映射仓库,是该门店唯一的仓→店分配来源;
/// 缺失时视为数据缺口 (可用库存为 0)。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    pub store_id: String,
    #[serde(default)]
    pub warehouse_id: Option<String>,
    pub channel: String,
    #[serde(default)]
    pub region: Option<String>,
}
