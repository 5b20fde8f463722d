// ==========================================
// 零售商品铺货分配引擎 - 商品主数据
// ==========================================
// Style = 可售款式; Sku = 款式 × 尺码
// 外部拥有,运行期间不可变
// ==========================================

use crate::domain::types::SizeTag;
use serde::{Deserialize, Serialize};

/// 款式
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub style_id: String,
    pub category: String,
    /// 陈列属性 (可选,用于属性级陈列目标)
    #[serde(default)]
    pub attribute: Option<String>,
    /// 单价 (仅用于店间调拨的价值门槛)
    #[serde(default)]
    pub unit_price: f64,
}

/// SKU (款式 × 尺码)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sku {
    pub sku_id: String,
    pub style_id: String,
    pub size: String,
    pub size_tag: SizeTag,
}

impl Sku {
    /// 是否为可分配尺码 (已打标)
    pub fn is_tagged(&self) -> bool {
        self.size_tag != SizeTag::Untagged
    }
}
