// ==========================================
// 零售商品铺货分配引擎 - 陈列目标
// ==========================================
// 职责: (门店, 品类[, 属性]) → 目标款数 / 目标库存 / 最少陈列款数
// 红线: 只读; 运行期的填充计数在 RunContext 的陈列台账中维护
// ==========================================

use serde::{Deserialize, Serialize};

/// 陈列目标键
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlanogramKey {
    pub store_id: String,
    pub category: String,
    #[serde(default)]
    pub attribute: Option<String>,
}

impl PlanogramKey {
    pub fn new(store_id: &str, category: &str, attribute: Option<&str>) -> Self {
        Self {
            store_id: store_id.to_string(),
            category: category.to_string(),
            attribute: attribute.map(|a| a.to_string()),
        }
    }

    /// 品类级键 (去掉属性)
    pub fn category_level(&self) -> Self {
        Self {
            store_id: self.store_id.clone(),
            category: self.category.clone(),
            attribute: None,
        }
    }
}

/// 陈列目标
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanogramTarget {
    pub key: PlanogramKey,
    pub target_options: u32,
    pub target_stock: u32,
    #[serde(default)]
    pub min_display_options: u32,
}

impl PlanogramTarget {
    /// 款数上限: max(目标款数, 最少陈列款数)
    pub fn option_ceiling(&self) -> u32 {
        self.target_options.max(self.min_display_options)
    }
}
