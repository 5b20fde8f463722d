use serde::{Deserialize, Serialize};

/// 迭代定义（配置对象,未校验）
///
/// 存储位置：config_kv（key='iterations'，JSON 数组,按数组顺序执行）
///
/// 分层、健康门槛、覆盖倍数均以名称引用,
/// 由 `engine::run_plan::RunPlan::resolve` 在任何分配提交前统一校验。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IterationDefinition {
    /// 迭代标签（唯一,写入分配记录）
    pub tag: String,

    /// 迭代类型：TOP_SELLER / REPLENISHMENT / PLANOGRAM_FILL / NON_PIVOTAL_SIZE /
    /// MIN_AGE / INCLUSION / WAREHOUSE_TRANSFER
    pub kind: String,

    /// 参与分层（名称,空表示不限）
    #[serde(default)]
    pub segments: Vec<String>,

    #[serde(default)]
    pub enforce_planogram: bool,

    /// 健康门槛名称（引用 psa_benchmarks）
    #[serde(default)]
    pub psa_benchmark: Option<String>,

    /// 覆盖倍数名称（引用 cover_multipliers）
    #[serde(default)]
    pub cover_multiplier: Option<String>,

    /// 补货天数（缺省使用全局 replenishment_days）
    #[serde(default)]
    pub replenishment_days: Option<u32>,

    #[serde(default)]
    pub min_live_days: Option<u32>,

    #[serde(default)]
    pub inclusions: Vec<InclusionEntry>,

    #[serde(default)]
    pub inclusion_min_qty: Option<u32>,

    #[serde(default)]
    pub allow_breach: bool,

    #[serde(default)]
    pub exclude_stores: Vec<String>,

    #[serde(default)]
    pub exclude_styles: Vec<String>,

    #[serde(default)]
    pub exclude_categories: Vec<String>,
}

impl IterationDefinition {
    /// 最小定义（其余字段取默认）
    pub fn new(tag: &str, kind: &str) -> Self {
        Self {
            tag: tag.to_string(),
            kind: kind.to_string(),
            segments: Vec::new(),
            enforce_planogram: false,
            psa_benchmark: None,
            cover_multiplier: None,
            replenishment_days: None,
            min_live_days: None,
            inclusions: Vec::new(),
            inclusion_min_qty: None,
            allow_breach: false,
            exclude_stores: Vec::new(),
            exclude_styles: Vec::new(),
            exclude_categories: Vec::new(),
        }
    }
}

/// 强制纳入名单项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InclusionEntry {
    pub store_id: String,
    pub style_id: String,
}

/// 默认迭代序列
pub fn default_iteration_definitions() -> Vec<IterationDefinition> {
    let mut top = IterationDefinition::new("TOP_SELLER", "TOP_SELLER");
    top.cover_multiplier = Some("top_seller".to_string());
    top.enforce_planogram = true;

    let mut replenishment = IterationDefinition::new("REPLENISHMENT", "REPLENISHMENT");
    replenishment.segments = vec!["TOP_SELLER".to_string(), "NORMAL_SELLER".to_string()];
    replenishment.cover_multiplier = Some("default".to_string());
    replenishment.enforce_planogram = true;

    let iwht = IterationDefinition::new("WAREHOUSE_TRANSFER", "WAREHOUSE_TRANSFER");

    let mut after_transfer =
        IterationDefinition::new("REPLENISHMENT_AFTER_TRANSFER", "REPLENISHMENT");
    after_transfer.segments = vec!["TOP_SELLER".to_string(), "NORMAL_SELLER".to_string()];
    after_transfer.cover_multiplier = Some("default".to_string());
    after_transfer.enforce_planogram = true;

    let mut fill = IterationDefinition::new("PLANOGRAM_FILL", "PLANOGRAM_FILL");
    fill.psa_benchmark = Some("default".to_string());

    let non_pivotal = IterationDefinition::new("NON_PIVOTAL_SIZE", "NON_PIVOTAL_SIZE");

    let mut min_age = IterationDefinition::new("MIN_AGE", "MIN_AGE");
    min_age.min_live_days = Some(60);
    min_age.enforce_planogram = true;

    vec![
        top,
        replenishment,
        iwht,
        after_transfer,
        fill,
        non_pivotal,
        min_age,
    ]
}
