// ==========================================
// 零售商品铺货分配引擎 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写、快照
// 存储: 内存 key-value（值为 JSON 文本）,可由 JSON 文件/字符串加载
// ==========================================

use crate::config::allocation_config_trait::AllocationConfigReader;
use crate::config::error::{ConfigError, ConfigResult};
use crate::config::iteration_profile::{default_iteration_definitions, IterationDefinition};
use crate::config::thresholds::{
    RevenueBlendConfig, SegmentationThresholds, StoreTransferThresholds,
};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::debug;

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ConfigManager {
    values: BTreeMap<String, String>,
}

impl ConfigManager {
    /// 创建空配置（全部使用默认值）
    pub fn new() -> Self {
        Self::default()
    }

    /// 从 JSON 对象字符串加载
    ///
    /// 对象的每个顶层字段是一个配置键; 值以 JSON 文本形式保存
    pub fn from_json_str(raw: &str) -> ConfigResult<Self> {
        let parsed: JsonValue = serde_json::from_str(raw)?;
        let object = parsed.as_object().ok_or_else(|| ConfigError::ConfigValueError {
            key: "<root>".to_string(),
            value: raw.chars().take(64).collect(),
            message: "配置根节点必须是 JSON 对象".to_string(),
        })?;

        let mut values = BTreeMap::new();
        for (key, value) in object {
            values.insert(key.clone(), value.to_string());
        }
        debug!(keys = values.len(), "配置已加载");
        Ok(Self { values })
    }

    /// 从 JSON 文件加载
    pub async fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let raw = tokio::fs::read_to_string(path.as_ref()).await?;
        Self::from_json_str(&raw)
    }

    /// 覆写单个配置值（值为 JSON 文本）
    pub fn set_config_value(&mut self, key: &str, json_value: &str) -> ConfigResult<()> {
        serde_json::from_str::<JsonValue>(json_value).map_err(|e| ConfigError::ConfigValueError {
            key: key.to_string(),
            value: json_value.to_string(),
            message: e.to_string(),
        })?;
        self.values.insert(key.to_string(), json_value.to_string());
        Ok(())
    }

    /// 读取原始配置值
    pub fn get_config_value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|s| s.as_str())
    }

    /// 获取所有配置的快照（JSON格式,键有序）
    ///
    /// # 用途
    /// - 随运行结果记录,保证可复现
    pub fn get_config_snapshot(&self) -> ConfigResult<String> {
        let mut object = serde_json::Map::new();
        for (key, raw) in &self.values {
            let value: JsonValue = serde_json::from_str(raw)?;
            object.insert(key.clone(), value);
        }
        Ok(serde_json::to_string(&JsonValue::Object(object))?)
    }

    /// 按键解析为类型 T,缺失时返回默认值
    fn get_typed_or<T>(&self, key: &str, default: impl FnOnce() -> T) -> ConfigResult<T>
    where
        T: DeserializeOwned,
    {
        match self.values.get(key) {
            Some(raw) => serde_json::from_str(raw).map_err(|e| ConfigError::ConfigValueError {
                key: key.to_string(),
                value: raw.clone(),
                message: e.to_string(),
            }),
            None => Ok(default()),
        }
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    pub const SEGMENTATION_THRESHOLDS: &str = "segmentation_thresholds";
    pub const ITERATIONS: &str = "iterations";
    pub const PSA_BENCHMARKS: &str = "psa_benchmarks";
    pub const COVER_MULTIPLIERS: &str = "cover_multipliers";
    pub const REPLENISHMENT_DAYS: &str = "replenishment_days";
    pub const STORE_TRANSFER_THRESHOLDS: &str = "store_transfer_thresholds";
    pub const REVENUE_BLEND: &str = "revenue_blend";
}

// ==========================================
// AllocationConfigReader trait 实现
// ==========================================
#[async_trait]
impl AllocationConfigReader for ConfigManager {
    async fn get_segmentation_thresholds(&self) -> ConfigResult<SegmentationThresholds> {
        self.get_typed_or(config_keys::SEGMENTATION_THRESHOLDS, SegmentationThresholds::default)
    }

    async fn get_iteration_definitions(&self) -> ConfigResult<Vec<IterationDefinition>> {
        self.get_typed_or(config_keys::ITERATIONS, default_iteration_definitions)
    }

    async fn get_psa_benchmarks(&self) -> ConfigResult<HashMap<String, f64>> {
        self.get_typed_or(config_keys::PSA_BENCHMARKS, || {
            HashMap::from([("default".to_string(), 80.0)])
        })
    }

    async fn get_cover_multipliers(&self) -> ConfigResult<HashMap<String, f64>> {
        self.get_typed_or(config_keys::COVER_MULTIPLIERS, || {
            HashMap::from([
                ("default".to_string(), 1.0),
                ("top_seller".to_string(), 1.5),
            ])
        })
    }

    async fn get_replenishment_days(&self) -> ConfigResult<u32> {
        self.get_typed_or(config_keys::REPLENISHMENT_DAYS, || 14)
    }

    async fn get_store_transfer_thresholds(&self) -> ConfigResult<StoreTransferThresholds> {
        self.get_typed_or(
            config_keys::STORE_TRANSFER_THRESHOLDS,
            StoreTransferThresholds::default,
        )
    }

    async fn get_revenue_blend(&self) -> ConfigResult<RevenueBlendConfig> {
        self.get_typed_or(config_keys::REVENUE_BLEND, RevenueBlendConfig::default)
    }
}
