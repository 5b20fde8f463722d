use crate::config::RevenueBlendConfig;
use crate::engine::error::{EngineError, EngineResult};
use std::fmt::Debug;
use std::sync::Arc;

/// 本店日均营收与全国款式日均营收的混合策略
///
/// 排序时以混合后的值作为主键
pub trait RevenueBlend: Send + Sync + Debug {
    /// # 参数
    /// - `own`: 本店日均营收 (无历史为 0)
    /// - `peer`: 全国款式日均营收 (无历史为 0)
    /// - `live_days`: 本店上架天数
    fn blend(&self, own: f64, peer: f64, live_days: Option<u32>) -> f64;
}

/// 只使用本店营收
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalOnlyBlend;

impl RevenueBlend for LocalOnlyBlend {
    fn blend(&self, own: f64, _peer: f64, _live_days: Option<u32>) -> f64 {
        own
    }
}

/// 本店上架天数不足时按权重混入全国营收
#[derive(Debug, Clone, Copy)]
pub struct SparseHistoryBlend {
    pub min_live_days: u32,
    pub peer_weight: f64,
}

impl RevenueBlend for SparseHistoryBlend {
    fn blend(&self, own: f64, peer: f64, live_days: Option<u32>) -> f64 {
        let sparse = live_days.map(|d| d < self.min_live_days).unwrap_or(true);
        if sparse {
            own * (1.0 - self.peer_weight) + peer * self.peer_weight
        } else {
            own
        }
    }
}

/// 由配置构建混合策略
///
/// peer_weight 必须在 [0, 1] 之间
pub fn blend_from_config(config: &RevenueBlendConfig) -> EngineResult<Arc<dyn RevenueBlend>> {
    match config {
        RevenueBlendConfig::LocalOnly => Ok(Arc::new(LocalOnlyBlend)),
        RevenueBlendConfig::SparseHistory {
            min_live_days,
            peer_weight,
        } => {
            if !peer_weight.is_finite() || !(0.0..=1.0).contains(peer_weight) {
                return Err(EngineError::InvalidThreshold {
                    name: "revenue_blend.peer_weight".to_string(),
                    message: format!("必须在 0~1 之间, 实际 {}", peer_weight),
                });
            }
            Ok(Arc::new(SparseHistoryBlend {
                min_live_days: *min_live_days,
                peer_weight: *peer_weight,
            }))
        }
    }
}
