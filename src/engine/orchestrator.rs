// ==========================================
// 零售商品铺货分配引擎 - 引擎编排器
// ==========================================
// 用途: 一次性读取配置 → 解析运行计划 → 执行分配流水线
// 红线: 配置错误在任何分配提交前返回
// ==========================================

use crate::config::AllocationConfigReader;
use crate::domain::input::AllocationInput;
use crate::engine::error::EngineResult;
use crate::engine::pipeline::{AllocationPipeline, AllocationRunResult, RunSettings};
use crate::engine::ranking::{blend_from_config, RevenueBlend};
use crate::engine::run_plan::RunPlan;
use std::sync::Arc;
use tracing::{debug, info, instrument};

// ==========================================
// AllocationOrchestrator - 引擎编排器
// ==========================================

pub struct AllocationOrchestrator<C>
where
    C: AllocationConfigReader,
{
    config: Arc<C>,
    blend_override: Option<Arc<dyn RevenueBlend>>,
}

impl<C> AllocationOrchestrator<C>
where
    C: AllocationConfigReader,
{
    /// 创建新的编排器实例
    ///
    /// # 参数
    /// - config: 配置读取器
    pub fn new(config: Arc<C>) -> Self {
        Self {
            config,
            blend_override: None,
        }
    }

    /// 使用自定义营收混合策略 (覆盖配置中的 revenue_blend)
    pub fn with_blend(mut self, blend: Arc<dyn RevenueBlend>) -> Self {
        self.blend_override = Some(blend);
        self
    }

    /// 读取并校验全部运行设置
    ///
    /// # 返回
    /// - Err: 配置读取失败,或计划/阈值无效
    #[instrument(skip(self))]
    pub async fn load_settings(&self) -> EngineResult<RunSettings> {
        let segmentation = self.config.get_segmentation_thresholds().await?;
        let definitions = self.config.get_iteration_definitions().await?;
        let benchmarks = self.config.get_psa_benchmarks().await?;
        let cover_multipliers = self.config.get_cover_multipliers().await?;
        let replenishment_days = self.config.get_replenishment_days().await?;
        let store_transfer = self.config.get_store_transfer_thresholds().await?;
        debug!(iterations = definitions.len(), "配置已读取");

        let plan = RunPlan::resolve(
            &definitions,
            &benchmarks,
            &cover_multipliers,
            replenishment_days,
        )?;
        let blend = match &self.blend_override {
            Some(blend) => blend.clone(),
            None => blend_from_config(&self.config.get_revenue_blend().await?)?,
        };

        RunSettings::new(segmentation, plan, store_transfer, blend)
    }

    /// 执行完整分配流程
    ///
    /// # 参数
    /// - input: 运行输入 (主数据、库存快照、需求信号、陈列目标)
    ///
    /// # 返回
    /// 分配结果; 配置无效时返回错误且不产生任何分配
    pub async fn execute_run(&self, input: &AllocationInput) -> EngineResult<AllocationRunResult> {
        let settings = self.load_settings().await?;
        info!(
            steps = settings.plan().steps().len(),
            "运行设置已校验,开始分配"
        );
        Ok(AllocationPipeline::new(settings).run(input))
    }
}
