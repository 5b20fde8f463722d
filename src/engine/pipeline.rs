// ==========================================
// 零售商品铺货分配引擎 - 分配流水线
// ==========================================
// 流程: 分层 → 排序 → 构建上下文 → 按计划执行迭代/仓间调拨 →
//       店间调拨 → 汇总
// 红线: 运行设置在构建时完成全部校验,run() 本身不会失败
// 红线: 同步执行,不跨 await; 每次运行独占一个 RunContext
// ==========================================

use crate::config::{SegmentationThresholds, StoreTransferThresholds};
use crate::domain::allocation::{
    AllocationRecord, ConsolidatedRecord, IterationSummary, StoreStyleDiagnostic, StoreTransfer,
    WarehouseStockRow, WarehouseTransfer,
};
use crate::domain::input::AllocationInput;
use crate::engine::allocation_runner::AllocationIterationRunner;
use crate::engine::consolidator::OutputConsolidator;
use crate::engine::context::RunContext;
use crate::engine::error::EngineResult;
use crate::engine::ranking::{RankedStoreStyle, RankingEngine, RevenueBlend};
use crate::engine::run_plan::{RunPlan, RunStep};
use crate::engine::segmentation::{SegmentationEngine, SegmentedStoreStyle};
use crate::engine::snapshot_index::SnapshotIndex;
use crate::engine::store_transfer::StoreTransferEngine;
use crate::engine::warehouse_transfer::WarehouseTransferEngine;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

// ==========================================
// RunSettings - 已校验的运行设置
// ==========================================
#[derive(Debug, Clone)]
pub struct RunSettings {
    segmentation: SegmentationThresholds,
    plan: RunPlan,
    store_transfer: StoreTransferThresholds,
    blend: Arc<dyn RevenueBlend>,
}

impl RunSettings {
    /// 构建并校验运行设置
    ///
    /// # 返回
    /// - Err: 阈值无效 (此时尚未进行任何分配)
    pub fn new(
        segmentation: SegmentationThresholds,
        plan: RunPlan,
        store_transfer: StoreTransferThresholds,
        blend: Arc<dyn RevenueBlend>,
    ) -> EngineResult<Self> {
        SegmentationEngine::validate_thresholds(&segmentation)?;
        StoreTransferEngine::validate_thresholds(&store_transfer)?;
        Ok(Self {
            segmentation,
            plan,
            store_transfer,
            blend,
        })
    }

    pub fn plan(&self) -> &RunPlan {
        &self.plan
    }

    pub fn segmentation(&self) -> &SegmentationThresholds {
        &self.segmentation
    }

    pub fn store_transfer(&self) -> &StoreTransferThresholds {
        &self.store_transfer
    }
}

// ==========================================
// AllocationRunResult - 运行结果
// ==========================================
#[derive(Debug, Clone, Serialize)]
pub struct AllocationRunResult {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    pub snapshot_date: NaiveDate,
    pub segments: Vec<SegmentedStoreStyle>,
    pub ranking: Vec<RankedStoreStyle>,
    /// 仓→店分配 (按提交顺序)
    pub allocations: Vec<AllocationRecord>,
    /// 按 (仓库, 门店, SKU, 迭代) 合并后的分配
    pub merged_allocations: Vec<AllocationRecord>,
    pub warehouse_transfers: Vec<WarehouseTransfer>,
    pub store_transfers: Vec<StoreTransfer>,
    /// 节点×SKU 净变化
    pub report: Vec<ConsolidatedRecord>,
    pub diagnostics: Vec<StoreStyleDiagnostic>,
    pub iteration_summaries: Vec<IterationSummary>,
    pub warehouse_stock: Vec<WarehouseStockRow>,
}

impl AllocationRunResult {
    /// 仓→店分配总件数
    pub fn total_allocated(&self) -> u64 {
        self.allocations.iter().map(|a| a.quantity as u64).sum()
    }
}

// ==========================================
// AllocationPipeline - 分配流水线
// ==========================================
pub struct AllocationPipeline {
    settings: RunSettings,
    segmentation: SegmentationEngine,
    ranking: RankingEngine,
    runner: AllocationIterationRunner,
    warehouse_transfer: WarehouseTransferEngine,
    store_transfer: StoreTransferEngine,
    consolidator: OutputConsolidator,
}

impl AllocationPipeline {
    pub fn new(settings: RunSettings) -> Self {
        let ranking = RankingEngine::new(settings.blend.clone());
        Self {
            settings,
            segmentation: SegmentationEngine::new(),
            ranking,
            runner: AllocationIterationRunner::new(),
            warehouse_transfer: WarehouseTransferEngine::new(),
            store_transfer: StoreTransferEngine::new(),
            consolidator: OutputConsolidator::new(),
        }
    }

    pub fn settings(&self) -> &RunSettings {
        &self.settings
    }

    /// 执行一次完整分配
    #[instrument(skip_all, fields(
        snapshot_date = %input.snapshot.snapshot_date,
        stores = input.stores.len(),
        skus = input.skus.len()
    ))]
    pub fn run(&self, input: &AllocationInput) -> AllocationRunResult {
        let run_id = Uuid::new_v4().to_string();
        let started_at = Utc::now();
        info!(run_id = %run_id, "分配运行开始");

        // 1. 分层 + 排序
        let index = SnapshotIndex::build(input);
        let segments = self
            .segmentation
            .segment(&index, &self.settings.segmentation);
        let ranking = self.ranking.rank(&segments, &index);

        // 2. 按计划执行
        let mut ctx = RunContext::build(&run_id, &index, &ranking);
        let mut allocations = Vec::new();
        let mut warehouse_transfers = Vec::new();
        let mut iteration_summaries = Vec::new();
        for step in self.settings.plan.steps() {
            match step {
                RunStep::Allocate(constraint) => {
                    let outcome = self.runner.run_iteration(&mut ctx, constraint);
                    allocations.extend(outcome.allocations);
                    iteration_summaries.push(outcome.summary);
                }
                RunStep::WarehouseTransfer { tag } => {
                    warehouse_transfers.extend(self.warehouse_transfer.rebalance(&mut ctx, tag));
                }
            }
        }

        // 3. 店间调拨 (全部迭代已结束,无仍在分配中的 SKU)
        let store_transfers = self.store_transfer.recommend(
            &mut ctx,
            &self.settings.store_transfer,
            &BTreeSet::new(),
        );

        // 4. 汇总
        let report =
            self.consolidator
                .consolidate(&allocations, &warehouse_transfers, &store_transfers);
        let merged_allocations = self.consolidator.merge_allocations(&allocations);
        let diagnostics = self.consolidator.diagnostics(&ctx);
        let warehouse_stock = ctx.stock_rows();

        let result = AllocationRunResult {
            run_id,
            started_at,
            snapshot_date: ctx.snapshot_date(),
            segments,
            ranking,
            allocations,
            merged_allocations,
            warehouse_transfers,
            store_transfers,
            report,
            diagnostics,
            iteration_summaries,
            warehouse_stock,
        };
        info!(
            run_id = %result.run_id,
            allocated_units = result.total_allocated(),
            warehouse_transfers = result.warehouse_transfers.len(),
            store_transfers = result.store_transfers.len(),
            "分配运行完成"
        );
        result
    }
}
