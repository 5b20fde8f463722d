// ==========================================
// 零售商品铺货分配引擎 - 引擎层
// ==========================================
// 职责: 分层、排序、迭代分配、调拨、汇总
// 红线: 引擎不做 I/O; 配置由编排器在运行前一次性读取
// ==========================================

pub mod allocation_runner;
pub mod consolidator;
pub mod context;
pub mod eligibility;
pub mod error;
pub mod iteration_rules;
pub mod orchestrator;
pub mod pipeline;
pub mod ranking;
pub mod run_plan;
pub mod segmentation;
pub mod snapshot_index;
pub mod store_transfer;
pub mod suggestion;
pub mod warehouse_transfer;

// 重导出核心引擎
pub use allocation_runner::{AllocationIterationRunner, IterationOutcome};
pub use consolidator::OutputConsolidator;
pub use context::{RunContext, StoreStyle, WarehouseView};
pub use eligibility::{check_eligibility, SkipReason};
pub use error::{EngineError, EngineResult};
pub use iteration_rules::{AllocationLine, StyleAllocation};
pub use orchestrator::AllocationOrchestrator;
pub use pipeline::{AllocationPipeline, AllocationRunResult, RunSettings};
pub use ranking::{
    blend_from_config, compare_priority, LocalOnlyBlend, RankedStoreStyle, RankingEngine,
    RankingKey, RevenueBlend, SparseHistoryBlend,
};
pub use run_plan::{RunPlan, RunStep};
pub use segmentation::{SegmentationEngine, SegmentedStoreStyle};
pub use snapshot_index::SnapshotIndex;
pub use store_transfer::StoreTransferEngine;
pub use warehouse_transfer::WarehouseTransferEngine;
