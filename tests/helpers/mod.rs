// ==========================================
// 集成测试公共模块
// ==========================================

#![allow(dead_code)]

pub mod mock_config;
pub mod test_data_builder;

pub use mock_config::MockConfig;
pub use test_data_builder::InputBuilder;

use merch_allocation::config::{SegmentationThresholds, StoreTransferThresholds};
use merch_allocation::domain::{AllocationInput, IterationConstraint};
use merch_allocation::engine::{
    AllocationPipeline, AllocationRunResult, LocalOnlyBlend, RunPlan, RunSettings, RunStep,
};
use std::sync::Arc;

/// 由运行步骤构建默认阈值的运行设置
pub fn settings_for(steps: Vec<RunStep>) -> RunSettings {
    RunSettings::new(
        SegmentationThresholds::default(),
        RunPlan::from_steps(steps).unwrap(),
        StoreTransferThresholds::default(),
        Arc::new(LocalOnlyBlend),
    )
    .unwrap()
}

/// 只执行给定的分配迭代
pub fn run_iterations(
    input: &AllocationInput,
    constraints: Vec<IterationConstraint>,
) -> AllocationRunResult {
    merch_allocation::logging::init_test();
    let steps = constraints.into_iter().map(RunStep::Allocate).collect();
    AllocationPipeline::new(settings_for(steps)).run(input)
}

/// 某门店某 SKU 的分配总量
pub fn allocated_to(result: &AllocationRunResult, store_id: &str, sku_id: &str) -> u32 {
    result
        .allocations
        .iter()
        .filter(|a| a.store_id == store_id && a.sku_id == sku_id)
        .map(|a| a.quantity)
        .sum()
}

/// 某仓库某 SKU 的剩余可用量
pub fn remaining_at(result: &AllocationRunResult, warehouse_id: &str, sku_id: &str) -> u32 {
    result
        .warehouse_stock
        .iter()
        .find(|r| r.warehouse_id == warehouse_id && r.sku_id == sku_id)
        .map(|r| r.remaining)
        .unwrap_or(0)
}
