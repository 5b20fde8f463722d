// ==========================================
// 仓→店分配场景集成测试
// ==========================================
// 测试目标: 验证按 rank 的贪心分配、畅销款覆盖公式、陈列容量约束、健康门槛
// 覆盖范围: 单轮迭代、多轮迭代、库存守恒、单调性
// ==========================================

mod helpers;

use helpers::{allocated_to, remaining_at, run_iterations, InputBuilder};
use merch_allocation::domain::{IterationConstraint, IterationKind, Segment, SizeTag};
use std::collections::BTreeSet;

// ==========================================
// 测试辅助函数
// ==========================================

fn replenishment(tag: &str, enforce_planogram: bool) -> IterationConstraint {
    IterationConstraint::new(
        tag,
        IterationKind::Replenishment {
            segments: BTreeSet::new(),
            replenishment_days: 7,
            cover_multiplier: 1.0,
            enforce_planogram,
        },
    )
}

/// 单仓两店: S1 缺口 30, S2 缺口 40
fn two_store_input(warehouse_stock: u32) -> merch_allocation::domain::AllocationInput {
    InputBuilder::new()
        .warehouse("W")
        .store("S1", "W")
        .store("S2", "W")
        .style("A", "TOPS")
        .sku("A-M", "A", SizeTag::Pivotal)
        .warehouse_stock("W", "A-M", warehouse_stock)
        .target("S1", "A", 30)
        .target("S2", "A", 40)
        .sku_demand("S1", "A-M", 1.0)
        .sku_demand("S2", "A-M", 1.0)
        .build()
}

// ==========================================
// 按 rank 贪心分配
// ==========================================

#[test]
fn test_higher_rank_store_is_filled_first() {
    let result = run_iterations(&two_store_input(50), vec![replenishment("R1", false)]);

    assert_eq!(result.ranking[0].store_id, "S1");
    assert_eq!(allocated_to(&result, "S1", "A-M"), 30);
    assert_eq!(allocated_to(&result, "S2", "A-M"), 20);
    assert_eq!(remaining_at(&result, "W", "A-M"), 0);

    let summary = &result.iteration_summaries[0];
    assert_eq!(summary.tag, "R1");
    assert_eq!(summary.allocated_units, 50);
    assert_eq!(summary.resolved_styles, 2);
}

#[test]
fn test_allocation_never_exceeds_gap() {
    let result = run_iterations(&two_store_input(500), vec![replenishment("R1", false)]);

    assert_eq!(allocated_to(&result, "S1", "A-M"), 30);
    assert_eq!(allocated_to(&result, "S2", "A-M"), 40);
    assert_eq!(remaining_at(&result, "W", "A-M"), 430);
}

#[test]
fn test_second_pass_does_not_reallocate_resolved_gap() {
    let result = run_iterations(
        &two_store_input(500),
        vec![replenishment("R1", false), replenishment("R2", false)],
    );

    assert_eq!(result.total_allocated(), 70);
    assert!(result.allocations.iter().all(|a| a.iteration_tag == "R1"));
    assert_eq!(result.iteration_summaries[1].allocated_units, 0);
}

#[test]
fn test_more_starting_stock_never_reduces_any_store_allocation() {
    let mut previous: Option<(u32, u32)> = None;
    for stock in [0, 10, 30, 45, 70, 120] {
        let result = run_iterations(&two_store_input(stock), vec![replenishment("R1", false)]);
        let current = (
            allocated_to(&result, "S1", "A-M"),
            allocated_to(&result, "S2", "A-M"),
        );
        if let Some(prev) = previous {
            assert!(current.0 >= prev.0, "S1 在期初库存 {} 时减少", stock);
            assert!(current.1 >= prev.1, "S2 在期初库存 {} 时减少", stock);
        }
        previous = Some(current);
    }
}

#[test]
fn test_warehouse_ledger_is_balanced() {
    let result = run_iterations(&two_store_input(45), vec![replenishment("R1", false)]);

    assert!(!result.warehouse_stock.is_empty());
    for row in &result.warehouse_stock {
        assert!(row.is_balanced(), "台账不守恒: {:?}", row);
    }
}

#[test]
fn test_untagged_size_is_never_allocated() {
    let input = InputBuilder::new()
        .warehouse("W")
        .store("S1", "W")
        .style("A", "TOPS")
        .sku("A-M", "A", SizeTag::Pivotal)
        .sku("A-XXS", "A", SizeTag::Untagged)
        .warehouse_stock("W", "A-M", 50)
        .warehouse_stock("W", "A-XXS", 50)
        .target("S1", "A", 10)
        .sku_demand("S1", "A-M", 1.0)
        .sku_demand("S1", "A-XXS", 1.0)
        .build();

    let result = run_iterations(&input, vec![replenishment("R1", false)]);

    assert_eq!(allocated_to(&result, "S1", "A-M"), 10);
    assert_eq!(allocated_to(&result, "S1", "A-XXS"), 0);
}

#[test]
fn test_store_without_mapped_warehouse_gets_nothing() {
    let input = InputBuilder::new()
        .warehouse("W")
        .unmapped_store("S1")
        .style("A", "TOPS")
        .sku("A-M", "A", SizeTag::Pivotal)
        .warehouse_stock("W", "A-M", 50)
        .target("S1", "A", 10)
        .sku_demand("S1", "A-M", 1.0)
        .build();

    let result = run_iterations(&input, vec![replenishment("R1", false)]);

    assert_eq!(result.total_allocated(), 0);
    assert_eq!(remaining_at(&result, "W", "A-M"), 50);
}

// ==========================================
// 畅销款覆盖公式
// ==========================================

#[test]
fn test_top_seller_suggestion_uses_max_of_depth_and_cover() {
    let input = InputBuilder::new()
        .warehouse("W")
        .store("S1", "W")
        .style("A", "TOPS")
        .sku("A-M", "A", SizeTag::Pivotal)
        .warehouse_stock("W", "A-M", 100)
        .store_stock("S1", "A-M", 5)
        .classified("S1", "A", 20, Segment::TopSeller)
        .sku_demand("S1", "A-M", 2.0)
        .build();
    let top = IterationConstraint::new(
        "TOP",
        IterationKind::TopSeller {
            replenishment_days: 7,
            cover_multiplier: 1.0,
            enforce_planogram: false,
        },
    );

    let result = run_iterations(&input, vec![top]);

    // max(20, 2 × 7 × 1.0) = 20; 缺口 = 20 - 5
    assert_eq!(allocated_to(&result, "S1", "A-M"), 15);
    let diagnostic = &result.diagnostics[0];
    assert_eq!(diagnostic.suggested_qty, 20);
    assert_eq!(diagnostic.resolved_iterations, vec!["TOP".to_string()]);
}

#[test]
fn test_top_seller_cover_dominates_when_rate_is_high() {
    let input = InputBuilder::new()
        .warehouse("W")
        .store("S1", "W")
        .style("A", "TOPS")
        .sku("A-M", "A", SizeTag::Pivotal)
        .warehouse_stock("W", "A-M", 100)
        .store_stock("S1", "A-M", 5)
        .classified("S1", "A", 20, Segment::TopSeller)
        .sku_demand("S1", "A-M", 5.0)
        .build();
    let top = IterationConstraint::new(
        "TOP",
        IterationKind::TopSeller {
            replenishment_days: 7,
            cover_multiplier: 1.5,
            enforce_planogram: false,
        },
    );

    let result = run_iterations(&input, vec![top]);

    // ⌈5 × 7 × 1.5⌉ = 53
    assert_eq!(allocated_to(&result, "S1", "A-M"), 48);
}

#[test]
fn test_top_seller_pass_skips_normal_stores() {
    let input = InputBuilder::new()
        .warehouse("W")
        .store("S1", "W")
        .style("A", "TOPS")
        .sku("A-M", "A", SizeTag::Pivotal)
        .warehouse_stock("W", "A-M", 100)
        .classified("S1", "A", 20, Segment::NormalSeller)
        .sku_demand("S1", "A-M", 2.0)
        .build();
    let top = IterationConstraint::new(
        "TOP",
        IterationKind::TopSeller {
            replenishment_days: 7,
            cover_multiplier: 1.0,
            enforce_planogram: false,
        },
    );

    let result = run_iterations(&input, vec![top]);

    assert_eq!(result.total_allocated(), 0);
    assert_eq!(
        result.iteration_summaries[0].skipped.get("SEGMENT_FILTERED"),
        Some(&1)
    );
}

// ==========================================
// 陈列容量约束
// ==========================================

fn full_planogram_input(planogram_stock: u32) -> merch_allocation::domain::AllocationInput {
    InputBuilder::new()
        .warehouse("W")
        .store("S1", "W")
        .style("A", "TOPS")
        .sku("A-M", "A", SizeTag::Pivotal)
        .warehouse_stock("W", "A-M", 100)
        .store_stock("S1", "A-M", 10)
        .target("S1", "A", 30)
        .sku_demand("S1", "A-M", 1.0)
        .planogram("S1", "TOPS", 10, planogram_stock)
        .build()
}

#[test]
fn test_planogram_ignored_when_enforcement_disabled() {
    let result = run_iterations(&full_planogram_input(10), vec![replenishment("R1", false)]);

    assert_eq!(allocated_to(&result, "S1", "A-M"), 20);
}

#[test]
fn test_full_planogram_blocks_allocation_when_enforced() {
    let result = run_iterations(&full_planogram_input(10), vec![replenishment("R1", true)]);

    assert_eq!(allocated_to(&result, "S1", "A-M"), 0);
    assert_eq!(remaining_at(&result, "W", "A-M"), 100);
}

#[test]
fn test_enforced_allocation_is_capped_to_remaining_room() {
    let result = run_iterations(&full_planogram_input(15), vec![replenishment("R1", true)]);

    assert_eq!(allocated_to(&result, "S1", "A-M"), 5);
}

// ==========================================
// 健康门槛 (PSA)
// ==========================================

#[test]
fn test_store_below_psa_benchmark_is_skipped_regardless_of_rank() {
    let input = InputBuilder::new()
        .warehouse("W")
        .store("S1", "W")
        .store("S2", "W")
        .style("A", "TOPS")
        .sku("A-M", "A", SizeTag::Pivotal)
        .warehouse_stock("W", "A-M", 100)
        .store_stock("S1", "A-M", 60)
        .store_stock("S2", "A-M", 90)
        .classified("S1", "A", 80, Segment::NormalSeller)
        .classified("S2", "A", 100, Segment::NormalSeller)
        .sku_demand("S1", "A-M", 1.0)
        .sku_demand("S2", "A-M", 1.0)
        .sales("S1", "A", 1000.0, 50, 10)
        .planogram("S1", "TOPS", 10, 100)
        .planogram("S2", "TOPS", 10, 100)
        .build();
    let gated = replenishment("R1", false).with_psa_benchmark(80.0);

    let result = run_iterations(&input, vec![gated]);

    // S1 日均营收更高,排名第一,但 PSA 60% 低于门槛
    assert_eq!(result.ranking[0].store_id, "S1");
    assert_eq!(result.ranking[0].psa, Some(60.0));
    assert_eq!(allocated_to(&result, "S1", "A-M"), 0);
    assert_eq!(allocated_to(&result, "S2", "A-M"), 10);
    assert_eq!(
        result.iteration_summaries[0].skipped.get("HEALTH_GATE"),
        Some(&1)
    );
}

#[test]
fn test_missing_psa_fails_health_gate() {
    let gated = replenishment("R1", false).with_psa_benchmark(0.0);

    let result = run_iterations(&two_store_input(50), vec![gated]);

    assert_eq!(result.total_allocated(), 0);
    assert_eq!(
        result.iteration_summaries[0].skipped.get("HEALTH_GATE"),
        Some(&2)
    );
}
