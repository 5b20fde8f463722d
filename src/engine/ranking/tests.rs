use super::*;
use crate::config::RevenueBlendConfig;
use crate::domain::types::Segment;
use std::cmp::Ordering;

fn item(store: &str, style: &str, rpd: f64) -> RankedStoreStyle {
    RankedStoreStyle {
        store_id: store.to_string(),
        style_id: style.to_string(),
        category: "TOPS".to_string(),
        segment: Segment::NormalSeller,
        rank: 0,
        target_stock: 10,
        current_stock: 0,
        live_days: Some(30),
        revenue_per_day: rpd,
        peer_revenue_per_day: 0.0,
        blended_revenue_per_day: rpd,
        psa: None,
    }
}

#[test]
fn test_revenue_dominates_all_later_keys() {
    let mut a = item("S9", "Z", 120.0);
    a.current_stock = 500;
    a.psa = Some(10.0);
    let mut b = item("S1", "A", 100.0);
    b.peer_revenue_per_day = 1000.0;
    b.psa = Some(99.0);

    assert_eq!(compare_priority(&a, &b), Ordering::Less);
}

#[test]
fn test_peer_revenue_breaks_own_revenue_tie() {
    let mut a = item("S1", "A", 100.0);
    let mut b = item("S1", "B", 100.0);
    a.peer_revenue_per_day = 40.0;
    b.peer_revenue_per_day = 60.0;
    assert_eq!(compare_priority(&a, &b), Ordering::Greater);
}

#[test]
fn test_missing_psa_ranks_as_zero() {
    let mut a = item("S1", "A", 100.0);
    let mut b = item("S2", "A", 100.0);
    a.psa = None;
    b.psa = Some(0.5);
    assert_eq!(RankingKey::Psa.compare(&a, &b), Ordering::Greater);
    b.psa = Some(0.0);
    assert_eq!(RankingKey::Psa.compare(&a, &b), Ordering::Equal);
}

#[test]
fn test_lower_stock_first_then_ids() {
    let mut a = item("S2", "A", 100.0);
    let mut b = item("S1", "A", 100.0);
    a.current_stock = 3;
    b.current_stock = 7;
    assert_eq!(compare_priority(&a, &b), Ordering::Less);

    b.current_stock = 3;
    // 款式相同时门店编号决定
    assert_eq!(compare_priority(&a, &b), Ordering::Greater);
}

#[test]
fn test_comparator_is_total_for_distinct_pairs() {
    let items = vec![
        item("S1", "A", 50.0),
        item("S1", "B", 50.0),
        item("S2", "A", 50.0),
        item("S2", "B", 50.0),
    ];
    for (i, a) in items.iter().enumerate() {
        for (j, b) in items.iter().enumerate() {
            let ord = compare_priority(a, b);
            if i == j {
                assert_eq!(ord, Ordering::Equal);
            } else {
                assert_ne!(ord, Ordering::Equal);
                assert_eq!(ord, compare_priority(b, a).reverse());
            }
        }
    }
}

#[test]
fn test_sort_is_independent_of_input_order() {
    let mut forward = vec![
        item("S1", "A", 30.0),
        item("S2", "A", 30.0),
        item("S1", "B", 90.0),
        item("S3", "C", 10.0),
    ];
    let mut backward: Vec<_> = forward.iter().rev().cloned().collect();
    forward.sort_by(compare_priority);
    backward.sort_by(compare_priority);
    assert_eq!(forward, backward);
    assert_eq!(forward[0].style_id, "B");
}

#[test]
fn test_local_only_ignores_peer() {
    assert_eq!(LocalOnlyBlend.blend(10.0, 500.0, None), 10.0);
}

#[test]
fn test_sparse_history_blend() {
    let blend = SparseHistoryBlend {
        min_live_days: 14,
        peer_weight: 0.5,
    };
    assert_eq!(blend.blend(10.0, 30.0, Some(7)), 20.0);
    assert_eq!(blend.blend(10.0, 30.0, None), 20.0);
    assert_eq!(blend.blend(10.0, 30.0, Some(14)), 10.0);
}

#[test]
fn test_blend_config_rejects_bad_weight() {
    let cfg = RevenueBlendConfig::SparseHistory {
        min_live_days: 14,
        peer_weight: 1.5,
    };
    assert!(blend_from_config(&cfg).is_err());
    assert!(blend_from_config(&RevenueBlendConfig::LocalOnly).is_ok());
}
