//! Property-based tests for allocation invariants.
//!
//! These tests verify properties that must hold for any valid fund set:
//! - Each fund's input weight is conserved across the subsets containing it
//! - No subset receives negative weight
//! - Reordering the funds does not change the result
//! - Degree-weighted subset totals add back up to the input weight

use upsetf_core::prelude::*;

// =============================================================================
// TEST DATA GENERATORS
// =============================================================================

const UNIVERSE: [&str; 24] = [
    "AAPL", "MSFT", "NVDA", "AMZN", "META", "GOOGL", "GOOG", "AVGO", "TSLA", "BRK.B", "JPM",
    "LLY", "V", "UNH", "XOM", "MA", "COST", "HD", "PG", "JNJ", "NFLX", "CRM", "AMD", "ORCL",
];

fn simple_hash(seed: u64, i: u64) -> u64 {
    let mut x = seed.wrapping_add(i).wrapping_mul(0x517cc1b727220a95);
    x ^= x >> 32;
    x = x.wrapping_mul(0x517cc1b727220a95);
    x ^= x >> 32;
    x
}

/// Generates a fund holding a pseudo-random slice of the universe.
fn generate_fund(id: &str, seed: u64) -> Fund {
    let mut builder = Fund::builder().id(id);

    for (i, symbol) in UNIVERSE.iter().enumerate() {
        let hash = simple_hash(seed, i as u64);
        // Roughly 60% of the universe per fund.
        if hash % 10 < 6 {
            let weight = 0.001 + (hash % 900) as f64 / 10_000.0; // 0.1%-9.1%
            builder = builder.add_holding(*symbol, weight);
        }
    }

    builder.build().unwrap()
}

/// Generates `n` funds named F0..Fn.
fn generate_funds(n: usize, seed: u64) -> Vec<Fund> {
    (0..n)
        .map(|i| generate_fund(&format!("F{}", i), simple_hash(seed, 1000 + i as u64)))
        .collect()
}

fn generate_fund_set(n: usize, seed: u64) -> FundSet {
    FundSet::new(generate_funds(n, seed)).unwrap()
}

// =============================================================================
// PROPERTY: CONSERVATION
// =============================================================================

#[test]
fn property_fund_weight_is_conserved() {
    for seed in 0..20 {
        for n in 2..=5 {
            let set = generate_fund_set(n, seed);
            let result = allocate_exclusive(&set).unwrap();

            for fund in set.funds() {
                let allocated = result.fund_total(fund.id());
                let input = fund.total_weight();
                assert!(
                    (allocated - input).abs() < 1e-9,
                    "Fund {} allocated {} but holds {} (n={}, seed={})",
                    fund.id(),
                    allocated,
                    input,
                    n,
                    seed
                );
            }
        }
    }
}

#[test]
fn property_total_equals_input_sum() {
    for seed in 0..20 {
        for n in 2..=5 {
            let set = generate_fund_set(n, seed);
            let result = allocate_exclusive(&set).unwrap();

            let input: f64 = set.funds().iter().map(Fund::total_weight).sum();
            let shared_once: f64 = result.iter().map(|(s, w)| w * s.len() as f64).sum();

            // Each subset's weight is held by every member, so the
            // degree-weighted total recovers the input.
            assert!(
                (shared_once - input).abs() < 1e-9,
                "Degree-weighted total {} != input {} (n={}, seed={})",
                shared_once,
                input,
                n,
                seed
            );
        }
    }
}

// =============================================================================
// PROPERTY: NON-NEGATIVITY AND COMPLETENESS
// =============================================================================

#[test]
fn property_weights_non_negative() {
    for seed in 0..20 {
        for n in 2..=5 {
            let result = allocate_exclusive(&generate_fund_set(n, seed)).unwrap();
            for (subset, weight) in result.iter() {
                assert!(
                    weight >= 0.0,
                    "Subset {} got {} (n={}, seed={})",
                    subset,
                    weight,
                    n,
                    seed
                );
            }
        }
    }
}

#[test]
fn property_every_subset_present() {
    for n in 2..=5 {
        let result = allocate_exclusive(&generate_fund_set(n, 7)).unwrap();
        assert_eq!(result.len(), (1 << n) - 1, "n={}", n);
    }
}

// =============================================================================
// PROPERTY: SYMMETRY
// =============================================================================

#[test]
fn property_fund_order_is_irrelevant() {
    for seed in 0..10 {
        for n in 2..=5 {
            let funds = generate_funds(n, seed);
            let baseline = allocate_exclusive(&FundSet::new(funds.clone()).unwrap()).unwrap();

            let mut reversed = funds.clone();
            reversed.reverse();
            let mut rotated = funds;
            rotated.rotate_left(1);

            for permuted in [reversed, rotated] {
                let result = allocate_exclusive(&FundSet::new(permuted).unwrap()).unwrap();
                assert_eq!(result, baseline, "n={}, seed={}", n, seed);
            }
        }
    }
}

#[test]
fn property_common_floor_lands_in_full_intersection() {
    // A symbol held by every fund puts exactly its smallest weight into the
    // all-fund subset.
    for seed in 0..10 {
        for n in 2..=5 {
            let funds: Vec<Fund> = (0..n)
                .map(|i| {
                    let w = 0.01 + (simple_hash(seed, i as u64) % 100) as f64 / 1000.0;
                    Fund::builder()
                        .id(format!("F{}", i))
                        .add_holding("COMMON", w)
                        .build()
                        .unwrap()
                })
                .collect();
            let floor = funds
                .iter()
                .map(|f| f.weight_of("COMMON"))
                .fold(f64::INFINITY, f64::min);

            let set = FundSet::new(funds).unwrap();
            let ids = set.fund_ids();
            let result = allocate_exclusive(&set).unwrap();

            let all = result.get_members(&ids).unwrap();
            assert!(
                (all - floor).abs() < 1e-12,
                "Full intersection {} != floor {} (n={}, seed={})",
                all,
                floor,
                n,
                seed
            );
        }
    }
}
