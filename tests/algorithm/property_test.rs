//! Property tests: the pruned search agrees with plain enumeration

use proptest::prelude::*;
use team_synergy::algorithm::search::{prepare_pool, search};
use team_synergy::{BoundStrategy, CancellationToken, Catalog, SearchConfig, ThresholdTable, Unit};

use crate::utils::brute_force;

const LABELS: [&str; 5] = ["arcane", "brawler", "chrono", "duelist", "elder"];

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// Up to twelve units, each carrying a random subset of the labels
fn arb_catalog() -> impl Strategy<Value = Catalog> {
    prop::collection::vec(prop::collection::vec(any::<bool>(), LABELS.len()), 0..=12).prop_map(
        |rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, carried)| {
                    let traits = LABELS
                        .iter()
                        .zip(carried)
                        .filter_map(|(label, has)| has.then_some(*label));
                    Unit::new(format!("unit{i}"), traits)
                })
                .collect()
        },
    )
}

fn arb_thresholds() -> impl Strategy<Value = ThresholdTable> {
    prop::collection::vec(1u32..=4, LABELS.len())
        .prop_map(|values| LABELS.iter().copied().zip(values).collect())
}

fn arb_strategy() -> impl Strategy<Value = BoundStrategy> {
    prop_oneof![Just(BoundStrategy::Loose), Just(BoundStrategy::SlotCapped)]
}

// ---------------------------------------------------------------------------
// Property Tests
// ---------------------------------------------------------------------------

proptest! {
    /// Pruning never loses or invents a group.
    #[test]
    fn pruned_search_equals_enumeration(
        catalog in arb_catalog(),
        table in arb_thresholds(),
        group_size in 1usize..=3,
        min_active in 1usize..=4,
        strategy in arb_strategy(),
    ) {
        let config = SearchConfig::builder()
            .group_size(group_size)
            .min_active_traits(min_active)
            .bound_strategy(strategy)
            .build();
        let pool = prepare_pool(&catalog, &table, &config).unwrap();
        let outcome = search(&pool, &config, &CancellationToken::new()).unwrap();
        let found: Vec<Vec<String>> = outcome
            .solutions
            .iter()
            .map(|s| s.names().map(str::to_string).collect())
            .collect();
        prop_assert_eq!(found, brute_force(&pool, group_size, min_active));
        prop_assert!(outcome.is_complete());
    }

    /// Solution members only carry traits the whole catalog can activate.
    #[test]
    fn solutions_exclude_inert_traits(
        catalog in arb_catalog(),
        table in arb_thresholds(),
        group_size in 1usize..=3,
    ) {
        let config = SearchConfig::builder()
            .group_size(group_size)
            .min_active_traits(1)
            .build();
        let pool = prepare_pool(&catalog, &table, &config).unwrap();
        let carriers = catalog.trait_carrier_counts();
        let outcome = search(&pool, &config, &CancellationToken::new()).unwrap();
        for solution in &outcome.solutions {
            prop_assert_eq!(solution.len(), group_size);
            for member in &solution.members {
                for t in &member.traits {
                    let threshold = table.get(t).unwrap() as usize;
                    prop_assert!(carriers[t.as_str()] >= threshold);
                }
            }
        }
    }
}
