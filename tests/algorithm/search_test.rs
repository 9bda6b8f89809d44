//! Tests for the group search engine

use std::collections::HashSet;

use team_synergy::algorithm::search::{prepare_pool, run_parallel, search};
use team_synergy::{
    BoundStrategy, CancellationToken, Catalog, SearchConfig, SearchStatus, Searcher, SynergyError,
    Unit, filter_units, find_valid_groups,
};

use crate::utils::{active_count, brute_force, elements_catalog, random_catalog, thresholds};

fn names(outcome: &team_synergy::SearchOutcome) -> Vec<Vec<String>> {
    outcome
        .solutions
        .iter()
        .map(|s| s.names().map(str::to_string).collect())
        .collect()
}

#[test]
fn test_fire_water_pair() {
    let config = SearchConfig::builder()
        .group_size(2)
        .min_active_traits(2)
        .build();
    let outcome = find_valid_groups(
        &elements_catalog(),
        &thresholds(&[("fire", 2), ("water", 2)]),
        &config,
    )
    .unwrap();

    assert!(outcome.is_complete());
    assert_eq!(names(&outcome), vec![vec!["A", "D"]]);
    for member in &outcome.solutions[0].members {
        assert_eq!(member.traits, ["fire", "water"]);
    }
}

#[test]
fn test_threshold_is_inclusive_and_triples_fail() {
    // fire and water each have exactly three carriers, so both stay activatable
    let table = thresholds(&[("fire", 3), ("water", 3)]);
    let pool = filter_units(&elements_catalog(), &table, true).unwrap();
    assert_eq!(pool.trait_index().len(), 2);

    // A,B,D reaches fire 3 but water only 2: one active trait
    let config = SearchConfig::builder()
        .group_size(3)
        .min_active_traits(2)
        .build();
    let outcome = find_valid_groups(&elements_catalog(), &table, &config).unwrap();
    assert!(outcome.solutions.is_empty());
    assert!(outcome.is_complete());

    let config = SearchConfig::builder()
        .group_size(3)
        .min_active_traits(1)
        .build();
    let outcome = find_valid_groups(&elements_catalog(), &table, &config).unwrap();
    let found: HashSet<Vec<String>> = names(&outcome)
        .into_iter()
        .map(|mut group| {
            group.sort();
            group
        })
        .collect();
    let expected: HashSet<Vec<String>> = [vec!["A", "B", "D"], vec!["A", "C", "D"]]
        .into_iter()
        .map(|g| g.into_iter().map(String::from).collect())
        .collect();
    assert_eq!(found, expected);
}

#[test]
fn test_missing_threshold_fails_before_search() {
    let mut units = elements_catalog().units().to_vec();
    units.push(Unit::new("E", ["shadow"]));
    let catalog = Catalog::new(units);
    let config = SearchConfig::builder()
        .group_size(2)
        .min_active_traits(1)
        .build();

    let err = find_valid_groups(&catalog, &thresholds(&[("fire", 2), ("water", 2)]), &config)
        .unwrap_err();
    assert!(err.is_configuration_error());
    match err {
        SynergyError::MissingThreshold { unit, trait_name } => {
            assert_eq!(unit, "E");
            assert_eq!(trait_name, "shadow");
        }
        other => panic!("expected MissingThreshold, got {other:?}"),
    }
}

#[test]
fn test_non_positive_parameters_rejected() {
    let table = thresholds(&[("fire", 2), ("water", 2)]);
    for config in [
        SearchConfig::builder().group_size(0).build(),
        SearchConfig::builder().min_active_traits(0).build(),
    ] {
        let err = find_valid_groups(&elements_catalog(), &table, &config).unwrap_err();
        assert!(matches!(err, SynergyError::InvalidParameter { .. }));
    }
}

#[test]
fn test_empty_results_are_not_errors() {
    let table = thresholds(&[("fire", 2), ("water", 2)]);
    let too_large = SearchConfig::builder()
        .group_size(10)
        .min_active_traits(1)
        .build();
    let outcome = find_valid_groups(&elements_catalog(), &table, &too_large).unwrap();
    assert!(outcome.solutions.is_empty());
    assert!(outcome.is_complete());

    let unreachable = SearchConfig::builder()
        .group_size(2)
        .min_active_traits(3)
        .build();
    let outcome = find_valid_groups(&elements_catalog(), &table, &unreachable).unwrap();
    assert!(outcome.solutions.is_empty());
    assert!(outcome.is_complete());
}

#[test]
fn test_solutions_respect_invariants() {
    let (catalog, table) = random_catalog(7, 12, 6, 3);
    let config = SearchConfig::builder()
        .group_size(4)
        .min_active_traits(2)
        .build();
    let pool = prepare_pool(&catalog, &table, &config).unwrap();
    let outcome = search(&pool, &config, &CancellationToken::new()).unwrap();
    let inert: HashSet<&str> = pool.inert_traits().iter().map(String::as_str).collect();

    for solution in &outcome.solutions {
        assert_eq!(solution.len(), 4);
        let unique: HashSet<&str> = solution.names().collect();
        assert_eq!(unique.len(), 4);
        assert!(solution.active_count() >= 2);
        for member in &solution.members {
            assert!(member.traits.iter().all(|t| !inert.contains(t.as_str())));
        }
    }
}

#[test]
fn test_matches_brute_force_on_small_catalogs() {
    for seed in 0..40 {
        let (catalog, table) = random_catalog(seed, 12, 5, 3);
        for group_size in 1..=3 {
            for min_active in 1..=3 {
                for strategy in [BoundStrategy::Loose, BoundStrategy::SlotCapped] {
                    let config = SearchConfig::builder()
                        .group_size(group_size)
                        .min_active_traits(min_active)
                        .bound_strategy(strategy)
                        .build();
                    let pool = prepare_pool(&catalog, &table, &config).unwrap();
                    let outcome = search(&pool, &config, &CancellationToken::new()).unwrap();
                    assert_eq!(
                        names(&outcome),
                        brute_force(&pool, group_size, min_active),
                        "seed {seed}, size {group_size}, min {min_active}, {strategy}"
                    );
                }
            }
        }
    }
}

#[test]
fn test_deterministic_order() {
    let (catalog, table) = random_catalog(99, 14, 6, 3);
    let config = SearchConfig::builder()
        .group_size(4)
        .min_active_traits(2)
        .build();
    let first = find_valid_groups(&catalog, &table, &config).unwrap();
    let second = find_valid_groups(&catalog, &table, &config).unwrap();
    assert_eq!(first.solutions, second.solutions);
}

#[test]
fn test_parallel_matches_sequential() {
    let (catalog, table) = random_catalog(3, 14, 6, 3);
    let sequential_config = SearchConfig::builder()
        .group_size(4)
        .min_active_traits(2)
        .build();
    let parallel_config = SearchConfig::builder()
        .group_size(4)
        .min_active_traits(2)
        .use_parallel(true)
        .build();
    let sequential = find_valid_groups(&catalog, &table, &sequential_config).unwrap();
    let parallel = find_valid_groups(&catalog, &table, &parallel_config).unwrap();
    assert_eq!(sequential.solutions, parallel.solutions);
    assert!(parallel.is_complete());
}

#[test]
fn test_traitless_filler_units() {
    let catalog = Catalog::new(vec![
        Unit::new("A", ["fire"]),
        Unit::new("B", ["fire"]),
        Unit::new("Filler", ["mud"]),
    ]);
    let table = thresholds(&[("fire", 2), ("mud", 2)]);

    let excluded = SearchConfig::builder()
        .group_size(3)
        .min_active_traits(1)
        .build();
    let outcome = find_valid_groups(&catalog, &table, &excluded).unwrap();
    assert!(outcome.solutions.is_empty());

    let kept = SearchConfig::builder()
        .group_size(3)
        .min_active_traits(1)
        .exclude_traitless_units(false)
        .build();
    let outcome = find_valid_groups(&catalog, &table, &kept).unwrap();
    assert_eq!(names(&outcome), vec![vec!["A", "B", "Filler"]]);
    assert!(outcome.solutions[0].members[2].traits.is_empty());
}

#[test]
fn test_lazy_iteration_can_stop_early() {
    let (catalog, table) = random_catalog(11, 14, 5, 2);
    let config = SearchConfig::builder()
        .group_size(3)
        .min_active_traits(1)
        .build();
    let pool = prepare_pool(&catalog, &table, &config).unwrap();
    let searcher = Searcher::new(&pool, &config).unwrap();

    let all: Vec<_> = searcher.solutions(CancellationToken::new()).collect();
    assert!(all.len() > 3);
    let first_three: Vec<_> = searcher.solutions(CancellationToken::new()).take(3).collect();
    assert_eq!(first_three, all[..3]);
}

#[test]
fn test_cancellation_returns_partial_prefix() {
    let (catalog, table) = random_catalog(5, 14, 5, 2);
    let config = SearchConfig::builder()
        .group_size(3)
        .min_active_traits(1)
        .build();
    let pool = prepare_pool(&catalog, &table, &config).unwrap();
    let searcher = Searcher::new(&pool, &config).unwrap();
    let complete: Vec<_> = searcher.solutions(CancellationToken::new()).collect();
    assert!(complete.len() > 2);

    let token = CancellationToken::new();
    let mut iter = searcher.solutions(token.clone());
    let mut partial = Vec::new();
    for solution in iter.by_ref() {
        partial.push(solution);
        if partial.len() == 2 {
            token.cancel();
        }
    }
    assert_eq!(iter.status(), Some(SearchStatus::Cancelled));
    assert_eq!(partial, complete[..2]);

    let cancelled = run_parallel(&searcher, &token);
    assert_eq!(cancelled.status, SearchStatus::Cancelled);
    assert!(!cancelled.is_complete());
}

#[test]
fn test_every_solution_recounts_to_its_active_traits() {
    let (catalog, table) = random_catalog(21, 10, 6, 2);
    let config = SearchConfig::builder()
        .group_size(3)
        .min_active_traits(2)
        .build();
    let pool = prepare_pool(&catalog, &table, &config).unwrap();
    let outcome = search(&pool, &config, &CancellationToken::new()).unwrap();
    for solution in &outcome.solutions {
        let members: Vec<usize> = solution
            .names()
            .map(|name| {
                pool.units()
                    .iter()
                    .position(|u| u.name() == name)
                    .unwrap()
            })
            .collect();
        assert_eq!(active_count(&pool, &members), solution.active_count());
    }
}
