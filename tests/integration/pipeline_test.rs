//! File-to-file pipeline tests: load, search, write, read back

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde_json::Value;
use tempfile::TempDir;
use team_synergy::{
    CancellationToken, SearchConfig, SearchStatus, SynergyError, find_valid_groups,
    find_valid_groups_with_token, load_thresholds, load_units, results_path, write_solutions,
};

use crate::utils::random_catalog;

const UNITS: &str = r#"[
    {"Name": "A", "Trait": ["fire", "water"]},
    {"Name": "B", "Trait": ["fire"]},
    {"Name": "C", "Trait": ["water"]},
    {"Name": "D", "Trait": ["fire", "water"]},
    {"Name": "E", "Trait": ["earth"]}
]"#;

const THRESHOLDS: &str = r#"{"fire": 2, "water": 2, "earth": 2}"#;

fn write_inputs(dir: &Path) -> (std::path::PathBuf, std::path::PathBuf) {
    let units = dir.join("units.json");
    let thresholds = dir.join("thresholds.json");
    fs::write(&units, UNITS).unwrap();
    fs::write(&thresholds, THRESHOLDS).unwrap();
    (units, thresholds)
}

#[test]
fn test_load_search_and_write() {
    let dir = TempDir::new().unwrap();
    let (units_path, thresholds_path) = write_inputs(dir.path());

    let catalog = load_units(&units_path).unwrap();
    let thresholds = load_thresholds(&thresholds_path).unwrap();
    assert_eq!(catalog.len(), 5);
    assert_eq!(thresholds.get("earth"), Some(2));

    let config = SearchConfig::builder()
        .group_size(2)
        .min_active_traits(2)
        .build();
    let outcome = find_valid_groups(&catalog, &thresholds, &config).unwrap();
    assert!(outcome.is_complete());

    let output = results_path(&dir.path().join("results"), config.group_size);
    assert!(output.ends_with("valid_groups_size_2.json"));
    let written = write_solutions(&output, outcome.solutions).unwrap();
    assert_eq!(written, 1);

    let saved: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    let expected = serde_json::json!([[
        {"Name": "A", "Traits": ["fire", "water"]},
        {"Name": "D", "Traits": ["fire", "water"]}
    ]]);
    assert_eq!(saved, expected);
}

#[test]
fn test_inert_trait_unit_never_written() {
    // E only carries earth, which has a single carrier
    let dir = TempDir::new().unwrap();
    let (units_path, thresholds_path) = write_inputs(dir.path());
    let catalog = load_units(&units_path).unwrap();
    let thresholds = load_thresholds(&thresholds_path).unwrap();

    let config = SearchConfig::builder()
        .group_size(3)
        .min_active_traits(1)
        .build();
    let outcome = find_valid_groups(&catalog, &thresholds, &config).unwrap();
    assert!(!outcome.solutions.is_empty());

    let output = results_path(dir.path(), 3);
    write_solutions(&output, outcome.solutions).unwrap();
    let text = fs::read_to_string(&output).unwrap();
    assert!(!text.contains("\"E\""));
    assert!(!text.contains("earth"));
}

#[test]
fn test_empty_result_writes_empty_array() {
    let dir = TempDir::new().unwrap();
    let (units_path, thresholds_path) = write_inputs(dir.path());
    let catalog = load_units(&units_path).unwrap();
    let thresholds = load_thresholds(&thresholds_path).unwrap();

    let config = SearchConfig::builder()
        .group_size(2)
        .min_active_traits(5)
        .build();
    let outcome = find_valid_groups(&catalog, &thresholds, &config).unwrap();
    let output = results_path(dir.path(), 2);
    assert_eq!(write_solutions(&output, outcome.solutions).unwrap(), 0);

    let saved: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(saved, serde_json::json!([]));
}

#[test]
fn test_missing_threshold_file_entry() {
    let dir = TempDir::new().unwrap();
    let (units_path, _) = write_inputs(dir.path());
    let partial = dir.path().join("partial.json");
    fs::write(&partial, r#"{"fire": 2, "water": 2}"#).unwrap();

    let catalog = load_units(&units_path).unwrap();
    let thresholds = load_thresholds(&partial).unwrap();
    let err = find_valid_groups(&catalog, &thresholds, &SearchConfig::default()).unwrap_err();
    assert!(matches!(
        err,
        SynergyError::MissingThreshold { ref unit, ref trait_name } if unit == "E" && trait_name == "earth"
    ));
}

#[test]
fn test_missing_input_file() {
    let dir = TempDir::new().unwrap();
    let err = load_units(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, SynergyError::Io { .. }));
}

#[test]
fn test_cancelled_run_still_writes_valid_prefix() {
    let (catalog, thresholds) = random_catalog(17, 16, 6, 2);
    let config = SearchConfig::builder()
        .group_size(3)
        .min_active_traits(1)
        .build();
    let complete = find_valid_groups(&catalog, &thresholds, &config).unwrap();

    let token = CancellationToken::new();
    token.cancel();
    let cancelled = find_valid_groups_with_token(&catalog, &thresholds, &config, &token).unwrap();
    assert_eq!(cancelled.status, SearchStatus::Cancelled);
    assert!(cancelled.solutions.len() <= complete.solutions.len());
    assert_eq!(
        cancelled.solutions,
        complete.solutions[..cancelled.solutions.len()]
    );

    let dir = TempDir::new().unwrap();
    let output = results_path(dir.path(), 3);
    let written = write_solutions(&output, cancelled.solutions).unwrap();
    let saved: Vec<Value> = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(saved.len(), written);
}

#[test]
fn test_generous_time_limit_completes() {
    let (catalog, thresholds) = random_catalog(8, 10, 5, 2);
    let limited = SearchConfig::builder()
        .group_size(3)
        .min_active_traits(1)
        .time_limit(Duration::from_secs(600))
        .build();
    let unlimited = SearchConfig::builder()
        .group_size(3)
        .min_active_traits(1)
        .build();
    let a = find_valid_groups(&catalog, &thresholds, &limited).unwrap();
    let b = find_valid_groups(&catalog, &thresholds, &unlimited).unwrap();
    assert!(a.is_complete());
    assert_eq!(a.solutions, b.solutions);
}
