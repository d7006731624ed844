//! Integration tests for schedule loading using the on-disk fixture.

use std::path::Path;

use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use tax_core::calculations::TaxCalculator;
use tax_core::{ComparisonOutcome, ScheduleRegistry, TaxBracket};
use tax_data::ScheduleLoader;

const TEST_CSV: &str = include_str!("../test-data/regimes.csv");

fn fixture_path() -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("test-data")
        .join("regimes.csv")
}

fn loaded_registry() -> ScheduleRegistry {
    let records = ScheduleLoader::parse(TEST_CSV.as_bytes()).expect("Failed to parse CSV");
    let mut registry = ScheduleRegistry::new();
    ScheduleLoader::load(&mut registry, &records).expect("Failed to load schedules");
    registry
}

#[test]
fn test_load_all_fixture_schedules() {
    let registry = loaded_registry();

    assert_eq!(registry.available_schedules(), vec!["flat", "new", "old"]);
}

#[test]
fn test_load_from_path_matches_builtin_tables() {
    let schedules =
        ScheduleLoader::load_from_path(&fixture_path()).expect("Failed to load fixture");
    let builtin = ScheduleRegistry::builtin().unwrap();

    for name in ["old", "new"] {
        let loaded = schedules
            .iter()
            .find(|s| s.name() == name)
            .expect("schedule missing from fixture");

        assert_eq!(loaded, builtin.get(name).unwrap());
    }
}

#[test]
fn test_loaded_flat_schedule() {
    let registry = loaded_registry();
    let flat = registry.get("flat").unwrap();

    assert_eq!(flat.standard_deduction(), dec!(25000));
    assert_eq!(flat.brackets(), &[TaxBracket::unbounded(dec!(0.15))]);
}

#[test]
fn test_loaded_schedules_evaluate_worked_examples() {
    let registry = loaded_registry();
    let calculator = TaxCalculator::new(&registry);

    let old = calculator.calculate(dec!(750000), "old").unwrap();
    let new = calculator.calculate(dec!(1050000), "new").unwrap();
    let flat = calculator.calculate(dec!(125000), "flat").unwrap();

    assert_eq!(old.tax_due(), dec!(52500));
    assert_eq!(new.tax_due(), dec!(67500));
    // (125000 - 25000) * 0.15
    assert_eq!(flat.tax_due(), dec!(15000));
}

#[test]
fn test_csv_overrides_builtin_schedule() {
    let csv = "schedule,max_income,rate,standard_deduction\nold,,0.10,0\n";
    let records = ScheduleLoader::parse(csv.as_bytes()).unwrap();
    let mut registry = ScheduleRegistry::builtin().unwrap();

    ScheduleLoader::load(&mut registry, &records).unwrap();
    let calculator = TaxCalculator::new(&registry);
    let comparison = calculator
        .compare_regimes(dec!(750000), "old", "new")
        .unwrap();

    assert_eq!(registry.len(), 2);
    assert_eq!(comparison.first.tax_due(), dec!(75000));
    assert_eq!(
        comparison.outcome,
        ComparisonOutcome::SecondCheaper {
            savings: dec!(45000)
        }
    );
}
