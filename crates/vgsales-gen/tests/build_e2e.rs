use std::fs;
use std::path::{Path, PathBuf};

use vgsales_gen::build::{run_build, BuildRequest};
use vgsales_gen::config::GeneratorConfig;
use vgsales_gen::results::BuildReport;
use vgsales_gen::store::{SalesStore, StoreTable};
use vgsales_gen::verify::verify_store;

const CATALOG: &str = "\
Rank,Name,Platform,Year,Genre,Publisher,NA_Sales,EU_Sales,JP_Sales,Other_Sales,Global_Sales
1,Wii Sports,Wii,2006,Sports,Nintendo,41.49,29.02,3.77,8.46,82.74
2,Super Mario Bros.,NES,1985,Platform,Nintendo,29.08,3.58,6.81,0.77,40.24
3,Final Fantasy VII,PS,1997,Role-Playing,Sony Computer Entertainment,3.01,2.47,3.28,0.96,9.72
4,Dragon Quest IX,DS,2009,Role-Playing,Square Enix,0.00,0.00,4.35,0.00,4.35
5,Call of Duty: Black Ops,X360,2010,Shooter,Activision,9.70,3.68,0.11,1.13,14.61
6,Grand Theft Auto V,PS3,2013,Action,Take-Two Interactive,7.01,9.27,0.00,4.14,21.40
7,Monster Hunter Freedom Unite,PSP,2009,Role-Playing,Capcom,0.00,0.00,4.87,0.00,4.87
8,Unsold Oddity,PC,2004,Misc,Unknown,0.00,0.00,0.00,0.00,0.00
";

fn write_catalog(dir: &Path) -> PathBuf {
    let path = dir.join("vgsales.csv");
    fs::write(&path, CATALOG).expect("write catalog");
    path
}

fn request(input: PathBuf, database: PathBuf, seed: u64) -> BuildRequest {
    BuildRequest {
        input,
        database,
        config: GeneratorConfig {
            seed: Some(seed),
            ..GeneratorConfig::default()
        },
    }
}

#[test]
fn build_then_verify_round_trip() {
    let temp = tempfile::tempdir().expect("tempdir");
    let input = write_catalog(temp.path());
    let database = temp.path().join("out").join("sales.db");

    let report = run_build(&request(input, database.clone(), 42)).expect("build");
    assert_eq!(report.seed, 42);
    assert_eq!(report.first_month, "2023-01");
    assert_eq!(report.last_month, "2025-12");
    assert_eq!(report.months, 36);
    assert_eq!(report.counts.seed_rows, 8);
    assert_eq!(report.counts.skipped_rows, 1);
    assert_eq!(report.counts.titles, 8);
    assert_eq!(report.counts.platforms, 8);
    assert_eq!(report.input_sha256.len(), 64);
    assert!(report.totals.lifetime.rows > 0);
    assert!(report.totals.monthly.rows > 0);
    assert!(report.totals.monthly.units <= report.totals.lifetime.units);

    let store = SalesStore::open_read_only(&database).expect("open");
    assert_eq!(store.count_rows(StoreTable::Region).expect("count"), 8);
    assert_eq!(store.count_rows(StoreTable::Game).expect("count"), 8);
    let violations = verify_store(&store).expect("verify");
    assert!(violations.is_empty(), "violations: {violations:?}");

    let months = store.distinct_year_months().expect("months");
    assert!(months.iter().all(|m| m.as_str() >= "2023-01" && m.as_str() <= "2025-12"));
}

#[test]
fn rebuild_replaces_the_previous_store() {
    let temp = tempfile::tempdir().expect("tempdir");
    let input = write_catalog(temp.path());
    let database = temp.path().join("sales.db");

    let first = run_build(&request(input.clone(), database.clone(), 7)).expect("first build");
    let second = run_build(&request(input, database.clone(), 7)).expect("second build");
    assert_eq!(first.totals, second.totals);

    let store = SalesStore::open_read_only(&database).expect("open");
    assert_eq!(store.count_rows(StoreTable::Region).expect("count"), 8);
    assert_eq!(
        store.count_rows(StoreTable::Sale).expect("count"),
        second.totals.lifetime.rows
    );
}

#[test]
fn custom_window_is_respected() {
    let temp = tempfile::tempdir().expect("tempdir");
    let input = write_catalog(temp.path());
    let database = temp.path().join("sales.db");
    let mut request = request(input, database.clone(), 3);
    request.config.start_month = "2024-11".parse().expect("month");
    request.config.months = 4;

    let report = run_build(&request).expect("build");
    assert_eq!(report.first_month, "2024-11");
    assert_eq!(report.last_month, "2025-02");

    let store = SalesStore::open_read_only(&database).expect("open");
    let total = store
        .monthly_units_between("2024-11", "2025-02")
        .expect("range");
    assert_eq!(total, report.totals.monthly.units);
    assert_eq!(
        store
            .monthly_units_between("2030-01", "2030-12")
            .expect("empty range"),
        0
    );
}

#[test]
fn malformed_catalog_leaves_no_partial_facts() {
    let temp = tempfile::tempdir().expect("tempdir");
    let input = temp.path().join("bad.csv");
    fs::write(
        &input,
        "Name,Platform,Year,Genre,Publisher,JP_Sales,Global_Sales\n\
         Good,Wii,2006,Sports,Nintendo,1.0,2.0\n\
         Bad,Wii,unknown,Sports,Nintendo,1.0,2.0\n",
    )
    .expect("write catalog");
    let database = temp.path().join("sales.db");

    let err = run_build(&request(input, database.clone(), 1)).expect_err("bad year");
    assert!(err.to_string().contains("Year"), "unexpected error: {err}");
    assert!(!database.exists());
}

#[test]
fn missing_catalog_fails_before_touching_the_store() {
    let temp = tempfile::tempdir().expect("tempdir");
    let database = temp.path().join("sales.db");
    let err = run_build(&request(temp.path().join("absent.csv"), database.clone(), 1))
        .expect_err("missing input");
    assert!(err.to_string().contains("seed catalog not found"));
    assert!(!database.exists());
}

#[test]
fn verify_rejects_missing_database() {
    let temp = tempfile::tempdir().expect("tempdir");
    assert!(SalesStore::open_read_only(&temp.path().join("none.db")).is_err());
}

#[test]
fn report_serializes_to_json() {
    let temp = tempfile::tempdir().expect("tempdir");
    let input = write_catalog(temp.path());
    let report = run_build(&request(input, temp.path().join("sales.db"), 5)).expect("build");

    let path = temp.path().join("reports").join("run.json");
    report.write_json(&path).expect("write report");
    let parsed: BuildReport =
        serde_json::from_slice(&fs::read(&path).expect("read report")).expect("parse report");
    assert_eq!(parsed.seed, report.seed);
    assert_eq!(parsed.counts, report.counts);
    assert_eq!(parsed.totals, report.totals);
    assert_eq!(parsed.input_sha256, report.input_sha256);
}
