use std::collections::BTreeSet;
use std::io::Write;

use bank_dashboard::data::export::{save_csv, save_parquet, to_csv_bytes};
use bank_dashboard::data::filter::{FilterCriteria, filter};
use bank_dashboard::data::loader::{LoadError, load_file};
use bank_dashboard::data::pipeline;
use bank_dashboard::data::summary::summarize;
use tempfile::{NamedTempFile, tempdir};

const BANK_CSV: &str = "\
\"age\";\"job\";\"marital\";\"education\";\"default\";\"duration\";\"y\"
56;\"housemaid\";\"married\";\"basic.4y\";\"no\";261;\"no\"
37;\"services\";\"married\";\"high.school\";\"no\";226;\"no\"
40;\"admin.\";\"married\";\"basic.6y\";\"no\";151;\"yes\"
24;\"technician\";\"single\";\"professional.course\";\"no\";380;\"yes\"
45;\"services\";\"married\";\"basic.9y\";\"unknown\";198;\"no\"
59;\"admin.\";\"married\";\"professional.course\";\"no\";139;\"no\"
29;\"admin.\";\"single\";\"university.degree\";\"no\";297;\"yes\"
";

fn bank_file() -> NamedTempFile {
    let mut tmp = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    write!(tmp, "{}", BANK_CSV).unwrap();
    tmp
}

fn jobs(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_load_filter_summarize() {
    let tmp = bank_file();
    let ds = load_file(tmp.path()).unwrap();
    assert_eq!(ds.len(), 7);
    assert_eq!(ds.age_range, Some((24, 59)));

    let crit = FilterCriteria::new(25, 45, jobs(&["admin.", "services"]));
    let out = pipeline::run(&ds, &crit);

    let ages: Vec<i64> = out.subset.iter().map(|r| r.age).collect();
    assert_eq!(ages, vec![37, 40, 45, 29]);
    assert_eq!(out.filtered.percent_of("yes"), Some(50.0));
    assert_eq!(out.filtered.percent_of("no"), Some(50.0));

    let sum: f64 = out.full.iter().map(|e| e.percent).sum();
    assert!((sum - 100.0).abs() < 1e-6);
}

#[test]
fn test_every_subset_is_exact_and_idempotent() {
    let tmp = bank_file();
    let ds = load_file(tmp.path()).unwrap();
    let all_jobs: Vec<&String> = ds.jobs.iter().collect();

    for lo in (20..=60).step_by(5) {
        for hi in (lo..=60).step_by(7) {
            for mask in 0u32..(1 << all_jobs.len()) {
                let selected: BTreeSet<String> = all_jobs
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| mask & (1 << i) != 0)
                    .map(|(_, j)| (*j).clone())
                    .collect();
                let crit = FilterCriteria::new(lo, hi, selected);
                let subset = filter(&ds.records, &crit);

                let expected: Vec<_> = ds
                    .records
                    .iter()
                    .filter(|r| r.age >= lo && r.age <= hi && crit.jobs.contains(&r.job))
                    .cloned()
                    .collect();
                assert_eq!(subset, expected);
                assert_eq!(filter(&subset, &crit), subset);

                let summary = summarize(&subset);
                if subset.is_empty() {
                    assert!(summary.is_empty());
                } else {
                    let sum: f64 = summary.iter().map(|e| e.percent).sum();
                    assert!((sum - 100.0).abs() < 1e-6);
                }
            }
        }
    }
}

#[test]
fn test_csv_export_round_trip_keeps_all_columns() {
    let tmp = bank_file();
    let ds = load_file(tmp.path()).unwrap();
    let crit = FilterCriteria::new(30, 60, jobs(&["admin.", "housemaid"]));
    let subset = filter(&ds.records, &crit);
    assert_eq!(subset.len(), 3);

    let dir = tempdir().unwrap();
    let out_path = dir.path().join("bank_filtered.csv");
    save_csv(&out_path, &ds.headers, &subset).unwrap();

    let back = load_file(&out_path).unwrap();
    assert_eq!(back.headers, ds.headers);
    assert_eq!(back.records, subset);
    assert_eq!(back.records[0].cells[3], "basic.4y");

    let bytes = std::fs::read(&out_path).unwrap();
    assert_eq!(bytes, to_csv_bytes(&ds.headers, &subset).unwrap());
}

#[test]
fn test_parquet_export_round_trip() {
    let tmp = bank_file();
    let ds = load_file(tmp.path()).unwrap();

    let dir = tempdir().unwrap();
    let out_path = dir.path().join("bank_filtered.parquet");
    save_parquet(&out_path, &ds.headers, &ds.records).unwrap();

    let back = load_file(&out_path).unwrap();
    assert_eq!(back.headers, ds.headers);
    assert_eq!(back.records, ds.records);
}

#[test]
fn test_missing_source_is_reported() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bank-additional-full.csv");
    let err = load_file(&path).unwrap_err();
    assert!(matches!(err, LoadError::SourceNotFound(ref p) if p == &path));
    assert!(err.to_string().contains("not found"));
}

#[test]
fn test_unsupported_extension_is_malformed() {
    let mut tmp = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
    write!(tmp, "{}", BANK_CSV).unwrap();
    let err = load_file(tmp.path()).unwrap_err();
    assert!(matches!(err, LoadError::Malformed(_)));
}
