use super::loader::{load_table, read_table, FeatureTable};
use super::schema::{missing_columns, normalize_identifier, validate};
use crate::logic::config::GateConfig;
use crate::logic::error::GateError;
use std::fs;
use tempfile::tempdir;

const VALID_CSV: &str = "\
firmware_version,code_churn_score,previous_version_error_rate,avg_device_age_days,is_hotfix,patch_security
v1.0.0,0.1,0.02,100,0,1
v1.0.1,0.5,0.05,200,1,0
v1.0.2,0.9,0.15,50,0,1
";

fn table(csv: &str) -> FeatureTable {
    read_table(csv.as_bytes()).unwrap()
}

#[test]
fn test_load_preserves_order_and_columns() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("features.csv");
    fs::write(&path, VALID_CSV).unwrap();

    let t = load_table(&path).unwrap();
    assert_eq!(t.len(), 3);
    assert_eq!(t.headers()[0], "firmware_version");
    assert_eq!(t.cell(0, "firmware_version"), Some("v1.0.0"));
    assert_eq!(t.cell(2, "firmware_version"), Some("v1.0.2"));
    assert_eq!(t.cell(1, "avg_device_age_days"), Some("200"));
}

#[test]
fn test_missing_file_is_not_found() {
    let dir = tempdir().unwrap();
    let err = load_table(&dir.path().join("nonexistent_file.csv")).unwrap_err();
    assert!(matches!(err, GateError::NotFound { .. }));
}

#[test]
fn test_directory_is_not_found() {
    let dir = tempdir().unwrap();
    let err = load_table(dir.path()).unwrap_err();
    assert!(matches!(err, GateError::NotFound { .. }));
}

#[test]
fn test_ragged_rows_are_malformed() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ragged.csv");
    fs::write(&path, "a,b,c\n1,2\n").unwrap();

    let err = load_table(&path).unwrap_err();
    assert!(matches!(err, GateError::Malformed { .. }));
}

#[test]
fn test_header_only_table_is_empty() {
    let t = table("firmware_version,code_churn_score\n");
    assert!(t.is_empty());
    assert_eq!(t.headers().len(), 2);
}

#[test]
fn test_valid_table_passes() {
    let mut t = table(VALID_CSV);
    let before = t.clone();
    validate(&mut t, &GateConfig::default()).unwrap();
    assert_eq!(t, before);
}

#[test]
fn test_missing_column_named() {
    let mut t = table(
        "firmware_version,previous_version_error_rate,avg_device_age_days,is_hotfix,patch_security\n\
         v1,0.02,100,0,1\n",
    );
    match validate(&mut t, &GateConfig::default()) {
        Err(GateError::InvalidSchema { missing }) => {
            assert_eq!(missing, vec!["code_churn_score".to_string()]);
        }
        other => panic!("expected InvalidSchema, got {:?}", other),
    }
}

#[test]
fn test_every_missing_column_named() {
    let mut t = table("version,code_churn_score,extra\nv1,0.1,x\n");
    match validate(&mut t, &GateConfig::default()) {
        Err(GateError::InvalidSchema { missing }) => {
            assert_eq!(
                missing,
                vec![
                    "previous_version_error_rate".to_string(),
                    "avg_device_age_days".to_string(),
                    "is_hotfix".to_string(),
                    "patch_security".to_string(),
                ]
            );
        }
        other => panic!("expected InvalidSchema, got {:?}", other),
    }
}

#[test]
fn test_version_alias_renamed() {
    let mut t = table(&VALID_CSV.replacen("firmware_version", "version", 1));
    validate(&mut t, &GateConfig::default()).unwrap();

    assert!(t.has_column("firmware_version"));
    assert!(!t.has_column("version"));
    assert_eq!(t.cell(0, "firmware_version"), Some("v1.0.0"));
    // Only the header changed
    assert_eq!(t.headers().len(), 6);
    assert_eq!(t.rows(), table(VALID_CSV).rows());
}

#[test]
fn test_alias_ignored_when_canonical_present() {
    let csv = "firmware_version,version,code_churn_score\nv1,old,0.1\n";
    let mut t = table(csv);
    let renamed = normalize_identifier(&mut t, &GateConfig::default());

    assert_eq!(renamed, None);
    assert_eq!(t, table(csv));
}

#[test]
fn test_normalization_idempotent() {
    let config = GateConfig::default();
    let mut t = table(&VALID_CSV.replacen("firmware_version", "version", 1));

    assert_eq!(normalize_identifier(&mut t, &config), Some("version".to_string()));
    let once = t.clone();
    assert_eq!(normalize_identifier(&mut t, &config), None);
    assert_eq!(t, once);
}

#[test]
fn test_missing_identifier_without_alias() {
    let csv = VALID_CSV.replacen("firmware_version", "release", 1);
    let mut t = table(&csv);
    let err = validate(&mut t, &GateConfig::default()).unwrap_err();
    assert!(err.to_string().contains("firmware_version"));
    assert_eq!(missing_columns(&t, &GateConfig::default().required_columns()).len(), 1);
}

#[test]
fn test_empty_file_names_all_columns() {
    let mut t = table("");
    match validate(&mut t, &GateConfig::default()) {
        Err(GateError::InvalidSchema { missing }) => assert_eq!(missing.len(), 6),
        other => panic!("expected InvalidSchema, got {:?}", other),
    }
}
