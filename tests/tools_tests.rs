//! Integration tests for the helper modules
//!
//! Each test chains several helpers the way calling code would.

use std::collections::HashMap;
use utilkit::tools::conv::{parse_bool, parse_f64, parse_int};
use utilkit::tools::json::{load_json_file_and_extract_sub_map, load_json_file_to_struct};
use utilkit::tools::maps::{self, FilterCondition, MergeStrategy};
use utilkit::tools::math::{round_f64, split_float, SplitFloat, SplitMode};
use utilkit::tools::slices::{self, SortOrder};
use utilkit::tools::time_date::{days_between, format_time, FORMAT_DATE_ONLY};
use utilkit::{Error, Value};

#[test]
fn test_coerce_json_values() {
    let raw: serde_json::Value = serde_json::json!({
        "retries": "3",
        "ratio": 0.75,
        "enabled": "yes"
    });
    let value = Value::from(raw);
    let fields = value.as_object().unwrap();

    assert_eq!(parse_int(&fields["retries"]).unwrap(), 3);
    assert_eq!(parse_f64(&fields["ratio"]).unwrap(), 0.75);
    assert!(parse_bool(&fields["enabled"]).unwrap());
}

#[test]
fn test_json_file_loading() {
    #[derive(serde::Deserialize)]
    struct Limits {
        max: u32,
    }

    let path = std::env::temp_dir().join(format!("utilkit-it-{}.json", uuid::Uuid::new_v4()));
    std::fs::write(&path, r#"{"service": {"limits": {"max": 12}}}"#).unwrap();

    let limits = load_json_file_and_extract_sub_map(&path, &["service", "limits"]).unwrap();
    assert_eq!(limits["max"], serde_json::json!(12));

    #[derive(serde::Deserialize)]
    struct Root {
        service: Service,
    }
    #[derive(serde::Deserialize)]
    struct Service {
        limits: Limits,
    }
    let root: Root = load_json_file_to_struct(&path).unwrap();
    assert_eq!(root.service.limits.max, 12);

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_filter_merge_remove_pipeline() {
    let stock: HashMap<String, i64> = [("bolt", 40), ("nut", 5), ("washer", 0)]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    let incoming: HashMap<String, i64> = [("nut", 20), ("gear", 3)]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

    assert!(matches!(
        maps::merge(&stock, &incoming, &MergeStrategy::Reject),
        Err(Error::MergeConflict { .. })
    ));

    let merged = maps::merge(&stock, &incoming, &MergeStrategy::add_values()).unwrap();
    assert_eq!(merged["nut"], 25);

    let in_stock = maps::filter_by_value(&merged, FilterCondition::GreaterThan, &0).unwrap();
    assert_eq!(in_stock.len(), 3);

    let trimmed = maps::remove_by_keys(&in_stock, &["gear".to_string()], false).unwrap();
    let mut names = maps::keys(&trimmed);
    names.sort();
    assert_eq!(names, vec!["bolt", "nut"]);
}

#[test]
fn test_slice_summary() {
    let mut readings = vec![3.5, 1.25, 9.0, 1.25, 4.0];
    let distinct = slices::unique(&[1, 1, 2, 3, 3]);
    assert_eq!(distinct, vec![1, 2, 3]);

    slices::sort(&mut readings, SortOrder::Descending);
    assert_eq!(readings[0], 9.0);
    assert_eq!(slices::max(&readings).unwrap(), 9.0);
    assert_eq!(slices::min(&readings).unwrap(), 1.25);
    assert_eq!(round_f64(slices::average(&readings).unwrap(), 1), 3.8);

    let (last, rest) = slices::pop_from(&readings).unwrap();
    assert_eq!(last, 1.25);
    assert_eq!(rest.len(), 4);
}

#[test]
fn test_time_and_math() {
    use chrono::{TimeZone, Utc};

    let start = Utc.with_ymd_and_hms(2024, 2, 27, 8, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2024, 3, 2, 20, 0, 0).unwrap();
    assert_eq!(days_between(&end, &start), 4);
    assert_eq!(format_time(&end, FORMAT_DATE_ONLY).unwrap(), "2024-03-02");

    assert_eq!(split_float(12.5, SplitMode::IntInt), SplitFloat::IntInt(12, 500));
}
