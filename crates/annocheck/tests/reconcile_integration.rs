// SPDX-License-Identifier: Apache-2.0
// Copyright © 2025 Au-Zone Technologies. All Rights Reserved.

//! End-to-end reconciliation of COCO and VIA exports written to disk.

use annocheck::{
    Category, Comparison, ComparisonRow, ComparisonTable, Error, Settings, compare_files,
    via::{ViaCheck, ViaReader, ViaSummary},
};
use serde_json::{Value, json};
use std::path::PathBuf;
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, value: &Value) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, serde_json::to_vec_pretty(value).unwrap()).unwrap();
    path
}

fn regions(n: usize) -> Value {
    let region = json!({
        "shape_attributes": {"name": "rect", "x": 1, "y": 2, "width": 3, "height": 4},
        "region_attributes": {"label": "person"}
    });
    Value::Array(vec![region; n])
}

/// Four images: one match, one deficit, one only in VIA, one empty on both sides.
fn fixtures(dir: &TempDir) -> (PathBuf, PathBuf) {
    let coco = write(
        dir,
        "coco.json",
        &json!({
            "images": [
                {"id": 2, "file_name": "b.jpg"},
                {"id": 1, "file_name": "a.jpg"},
                {"id": 3, "file_name": "d.jpg"}
            ],
            "annotations": [
                {"id": 1, "image_id": 1},
                {"id": 2, "image_id": 1},
                {"id": 3, "image_id": 2},
                {"id": 4, "image_id": 2},
                {"id": 5, "image_id": 2}
            ]
        }),
    );
    let via = write(
        dir,
        "via.json",
        &json!({
            "_via_settings": {},
            "_via_img_metadata": {
                "a.jpg1": {"filename": "a.jpg", "size": 1, "regions": regions(2), "file_attributes": {}},
                "b.jpg2": {"filename": "b.jpg", "size": 2, "regions": regions(1), "file_attributes": {}},
                "c.jpg3": {"filename": "c.jpg", "size": 3, "regions": regions(3), "file_attributes": {}},
                "d.jpg4": {"filename": "d.jpg", "size": 4, "regions": [], "file_attributes": {}}
            }
        }),
    );
    (via, coco)
}

#[test]
fn test_compare_files() {
    let temp_dir = TempDir::new().unwrap();
    let (via, coco) = fixtures(&temp_dir);

    let comparison = compare_files(&via, &coco, &Settings::default()).unwrap();
    assert_eq!(
        comparison.rows,
        vec![
            ComparisonRow::new("a.jpg", Some(1), 2, 2),
            ComparisonRow::new("b.jpg", Some(2), 1, 3),
            ComparisonRow::new("d.jpg", Some(3), 0, 0),
            ComparisonRow::new("c.jpg", None, 3, 0),
        ]
    );

    let categories: Vec<_> = comparison.rows.iter().map(|r| r.category).collect();
    assert_eq!(
        categories,
        vec![
            Category::Match,
            Category::Deficit,
            Category::Zero,
            Category::Mismatch
        ]
    );

    assert_eq!(comparison.total_coco_annotations, 5);
    assert_eq!(comparison.total_vgg_annotations, 6);
    assert_eq!(comparison.total_difference(), 1);
}

#[test]
fn test_compare_files_is_deterministic() {
    let temp_dir = TempDir::new().unwrap();
    let (via, coco) = fixtures(&temp_dir);

    let first = compare_files(&via, &coco, &Settings::default()).unwrap();
    let second = compare_files(&via, &coco, &Settings::default()).unwrap();
    assert_eq!(first.rows, second.rows);

    let render = |c: &Comparison| ComparisonTable::new(c).with_color(false).to_string();
    assert_eq!(render(&first), render(&second));
}

#[test]
fn test_compare_files_table() {
    let temp_dir = TempDir::new().unwrap();
    let (via, coco) = fixtures(&temp_dir);

    let comparison = compare_files(&via, &coco, &Settings::default()).unwrap();
    let text = ComparisonTable::new(&comparison)
        .with_placeholder("N/A")
        .with_color(false)
        .to_string();

    assert!(text.contains("| c.jpg |   N/A   |"));
    assert!(text.contains("| Total |"));
}

#[test]
fn test_compare_files_serializes() {
    let temp_dir = TempDir::new().unwrap();
    let (via, coco) = fixtures(&temp_dir);

    let comparison = compare_files(&via, &coco, &Settings::default()).unwrap();
    let value = serde_json::to_value(&comparison).unwrap();

    assert_eq!(value["rows"][3]["coco_id"], Value::Null);
    assert_eq!(value["rows"][3]["category"], "mismatch");
    assert_eq!(value["rows"][1]["category"], "deficit");
    assert_eq!(value["total_vgg_annotations"], 6);
}

#[test]
fn test_via_check_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let (via, _) = fixtures(&temp_dir);

    let dataset = ViaReader::new().read_json(&via).unwrap();
    let summary = ViaSummary::from_dataset(&dataset);
    assert_eq!(summary.unannotated, vec!["d.jpg4".to_string()]);
    assert_eq!(summary.total(), 6);

    let check = ViaCheck::from_summary(&dataset, &summary);
    assert!(check.to_string().contains("ID: d.jpg4, Filename: d.jpg"));
}

#[test]
fn test_missing_coco_file() {
    let temp_dir = TempDir::new().unwrap();
    let (via, _) = fixtures(&temp_dir);
    let coco = temp_dir.path().join("absent.json");

    match compare_files(&via, &coco, &Settings::default()) {
        Err(Error::IoError(path, _)) => assert_eq!(path, coco),
        other => panic!("expected I/O error, got {:?}", other),
    }
}

#[test]
fn test_malformed_via_file() {
    let temp_dir = TempDir::new().unwrap();
    let (_, coco) = fixtures(&temp_dir);
    let via = write(
        &temp_dir,
        "bad.json",
        &json!({"_via_img_metadata": {"x": {"filename": "x.jpg"}}}),
    );

    let err = compare_files(&via, &coco, &Settings::default()).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("bad.json"));
    assert!(msg.contains("regions"));
}
