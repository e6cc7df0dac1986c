// SPDX-License-Identifier: Apache-2.0
// Copyright © 2025 Au-Zone Technologies. All Rights Reserved.

//! File-level tests for COCO loading and checking.

#[cfg(test)]
mod integration_tests {
    use super::super::*;
    use serde_json::json;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, value: &serde_json::Value) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, serde_json::to_vec_pretty(value).unwrap()).unwrap();
        path
    }

    #[test]
    fn test_coco_file_to_check() {
        let temp_dir = TempDir::new().unwrap();
        let path = write(
            &temp_dir,
            "instances.json",
            &json!({
                "info": {"year": 2025, "version": "1.0"},
                "licenses": [],
                "categories": [{"id": 1, "name": "person", "supercategory": "human"}],
                "images": [
                    {"id": 1, "file_name": "image_001.jpg", "width": 640, "height": 480},
                    {"id": 2, "file_name": "image_002.jpg", "width": 800, "height": 600},
                    {"id": 3, "file_name": "image_003.jpg", "width": 800, "height": 600}
                ],
                "annotations": [
                    {"id": 1, "image_id": 1, "category_id": 1, "bbox": [100.0, 50.0, 200.0, 300.0],
                     "area": 60000.0, "iscrowd": 0,
                     "segmentation": [[100.0, 50.0, 300.0, 50.0, 300.0, 350.0]]},
                    {"id": 2, "image_id": 1, "category_id": 1, "bbox": [1.0, 2.0, 3.0, 4.0]},
                    {"id": 3, "image_id": 3, "category_id": 1, "bbox": [1.0, 2.0, 3.0, 4.0],
                     "segmentation": {"counts": [10, 20], "size": [100, 200]}, "iscrowd": 1}
                ]
            }),
        );

        let dataset = CocoReader::new().read_json(&path).unwrap();
        let summary = CocoSummary::from_dataset(&dataset);

        assert_eq!(summary.total(), dataset.annotations.len());
        assert_eq!(summary.unannotated.len(), 1);
        assert_eq!(summary.unannotated[0].file_name, "image_002.jpg");
        assert_eq!(summary.counts.get(1), 2);
        assert_eq!(summary.counts.get(2), 0);

        let check = CocoCheck::from_summary(&summary);
        let counts: Vec<_> = check.counts.iter().map(|c| (c.image_id, c.count)).collect();
        assert_eq!(counts, vec![(1, 2), (2, 0), (3, 1)]);

        let text = check.to_string();
        assert!(text.contains("ID: 2, Filename: image_002.jpg"));
        assert!(text.contains("Total annotations: 3"));
    }

    #[test]
    fn test_coco_check_serializes() {
        let summary = CocoSummary::from_dataset(&CocoDataset {
            images: vec![CocoImage {
                id: 5,
                file_name: "e.jpg".to_string(),
            }],
            annotations: vec![],
        });

        let value = serde_json::to_value(CocoCheck::from_summary(&summary)).unwrap();
        assert_eq!(
            value,
            json!({
                "unannotated": [{"id": 5, "file_name": "e.jpg"}],
                "counts": [{"image_id": 5, "file_name": "e.jpg", "count": 0}],
                "total_annotations": 0
            })
        );
    }

    #[test]
    fn test_empty_coco_document() {
        let temp_dir = TempDir::new().unwrap();
        let path = write(&temp_dir, "empty.json", &json!({"images": [], "annotations": []}));

        let summary = CocoSummary::from_dataset(&CocoReader::new().read_json(&path).unwrap());
        assert!(summary.unannotated.is_empty());
        assert!(summary.counts.is_empty());
        assert_eq!(summary.total(), 0);
    }
}
