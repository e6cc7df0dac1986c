// SPDX-License-Identifier: Apache-2.0
// Copyright © 2025 Au-Zone Technologies. All Rights Reserved.

//! COCO document types and the normalized per-image annotation view.
//!
//! Only the fields needed to count annotations per image are modelled; every
//! other COCO field (bbox, segmentation, categories, ...) is ignored while
//! parsing.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// A COCO export reduced to the fields this crate reconciles.
///
/// Both `images` and `annotations` are required, matching the structure
/// produced by COCO exporters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CocoDataset {
    /// Declared images.
    pub images: Vec<CocoImage>,
    /// Annotations referencing images by `image_id`.
    pub annotations: Vec<CocoAnnotation>,
}

/// Image metadata entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CocoImage {
    /// Image id referenced by annotations.
    pub id: u64,
    /// Image filename, the join key against VIA exports.
    pub file_name: String,
}

/// Annotation entry; only its image reference matters here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CocoAnnotation {
    /// Annotation id, when the export provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Referenced image id.
    pub image_id: u64,
}

/// Annotation counts keyed by COCO image id.
///
/// Only ids that at least one annotation references are stored. Every other
/// id reads as zero through [`CocoCounts::get`], so an image without
/// annotations is never an explicit entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CocoCounts(HashMap<u64, usize>);

impl CocoCounts {
    /// Count one more annotation for `image_id`.
    pub fn increment(&mut self, image_id: u64) {
        *self.0.entry(image_id).or_default() += 1;
    }

    /// Annotation count for `image_id`, zero when nothing references it.
    pub fn get(&self, image_id: u64) -> usize {
        self.0.get(&image_id).copied().unwrap_or(0)
    }

    /// True if at least one annotation references `image_id`.
    pub fn contains(&self, image_id: u64) -> bool {
        self.0.contains_key(&image_id)
    }

    /// Number of distinct referenced image ids.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    /// Referenced image ids with their counts, ascending by id.
    pub fn sorted(&self) -> Vec<(u64, usize)> {
        let mut entries: Vec<_> = self.0.iter().map(|(id, count)| (*id, *count)).collect();
        entries.sort_unstable();
        entries
    }
}

/// Normalized view of a COCO export.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CocoSummary {
    /// Images with no annotations, in document order.
    pub unannotated: Vec<CocoImage>,
    /// Annotation counts by image id.
    pub counts: CocoCounts,
    /// `image_id` → `file_name`; on a repeated id the later image wins.
    pub id_to_filename: BTreeMap<u64, String>,
}

impl CocoSummary {
    /// Build the normalized view from a parsed dataset.
    pub fn from_dataset(dataset: &CocoDataset) -> Self {
        let id_to_filename: BTreeMap<_, _> = dataset
            .images
            .iter()
            .map(|img| (img.id, img.file_name.clone()))
            .collect();

        let mut counts = CocoCounts::default();
        for ann in &dataset.annotations {
            counts.increment(ann.image_id);
        }

        let unannotated = dataset
            .images
            .iter()
            .filter(|img| !counts.contains(img.id))
            .cloned()
            .collect();

        Self {
            unannotated,
            counts,
            id_to_filename,
        }
    }

    /// Image ids counted by annotations but never declared in `images`.
    pub fn dangling_ids(&self) -> Vec<u64> {
        self.counts
            .sorted()
            .into_iter()
            .map(|(id, _)| id)
            .filter(|id| !self.id_to_filename.contains_key(id))
            .collect()
    }

    /// Total number of annotations.
    pub fn total(&self) -> usize {
        self.counts.total()
    }
}
