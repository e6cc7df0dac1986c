// SPDX-License-Identifier: Apache-2.0
// Copyright © 2025 Au-Zone Technologies. All Rights Reserved.

//! Standalone COCO check report.

use super::types::{CocoImage, CocoSummary};
use serde::Serialize;
use std::{collections::BTreeSet, fmt};

/// Annotation count of a single COCO image id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CocoImageCount {
    pub image_id: u64,
    /// `None` when annotations reference an id that `images` never declares.
    pub file_name: Option<String>,
    pub count: usize,
}

/// Result of checking a single COCO export.
#[derive(Debug, Clone, Serialize)]
pub struct CocoCheck {
    /// Images without annotations, in document order.
    pub unannotated: Vec<CocoImage>,
    /// Counts for every declared or referenced image id, ascending by id.
    pub counts: Vec<CocoImageCount>,
    /// Total number of annotations.
    pub total_annotations: usize,
}

impl CocoCheck {
    pub fn from_summary(summary: &CocoSummary) -> Self {
        let ids: BTreeSet<u64> = summary
            .id_to_filename
            .keys()
            .copied()
            .chain(summary.counts.sorted().into_iter().map(|(id, _)| id))
            .collect();

        let counts = ids
            .into_iter()
            .map(|image_id| CocoImageCount {
                image_id,
                file_name: summary.id_to_filename.get(&image_id).cloned(),
                count: summary.counts.get(image_id),
            })
            .collect();

        Self {
            unannotated: summary.unannotated.clone(),
            counts,
            total_annotations: summary.total(),
        }
    }
}

impl fmt::Display for CocoCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unannotated.is_empty() {
            writeln!(f, "All images have annotations.")?;
        } else {
            writeln!(f, "Images without annotations:")?;
            for image in &self.unannotated {
                writeln!(f, "ID: {}, Filename: {}", image.id, image.file_name)?;
            }
        }
        writeln!(
            f,
            "Total images without annotations: {}",
            self.unannotated.len()
        )?;

        writeln!(f)?;
        writeln!(f, "Annotation counts for each image:")?;
        for entry in &self.counts {
            writeln!(
                f,
                "Image ID: {}, Filename: {}, Annotation Count: {}",
                entry.image_id,
                entry.file_name.as_deref().unwrap_or("Unknown"),
                entry.count
            )?;
        }
        writeln!(f, "Total annotations: {}", self.total_annotations)
    }
}
