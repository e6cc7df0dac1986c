// SPDX-License-Identifier: Apache-2.0
// Copyright © 2025 Au-Zone Technologies. All Rights Reserved.

//! Standalone VIA check report.

use super::types::{ViaDataset, ViaSummary};
use serde::Serialize;
use std::fmt;

/// Region count of a single VIA file entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViaFileCount {
    pub file_id: String,
    pub filename: String,
    pub count: usize,
}

/// Result of checking a single VIA project.
#[derive(Debug, Clone, Serialize)]
pub struct ViaCheck {
    /// File entries without regions, in document order.
    pub unannotated: Vec<ViaFileCount>,
    /// Every file entry, in document order.
    pub counts: Vec<ViaFileCount>,
    /// Total number of regions.
    pub total_annotations: usize,
}

impl ViaCheck {
    pub fn from_summary(dataset: &ViaDataset, summary: &ViaSummary) -> Self {
        let entry = |file_id: &str, count: usize| ViaFileCount {
            file_id: file_id.to_string(),
            filename: dataset.filename(file_id).unwrap_or_default().to_string(),
            count,
        };

        Self {
            unannotated: summary
                .unannotated
                .iter()
                .map(|file_id| entry(file_id, 0))
                .collect(),
            counts: summary
                .counts
                .iter()
                .map(|(file_id, count)| entry(file_id, count))
                .collect(),
            total_annotations: summary.total(),
        }
    }
}

impl fmt::Display for ViaCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unannotated.is_empty() {
            writeln!(f, "All images have annotations.")?;
        } else {
            writeln!(f, "Images without annotations:")?;
            for file in &self.unannotated {
                writeln!(f, "ID: {}, Filename: {}", file.file_id, file.filename)?;
            }
        }
        writeln!(
            f,
            "Total images without annotations: {}",
            self.unannotated.len()
        )?;

        writeln!(f)?;
        writeln!(f, "Annotation counts for each image:")?;
        for file in &self.counts {
            writeln!(
                f,
                "Image ID: {}, Filename: {}, Annotation Count: {}",
                file.file_id, file.filename, file.count
            )?;
        }

        writeln!(f)?;
        writeln!(f, "Total annotations: {}", self.total_annotations)
    }
}
