// SPDX-License-Identifier: Apache-2.0
// Copyright © 2025 Au-Zone Technologies. All Rights Reserved.

//! VIA (VGG Image Annotator) project types and the normalized per-file view.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::{collections::HashMap, path::PathBuf};

/// Raw VIA project document.
///
/// Only `_via_img_metadata` is required. Entries are kept as raw JSON so each
/// one can be validated individually and reported by its file id.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ViaProject {
    #[serde(rename = "_via_img_metadata")]
    pub img_metadata: Map<String, Value>,
}

/// Region list of a file entry.
///
/// VIA 2 writes regions as an array; VIA 1 projects store them as an object
/// keyed by region index. Region geometry is not interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ViaRegions {
    List(Vec<Value>),
    Keyed(Map<String, Value>),
}

impl ViaRegions {
    pub fn len(&self) -> usize {
        match self {
            ViaRegions::List(regions) => regions.len(),
            ViaRegions::Keyed(regions) => regions.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ViaRegions {
    fn default() -> Self {
        ViaRegions::List(Vec::new())
    }
}

/// A file entry of `_via_img_metadata`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViaFile {
    /// Metadata key of the entry (conventionally filename + size).
    #[serde(skip)]
    pub file_id: String,
    /// Image filename, the join key against COCO exports.
    pub filename: String,
    /// Annotated regions; the length is the entry's annotation count.
    pub regions: ViaRegions,
}

/// A validated VIA project: file entries in document order.
#[derive(Debug, Clone, Default)]
pub struct ViaDataset {
    /// Path the project was read from; empty for in-memory datasets.
    pub source: PathBuf,
    files: Vec<ViaFile>,
    index: HashMap<String, usize>,
}

impl ViaDataset {
    pub fn new(files: Vec<ViaFile>) -> Self {
        let index = files
            .iter()
            .enumerate()
            .map(|(pos, file)| (file.file_id.clone(), pos))
            .collect();
        Self {
            source: PathBuf::new(),
            files,
            index,
        }
    }

    /// Attach the path the project was read from.
    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source = source.into();
        self
    }

    /// File entries in document order.
    pub fn files(&self) -> &[ViaFile] {
        &self.files
    }

    /// Look up a file entry by its metadata key.
    pub fn file(&self, file_id: &str) -> Option<&ViaFile> {
        self.index
            .get(file_id)
            .and_then(|&pos| self.files.get(pos))
            .filter(|file| file.file_id == file_id)
    }

    /// Resolve a metadata key to its filename.
    pub fn filename(&self, file_id: &str) -> Option<&str> {
        self.file(file_id).map(|file| file.filename.as_str())
    }
}

/// Region counts keyed by VIA file id, in document order.
///
/// Every file entry has an explicit count, including zero. A missing key
/// means the file id is unknown, not that it has no regions, so
/// [`ViaCounts::get`] returns an `Option`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViaCounts {
    entries: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl ViaCounts {
    /// Record the count for `file_id`, replacing any earlier value.
    pub fn insert(&mut self, file_id: impl Into<String>, count: usize) {
        let file_id = file_id.into();
        match self.index.get(&file_id) {
            Some(&pos) => self.entries[pos].1 = count,
            None => {
                self.index.insert(file_id.clone(), self.entries.len());
                self.entries.push((file_id, count));
            }
        }
    }

    /// Region count for `file_id`, `None` if the id is unknown.
    pub fn get(&self, file_id: &str) -> Option<usize> {
        self.index.get(file_id).map(|&pos| self.entries[pos].1)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(id, count)| (id.as_str(), *count))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }
}

/// Normalized view of a VIA project.
#[derive(Debug, Clone, Default)]
pub struct ViaSummary {
    /// File ids with exactly zero regions, in document order.
    pub unannotated: Vec<String>,
    /// Region counts by file id.
    pub counts: ViaCounts,
}

impl ViaSummary {
    pub fn from_dataset(dataset: &ViaDataset) -> Self {
        let mut counts = ViaCounts::default();
        for file in dataset.files() {
            counts.insert(file.file_id.clone(), file.regions.len());
        }

        let unannotated = counts
            .iter()
            .filter(|(_, count)| *count == 0)
            .map(|(id, _)| id.to_string())
            .collect();

        Self {
            unannotated,
            counts,
        }
    }

    /// Total number of regions.
    pub fn total(&self) -> usize {
        self.counts.total()
    }
}
