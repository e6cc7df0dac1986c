// SPDX-License-Identifier: Apache-2.0
// Copyright © 2025 Au-Zone Technologies. All Rights Reserved.

//! COCO ↔ VIA reconciliation.
//!
//! Joins the normalized COCO and VIA views on filename and produces one
//! classified [`ComparisonRow`] per filename known to either export.
//!
//! Rows are ordered by COCO image id, rows without a COCO id last, ties broken
//! by filename, so the same inputs always produce the same ordered result.

use crate::{
    Error,
    coco::{CocoReader, CocoSummary},
    settings::{DuplicatePolicy, ReferencePolicy, Settings},
    via::{ViaDataset, ViaReader, ViaSummary},
};
use log::{debug, warn};
use serde::Serialize;
use std::{
    collections::{BTreeSet, HashMap},
    fmt,
    path::Path,
};

/// Classification of a comparison row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Neither export has an annotation for the image.
    Zero,
    /// Both exports agree on a non-zero count.
    Match,
    /// VIA recorded more regions than COCO annotations.
    Mismatch,
    /// VIA recorded fewer regions than COCO annotations.
    Deficit,
}

impl Category {
    pub fn classify(vgg_count: usize, coco_count: usize) -> Self {
        if vgg_count == 0 && coco_count == 0 {
            Category::Zero
        } else if vgg_count == coco_count {
            Category::Match
        } else if vgg_count > coco_count {
            Category::Mismatch
        } else {
            Category::Deficit
        }
    }

    /// True for rows where the two exports disagree.
    pub fn is_discrepancy(&self) -> bool {
        matches!(self, Category::Mismatch | Category::Deficit)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Category::Zero => "zero",
            Category::Match => "match",
            Category::Mismatch => "mismatch",
            Category::Deficit => "deficit",
        };
        write!(f, "{}", s)
    }
}

/// Per-filename comparison of the two exports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonRow {
    pub filename: String,
    /// COCO image id, `None` when COCO does not know the filename.
    pub coco_id: Option<u64>,
    pub vgg_count: usize,
    pub coco_count: usize,
    /// `vgg_count - coco_count`.
    pub difference: i64,
    pub category: Category,
}

impl ComparisonRow {
    pub fn new(
        filename: impl Into<String>,
        coco_id: Option<u64>,
        vgg_count: usize,
        coco_count: usize,
    ) -> Self {
        Self {
            filename: filename.into(),
            coco_id,
            vgg_count,
            coco_count,
            difference: vgg_count as i64 - coco_count as i64,
            category: Category::classify(vgg_count, coco_count),
        }
    }

    /// COCO id as display text, `placeholder` when absent.
    pub fn coco_id_display(&self, placeholder: &str) -> String {
        self.coco_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| placeholder.to_string())
    }
}

/// Export a key or filename belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Coco,
    Via,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Coco => write!(f, "COCO"),
            Source::Via => write!(f, "VIA"),
        }
    }
}

/// A filename reached from more than one key of the same export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateFilename {
    pub source: Source,
    pub filename: String,
    /// Keys in resolution order; the last one is kept.
    pub keys: Vec<String>,
}

impl DuplicateFilename {
    pub fn kept(&self) -> Option<&str> {
        self.keys.last().map(String::as_str)
    }
}

/// Reconciled result of a COCO and a VIA export.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Comparison {
    /// Ordered, classified rows.
    pub rows: Vec<ComparisonRow>,
    /// Sum of `coco_count` over all rows.
    pub total_coco_annotations: usize,
    /// Sum of `vgg_count` over all rows.
    pub total_vgg_annotations: usize,
    /// Filenames shared by several keys of one export.
    pub duplicates: Vec<DuplicateFilename>,
    /// COCO image ids referenced by annotations but never declared.
    pub skipped_coco_ids: Vec<u64>,
    /// VIA file ids without a metadata entry.
    pub skipped_via_ids: Vec<String>,
}

impl Comparison {
    /// `total_vgg_annotations - total_coco_annotations`.
    pub fn total_difference(&self) -> i64 {
        self.total_vgg_annotations as i64 - self.total_coco_annotations as i64
    }

    /// Number of rows in `category`.
    pub fn count(&self, category: Category) -> usize {
        self.rows.iter().filter(|r| r.category == category).count()
    }

    /// True if no row is a mismatch or deficit.
    pub fn is_consistent(&self) -> bool {
        !self.rows.iter().any(|r| r.category.is_discrepancy())
    }

    /// Short one-line summary of the row categories.
    pub fn summary(&self) -> String {
        format!(
            "{} images: {} match, {} mismatch, {} deficit, {} without annotations",
            self.rows.len(),
            self.count(Category::Match),
            self.count(Category::Mismatch),
            self.count(Category::Deficit),
            self.count(Category::Zero)
        )
    }
}

/// Tracks filename → value for one export and the keys that reached each
/// filename.
struct FilenameIndex<V> {
    source: Source,
    values: HashMap<String, V>,
    keys: HashMap<String, Vec<String>>,
}

impl<V> FilenameIndex<V> {
    fn new(source: Source) -> Self {
        Self {
            source,
            values: HashMap::new(),
            keys: HashMap::new(),
        }
    }

    fn insert(&mut self, filename: &str, key: String, value: V) {
        self.values.insert(filename.to_string(), value);
        self.keys.entry(filename.to_string()).or_default().push(key);
    }

    fn duplicates(&self, policy: DuplicatePolicy) -> Result<Vec<DuplicateFilename>, Error> {
        let mut duplicates: Vec<_> = self
            .keys
            .iter()
            .filter(|(_, keys)| keys.len() > 1)
            .map(|(filename, keys)| DuplicateFilename {
                source: self.source,
                filename: filename.clone(),
                keys: keys.clone(),
            })
            .collect();
        duplicates.sort_by(|a, b| a.filename.cmp(&b.filename));

        for dup in &duplicates {
            let msg = format!(
                "`{}` is used by {} {} keys ({})",
                dup.filename,
                dup.keys.len(),
                dup.source,
                dup.keys.join(", ")
            );
            match policy {
                DuplicatePolicy::Fail => return Err(Error::ConflictError(msg)),
                DuplicatePolicy::Warn => {
                    warn!("{}; keeping {}", msg, dup.kept().unwrap_or_default())
                }
            }
        }

        Ok(duplicates)
    }
}

/// Reconcile a normalized COCO export with a normalized VIA export.
///
/// `via_dataset` resolves VIA file ids to filenames. Every declared COCO image
/// contributes a row with its id, even without annotations. Unresolvable keys
/// and duplicate filenames are handled according to `settings`.
pub fn reconcile(
    coco: &CocoSummary,
    via_dataset: &ViaDataset,
    via: &ViaSummary,
    settings: &Settings,
) -> Result<Comparison, Error> {
    // Ascending image id, so on a duplicate filename the greater id wins.
    let mut coco_index = FilenameIndex::new(Source::Coco);
    for (&image_id, filename) in &coco.id_to_filename {
        coco_index.insert(
            filename,
            image_id.to_string(),
            (coco.counts.get(image_id), image_id),
        );
    }

    let mut skipped_coco_ids = Vec::new();
    for image_id in coco.dangling_ids() {
        let count = coco.counts.get(image_id);
        match settings.coco_dangling {
            ReferencePolicy::Fail => {
                return Err(Error::ReferenceError(format!(
                    "{} COCO annotation(s) reference undeclared image_id {}",
                    count, image_id
                )));
            }
            ReferencePolicy::Skip => {
                warn!(
                    "Skipping {} COCO annotation(s) on undeclared image_id {}",
                    count, image_id
                );
                skipped_coco_ids.push(image_id);
            }
        }
    }

    // Document order, so on a duplicate filename the later entry wins.
    let mut via_index = FilenameIndex::new(Source::Via);
    let mut skipped_via_ids = Vec::new();
    for (file_id, count) in via.counts.iter() {
        match via_dataset.filename(file_id) {
            Some(filename) => via_index.insert(filename, file_id.to_string(), count),
            None => match settings.via_dangling {
                ReferencePolicy::Fail => {
                    return Err(Error::format(
                        &via_dataset.source,
                        format!("file id `{}` has no entry in `_via_img_metadata`", file_id),
                    ));
                }
                ReferencePolicy::Skip => {
                    warn!("Skipping VIA file id `{}` without metadata", file_id);
                    skipped_via_ids.push(file_id.to_string());
                }
            },
        }
    }

    let mut duplicates = coco_index.duplicates(settings.duplicate_filenames)?;
    duplicates.extend(via_index.duplicates(settings.duplicate_filenames)?);

    let filenames: BTreeSet<&str> = coco_index
        .values
        .keys()
        .chain(via_index.values.keys())
        .map(String::as_str)
        .collect();

    let mut rows: Vec<ComparisonRow> = filenames
        .into_iter()
        .map(|filename| {
            let (coco_count, coco_id) = match coco_index.values.get(filename) {
                Some(&(count, id)) => (count, Some(id)),
                None => (0, None),
            };
            let vgg_count = via_index.values.get(filename).copied().unwrap_or(0);
            ComparisonRow::new(filename, coco_id, vgg_count, coco_count)
        })
        .collect();

    rows.sort_by(|a, b| {
        (a.coco_id.is_none(), a.coco_id, &a.filename).cmp(&(
            b.coco_id.is_none(),
            b.coco_id,
            &b.filename,
        ))
    });

    let total_coco_annotations = rows.iter().map(|r| r.coco_count).sum();
    let total_vgg_annotations = rows.iter().map(|r| r.vgg_count).sum();

    let comparison = Comparison {
        rows,
        total_coco_annotations,
        total_vgg_annotations,
        duplicates,
        skipped_coco_ids,
        skipped_via_ids,
    };
    debug!("{}", comparison.summary());

    Ok(comparison)
}

/// Load both exports and reconcile them.
///
/// Both documents are fully loaded and validated before any comparison is
/// made, so a failure never yields a partial result.
pub fn compare_files<P: AsRef<Path>, Q: AsRef<Path>>(
    via_path: P,
    coco_path: Q,
    settings: &Settings,
) -> Result<Comparison, Error> {
    let coco_dataset = CocoReader::new().read_json(coco_path)?;
    let via_dataset = ViaReader::new().read_json(via_path)?;

    let coco = CocoSummary::from_dataset(&coco_dataset);
    let via = ViaSummary::from_dataset(&via_dataset);

    reconcile(&coco, &via_dataset, &via, settings)
}
