// SPDX-License-Identifier: Apache-2.0
// Copyright © 2025 Au-Zone Technologies. All Rights Reserved.

//! COCO JSON reader.

use super::types::*;
use crate::{Error, document::read_json};
use log::debug;
use std::path::Path;

/// Reader for COCO annotation exports.
///
/// # Example
///
/// ```rust,no_run
/// use annocheck::coco::{CocoReader, CocoSummary};
///
/// let dataset = CocoReader::new().read_json("annotations/instances.json")?;
/// let summary = CocoSummary::from_dataset(&dataset);
/// println!("{} images without annotations", summary.unannotated.len());
/// # Ok::<(), annocheck::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct CocoReader;

impl CocoReader {
    /// Create a new COCO reader.
    pub fn new() -> Self {
        Self
    }

    /// Read a COCO dataset from a JSON file.
    ///
    /// Fails with [`Error::IoError`] when the file cannot be read and with
    /// [`Error::FormatError`] when it is not JSON or lacks `images` or
    /// `annotations`.
    pub fn read_json<P: AsRef<Path>>(&self, path: P) -> Result<CocoDataset, Error> {
        let path = path.as_ref();
        let dataset: CocoDataset = read_json(path)?;
        debug!(
            "Loaded COCO {:?}: {} images, {} annotations",
            path,
            dataset.images.len(),
            dataset.annotations.len()
        );
        Ok(dataset)
    }
}
