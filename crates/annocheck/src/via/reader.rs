// SPDX-License-Identifier: Apache-2.0
// Copyright © 2025 Au-Zone Technologies. All Rights Reserved.

//! VIA project JSON reader.

use super::types::*;
use crate::{Error, document::read_json};
use log::debug;
use std::path::Path;

/// Reader for VIA project exports.
///
/// # Example
///
/// ```rust,no_run
/// use annocheck::via::{ViaReader, ViaSummary};
///
/// let dataset = ViaReader::new().read_json("via_project.json")?;
/// let summary = ViaSummary::from_dataset(&dataset);
/// println!("{} regions", summary.total());
/// # Ok::<(), annocheck::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ViaReader;

impl ViaReader {
    pub fn new() -> Self {
        Self
    }

    /// Read a VIA project from a JSON file.
    ///
    /// Fails with [`Error::FormatError`] when `_via_img_metadata` is missing
    /// or any file entry lacks `filename` or `regions`.
    pub fn read_json<P: AsRef<Path>>(&self, path: P) -> Result<ViaDataset, Error> {
        let path = path.as_ref();
        let project: ViaProject = read_json(path)?;

        let mut files = Vec::with_capacity(project.img_metadata.len());
        for (file_id, value) in project.img_metadata {
            let mut file: ViaFile = serde_json::from_value(value).map_err(|e| {
                Error::format(
                    path,
                    format!("file entry `{}` in `_via_img_metadata`: {}", file_id, e),
                )
            })?;
            file.file_id = file_id;
            files.push(file);
        }

        debug!("Loaded VIA {:?}: {} file entries", path, files.len());
        Ok(ViaDataset::new(files).with_source(path))
    }
}
