// SPDX-License-Identifier: Apache-2.0
// Copyright © 2025 Au-Zone Technologies. All Rights Reserved.

//! Shared JSON document loading.

use crate::Error;
use log::debug;
use serde::de::DeserializeOwned;
use std::{fs::File, io::BufReader, path::Path};

/// Read and deserialize a JSON document.
///
/// The file handle is released before returning. Open and read failures map
/// to [`Error::IoError`]; syntax errors and missing or mistyped keys map to
/// [`Error::FormatError`], both carrying `path`.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, Error> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    let metadata_len = file.metadata().map(|m| m.len()).unwrap_or(0);
    debug!("Reading {:?} ({} bytes)", path, metadata_len);

    let reader = BufReader::with_capacity(64 * 1024, file);
    serde_json::from_reader(reader).map_err(|e| {
        if e.is_io() {
            Error::io(path, std::io::Error::from(e))
        } else if e.is_data() {
            Error::format(path, format!("unexpected document structure: {}", e))
        } else {
            Error::format(path, format!("invalid JSON: {}", e))
        }
    })
}
