// SPDX-License-Identifier: Apache-2.0
// Copyright © 2025 Au-Zone Technologies. All Rights Reserved.

//! # VIA Project Support
//!
//! Loads a VIA (VGG Image Annotator) project export and normalizes it into
//! per-file region counts. Unlike COCO counts, every file entry carries an
//! explicit count, zero included.

mod reader;
mod report;
mod types;

pub use reader::ViaReader;
pub use report::{ViaCheck, ViaFileCount};
pub use types::{ViaCounts, ViaDataset, ViaFile, ViaProject, ViaRegions, ViaSummary};
