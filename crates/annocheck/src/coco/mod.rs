// SPDX-License-Identifier: Apache-2.0
// Copyright © 2025 Au-Zone Technologies. All Rights Reserved.

//! # COCO Export Support
//!
//! Loads a COCO (Common Objects in Context) JSON export and normalizes it into
//! per-image annotation counts.
//!
//! The normalized view is a [`CocoSummary`]:
//! - the images without any annotation, in document order
//! - annotation counts keyed by image id, read through a zero-default accessor
//! - the `image_id` → `file_name` lookup used to join against VIA exports
//!
//! ## Example
//!
//! ```rust,no_run
//! use annocheck::coco::{CocoReader, CocoSummary};
//!
//! let dataset = CocoReader::new().read_json("instances.json")?;
//! let summary = CocoSummary::from_dataset(&dataset);
//! println!("{} annotations on {} images", summary.total(), summary.id_to_filename.len());
//! # Ok::<(), annocheck::Error>(())
//! ```

mod reader;
mod report;
mod types;

pub use reader::CocoReader;
pub use report::{CocoCheck, CocoImageCount};
pub use types::{CocoAnnotation, CocoCounts, CocoDataset, CocoImage, CocoSummary};

#[cfg(test)]
mod tests;
