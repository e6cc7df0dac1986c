// SPDX-License-Identifier: Apache-2.0
// Copyright © 2025 Au-Zone Technologies. All Rights Reserved.

//! # Annotation Export Reconciliation
//!
//! Compares the per-image annotation counts recorded by a COCO JSON export and
//! a VIA (VGG Image Annotator) project export of the same image set.
//!
//! ## Features
//!
//! - **COCO loading**: counts annotations per image id and lists images
//!   without annotations
//! - **VIA loading**: counts regions per file entry and lists entries without
//!   regions
//! - **Reconciliation**: joins both exports on filename, classifies each image
//!   as `zero`, `match`, `mismatch` or `deficit`, and totals both sides
//! - **Reporting**: grid table rendering with per-category highlighting, or
//!   serde serialization of every result type
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use annocheck::{ComparisonTable, Error, Settings, compare_files};
//!
//! fn main() -> Result<(), Error> {
//!     let settings = Settings::load(None)?;
//!     let comparison = compare_files("via_project.json", "instances.json", &settings)?;
//!     print!("{}", ComparisonTable::new(&comparison).with_placeholder(&settings.placeholder));
//!     Ok(())
//! }
//! ```

pub mod coco;
pub mod via;

mod compare;
mod document;
mod error;
mod settings;
mod table;

pub use crate::{
    compare::{
        Category, Comparison, ComparisonRow, DuplicateFilename, Source, compare_files, reconcile,
    },
    error::Error,
    settings::{DuplicatePolicy, ReferencePolicy, Settings},
    table::{ComparisonTable, category_color},
};
