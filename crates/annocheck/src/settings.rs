// SPDX-License-Identifier: Apache-2.0
// Copyright © 2025 Au-Zone Technologies. All Rights Reserved.

//! Reconciliation settings.
//!
//! Settings are layered, lowest precedence first:
//!
//! 1. Built-in defaults
//! 2. `annocheck.toml` in the per-user configuration directory
//! 3. An explicit configuration file passed to [`Settings::load`]
//! 4. `ANNOCHECK_*` environment variables
//!
//! ```bash
//! export ANNOCHECK_COCO_DANGLING=fail   # reject annotations on undeclared images
//! export ANNOCHECK_PLACEHOLDER=-        # display text for a missing COCO id
//! ```

use crate::Error;
use directories::ProjectDirs;
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "annocheck.toml";
const ENV_PREFIX: &str = "ANNOCHECK";

/// What to do with a key that cannot be resolved to a filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferencePolicy {
    /// Log the key and leave it out of the comparison.
    Skip,
    /// Abort the comparison with an error.
    Fail,
}

/// What to do when two keys of one source resolve to the same filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Log and record the conflict; the last key resolved wins.
    Warn,
    /// Abort the comparison with an error.
    Fail,
}

/// Reconciliation policies and display options.
///
/// Use [`Settings::load`] to read the layered configuration, or
/// [`Settings::default`] for the built-in values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Policy for COCO image ids referenced by annotations but not declared.
    pub coco_dangling: ReferencePolicy,
    /// Policy for VIA file ids without a metadata entry.
    pub via_dangling: ReferencePolicy,
    /// Policy for filenames reached from more than one key of a source.
    pub duplicate_filenames: DuplicatePolicy,
    /// Text shown in place of a missing COCO id.
    pub placeholder: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            coco_dangling: ReferencePolicy::Skip,
            via_dangling: ReferencePolicy::Fail,
            duplicate_filenames: DuplicatePolicy::Warn,
            placeholder: "N/A".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from the user configuration directory, an optional
    /// explicit file and the environment.
    ///
    /// The explicit file must exist when given; the user file is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self, Error> {
        Self::load_from(user_config_path(), explicit)
    }

    fn load_from(user: Option<PathBuf>, explicit: Option<&Path>) -> Result<Self, Error> {
        let defaults = Settings::default();
        let mut builder = config::Config::builder()
            .set_default("coco_dangling", "skip")?
            .set_default("via_dangling", "fail")?
            .set_default("duplicate_filenames", "warn")?
            .set_default("placeholder", defaults.placeholder)?;

        if let Some(path) = user {
            debug!("Using user settings path: {:?}", path);
            builder = builder.add_source(
                config::File::from(path)
                    .format(config::FileFormat::Toml)
                    .required(false),
            );
        }

        if let Some(path) = explicit {
            debug!("Using explicit settings path: {:?}", path);
            builder = builder.add_source(
                config::File::from(path.to_path_buf())
                    .format(config::FileFormat::Toml)
                    .required(true),
            );
        }

        let settings: Settings = builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()?;

        debug!("Loaded settings: {:?}", settings);
        Ok(settings)
    }

    /// Switch every policy to its failing variant.
    pub fn strict(mut self) -> Self {
        self.coco_dangling = ReferencePolicy::Fail;
        self.via_dangling = ReferencePolicy::Fail;
        self.duplicate_filenames = DuplicatePolicy::Fail;
        self
    }
}

fn user_config_path() -> Option<PathBuf> {
    ProjectDirs::from("ai", "EdgeFirst", "annocheck")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}
