// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error types for tween configuration and settings.

use crate::property::PropertyKind;
use crate::sequence::SequenceId;
use std::path::PathBuf;

/// A configuration problem found while initializing a sequence
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigIssue {
    /// The sequence window starts after it ends
    #[error("sequence {sequence} starts after it ends ({start} > {end})")]
    InvertedWindow {
        /// Offending sequence
        sequence: SequenceId,
        /// Authored start time
        start: f32,
        /// Authored end time
        end: f32,
    },

    /// A target lacks the capability the sequence animates
    #[error("sequence {sequence}: target `{target}` has no {kind} capability")]
    MissingCapability {
        /// Offending sequence
        sequence: SequenceId,
        /// Name of the target
        target: String,
        /// Channel that could not be resolved
        kind: PropertyKind,
    },
}

/// Issues reported by an init pass.
///
/// Initialization still completes for everything that resolved; the issues
/// name the parts that will stay inert.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("init found {} configuration issue(s)", .issues.len())]
pub struct InitError {
    /// Every issue, in sequence order
    pub issues: Vec<ConfigIssue>,
}

impl InitError {
    /// `Ok` when there is nothing to report
    pub fn check(issues: Vec<ConfigIssue>) -> Result<(), InitError> {
        if issues.is_empty() {
            Ok(())
        } else {
            Err(InitError { issues })
        }
    }
}

/// Settings load/save errors
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// Reading or writing the settings file failed
    #[error("settings I/O error for {}: {source}", .path.display())]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The settings text is not valid RON for the expected type
    #[error("failed to parse settings: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// The settings could not be serialized
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] ron::Error),
}
