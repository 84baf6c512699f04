// SPDX-License-Identifier: MIT OR Apache-2.0
//! Property tweening for `OrdoPlay`.
//!
//! This crate animates host entity properties over time:
//! - Easing curves (power, spring, back, bounce, elastic, stepped)
//! - Sequences: one eased channel over one or more targets
//! - Timelines: ordered sequences sharing a duration and loop mode
//! - Players: tick-driven playback with looping and ping-pong
//! - Editor preview with automatic restore
//!
//! ## Architecture
//!
//! The engine is single-threaded and owns no clock. A host:
//! - Implements [`PropertyTarget`] and the facet traits for its entities
//! - Builds a [`Timeline`] of [`Sequence`]s bound to those targets
//! - Calls [`Player::tick`] once per frame
//!
//! Origins are captured at init so any session can be undone with
//! `restore`.

pub mod easing;
pub mod error;
pub mod player;
pub mod preview;
pub mod property;
pub mod sequence;
pub mod settings;
pub mod target;
pub mod timeline;
pub mod value;

#[cfg(test)]
mod test_support;

pub use easing::{ease, EaseKind};
pub use error::{ConfigIssue, InitError, SettingsError};
pub use player::{FrameDelta, PlaybackState, Player, TickOutcome};
pub use preview::Preview;
pub use property::{PropertyKind, Space};
pub use sequence::{Sequence, SequenceId};
pub use settings::{PlayerSettings, DEFAULT_PREVIEW_STEP, SETTINGS_FILE_NAME};
pub use target::{
    AlphaFacet, ColorFacet, EnableFacet, PositionFacet, PropertyTarget, RotationFacet, ScaleFacet,
    TargetHandle,
};
pub use timeline::{LoopMode, Timeline};
pub use value::{ChannelValue, Interpolation, ValueShape};
