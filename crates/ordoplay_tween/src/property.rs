// SPDX-License-Identifier: MIT OR Apache-2.0
//! Animatable property channels.

use crate::value::ValueShape;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coordinate space for position and rotation channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Space {
    /// Relative to the parent
    #[default]
    Local,
    /// World space
    World,
}

/// The property a sequence animates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyKind {
    /// Entity enabled flag, stepped rather than interpolated
    Enabled,
    /// Translation
    Position(Space),
    /// Orientation as Euler angles in degrees
    Rotation(Space),
    /// Local scale
    Scale,
    /// RGBA color
    Color,
    /// Scalar opacity
    Alpha,
}

impl Default for PropertyKind {
    fn default() -> Self {
        PropertyKind::Position(Space::Local)
    }
}

impl PropertyKind {
    /// Every channel, with both spaces for position and rotation
    pub const ALL: [PropertyKind; 8] = [
        PropertyKind::Enabled,
        PropertyKind::Position(Space::Local),
        PropertyKind::Position(Space::World),
        PropertyKind::Rotation(Space::Local),
        PropertyKind::Rotation(Space::World),
        PropertyKind::Scale,
        PropertyKind::Color,
        PropertyKind::Alpha,
    ];

    /// Value shape carried by this channel
    pub fn shape(&self) -> ValueShape {
        match self {
            PropertyKind::Enabled => ValueShape::Flag,
            PropertyKind::Position(_) | PropertyKind::Rotation(_) | PropertyKind::Scale => {
                ValueShape::Vec3
            }
            PropertyKind::Color => ValueShape::Vec4,
            PropertyKind::Alpha => ValueShape::Scalar,
        }
    }

    /// Whether relative mode offsets the origin instead of blending from it
    pub fn is_offset(&self) -> bool {
        matches!(self, PropertyKind::Position(_) | PropertyKind::Rotation(_))
    }

    /// Get the display name
    pub fn display_name(&self) -> &'static str {
        match self {
            PropertyKind::Enabled => "Enabled",
            PropertyKind::Position(Space::Local) => "Local Position",
            PropertyKind::Position(Space::World) => "Position",
            PropertyKind::Rotation(Space::Local) => "Local Rotation",
            PropertyKind::Rotation(Space::World) => "Rotation",
            PropertyKind::Scale => "Scale",
            PropertyKind::Color => "Color",
            PropertyKind::Alpha => "Alpha",
        }
    }

    /// Two-letter label for compact sequence lists
    pub fn short_label(&self) -> &'static str {
        match self {
            PropertyKind::Enabled => "GE",
            PropertyKind::Position(_) => "TP",
            PropertyKind::Rotation(_) => "TR",
            PropertyKind::Scale => "TS",
            PropertyKind::Color => "CC",
            PropertyKind::Alpha => "CA",
        }
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
