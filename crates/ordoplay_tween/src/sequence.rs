// SPDX-License-Identifier: MIT OR Apache-2.0
//! A single timed tween channel over one or more targets.

use crate::easing::EaseKind;
use crate::error::{ConfigIssue, InitError};
use crate::property::PropertyKind;
use crate::target::{Facet, TargetHandle};
use crate::value::{truncate, ChannelValue, Interpolation};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SequenceId(pub Uuid);

impl SequenceId {
    /// Create a new random sequence ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SequenceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SequenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Resolved facet and captured origin for one target
#[derive(Debug, Clone)]
struct Binding {
    facet: Facet,
    origin: ChannelValue,
}

fn default_true() -> bool {
    true
}

/// One animated property channel over a fixed time window.
///
/// Authoring fields are public. Changes to `property_kind` or `targets`
/// take effect at the next [`Sequence::init`].
#[derive(Clone, Serialize, Deserialize)]
pub struct Sequence {
    /// Unique sequence ID
    #[serde(default)]
    pub id: SequenceId,
    /// Animated channel
    pub property_kind: PropertyKind,
    /// Window start in seconds
    pub start_time: f32,
    /// Window end in seconds; `0.0` marks an unconfigured sequence
    pub end_time: f32,
    /// Easing curve
    #[serde(default)]
    pub ease: EaseKind,
    /// Blend from each target's captured origin instead of `begin`
    #[serde(default)]
    pub is_relative: bool,
    /// Begin value for vector and color channels
    #[serde(default)]
    pub begin: [f32; 4],
    /// End value for vector and color channels
    #[serde(default)]
    pub end: [f32; 4],
    /// Begin value for the alpha channel
    #[serde(default)]
    pub begin_scalar: f32,
    /// End value for the alpha channel
    #[serde(default)]
    pub end_scalar: f32,
    /// Flag written by the enabled channel
    #[serde(default = "default_true")]
    pub target_enable: bool,
    /// Entities driven by this sequence
    #[serde(skip)]
    pub targets: Vec<TargetHandle>,
    /// Parallel to `targets`; `None` until initialized
    #[serde(skip)]
    bindings: Option<Vec<Option<Binding>>>,
}

impl Sequence {
    /// Create an unconfigured sequence for `property_kind`
    pub fn new(property_kind: PropertyKind) -> Self {
        Self {
            id: SequenceId::new(),
            property_kind,
            start_time: 0.0,
            end_time: 0.0,
            ease: EaseKind::Linear,
            is_relative: false,
            begin: [0.0; 4],
            end: [0.0; 4],
            begin_scalar: 0.0,
            end_scalar: 0.0,
            target_enable: true,
            targets: Vec::new(),
            bindings: None,
        }
    }

    /// Set the time window
    pub fn with_window(mut self, start_time: f32, end_time: f32) -> Self {
        self.start_time = start_time;
        self.end_time = end_time;
        self
    }

    /// Set the easing curve
    pub fn with_ease(mut self, ease: EaseKind) -> Self {
        self.ease = ease;
        self
    }

    /// Set begin and end for a three-component channel
    pub fn with_vec3(mut self, begin: [f32; 3], end: [f32; 3]) -> Self {
        self.begin = [begin[0], begin[1], begin[2], 0.0];
        self.end = [end[0], end[1], end[2], 0.0];
        self
    }

    /// Set begin and end for a color channel
    pub fn with_color(mut self, begin: [f32; 4], end: [f32; 4]) -> Self {
        self.begin = begin;
        self.end = end;
        self
    }

    /// Set begin and end for the alpha channel
    pub fn with_scalar(mut self, begin: f32, end: f32) -> Self {
        self.begin_scalar = begin;
        self.end_scalar = end;
        self
    }

    /// Set the flag written by the enabled channel
    pub fn with_target_enable(mut self, enable: bool) -> Self {
        self.target_enable = enable;
        self
    }

    /// Switch to relative mode
    pub fn relative(mut self) -> Self {
        self.is_relative = true;
        self
    }

    /// Add a target
    pub fn with_target(mut self, target: TargetHandle) -> Self {
        self.targets.push(target);
        self
    }

    /// Add a target
    pub fn add_target(&mut self, target: TargetHandle) {
        self.targets.push(target);
    }

    /// Get target count
    pub fn target_count(&self) -> usize {
        self.targets.len()
    }

    /// Window length in seconds
    pub fn duration(&self) -> f32 {
        self.end_time - self.start_time
    }

    /// Whether origins are currently cached
    pub fn is_initialized(&self) -> bool {
        self.bindings.is_some()
    }

    /// Origin captured for the target at `index`, if it resolved
    pub fn origin(&self, index: usize) -> Option<ChannelValue> {
        self.bindings
            .as_ref()?
            .get(index)?
            .as_ref()
            .map(|binding| binding.origin)
    }

    /// Resolve every target's facet and capture its current value.
    ///
    /// Calling again re-captures. Targets missing the capability are
    /// reported and stay inert; the rest are bound regardless.
    pub fn init(&mut self) -> Result<(), InitError> {
        let mut issues = Vec::new();

        if self.start_time > self.end_time {
            issues.push(ConfigIssue::InvertedWindow {
                sequence: self.id,
                start: self.start_time,
                end: self.end_time,
            });
        }

        let kind = self.property_kind;
        let bindings: Vec<_> = self
            .targets
            .iter()
            .map(|target| match Facet::resolve(target, kind) {
                Some(facet) => {
                    let origin = facet.read();
                    Some(Binding { facet, origin })
                }
                None => {
                    issues.push(ConfigIssue::MissingCapability {
                        sequence: self.id,
                        target: target.name().to_owned(),
                        kind,
                    });
                    None
                }
            })
            .collect();

        tracing::debug!(
            "Initialized {} sequence {} ({} of {} targets bound)",
            kind,
            self.id,
            bindings.iter().flatten().count(),
            bindings.len()
        );
        self.bindings = Some(bindings);

        InitError::check(issues)
    }

    /// Progress at `cur_time`, or `None` before the window opens.
    ///
    /// `None` is the only "skip" signal; eased progress may be negative or
    /// above one and is still applied, clamped to `begin` and `end`.
    pub fn evaluate(&self, cur_time: f32) -> Option<f32> {
        if self.end_time == 0.0 || cur_time < self.start_time {
            return None;
        }
        if cur_time == 0.0 {
            return Some(0.0);
        }
        if cur_time > self.end_time {
            return Some(1.0);
        }

        let duration = self.duration();
        if duration <= 0.0 {
            // Instant channel: snaps once the window opens.
            return Some(1.0);
        }

        Some(self.ease.ease((cur_time - self.start_time) / duration))
    }

    /// Drive every target to its value at `cur_time`
    pub fn update(&self, cur_time: f32) {
        if self.property_kind == PropertyKind::Enabled {
            if cur_time >= self.start_time {
                self.write_flag(self.target_enable);
            }
            return;
        }

        if let Some(progress) = self.evaluate(cur_time) {
            self.apply(progress);
        }
    }

    /// Map an eased progress onto every bound target.
    ///
    /// Does nothing before [`Sequence::init`] and for the enabled channel,
    /// which is stepped by [`Sequence::update`] instead.
    pub fn apply(&self, progress: f32) {
        let Some(bindings) = &self.bindings else {
            return;
        };

        for binding in bindings.iter().flatten() {
            if let Some(value) = self.blend(binding, progress) {
                binding.facet.write(value);
            }
        }
    }

    /// Blend for one binding. Progress is clamped to `[0, 1]`, so curves
    /// that overshoot never push a target past `begin` or `end`.
    fn blend(&self, binding: &Binding, t: f32) -> Option<ChannelValue> {
        let t = t.clamp(0.0, 1.0);

        let value = match &binding.facet {
            Facet::Enable(_) => return None,
            Facet::Position(..) | Facet::Rotation(..) | Facet::Scale(_) => {
                let end = truncate(self.end);
                ChannelValue::Vec3(if !self.is_relative {
                    Interpolation::lerp_vec3(truncate(self.begin), end, t)
                } else if self.property_kind.is_offset() {
                    Interpolation::offset_vec3(binding.origin.as_vec3()?, end, t)
                } else {
                    Interpolation::lerp_vec3(binding.origin.as_vec3()?, end, t)
                })
            }
            Facet::Color(_) => {
                let from = if self.is_relative {
                    binding.origin.as_color()?
                } else {
                    self.begin
                };
                ChannelValue::Color(Interpolation::lerp_vec4(from, self.end, t))
            }
            Facet::Alpha(_) => {
                let from = if self.is_relative {
                    binding.origin.as_scalar()?
                } else {
                    self.begin_scalar
                };
                ChannelValue::Scalar(Interpolation::lerp(from, self.end_scalar, t))
            }
        };

        Some(value)
    }

    fn write_flag(&self, enabled: bool) {
        let Some(bindings) = &self.bindings else {
            return;
        };
        for binding in bindings.iter().flatten() {
            binding.facet.write(ChannelValue::Flag(enabled));
        }
    }

    /// Settle at the end of a play session.
    ///
    /// Applies progress `1.0`, or `0.0` when the session ended on the return
    /// sweep of a ping-pong. The enabled channel has no progress to settle,
    /// so its flag only ever changes in [`Sequence::update`].
    pub fn end(&self, is_pingpong: bool) {
        if self.end_time == 0.0 || self.targets.is_empty() {
            return;
        }

        self.apply(if is_pingpong { 0.0 } else { 1.0 });
    }

    /// Write every captured origin back and drop the cache.
    ///
    /// No-op when not initialized.
    pub fn restore(&mut self) {
        let Some(bindings) = self.bindings.take() else {
            return;
        };
        for binding in bindings.iter().flatten() {
            binding.facet.write(binding.origin);
        }
    }

    /// Clamp the window so it fits inside `duration`
    pub fn clamp_to(&mut self, duration: f32) {
        self.start_time = self.start_time.min(duration);
        self.end_time = self.end_time.min(duration);
    }
}

impl Default for Sequence {
    fn default() -> Self {
        Self::new(PropertyKind::default())
    }
}

impl fmt::Debug for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let targets: Vec<&str> = self.targets.iter().map(|t| t.name()).collect();
        f.debug_struct("Sequence")
            .field("id", &self.id)
            .field("property_kind", &self.property_kind)
            .field("start_time", &self.start_time)
            .field("end_time", &self.end_time)
            .field("ease", &self.ease)
            .field("is_relative", &self.is_relative)
            .field("begin", &self.begin)
            .field("end", &self.end)
            .field("begin_scalar", &self.begin_scalar)
            .field("end_scalar", &self.end_scalar)
            .field("target_enable", &self.target_enable)
            .field("targets", &targets)
            .field("initialized", &self.is_initialized())
            .finish()
    }
}
