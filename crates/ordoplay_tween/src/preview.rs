// SPDX-License-Identifier: MIT OR Apache-2.0
//! Editor preview of a timeline.
//!
//! The preview scrubs a timeline at a fixed step without a running game
//! loop:
//! - Starting captures origins and shows the first frame immediately
//! - Playback never loops; ping-pong modes run one forward/back cycle
//! - Stopping, by hand or at the end, restores every target

use crate::error::InitError;
use crate::settings::{PlayerSettings, DEFAULT_PREVIEW_STEP};
use crate::timeline::Timeline;

/// Fixed-step editor simulation of a timeline
#[derive(Debug, Clone)]
pub struct Preview {
    playing: bool,
    playtime: f32,
    step: f32,
    /// Steps taken since the preview started
    pub frame_count: u64,
}

impl Preview {
    /// Create a stopped preview with the default step
    pub fn new() -> Self {
        Self {
            playing: false,
            playtime: 0.0,
            step: DEFAULT_PREVIEW_STEP,
            frame_count: 0,
        }
    }

    /// Use the step from `settings`; a non-positive step is ignored
    pub fn with_settings(mut self, settings: &PlayerSettings) -> Self {
        if settings.preview_step > 0.0 {
            self.step = settings.preview_step;
        } else {
            tracing::warn!(
                "Ignoring preview step {}, keeping {}",
                settings.preview_step,
                self.step
            );
        }
        self
    }

    /// Start previewing `timeline` from zero
    pub fn start(&mut self, timeline: &mut Timeline) -> Result<(), InitError> {
        let result = timeline.init();
        timeline.update(0.0);

        self.playing = true;
        self.playtime = 0.0;
        self.frame_count = 0;
        tracing::info!("Started preview of '{}'", timeline.name);
        result
    }

    /// Advance one fixed step. Returns whether the preview is still running.
    pub fn step(&mut self, timeline: &mut Timeline) -> bool {
        if !self.playing {
            return false;
        }

        self.playtime += self.step;
        self.frame_count += 1;

        let duration = timeline.duration();
        let mut apply_time = self.playtime;

        if timeline.loop_mode.is_pingpong() {
            if self.playtime >= duration * 2.0 {
                self.stop(timeline);
                return false;
            } else if self.playtime >= duration {
                apply_time = duration * 2.0 - self.playtime;
            }
        } else if self.playtime >= duration {
            self.stop(timeline);
            return false;
        }

        timeline.update(apply_time);
        true
    }

    /// Stop and restore every target
    pub fn stop(&mut self, timeline: &mut Timeline) {
        if self.playing {
            tracing::info!(
                "Stopped preview of '{}' after {} steps",
                timeline.name,
                self.frame_count
            );
        }
        self.playtime = 0.0;
        self.playing = false;
        timeline.restore();
    }

    /// Is the preview running
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Time since the preview started
    pub fn playtime(&self) -> f32 {
        self.playtime
    }

    /// Fixed step in seconds
    pub fn step_size(&self) -> f32 {
        self.step
    }

    /// Get a status string for display
    pub fn status_text(&self) -> &'static str {
        if self.playing {
            "Previewing"
        } else {
            "Edit Mode"
        }
    }
}

impl Default for Preview {
    fn default() -> Self {
        Self::new()
    }
}
