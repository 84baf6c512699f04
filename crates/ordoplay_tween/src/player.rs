// SPDX-License-Identifier: MIT OR Apache-2.0
//! Playback of a timeline driven by host ticks.

use crate::error::InitError;
use crate::settings::PlayerSettings;
use crate::timeline::{LoopMode, Timeline};

/// Playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// Not advancing
    #[default]
    Stopped,
    /// Advancing on every tick
    Playing,
}

/// Elapsed time for one host frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameDelta {
    /// Delta after the host's time scale
    pub scaled: f32,
    /// Wall-clock delta
    pub unscaled: f32,
}

impl FrameDelta {
    /// Create a frame delta
    pub fn new(scaled: f32, unscaled: f32) -> Self {
        Self { scaled, unscaled }
    }

    /// Same delta for both clocks
    pub fn uniform(delta: f32) -> Self {
        Self::new(delta, delta)
    }
}

/// What a tick did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Not playing; nothing happened
    Idle,
    /// The timeline was evaluated at `time`
    Updated {
        /// Time fed to the timeline after loop remapping
        time: f32,
    },
    /// Playback reached its natural end and stopped
    Completed,
}

/// Top-level controller that advances a timeline each tick.
///
/// The owner calls [`Player::tick`] once per frame; there is no global
/// driver.
pub struct Player {
    timeline: Timeline,
    current_time: f32,
    state: PlaybackState,
    /// Advance with the unscaled frame delta
    pub ignore_time_scale: bool,
    /// Start playing on [`Player::awake`]
    pub play_on_awake: bool,
    on_complete: Option<Box<dyn FnMut()>>,
}

impl Player {
    /// Create a stopped player for `timeline`
    pub fn new(timeline: Timeline) -> Self {
        Self {
            timeline,
            current_time: 0.0,
            state: PlaybackState::Stopped,
            ignore_time_scale: false,
            play_on_awake: false,
            on_complete: None,
        }
    }

    /// Apply settings at construction
    pub fn with_settings(mut self, settings: &PlayerSettings) -> Self {
        self.apply_settings(settings);
        self
    }

    /// Copy playback flags from `settings`
    pub fn apply_settings(&mut self, settings: &PlayerSettings) {
        self.play_on_awake = settings.play_on_awake;
        self.ignore_time_scale = settings.ignore_time_scale;
    }

    /// Register the completion callback, replacing any previous one
    pub fn set_on_complete(&mut self, callback: impl FnMut() + 'static) {
        self.on_complete = Some(Box::new(callback));
    }

    /// Host activation hook: plays when `play_on_awake` is set
    pub fn awake(&mut self) -> Result<(), InitError> {
        if self.play_on_awake {
            self.play()
        } else {
            Ok(())
        }
    }

    /// Rewind to zero, re-capture origins and start playing.
    ///
    /// Playback starts even when initialization reports issues; the error
    /// lists the targets that will stay inert.
    pub fn play(&mut self) -> Result<(), InitError> {
        self.current_time = 0.0;
        self.state = PlaybackState::Playing;

        let result = self.timeline.init();
        if let Err(err) = &result {
            for issue in &err.issues {
                tracing::warn!("{issue}");
            }
        }
        tracing::info!(
            "Playing timeline '{}' ({:?}, {}s)",
            self.timeline.name,
            self.timeline.loop_mode,
            self.timeline.duration()
        );
        result
    }

    /// Halt immediately, leaving targets where they are
    pub fn stop(&mut self) {
        if self.state == PlaybackState::Playing {
            tracing::info!("Stopped timeline '{}'", self.timeline.name);
        }
        self.state = PlaybackState::Stopped;
    }

    /// Put every target back to its captured origin
    pub fn restore(&mut self) {
        self.timeline.restore();
    }

    /// Advance the clock by one frame and evaluate the timeline
    pub fn tick(&mut self, delta: FrameDelta) -> TickOutcome {
        if self.state != PlaybackState::Playing {
            return TickOutcome::Idle;
        }

        self.current_time += if self.ignore_time_scale {
            delta.unscaled
        } else {
            delta.scaled
        };

        let duration = self.timeline.duration();
        let feed = match self.timeline.loop_mode {
            LoopMode::PlayOnce => {
                if self.current_time >= duration {
                    return self.complete(false);
                }
                self.current_time
            }
            LoopMode::Loop => {
                if self.current_time >= duration {
                    self.current_time = wrap(self.current_time, duration);
                }
                self.current_time
            }
            LoopMode::PingPongOnce => {
                if self.current_time >= duration * 2.0 {
                    return self.complete(true);
                }
                mirror(self.current_time, duration)
            }
            LoopMode::PingPongLoop => {
                if self.current_time >= duration * 2.0 {
                    self.current_time = wrap(self.current_time, duration * 2.0);
                }
                mirror(self.current_time, duration)
            }
        };

        tracing::trace!("clock {} -> feed {}", self.current_time, feed);
        self.timeline.update(feed);
        TickOutcome::Updated { time: feed }
    }

    fn complete(&mut self, is_pingpong: bool) -> TickOutcome {
        self.timeline.end(is_pingpong);
        self.state = PlaybackState::Stopped;
        tracing::info!("Timeline '{}' completed", self.timeline.name);

        if let Some(callback) = self.on_complete.as_mut() {
            callback();
        }
        TickOutcome::Completed
    }

    /// Accumulated clock, after loop wrapping
    pub fn current_time(&self) -> f32 {
        self.current_time
    }

    /// Playback state
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Is currently playing
    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// Get the timeline
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Get the timeline mutably
    pub fn timeline_mut(&mut self) -> &mut Timeline {
        &mut self.timeline
    }

    /// Consume the player, returning its timeline
    pub fn into_timeline(self) -> Timeline {
        self.timeline
    }
}

/// Wrap an overrun clock back into `[0, period)`
fn wrap(clock: f32, period: f32) -> f32 {
    if period > 0.0 {
        clock % period
    } else {
        0.0
    }
}

/// Reflect the second half of a ping-pong cycle back onto the forward sweep
fn mirror(clock: f32, duration: f32) -> f32 {
    if clock >= duration {
        duration * 2.0 - clock
    } else {
        clock
    }
}
