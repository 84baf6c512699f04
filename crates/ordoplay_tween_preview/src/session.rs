// SPDX-License-Identifier: MIT OR Apache-2.0
//! Preview sessions: a timeline plus the settings to play it with.
//!
//! A session file is RON. Every sequence in it is bound to one scene node,
//! played through a [`Player`] at a fixed frame delta, restored, and then
//! replayed through the editor [`Preview`].

use crate::scene::SceneNode;
use ordoplay_tween::{
    EaseKind, FrameDelta, LoopMode, Player, PlayerSettings, Preview, PropertyKind, Sequence,
    SettingsError, Space, TickOutcome, Timeline, DEFAULT_PREVIEW_STEP, SETTINGS_FILE_NAME,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from reading or writing a session file
#[derive(Debug, Error)]
pub enum SessionError {
    /// The file could not be read
    #[error("failed to read session {path:?}: {source}")]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid session RON
    #[error("invalid session: {0}")]
    Parse(#[from] ron::error::SpannedError),
    /// The session could not be serialized
    #[error("failed to serialize session: {0}")]
    Serialize(#[from] ron::Error),
    /// A settings file next to the session is invalid
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

/// Timeline and playback parameters for one preview run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewSession {
    /// Player and editor preview settings
    pub settings: PlayerSettings,
    /// Timeline to play
    pub timeline: Timeline,
    /// Seconds per simulated frame
    pub frame_delta: f32,
    /// Frame cap, for looping timelines that never complete
    pub max_frames: u32,
}

impl Default for PreviewSession {
    fn default() -> Self {
        Self::demo()
    }
}

impl PreviewSession {
    /// Built-in session exercising every channel
    pub fn demo() -> Self {
        let timeline = Timeline::new("Demo", 2.0)
            .with_loop_mode(LoopMode::PingPongOnce)
            .with_sequence(
                Sequence::new(PropertyKind::Position(Space::Local))
                    .with_window(0.0, 1.0)
                    .with_vec3([0.0; 3], [0.0, 2.0, 0.0])
                    .with_ease(EaseKind::QuadOut)
                    .relative(),
            )
            .with_sequence(
                Sequence::new(PropertyKind::Rotation(Space::Local))
                    .with_window(0.0, 2.0)
                    .with_vec3([0.0; 3], [0.0, 180.0, 0.0])
                    .with_ease(EaseKind::CubicInOut),
            )
            .with_sequence(
                Sequence::new(PropertyKind::Scale)
                    .with_window(0.25, 1.25)
                    .with_vec3([0.5; 3], [1.5; 3])
                    .with_ease(EaseKind::BackOut),
            )
            .with_sequence(
                Sequence::new(PropertyKind::Color)
                    .with_window(0.5, 1.5)
                    .with_color([1.0, 1.0, 1.0, 1.0], [1.0, 0.2, 0.1, 1.0])
                    .with_ease(EaseKind::QuadInOut),
            )
            .with_sequence(
                Sequence::new(PropertyKind::Alpha)
                    .with_window(1.5, 2.0)
                    .with_scalar(1.0, 0.0)
                    .with_ease(EaseKind::BounceOut),
            )
            .with_sequence(
                Sequence::new(PropertyKind::Enabled)
                    .with_window(1.9, 2.0)
                    .with_target_enable(false),
            );

        Self {
            settings: PlayerSettings::default(),
            timeline,
            frame_delta: 0.1,
            max_frames: 600,
        }
    }

    /// Parse a session from RON text
    pub fn from_ron_str(text: &str) -> Result<Self, SessionError> {
        Ok(ron::from_str(text)?)
    }

    /// Serialize to pretty RON
    pub fn to_ron_string(&self) -> Result<String, SessionError> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default(),
        )?)
    }

    /// Load a session from a file
    pub fn load(path: &Path) -> Result<Self, SessionError> {
        let text = std::fs::read_to_string(path).map_err(|source| SessionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let session = Self::from_ron_str(&text)?;
        tracing::info!("Loaded session '{}' from {:?}", session.timeline.name, path);
        Ok(session)
    }

    /// Replace the settings with `dir`'s settings file, if there is one.
    ///
    /// Returns whether a file was found.
    pub fn load_settings_from(&mut self, dir: &Path) -> Result<bool, SessionError> {
        let path = dir.join(SETTINGS_FILE_NAME);
        if !path.is_file() {
            return Ok(false);
        }
        self.settings = PlayerSettings::load(&path)?;
        tracing::info!("Using player settings from {:?}", path);
        Ok(true)
    }

    fn step(&self) -> f32 {
        if self.frame_delta > 0.0 {
            self.frame_delta
        } else {
            tracing::warn!(
                "frame_delta {} is not positive, using {}",
                self.frame_delta,
                DEFAULT_PREVIEW_STEP
            );
            DEFAULT_PREVIEW_STEP
        }
    }
}

/// What a preview run did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunReport {
    /// Frames the player advanced
    pub player_frames: u32,
    /// The player reached its natural end
    pub completed: bool,
    /// Configuration issues reported at init
    pub issues: usize,
    /// Steps the editor preview took
    pub preview_frames: u64,
}

/// Play `session` on a fresh scene node, then replay it in the editor preview
pub fn run(session: &PreviewSession) -> RunReport {
    let node = SceneNode::new("demo");
    let mut timeline = session.timeline.clone();
    for sequence in timeline.sequences_mut() {
        sequence.add_target(node.handle());
    }

    let mut report = RunReport::default();
    let mut player = Player::new(timeline).with_settings(&session.settings);
    let started = if player.play_on_awake {
        player.awake()
    } else {
        player.play()
    };
    if let Err(err) = started {
        report.issues = err.issues.len();
    }

    let delta = FrameDelta::uniform(session.step());
    tracing::info!("Start: {node}");
    while report.player_frames < session.max_frames {
        match player.tick(delta) {
            TickOutcome::Updated { time } => {
                report.player_frames += 1;
                tracing::debug!("frame {:>4} t={:.3} {}", report.player_frames, time, node);
            }
            TickOutcome::Completed => {
                report.player_frames += 1;
                report.completed = true;
                break;
            }
            TickOutcome::Idle => break,
        }
    }
    if !report.completed {
        if session.timeline.loop_mode.completes() {
            tracing::warn!(
                "Timeline '{}' did not complete within {} frames",
                session.timeline.name,
                session.max_frames
            );
        } else {
            tracing::info!("Looping timeline stopped at frame cap {}", session.max_frames);
        }
        player.stop();
    }
    tracing::info!("End: {node}");

    player.restore();
    tracing::info!("Restored: {node}");

    let mut timeline = player.into_timeline();
    let mut preview = Preview::new().with_settings(&session.settings);
    if let Err(err) = preview.start(&mut timeline) {
        tracing::warn!("{err}");
    }
    while preview.step(&mut timeline) {}
    report.preview_frames = preview.frame_count;
    tracing::info!(
        "Preview finished after {} steps, back in {}: {node}",
        preview.frame_count,
        preview.status_text()
    );

    report
}
