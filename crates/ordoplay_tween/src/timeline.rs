// SPDX-License-Identifier: MIT OR Apache-2.0
//! Timeline holding an ordered set of sequences.

use crate::error::InitError;
use crate::property::{PropertyKind, Space};
use crate::sequence::{Sequence, SequenceId};
use crate::target::TargetHandle;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// How playback continues once the clock reaches the timeline's duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum LoopMode {
    /// Play forward once, then settle and complete
    #[default]
    PlayOnce,
    /// Wrap back to the start forever
    Loop,
    /// Play forward, mirror back, then complete
    PingPongOnce,
    /// Play forward and back forever
    PingPongLoop,
}

impl LoopMode {
    /// Whether this mode ever completes on its own
    pub fn completes(&self) -> bool {
        matches!(self, LoopMode::PlayOnce | LoopMode::PingPongOnce)
    }

    /// Whether the clock runs a mirrored return sweep
    pub fn is_pingpong(&self) -> bool {
        matches!(self, LoopMode::PingPongOnce | LoopMode::PingPongLoop)
    }
}

/// An ordered set of sequences sharing one duration and loop mode.
///
/// Sequences are independent; when two drive the same channel of the same
/// target, the later one in list order wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timeline {
    /// Timeline name
    #[serde(default)]
    pub name: String,
    /// Playback length of one forward sweep, in seconds
    duration: f32,
    /// Loop behavior
    #[serde(default)]
    pub loop_mode: LoopMode,
    /// Sequences in evaluation order
    #[serde(default, with = "sequence_list")]
    sequences: IndexMap<SequenceId, Sequence>,
}

impl Timeline {
    /// Create an empty timeline
    pub fn new(name: impl Into<String>, duration: f32) -> Self {
        Self {
            name: name.into(),
            duration,
            loop_mode: LoopMode::PlayOnce,
            sequences: IndexMap::new(),
        }
    }

    /// Set the loop mode
    pub fn with_loop_mode(mut self, loop_mode: LoopMode) -> Self {
        self.loop_mode = loop_mode;
        self
    }

    /// Append a sequence
    pub fn with_sequence(mut self, sequence: Sequence) -> Self {
        self.add_sequence(sequence);
        self
    }

    /// Playback length of one forward sweep
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Change the duration, pulling every sequence window inside it
    pub fn set_duration(&mut self, duration: f32) {
        self.duration = duration;
        for sequence in self.sequences.values_mut() {
            sequence.clamp_to(duration);
        }
    }

    /// Append a sequence, returning its id.
    ///
    /// A sequence whose id is already present (a clone, for example) gets a
    /// fresh id so it never replaces an existing entry.
    pub fn add_sequence(&mut self, mut sequence: Sequence) -> SequenceId {
        if self.sequences.contains_key(&sequence.id) {
            sequence.id = SequenceId::new();
        }
        let id = sequence.id;
        self.sequences.insert(id, sequence);
        id
    }

    /// Append a local-position sequence spanning the whole timeline,
    /// optionally bound to a default target
    pub fn new_sequence(&mut self, target: Option<TargetHandle>) -> SequenceId {
        let mut sequence =
            Sequence::new(PropertyKind::Position(Space::Local)).with_window(0.0, self.duration);
        sequence.targets.extend(target);
        self.add_sequence(sequence)
    }

    /// Remove a sequence, keeping the order of the rest
    pub fn remove_sequence(&mut self, id: SequenceId) -> Option<Sequence> {
        self.sequences.shift_remove(&id)
    }

    /// Move a sequence to `index` in evaluation order
    pub fn move_sequence(&mut self, id: SequenceId, index: usize) -> bool {
        let Some(from) = self.sequences.get_index_of(&id) else {
            return false;
        };
        if index >= self.sequences.len() {
            return false;
        }
        self.sequences.move_index(from, index);
        true
    }

    /// Get a sequence
    pub fn sequence(&self, id: SequenceId) -> Option<&Sequence> {
        self.sequences.get(&id)
    }

    /// Get a mutable sequence
    pub fn sequence_mut(&mut self, id: SequenceId) -> Option<&mut Sequence> {
        self.sequences.get_mut(&id)
    }

    /// Get all sequences in evaluation order
    pub fn sequences(&self) -> impl Iterator<Item = &Sequence> {
        self.sequences.values()
    }

    /// Get all sequences mutably
    pub fn sequences_mut(&mut self) -> impl Iterator<Item = &mut Sequence> {
        self.sequences.values_mut()
    }

    /// Get sequence count
    pub fn sequence_count(&self) -> usize {
        self.sequences.len()
    }

    /// Latest end time across all sequences
    pub fn content_duration(&self) -> f32 {
        self.sequences
            .values()
            .map(|s| s.end_time)
            .fold(0.0, f32::max)
    }

    /// Initialize every sequence, collecting all configuration issues
    pub fn init(&mut self) -> Result<(), InitError> {
        let mut issues = Vec::new();
        for sequence in self.sequences.values_mut() {
            if let Err(err) = sequence.init() {
                issues.extend(err.issues);
            }
        }
        let content = self.content_duration();
        if content > self.duration {
            tracing::warn!(
                "Timeline '{}' has sequences ending at {}s, past its {}s duration",
                self.name,
                content,
                self.duration
            );
        }
        tracing::debug!(
            "Initialized timeline '{}' ({} sequences)",
            self.name,
            self.sequences.len()
        );
        InitError::check(issues)
    }

    /// Evaluate every sequence at `cur_time`
    pub fn update(&self, cur_time: f32) {
        for sequence in self.sequences.values() {
            sequence.update(cur_time);
        }
    }

    /// Settle every sequence at the end of a play session
    pub fn end(&self, is_pingpong: bool) {
        for sequence in self.sequences.values() {
            sequence.end(is_pingpong);
        }
    }

    /// Restore every sequence's targets to their captured origins
    pub fn restore(&mut self) {
        for sequence in self.sequences.values_mut() {
            sequence.restore();
        }
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new("Untitled Timeline", 1.0)
    }
}

/// Sequences are stored as a plain list; ids come from each sequence.
mod sequence_list {
    use super::{Sequence, SequenceId};
    use indexmap::IndexMap;
    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(
        sequences: &IndexMap<SequenceId, Sequence>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(sequences.values())
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<IndexMap<SequenceId, Sequence>, D::Error> {
        let list = Vec::<Sequence>::deserialize(deserializer)?;
        let mut sequences = IndexMap::with_capacity(list.len());
        for mut sequence in list {
            if sequences.contains_key(&sequence.id) {
                let fresh = SequenceId::new();
                tracing::warn!("Duplicate sequence id {}, reassigned to {}", sequence.id, fresh);
                sequence.id = fresh;
            }
            sequences.insert(sequence.id, sequence);
        }
        Ok(sequences)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigIssue;
    use crate::test_support::{Node, ScaleOnly};

    fn slide(node: &std::rc::Rc<Node>, to: f32) -> Sequence {
        Sequence::new(PropertyKind::Position(Space::Local))
            .with_window(0.0, 2.0)
            .with_vec3([0.0; 3], [to, 0.0, 0.0])
            .with_target(node.handle())
    }

    #[test]
    fn test_update_fans_out() {
        let node = Node::new("cube");
        let mut timeline = Timeline::new("slide", 2.0)
            .with_sequence(slide(&node, 10.0))
            .with_sequence(
                Sequence::new(PropertyKind::Alpha)
                    .with_window(0.0, 1.0)
                    .with_scalar(1.0, 0.0)
                    .with_target(node.handle()),
            );
        timeline.init().unwrap();

        timeline.update(1.0);
        assert_eq!(node.position.get(), [5.0, 0.0, 0.0]);
        assert_eq!(node.alpha.get(), 0.0);
    }

    #[test]
    fn test_last_sequence_wins() {
        let node = Node::new("cube");
        let mut timeline = Timeline::new("overlap", 2.0);
        let first = timeline.add_sequence(slide(&node, 10.0));
        let second = timeline.add_sequence(slide(&node, 20.0));
        timeline.init().unwrap();

        timeline.update(1.0);
        assert_eq!(node.position.get(), [10.0, 0.0, 0.0]);

        assert!(timeline.move_sequence(second, 0));
        timeline.update(1.0);
        assert_eq!(node.position.get(), [5.0, 0.0, 0.0]);
        assert_eq!(timeline.sequences().next().map(|s| s.id), Some(second));
        assert!(timeline.sequence(first).is_some());
    }

    #[test]
    fn test_end_and_restore() {
        let node = Node::new("cube");
        node.position.set([1.0, 1.0, 1.0]);
        let mut timeline = Timeline::new("slide", 2.0).with_sequence(slide(&node, 10.0));
        timeline.init().unwrap();

        timeline.end(false);
        assert_eq!(node.position.get(), [10.0, 0.0, 0.0]);
        timeline.restore();
        assert_eq!(node.position.get(), [1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_init_collects_issues_from_every_sequence() {
        let mut timeline = Timeline::new("broken", 1.0)
            .with_sequence(
                Sequence::new(PropertyKind::Color)
                    .with_window(0.0, 1.0)
                    .with_target(ScaleOnly::new("a")),
            )
            .with_sequence(Sequence::new(PropertyKind::Alpha).with_window(1.0, 0.5));

        let err = timeline.init().unwrap_err();
        assert_eq!(err.issues.len(), 2);
        assert!(matches!(err.issues[0], ConfigIssue::MissingCapability { .. }));
        assert!(matches!(err.issues[1], ConfigIssue::InvertedWindow { .. }));
    }

    #[test]
    fn test_set_duration_clamps_windows() {
        let node = Node::new("cube");
        let mut timeline = Timeline::new("slide", 2.0);
        let id = timeline.add_sequence(slide(&node, 10.0));
        timeline.set_duration(1.5);
        assert_eq!(timeline.duration(), 1.5);
        assert_eq!(timeline.sequence(id).map(|s| s.end_time), Some(1.5));
        assert_eq!(timeline.content_duration(), 1.5);
    }

    #[test]
    fn test_new_sequence_defaults() {
        let node = Node::new("cube");
        let mut timeline = Timeline::new("authoring", 3.0);
        let id = timeline.new_sequence(Some(node.handle()));
        let Some(sequence) = timeline.sequence(id) else {
            panic!("sequence was added");
        };
        assert_eq!(sequence.property_kind, PropertyKind::Position(Space::Local));
        assert_eq!(sequence.end_time, 3.0);
        assert_eq!(sequence.target_count(), 1);

        assert!(timeline.remove_sequence(id).is_some());
        assert_eq!(timeline.sequence_count(), 0);
    }

    #[test]
    fn test_serialization() {
        let node = Node::new("cube");
        let timeline = Timeline::new("saved", 2.0)
            .with_loop_mode(LoopMode::PingPongLoop)
            .with_sequence(slide(&node, 4.0));
        let ron_str =
            ron::ser::to_string_pretty(&timeline, ron::ser::PrettyConfig::default()).unwrap();
        let loaded: Timeline = ron::from_str(&ron_str).unwrap();

        assert_eq!(loaded.name, "saved");
        assert_eq!(loaded.loop_mode, LoopMode::PingPongLoop);
        assert_eq!(loaded.sequence_count(), 1);
        let sequence = loaded.sequences().next().unwrap();
        assert_eq!(sequence.end, [4.0, 0.0, 0.0, 0.0]);
        assert_eq!(sequence.target_count(), 0);
        assert!(!sequence.is_initialized());
    }

    #[test]
    fn test_adding_a_clone_appends() {
        let node = Node::new("cube");
        let position = slide(&node, 10.0);
        let mut scale = position.clone();
        scale.property_kind = PropertyKind::Scale;
        scale.end = [5.0, 0.0, 0.0, 0.0];

        let mut timeline = Timeline::new("clones", 2.0);
        let first = timeline.add_sequence(position);
        let second = timeline.add_sequence(scale);
        assert_ne!(first, second);
        assert_eq!(timeline.sequence_count(), 2);
        assert_eq!(
            timeline.sequence(first).map(|s| s.property_kind),
            Some(PropertyKind::Position(Space::Local))
        );

        timeline.init().unwrap();
        timeline.update(2.0);
        assert_eq!(node.position.get(), [10.0, 0.0, 0.0]);
        assert_eq!(node.scale.get(), [5.0, 0.0, 0.0]);
    }

    #[test]
    fn test_duplicate_ids_in_file_are_kept() {
        #[derive(Serialize)]
        struct RawTimeline<'a> {
            name: &'a str,
            duration: f32,
            sequences: Vec<&'a Sequence>,
        }

        let node = Node::new("cube");
        let first = slide(&node, 1.0);
        let mut second = first.clone();
        second.end = [2.0, 0.0, 0.0, 0.0];
        let raw = RawTimeline {
            name: "dupes",
            duration: 2.0,
            sequences: vec![&first, &second],
        };
        let ron_str = ron::ser::to_string(&raw).unwrap();

        let loaded: Timeline = ron::from_str(&ron_str).unwrap();
        assert_eq!(loaded.sequence_count(), 2);
        let ends: Vec<f32> = loaded.sequences().map(|s| s.end[0]).collect();
        assert_eq!(ends, vec![1.0, 2.0]);
        assert!(loaded.sequence(first.id).is_some());
    }

    #[test]
    fn test_loop_mode_flags() {
        assert!(LoopMode::PlayOnce.completes());
        assert!(LoopMode::PingPongOnce.completes());
        assert!(!LoopMode::Loop.completes());
        assert!(LoopMode::PingPongLoop.is_pingpong());
        assert!(!LoopMode::Loop.is_pingpong());
    }
}
