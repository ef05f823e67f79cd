//! Semantic input events and the consumer boundary.
//!
//! The update engine never talks to an application directly. It raises events through an
//! [`InputSink`], the same surface an engine-wide input system exposes: source
//! detected/lost, input down/up/pressed, position changed, pose changed.
//!
//! ## Value conventions
//! - **Down/Up:** edge events of a boolean interaction, raised once per transition.
//! - **Pressed:** repeats every tick a digital input is held (`value: None`), or carries the
//!   new reading of a single-axis input whenever it changes (`value: Some(v)`).
//! - **PositionChanged:** new 2D reading of a stick/pad, only when it changed.
//! - **PoseChanged:** new pose of a pointer/grip, only when it changed.

use crate::classifier::Handedness;
use crate::interaction::{InputAction, Pose};
use glam::Vec2;
use std::time::Instant;

/// What happened.
#[derive(Clone, Debug, PartialEq)]
pub enum InputKind {
    /// A controller was built and registered.
    SourceDetected { name: String },

    /// A registered controller went away.
    SourceLost { name: String },

    /// A boolean input transitioned to `true`.
    Down,

    /// A boolean input transitioned to `false`.
    Up,

    /// A digital input is held (`None`) or a single axis moved (`Some(value)`).
    Pressed { value: Option<f32> },

    /// A dual-axis input moved.
    PositionChanged { position: Vec2 },

    /// A pose input moved.
    PoseChanged { pose: Pose },
}

impl InputKind {
    pub fn is_source(&self) -> bool {
        matches!(
            self,
            InputKind::SourceDetected { .. } | InputKind::SourceLost { .. }
        )
    }

    pub fn is_digital(&self) -> bool {
        matches!(
            self,
            InputKind::Down | InputKind::Up | InputKind::Pressed { value: None }
        )
    }

    pub fn is_axis(&self) -> bool {
        matches!(
            self,
            InputKind::Pressed { value: Some(_) } | InputKind::PositionChanged { .. }
        )
    }

    pub fn is_pose(&self) -> bool {
        matches!(self, InputKind::PoseChanged { .. })
    }
}

/// Timestamped event raised for one input source.
#[derive(Clone, Debug)]
pub struct InputEvent {
    /// Capture time (monotonic).
    pub at: Instant,
    pub source_id: u32,
    pub handedness: Handedness,
    /// Bound application action ([`InputAction::NONE`] for source events).
    pub action: InputAction,
    pub kind: InputKind,
}

impl InputEvent {
    pub fn new(
        source_id: u32,
        handedness: Handedness,
        action: InputAction,
        kind: InputKind,
    ) -> Self {
        Self {
            at: Instant::now(),
            source_id,
            handedness,
            action,
            kind,
        }
    }
}

/// Receiver of semantic input events.
///
/// Only [`InputSink::raise`] is required; the `raise_*` helpers build the event.
pub trait InputSink {
    fn raise(&mut self, event: InputEvent);

    fn raise_source_detected(&mut self, source_id: u32, handedness: Handedness, name: &str) {
        self.raise(InputEvent::new(
            source_id,
            handedness,
            InputAction::NONE,
            InputKind::SourceDetected {
                name: name.to_string(),
            },
        ));
    }

    fn raise_source_lost(&mut self, source_id: u32, handedness: Handedness, name: &str) {
        self.raise(InputEvent::new(
            source_id,
            handedness,
            InputAction::NONE,
            InputKind::SourceLost {
                name: name.to_string(),
            },
        ));
    }

    fn raise_input_down(&mut self, source_id: u32, handedness: Handedness, action: &InputAction) {
        self.raise(InputEvent::new(source_id, handedness, action.clone(), InputKind::Down));
    }

    fn raise_input_up(&mut self, source_id: u32, handedness: Handedness, action: &InputAction) {
        self.raise(InputEvent::new(source_id, handedness, action.clone(), InputKind::Up));
    }

    fn raise_input_pressed(
        &mut self,
        source_id: u32,
        handedness: Handedness,
        action: &InputAction,
        value: Option<f32>,
    ) {
        self.raise(InputEvent::new(
            source_id,
            handedness,
            action.clone(),
            InputKind::Pressed { value },
        ));
    }

    fn raise_position_changed(
        &mut self,
        source_id: u32,
        handedness: Handedness,
        action: &InputAction,
        position: Vec2,
    ) {
        self.raise(InputEvent::new(
            source_id,
            handedness,
            action.clone(),
            InputKind::PositionChanged { position },
        ));
    }

    fn raise_pose_changed(
        &mut self,
        source_id: u32,
        handedness: Handedness,
        action: &InputAction,
        pose: Pose,
    ) {
        self.raise(InputEvent::new(
            source_id,
            handedness,
            action.clone(),
            InputKind::PoseChanged { pose },
        ));
    }
}

/// Collect-only sink.
impl InputSink for Vec<InputEvent> {
    fn raise(&mut self, event: InputEvent) {
        self.push(event);
    }
}
