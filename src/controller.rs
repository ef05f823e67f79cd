//! Controller entity.
//!
//! A [`Controller`] is one physical device: its classified type, the hand it belongs to,
//! its interaction mappings and the grip pose last reported by tracking. Controllers are
//! created and owned by the [`ControllerRegistry`](crate::registry::ControllerRegistry);
//! the update engine mutates their mappings once per tick.

use crate::classifier::{ControllerType, Handedness};
use crate::interaction::{InteractionMapping, Pose};
use crate::pointer::InputSource;
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Tracking status of a controller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrackingState {
    /// Device has no tracking (gamepads, remotes).
    #[default]
    NotApplicable,
    NotTracked,
    Tracked,
}

/// A live controller instance.
#[derive(Debug)]
pub struct Controller {
    raw_device_id: String,
    controller_type: ControllerType,
    handedness: Handedness,
    tracking_state: TrackingState,
    enabled: bool,
    input_source: Option<InputSource>,
    interactions: Vec<InteractionMapping>,
    last_pose: Pose,
    current_pose: Pose,
    /// Degrees about the local left axis applied to the grip rotation for the pointer pose.
    pointer_offset_angle: f32,
}

impl Controller {
    pub fn new(
        raw_device_id: impl Into<String>,
        controller_type: ControllerType,
        handedness: Handedness,
        tracking_state: TrackingState,
    ) -> Self {
        Self {
            raw_device_id: raw_device_id.into(),
            controller_type,
            handedness,
            tracking_state,
            enabled: true,
            input_source: None,
            interactions: Vec::new(),
            last_pose: Pose::ZERO_IDENTITY,
            current_pose: Pose::ZERO_IDENTITY,
            pointer_offset_angle: 0.0,
        }
    }

    pub fn with_interactions(mut self, interactions: Vec<InteractionMapping>) -> Self {
        self.interactions = interactions;
        self
    }

    pub fn with_pointer_offset_angle(mut self, degrees: f32) -> Self {
        self.pointer_offset_angle = degrees;
        self
    }

    pub fn raw_device_id(&self) -> &str {
        &self.raw_device_id
    }

    pub fn controller_type(&self) -> ControllerType {
        self.controller_type
    }

    pub fn handedness(&self) -> Handedness {
        self.handedness
    }

    pub fn tracking_state(&self) -> TrackingState {
        self.tracking_state
    }

    pub fn set_tracking_state(&mut self, state: TrackingState) {
        self.tracking_state = state;
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn input_source(&self) -> Option<&InputSource> {
        self.input_source.as_ref()
    }

    /// Id used on every event raised for this controller (0 before a source is attached).
    pub fn source_id(&self) -> u32 {
        self.input_source.as_ref().map_or(0, |s| s.id)
    }

    /// Attach the input source and bind its pointers to this controller.
    pub fn attach_input_source(&mut self, mut source: InputSource) {
        source.bind_pointers(&self.raw_device_id);
        self.input_source = Some(source);
    }

    pub fn interactions(&self) -> &[InteractionMapping] {
        &self.interactions
    }

    pub fn interactions_mut(&mut self) -> &mut [InteractionMapping] {
        &mut self.interactions
    }

    pub fn set_interactions(&mut self, interactions: Vec<InteractionMapping>) {
        self.interactions = interactions;
    }

    /// Look up a mapping by its description.
    pub fn interaction(&self, description: &str) -> Option<&InteractionMapping> {
        self.interactions
            .iter()
            .find(|m| m.description() == description)
    }

    pub fn pointer_offset_angle(&self) -> f32 {
        self.pointer_offset_angle
    }

    pub fn set_pointer_offset_angle(&mut self, degrees: f32) {
        self.pointer_offset_angle = degrees;
    }

    /// Grip pose reported by tracking this tick.
    pub fn current_pose(&self) -> Pose {
        self.current_pose
    }

    /// Grip pose reported on the previous tracked tick.
    pub fn last_pose(&self) -> Pose {
        self.last_pose
    }

    /// Feed the latest tracked grip pose. `None` marks the controller as not tracked and
    /// keeps the last pose. Returns `true` when the grip pose moved.
    pub fn update_tracking(&mut self, pose: Option<Pose>) -> bool {
        match pose {
            Some(pose) => {
                self.tracking_state = TrackingState::Tracked;
                self.last_pose = self.current_pose;
                self.current_pose = pose;
                self.last_pose != self.current_pose
            }
            None => {
                if self.tracking_state == TrackingState::Tracked {
                    self.tracking_state = TrackingState::NotTracked;
                }
                false
            }
        }
    }

    /// Pointer pose: grip position, grip rotation turned by the offset angle about the
    /// controller's local left axis.
    pub fn pointer_pose(&self) -> Pose {
        let offset = Quat::from_axis_angle(Vec3::NEG_X, self.pointer_offset_angle.to_radians());
        Pose {
            position: self.current_pose.position,
            rotation: self.current_pose.rotation * offset,
        }
    }
}
