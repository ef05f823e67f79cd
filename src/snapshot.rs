//! Per-frame snapshot of controller states.
//!
//! [`Snapshot`] is an **owned**, read-only view of every registered controller at a point
//! in time (typically "this frame"). It is produced by
//! [`ControllerManager::snapshot`](crate::manager::ControllerManager::snapshot) and is cheap
//! to clone for fan-out to multiple consumers.
//!
//! # Semantics
//! - Keys are raw device ids (the names the input layer enumerates).
//! - Values are [`ControllerState`]s: identity, tracking, and each interaction's last
//!   value keyed by its description.
//! - A snapshot does **not** sample input; it reflects the values stored by the last tick.
//!
//! # Examples
//! ```no_run
//! use xrinput::Snapshot;
//!
//! fn print_triggers(snap: &Snapshot) {
//!     for (id, state) in snap.iter() {
//!         println!("{id}: trigger={:.2} select={}",
//!                  state.get_float("Trigger Position"),
//!                  state.get_bool("Trigger Press (Select)"));
//!     }
//! }
//! ```

use crate::classifier::{ControllerType, Handedness};
use crate::controller::{Controller, TrackingState};
use crate::interaction::{InteractionValue, Pose};
use glam::Vec2;
use std::collections::HashMap;

/// Stored state of one controller.
#[derive(Clone, Debug, PartialEq)]
pub struct ControllerState {
    pub controller_type: ControllerType,
    pub handedness: Handedness,
    pub tracking_state: TrackingState,
    pub enabled: bool,
    pub source_id: u32,
    pub values: HashMap<String, InteractionValue>,
}

impl ControllerState {
    pub fn get(&self, description: &str) -> Option<&InteractionValue> {
        self.values.get(description)
    }

    pub fn get_bool(&self, description: &str) -> bool {
        self.get(description)
            .and_then(InteractionValue::as_bool)
            .unwrap_or(false)
    }

    pub fn get_float(&self, description: &str) -> f32 {
        self.get(description)
            .and_then(InteractionValue::as_float)
            .unwrap_or(0.0)
    }

    pub fn get_vector2(&self, description: &str) -> Vec2 {
        self.get(description)
            .and_then(InteractionValue::as_vector2)
            .unwrap_or(Vec2::ZERO)
    }

    pub fn get_pose(&self, description: &str) -> Pose {
        self.get(description)
            .and_then(InteractionValue::as_pose)
            .unwrap_or_default()
    }
}

impl From<&Controller> for ControllerState {
    fn from(controller: &Controller) -> Self {
        Self {
            controller_type: controller.controller_type(),
            handedness: controller.handedness(),
            tracking_state: controller.tracking_state(),
            enabled: controller.enabled(),
            source_id: controller.source_id(),
            values: controller
                .interactions()
                .iter()
                .map(|m| (m.description().to_string(), *m.value()))
                .collect(),
        }
    }
}

/// Owned snapshot of current controller states (`raw device id → ControllerState`).
#[derive(Clone, Debug, Default)]
pub struct Snapshot(pub HashMap<String, ControllerState>);

impl Snapshot {
    /// Get the state for a specific raw device id.
    #[inline]
    pub fn get(&self, raw_device_id: &str) -> Option<&ControllerState> {
        self.0.get(raw_device_id)
    }

    /// Iterate `(raw_device_id, state)` pairs.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ControllerState)> {
        self.0.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consume the snapshot and return the inner map.
    #[inline]
    pub fn into_inner(self) -> HashMap<String, ControllerState> {
        self.0
    }
}
