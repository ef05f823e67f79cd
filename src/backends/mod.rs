//! Raw input backends.
//!
//! A backend is the platform joystick layer the update engine samples from. It answers
//! three kinds of reads, all synchronous and non-blocking:
//!
//! - continuous channels by name (`AXIS_9`, ...), raw or smoothed;
//! - joystick buttons by [`KeyCode`];
//! - the list of device names currently connected.
//!
//! Tracked devices may additionally report a grip pose per raw device id.
//!
//! [`virtual_input::VirtualInput`] is an in-memory backend for tests, replays and hosts
//! that push their platform's state into the engine each frame.

use crate::interaction::{KeyCode, Pose};

pub mod virtual_input;

pub use virtual_input::VirtualInput;

/// Platform input layer sampled once per tick.
pub trait RawInput {
    /// Unfiltered value of a continuous channel.
    fn sample_axis_raw(&self, channel: &str) -> f32;

    /// Value of a continuous channel after the platform's own dead zone/smoothing.
    fn sample_axis(&self, channel: &str) -> f32;

    /// Whether a joystick button is held.
    fn sample_key(&self, key: KeyCode) -> bool;

    /// Raw names of every connected device, in platform slot order.
    fn enumerate_device_names(&self) -> Vec<String>;

    /// Grip pose of a tracked device, if the platform tracks it.
    fn tracked_pose(&self, _raw_device_id: &str) -> Option<Pose> {
        None
    }
}
