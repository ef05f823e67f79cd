use crate::backends::RawInput;
use crate::interaction::{KeyCode, Pose};
use std::collections::{HashMap, HashSet};

/// In-memory input layer.
///
/// Values persist until overwritten, like a real device holding its last report.
/// `sample_axis` returns the same value as `sample_axis_raw` unless a smoothed value was
/// set explicitly.
#[derive(Default, Debug, Clone)]
pub struct VirtualInput {
    devices: Vec<String>,
    raw_axes: HashMap<String, f32>,
    smoothed_axes: HashMap<String, f32>,
    keys: HashSet<KeyCode>,
    poses: HashMap<String, Pose>,
}

impl VirtualInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report a device as connected.
    pub fn connect(&mut self, raw_name: &str) {
        if !self.devices.iter().any(|d| d == raw_name) {
            self.devices.push(raw_name.to_string());
        }
    }

    /// Report a device as gone. Its pose is forgotten.
    pub fn disconnect(&mut self, raw_name: &str) {
        self.devices.retain(|d| d != raw_name);
        self.poses.remove(raw_name);
    }

    /// Set a continuous channel (raw and smoothed).
    pub fn set_axis(&mut self, channel: &str, value: f32) {
        self.raw_axes.insert(channel.to_string(), value);
        self.smoothed_axes.remove(channel);
    }

    /// Override the smoothed reading of a channel only.
    pub fn set_smoothed_axis(&mut self, channel: &str, value: f32) {
        self.smoothed_axes.insert(channel.to_string(), value);
    }

    pub fn press_key(&mut self, key: KeyCode) {
        self.keys.insert(key);
    }

    pub fn release_key(&mut self, key: KeyCode) {
        self.keys.remove(&key);
    }

    pub fn set_key(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            self.press_key(key);
        } else {
            self.release_key(key);
        }
    }

    pub fn set_pose(&mut self, raw_name: &str, pose: Pose) {
        self.poses.insert(raw_name.to_string(), pose);
    }

    pub fn clear_pose(&mut self, raw_name: &str) {
        self.poses.remove(raw_name);
    }
}

impl RawInput for VirtualInput {
    fn sample_axis_raw(&self, channel: &str) -> f32 {
        self.raw_axes.get(channel).copied().unwrap_or(0.0)
    }

    fn sample_axis(&self, channel: &str) -> f32 {
        self.smoothed_axes
            .get(channel)
            .copied()
            .unwrap_or_else(|| self.sample_axis_raw(channel))
    }

    fn sample_key(&self, key: KeyCode) -> bool {
        self.keys.contains(&key)
    }

    fn enumerate_device_names(&self) -> Vec<String> {
        self.devices.clone()
    }

    fn tracked_pose(&self, raw_device_id: &str) -> Option<Pose> {
        self.poses.get(raw_device_id).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_defaults_to_zero() {
        let mut input = VirtualInput::new();
        assert_eq!(input.sample_axis_raw("AXIS_9"), 0.0);
        input.set_axis("AXIS_9", 0.5);
        assert_eq!(input.sample_axis("AXIS_9"), 0.5);
        input.set_smoothed_axis("AXIS_9", 0.4);
        assert_eq!(input.sample_axis_raw("AXIS_9"), 0.5);
        assert_eq!(input.sample_axis("AXIS_9"), 0.4);
    }

    #[test]
    fn test_connect_is_idempotent() {
        let mut input = VirtualInput::new();
        input.connect("Vive Wand Left");
        input.connect("Vive Wand Left");
        input.connect("Vive Wand Right");
        assert_eq!(input.enumerate_device_names().len(), 2);
        input.disconnect("Vive Wand Left");
        assert_eq!(input.enumerate_device_names(), vec!["Vive Wand Right".to_string()]);
    }

    #[test]
    fn test_keys() {
        let mut input = VirtualInput::new();
        input.set_key(KeyCode(3), true);
        assert!(input.sample_key(KeyCode(3)));
        input.set_key(KeyCode(3), false);
        assert!(!input.sample_key(KeyCode(3)));
    }
}
