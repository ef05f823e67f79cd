//! Device classification.
//!
//! Maps a raw device name (as reported by the platform joystick layer) to a
//! [`ControllerType`] and a [`Handedness`]. Matching is plain substring search over an
//! **ordered** pattern list: the first hit wins, so more specific names must be listed
//! before the generic names they contain.
//!
//! ```
//! use xrinput::{classify, ControllerType, Handedness};
//!
//! assert_eq!(
//!     classify("Oculus Touch Controller Left"),
//!     (ControllerType::OculusTouch, Handedness::Left)
//! );
//! assert_eq!(classify(""), (ControllerType::None, Handedness::None));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// Controller family a device is classified into.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControllerType {
    #[default]
    None,
    GenericOpenVR,
    GenericUnity,
    ViveWand,
    ViveKnuckles,
    OculusTouch,
    OculusRemote,
    OculusGo,
    WindowsMixedReality,
    Xbox,
}

impl fmt::Display for ControllerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Hand a controller is associated with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Handedness {
    #[default]
    None,
    Left,
    Right,
}

impl fmt::Display for Handedness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Infer handedness from `"Left"`/`"Right"` in a raw device name.
pub fn handedness_of(raw_name: &str) -> Handedness {
    if raw_name.contains("Left") {
        Handedness::Left
    } else if raw_name.contains("Right") {
        Handedness::Right
    } else {
        Handedness::None
    }
}

/// Built-in name patterns, in precedence order.
pub const DEFAULT_PATTERNS: &[(&str, ControllerType)] = &[
    ("Oculus Rift CV1", ControllerType::OculusTouch),
    ("Oculus Touch", ControllerType::OculusTouch),
    ("Oculus Tracked Remote", ControllerType::OculusGo),
    ("Oculus remote", ControllerType::OculusRemote),
    ("Vive. Controller", ControllerType::ViveWand),
    ("Vive Wand", ControllerType::ViveWand),
    ("Vive Knuckles", ControllerType::ViveKnuckles),
    ("WindowsMR", ControllerType::WindowsMixedReality),
    ("Xbox Controller", ControllerType::Xbox),
    ("Xbox One For Windows", ControllerType::Xbox),
];

/// Substrings that mark an empty joystick slot.
pub const DEFAULT_NO_DEVICE_PATTERNS: &[&str] = &["<0"];

/// Ordered substring classifier.
#[derive(Clone, Debug)]
pub struct DeviceClassifier {
    patterns: Vec<(String, ControllerType)>,
    no_device: Vec<String>,
    fallback: ControllerType,
}

impl Default for DeviceClassifier {
    fn default() -> Self {
        Self {
            patterns: DEFAULT_PATTERNS
                .iter()
                .map(|(p, t)| (p.to_string(), *t))
                .collect(),
            no_device: DEFAULT_NO_DEVICE_PATTERNS
                .iter()
                .map(|p| p.to_string())
                .collect(),
            fallback: ControllerType::GenericOpenVR,
        }
    }
}

impl DeviceClassifier {
    /// Classifier with no patterns; every real name falls back.
    pub fn empty(fallback: ControllerType) -> Self {
        Self {
            patterns: Vec::new(),
            no_device: DEFAULT_NO_DEVICE_PATTERNS
                .iter()
                .map(|p| p.to_string())
                .collect(),
            fallback,
        }
    }

    /// Append a pattern after all existing ones.
    pub fn push_pattern(&mut self, pattern: impl Into<String>, controller_type: ControllerType) {
        self.patterns.push((pattern.into(), controller_type));
    }

    /// Insert a pattern ahead of all existing ones.
    pub fn prepend_pattern(&mut self, pattern: impl Into<String>, controller_type: ControllerType) {
        self.patterns.insert(0, (pattern.into(), controller_type));
    }

    pub fn set_no_device_patterns(&mut self, patterns: Vec<String>) {
        self.no_device = patterns;
    }

    pub fn set_fallback(&mut self, fallback: ControllerType) {
        self.fallback = fallback;
    }

    pub fn fallback(&self) -> ControllerType {
        self.fallback
    }

    pub fn patterns(&self) -> impl Iterator<Item = (&str, ControllerType)> {
        self.patterns.iter().map(|(p, t)| (p.as_str(), *t))
    }

    /// Controller type only. Logs a warning on a miss.
    pub fn controller_type(&self, raw_name: &str) -> ControllerType {
        if raw_name.is_empty() || self.no_device.iter().any(|s| raw_name.contains(s.as_str())) {
            return ControllerType::None;
        }

        if let Some((_, ty)) = self
            .patterns
            .iter()
            .find(|(pattern, _)| raw_name.contains(pattern.as_str()))
        {
            return *ty;
        }

        warn!(
            "{} does not have a defined controller type, falling back to {}",
            raw_name, self.fallback
        );
        self.fallback
    }

    /// Controller type and handedness of `raw_name`.
    pub fn classify(&self, raw_name: &str) -> (ControllerType, Handedness) {
        match self.controller_type(raw_name) {
            ControllerType::None => (ControllerType::None, Handedness::None),
            ty => (ty, handedness_of(raw_name)),
        }
    }
}

/// Classify with the built-in pattern table.
pub fn classify(raw_name: &str) -> (ControllerType, Handedness) {
    DeviceClassifier::default().classify(raw_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oculus_touch_left() {
        assert_eq!(
            classify("Oculus Touch Controller Left"),
            (ControllerType::OculusTouch, Handedness::Left)
        );
        assert_eq!(
            classify("Oculus Rift CV1 (Right Controller)"),
            (ControllerType::OculusTouch, Handedness::Right)
        );
    }

    #[test]
    fn test_empty_and_sentinel_names() {
        assert_eq!(classify(""), (ControllerType::None, Handedness::None));
        assert_eq!(
            classify("<0> Left"),
            (ControllerType::None, Handedness::None)
        );
    }

    #[test]
    fn test_remote_variants() {
        assert_eq!(classify("Oculus Tracked Remote - Right").0, ControllerType::OculusGo);
        assert_eq!(classify("Oculus remote").0, ControllerType::OculusRemote);
        assert_eq!(classify("Oculus remote").1, Handedness::None);
    }

    #[test]
    fn test_first_registered_pattern_wins() {
        let mut classifier = DeviceClassifier::empty(ControllerType::GenericOpenVR);
        classifier.push_pattern("Acme Remote", ControllerType::OculusRemote);
        classifier.push_pattern("Acme", ControllerType::OculusTouch);

        assert_eq!(
            classifier.classify("Acme Remote Left"),
            (ControllerType::OculusRemote, Handedness::Left)
        );
        assert_eq!(
            classifier.classify("Acme Handset Left"),
            (ControllerType::OculusTouch, Handedness::Left)
        );

        classifier.prepend_pattern("Acme", ControllerType::ViveWand);
        assert_eq!(classifier.classify("Acme Remote").0, ControllerType::ViveWand);
    }

    #[test]
    fn test_unknown_name_falls_back() {
        assert_eq!(
            classify("Mystery Wand Right"),
            (ControllerType::GenericOpenVR, Handedness::Right)
        );

        let mut classifier = DeviceClassifier::default();
        classifier.set_fallback(ControllerType::GenericUnity);
        assert_eq!(classifier.classify("Mystery").0, ControllerType::GenericUnity);
    }

    #[test]
    fn test_handedness_prefers_left() {
        assert_eq!(handedness_of("Left Right"), Handedness::Left);
        assert_eq!(handedness_of("left"), Handedness::None);
    }
}
