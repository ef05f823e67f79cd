//! Serializable mapping profiles.
//!
//! A [`MappingProfile`] replaces the built-in interaction layout of one or more
//! `(controller type, handedness)` pairs, and is where application actions get bound to
//! interactions. Profiles round-trip through TOML and JSON.
//!
//! ```toml
//! name = "Sample"
//!
//! [[controllers]]
//! controller_type = "GenericUnity"
//! handedness = "None"
//!
//! [[controllers.interactions]]
//! id = 0
//! description = "Fire"
//! axis = "Digital"
//! input = "ButtonPress"
//! key = 0
//! action = { id = 3, description = "Fire" }
//! ```

use crate::classifier::{ControllerType, Handedness};
use crate::error::{ControllerError, Result};
use crate::interaction::{ActionKind, AxisKind, InputAction, InteractionMapping, KeyCode};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Serialized form of an [`InteractionMapping`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionMappingDesc {
    pub id: u32,
    pub description: String,
    pub axis: AxisKind,
    pub input: ActionKind,
    #[serde(default)]
    pub action: InputAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub axis_x: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub axis_y: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<KeyCode>,
    #[serde(default)]
    pub invert_x: bool,
    #[serde(default)]
    pub invert_y: bool,
}

impl From<&InteractionMappingDesc> for InteractionMapping {
    fn from(desc: &InteractionMappingDesc) -> Self {
        let mut mapping = InteractionMapping::new(desc.id, &desc.description, desc.axis, desc.input)
            .with_action(desc.action.clone())
            .with_inversion(desc.invert_x, desc.invert_y);
        match (&desc.axis_x, &desc.axis_y) {
            (Some(x), Some(y)) => mapping = mapping.with_channels(x, y),
            (Some(x), None) => mapping = mapping.with_channel(x),
            _ => {}
        }
        if let Some(key) = desc.key {
            mapping = mapping.with_key(key);
        }
        mapping
    }
}

impl From<&InteractionMapping> for InteractionMappingDesc {
    fn from(mapping: &InteractionMapping) -> Self {
        Self {
            id: mapping.id(),
            description: mapping.description().to_string(),
            axis: mapping.axis_kind(),
            input: mapping.action_kind(),
            action: mapping.action().clone(),
            axis_x: mapping.channel_x().map(str::to_string),
            axis_y: mapping.channel_y().map(str::to_string),
            key: mapping.key(),
            invert_x: mapping.invert_x(),
            invert_y: mapping.invert_y(),
        }
    }
}

/// Layout for one controller type and hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControllerMapping {
    pub controller_type: ControllerType,
    #[serde(default)]
    pub handedness: Handedness,
    #[serde(default)]
    pub interactions: Vec<InteractionMappingDesc>,
}

/// Named set of controller layouts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MappingProfile {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub controllers: Vec<ControllerMapping>,
}

impl MappingProfile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Add (or replace) the layout for `(controller_type, handedness)`.
    pub fn set_layout(
        &mut self,
        controller_type: ControllerType,
        handedness: Handedness,
        interactions: &[InteractionMapping],
    ) {
        let interactions = interactions.iter().map(InteractionMappingDesc::from).collect();
        match self
            .controllers
            .iter_mut()
            .find(|c| c.controller_type == controller_type && c.handedness == handedness)
        {
            Some(entry) => entry.interactions = interactions,
            None => self.controllers.push(ControllerMapping {
                controller_type,
                handedness,
                interactions,
            }),
        }
    }

    pub fn find(
        &self,
        controller_type: ControllerType,
        handedness: Handedness,
    ) -> Option<&ControllerMapping> {
        self.controllers
            .iter()
            .find(|c| c.controller_type == controller_type && c.handedness == handedness)
    }

    /// Fresh interaction mappings for `(controller_type, handedness)`, if the profile has them.
    pub fn interactions_for(
        &self,
        controller_type: ControllerType,
        handedness: Handedness,
    ) -> Option<Vec<InteractionMapping>> {
        self.find(controller_type, handedness)
            .map(|entry| entry.interactions.iter().map(InteractionMapping::from).collect())
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| ControllerError::Profile(e.to_string()))
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| ControllerError::Profile(e.to_string()))
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        serde_json::from_str(s).map_err(|e| ControllerError::Profile(e.to_string()))
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| ControllerError::Profile(e.to_string()))
    }

    /// Load a profile, picking JSON for `.json` files and TOML otherwise.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ControllerError::Profile(format!("{}: {e}", path.display())))?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&text),
            _ => Self::from_toml_str(&text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping_library;

    const SAMPLE: &str = r#"
        name = "Sample"

        [[controllers]]
        controller_type = "GenericUnity"

        [[controllers.interactions]]
        id = 0
        description = "Fire"
        axis = "Digital"
        input = "ButtonPress"
        key = 0
        action = { id = 3, description = "Fire" }

        [[controllers.interactions]]
        id = 1
        description = "Move"
        axis = "DualAxis"
        input = "Thumbstick"
        axis_x = "AXIS_1"
        axis_y = "AXIS_2"
        invert_y = true
    "#;

    #[test]
    fn test_parse_toml_profile() {
        let profile = MappingProfile::from_toml_str(SAMPLE).expect("parse");
        assert_eq!(profile.name, "Sample");

        let layout = profile
            .interactions_for(ControllerType::GenericUnity, Handedness::None)
            .expect("layout");
        assert_eq!(layout.len(), 2);
        assert_eq!(layout[0].key(), Some(KeyCode(0)));
        assert_eq!(layout[0].action().id, 3);
        assert_eq!(layout[1].channel_y(), Some("AXIS_2"));
        assert!(layout[1].invert_y());

        assert!(profile
            .interactions_for(ControllerType::GenericUnity, Handedness::Left)
            .is_none());
    }

    #[test]
    fn test_toml_and_json_agree() {
        let mut profile = MappingProfile::new("Touch");
        profile.set_layout(
            ControllerType::OculusTouch,
            Handedness::Left,
            &mapping_library::oculus_touch(Handedness::Left),
        );

        let toml_str = profile.to_toml_string().expect("serialize toml");
        assert!(toml_str.contains("AXIS_9"));
        let from_toml = MappingProfile::from_toml_str(&toml_str).expect("deserialize toml");

        let json = profile.to_json_string().expect("serialize json");
        let from_json = MappingProfile::from_json_str(&json).expect("deserialize json");

        assert_eq!(from_toml, profile);
        assert_eq!(from_json, profile);
    }

    #[test]
    fn test_set_layout_replaces_entry() {
        let mut profile = MappingProfile::new("p");
        let layout = mapping_library::xbox(Handedness::None);
        profile.set_layout(ControllerType::Xbox, Handedness::None, &layout);
        profile.set_layout(ControllerType::Xbox, Handedness::None, &[]);
        assert_eq!(profile.controllers.len(), 1);
        assert!(profile.controllers[0].interactions.is_empty());
    }

    #[test]
    fn test_bad_profile_is_an_error() {
        let err = MappingProfile::from_toml_str("name = 5").unwrap_err();
        assert!(matches!(err, ControllerError::Profile(_)));
    }
}
