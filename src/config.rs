//! Engine configuration.
//!
//! Every field is optional in the file; an empty document gives the built-in behaviour.
//!
//! ```toml
//! fallback_type = "GenericOpenVR"
//! pointer_offset_angle = -30.0
//!
//! [[extra_patterns]]
//! pattern = "Index Controller"
//! controller_type = "ViveKnuckles"
//! ```

use crate::classifier::{ControllerType, DeviceClassifier, DEFAULT_NO_DEVICE_PATTERNS};
use crate::error::{ControllerError, Result};
use crate::pointer::DefaultSourceProvider;
use crate::profile::MappingProfile;
use crate::registry::ControllerRegistry;
use crate::variant::VariantFactory;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Extra classification rule checked before the built-in table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternRule {
    pub pattern: String,
    pub controller_type: ControllerType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Type used when no pattern matches a device name.
    pub fallback_type: ControllerType,
    pub no_device_patterns: Vec<String>,
    /// Overrides every variant's pointer offset (degrees).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pointer_offset_angle: Option<f32>,
    pub pointer_extent: f32,
    pub extra_patterns: Vec<PatternRule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<MappingProfile>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fallback_type: ControllerType::GenericOpenVR,
            no_device_patterns: DEFAULT_NO_DEVICE_PATTERNS
                .iter()
                .map(|p| p.to_string())
                .collect(),
            pointer_offset_angle: None,
            pointer_extent: 10.0,
            extra_patterns: Vec::new(),
            profile: None,
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| ControllerError::Config(e.to_string()))
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| ControllerError::Config(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ControllerError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&text)
    }

    /// Built-in pattern table with the extra rules in front.
    pub fn classifier(&self) -> DeviceClassifier {
        let mut classifier = DeviceClassifier::default();
        classifier.set_fallback(self.fallback_type);
        classifier.set_no_device_patterns(self.no_device_patterns.clone());
        for rule in self.extra_patterns.iter().rev() {
            classifier.prepend_pattern(rule.pattern.clone(), rule.controller_type);
        }
        classifier
    }

    pub fn factory(&self) -> VariantFactory {
        let mut factory = VariantFactory::default();
        factory.set_profile(self.profile.clone());
        factory.set_pointer_offset_override(self.pointer_offset_angle);
        factory
    }

    pub fn source_provider(&self) -> DefaultSourceProvider {
        DefaultSourceProvider::new(self.pointer_extent)
    }

    /// Registry wired from this configuration.
    pub fn registry(&self) -> ControllerRegistry {
        ControllerRegistry::new(
            self.classifier(),
            self.factory(),
            Box::new(self.source_provider()),
        )
    }
}
