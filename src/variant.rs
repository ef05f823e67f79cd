//! Controller variant factory.
//!
//! Each [`ControllerType`] maps to one [`VariantDescriptor`]: a constructor for its default
//! interaction layout, a pointer offset angle, and its setup requirements. Building a
//! controller is two steps:
//!
//! 1. construct the instance (unknown type → [`ControllerError::UnsupportedType`]);
//! 2. set it up: pick the layout (profile override, else the variant default) and
//!    validate it (rejection → [`ControllerError::SetupFailed`], instance discarded).

use crate::classifier::{ControllerType, Handedness};
use crate::controller::{Controller, TrackingState};
use crate::error::{ControllerError, Result};
use crate::interaction::{ActionKind, AxisKind, InteractionMapping};
use crate::mapping_library as lib;
use crate::pointer::InputSource;
use crate::profile::MappingProfile;
use std::collections::{HashMap, HashSet};
use tracing::{debug, error};

/// Builds the default interaction layout for a hand.
pub type LayoutFn = fn(Handedness) -> Vec<InteractionMapping>;

/// Variant-specific check run on the chosen layout during setup.
pub type ValidateFn = fn(Handedness, &[InteractionMapping]) -> std::result::Result<(), String>;

/// Static description of a controller variant.
#[derive(Clone, Copy)]
pub struct VariantDescriptor {
    pub name: &'static str,
    pub default_interactions: LayoutFn,
    /// Degrees about the local left axis between grip and pointer.
    pub pointer_offset_angle: f32,
    /// Setup fails for controllers without a Left/Right hand.
    pub requires_handedness: bool,
    /// Positionally tracked device.
    pub tracked: bool,
    pub validate: ValidateFn,
}

impl std::fmt::Debug for VariantDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VariantDescriptor")
            .field("name", &self.name)
            .field("pointer_offset_angle", &self.pointer_offset_angle)
            .field("requires_handedness", &self.requires_handedness)
            .field("tracked", &self.tracked)
            .finish()
    }
}

impl VariantDescriptor {
    pub fn new(name: &'static str, default_interactions: LayoutFn) -> Self {
        Self {
            name,
            default_interactions,
            pointer_offset_angle: 0.0,
            requires_handedness: false,
            tracked: false,
            validate: validate_layout,
        }
    }

    pub fn motion_controller(name: &'static str, default_interactions: LayoutFn) -> Self {
        Self {
            name,
            default_interactions,
            pointer_offset_angle: 0.0,
            requires_handedness: true,
            tracked: true,
            validate: validate_layout,
        }
    }

    pub fn with_pointer_offset(mut self, degrees: f32) -> Self {
        self.pointer_offset_angle = degrees;
        self
    }

    pub fn with_validation(mut self, validate: ValidateFn) -> Self {
        self.validate = validate;
        self
    }
}

/// Base structural check every variant runs.
///
/// Each mapping must carry the raw channels its axis kind samples from, and ids must be
/// unique within the layout.
pub fn validate_layout(
    _handedness: Handedness,
    interactions: &[InteractionMapping],
) -> std::result::Result<(), String> {
    let mut seen = HashSet::new();
    for mapping in interactions {
        if !seen.insert(mapping.id()) {
            return Err(format!("duplicate interaction id {}", mapping.id()));
        }
        let wired = match mapping.axis_kind() {
            AxisKind::None => true,
            AxisKind::Digital => {
                let action = mapping.action_kind();
                if action == ActionKind::TriggerPress || action.is_near_touch() {
                    mapping.channel_x().is_some()
                } else {
                    mapping.key().is_some()
                }
            }
            AxisKind::SingleAxis => mapping.channel_x().is_some(),
            AxisKind::DualAxis => mapping.channel_x().is_some() && mapping.channel_y().is_some(),
            AxisKind::ThreeDofPosition | AxisKind::ThreeDofRotation | AxisKind::SixDof => true,
        };
        if !wired {
            return Err(format!(
                "interaction `{}` ({:?}) has no raw channel",
                mapping.description(),
                mapping.axis_kind()
            ));
        }
    }
    Ok(())
}

/// Enum-keyed table of controller variants.
#[derive(Debug, Clone)]
pub struct VariantFactory {
    variants: HashMap<ControllerType, VariantDescriptor>,
    profile: Option<MappingProfile>,
    pointer_offset_override: Option<f32>,
}

impl Default for VariantFactory {
    fn default() -> Self {
        let mut factory = Self::empty();
        // Fallback for unrecognised names, which often carry no hand.
        let mut generic =
            VariantDescriptor::motion_controller("Generic OpenVR", lib::generic_openvr);
        generic.requires_handedness = false;
        factory.register(ControllerType::GenericOpenVR, generic);
        factory.register(
            ControllerType::ViveWand,
            VariantDescriptor::motion_controller("Vive Wand", lib::vive_wand),
        );
        factory.register(
            ControllerType::ViveKnuckles,
            VariantDescriptor::motion_controller("Vive Knuckles", lib::vive_knuckles),
        );
        factory.register(
            ControllerType::OculusTouch,
            VariantDescriptor::motion_controller("Oculus Touch", lib::oculus_touch)
                .with_pointer_offset(-40.0),
        );
        factory.register(
            ControllerType::WindowsMixedReality,
            VariantDescriptor::motion_controller(
                "Windows Mixed Reality",
                lib::windows_mixed_reality,
            ),
        );
        let mut go = VariantDescriptor::motion_controller("Oculus Go", lib::oculus_go);
        go.requires_handedness = false;
        factory.register(ControllerType::OculusGo, go);
        factory.register(
            ControllerType::OculusRemote,
            VariantDescriptor::new("Oculus Remote", lib::oculus_remote),
        );
        factory.register(ControllerType::Xbox, VariantDescriptor::new("Xbox", lib::xbox));
        factory.register(
            ControllerType::GenericUnity,
            VariantDescriptor::new("Generic Unity", lib::generic_unity),
        );
        factory
    }
}

impl VariantFactory {
    /// Factory with no variants registered.
    pub fn empty() -> Self {
        Self {
            variants: HashMap::new(),
            profile: None,
            pointer_offset_override: None,
        }
    }

    /// Register or replace the variant for `controller_type`.
    pub fn register(&mut self, controller_type: ControllerType, descriptor: VariantDescriptor) {
        self.variants.insert(controller_type, descriptor);
    }

    pub fn unregister(&mut self, controller_type: ControllerType) -> Option<VariantDescriptor> {
        self.variants.remove(&controller_type)
    }

    pub fn descriptor(&self, controller_type: ControllerType) -> Option<&VariantDescriptor> {
        self.variants.get(&controller_type)
    }

    pub fn supports(&self, controller_type: ControllerType) -> bool {
        self.variants.contains_key(&controller_type)
    }

    pub fn set_profile(&mut self, profile: Option<MappingProfile>) {
        self.profile = profile;
    }

    pub fn profile(&self) -> Option<&MappingProfile> {
        self.profile.as_ref()
    }

    /// Use `degrees` as every variant's pointer offset.
    pub fn set_pointer_offset_override(&mut self, degrees: Option<f32>) {
        self.pointer_offset_override = degrees;
    }

    /// Construct and set up a controller of `controller_type`.
    pub fn create(
        &self,
        raw_device_id: &str,
        controller_type: ControllerType,
        handedness: Handedness,
        tracking_state: TrackingState,
        input_source: Option<InputSource>,
    ) -> Result<Controller> {
        let Some(descriptor) = self.variants.get(&controller_type) else {
            error!("No controller variant registered for {}", controller_type);
            return Err(ControllerError::UnsupportedType(controller_type));
        };

        let angle = self
            .pointer_offset_override
            .unwrap_or(descriptor.pointer_offset_angle);
        let mut controller =
            Controller::new(raw_device_id, controller_type, handedness, tracking_state)
                .with_pointer_offset_angle(angle);
        if let Some(source) = input_source {
            controller.attach_input_source(source);
        }

        self.setup(&mut controller, descriptor).map_err(|reason| {
            error!("Failed to set up {} controller: {}", descriptor.name, reason);
            ControllerError::SetupFailed {
                controller_type,
                reason,
            }
        })?;

        debug!(
            "Created {} controller ({}) with {} interactions",
            descriptor.name,
            handedness,
            controller.interactions().len()
        );
        Ok(controller)
    }

    fn setup(
        &self,
        controller: &mut Controller,
        descriptor: &VariantDescriptor,
    ) -> std::result::Result<(), String> {
        let handedness = controller.handedness();
        if descriptor.requires_handedness && handedness == Handedness::None {
            return Err(format!("{} requires a Left or Right hand", descriptor.name));
        }

        let interactions = self
            .profile
            .as_ref()
            .and_then(|p| p.interactions_for(controller.controller_type(), handedness))
            .unwrap_or_else(|| (descriptor.default_interactions)(handedness));

        (descriptor.validate)(handedness, &interactions)?;
        controller.set_interactions(interactions);
        Ok(())
    }
}
