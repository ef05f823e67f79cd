//! Interaction mappings.
//!
//! An [`InteractionMapping`] is one logical input channel on a controller: a trigger, a
//! thumbstick, a grip pose. It knows which raw channels feed it ([`InteractionMapping::channel_x`],
//! [`InteractionMapping::channel_y`], [`InteractionMapping::key`]), what shape its value has
//! ([`AxisKind`]) and what it means ([`ActionKind`]).
//!
//! ## Change detection
//! Each tick the update engine stores a freshly sampled value and then runs
//! [`detect_change`] against the baseline recorded at the end of the previous tick:
//!
//! - `changed`: a boolean value flipped (edge transition).
//! - `updated`: the value differs from the baseline. Booleans additionally report
//!   `updated` on every tick they are held `true`, so a held button repeats.
//!
//! The flags are only meaningful for the tick that produced them. Once every mapping has
//! been processed the engine commits the sampled value as the next baseline.

use glam::{Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Data shape of a mapping. Fixed at construction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisKind {
    #[default]
    None,
    Digital,
    SingleAxis,
    DualAxis,
    ThreeDofPosition,
    ThreeDofRotation,
    SixDof,
}

impl AxisKind {
    /// `true` for the three pose-shaped kinds.
    pub fn is_pose(self) -> bool {
        matches!(
            self,
            AxisKind::ThreeDofPosition | AxisKind::ThreeDofRotation | AxisKind::SixDof
        )
    }
}

/// Semantic identity of a mapping. Fixed at construction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    #[default]
    None,
    Trigger,
    TriggerTouch,
    TriggerNearTouch,
    TriggerPress,
    GripPress,
    ButtonPress,
    ButtonTouch,
    ButtonNearTouch,
    Thumbstick,
    ThumbstickTouch,
    ThumbstickPress,
    ThumbTouch,
    ThumbNearTouch,
    Touchpad,
    TouchpadTouch,
    TouchpadPress,
    DirectionalPad,
    IndexFinger,
    IndexFingerNearTouch,
    MiddleFingerNearTouch,
    RingFingerNearTouch,
    PinkyFingerNearTouch,
    Select,
    Menu,
    Start,
    SpatialPointer,
    SpatialGrip,
}

impl ActionKind {
    /// Near-touch channels report a continuous proximity value; any non-zero reading counts.
    pub fn is_near_touch(self) -> bool {
        matches!(
            self,
            ActionKind::TriggerNearTouch
                | ActionKind::ThumbNearTouch
                | ActionKind::IndexFingerNearTouch
                | ActionKind::MiddleFingerNearTouch
                | ActionKind::RingFingerNearTouch
                | ActionKind::PinkyFingerNearTouch
        )
    }
}

/// Raw joystick button index as reported by the platform input layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyCode(pub u16);

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JoystickButton{}", self.0)
    }
}

/// Application-level action an interaction is bound to.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InputAction {
    pub id: u32,
    pub description: String,
    /// Axis shape the action expects.
    #[serde(default)]
    pub constraint: AxisKind,
}

impl InputAction {
    /// Placeholder action for unbound interactions and source-level events.
    pub const NONE: InputAction = InputAction {
        id: 0,
        description: String::new(),
        constraint: AxisKind::None,
    };

    pub fn new(id: u32, description: impl Into<String>, constraint: AxisKind) -> Self {
        Self {
            id,
            description: description.into(),
            constraint,
        }
    }
}

/// Position plus orientation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Pose {
    /// Origin with identity rotation.
    pub const ZERO_IDENTITY: Pose = Pose {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::ZERO_IDENTITY
    }
}

/// Derived value slot. Exactly one variant is valid for a given mapping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum InteractionValue {
    #[default]
    None,
    Bool(bool),
    Float(f32),
    Vector2(Vec2),
    Pose(Pose),
}

impl InteractionValue {
    /// Zero value of the slot selected by `axis`/`action`.
    ///
    /// A single-axis trigger press is thresholded into a boolean, so its slot is `Bool`.
    pub fn initial(axis: AxisKind, action: ActionKind) -> Self {
        match axis {
            AxisKind::None => InteractionValue::None,
            AxisKind::Digital => InteractionValue::Bool(false),
            AxisKind::SingleAxis if action == ActionKind::TriggerPress => {
                InteractionValue::Bool(false)
            }
            AxisKind::SingleAxis => InteractionValue::Float(0.0),
            AxisKind::DualAxis => InteractionValue::Vector2(Vec2::ZERO),
            AxisKind::ThreeDofPosition | AxisKind::ThreeDofRotation | AxisKind::SixDof => {
                InteractionValue::Pose(Pose::ZERO_IDENTITY)
            }
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            InteractionValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match self {
            InteractionValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_vector2(&self) -> Option<Vec2> {
        match self {
            InteractionValue::Vector2(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_pose(&self) -> Option<Pose> {
        match self {
            InteractionValue::Pose(v) => Some(*v),
            _ => None,
        }
    }
}

/// Per-tick transition flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChangeFlags {
    /// A boolean value flipped since the previous tick.
    pub changed: bool,
    /// The value differs from the previous tick (held booleans always count).
    pub updated: bool,
}

/// Compare this tick's value with the previous tick's baseline.
///
/// Floats, vectors and poses compare exactly, component by component.
pub fn detect_change(baseline: &InteractionValue, current: &InteractionValue) -> ChangeFlags {
    match (baseline, current) {
        (InteractionValue::Bool(before), InteractionValue::Bool(now)) => {
            let changed = before != now;
            ChangeFlags {
                changed,
                updated: changed || *now,
            }
        }
        (InteractionValue::Float(before), InteractionValue::Float(now)) => ChangeFlags {
            changed: false,
            updated: before != now,
        },
        (InteractionValue::Vector2(before), InteractionValue::Vector2(now)) => ChangeFlags {
            changed: false,
            updated: before != now,
        },
        (InteractionValue::Pose(before), InteractionValue::Pose(now)) => ChangeFlags {
            changed: false,
            updated: before != now,
        },
        (InteractionValue::None, InteractionValue::None) => ChangeFlags::default(),
        // Slot kind switched; treat as a fresh value.
        (_, now) => ChangeFlags {
            changed: now.as_bool().is_some(),
            updated: true,
        },
    }
}

/// One logical input channel on a controller.
#[derive(Clone, Debug)]
pub struct InteractionMapping {
    id: u32,
    description: String,
    axis_kind: AxisKind,
    action_kind: ActionKind,
    action: InputAction,
    channel_x: Option<String>,
    channel_y: Option<String>,
    key: Option<KeyCode>,
    invert_x: bool,
    invert_y: bool,
    value: InteractionValue,
    baseline: InteractionValue,
    flags: ChangeFlags,
}

impl InteractionMapping {
    pub fn new(
        id: u32,
        description: impl Into<String>,
        axis_kind: AxisKind,
        action_kind: ActionKind,
    ) -> Self {
        let initial = InteractionValue::initial(axis_kind, action_kind);
        Self {
            id,
            description: description.into(),
            axis_kind,
            action_kind,
            action: InputAction::NONE,
            channel_x: None,
            channel_y: None,
            key: None,
            invert_x: false,
            invert_y: false,
            value: initial,
            baseline: initial,
            flags: ChangeFlags::default(),
        }
    }

    /// Single raw channel (trigger axis, near-touch sensor, ...).
    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel_x = Some(channel.into());
        self
    }

    /// Horizontal/vertical raw channels of a stick or pad.
    pub fn with_channels(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.channel_x = Some(x.into());
        self.channel_y = Some(y.into());
        self
    }

    pub fn with_key(mut self, key: KeyCode) -> Self {
        self.key = Some(key);
        self
    }

    pub fn with_action(mut self, action: InputAction) -> Self {
        self.action = action;
        self
    }

    pub fn with_inversion(mut self, invert_x: bool, invert_y: bool) -> Self {
        self.invert_x = invert_x;
        self.invert_y = invert_y;
        self
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn axis_kind(&self) -> AxisKind {
        self.axis_kind
    }

    pub fn action_kind(&self) -> ActionKind {
        self.action_kind
    }

    pub fn action(&self) -> &InputAction {
        &self.action
    }

    /// Rebind the application action. Axis and action kinds stay fixed.
    pub fn set_action(&mut self, action: InputAction) {
        self.action = action;
    }

    pub fn channel_x(&self) -> Option<&str> {
        self.channel_x.as_deref()
    }

    pub fn channel_y(&self) -> Option<&str> {
        self.channel_y.as_deref()
    }

    pub fn key(&self) -> Option<KeyCode> {
        self.key
    }

    pub fn invert_x(&self) -> bool {
        self.invert_x
    }

    pub fn invert_y(&self) -> bool {
        self.invert_y
    }

    /// Value sampled this tick.
    pub fn value(&self) -> &InteractionValue {
        &self.value
    }

    /// Value recorded at the end of the previous tick.
    pub fn baseline(&self) -> &InteractionValue {
        &self.baseline
    }

    pub fn changed(&self) -> bool {
        self.flags.changed
    }

    pub fn updated(&self) -> bool {
        self.flags.updated
    }

    pub fn bool_value(&self) -> bool {
        self.value.as_bool().unwrap_or(false)
    }

    pub fn float_value(&self) -> f32 {
        self.value.as_float().unwrap_or(0.0)
    }

    pub fn vector2_value(&self) -> Vec2 {
        self.value.as_vector2().unwrap_or(Vec2::ZERO)
    }

    pub fn pose_value(&self) -> Pose {
        self.value.as_pose().unwrap_or_default()
    }

    /// Store a sampled value and compute this tick's flags against the baseline.
    pub(crate) fn store(&mut self, value: InteractionValue) -> ChangeFlags {
        self.value = value;
        self.flags = detect_change(&self.baseline, &self.value);
        self.flags
    }

    /// Drop last tick's flags before this tick's dispatch.
    pub(crate) fn clear_flags(&mut self) {
        self.flags = ChangeFlags::default();
    }

    /// Make this tick's value the baseline for the next comparison.
    pub(crate) fn commit(&mut self) {
        self.baseline = self.value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bool_edges_and_hold() {
        let off = InteractionValue::Bool(false);
        let on = InteractionValue::Bool(true);

        assert_eq!(detect_change(&off, &off), ChangeFlags::default());
        assert_eq!(
            detect_change(&off, &on),
            ChangeFlags {
                changed: true,
                updated: true
            }
        );
        assert_eq!(
            detect_change(&on, &on),
            ChangeFlags {
                changed: false,
                updated: true
            }
        );
        assert_eq!(
            detect_change(&on, &off),
            ChangeFlags {
                changed: true,
                updated: true
            }
        );
    }

    #[test]
    fn test_float_vector_pose_compare_exactly() {
        let a = InteractionValue::Float(0.5);
        assert!(!detect_change(&a, &InteractionValue::Float(0.5)).updated);
        assert!(detect_change(&a, &InteractionValue::Float(0.5001)).updated);
        assert!(!detect_change(&a, &InteractionValue::Float(0.2)).changed);

        let v = InteractionValue::Vector2(Vec2::new(0.3, -0.1));
        assert!(!detect_change(&v, &v).updated);
        assert!(detect_change(&v, &InteractionValue::Vector2(Vec2::new(0.3, 0.0))).updated);

        let p = InteractionValue::Pose(Pose::ZERO_IDENTITY);
        let moved = InteractionValue::Pose(Pose::new(Vec3::new(0.0, 0.0, 0.01), Quat::IDENTITY));
        assert!(!detect_change(&p, &p).updated);
        assert!(detect_change(&p, &moved).updated);
    }

    #[test]
    fn test_initial_slot_follows_axis_kind() {
        assert_eq!(
            InteractionValue::initial(AxisKind::SingleAxis, ActionKind::TriggerPress),
            InteractionValue::Bool(false)
        );
        assert_eq!(
            InteractionValue::initial(AxisKind::SingleAxis, ActionKind::Trigger),
            InteractionValue::Float(0.0)
        );
        assert_eq!(
            InteractionValue::initial(AxisKind::SixDof, ActionKind::SpatialGrip),
            InteractionValue::Pose(Pose::ZERO_IDENTITY)
        );
    }

    #[test]
    fn test_store_then_commit_moves_baseline() {
        let mut mapping =
            InteractionMapping::new(1, "Trigger", AxisKind::SingleAxis, ActionKind::Trigger)
                .with_channel("AXIS_9");

        let flags = mapping.store(InteractionValue::Float(0.25));
        assert!(flags.updated);
        assert_eq!(mapping.baseline(), &InteractionValue::Float(0.0));

        mapping.commit();
        assert_eq!(mapping.baseline(), &InteractionValue::Float(0.25));
        assert!(!mapping.store(InteractionValue::Float(0.25)).updated);
    }
}
