//! Raw channel names and default interaction layouts.
//!
//! Platform joystick layers expose continuous inputs as numbered axes (`AXIS_1` ..
//! `AXIS_27`) and digital inputs as numbered joystick buttons ([`KeyCode`]). Each
//! controller variant wires those raw channels to interaction mappings; the tables below
//! are the built-in wiring used when no [`MappingProfile`](crate::profile::MappingProfile)
//! overrides it.
//!
//! ## Axis conventions (OpenVR)
//! - `AXIS_1`/`AXIS_2`: left thumbstick (or left trackpad on Vive/Knuckles).
//! - `AXIS_4`/`AXIS_5`: right thumbstick.
//! - `AXIS_9`/`AXIS_10`: left/right index trigger.
//! - `AXIS_11`/`AXIS_12`: left/right grip.
//! - `AXIS_13`/`AXIS_14`: left/right index trigger near touch.
//! - `AXIS_15`/`AXIS_16`: left/right thumb rest near touch.
//! - `AXIS_17`..`AXIS_20`: left/right trackpad.
//! - `AXIS_20`..`AXIS_27`: Knuckles finger curl sensors.

use crate::classifier::Handedness;
use crate::interaction::{ActionKind, AxisKind, InteractionMapping, KeyCode};

pub const AXIS_1: &str = "AXIS_1";
pub const AXIS_2: &str = "AXIS_2";
pub const AXIS_3: &str = "AXIS_3";
pub const AXIS_4: &str = "AXIS_4";
pub const AXIS_5: &str = "AXIS_5";
pub const AXIS_6: &str = "AXIS_6";
pub const AXIS_7: &str = "AXIS_7";
pub const AXIS_8: &str = "AXIS_8";
pub const AXIS_9: &str = "AXIS_9";
pub const AXIS_10: &str = "AXIS_10";
pub const AXIS_11: &str = "AXIS_11";
pub const AXIS_12: &str = "AXIS_12";
pub const AXIS_13: &str = "AXIS_13";
pub const AXIS_14: &str = "AXIS_14";
pub const AXIS_15: &str = "AXIS_15";
pub const AXIS_16: &str = "AXIS_16";
pub const AXIS_17: &str = "AXIS_17";
pub const AXIS_18: &str = "AXIS_18";
pub const AXIS_19: &str = "AXIS_19";
pub const AXIS_20: &str = "AXIS_20";
pub const AXIS_21: &str = "AXIS_21";
pub const AXIS_22: &str = "AXIS_22";
pub const AXIS_23: &str = "AXIS_23";
pub const AXIS_24: &str = "AXIS_24";
pub const AXIS_25: &str = "AXIS_25";
pub const AXIS_26: &str = "AXIS_26";
pub const AXIS_27: &str = "AXIS_27";

/// Joystick button `n`.
pub const fn button(n: u16) -> KeyCode {
    KeyCode(n)
}

fn spatial_pointer(id: u32) -> InteractionMapping {
    InteractionMapping::new(id, "Spatial Pointer", AxisKind::SixDof, ActionKind::SpatialPointer)
}

fn spatial_grip(id: u32) -> InteractionMapping {
    InteractionMapping::new(id, "Spatial Grip", AxisKind::SixDof, ActionKind::SpatialGrip)
}

fn digital(id: u32, description: &str, action: ActionKind, key: KeyCode) -> InteractionMapping {
    InteractionMapping::new(id, description, AxisKind::Digital, action).with_key(key)
}

/// Digital interaction sampled from a continuous channel (near touch, trigger press).
fn thresholded(id: u32, description: &str, action: ActionKind, axis: &str) -> InteractionMapping {
    InteractionMapping::new(id, description, AxisKind::Digital, action).with_channel(axis)
}

fn single(id: u32, description: &str, action: ActionKind, axis: &str) -> InteractionMapping {
    InteractionMapping::new(id, description, AxisKind::SingleAxis, action).with_channel(axis)
}

fn dual(id: u32, description: &str, action: ActionKind, x: &str, y: &str) -> InteractionMapping {
    InteractionMapping::new(id, description, AxisKind::DualAxis, action).with_channels(x, y)
}

/// Pick the left- or right-hand channel.
fn hand<T>(handedness: Handedness, left: T, right: T) -> T {
    match handedness {
        Handedness::Left => left,
        _ => right,
    }
}

/// Generic OpenVR motion controller. Without a hand it takes the right-hand wiring.
#[rustfmt::skip]
pub fn generic_openvr(handedness: Handedness) -> Vec<InteractionMapping> {
    vec![
        spatial_pointer(0),
        spatial_grip(1),
        single(2, "Trigger Position", ActionKind::Trigger, hand(handedness, AXIS_9, AXIS_10)),
        digital(3, "Trigger Press (Select)", ActionKind::Select, hand(handedness, button(14), button(15))),
        thresholded(4, "Trigger Touch", ActionKind::TriggerNearTouch, hand(handedness, AXIS_9, AXIS_10)),
        single(5, "Grip Trigger Position", ActionKind::Trigger, hand(handedness, AXIS_11, AXIS_12)),
        dual(6, "Trackpad-Thumbstick Position", ActionKind::Touchpad, hand(handedness, AXIS_17, AXIS_19), hand(handedness, AXIS_18, AXIS_20)),
        digital(7, "Trackpad-Thumbstick Touch", ActionKind::TouchpadTouch, hand(handedness, button(16), button(17))),
        digital(8, "Trackpad-Thumbstick Press", ActionKind::TouchpadPress, hand(handedness, button(8), button(9))),
        digital(9, "Unity Button Id 2", ActionKind::ButtonPress, hand(handedness, button(2), button(0))),
        digital(10, "Unity Button Id 3", ActionKind::ButtonPress, hand(handedness, button(3), button(1))),
    ]
}

/// HTC Vive wand.
#[rustfmt::skip]
pub fn vive_wand(handedness: Handedness) -> Vec<InteractionMapping> {
    if handedness == Handedness::None {
        return Vec::new();
    }
    vec![
        spatial_pointer(0),
        spatial_grip(1),
        single(2, "Trigger Position", ActionKind::Trigger, hand(handedness, AXIS_9, AXIS_10)),
        digital(3, "Trigger Press (Select)", ActionKind::Select, hand(handedness, button(14), button(15))),
        single(4, "Grip Press", ActionKind::TriggerPress, hand(handedness, AXIS_11, AXIS_12)),
        dual(5, "Trackpad Position", ActionKind::Touchpad, hand(handedness, AXIS_17, AXIS_19), hand(handedness, AXIS_18, AXIS_20)),
        digital(6, "Trackpad Touch", ActionKind::TouchpadTouch, hand(handedness, button(16), button(17))),
        digital(7, "Trackpad Press", ActionKind::TouchpadPress, hand(handedness, button(8), button(9))),
        digital(8, "Menu Button", ActionKind::Menu, hand(handedness, button(2), button(0))),
    ]
}

/// Valve Index ("Knuckles") controller.
#[rustfmt::skip]
pub fn vive_knuckles(handedness: Handedness) -> Vec<InteractionMapping> {
    if handedness == Handedness::None {
        return Vec::new();
    }
    vec![
        spatial_pointer(0),
        spatial_grip(1),
        single(2, "Trigger Position", ActionKind::Trigger, hand(handedness, AXIS_9, AXIS_10)),
        digital(3, "Trigger Press (Select)", ActionKind::Select, hand(handedness, button(14), button(15))),
        single(4, "Grip Average", ActionKind::Trigger, hand(handedness, AXIS_11, AXIS_12)),
        dual(5, "Trackpad Position", ActionKind::Touchpad, hand(handedness, AXIS_17, AXIS_19), hand(handedness, AXIS_18, AXIS_20)),
        digital(6, "Trackpad Touch", ActionKind::TouchpadTouch, hand(handedness, button(16), button(17))),
        digital(7, "Trackpad Press", ActionKind::TouchpadPress, hand(handedness, button(8), button(9))),
        digital(8, "Inner Face Button", ActionKind::ButtonPress, hand(handedness, button(2), button(0))),
        digital(9, "Outer Face Button", ActionKind::ButtonPress, hand(handedness, button(3), button(1))),
        thresholded(10, "Index Finger Cap Sensor", ActionKind::IndexFingerNearTouch, hand(handedness, AXIS_20, AXIS_21)),
        thresholded(11, "Middle Finger Cap Sensor", ActionKind::MiddleFingerNearTouch, hand(handedness, AXIS_22, AXIS_23)),
        thresholded(12, "Ring Finger Cap Sensor", ActionKind::RingFingerNearTouch, hand(handedness, AXIS_24, AXIS_25)),
        thresholded(13, "Pinky Finger Cap Sensor", ActionKind::PinkyFingerNearTouch, hand(handedness, AXIS_26, AXIS_27)),
    ]
}

/// Oculus Touch controller.
#[rustfmt::skip]
pub fn oculus_touch(handedness: Handedness) -> Vec<InteractionMapping> {
    if handedness == Handedness::None {
        return Vec::new();
    }
    vec![
        spatial_pointer(0),
        spatial_grip(1),
        single(2, "Axis1D.IndexTrigger", ActionKind::Trigger, hand(handedness, AXIS_9, AXIS_10)),
        digital(3, "Axis1D.IndexTrigger Touch", ActionKind::TriggerTouch, hand(handedness, button(14), button(15))),
        thresholded(4, "Axis1D.IndexTrigger Near Touch", ActionKind::TriggerNearTouch, hand(handedness, AXIS_13, AXIS_14)),
        thresholded(5, "Axis1D.IndexTrigger Press", ActionKind::TriggerPress, hand(handedness, AXIS_9, AXIS_10)),
        single(6, "Axis1D.HandTrigger Press", ActionKind::TriggerPress, hand(handedness, AXIS_11, AXIS_12)),
        dual(7, "Axis2D.Thumbstick", ActionKind::Thumbstick, hand(handedness, AXIS_1, AXIS_4), hand(handedness, AXIS_2, AXIS_5)),
        digital(8, "Button.Thumbstick Touch", ActionKind::ThumbstickTouch, hand(handedness, button(16), button(17))),
        thresholded(9, "Button.Thumbstick Near Touch", ActionKind::ThumbNearTouch, hand(handedness, AXIS_15, AXIS_16)),
        digital(10, "Button.Thumbstick Press", ActionKind::ThumbstickPress, hand(handedness, button(8), button(9))),
        digital(11, "Button.Lower Press", ActionKind::ButtonPress, hand(handedness, button(2), button(0))),
        digital(12, "Button.Upper Press", ActionKind::ButtonPress, hand(handedness, button(3), button(1))),
        digital(13, "Button.Lower Touch", ActionKind::ButtonTouch, hand(handedness, button(12), button(10))),
        digital(14, "Button.Upper Touch", ActionKind::ButtonTouch, hand(handedness, button(13), button(11))),
        digital(15, "Touch.ThumbRest Touch", ActionKind::ThumbTouch, hand(handedness, button(18), button(19))),
        digital(16, "Button.Start Press", ActionKind::Start, button(7)),
    ]
}

/// Oculus Remote. Not hand-specific.
pub fn oculus_remote(_handedness: Handedness) -> Vec<InteractionMapping> {
    vec![
        dual(0, "D-Pad Position", ActionKind::DirectionalPad, AXIS_5, AXIS_6),
        digital(1, "Button.One", ActionKind::ButtonPress, button(0)),
        digital(2, "Button.Two", ActionKind::ButtonPress, button(1)),
    ]
}

/// Oculus Go / tracked remote. Either hand.
#[rustfmt::skip]
pub fn oculus_go(handedness: Handedness) -> Vec<InteractionMapping> {
    vec![
        spatial_pointer(0),
        single(1, "Axis1D.PrimaryIndexTrigger", ActionKind::Trigger, hand(handedness, AXIS_9, AXIS_10)),
        digital(2, "Axis1D.PrimaryIndexTrigger Touch", ActionKind::TriggerTouch, hand(handedness, button(14), button(15))),
        thresholded(3, "Axis1D.PrimaryIndexTrigger Press", ActionKind::TriggerPress, hand(handedness, AXIS_9, AXIS_10)),
        dual(4, "Axis2D.PrimaryTouchpad", ActionKind::Touchpad, hand(handedness, AXIS_1, AXIS_4), hand(handedness, AXIS_2, AXIS_5)),
        digital(5, "Button.PrimaryTouchpad Touch", ActionKind::TouchpadTouch, hand(handedness, button(16), button(17))),
        digital(6, "Button.PrimaryTouchpad Press", ActionKind::TouchpadPress, hand(handedness, button(8), button(9))),
        digital(7, "Button.Back Press", ActionKind::Menu, hand(handedness, button(7), button(6))),
    ]
}

/// Windows Mixed Reality motion controller through OpenVR.
#[rustfmt::skip]
pub fn windows_mixed_reality(handedness: Handedness) -> Vec<InteractionMapping> {
    if handedness == Handedness::None {
        return Vec::new();
    }
    vec![
        spatial_pointer(0),
        spatial_grip(1),
        single(2, "Trigger Position", ActionKind::Trigger, hand(handedness, AXIS_9, AXIS_10)),
        digital(3, "Trigger Press (Select)", ActionKind::Select, hand(handedness, button(14), button(15))),
        thresholded(4, "Trigger Touch", ActionKind::TriggerNearTouch, hand(handedness, AXIS_9, AXIS_10)),
        digital(5, "Grip Press", ActionKind::GripPress, hand(handedness, button(4), button(5))),
        dual(6, "Thumbstick Position", ActionKind::Thumbstick, hand(handedness, AXIS_1, AXIS_4), hand(handedness, AXIS_2, AXIS_5)),
        digital(7, "Thumbstick Press", ActionKind::ThumbstickPress, hand(handedness, button(8), button(9))),
        dual(8, "Touchpad Position", ActionKind::Touchpad, hand(handedness, AXIS_17, AXIS_19), hand(handedness, AXIS_18, AXIS_20)),
        digital(9, "Touchpad Touch", ActionKind::TouchpadTouch, hand(handedness, button(18), button(19))),
        digital(10, "Touchpad Press", ActionKind::TouchpadPress, hand(handedness, button(16), button(17))),
        digital(11, "Menu Press", ActionKind::Menu, hand(handedness, button(2), button(0))),
    ]
}

/// Xbox gamepad.
#[rustfmt::skip]
pub fn xbox(_handedness: Handedness) -> Vec<InteractionMapping> {
    vec![
        dual(0, "Left Thumbstick", ActionKind::Thumbstick, AXIS_1, AXIS_2).with_inversion(false, true),
        digital(1, "Left Thumbstick Click", ActionKind::ThumbstickPress, button(8)),
        dual(2, "Right Thumbstick", ActionKind::Thumbstick, AXIS_4, AXIS_5).with_inversion(false, true),
        digital(3, "Right Thumbstick Click", ActionKind::ThumbstickPress, button(9)),
        dual(4, "D-Pad", ActionKind::DirectionalPad, AXIS_6, AXIS_7),
        single(5, "Shared Trigger", ActionKind::Trigger, AXIS_3),
        single(6, "Left Trigger", ActionKind::Trigger, AXIS_9),
        single(7, "Right Trigger", ActionKind::Trigger, AXIS_10),
        digital(8, "View", ActionKind::Menu, button(6)),
        digital(9, "Menu", ActionKind::Start, button(7)),
        digital(10, "Left Bumper", ActionKind::ButtonPress, button(4)),
        digital(11, "Right Bumper", ActionKind::ButtonPress, button(5)),
        digital(12, "A", ActionKind::ButtonPress, button(0)),
        digital(13, "B", ActionKind::ButtonPress, button(1)),
        digital(14, "X", ActionKind::ButtonPress, button(2)),
        digital(15, "Y", ActionKind::ButtonPress, button(3)),
    ]
}

/// Generic joystick: no built-in layout, a profile must supply one.
pub fn generic_unity(_handedness: Handedness) -> Vec<InteractionMapping> {
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hand_specific_layouts_pick_side_channels() {
        let left = oculus_touch(Handedness::Left);
        let right = oculus_touch(Handedness::Right);
        assert_eq!(left.len(), right.len());
        assert_eq!(left[2].channel_x(), Some(AXIS_9));
        assert_eq!(right[2].channel_x(), Some(AXIS_10));
        assert!(oculus_touch(Handedness::None).is_empty());
    }

    #[test]
    fn test_remote_layout_ignores_handedness() {
        assert_eq!(oculus_remote(Handedness::None).len(), 3);
        assert_eq!(xbox(Handedness::None)[0].channel_y(), Some(AXIS_2));
        assert!(generic_unity(Handedness::Right).is_empty());
    }

    #[test]
    fn test_generic_layout_defaults_to_right_hand() {
        let unhanded = generic_openvr(Handedness::None);
        let right = generic_openvr(Handedness::Right);
        assert!(!unhanded.is_empty());
        assert_eq!(unhanded.len(), right.len());
        assert_eq!(unhanded[2].channel_x(), Some(AXIS_10));
        assert_eq!(unhanded[3].key(), Some(button(15)));
    }

    #[test]
    fn test_mapping_ids_are_unique() {
        for layout in [
            generic_openvr(Handedness::Left),
            vive_wand(Handedness::Right),
            vive_knuckles(Handedness::Left),
            oculus_touch(Handedness::Right),
            oculus_go(Handedness::Left),
            windows_mixed_reality(Handedness::Right),
            xbox(Handedness::None),
        ] {
            let mut ids: Vec<u32> = layout.iter().map(|m| m.id()).collect();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), layout.len());
        }
    }
}
