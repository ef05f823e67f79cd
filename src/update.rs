//! Interaction update engine.
//!
//! [`update_controller`] runs once per tick per controller. Each mapping is sampled from
//! the [`RawInput`] layer, compared against last tick's baseline, and the resulting
//! transitions are raised on the [`InputSink`]. Baselines are committed only after every
//! mapping was processed.
//!
//! Failures never leave this module: a mapping with no update rule is logged and skipped,
//! a controller without mappings is logged and disabled.

use crate::backends::RawInput;
use crate::classifier::Handedness;
use crate::controller::Controller;
use crate::error::{ControllerError, Result};
use crate::event::InputSink;
use crate::interaction::{ActionKind, AxisKind, InteractionMapping, InteractionValue, Pose};
use glam::Vec2;
use tracing::{error, trace, warn};

/// Per-tick values shared by every mapping of one controller.
struct TickContext {
    source_id: u32,
    handedness: Handedness,
    grip: Pose,
    pointer: Pose,
}

/// Sample, diff and raise events for every mapping of `controller`.
pub fn update_controller(
    controller: &mut Controller,
    input: &dyn RawInput,
    sink: &mut dyn InputSink,
) {
    if !controller.enabled() {
        return;
    }

    if controller.interactions().is_empty() {
        let err = ControllerError::ConfigurationMissing(controller.raw_device_id().to_string());
        error!("{}", err);
        controller.set_enabled(false);
        return;
    }

    let ctx = TickContext {
        source_id: controller.source_id(),
        handedness: controller.handedness(),
        grip: controller.current_pose(),
        pointer: controller.pointer_pose(),
    };

    for mapping in controller.interactions_mut() {
        mapping.clear_flags();
        if let Err(err) = update_mapping(mapping, &ctx, input, sink) {
            error!("{}", err);
        }
    }

    for mapping in controller.interactions_mut() {
        mapping.commit();
    }
}

fn update_mapping(
    mapping: &mut InteractionMapping,
    ctx: &TickContext,
    input: &dyn RawInput,
    sink: &mut dyn InputSink,
) -> Result<()> {
    match mapping.axis_kind() {
        AxisKind::None => Ok(()),
        AxisKind::Digital => update_digital(mapping, ctx, input, sink),
        AxisKind::SingleAxis => update_single_axis(mapping, ctx, input, sink),
        AxisKind::DualAxis => update_dual_axis(mapping, ctx, input, sink),
        AxisKind::ThreeDofPosition | AxisKind::ThreeDofRotation | AxisKind::SixDof => {
            update_pose(mapping, ctx, sink);
            Ok(())
        }
    }
}

fn unhandled(mapping: &InteractionMapping) -> ControllerError {
    ControllerError::UnhandledInput {
        description: mapping.description().to_string(),
        axis_kind: mapping.axis_kind(),
        action_kind: mapping.action_kind(),
    }
}

/// Raw channel value thresholded into a press: `== 1` for trigger press, `!= 0` for near touch.
fn thresholded(mapping: &InteractionMapping, input: &dyn RawInput) -> Option<bool> {
    let channel = mapping.channel_x()?;
    let raw = input.sample_axis_raw(channel);
    match mapping.action_kind() {
        ActionKind::TriggerPress => Some(raw == 1.0),
        kind if kind.is_near_touch() => Some(raw != 0.0),
        _ => None,
    }
}

/// Store a boolean and raise its edge events.
fn apply_bool(
    mapping: &mut InteractionMapping,
    ctx: &TickContext,
    pressed: bool,
    repeat_while_held: bool,
    sink: &mut dyn InputSink,
) {
    let flags = mapping.store(InteractionValue::Bool(pressed));
    if flags.changed {
        if pressed {
            sink.raise_input_down(ctx.source_id, ctx.handedness, mapping.action());
        } else {
            sink.raise_input_up(ctx.source_id, ctx.handedness, mapping.action());
        }
    }
    if repeat_while_held && flags.updated && pressed {
        sink.raise_input_pressed(ctx.source_id, ctx.handedness, mapping.action(), None);
    }
}

fn update_digital(
    mapping: &mut InteractionMapping,
    ctx: &TickContext,
    input: &dyn RawInput,
    sink: &mut dyn InputSink,
) -> Result<()> {
    let action = mapping.action_kind();
    let pressed = if action == ActionKind::TriggerPress || action.is_near_touch() {
        thresholded(mapping, input).ok_or_else(|| unhandled(mapping))?
    } else {
        let key = mapping.key().ok_or_else(|| unhandled(mapping))?;
        input.sample_key(key)
    };

    apply_bool(mapping, ctx, pressed, true, sink);
    Ok(())
}

fn update_single_axis(
    mapping: &mut InteractionMapping,
    ctx: &TickContext,
    input: &dyn RawInput,
    sink: &mut dyn InputSink,
) -> Result<()> {
    if mapping.action_kind() == ActionKind::TriggerPress {
        let pressed = thresholded(mapping, input).ok_or_else(|| unhandled(mapping))?;
        apply_bool(mapping, ctx, pressed, false, sink);
        return Ok(());
    }

    let channel = mapping.channel_x().ok_or_else(|| unhandled(mapping))?;
    let value = input.sample_axis_raw(channel);
    let flags = mapping.store(InteractionValue::Float(value));
    if flags.updated {
        trace!("{} = {}", mapping.description(), value);
        sink.raise_input_pressed(ctx.source_id, ctx.handedness, mapping.action(), Some(value));
    }
    Ok(())
}

fn update_dual_axis(
    mapping: &mut InteractionMapping,
    ctx: &TickContext,
    input: &dyn RawInput,
    sink: &mut dyn InputSink,
) -> Result<()> {
    let (Some(x_channel), Some(y_channel)) = (mapping.channel_x(), mapping.channel_y()) else {
        return Err(unhandled(mapping));
    };

    let mut position = Vec2::new(input.sample_axis(x_channel), input.sample_axis(y_channel));
    if mapping.invert_x() {
        position.x = -position.x;
    }
    if mapping.invert_y() {
        position.y = -position.y;
    }

    let flags = mapping.store(InteractionValue::Vector2(position));
    if flags.updated {
        trace!("{} = {:?}", mapping.description(), position);
        sink.raise_position_changed(ctx.source_id, ctx.handedness, mapping.action(), position);
    }
    Ok(())
}

fn update_pose(mapping: &mut InteractionMapping, ctx: &TickContext, sink: &mut dyn InputSink) {
    let pose = match mapping.action_kind() {
        ActionKind::SpatialPointer => ctx.pointer,
        ActionKind::SpatialGrip => ctx.grip,
        other => {
            warn!(
                "Unhandled pose action {:?} on `{}`, skipping",
                other,
                mapping.description()
            );
            return;
        }
    };

    let flags = mapping.store(InteractionValue::Pose(pose));
    if flags.updated {
        sink.raise_pose_changed(ctx.source_id, ctx.handedness, mapping.action(), pose);
    }
}
