//! Error taxonomy.
//!
//! Every failure in this crate is recovered locally. The variants exist so that
//! construction paths can report *why* a controller was not built, and so the
//! update engine can log a precise reason before skipping a single mapping.

use crate::classifier::ControllerType;
use crate::interaction::{ActionKind, AxisKind};
use thiserror::Error;

/// Errors produced while classifying, building or updating controllers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ControllerError {
    /// The controller has no interaction layout at update time.
    #[error("no interaction configuration for controller `{0}`")]
    ConfigurationMissing(String),

    /// The classified controller type has no entry in the variant factory.
    #[error("controller type {0:?} is not supported")]
    UnsupportedType(ControllerType),

    /// The variant rejected its interaction layout during setup.
    #[error("failed to set up {controller_type:?} controller: {reason}")]
    SetupFailed {
        controller_type: ControllerType,
        reason: String,
    },

    /// A mapping's axis/action combination has no update rule.
    #[error("input [{action_kind:?}] on {axis_kind:?} mapping `{description}` is not handled")]
    UnhandledInput {
        description: String,
        axis_kind: AxisKind,
        action_kind: ActionKind,
    },

    /// A mapping profile could not be parsed or serialized.
    #[error("mapping profile error: {0}")]
    Profile(String),

    /// Engine configuration could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ControllerError>;
