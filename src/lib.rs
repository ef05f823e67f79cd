//! xrinput: controller input abstraction for XR runtimes.
//!
//! Turns raw joystick channels reported by a platform input layer into typed, named
//! interactions per controller, and raises semantic events (down/up/pressed, position
//! and pose changes, source detected/lost) to the application.
//!
//! ```
//! use xrinput::{classify, ControllerType, Handedness};
//!
//! assert_eq!(
//!     classify("Oculus Touch Controller Left"),
//!     (ControllerType::OculusTouch, Handedness::Left)
//! );
//! ```
//!
//! A typical frame loop:
//!
//! ```no_run
//! use xrinput::{ControllerManager, EngineConfig, EventFilter, Logger, VirtualInput};
//!
//! let mut manager = ControllerManager::new(&EngineConfig::default(), VirtualInput::new());
//! manager.bus_mut().add_listener(Logger::new(), EventFilter::All, None);
//! manager.input_mut().connect("Vive Wand Left");
//! loop {
//!     manager.tick();
//! }
//! ```

pub mod backends;
pub mod classifier;
pub mod config;
pub mod controller;
pub mod error;
pub mod event;
pub mod eventbus;
pub mod filtered_listener;
pub mod interaction;
pub mod logger;
pub mod manager;
pub mod mapping_library;
pub mod pointer;
pub mod profile;
pub mod registry;
pub mod snapshot;
pub mod update;
pub mod variant;

pub use backends::{RawInput, VirtualInput};
pub use classifier::{classify, ControllerType, DeviceClassifier, Handedness};
pub use config::{EngineConfig, PatternRule};
pub use controller::{Controller, TrackingState};
pub use error::{ControllerError, Result};
pub use event::*;
pub use eventbus::*;
pub use filtered_listener::FilteredListener;
pub use interaction::*;
pub use logger::Logger;
pub use manager::ControllerManager;
pub use pointer::{DefaultSourceProvider, InputSource, Pointer, SourceProvider};
pub use profile::{ControllerMapping, InteractionMappingDesc, MappingProfile};
pub use registry::{ControllerRegistry, ModelRenderHook};
pub use snapshot::{ControllerState, Snapshot};
pub use update::update_controller;
pub use variant::{VariantDescriptor, VariantFactory};
