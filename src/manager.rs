use crate::backends::RawInput;
use crate::config::EngineConfig;
use crate::controller::TrackingState;
use crate::event::InputSink;
use crate::eventbus::InputEventBus;
use crate::registry::ControllerRegistry;
use crate::snapshot::{ControllerState, Snapshot};
use crate::update::update_controller;
use std::collections::HashSet;
use tracing::{debug, info};

/// Per-frame driver: detects and drops controllers, feeds tracking and runs the update
/// engine over every registered controller.
pub struct ControllerManager<I: RawInput> {
    registry: ControllerRegistry,
    input: I,
    bus: InputEventBus,
}

impl<I: RawInput> ControllerManager<I> {
    pub fn new(config: &EngineConfig, input: I) -> Self {
        Self::with_registry(config.registry(), input)
    }

    pub fn with_registry(registry: ControllerRegistry, input: I) -> Self {
        Self {
            registry,
            input,
            bus: InputEventBus::new(),
        }
    }

    pub fn registry(&self) -> &ControllerRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ControllerRegistry {
        &mut self.registry
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub fn bus_mut(&mut self) -> &mut InputEventBus {
        &mut self.bus
    }

    /// One frame, events delivered to the manager's bus.
    pub fn tick(&mut self) {
        let mut bus = std::mem::take(&mut self.bus);
        self.tick_into(&mut bus);
        self.bus = bus;
    }

    /// One frame, events delivered to `sink`.
    pub fn tick_into(&mut self, sink: &mut dyn InputSink) {
        self.refresh_devices_into(sink);

        for (raw_id, controller) in self.registry.iter_mut() {
            if !controller.enabled() {
                continue;
            }
            if controller.tracking_state() != TrackingState::NotApplicable {
                controller.update_tracking(self.input.tracked_pose(raw_id));
            }
            update_controller(controller, &self.input, sink);
        }
    }

    /// Reconcile the registry with the names the input layer reports.
    pub fn refresh_devices(&mut self) {
        let mut bus = std::mem::take(&mut self.bus);
        self.refresh_devices_into(&mut bus);
        self.bus = bus;
    }

    fn refresh_devices_into(&mut self, sink: &mut dyn InputSink) {
        let names = self.input.enumerate_device_names();

        for name in &names {
            let existed = self.registry.contains(name);
            let Some(controller) = self.registry.get_or_create(name) else {
                continue;
            };
            if !existed {
                let source_name = controller
                    .input_source()
                    .map(|s| s.name.clone())
                    .unwrap_or_default();
                sink.raise_source_detected(
                    controller.source_id(),
                    controller.handedness(),
                    &source_name,
                );
            }
        }

        let present: HashSet<&str> = names.iter().map(String::as_str).collect();
        for raw_id in self.registry.ids() {
            if present.contains(raw_id.as_str()) {
                continue;
            }
            if let Some(controller) = self.registry.remove(&raw_id) {
                debug!("`{}` is no longer reported", raw_id);
                let source_name = controller
                    .input_source()
                    .map(|s| s.name.clone())
                    .unwrap_or_default();
                sink.raise_source_lost(
                    controller.source_id(),
                    controller.handedness(),
                    &source_name,
                );
            }
        }
    }

    /// Drop every controller, raising `SourceLost` for each.
    pub fn shutdown(&mut self) {
        let controllers = self.registry.clear();
        info!("Shutting down, releasing {} controller(s)", controllers.len());
        for controller in controllers {
            let source_name = controller
                .input_source()
                .map(|s| s.name.clone())
                .unwrap_or_default();
            self.bus
                .raise_source_lost(controller.source_id(), controller.handedness(), &source_name);
        }
    }

    /// Current stored values of every controller.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot(
            self.registry
                .iter()
                .map(|(id, controller)| (id.clone(), ControllerState::from(controller)))
                .collect(),
        )
    }
}
