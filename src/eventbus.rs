use crate::event::{InputEvent, InputSink};
use std::collections::HashMap;
use tracing::trace;

/// Trait for reacting to semantic input events from any controller.
pub trait InputListener: Send {
    fn on_input(&mut self, event: &InputEvent);
}

/// Determines which kinds of events a listener wants to receive.
#[derive(Debug, Clone, Copy)]
pub enum EventFilter {
    All,
    /// Down / Up / held Pressed.
    DigitalOnly,
    /// Single-axis Pressed values and dual-axis positions.
    AxisOnly,
    PoseOnly,
    /// Source detected / lost.
    SourceOnly,
    Custom(fn(&InputEvent) -> bool),
}

/// Metadata-wrapped listener with filters and control flags.
struct ListenerEntry {
    listener: Box<dyn InputListener>,
    enabled: bool,
    filter: EventFilter,
    source: Option<u32>, // only events from this input source
}

/// Fan-out [`InputSink`]: every raised event is delivered to matching listeners.
#[derive(Default)]
pub struct InputEventBus {
    next_id: u64,
    listeners: HashMap<u64, ListenerEntry>,
}

impl InputEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener with optional filtering and source restriction.
    pub fn add_listener(
        &mut self,
        listener: impl InputListener + 'static,
        filter: EventFilter,
        source: Option<u32>,
    ) -> u64 {
        let id = self.next_id;
        self.listeners.insert(
            id,
            ListenerEntry {
                listener: Box::new(listener),
                enabled: true,
                filter,
                source,
            },
        );
        self.next_id += 1;
        id
    }

    /// Enables a previously registered listener.
    pub fn enable(&mut self, id: u64) {
        if let Some(entry) = self.listeners.get_mut(&id) {
            entry.enabled = true;
        }
    }

    /// Disables (mutes) a listener without removing it.
    pub fn disable(&mut self, id: u64) {
        if let Some(entry) = self.listeners.get_mut(&id) {
            entry.enabled = false;
        }
    }

    /// Unregisters a listener entirely.
    pub fn remove_listener(&mut self, id: u64) {
        self.listeners.remove(&id);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Emits one event to all active and matching listeners.
    fn emit(&mut self, event: &InputEvent) {
        trace!("emit {:?} from source {}", event.kind, event.source_id);
        for entry in self.listeners.values_mut() {
            if !entry.enabled {
                continue;
            }

            if let Some(wanted) = entry.source {
                if event.source_id != wanted {
                    continue;
                }
            }

            let passes_filter = match entry.filter {
                EventFilter::All => true,
                EventFilter::DigitalOnly => event.kind.is_digital(),
                EventFilter::AxisOnly => event.kind.is_axis(),
                EventFilter::PoseOnly => event.kind.is_pose(),
                EventFilter::SourceOnly => event.kind.is_source(),
                EventFilter::Custom(f) => f(event),
            };

            if passes_filter {
                entry.listener.on_input(event);
            }
        }
    }

    /// Emits a batch of events to matching listeners.
    pub fn emit_all(&mut self, events: &[InputEvent]) {
        for event in events {
            self.emit(event);
        }
    }
}

impl InputSink for InputEventBus {
    fn raise(&mut self, event: InputEvent) {
        self.emit(&event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::Handedness;
    use crate::event::InputKind;
    use crate::interaction::InputAction;
    use std::sync::{Arc, Mutex};

    struct Recorder(Arc<Mutex<Vec<InputKind>>>);

    impl InputListener for Recorder {
        fn on_input(&mut self, event: &InputEvent) {
            if let Ok(mut seen) = self.0.lock() {
                seen.push(event.kind.clone());
            }
        }
    }

    fn recorder() -> (Recorder, Arc<Mutex<Vec<InputKind>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        (Recorder(seen.clone()), seen)
    }

    #[test]
    fn test_filters_and_source_tags() {
        let mut bus = InputEventBus::new();
        let (all, all_seen) = recorder();
        let (digital, digital_seen) = recorder();
        let (tagged, tagged_seen) = recorder();
        bus.add_listener(all, EventFilter::All, None);
        bus.add_listener(digital, EventFilter::DigitalOnly, None);
        bus.add_listener(tagged, EventFilter::All, Some(2));

        let action = InputAction::NONE;
        bus.raise_input_down(1, Handedness::Left, &action);
        bus.raise_input_pressed(1, Handedness::Left, &action, Some(0.3));
        bus.raise_input_up(2, Handedness::Right, &action);

        assert_eq!(all_seen.lock().unwrap().len(), 3);
        assert_eq!(
            *digital_seen.lock().unwrap(),
            vec![InputKind::Down, InputKind::Up]
        );
        assert_eq!(*tagged_seen.lock().unwrap(), vec![InputKind::Up]);
    }

    fn is_right(event: &InputEvent) -> bool {
        event.handedness == Handedness::Right
    }

    #[test]
    fn test_custom_filter() {
        let mut bus = InputEventBus::new();
        let (listener, seen) = recorder();
        bus.add_listener(listener, EventFilter::Custom(is_right), None);

        bus.raise_input_down(1, Handedness::Left, &InputAction::NONE);
        bus.raise_source_detected(2, Handedness::Right, "Vive Wand Right");
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_disable_enable_remove() {
        let mut bus = InputEventBus::new();
        let (listener, seen) = recorder();
        let id = bus.add_listener(listener, EventFilter::All, None);

        bus.disable(id);
        bus.raise_input_down(1, Handedness::None, &InputAction::NONE);
        assert!(seen.lock().unwrap().is_empty());

        bus.enable(id);
        bus.raise_input_down(1, Handedness::None, &InputAction::NONE);
        assert_eq!(seen.lock().unwrap().len(), 1);

        bus.remove_listener(id);
        assert_eq!(bus.listener_count(), 0);
    }
}
