use crate::event::InputEvent;
use crate::eventbus::InputListener;
use tracing::debug;

/// A simple listener that logs all input events at debug level.
#[derive(Default)]
pub struct Logger;

impl Logger {
    pub fn new() -> Self {
        Logger
    }
}

impl InputListener for Logger {
    fn on_input(&mut self, event: &InputEvent) {
        debug!(
            source = event.source_id,
            hand = %event.handedness,
            action = %event.action.description,
            "[Input] {:?}",
            event.kind
        );
    }
}
