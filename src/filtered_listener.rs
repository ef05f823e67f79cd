use crate::classifier::Handedness;
use crate::event::InputEvent;
use crate::eventbus::InputListener;

/// Wraps a listener and filters events based on a user-supplied predicate.
pub struct FilteredListener {
    predicate: Box<dyn Fn(&InputEvent) -> bool + Send + Sync>,
    inner: Box<dyn InputListener>,
}

impl FilteredListener {
    pub fn new(
        predicate: impl Fn(&InputEvent) -> bool + Send + Sync + 'static,
        inner: impl InputListener + 'static,
    ) -> Self {
        Self {
            predicate: Box::new(predicate),
            inner: Box::new(inner),
        }
    }

    /// Only events raised for `handedness`.
    pub fn for_hand(handedness: Handedness, inner: impl InputListener + 'static) -> Self {
        Self::new(move |e| e.handedness == handedness, inner)
    }

    /// Only events bound to the application action `action_id`.
    pub fn for_action(action_id: u32, inner: impl InputListener + 'static) -> Self {
        Self::new(move |e| e.action.id == action_id, inner)
    }
}

impl InputListener for FilteredListener {
    fn on_input(&mut self, event: &InputEvent) {
        if (self.predicate)(event) {
            self.inner.on_input(event);
        }
    }
}
