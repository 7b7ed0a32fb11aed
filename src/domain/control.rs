use crate::vdom::{Element, EventKind};

use super::ValidityState;

/// The platform element behind a field: the thing that owns the value and
/// knows its own validity.
pub trait Control {
    fn value(&self) -> &str;

    fn validity(&self) -> ValidityState;

    /// Platform message for the current validity, empty when valid.
    fn validation_message(&self) -> String;

    fn custom_validity(&self) -> &str;

    fn set_custom_validity(&mut self, message: &str);

    /// Returns whether the control is valid. Invalid controls fire an
    /// `invalid` event, collected through [`Control::take_events`].
    fn check_validity(&mut self) -> bool;

    fn focus(&mut self);

    /// Events the platform fired synchronously since the last call.
    fn take_events(&mut self) -> Vec<EventKind> {
        Vec::new()
    }

    /// Brings the control in line with freshly rendered attributes.
    fn patch(&mut self, element: &Element) {
        let _ = element;
    }
}

/// Event delivered to listeners, carrying the control it targets.
pub struct Event<'a> {
    kind: EventKind,
    target: &'a mut dyn Control,
}

impl<'a> Event<'a> {
    pub fn new(kind: EventKind, target: &'a mut dyn Control) -> Self {
        Self { kind, target }
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn target(&self) -> &dyn Control {
        &*self.target
    }

    pub fn target_mut(&mut self) -> &mut dyn Control {
        &mut *self.target
    }
}

impl std::fmt::Debug for Event<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Event")
            .field("kind", &self.kind)
            .field("value", &self.target.value())
            .finish()
    }
}
