use crate::vdom::EventKind;

/// Control events that can move a field's validation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldAction {
    Input,
    Change,
    Invalid,
}

impl FieldAction {
    pub fn from_event(kind: EventKind) -> Option<Self> {
        match kind {
            EventKind::Input => Some(FieldAction::Input),
            EventKind::Change => Some(FieldAction::Change),
            EventKind::Invalid => Some(FieldAction::Invalid),
            EventKind::Blur | EventKind::Focus | EventKind::Submit => None,
        }
    }
}
