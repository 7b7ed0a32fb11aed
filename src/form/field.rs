mod components;
mod instance;

use std::fmt;
use std::rc::Rc;

use crate::domain::{Control, ValidityState};
use crate::vdom::{Callback, ClassName, Element, EventKind, VNode};

use super::state::FieldState;

pub use components::{
    CheckboxField, FIELD, Field, InputField, Select, SelectField, SelectOption, TextField,
};
pub use instance::{CustomValiditySync, FieldInstance};

/// Builds the message shown for a validity state, e.g. to localize it.
pub type ValidationMessage = Rc<dyn Fn(&ValidityState, &dyn Control) -> String>;

/// Wrapper props shared by every field: everything around the control.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldMeta {
    pub id: Option<String>,
    pub label: Option<String>,
    pub description: Option<String>,
    pub hint: Option<String>,
    pub class: Option<ClassName>,
    pub label_class: Option<String>,
    pub description_class: Option<String>,
    pub controls_class: Option<String>,
    pub error_class: Option<String>,
    pub hint_class: Option<String>,
}

impl FieldMeta {
    /// `Field` props for a component whose wrapper carries `base` as class.
    pub fn wrapper(&self, base: &'static str, error: Option<&str>) -> Field {
        Field {
            class: Some(ClassName::List(
                std::iter::once(ClassName::from(base))
                    .chain(self.class.clone())
                    .collect(),
            )),
            id: self.id.clone(),
            label: self.label.clone(),
            description: self.description.clone(),
            error: error.map(str::to_string),
            hint: self.hint.clone(),
            label_class: self.label_class.clone(),
            description_class: self.description_class.clone(),
            controls_class: self.controls_class.clone(),
            error_class: self.error_class.clone(),
            hint_class: self.hint_class.clone(),
        }
    }
}

#[derive(Clone, Default)]
pub struct ValidationProps {
    /// Externally supplied error, e.g. from asynchronous validation.
    pub error: Option<String>,
    /// Validate on every edit from the start instead of after the first
    /// invalid event.
    pub validate: bool,
    /// Defaults to the control's own validation message.
    pub message: Option<ValidationMessage>,
}

impl ValidationProps {
    pub fn external_error(&self) -> Option<&str> {
        self.error.as_deref().filter(|message| !message.is_empty())
    }

    pub fn message_for(&self, control: &dyn Control) -> String {
        match &self.message {
            Some(message) => message(&control.validity(), control),
            None => control.validation_message(),
        }
    }
}

impl fmt::Debug for ValidationProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationProps")
            .field("error", &self.error)
            .field("validate", &self.validate)
            .field("message", &self.message.as_ref().map(|_| ".."))
            .finish()
    }
}

#[derive(Clone, Default)]
pub struct Handlers {
    pub on_input: Option<Callback>,
    pub on_change: Option<Callback>,
    pub on_blur: Option<Callback>,
    pub on_focus: Option<Callback>,
}

impl Handlers {
    pub fn for_event(&self, kind: EventKind) -> Option<&Callback> {
        match kind {
            EventKind::Input => self.on_input.as_ref(),
            EventKind::Change => self.on_change.as_ref(),
            EventKind::Blur => self.on_blur.as_ref(),
            EventKind::Focus => self.on_focus.as_ref(),
            EventKind::Invalid | EventKind::Submit => None,
        }
    }
}

impl fmt::Debug for Handlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let set: Vec<&str> = [
            ("on_input", self.on_input.is_some()),
            ("on_change", self.on_change.is_some()),
            ("on_blur", self.on_blur.is_some()),
            ("on_focus", self.on_focus.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, present)| present.then_some(name))
        .collect();
        f.debug_tuple("Handlers").field(&set).finish()
    }
}

/// A field component: typed props that render a `Field` around one control
/// and share the validation state machine.
pub trait FieldComponent {
    /// Class added to the wrapper next to the caller's classes.
    const CLASS: &'static str;

    fn meta(&self) -> &FieldMeta;

    fn meta_mut(&mut self) -> &mut FieldMeta;

    fn validation(&self) -> &ValidationProps;

    fn validation_mut(&mut self) -> &mut ValidationProps;

    fn handlers(&self) -> &Handlers;

    fn name(&self) -> Option<&str>;

    fn autofocus(&self) -> bool {
        false
    }

    /// Whether mounting generates an id when none was given.
    fn wants_id(&self) -> bool {
        self.meta().label.is_some()
    }

    fn render(&self, state: &FieldState) -> VNode;
}

/// The form control inside a rendered field.
pub fn control_element(node: &VNode) -> Option<&Element> {
    node.find(&is_control)
}

pub fn is_control(element: &Element) -> bool {
    matches!(element.tag_name(), Some("input" | "textarea" | "select"))
}
