use crate::domain::{Control, Event};
use crate::form::{
    FieldComponent, FieldInstance, FieldState, Form, FormData, FormElement, SubmitOutcome,
    control_element,
};
use crate::vdom::{Element, EventKind, Listener, VNode, to_html};

use super::{HostControl, HostError};

/// Type-erased view of a mounted field backed by a [`HostControl`].
pub trait MountedField {
    fn name(&self) -> Option<&str>;

    fn render(&self) -> VNode;

    fn state(&self) -> &FieldState;

    fn displayed_error(&self) -> Option<&str>;

    fn control(&self) -> &HostControl;

    fn control_mut(&mut self) -> &mut HostControl;

    fn dispatch(&mut self, kind: EventKind);

    fn check_validity(&mut self) -> bool;

    fn set_error(&mut self, error: Option<String>);
}

impl<F: FieldComponent> MountedField for FieldInstance<F, HostControl> {
    fn name(&self) -> Option<&str> {
        self.props().name()
    }

    fn render(&self) -> VNode {
        FieldInstance::render(self)
    }

    fn state(&self) -> &FieldState {
        FieldInstance::state(self)
    }

    fn displayed_error(&self) -> Option<&str> {
        FieldInstance::displayed_error(self)
    }

    fn control(&self) -> &HostControl {
        FieldInstance::control(self)
    }

    fn control_mut(&mut self) -> &mut HostControl {
        FieldInstance::control_mut(self)
    }

    fn dispatch(&mut self, kind: EventKind) {
        FieldInstance::dispatch(self, kind);
    }

    fn check_validity(&mut self) -> bool {
        FieldInstance::check_validity(self)
    }

    fn set_error(&mut self, error: Option<String>) {
        FieldInstance::set_error(self, error);
    }
}

enum Slot {
    Field(Box<dyn MountedField>),
    /// A bare control outside any field, with the element it was built from.
    Control(Element, HostControl),
    Markup(VNode),
}

impl Slot {
    fn control(&self) -> Option<&HostControl> {
        match self {
            Slot::Field(field) => Some(field.control()),
            Slot::Control(_, control) => Some(control),
            Slot::Markup(_) => None,
        }
    }

    fn matches(&self, key: &str) -> bool {
        self.control()
            .is_some_and(|control| control.name() == Some(key) || control.id() == Some(key))
    }

    fn render(&self) -> VNode {
        match self {
            Slot::Field(field) => field.render(),
            Slot::Control(element, _) => element.clone().into(),
            Slot::Markup(node) => node.clone(),
        }
    }

    fn dispatch(&mut self, kind: EventKind) {
        match self {
            Slot::Field(field) => field.dispatch(kind),
            Slot::Control(element, control) => {
                if let Some(callback) = element.listener(kind).and_then(Listener::callback) {
                    callback(&mut Event::new(kind, &mut *control));
                }
                control.take_events();
            }
            Slot::Markup(_) => {}
        }
    }

    fn check_validity(&mut self) -> bool {
        match self {
            Slot::Field(field) => field.check_validity(),
            Slot::Control(_, control) => {
                let valid = control.check_validity();
                control.take_events();
                valid
            }
            Slot::Markup(_) => true,
        }
    }

    fn control_mut(&mut self) -> Option<&mut HostControl> {
        match self {
            Slot::Field(field) => Some(field.control_mut()),
            Slot::Control(_, control) => Some(control),
            Slot::Markup(_) => None,
        }
    }
}

/// A simulated document: one [`Form`] with mounted fields and controls that
/// can be filled in and submitted.
pub struct HostForm {
    form: Form,
    slots: Vec<Slot>,
}

impl HostForm {
    pub fn new(form: Form) -> Self {
        Self {
            form,
            slots: Vec::new(),
        }
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    /// Mounts a field over a control built from its first render.
    pub fn push_field<F: FieldComponent + 'static>(&mut self, props: F) -> Result<(), HostError> {
        let node = props.render(&FieldState::default());
        let element = control_element(&node).ok_or(HostError::NoControl(F::CLASS))?;
        let control = HostControl::from_element(element)?;
        tracing::trace!(component = F::CLASS, name = props.name(), "mounting field");
        self.slots
            .push(Slot::Field(Box::new(FieldInstance::mount(props, control))));
        Ok(())
    }

    pub fn push_control(&mut self, element: Element) -> Result<(), HostError> {
        let control = HostControl::from_element(&element)?;
        self.slots.push(Slot::Control(element, control));
        Ok(())
    }

    pub fn push_markup(&mut self, node: impl Into<VNode>) {
        self.slots.push(Slot::Markup(node.into()));
    }

    /// Types `value` into the control named (or with id) `key`.
    pub fn input(&mut self, key: &str, value: &str) -> Result<(), HostError> {
        self.edit(key, EventKind::Input, |control| control.set_value(value))
    }

    /// Commits `value`, as when a text control loses focus after an edit.
    pub fn change(&mut self, key: &str, value: &str) -> Result<(), HostError> {
        self.edit(key, EventKind::Change, |control| control.set_value(value))
    }

    pub fn set_checked(&mut self, key: &str, checked: bool) -> Result<(), HostError> {
        self.edit(key, EventKind::Change, |control| control.set_checked(checked))
    }

    pub fn select(&mut self, key: &str, value: &str) -> Result<(), HostError> {
        let control = self
            .control(key)
            .ok_or_else(|| HostError::UnknownField(key.to_string()))?;
        if !control.options().iter().any(|option| option == value) {
            return Err(HostError::UnknownOption {
                name: key.to_string(),
                value: value.to_string(),
            });
        }
        self.edit(key, EventKind::Change, |control| control.set_value(value))
    }

    pub fn focus(&mut self, key: &str) -> Result<(), HostError> {
        self.edit(key, EventKind::Focus, |control| control.focus())
    }

    pub fn blur(&mut self, key: &str) -> Result<(), HostError> {
        self.edit(key, EventKind::Blur, HostControl::blur)
    }

    /// Sets or clears the external error of a field, e.g. once an
    /// asynchronous check settles.
    pub fn set_field_error(&mut self, key: &str, error: Option<String>) -> Result<(), HostError> {
        match self.slot_mut(key)? {
            Slot::Field(field) => {
                field.set_error(error);
                Ok(())
            }
            _ => Err(HostError::UnknownField(key.to_string())),
        }
    }

    pub fn field(&self, key: &str) -> Option<&dyn MountedField> {
        self.slots.iter().find_map(|slot| match slot {
            Slot::Field(field) if slot.matches(key) => Some(field.as_ref()),
            _ => None,
        })
    }

    pub fn control(&self, key: &str) -> Option<&HostControl> {
        self.slots
            .iter()
            .find(|slot| slot.matches(key))
            .and_then(Slot::control)
    }

    /// Displayed error of every field that has one, keyed by field name.
    pub fn errors(&self) -> Vec<(String, String)> {
        self.slots
            .iter()
            .filter_map(|slot| match slot {
                Slot::Field(field) => field.displayed_error().map(|error| {
                    let name = field.name().or(field.control().id()).unwrap_or_default();
                    (name.to_string(), error.to_string())
                }),
                _ => None,
            })
            .collect()
    }

    pub fn render(&self) -> VNode {
        self.form.render(self.slots.iter().map(Slot::render))
    }

    pub fn to_html(&self) -> String {
        to_html(&self.render())
    }

    /// Runs the form's submit handler against this document.
    pub fn submit(&mut self) -> SubmitOutcome {
        let form = self.form.clone();
        form.submit(self)
    }

    fn slot_mut(&mut self, key: &str) -> Result<&mut Slot, HostError> {
        self.slots
            .iter_mut()
            .find(|slot| slot.matches(key))
            .ok_or_else(|| HostError::UnknownField(key.to_string()))
    }

    fn edit(
        &mut self,
        key: &str,
        kind: EventKind,
        apply: impl FnOnce(&mut HostControl),
    ) -> Result<(), HostError> {
        let slot = self.slot_mut(key)?;
        if let Some(control) = slot.control_mut() {
            apply(control);
        }
        slot.dispatch(kind);
        Ok(())
    }
}

impl FormElement for HostForm {
    fn check_validity(&mut self) -> bool {
        self.slots
            .iter_mut()
            .fold(true, |valid, slot| slot.check_validity() && valid)
    }

    fn form_data(&self) -> FormData {
        self.slots
            .iter()
            .filter_map(Slot::control)
            .filter_map(HostControl::form_entry)
            .collect()
    }
}

impl std::fmt::Debug for HostForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostForm")
            .field("form", &self.form)
            .field("slots", &self.slots.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::form::{CheckboxField, InputField, Phase, SelectField};

    fn named(name: &str, required: bool) -> InputField {
        InputField {
            name: Some(name.into()),
            required,
            ..InputField::default()
        }
    }

    #[test]
    fn submits_filled_form() {
        let mut host = HostForm::new(Form::default());
        host.push_field(named("hello", true)).expect("mount");
        host.input("hello", "world").expect("input");
        assert_eq!(host.submit(), SubmitOutcome::Submitted(json!({ "hello": "world" })));
    }

    #[test]
    fn required_fields_block_submission_and_show_errors() {
        let mut host = HostForm::new(Form::default());
        host.push_field(named("a", true)).expect("mount");
        host.push_field(named("b", true)).expect("mount");
        assert_eq!(host.submit(), SubmitOutcome::Rejected);
        assert_eq!(host.errors().len(), 2);
        let field = host.field("a").expect("field");
        assert_eq!(field.state().phase(), Phase::Validating);

        host.input("a", "x").expect("input");
        assert_eq!(host.errors(), [("b".to_string(), "Please fill out this field.".to_string())]);
    }

    #[test]
    fn checkbox_and_select_contribute_data() {
        let mut host = HostForm::new(Form::default());
        host.push_field(CheckboxField {
            name: Some("agree".into()),
            required: true,
            ..CheckboxField::default()
        })
        .expect("mount");
        host.push_field(SelectField {
            name: Some("color".into()),
            placeholder: Some("Pick one".into()),
            options: vec!["red".into(), "blue".into()],
            required: true,
            ..SelectField::default()
        })
        .expect("mount");

        assert_eq!(host.submit(), SubmitOutcome::Rejected);
        assert_eq!(
            host.field("color").and_then(|field| field.displayed_error()),
            Some("Please select an item in the list.")
        );

        host.set_checked("agree", true).expect("check");
        host.select("color", "blue").expect("select");
        assert!(host.errors().is_empty());
        assert_eq!(
            host.submit(),
            SubmitOutcome::Submitted(json!({ "agree": "on", "color": "blue" }))
        );
    }

    #[test]
    fn unknown_targets_are_errors() {
        let mut host = HostForm::new(Form::default());
        host.push_field(SelectField {
            name: Some("color".into()),
            options: vec!["red".into()],
            ..SelectField::default()
        })
        .expect("mount");
        assert!(matches!(host.input("nope", "x"), Err(HostError::UnknownField(_))));
        assert!(matches!(
            host.select("color", "green"),
            Err(HostError::UnknownOption { .. })
        ));
    }

    #[test]
    fn bare_controls_take_part() {
        let mut host = HostForm::new(Form::default());
        host.push_control(
            Element::tag("input")
                .attr("type", "hidden")
                .attr("name", "token")
                .attr("value", "abc"),
        )
        .expect("control");
        host.push_markup(Element::tag("button").attr("type", "submit").child("Send"));
        assert_eq!(host.submit(), SubmitOutcome::Submitted(json!({ "token": "abc" })));
        assert!(host.to_html().contains("<button type=\"submit\">Send</button>"));
    }

    #[test]
    fn external_errors_block_until_cleared() {
        let mut host = HostForm::new(Form::default());
        host.push_field(named("user", false)).expect("mount");
        host.set_field_error("user", Some("Username is taken.".into()))
            .expect("error");
        assert_eq!(host.submit(), SubmitOutcome::Rejected);
        assert_eq!(host.errors()[0].1, "Username is taken.");

        host.set_field_error("user", None).expect("clear");
        assert!(host.submit().is_submitted());
    }
}
