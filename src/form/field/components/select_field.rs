use crate::form::state::{FieldState, displayed_error};
use crate::vdom::{AttrValue, EventKind, Listener, VNode};

use super::super::{FieldComponent, FieldMeta, Handlers, ValidationProps};
use super::{Select, SelectOption};

/// A field around a [`Select`]. Always carries an id, generated at mount
/// when none is given.
#[derive(Debug, Clone, Default)]
pub struct SelectField {
    pub field: FieldMeta,
    pub validation: ValidationProps,
    pub handlers: Handlers,
    pub autofocus: bool,
    pub disabled: bool,
    pub name: Option<String>,
    pub options: Vec<SelectOption>,
    pub placeholder: Option<String>,
    pub required: bool,
    pub size: Option<u32>,
    pub value: Option<AttrValue>,
    /// Extra classes for the `<select>` itself.
    pub control_class: Option<String>,
}

impl SelectField {
    fn select(&self) -> Select {
        Select {
            id: self.field.id.clone(),
            name: self.name.clone(),
            class: self.control_class.clone().map(Into::into),
            disabled: self.disabled,
            required: self.required,
            size: self.size,
            options: self.options.clone(),
            value: self.value.clone(),
            placeholder: self.placeholder.clone(),
            on_change: None,
            on_blur: self.handlers.on_blur.clone(),
            on_focus: self.handlers.on_focus.clone(),
        }
    }
}

impl FieldComponent for SelectField {
    const CLASS: &'static str = "SelectField";

    fn meta(&self) -> &FieldMeta {
        &self.field
    }

    fn meta_mut(&mut self) -> &mut FieldMeta {
        &mut self.field
    }

    fn validation(&self) -> &ValidationProps {
        &self.validation
    }

    fn validation_mut(&mut self) -> &mut ValidationProps {
        &mut self.validation
    }

    fn handlers(&self) -> &Handlers {
        &self.handlers
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn autofocus(&self) -> bool {
        self.autofocus
    }

    fn wants_id(&self) -> bool {
        true
    }

    fn render(&self, state: &FieldState) -> VNode {
        let error = displayed_error(self.validation.external_error(), state);
        let select = self
            .select()
            .element()
            .flag("autofocus", self.autofocus)
            .on(EventKind::Change, Listener::Managed)
            .on(EventKind::Invalid, Listener::Managed);
        self.field
            .wrapper(Self::CLASS, error)
            .node([select.into()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::field::control_element;

    #[test]
    fn renders_select_inside_field() {
        let field = SelectField {
            field: FieldMeta {
                id: Some("color".into()),
                label: Some("Color".into()),
                label_class: Some("bold".into()),
                ..FieldMeta::default()
            },
            options: vec!["red".into(), "blue".into()],
            value: Some("blue".into()),
            control_class: Some("wide".into()),
            ..SelectField::default()
        };
        let node = field.render(&FieldState::default()).resolve();
        let root = node.as_element().expect("root");
        assert!(root.has_class("SelectField"));

        let select = control_element(&node).expect("select");
        assert!(select.is_tag("select"));
        assert!(select.has_class("wide"));
        assert_eq!(select.text_attr("id"), Some("color"));
        assert!(select.listener(EventKind::Change).is_some_and(Listener::is_managed));

        let label = node.find(&|el| el.is_tag("label")).expect("label");
        assert!(label.has_class("bold"));
    }
}
