use crate::form::state::{FieldState, displayed_error};
use crate::vdom::{Element, EventKind, Listener, VNode};

use super::super::{FieldComponent, FieldMeta, Handlers, ValidationProps};

/// A text field: `<input>` by default, `<textarea>` when `multiline`.
#[derive(Debug, Clone, Default)]
pub struct TextField {
    pub field: FieldMeta,
    pub validation: ValidationProps,
    pub handlers: Handlers,
    pub autofocus: bool,
    pub disabled: bool,
    pub multiline: bool,
    pub name: Option<String>,
    pub placeholder: Option<String>,
    pub readonly: bool,
    pub size: Option<u32>,
    pub value: Option<String>,
    pub maxlength: Option<u32>,
    pub minlength: Option<u32>,
    pub pattern: Option<String>,
    pub required: bool,
}

impl TextField {
    fn control(&self) -> Element {
        let control = Element::tag(if self.multiline { "textarea" } else { "input" })
            .flag("disabled", self.disabled)
            .attr_opt("id", self.field.id.as_deref())
            .attr_opt("name", self.name.as_deref())
            .attr_opt("placeholder", self.placeholder.as_deref())
            .flag("readonly", self.readonly)
            .attr_opt("size", self.size)
            .attr_opt("maxlength", self.maxlength)
            .attr_opt("minlength", self.minlength)
            .attr_opt("pattern", self.pattern.as_deref())
            .flag("required", self.required)
            .on(EventKind::Change, Listener::Managed)
            .on(EventKind::Input, Listener::Managed)
            .on(EventKind::Invalid, Listener::Managed)
            .on_opt(EventKind::Blur, self.handlers.on_blur.as_ref())
            .on_opt(EventKind::Focus, self.handlers.on_focus.as_ref());
        if self.multiline {
            control.child(self.value.clone())
        } else {
            control.attr_opt("value", self.value.as_deref())
        }
    }
}

impl FieldComponent for TextField {
    const CLASS: &'static str = "TextField";

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

    fn render(&self, state: &FieldState) -> VNode {
        let error = displayed_error(self.validation.external_error(), state);
        self.field
            .wrapper(Self::CLASS, error)
            .node([self.control().into()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::field::control_element;

    #[test]
    fn single_line_uses_input_value() {
        let field = TextField {
            value: Some("hi".into()),
            ..TextField::default()
        };
        let node = field.render(&FieldState::default());
        let control = control_element(&node).expect("control");
        assert!(control.is_tag("input"));
        assert_eq!(control.text_attr("value"), Some("hi"));
        assert!(node.resolve().as_element().expect("root").has_class("TextField"));
    }

    #[test]
    fn multiline_puts_value_in_body() {
        let field = TextField {
            multiline: true,
            value: Some("line one\nline two".into()),
            ..TextField::default()
        };
        let node = field.render(&FieldState::default());
        let control = control_element(&node).expect("control");
        assert!(control.is_tag("textarea"));
        assert!(control.get("value").is_none());
        assert_eq!(control.text(), "line one\nline two");
    }

    #[test]
    fn state_error_is_displayed() {
        let node = TextField::default()
            .render(&FieldState::new(true).with_error("Please fill out this field."))
            .resolve();
        assert!(node.as_element().expect("root").has_class("has-error"));
    }
}
