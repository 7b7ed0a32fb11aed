use crate::form::state::{FieldState, displayed_error};
use crate::vdom::{Element, EventKind, Listener, VNode};

use super::super::{FieldComponent, FieldMeta, Handlers, ValidationProps};

/// A checkbox whose label wraps the input; the wrapper itself has no label.
#[derive(Debug, Clone, Default)]
pub struct CheckboxField {
    pub field: FieldMeta,
    pub validation: ValidationProps,
    pub handlers: Handlers,
    pub autofocus: bool,
    pub checked: bool,
    pub disabled: bool,
    pub name: Option<String>,
    pub required: bool,
    pub value: Option<String>,
}

impl CheckboxField {
    fn control(&self) -> Element {
        Element::tag("input")
            .flag("checked", self.checked)
            .flag("disabled", self.disabled)
            .attr_opt("id", self.field.id.as_deref())
            .attr_opt("name", self.name.as_deref())
            .attr_opt("value", self.value.as_deref())
            .flag("required", self.required)
            .attr("type", "checkbox")
            .on_opt(EventKind::Blur, self.handlers.on_blur.as_ref())
            .on_opt(EventKind::Focus, self.handlers.on_focus.as_ref())
            .on(EventKind::Change, Listener::Managed)
            .on(EventKind::Invalid, Listener::Managed)
    }
}

impl FieldComponent for CheckboxField {
    const CLASS: &'static str = "CheckboxField";

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
        false
    }

    fn render(&self, state: &FieldState) -> VNode {
        let error = displayed_error(self.validation.external_error(), state);
        let mut wrapper = self.field.wrapper(Self::CLASS, error);
        wrapper.label = None;
        wrapper.id = None;
        let label = Element::tag("label")
            .child(self.control())
            .child(self.field.label.clone());
        wrapper.node([label.into()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::field::control_element;

    #[test]
    fn label_wraps_the_checkbox() {
        let field = CheckboxField {
            field: FieldMeta {
                label: Some("I agree".into()),
                ..FieldMeta::default()
            },
            checked: true,
            name: Some("terms".into()),
            ..CheckboxField::default()
        };
        let node = field.render(&FieldState::default()).resolve();
        let root = node.as_element().expect("root");
        assert!(root.has_class("CheckboxField"));
        assert!(root.children[0].is_empty());

        let label = node.find(&|el| el.is_tag("label")).expect("label");
        assert_eq!(label.text(), "I agree");
        let input = control_element(&node).expect("input");
        assert_eq!(input.text_attr("type"), Some("checkbox"));
        assert!(input.has_flag("checked"));
        assert!(input.listener(EventKind::Input).is_none());
    }
}
