use crate::form::state::{FieldState, displayed_error};
use crate::vdom::{AttrValue, Element, EventKind, Listener, VNode};

use super::super::{FieldComponent, FieldMeta, Handlers, ValidationProps};

/// A field around a single `<input>`; `input_type` defaults to `text`.
#[derive(Debug, Clone, Default)]
pub struct InputField {
    pub field: FieldMeta,
    pub validation: ValidationProps,
    pub handlers: Handlers,
    pub accept: Option<String>,
    pub autofocus: bool,
    pub disabled: bool,
    pub name: Option<String>,
    pub placeholder: Option<String>,
    pub readonly: bool,
    pub size: Option<u32>,
    pub input_type: Option<String>,
    pub value: Option<AttrValue>,
    pub max: Option<AttrValue>,
    pub maxlength: Option<u32>,
    pub min: Option<AttrValue>,
    pub minlength: Option<u32>,
    pub pattern: Option<String>,
    pub required: bool,
    pub step: Option<AttrValue>,
}

impl InputField {
    pub fn input_type(&self) -> &str {
        self.input_type.as_deref().unwrap_or("text")
    }

    fn control(&self) -> Element {
        Element::tag("input")
            .attr_opt("accept", self.accept.as_deref())
            .flag("autofocus", self.autofocus)
            .flag("disabled", self.disabled)
            .attr_opt("id", self.field.id.as_deref())
            .attr_opt("name", self.name.as_deref())
            .attr_opt("placeholder", self.placeholder.as_deref())
            .flag("readonly", self.readonly)
            .attr_opt("size", self.size)
            .attr("type", self.input_type())
            .attr_opt("value", self.value.clone())
            .attr_opt("max", self.max.clone())
            .attr_opt("maxlength", self.maxlength)
            .attr_opt("min", self.min.clone())
            .attr_opt("minlength", self.minlength)
            .attr_opt("pattern", self.pattern.as_deref())
            .flag("required", self.required)
            .attr_opt("step", self.step.clone())
            .on_opt(EventKind::Blur, self.handlers.on_blur.as_ref())
            .on_opt(EventKind::Focus, self.handlers.on_focus.as_ref())
            .on(EventKind::Change, Listener::Managed)
            .on(EventKind::Input, Listener::Managed)
            .on(EventKind::Invalid, Listener::Managed)
    }
}

impl FieldComponent for InputField {
    const CLASS: &'static str = "InputField";

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
