use crate::domain::{Control, ValidityState};
use crate::form::is_control;
use crate::vdom::{Element, EventKind};

use super::HostError;
use super::constraints::{Constraints, ControlKind, Snapshot};

/// In-memory stand-in for a live `<input>`, `<textarea>` or `<select>`.
#[derive(Debug, Clone)]
pub struct HostControl {
    kind: ControlKind,
    id: Option<String>,
    name: Option<String>,
    value: String,
    checked: bool,
    /// Option values of a select, in document order.
    options: Vec<String>,
    constraints: Constraints,
    custom: String,
    dirty: bool,
    focused: bool,
    /// Last rendered value and checkedness; patches only apply changes.
    rendered_value: Option<String>,
    rendered_checked: bool,
    events: Vec<EventKind>,
}

impl HostControl {
    pub fn from_element(element: &Element) -> Result<Self, HostError> {
        let tag = element.tag_name().unwrap_or_default();
        if !is_control(element) {
            return Err(HostError::UnsupportedElement(tag.to_string()));
        }
        let kind = match tag {
            "textarea" => ControlKind::TextArea,
            "select" => ControlKind::Select,
            _ => ControlKind::Input(
                element
                    .text_attr("type")
                    .unwrap_or("text")
                    .to_ascii_lowercase(),
            ),
        };
        let mut control = Self {
            kind,
            id: None,
            name: None,
            value: String::new(),
            checked: false,
            options: Vec::new(),
            constraints: Constraints::default(),
            custom: String::new(),
            dirty: false,
            focused: false,
            rendered_value: None,
            rendered_checked: false,
            events: Vec::new(),
        };
        control.apply(element, true);
        Ok(control)
    }

    pub fn kind(&self) -> &ControlKind {
        &self.kind
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn checked(&self) -> bool {
        self.checked
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    /// A user edit of the value.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.dirty = true;
    }

    pub fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
        self.dirty = true;
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    /// Name/value pair this control contributes to the form data, if any.
    pub fn form_entry(&self) -> Option<(String, String)> {
        let name = self.name.as_deref().filter(|name| !name.is_empty())?;
        if self.constraints.disabled {
            return None;
        }
        match self.kind.input_type() {
            Some("submit" | "button" | "reset" | "image" | "file") => None,
            Some("checkbox" | "radio") if !self.checked => None,
            _ => Some((name.to_string(), self.value.clone())),
        }
    }

    fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            kind: &self.kind,
            value: &self.value,
            checked: self.checked,
            dirty: self.dirty,
        }
    }

    fn apply(&mut self, element: &Element, initial: bool) {
        self.id = element.text_attr("id").map(str::to_string);
        self.name = element.text_attr("name").map(str::to_string);
        self.constraints = Constraints::from_element(element);

        let rendered_value = match &self.kind {
            ControlKind::TextArea => Some(element.text()),
            ControlKind::Select => {
                self.options = option_values(element);
                selected_value(element, &self.options)
            }
            ControlKind::Input(_) => element.get("value").map(|value| value.to_text().into_owned()),
        };
        if initial || rendered_value != self.rendered_value {
            self.value = match (&rendered_value, self.kind.is_checkbox()) {
                (Some(value), _) => value.clone(),
                (None, true) => "on".to_string(),
                (None, false) => String::new(),
            };
            self.rendered_value = rendered_value;
        }

        let rendered_checked = element.has_flag("checked");
        if initial || rendered_checked != self.rendered_checked {
            self.checked = rendered_checked;
            self.rendered_checked = rendered_checked;
        }
    }
}

impl Control for HostControl {
    fn value(&self) -> &str {
        &self.value
    }

    fn validity(&self) -> ValidityState {
        self.constraints.evaluate(self.snapshot(), &self.custom)
    }

    fn validation_message(&self) -> String {
        if self.constraints.is_barred(&self.kind) {
            return String::new();
        }
        if !self.custom.is_empty() {
            return self.custom.clone();
        }
        self.validity()
            .first_flag()
            .map(|flag| self.constraints.message(flag, self.snapshot()))
            .unwrap_or_default()
    }

    fn custom_validity(&self) -> &str {
        &self.custom
    }

    fn set_custom_validity(&mut self, message: &str) {
        self.custom = message.to_string();
    }

    fn check_validity(&mut self) -> bool {
        if self.constraints.is_barred(&self.kind) || self.validity().valid() {
            return true;
        }
        self.events.push(EventKind::Invalid);
        false
    }

    fn focus(&mut self) {
        self.focused = true;
    }

    fn take_events(&mut self) -> Vec<EventKind> {
        std::mem::take(&mut self.events)
    }

    fn patch(&mut self, element: &Element) {
        self.apply(element, false);
    }
}

fn options_of(select: &Element) -> Vec<&Element> {
    let mut found = Vec::new();
    for child in &select.children {
        child.find_all(&|el| el.is_tag("option"), &mut found);
    }
    found
}

fn option_values(select: &Element) -> Vec<String> {
    options_of(select).into_iter().map(option_value).collect()
}

fn option_value(option: &Element) -> String {
    option
        .get("value")
        .map(|value| value.to_text().into_owned())
        .unwrap_or_else(|| option.text())
}

/// The last option marked selected, else the first option.
fn selected_value(select: &Element, values: &[String]) -> Option<String> {
    options_of(select)
        .iter()
        .rposition(|option| option.has_flag("selected"))
        .or((!values.is_empty()).then_some(0))
        .and_then(|index| values.get(index).cloned())
}
