use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use regex::Regex;
use serde_json::Value;

use crate::domain::{Control, ValidityFlag, ValidityState};
use crate::form::{
    CheckboxField, FieldMeta, Form, FormEntry, InputField, SelectField, SelectOption, TextField,
    Transform, ValidationMessage, ValidationProps,
};
use crate::host::HostForm;
use crate::vdom::{AttrValue, ClassName, Element};

use super::model::{FieldDefinition, FieldKind, FormDefinition, OptionDefinition};

/// A definition that cannot be turned into components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionError {
    /// JSON pointer into the definition document.
    pub pointer: String,
    pub message: String,
}

impl DefinitionError {
    fn new(pointer: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            pointer: pointer.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for DefinitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.pointer, self.message)
    }
}

impl std::error::Error for DefinitionError {}

/// Typed props built from one field definition.
#[derive(Debug, Clone)]
pub enum FieldProps {
    Input(InputField),
    Text(TextField),
    Checkbox(CheckboxField),
    Select(SelectField),
    /// A bare control without a wrapper.
    Hidden(Element),
}

const COMMON: &[&str] = &[
    "required",
    "disabled",
    "autofocus",
    "validate",
    "messages",
    "error",
    "label",
    "description",
    "hint",
];

fn applicable(kind: FieldKind) -> &'static [&'static str] {
    match kind {
        FieldKind::Input => &[
            "type",
            "value",
            "placeholder",
            "accept",
            "readonly",
            "min",
            "max",
            "step",
            "minlength",
            "maxlength",
            "size",
            "pattern",
        ],
        FieldKind::Text => &[
            "value",
            "placeholder",
            "multiline",
            "readonly",
            "minlength",
            "maxlength",
            "size",
            "pattern",
        ],
        FieldKind::Checkbox => &["value", "checked"],
        FieldKind::Select => &["value", "placeholder", "options", "size", "controlClass"],
        FieldKind::Hidden => &["value", "disabled"],
    }
}

/// Input types that have their own kind or are not data controls.
const FOREIGN_INPUT_TYPES: &[&str] = &[
    "checkbox", "radio", "hidden", "submit", "reset", "button", "image",
];

impl FieldDefinition {
    /// Checks the definition and builds typed props. `index` locates the
    /// field in error pointers.
    pub fn build(&self, index: usize) -> Result<FieldProps, DefinitionError> {
        let at = |attr: &str| format!("/fields/{index}/{attr}");

        if self.name.trim().is_empty() {
            return Err(DefinitionError::new(at("name"), "name must not be empty"));
        }
        let allowed = applicable(self.kind);
        for attr in self.present_attributes() {
            let common = self.kind != FieldKind::Hidden && COMMON.contains(&attr);
            if !common && !allowed.contains(&attr) {
                return Err(DefinitionError::new(
                    at(attr),
                    format!("`{attr}` does not apply to {} fields", self.kind),
                ));
            }
        }

        let value = scalar(self.value.as_ref(), &at("value"))?;
        let min = scalar(self.min.as_ref(), &at("min"))?;
        let max = scalar(self.max.as_ref(), &at("max"))?;
        let step = self.step_attr(&at("step"))?;
        if let (Some(min), Some(max)) = (min.as_ref().and_then(number), max.as_ref().and_then(number))
            && min > max
        {
            return Err(DefinitionError::new(at("min"), format!("min {min} exceeds max {max}")));
        }
        if let (Some(min), Some(max)) = (self.minlength, self.maxlength)
            && min > max
        {
            return Err(DefinitionError::new(
                at("minlength"),
                format!("minlength {min} exceeds maxlength {max}"),
            ));
        }
        if let Some(pattern) = &self.pattern
            && let Err(err) = Regex::new(&format!("^(?:{pattern})$"))
        {
            return Err(DefinitionError::new(at("pattern"), format!("invalid pattern: {err}")));
        }

        let text_value = value.as_ref().map(|value| value.to_text().into_owned());
        let props = match self.kind {
            FieldKind::Input => {
                if let Some(input_type) = &self.input_type
                    && FOREIGN_INPUT_TYPES.contains(&input_type.to_ascii_lowercase().as_str())
                {
                    return Err(DefinitionError::new(
                        at("type"),
                        format!("input type `{input_type}` is not supported by input fields"),
                    ));
                }
                FieldProps::Input(InputField {
                    field: self.meta(),
                    validation: self.validation(),
                    accept: self.accept.clone(),
                    autofocus: self.autofocus,
                    disabled: self.disabled,
                    name: Some(self.name.clone()),
                    placeholder: self.placeholder.clone(),
                    readonly: self.readonly,
                    size: self.size,
                    input_type: self.input_type.clone(),
                    value,
                    max,
                    maxlength: self.maxlength,
                    min,
                    minlength: self.minlength,
                    pattern: self.pattern.clone(),
                    required: self.required,
                    step,
                    ..InputField::default()
                })
            }
            FieldKind::Text => FieldProps::Text(TextField {
                field: self.meta(),
                validation: self.validation(),
                autofocus: self.autofocus,
                disabled: self.disabled,
                multiline: self.multiline.unwrap_or(false),
                name: Some(self.name.clone()),
                placeholder: self.placeholder.clone(),
                readonly: self.readonly,
                size: self.size,
                value: text_value,
                maxlength: self.maxlength,
                minlength: self.minlength,
                pattern: self.pattern.clone(),
                required: self.required,
                ..TextField::default()
            }),
            FieldKind::Checkbox => FieldProps::Checkbox(CheckboxField {
                field: self.meta(),
                validation: self.validation(),
                autofocus: self.autofocus,
                checked: self.checked.unwrap_or(false),
                disabled: self.disabled,
                name: Some(self.name.clone()),
                required: self.required,
                value: text_value,
                ..CheckboxField::default()
            }),
            FieldKind::Select => {
                let options = self
                    .options
                    .iter()
                    .enumerate()
                    .map(|(pos, option)| select_option(option, &at(&format!("options/{pos}"))))
                    .collect::<Result<Vec<_>, _>>()?;
                if let Some(value) = &value
                    && value.as_str() != Some("")
                    && !options.iter().any(|option| option.value() == value)
                {
                    return Err(DefinitionError::new(
                        at("value"),
                        format!("value `{}` matches no option", value.to_text()),
                    ));
                }
                FieldProps::Select(SelectField {
                    field: self.meta(),
                    validation: self.validation(),
                    autofocus: self.autofocus,
                    disabled: self.disabled,
                    name: Some(self.name.clone()),
                    options,
                    placeholder: self.placeholder.clone(),
                    required: self.required,
                    size: self.size,
                    value,
                    control_class: self.control_class.clone(),
                    ..SelectField::default()
                })
            }
            FieldKind::Hidden => FieldProps::Hidden(
                Element::tag("input")
                    .attr_opt("class", self.class.as_deref())
                    .flag("disabled", self.disabled)
                    .attr_opt("id", self.id.as_deref())
                    .attr("name", self.name.as_str())
                    .attr("type", "hidden")
                    .attr_opt("value", value),
            ),
        };
        Ok(props)
    }

    fn meta(&self) -> FieldMeta {
        FieldMeta {
            id: self.id.clone(),
            label: self.label.clone(),
            description: self.description.clone(),
            hint: self.hint.clone(),
            class: self.class.clone().map(ClassName::from),
            label_class: self.label_class.clone(),
            description_class: self.description_class.clone(),
            controls_class: self.controls_class.clone(),
            error_class: self.error_class.clone(),
            hint_class: self.hint_class.clone(),
        }
    }

    fn validation(&self) -> ValidationProps {
        ValidationProps {
            error: self.error.clone(),
            validate: self.validate,
            message: (!self.messages.is_empty()).then(|| messages(self.messages.clone())),
        }
    }

    fn step_attr(&self, pointer: &str) -> Result<Option<AttrValue>, DefinitionError> {
        let Some(step) = scalar(self.step.as_ref(), pointer)? else {
            return Ok(None);
        };
        let valid = match &step {
            AttrValue::Text(text) => text.eq_ignore_ascii_case("any"),
            _ => number(&step).is_some_and(|step| step > 0.0),
        };
        if valid {
            Ok(Some(step))
        } else {
            Err(DefinitionError::new(pointer, "step must be a positive number or \"any\""))
        }
    }
}

impl FormDefinition {
    /// Container props; `rename` becomes the data transform.
    pub fn form(&self) -> Form {
        Form {
            class: self.class.clone().map(ClassName::from),
            autocomplete: self.autocomplete.clone(),
            transform: (!self.rename.is_empty()).then(|| rename(self.rename.clone())),
            on_submit: None,
        }
    }

    /// Builds every field, failing on the first invalid one.
    pub fn build(&self) -> Result<Vec<FieldProps>, DefinitionError> {
        self.fields
            .iter()
            .enumerate()
            .map(|(index, field)| field.build(index))
            .collect()
    }

    /// Mounts the whole form into a simulated document.
    pub fn mount(&self) -> Result<HostForm, DefinitionError> {
        self.mount_with(self.form())
    }

    /// Like [`FormDefinition::mount`] with caller-supplied container props,
    /// e.g. to attach a submit handler.
    pub fn mount_with(&self, form: Form) -> Result<HostForm, DefinitionError> {
        let fields = self.build()?;
        let mut host = HostForm::new(form);
        if let Some(title) = &self.title {
            host.push_markup(Element::tag("h2").attr("class", "Form-title").child(title.as_str()));
        }
        for (index, props) in fields.into_iter().enumerate() {
            let mounted = match props {
                FieldProps::Input(props) => host.push_field(props),
                FieldProps::Text(props) => host.push_field(props),
                FieldProps::Checkbox(props) => host.push_field(props),
                FieldProps::Select(props) => host.push_field(props),
                FieldProps::Hidden(element) => host.push_control(element),
            };
            mounted.map_err(|err| DefinitionError::new(format!("/fields/{index}"), err.to_string()))?;
        }
        if let Some(label) = &self.submit_label {
            host.push_markup(
                Element::tag("button")
                    .attr("class", "Form-submit")
                    .attr("type", "submit")
                    .child(label.as_str()),
            );
        }
        tracing::debug!(fields = self.fields.len(), "mounted form definition");
        Ok(host)
    }
}

fn scalar(value: Option<&Value>, pointer: &str) -> Result<Option<AttrValue>, DefinitionError> {
    value.map(|value| scalar_value(value, pointer)).transpose()
}

fn scalar_value(value: &Value, pointer: &str) -> Result<AttrValue, DefinitionError> {
    AttrValue::from_json(value)
        .ok_or_else(|| DefinitionError::new(pointer, "expected a string, number or boolean"))
}

fn number(value: &AttrValue) -> Option<f64> {
    match value {
        AttrValue::Number(num) => num.as_f64(),
        AttrValue::Text(text) => text.trim().parse().ok(),
        AttrValue::Bool(_) => None,
    }
}

fn select_option(option: &OptionDefinition, pointer: &str) -> Result<SelectOption, DefinitionError> {
    match option {
        OptionDefinition::Plain(value) => scalar_value(value, pointer).map(SelectOption::Plain),
        OptionDefinition::Labeled { label, value } => {
            let value = scalar_value(value, &format!("{pointer}/value"))?;
            Ok(SelectOption::labeled(label.as_str(), value))
        }
    }
}

/// Per-flag messages, falling back to the control's own. A custom validity
/// message set on the control is always shown as is.
fn messages(messages: BTreeMap<ValidityFlag, String>) -> ValidationMessage {
    Rc::new(move |validity: &ValidityState, control: &dyn Control| {
        let flag = validity.first_flag();
        if flag == Some(ValidityFlag::CustomError) && !control.custom_validity().is_empty() {
            return control.validation_message();
        }
        flag.and_then(|flag| messages.get(&flag).cloned())
            .unwrap_or_else(|| control.validation_message())
    })
}

fn rename(renames: BTreeMap<String, String>) -> Transform {
    Rc::new(move |entry: FormEntry| {
        let name = renames.get(&entry.name).cloned().unwrap_or(entry.name);
        Some(FormEntry { name, ..entry })
    })
}
