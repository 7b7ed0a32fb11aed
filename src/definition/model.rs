use std::collections::BTreeMap;
use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::ValidityFlag;

/// A form described as data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FormDefinition {
    /// Heading rendered above the fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Extra classes for the form element.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autocomplete: Option<String>,
    /// Field name to key renames applied to submitted data.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub rename: BTreeMap<String, String>,
    /// Label of a submit button appended after the fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submit_label: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// `InputField`; any HTML input type through `type`.
    #[default]
    Input,
    /// `TextField`; a textarea with `multiline`.
    Text,
    Checkbox,
    Select,
    /// A bare `<input type="hidden">`.
    Hidden,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::Input => "input",
            FieldKind::Text => "text",
            FieldKind::Checkbox => "checkbox",
            FieldKind::Select => "select",
            FieldKind::Hidden => "hidden",
        };
        f.write_str(name)
    }
}

/// One field. Which attributes apply depends on `kind`; the rest are
/// rejected when the form is built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FieldDefinition {
    #[serde(default)]
    pub kind: FieldKind,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Markdown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Markdown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controls_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_class: Option<String>,
    /// HTML input type of `input` fields.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub input_type: Option<String>,
    /// Initial value; a string, number or boolean.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiline: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accept: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub readonly: bool,
    #[serde(default)]
    pub autofocus: bool,
    /// Validate on every edit instead of after the first failed submit.
    #[serde(default)]
    pub validate: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<Value>,
    /// A positive number or `"any"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minlength: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maxlength: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    /// Regular expression the whole value must match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionDefinition>,
    /// Messages replacing the platform's, per failed constraint.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub messages: BTreeMap<ValidityFlag, String>,
    /// External error shown from the start.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FieldDefinition {
    pub fn new(kind: FieldKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            ..Self::default()
        }
    }

    /// Names of the kind-specific attributes that are set.
    pub(crate) fn present_attributes(&self) -> Vec<&'static str> {
        [
            ("type", self.input_type.is_some()),
            ("value", self.value.is_some()),
            ("checked", self.checked.is_some()),
            ("placeholder", self.placeholder.is_some()),
            ("multiline", self.multiline.is_some()),
            ("accept", self.accept.is_some()),
            ("required", self.required),
            ("disabled", self.disabled),
            ("readonly", self.readonly),
            ("autofocus", self.autofocus),
            ("validate", self.validate),
            ("min", self.min.is_some()),
            ("max", self.max.is_some()),
            ("step", self.step.is_some()),
            ("minlength", self.minlength.is_some()),
            ("maxlength", self.maxlength.is_some()),
            ("size", self.size.is_some()),
            ("pattern", self.pattern.is_some()),
            ("options", !self.options.is_empty()),
            ("messages", !self.messages.is_empty()),
            ("error", self.error.is_some()),
            ("label", self.label.is_some()),
            ("description", self.description.is_some()),
            ("hint", self.hint.is_some()),
            ("controlClass", self.control_class.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, set)| set.then_some(name))
        .collect()
    }
}

/// A select option: a bare value, or a label with a value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum OptionDefinition {
    Labeled { label: String, value: Value },
    Plain(Value),
}
