//! HTML constraint validation for simulated controls.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{ValidityFlag, ValidityState};
use crate::vdom::{AttrValue, Element};

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*$")
        .expect("email pattern")
});
static URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.-]*:\S+$").expect("url pattern"));

/// Types whose value never takes part in validation.
const BARRED_TYPES: &[&str] = &["hidden", "submit", "button", "reset", "image"];
/// Types that honour `pattern`, `minlength` and `maxlength`.
const TEXT_TYPES: &[&str] = &["text", "search", "url", "tel", "email", "password"];
const NUMERIC_TYPES: &[&str] = &["number", "range"];

/// Which kind of platform element a control is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlKind {
    Input(String),
    TextArea,
    Select,
}

impl ControlKind {
    pub fn input_type(&self) -> Option<&str> {
        match self {
            ControlKind::Input(kind) => Some(kind),
            ControlKind::TextArea | ControlKind::Select => None,
        }
    }

    pub fn is_checkbox(&self) -> bool {
        matches!(self.input_type(), Some("checkbox" | "radio"))
    }

    fn is_text_like(&self) -> bool {
        match self {
            ControlKind::Input(kind) => TEXT_TYPES.contains(&kind.as_str()),
            ControlKind::TextArea => true,
            ControlKind::Select => false,
        }
    }

    fn is_numeric(&self) -> bool {
        self.input_type()
            .is_some_and(|kind| NUMERIC_TYPES.contains(&kind))
    }
}

/// Constraint attributes read off a rendered control.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Constraints {
    pub required: bool,
    pub disabled: bool,
    pub readonly: bool,
    pub pattern: Option<String>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    /// `None` means the type's default step; `any` disables step checks.
    pub step: Option<Step>,
    pub minlength: Option<usize>,
    pub maxlength: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    Any,
    Value(f64),
}

/// What validation sees of a control at one moment.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub kind: &'a ControlKind,
    pub value: &'a str,
    pub checked: bool,
    /// Whether the value was edited by the user since it was last set.
    pub dirty: bool,
}

impl Constraints {
    pub fn from_element(element: &Element) -> Self {
        let number = |name: &str| element.get(name).and_then(attr_number);
        let length = |name: &str| {
            number(name)
                .filter(|len| *len >= 0.0)
                .map(|len| len as usize)
        };
        let step = element.get("step").and_then(|step| match step.to_text().trim() {
            any if any.eq_ignore_ascii_case("any") => Some(Step::Any),
            _ => attr_number(step).filter(|step| *step > 0.0).map(Step::Value),
        });
        Self {
            required: element.has_flag("required"),
            disabled: element.has_flag("disabled"),
            readonly: element.has_flag("readonly"),
            pattern: element.text_attr("pattern").map(str::to_string),
            min: number("min"),
            max: number("max"),
            step,
            minlength: length("minlength"),
            maxlength: length("maxlength"),
        }
    }

    /// Barred controls are never candidates for constraint validation.
    pub fn is_barred(&self, kind: &ControlKind) -> bool {
        if self.disabled {
            return true;
        }
        match kind {
            ControlKind::Input(input_type) => {
                self.readonly || BARRED_TYPES.contains(&input_type.as_str())
            }
            ControlKind::TextArea => self.readonly,
            ControlKind::Select => false,
        }
    }

    pub fn evaluate(&self, control: Snapshot<'_>, custom: &str) -> ValidityState {
        let mut validity = ValidityState {
            custom_error: !custom.is_empty(),
            ..ValidityState::default()
        };
        if self.is_barred(control.kind) {
            return validity;
        }
        let value = control.value;
        let input_type = control.kind.input_type();

        validity.value_missing = self.required
            && match control.kind {
                kind if kind.is_checkbox() => !control.checked,
                _ if matches!(input_type, Some("range" | "color")) => false,
                _ => value.is_empty(),
            };
        if value.is_empty() {
            return validity;
        }

        validity.type_mismatch = match input_type {
            Some("email") => !EMAIL.is_match(value),
            Some("url") => !URL.is_match(value),
            _ => false,
        };

        if control.kind.is_text_like() {
            if matches!(control.kind, ControlKind::Input(_)) {
                validity.pattern_mismatch = self.pattern_mismatch(value);
            }
            if control.dirty {
                let len = value.encode_utf16().count();
                validity.too_long = self.maxlength.is_some_and(|max| len > max);
                validity.too_short = self.minlength.is_some_and(|min| len < min);
            }
        }

        if control.kind.is_numeric() {
            match value.trim().parse::<f64>().ok().filter(|num| num.is_finite()) {
                None => validity.bad_input = true,
                Some(num) => {
                    validity.range_underflow = self.min.is_some_and(|min| num < min);
                    validity.range_overflow = self.max.is_some_and(|max| num > max);
                    validity.step_mismatch = self.step_mismatch(num);
                }
            }
        }
        validity
    }

    /// Browser-style message for the highest priority flag.
    pub fn message(&self, flag: ValidityFlag, control: Snapshot<'_>) -> String {
        let len = control.value.encode_utf16().count();
        match flag {
            ValidityFlag::ValueMissing if control.kind.is_checkbox() => {
                "Please check this box if you want to proceed.".into()
            }
            ValidityFlag::ValueMissing if *control.kind == ControlKind::Select => {
                "Please select an item in the list.".into()
            }
            ValidityFlag::ValueMissing => "Please fill out this field.".into(),
            ValidityFlag::TypeMismatch if control.kind.input_type() == Some("email") => {
                "Please enter an email address.".into()
            }
            ValidityFlag::TypeMismatch => "Please enter a URL.".into(),
            ValidityFlag::BadInput => "Please enter a number.".into(),
            ValidityFlag::PatternMismatch => "Please match the requested format.".into(),
            ValidityFlag::TooLong => format!(
                "Please shorten this text to {} characters or less (you are currently using {len} characters).",
                self.maxlength.unwrap_or_default()
            ),
            ValidityFlag::TooShort => format!(
                "Please lengthen this text to {} characters or more (you are currently using {len} characters).",
                self.minlength.unwrap_or_default()
            ),
            ValidityFlag::RangeUnderflow => format!(
                "Value must be greater than or equal to {}.",
                format_number(self.min.unwrap_or_default())
            ),
            ValidityFlag::RangeOverflow => format!(
                "Value must be less than or equal to {}.",
                format_number(self.max.unwrap_or_default())
            ),
            ValidityFlag::StepMismatch | ValidityFlag::CustomError => {
                "Please enter a valid value.".into()
            }
        }
    }

    fn pattern_mismatch(&self, value: &str) -> bool {
        let Some(pattern) = self.pattern.as_deref() else {
            return false;
        };
        match Regex::new(&format!("^(?:{pattern})$")) {
            Ok(regex) => !regex.is_match(value),
            Err(err) => {
                tracing::trace!(%pattern, %err, "ignoring invalid pattern");
                false
            }
        }
    }

    fn step_mismatch(&self, num: f64) -> bool {
        let step = match self.step {
            Some(Step::Any) => return false,
            Some(Step::Value(step)) => step,
            None => 1.0,
        };
        let base = self.min.unwrap_or(0.0);
        let steps = (num - base) / step;
        (steps - steps.round()).abs() > 1e-9
    }
}

fn attr_number(value: &AttrValue) -> Option<f64> {
    match value {
        AttrValue::Number(num) => num.as_f64(),
        AttrValue::Text(text) => text.trim().parse().ok(),
        AttrValue::Bool(_) => None,
    }
}

fn format_number(num: f64) -> String {
    if num.fract() == 0.0 && num.abs() < 1e15 {
        format!("{}", num as i64)
    } else {
        num.to_string()
    }
}
