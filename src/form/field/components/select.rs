use std::borrow::Cow;
use std::fmt;

use crate::vdom::{AttrValue, Callback, ClassList, ClassName, Element, EventKind, VNode};

/// One entry of a select: a bare value doubles as its label.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectOption {
    Plain(AttrValue),
    Labeled { label: String, value: AttrValue },
}

impl SelectOption {
    pub fn labeled(label: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        SelectOption::Labeled {
            label: label.into(),
            value: value.into(),
        }
    }

    pub fn label(&self) -> Cow<'_, str> {
        match self {
            SelectOption::Plain(value) => value.to_text(),
            SelectOption::Labeled { label, .. } => Cow::Borrowed(label),
        }
    }

    pub fn value(&self) -> &AttrValue {
        match self {
            SelectOption::Plain(value) | SelectOption::Labeled { value, .. } => value,
        }
    }
}

impl From<AttrValue> for SelectOption {
    fn from(value: AttrValue) -> Self {
        SelectOption::Plain(value)
    }
}

impl From<&str> for SelectOption {
    fn from(value: &str) -> Self {
        SelectOption::Plain(value.into())
    }
}

impl From<String> for SelectOption {
    fn from(value: String) -> Self {
        SelectOption::Plain(value.into())
    }
}

impl From<i64> for SelectOption {
    fn from(value: i64) -> Self {
        SelectOption::Plain(value.into())
    }
}

/// Single-choice `<select>` primitive.
#[derive(Clone, Default)]
pub struct Select {
    pub id: Option<String>,
    pub name: Option<String>,
    pub class: Option<ClassName>,
    pub disabled: bool,
    pub required: bool,
    pub size: Option<u32>,
    pub options: Vec<SelectOption>,
    /// Options whose value equals this one, kind included, are selected.
    pub value: Option<AttrValue>,
    /// Label of an extra leading option with an empty value.
    pub placeholder: Option<String>,
    pub on_change: Option<Callback>,
    pub on_blur: Option<Callback>,
    pub on_focus: Option<Callback>,
}

impl Select {
    pub fn element(&self) -> Element {
        let class = ClassList::new().extend(self.class.as_ref());
        let placeholder = self
            .placeholder
            .as_ref()
            .map(|label| SelectOption::labeled(label.as_str(), ""));

        let placeholder_selected =
            self.value_is_unset() && !self.options.iter().any(|option| self.is_selected(option));
        let options: Vec<VNode> = placeholder
            .iter()
            .map(|option| self.option(option, placeholder_selected))
            .chain(
                self.options
                    .iter()
                    .map(|option| self.option(option, self.is_selected(option))),
            )
            .collect();

        Element::tag("select")
            .flag("disabled", self.disabled)
            .attr_opt("id", self.id.as_deref())
            .attr_opt("name", self.name.as_deref())
            .flag("required", self.required)
            .attr_opt("size", self.size)
            .attr_opt("class", (!class.is_empty()).then(|| class.to_string()))
            .on_opt(EventKind::Blur, self.on_blur.as_ref())
            .on_opt(EventKind::Change, self.on_change.as_ref())
            .on_opt(EventKind::Focus, self.on_focus.as_ref())
            .children(options)
    }

    pub fn render(&self) -> VNode {
        self.element().into()
    }

    fn value_is_unset(&self) -> bool {
        match &self.value {
            None => true,
            Some(value) => value.as_str() == Some(""),
        }
    }

    fn is_selected(&self, option: &SelectOption) -> bool {
        self.value.as_ref() == Some(option.value())
    }

    fn option(&self, option: &SelectOption, selected: bool) -> VNode {
        Element::tag("option")
            .attr("value", option.value().clone())
            .flag("selected", selected)
            .child(option.label().into_owned())
            .into()
    }
}

impl fmt::Debug for Select {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Select")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("options", &self.options)
            .field("value", &self.value)
            .field("placeholder", &self.placeholder)
            .finish_non_exhaustive()
    }
}
