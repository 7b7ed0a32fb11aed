use crate::markdown;
use crate::vdom::{ClassList, ClassName, Component, Element, VNode};

pub const FIELD: Component = Component::new("Field", render_node);

/// Layout shell around a control: label, description, controls, error and
/// hint, always in that order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Field {
    pub class: Option<ClassName>,
    /// Target of the label's `for`.
    pub id: Option<String>,
    pub label: Option<String>,
    pub description: Option<String>,
    pub error: Option<String>,
    pub hint: Option<String>,
    pub label_class: Option<String>,
    pub description_class: Option<String>,
    pub controls_class: Option<String>,
    pub error_class: Option<String>,
    pub hint_class: Option<String>,
}

const HOOKS: [&str; 5] = [
    "labelClass",
    "descriptionClass",
    "controlsClass",
    "errorClass",
    "hintClass",
];

impl Field {
    /// Component node carrying these props; it expands through [`FIELD`].
    pub fn node(&self, children: impl IntoIterator<Item = VNode>) -> VNode {
        let class = ClassList::new().extend(self.class.as_ref());
        let mut element = Element::component(FIELD)
            .attr_opt("class", (!class.is_empty()).then(|| class.to_string()))
            .attr_opt("id", self.id.as_deref())
            .attr_opt("label", self.label.as_deref())
            .attr_opt("description", self.description.as_deref())
            .attr_opt("error", self.error.as_deref())
            .attr_opt("hint", self.hint.as_deref());
        for (name, value) in HOOKS.iter().zip(self.hooks()) {
            element = element.attr_opt(name, value);
        }
        element.children(children).into()
    }

    pub fn from_element(element: &Element) -> Self {
        let text = |name: &str| element.text_attr(name).map(str::to_string);
        Self {
            class: text("class").map(ClassName::Name),
            id: text("id"),
            label: text("label"),
            description: text("description"),
            error: text("error"),
            hint: text("hint"),
            label_class: text(HOOKS[0]),
            description_class: text(HOOKS[1]),
            controls_class: text(HOOKS[2]),
            error_class: text(HOOKS[3]),
            hint_class: text(HOOKS[4]),
        }
    }

    pub fn has_error(&self) -> bool {
        self.error.as_deref().is_some_and(|error| !error.is_empty())
    }

    pub fn render(&self, children: Vec<VNode>) -> VNode {
        let class = ClassList::new()
            .with("FormField")
            .toggle("has-error", self.has_error())
            .extend(self.class.as_ref());

        let label = non_empty(&self.label).map(|label| {
            Element::tag("label")
                .attr("class", part_class("FormField-label", &self.label_class))
                .attr_opt("for", self.id.as_deref())
                .child(label)
        });
        let controls = Element::tag("div")
            .attr("class", part_class("FormField-controls", &self.controls_class))
            .children(children);

        Element::tag("div")
            .attr("class", class.to_string())
            .child(label)
            .child(markdown_part(
                "FormField-description",
                &self.description_class,
                &self.description,
            ))
            .child(controls)
            .child(markdown_part("FormField-error", &self.error_class, &self.error))
            .child(markdown_part("FormField-hint", &self.hint_class, &self.hint))
            .into()
    }

    fn hooks(&self) -> [Option<&str>; 5] {
        [
            self.label_class.as_deref(),
            self.description_class.as_deref(),
            self.controls_class.as_deref(),
            self.error_class.as_deref(),
            self.hint_class.as_deref(),
        ]
    }
}

fn render_node(element: &Element) -> VNode {
    Field::from_element(element).render(element.children.clone())
}

fn non_empty(text: &Option<String>) -> Option<&str> {
    text.as_deref().filter(|text| !text.is_empty())
}

fn part_class(base: &str, hook: &Option<String>) -> String {
    ClassList::new()
        .with(base)
        .with(hook.as_deref().unwrap_or_default())
        .to_string()
}

fn markdown_part(base: &str, hook: &Option<String>, text: &Option<String>) -> VNode {
    non_empty(text)
        .map(|text| {
            Element::tag("div")
                .attr("class", part_class(base, hook))
                .attr(crate::vdom::INNER_HTML, markdown::render(text))
        })
        .into()
}
