use formui::form::{FieldState, control_element};
use formui::prelude::*;
use formui::vdom::{AttrValue, Element, VNode};

fn wrapper(node: &VNode) -> Element {
    node.resolve().as_element().cloned().expect("wrapper element")
}

fn option_elements(select: &Select) -> Vec<Element> {
    select
        .element()
        .children
        .iter()
        .filter_map(VNode::as_element)
        .cloned()
        .collect()
}

#[test]
fn default_props_render_base_class_without_error() {
    let state = FieldState::default();
    let rendered = [
        ("InputField", InputField::default().render(&state)),
        ("TextField", TextField::default().render(&state)),
        ("CheckboxField", CheckboxField::default().render(&state)),
        ("SelectField", SelectField::default().render(&state)),
    ];
    for (class, node) in rendered {
        let root = wrapper(&node);
        assert!(root.has_class("FormField"), "{class}");
        assert!(root.has_class(class), "{class}");
        assert!(!root.has_class("has-error"), "{class}");
        assert!(control_element(&node).is_some(), "{class}");
    }
}

#[test]
fn error_modifier_follows_error_text() {
    let with_error = Field {
        error: Some("Broken".into()),
        ..Field::default()
    };
    assert!(wrapper(&with_error.node(Vec::new())).has_class("has-error"));

    for error in [None, Some(String::new())] {
        let field = Field {
            error,
            ..Field::default()
        };
        assert!(!wrapper(&field.node(Vec::new())).has_class("has-error"));
    }
}

#[test]
fn select_marks_only_matching_option() {
    let select = Select {
        options: vec!["a".into(), "b".into(), "c".into()],
        value: Some("b".into()),
        ..Select::default()
    };
    let selected: Vec<_> = option_elements(&select)
        .into_iter()
        .filter(|option| option.has_flag("selected"))
        .collect();
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].text_attr("value"), Some("b"));
}

#[test]
fn select_labeled_option_keeps_value_and_label() {
    let select = Select {
        options: vec![SelectOption::labeled("a", 1)],
        ..Select::default()
    };
    let options = option_elements(&select);
    assert_eq!(options.len(), 1);
    assert_eq!(options[0].get("value"), Some(&AttrValue::from(1)));
    assert_eq!(options[0].text(), "a");
}

#[test]
fn select_placeholder_prepends_one_empty_option() {
    let select = Select {
        options: vec!["x".into(), "y".into()],
        placeholder: Some("Choose".into()),
        ..Select::default()
    };
    let options = option_elements(&select);
    assert_eq!(options.len(), 3);
    assert_eq!(options[0].text_attr("value"), Some(""));
    assert_eq!(options[0].text(), "Choose");
    assert!(options[0].has_flag("selected"));
    assert!(options[1..].iter().all(|option| !option.has_flag("selected")));
}

#[test]
fn external_error_wins_over_state_error() {
    let state = FieldState::new(true).with_error("Please fill out this field.");
    let mut field = InputField::default();
    field.validation.error = Some("Already taken.".into());

    let node = field.render(&state).resolve();
    let error = node
        .find(&|el| el.has_class("FormField-error"))
        .expect("error slot");
    assert!(to_text(error).contains("Already taken."));
    assert!(!to_text(error).contains("Please fill out"));
}

fn to_text(element: &Element) -> String {
    element.text_attr("innerHTML").unwrap_or_default().to_string()
}
