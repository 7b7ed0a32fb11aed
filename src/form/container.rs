use std::fmt;
use std::rc::Rc;

use serde_json::Value;

use crate::vdom::{ClassList, ClassName, Element, EventKind, Listener, VNode};

use super::data::{FormData, Transform};

/// Receives the serialized data and the form it came from.
pub type SubmitHandler = Rc<dyn Fn(&Value, &dyn FormElement)>;

/// The platform form behind a [`Form`].
pub trait FormElement {
    /// Checks every control, firing `invalid` on each one that fails.
    fn check_validity(&mut self) -> bool;

    fn form_data(&self) -> FormData;
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Submitted(Value),
    Rejected,
}

impl SubmitOutcome {
    pub fn data(&self) -> Option<&Value> {
        match self {
            SubmitOutcome::Submitted(data) => Some(data),
            SubmitOutcome::Rejected => None,
        }
    }

    pub fn is_submitted(&self) -> bool {
        matches!(self, SubmitOutcome::Submitted(_))
    }
}

/// Native form wrapper; browser validation UI is disabled and submission is
/// handled by [`Form::submit`].
#[derive(Clone, Default)]
pub struct Form {
    pub class: Option<ClassName>,
    pub autocomplete: Option<String>,
    pub transform: Option<Transform>,
    pub on_submit: Option<SubmitHandler>,
}

impl Form {
    pub fn render(&self, children: impl IntoIterator<Item = VNode>) -> VNode {
        let class = ClassList::new().with("Form").extend(self.class.as_ref());
        Element::tag("form")
            .attr_opt("autocomplete", self.autocomplete.as_deref())
            .attr("class", class.to_string())
            .flag("novalidate", true)
            .on(EventKind::Submit, Listener::Managed)
            .children(children)
            .into()
    }

    /// Submit handler. Never navigates; `on_submit` only runs for a valid form.
    pub fn submit(&self, form: &mut dyn FormElement) -> SubmitOutcome {
        if !form.check_validity() {
            tracing::debug!("form submission rejected by validation");
            return SubmitOutcome::Rejected;
        }
        let data = form.form_data().to_value(self.transform.as_ref());
        tracing::debug!(fields = data.as_object().map_or(0, |map| map.len()), "form submitted");
        if let Some(on_submit) = &self.on_submit {
            on_submit(&data, &*form);
        }
        SubmitOutcome::Submitted(data)
    }
}

impl fmt::Debug for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Form")
            .field("class", &self.class)
            .field("autocomplete", &self.autocomplete)
            .field("transform", &self.transform.is_some())
            .field("on_submit", &self.on_submit.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use serde_json::json;

    use super::*;
    use crate::form::data::FormEntry;

    struct Fixed {
        valid: bool,
        data: FormData,
        checks: usize,
    }

    impl FormElement for Fixed {
        fn check_validity(&mut self) -> bool {
            self.checks += 1;
            self.valid
        }

        fn form_data(&self) -> FormData {
            self.data.clone()
        }
    }

    fn fixed(valid: bool) -> Fixed {
        Fixed {
            valid,
            data: [("hello", "world")].into_iter().collect(),
            checks: 0,
        }
    }

    fn recording() -> (Form, Rc<RefCell<Vec<Value>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let form = Form {
            on_submit: Some(Rc::new(move |data: &Value, _: &dyn FormElement| {
                sink.borrow_mut().push(data.clone());
            })),
            ..Form::default()
        };
        (form, seen)
    }

    #[test]
    fn renders_novalidate_form() {
        let form = Form {
            class: Some("signup".into()),
            autocomplete: Some("off".into()),
            ..Form::default()
        };
        let node = form.render([Element::tag("input").into()]);
        let element = node.as_element().expect("form");
        assert!(element.is_tag("form"));
        assert!(element.has_flag("novalidate"));
        assert_eq!(element.text_attr("class"), Some("Form signup"));
        assert_eq!(element.text_attr("autocomplete"), Some("off"));
        assert!(element.listener(EventKind::Submit).is_some());
    }

    #[test]
    fn valid_form_reaches_on_submit() {
        let (form, seen) = recording();
        let mut element = fixed(true);
        let outcome = form.submit(&mut element);
        assert_eq!(outcome, SubmitOutcome::Submitted(json!({ "hello": "world" })));
        assert_eq!(*seen.borrow(), [json!({ "hello": "world" })]);
        assert_eq!(element.checks, 1);
    }

    #[test]
    fn invalid_form_is_suppressed() {
        let (form, seen) = recording();
        assert_eq!(form.submit(&mut fixed(false)), SubmitOutcome::Rejected);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn transform_shapes_submitted_data() {
        let (mut form, seen) = recording();
        form.transform = Some(Rc::new(|entry: FormEntry| {
            Some(FormEntry {
                name: entry.name.to_uppercase(),
                ..entry
            })
        }));
        form.submit(&mut fixed(true));
        assert_eq!(*seen.borrow(), [json!({ "HELLO": "world" })]);
    }

    #[test]
    fn missing_callback_is_a_no_op() {
        let outcome = Form::default().submit(&mut fixed(true));
        assert!(outcome.is_submitted());
    }
}
