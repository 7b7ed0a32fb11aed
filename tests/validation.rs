use std::cell::RefCell;
use std::rc::Rc;

use formui::form::{FieldMeta, Handlers, Phase, ValidationProps};
use formui::host::HostControl;
use formui::prelude::*;
use formui::vdom::EventKind;

fn required_input(name: &str) -> InputField {
    InputField {
        name: Some(name.into()),
        required: true,
        minlength: Some(3),
        ..InputField::default()
    }
}

#[test]
fn pristine_field_waits_for_first_invalid_event() {
    let mut host = HostForm::new(Form::default());
    host.push_field(required_input("user")).expect("mount");

    host.input("user", "ab").expect("input");
    let field = host.field("user").expect("field");
    assert_eq!(field.state().phase(), Phase::Pristine);
    assert_eq!(field.displayed_error(), None);

    assert_eq!(host.submit(), SubmitOutcome::Rejected);
    let field = host.field("user").expect("field");
    assert_eq!(field.state().phase(), Phase::Validating);
    assert!(
        field
            .displayed_error()
            .is_some_and(|error| error.starts_with("Please lengthen this text to 3"))
    );

    host.input("user", "abcd").expect("input");
    assert_eq!(host.field("user").and_then(|field| field.displayed_error()), None);

    host.input("user", "").expect("input");
    assert_eq!(
        host.field("user").and_then(|field| field.displayed_error()),
        Some("Please fill out this field.")
    );
}

#[test]
fn validate_prop_starts_in_validating_phase() {
    let mut field = required_input("user");
    field.validation.validate = true;
    let mut host = HostForm::new(Form::default());
    host.push_field(field).expect("mount");

    host.input("user", "x").expect("input");
    let field = host.field("user").expect("field");
    assert_eq!(field.state().phase(), Phase::Validating);
    assert!(field.displayed_error().is_some());
}

#[test]
fn every_field_kind_shares_the_state_machine() {
    let mut host = HostForm::new(Form::default());
    host.push_field(TextField {
        name: Some("bio".into()),
        multiline: true,
        required: true,
        ..TextField::default()
    })
    .expect("text");
    host.push_field(CheckboxField {
        name: Some("terms".into()),
        required: true,
        ..CheckboxField::default()
    })
    .expect("checkbox");
    host.push_field(SelectField {
        name: Some("size".into()),
        placeholder: Some("Size".into()),
        options: vec!["s".into(), "m".into()],
        required: true,
        ..SelectField::default()
    })
    .expect("select");

    host.set_checked("terms", false).expect("uncheck");
    host.select("size", "").expect("placeholder");
    assert!(host.errors().is_empty());

    assert!(!host.submit().is_submitted());
    assert_eq!(host.errors().len(), 3);

    host.input("bio", "Hello").expect("bio");
    host.set_checked("terms", true).expect("check");
    host.select("size", "m").expect("select");
    assert!(host.errors().is_empty());
}

#[test]
fn user_handlers_see_the_control_before_state_updates() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&seen);
    let field = InputField {
        name: Some("code".into()),
        pattern: Some("[0-9]+".into()),
        validation: ValidationProps {
            validate: true,
            ..ValidationProps::default()
        },
        handlers: Handlers {
            on_input: Some(Rc::new(move |event: &mut Event<'_>| {
                log.borrow_mut().push(event.target().value().to_string());
            })),
            ..Handlers::default()
        },
        ..InputField::default()
    };
    let mut host = HostForm::new(Form::default());
    host.push_field(field).expect("mount");

    host.input("code", "12a").expect("input");
    assert_eq!(*seen.borrow(), ["12a"]);
    assert_eq!(
        host.field("code").and_then(|field| field.displayed_error()),
        Some("Please match the requested format.")
    );
}

#[test]
fn custom_validity_from_handlers_persists_until_cleared() {
    let field = InputField {
        field: FieldMeta {
            label: Some("Handle".into()),
            ..FieldMeta::default()
        },
        name: Some("handle".into()),
        handlers: Handlers {
            on_change: Some(Rc::new(|event: &mut Event<'_>| {
                let taken = event.target().value() == "admin";
                event
                    .target_mut()
                    .set_custom_validity(if taken { "Handle is taken." } else { "" });
            })),
            ..Handlers::default()
        },
        ..InputField::default()
    };
    let control = HostControl::from_element(
        &formui::form::control_element(&field.render(&Default::default()))
            .expect("control")
            .clone(),
    )
    .expect("host control");
    let mut instance = FieldInstance::mount(field, control);
    assert!(instance.control().id().is_some_and(|id| id.starts_with("field-")));

    instance.control_mut().set_value("admin");
    instance.dispatch(EventKind::Change);
    assert!(!instance.check_validity());
    assert_eq!(instance.displayed_error(), Some("Handle is taken."));

    instance.control_mut().set_value("someone");
    instance.dispatch(EventKind::Input);
    assert_eq!(instance.displayed_error(), Some("Handle is taken."));

    instance.dispatch(EventKind::Change);
    assert_eq!(instance.displayed_error(), None);
}
