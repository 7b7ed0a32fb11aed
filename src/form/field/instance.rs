use std::collections::VecDeque;

use uuid::Uuid;

use crate::domain::{Control, Event};
use crate::form::actions::FieldAction;
use crate::form::reducers::reduce;
use crate::form::state::{FieldState, displayed_error};
use crate::vdom::{EventKind, Listener, VNode};

use super::{FieldComponent, control_element};

/// Keeps the control's custom validity in step with the `error` prop.
///
/// Only messages installed from the prop are ever cleared; a custom validity
/// set by application code stays until that code clears it.
#[derive(Debug, Clone, Default)]
pub struct CustomValiditySync {
    installed: Option<String>,
}

impl CustomValiditySync {
    pub fn sync(&mut self, control: &mut dyn Control, external: Option<&str>) {
        match external {
            Some(message) => {
                if control.custom_validity() != message {
                    control.set_custom_validity(message);
                }
                self.installed = Some(message.to_string());
            }
            None => {
                if let Some(previous) = self.installed.take()
                    && control.custom_validity() == previous
                {
                    control.set_custom_validity("");
                }
            }
        }
    }
}

/// A mounted field: props, state and the live control they drive.
#[derive(Debug)]
pub struct FieldInstance<F, C> {
    props: F,
    state: FieldState,
    control: C,
    sync: CustomValiditySync,
}

impl<F: FieldComponent, C: Control> FieldInstance<F, C> {
    /// Mounts `props` over `control`: autofocus and external error are
    /// applied once here, before the first post-render sync.
    pub fn mount(mut props: F, mut control: C) -> Self {
        assign_id(&mut props);
        let state = FieldState::new(props.validation().validate);
        if props.autofocus() {
            control.focus();
        }
        let mut sync = CustomValiditySync::default();
        sync.sync(&mut control, props.validation().external_error());
        let mut instance = Self {
            props,
            state,
            control,
            sync,
        };
        instance.after_render();
        instance
    }

    pub fn props(&self) -> &F {
        &self.props
    }

    pub fn state(&self) -> &FieldState {
        &self.state
    }

    pub fn control(&self) -> &C {
        &self.control
    }

    pub fn control_mut(&mut self) -> &mut C {
        &mut self.control
    }

    pub fn render(&self) -> VNode {
        self.props.render(&self.state)
    }

    pub fn displayed_error(&self) -> Option<&str> {
        displayed_error(self.props.validation().external_error(), &self.state)
    }

    /// Replaces the props, e.g. when an asynchronous check reports an error.
    pub fn set_props(&mut self, mut props: F) {
        if props.meta().id.is_none() {
            props.meta_mut().id = self.props.meta().id.clone();
        }
        self.props = props;
        self.after_render();
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.props.validation_mut().error = error;
        self.after_render();
    }

    /// Delivers `kind` to the control, then every event the platform fired
    /// while handling it.
    pub fn dispatch(&mut self, kind: EventKind) {
        self.run(VecDeque::from([kind]));
    }

    pub fn check_validity(&mut self) -> bool {
        let valid = self.control.check_validity();
        let fired = self.control.take_events();
        self.run(fired.into());
        valid
    }

    /// Post-render hook: patch the control and resync its custom validity.
    pub fn after_render(&mut self) {
        let node = self.render();
        if let Some(element) = control_element(&node) {
            self.control.patch(element);
        }
        self.sync
            .sync(&mut self.control, self.props.validation().external_error());
    }

    fn run(&mut self, mut queue: VecDeque<EventKind>) {
        if queue.is_empty() {
            return;
        }
        while let Some(kind) = queue.pop_front() {
            self.handle(kind);
            queue.extend(self.control.take_events());
        }
        self.after_render();
    }

    fn handle(&mut self, kind: EventKind) {
        let node = self.render();
        let listener = control_element(&node).and_then(|element| element.listener(kind).cloned());
        match listener {
            None => tracing::trace!(event = %kind, "no listener on control"),
            Some(Listener::Callback(callback)) => {
                callback(&mut Event::new(kind, &mut self.control));
            }
            Some(Listener::Managed) => {
                if let Some(callback) = self.props.handlers().for_event(kind).cloned() {
                    callback(&mut Event::new(kind, &mut self.control));
                }
                let Some(action) = FieldAction::from_event(kind) else {
                    return;
                };
                let validation = self.props.validation();
                let control = &self.control;
                let next = reduce(&self.state, action, validation.validate, || {
                    validation.message_for(control)
                });
                if next.phase() != self.state.phase() {
                    tracing::debug!(
                        field = self.props.name().unwrap_or_default(),
                        "field switched to eager validation"
                    );
                }
                self.state = next;
            }
        }
    }
}

fn assign_id<F: FieldComponent>(props: &mut F) {
    if props.meta().id.is_none() && props.wants_id() {
        props.meta_mut().id = Some(format!("field-{}", Uuid::new_v4().simple()));
    }
}
