mod actions;
mod container;
mod data;
mod field;
mod reducers;
mod state;

pub use actions::FieldAction;
pub use container::{Form, FormElement, SubmitHandler, SubmitOutcome};
pub use data::{FormData, FormEntry, Transform};
pub use field::{
    CheckboxField, CustomValiditySync, FIELD, Field, FieldComponent, FieldInstance, FieldMeta,
    Handlers, InputField, Select, SelectField, SelectOption, TextField, ValidationMessage,
    ValidationProps, control_element, is_control,
};
pub use reducers::reduce;
pub use state::{FieldState, Phase, displayed_error};
