#![deny(rust_2018_idioms)]

pub mod definition;
pub mod domain;
pub mod form;
pub mod host;
pub mod io;
pub mod markdown;
pub mod vdom;

pub use definition::{DefinitionError, FieldDefinition, FieldKind, FormDefinition};
pub use form::{
    CheckboxField, Field, FieldComponent, FieldInstance, Form, FormData, InputField, Select,
    SelectField, SelectOption, SubmitOutcome, TextField,
};
pub use host::{HostError, HostForm};

pub mod prelude {
    pub use super::domain::{Control, Event, ValidityFlag, ValidityState};
    pub use super::{
        CheckboxField, DefinitionError, Field, FieldComponent, FieldDefinition, FieldInstance,
        FieldKind, Form, FormData, FormDefinition, HostError, HostForm, InputField, Select,
        SelectField, SelectOption, SubmitOutcome, TextField,
    };
}
