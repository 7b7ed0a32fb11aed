//! Forms described as JSON, YAML or TOML documents.

mod build;
mod loader;
mod model;

pub use build::{DefinitionError, FieldProps};
pub use loader::{definition_schema, load_definition_str, load_definition_value};
pub use model::{FieldDefinition, FieldKind, FormDefinition, OptionDefinition};
