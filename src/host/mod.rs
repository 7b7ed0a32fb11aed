//! A simulated host document: controls that implement HTML constraint
//! validation, and a form that mounts fields over them.

mod constraints;
mod control;
mod form;

use std::fmt;

pub use constraints::{Constraints, ControlKind, Snapshot, Step};
pub use control::HostControl;
pub use form::{HostForm, MountedField};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// No field or control with that name or id.
    UnknownField(String),
    /// A select has no option with that value.
    UnknownOption { name: String, value: String },
    /// The component rendered no `input`, `textarea` or `select`.
    NoControl(&'static str),
    UnsupportedElement(String),
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostError::UnknownField(name) => write!(f, "no field named '{name}'"),
            HostError::UnknownOption { name, value } => {
                write!(f, "select '{name}' has no option '{value}'")
            }
            HostError::NoControl(component) => {
                write!(f, "{component} rendered no form control")
            }
            HostError::UnsupportedElement(tag) => {
                write!(f, "<{tag}> is not a form control")
            }
        }
    }
}

impl std::error::Error for HostError {}
