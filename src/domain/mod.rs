mod control;
mod validity;

pub use control::{Control, Event};
pub use validity::{ValidityFlag, ValidityState};
