mod checkbox;
mod input;
mod select;
mod select_field;
mod text;
mod wrapper;

pub use checkbox::CheckboxField;
pub use input::InputField;
pub use select::{Select, SelectOption};
pub use select_field::SelectField;
pub use text::TextField;
pub use wrapper::{FIELD, Field};
