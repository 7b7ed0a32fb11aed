/// Transient per-instance validation state of a field.
///
/// Values are immutable; [`super::reducers::reduce`] returns the next state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldState {
    error: Option<String>,
    validate: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Edits never recompute the displayed error.
    Pristine,
    /// Every edit recomputes the displayed error.
    Validating,
}

impl FieldState {
    pub fn new(validate: bool) -> Self {
        Self {
            error: None,
            validate,
        }
    }

    pub(crate) fn from_parts(error: Option<String>, validate: bool) -> Self {
        Self {
            error: error.filter(|message| !message.is_empty()),
            validate,
        }
    }

    pub fn with_error(self, error: impl Into<String>) -> Self {
        Self::from_parts(Some(error.into()), self.validate)
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_validating(&self) -> bool {
        self.validate
    }

    pub fn phase(&self) -> Phase {
        if self.validate {
            Phase::Validating
        } else {
            Phase::Pristine
        }
    }
}

/// Error shown to the user: a non-empty external error wins over the state.
pub fn displayed_error<'a>(external: Option<&'a str>, state: &'a FieldState) -> Option<&'a str> {
    external
        .filter(|message| !message.is_empty())
        .or_else(|| state.error())
}
