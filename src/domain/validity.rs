use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Constraint-violation flags reported by a host control.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidityState {
    pub value_missing: bool,
    pub type_mismatch: bool,
    pub pattern_mismatch: bool,
    pub too_long: bool,
    pub too_short: bool,
    pub range_underflow: bool,
    pub range_overflow: bool,
    pub step_mismatch: bool,
    pub bad_input: bool,
    pub custom_error: bool,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "camelCase")]
pub enum ValidityFlag {
    ValueMissing,
    TypeMismatch,
    PatternMismatch,
    TooLong,
    TooShort,
    RangeUnderflow,
    RangeOverflow,
    StepMismatch,
    BadInput,
    CustomError,
}

impl ValidityFlag {
    /// Order in which a single message is picked when several flags are set.
    pub const PRIORITY: [ValidityFlag; 10] = [
        ValidityFlag::CustomError,
        ValidityFlag::BadInput,
        ValidityFlag::ValueMissing,
        ValidityFlag::TypeMismatch,
        ValidityFlag::PatternMismatch,
        ValidityFlag::TooLong,
        ValidityFlag::TooShort,
        ValidityFlag::RangeUnderflow,
        ValidityFlag::RangeOverflow,
        ValidityFlag::StepMismatch,
    ];
}

impl ValidityState {
    pub fn valid(&self) -> bool {
        ValidityFlag::PRIORITY.iter().all(|flag| !self.has(*flag))
    }

    pub fn has(&self, flag: ValidityFlag) -> bool {
        match flag {
            ValidityFlag::ValueMissing => self.value_missing,
            ValidityFlag::TypeMismatch => self.type_mismatch,
            ValidityFlag::PatternMismatch => self.pattern_mismatch,
            ValidityFlag::TooLong => self.too_long,
            ValidityFlag::TooShort => self.too_short,
            ValidityFlag::RangeUnderflow => self.range_underflow,
            ValidityFlag::RangeOverflow => self.range_overflow,
            ValidityFlag::StepMismatch => self.step_mismatch,
            ValidityFlag::BadInput => self.bad_input,
            ValidityFlag::CustomError => self.custom_error,
        }
    }

    pub fn with(mut self, flag: ValidityFlag) -> Self {
        let slot = match flag {
            ValidityFlag::ValueMissing => &mut self.value_missing,
            ValidityFlag::TypeMismatch => &mut self.type_mismatch,
            ValidityFlag::PatternMismatch => &mut self.pattern_mismatch,
            ValidityFlag::TooLong => &mut self.too_long,
            ValidityFlag::TooShort => &mut self.too_short,
            ValidityFlag::RangeUnderflow => &mut self.range_underflow,
            ValidityFlag::RangeOverflow => &mut self.range_overflow,
            ValidityFlag::StepMismatch => &mut self.step_mismatch,
            ValidityFlag::BadInput => &mut self.bad_input,
            ValidityFlag::CustomError => &mut self.custom_error,
        };
        *slot = true;
        self
    }

    /// Set flags in message priority order.
    pub fn flags(&self) -> impl Iterator<Item = ValidityFlag> + '_ {
        ValidityFlag::PRIORITY
            .into_iter()
            .filter(|flag| self.has(*flag))
    }

    pub fn first_flag(&self) -> Option<ValidityFlag> {
        self.flags().next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_valid() {
        assert!(ValidityState::default().valid());
        assert_eq!(ValidityState::default().first_flag(), None);
    }

    #[test]
    fn custom_error_takes_message_priority() {
        let state = ValidityState::default()
            .with(ValidityFlag::ValueMissing)
            .with(ValidityFlag::CustomError);
        assert!(!state.valid());
        assert_eq!(state.first_flag(), Some(ValidityFlag::CustomError));
        assert_eq!(state.flags().count(), 2);
    }

    #[test]
    fn flags_use_camel_case_names() {
        let flag: ValidityFlag = serde_json::from_str("\"valueMissing\"").expect("flag");
        assert_eq!(flag, ValidityFlag::ValueMissing);
    }
}
