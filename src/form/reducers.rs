use super::{actions::FieldAction, state::FieldState};

/// The field validation state machine.
///
/// `eager` is the `validate` prop; `message` computes the current validation
/// message and is only called when the error has to be recomputed.
pub fn reduce(
    state: &FieldState,
    action: FieldAction,
    eager: bool,
    message: impl FnOnce() -> String,
) -> FieldState {
    match action {
        FieldAction::Invalid => FieldState::from_parts(Some(message()), true),
        FieldAction::Input | FieldAction::Change if eager || state.is_validating() => {
            FieldState::from_parts(Some(message()), state.is_validating())
        }
        FieldAction::Input | FieldAction::Change => state.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::state::Phase;

    #[test]
    fn pristine_edits_keep_error_hidden() {
        let state = FieldState::new(false);
        let next = reduce(&state, FieldAction::Input, false, || {
            panic!("message must not be computed while pristine")
        });
        assert_eq!(next, state);
        assert_eq!(next.error(), None);
    }

    #[test]
    fn invalid_switches_to_validating_with_message() {
        let state = FieldState::new(false);
        let next = reduce(&state, FieldAction::Invalid, false, || "required".into());
        assert_eq!(next.phase(), Phase::Validating);
        assert_eq!(next.error(), Some("required"));
    }

    #[test]
    fn validating_edits_recompute_error() {
        let state = FieldState::new(false).with_error("x");
        let state = reduce(&state, FieldAction::Invalid, false, || "required".into());
        let cleared = reduce(&state, FieldAction::Change, false, String::new);
        assert_eq!(cleared.error(), None);
        assert_eq!(cleared.phase(), Phase::Validating);
    }

    #[test]
    fn eager_prop_recomputes_without_switching_phase() {
        let state = FieldState::new(false);
        let next = reduce(&state, FieldAction::Input, true, || "too short".into());
        assert_eq!(next.error(), Some("too short"));
        assert_eq!(next.phase(), Phase::Pristine);
    }

    #[test]
    fn validating_never_reverts() {
        let mut state = reduce(&FieldState::new(false), FieldAction::Invalid, false, || {
            "bad".into()
        });
        for action in [FieldAction::Input, FieldAction::Change, FieldAction::Invalid] {
            state = reduce(&state, action, false, String::new);
            assert_eq!(state.phase(), Phase::Validating);
        }
    }
}
