use crate::{ContactState, Effect, Msg, RelayReadiness, SubmitError, STATUS_RESET_DELAY};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: ContactState, msg: Msg) -> (ContactState, Vec<Effect>) {
    let effects = match msg {
        Msg::FieldChanged { field, value } => {
            state.set_field(field, value);
            Vec::new()
        }
        Msg::CaptchaVerified(token) => {
            state.set_captcha_token(Some(token));
            Vec::new()
        }
        Msg::CaptchaExpired => {
            state.set_captcha_token(None);
            Vec::new()
        }
        Msg::SubmitClicked => submit(&mut state),
        Msg::DeliveryFinished {
            submission_id,
            result,
        } => {
            // A result for anything but the in-flight attempt is stale.
            if state.in_flight() != Some(submission_id) {
                return (state, Vec::new());
            }
            match result {
                Ok(()) => {
                    state.complete_success(submission_id);
                    vec![
                        Effect::ResetCaptcha,
                        Effect::ScheduleStatusReset {
                            submission_id,
                            after: STATUS_RESET_DELAY,
                        },
                    ]
                }
                Err(failure) => {
                    state.complete_failure(failure);
                    Vec::new()
                }
            }
        }
        Msg::StatusResetElapsed { submission_id } => {
            state.revert_success(submission_id);
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn submit(state: &mut ContactState) -> Vec<Effect> {
    // The disabled button is the only guard against double submits.
    if state.is_submitting() {
        return Vec::new();
    }
    if !state.validate_fields() {
        return Vec::new();
    }
    if state.readiness() == RelayReadiness::NotConfigured {
        state.fail(SubmitError::Configuration);
        return Vec::new();
    }
    match state.begin_submission() {
        Some((submission_id, message)) => vec![Effect::SendMessage {
            submission_id,
            message,
        }],
        None => {
            state.fail(SubmitError::Verification);
            Vec::new()
        }
    }
}
