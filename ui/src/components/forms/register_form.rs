use dioxus::prelude::*;

use crate::app::use_auth;
use crate::components::inputs::{
    ConfirmValidationFeedback, EmailValidationFeedback, InputType, PasswordValidationFeedback,
    UsernameValidationFeedback, ValidatedInput,
};
use crate::console_warn;
use crate::features::auth::validation::validate_username;
use crate::features::auth::{
    check_username_available, submit_registration, RegisterAction, RegisterError,
    RegisterFormState,
};

#[derive(Props, PartialEq, Clone)]
pub struct RegisterFormProps {
    pub on_success: EventHandler<()>,
}

#[component]
pub fn RegisterForm(props: RegisterFormProps) -> Element {
    let mut state = use_signal(RegisterFormState::default);
    let auth = use_auth();

    let dispatch = EventHandler::new(move |action: RegisterAction| {
        state.with_mut(|s| s.reduce_in_place(action));
    });

    // Optimistic availability check when the username field loses focus
    let backend_for_check = auth.backend();
    let check_username = EventHandler::new(move |()| {
        let current = state();
        if current.username.is_empty() || !validate_username(&current.username) {
            return;
        }
        dispatch.call(RegisterAction::SetCheckingUsername(true));
        let backend = backend_for_check.clone();
        spawn(async move {
            match check_username_available(backend.as_ref(), &current.username).await {
                Ok(available) => {
                    dispatch.call(RegisterAction::SetUsernameTaken(!available));
                }
                Err(e) => {
                    console_warn!("[Register] Availability check failed: {}", e);
                }
            }
            dispatch.call(RegisterAction::SetCheckingUsername(false));
        });
    });

    rsx! {
        div {
            class: "auth-form register-form",

            h2 {
                class: "form-title",
                "Create your account"
            }

            if let Some(error) = state().error {
                p {
                    class: "form-error",
                    "{error}"
                }
            }

            div {
                class: "input-section",
                label {
                    class: "input-label",
                    "Username:"
                }
                ValidatedInput {
                    value: state().username,
                    placeholder: "Username".to_string(),
                    input_type: InputType::Text,
                    input_class: "input-field".to_string(),
                    disabled: state().is_submitting,
                    on_change: move |data: String| {
                        dispatch.call(RegisterAction::SetUsername(data));
                    },
                    on_blur: move |_: ()| check_username.call(())
                }
                UsernameValidationFeedback {
                    validation: state().username_validation()
                }
            }

            div {
                class: "input-section",
                label {
                    class: "input-label",
                    "Email:"
                }
                ValidatedInput {
                    value: state().email,
                    placeholder: "Email".to_string(),
                    input_type: InputType::Email,
                    input_class: "input-field".to_string(),
                    disabled: state().is_submitting,
                    on_change: move |data: String| {
                        dispatch.call(RegisterAction::SetEmail(data));
                    }
                }
                EmailValidationFeedback {
                    validation: state().email_validation()
                }
            }

            div {
                class: "input-section",
                label {
                    class: "input-label",
                    "Password:"
                }
                ValidatedInput {
                    value: state().password,
                    placeholder: "Password".to_string(),
                    input_type: InputType::Password,
                    input_class: "input-field".to_string(),
                    disabled: state().is_submitting,
                    on_change: move |data: String| {
                        dispatch.call(RegisterAction::SetPassword(data));
                    }
                }
                PasswordValidationFeedback {
                    validation: state().password_validation()
                }
            }

            div {
                class: "input-section",
                label {
                    class: "input-label",
                    "Confirm password:"
                }
                ValidatedInput {
                    value: state().password_confirm,
                    placeholder: "Repeat password".to_string(),
                    input_type: InputType::Password,
                    input_class: "input-field".to_string(),
                    disabled: state().is_submitting,
                    on_change: move |data: String| {
                        dispatch.call(RegisterAction::SetPasswordConfirm(data));
                    }
                }
                ConfirmValidationFeedback {
                    validation: state().confirm_validation()
                }
            }

            div {
                class: "button-section",
                button {
                    class: "auth-button",
                    disabled: !state().is_valid() || state().is_submitting,
                    onclick: move |_| {
                        let current = state();
                        if !current.is_valid() {
                            return;
                        }
                        dispatch.call(RegisterAction::SetSubmitting(true));
                        dispatch.call(RegisterAction::SetError(None));

                        let backend = auth.backend();
                        let on_success = props.on_success;
                        spawn(async move {
                            let result = submit_registration(
                                backend.as_ref(),
                                current.email.trim(),
                                current.username.trim(),
                                &current.password,
                            )
                            .await;

                            match result {
                                Ok(_) => {
                                    on_success.call(());
                                }
                                Err(e) => {
                                    if e == RegisterError::UsernameTaken {
                                        dispatch.call(RegisterAction::SetUsernameTaken(true));
                                    }
                                    dispatch.call(RegisterAction::SetError(Some(e.to_string())));
                                }
                            }
                            dispatch.call(RegisterAction::SetSubmitting(false));
                        });
                    },
                    if state().is_submitting {
                        "Creating account..."
                    } else {
                        "Sign up"
                    }
                }
            }
        }
    }
}
