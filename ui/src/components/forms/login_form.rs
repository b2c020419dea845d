use dioxus::prelude::*;

use crate::app::use_auth;
use crate::components::inputs::{EmailValidationFeedback, InputType, ValidatedInput};
use crate::console_info;
use crate::features::auth::{submit_login, LoginAction, LoginFormState};

#[derive(Props, PartialEq, Clone)]
pub struct LoginFormProps {
    pub on_success: EventHandler<()>,
}

#[component]
pub fn LoginForm(props: LoginFormProps) -> Element {
    let mut state = use_signal(LoginFormState::default);
    let auth = use_auth();

    let dispatch = EventHandler::new(move |action: LoginAction| {
        state.with_mut(|s| s.reduce_in_place(action));
    });

    rsx! {
        div {
            class: "auth-form login-form",

            h2 {
                class: "form-title",
                "Sign in"
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
                    "Email:"
                }
                ValidatedInput {
                    value: state().email,
                    placeholder: "Email".to_string(),
                    input_type: InputType::Email,
                    input_class: "input-field".to_string(),
                    disabled: state().is_submitting,
                    on_change: move |data: String| {
                        dispatch.call(LoginAction::SetEmail(data));
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
                        dispatch.call(LoginAction::SetPassword(data));
                    }
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
                        dispatch.call(LoginAction::SetSubmitting(true));
                        dispatch.call(LoginAction::SetError(None));

                        let backend = auth.backend();
                        let on_success = props.on_success;
                        spawn(async move {
                            let result = submit_login(
                                backend.as_ref(),
                                current.email.trim(),
                                &current.password,
                            )
                            .await;

                            // Password and transient UI state are cleared
                            // regardless of the outcome
                            dispatch.call(LoginAction::ClearTransient);

                            match result {
                                Ok(_) => {
                                    console_info!("[Login] Signed in, navigating home");
                                    on_success.call(());
                                }
                                Err(e) => {
                                    dispatch.call(LoginAction::SetError(Some(e.to_string())));
                                }
                            }
                        });
                    },
                    if state().is_submitting {
                        "Signing in..."
                    } else {
                        "Sign in"
                    }
                }
            }
        }
    }
}
