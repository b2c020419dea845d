//! Input components for form validation and display

use crate::features::auth::{
    ConfirmValidation, EmailValidation, PasswordValidation, UsernameValidation,
};
use dioxus::prelude::*;

#[derive(PartialEq, Clone, Debug)]
pub enum InputType {
    Text,
    Password,
    Email,
}

impl InputType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputType::Text => "text",
            InputType::Password => "password",
            InputType::Email => "email",
        }
    }
}

#[derive(Props, PartialEq, Clone)]
pub struct ValidatedInputProps {
    pub value: String,
    pub placeholder: String,
    pub input_type: InputType,
    pub input_class: String,
    pub disabled: bool,
    pub on_change: EventHandler<String>,
    #[props(default)]
    pub on_blur: Option<EventHandler<()>>,
}

#[component]
pub fn ValidatedInput(props: ValidatedInputProps) -> Element {
    rsx! {
        input {
            class: "{props.input_class}",
            r#type: "{props.input_type.as_str()}",
            value: "{props.value}",
            placeholder: "{props.placeholder}",
            disabled: props.disabled,
            oninput: move |event| props.on_change.call(event.value()),
            onblur: move |_| {
                if let Some(handler) = &props.on_blur {
                    handler.call(());
                }
            }
        }
    }
}

#[derive(Props, PartialEq, Clone)]
pub struct UsernameValidationFeedbackProps {
    pub validation: UsernameValidation,
}

#[component]
pub fn UsernameValidationFeedback(props: UsernameValidationFeedbackProps) -> Element {
    match props.validation {
        UsernameValidation::Checking => rsx! {
            div {
                class: "validation-feedback checking",
                "⏳ Checking availability..."
            }
        },
        UsernameValidation::Invalid => rsx! {
            div {
                class: "validation-feedback invalid",
                style: "color: #ef4444; background-color: #fef2f2; border: 1px solid #ef4444; padding: 8px; border-radius: 4px; margin-top: 4px;",
                "⚠ 6-20 characters: letters, digits, underscore"
            }
        },
        UsernameValidation::Taken => rsx! {
            div {
                class: "validation-feedback unavailable",
                style: "color: #ef4444; background-color: #fef2f2; border: 1px solid #ef4444; padding: 8px; border-radius: 4px; margin-top: 4px;",
                "⚠ This username is already taken"
            }
        },
        UsernameValidation::Available => rsx! {
            div {
                class: "validation-feedback available",
                style: "color: #10b981; background-color: #d1fae5; border: 1px solid #10b981; padding: 8px; border-radius: 4px; margin-top: 4px;",
                "✓ Username is available"
            }
        },
        UsernameValidation::None => rsx! { div {} },
    }
}

#[derive(Props, PartialEq, Clone)]
pub struct EmailValidationFeedbackProps {
    pub validation: EmailValidation,
}

#[component]
pub fn EmailValidationFeedback(props: EmailValidationFeedbackProps) -> Element {
    match props.validation {
        EmailValidation::Valid => rsx! {
            div {
                class: "validation-feedback valid",
                style: "color: #10b981; background-color: #d1fae5; border: 1px solid #10b981; padding: 8px; border-radius: 4px; margin-top: 4px;",
                "✓ Valid email address"
            }
        },
        EmailValidation::Invalid => rsx! {
            div {
                class: "validation-feedback invalid",
                style: "color: #ef4444; background-color: #fef2f2; border: 1px solid #ef4444; padding: 8px; border-radius: 4px; margin-top: 4px;",
                "⚠ Please enter a valid email address"
            }
        },
        _ => rsx! { div {} },
    }
}

#[derive(Props, PartialEq, Clone)]
pub struct PasswordValidationFeedbackProps {
    pub validation: PasswordValidation,
}

#[component]
pub fn PasswordValidationFeedback(props: PasswordValidationFeedbackProps) -> Element {
    match props.validation {
        PasswordValidation::Valid => rsx! {
            div {
                class: "validation-feedback valid",
                style: "color: #10b981; background-color: #d1fae5; border: 1px solid #10b981; padding: 8px; border-radius: 4px; margin-top: 4px;",
                "✓ Password looks good"
            }
        },
        PasswordValidation::Invalid => rsx! {
            div {
                class: "validation-feedback invalid",
                style: "color: #ef4444; background-color: #fef2f2; border: 1px solid #ef4444; padding: 8px; border-radius: 4px; margin-top: 4px;",
                "⚠ 8-30 characters with at least one letter"
            }
        },
        _ => rsx! { div {} },
    }
}

#[derive(Props, PartialEq, Clone)]
pub struct ConfirmValidationFeedbackProps {
    pub validation: ConfirmValidation,
}

#[component]
pub fn ConfirmValidationFeedback(props: ConfirmValidationFeedbackProps) -> Element {
    match props.validation {
        ConfirmValidation::Match => rsx! {
            div {
                class: "validation-feedback match",
                style: "color: #10b981; background-color: #d1fae5; border: 1px solid #10b981; padding: 8px; border-radius: 4px; margin-top: 4px;",
                "✓ Passwords match"
            }
        },
        ConfirmValidation::NoMatch => rsx! {
            div {
                class: "validation-feedback no-match",
                style: "color: #ef4444; background-color: #fef2f2; border: 1px solid #ef4444; padding: 8px; border-radius: 4px; margin-top: 4px;",
                "⚠ Passwords do not match"
            }
        },
        _ => rsx! { div {} },
    }
}
