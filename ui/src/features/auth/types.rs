// Form state for the auth pages - no dioxus imports needed here

use crate::features::auth::validation::{validate_email, validate_password, validate_username};

// Validation status enums

#[derive(Clone, PartialEq, Debug)]
pub enum EmailValidation {
    None,
    Valid,
    Invalid,
}

#[derive(Clone, PartialEq, Debug)]
pub enum UsernameValidation {
    None,
    Invalid,
    Checking,
    Available,
    Taken,
}

#[derive(Clone, PartialEq, Debug)]
pub enum PasswordValidation {
    None,
    Valid,
    Invalid,
}

#[derive(Clone, PartialEq, Debug)]
pub enum ConfirmValidation {
    None,
    Match,
    NoMatch,
}

// Action enum for registration form state mutations
#[derive(Clone, Debug)]
pub enum RegisterAction {
    SetUsername(String),
    SetEmail(String),
    SetPassword(String),
    SetPasswordConfirm(String),
    SetUsernameTaken(bool),
    SetCheckingUsername(bool),
    SetSubmitting(bool),
    SetError(Option<String>),
}

#[derive(Clone, Default)]
pub struct RegisterFormState {
    pub username: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
    pub username_taken: bool,
    pub is_checking_username: bool,
    pub is_submitting: bool,
    pub error: Option<String>,
}

impl RegisterFormState {
    pub fn reduce_in_place(&mut self, action: RegisterAction) {
        match action {
            RegisterAction::SetUsername(username) => {
                self.username = username;
                // A fresh username invalidates the previous availability check
                self.username_taken = false;
            }
            RegisterAction::SetEmail(email) => {
                self.email = email;
            }
            RegisterAction::SetPassword(password) => {
                self.password = password;
            }
            RegisterAction::SetPasswordConfirm(password) => {
                self.password_confirm = password;
            }
            RegisterAction::SetUsernameTaken(taken) => {
                self.username_taken = taken;
            }
            RegisterAction::SetCheckingUsername(checking) => {
                self.is_checking_username = checking;
            }
            RegisterAction::SetSubmitting(submitting) => {
                self.is_submitting = submitting;
            }
            RegisterAction::SetError(error) => {
                self.error = error;
            }
        }
    }

    pub fn email_validation(&self) -> EmailValidation {
        if self.email.is_empty() {
            EmailValidation::None
        } else if validate_email(&self.email) {
            EmailValidation::Valid
        } else {
            EmailValidation::Invalid
        }
    }

    pub fn username_validation(&self) -> UsernameValidation {
        if self.username.is_empty() {
            UsernameValidation::None
        } else if !validate_username(&self.username) {
            UsernameValidation::Invalid
        } else if self.is_checking_username {
            UsernameValidation::Checking
        } else if self.username_taken {
            UsernameValidation::Taken
        } else {
            UsernameValidation::Available
        }
    }

    pub fn password_validation(&self) -> PasswordValidation {
        if self.password.is_empty() {
            PasswordValidation::None
        } else if validate_password(&self.password) {
            PasswordValidation::Valid
        } else {
            PasswordValidation::Invalid
        }
    }

    pub fn confirm_validation(&self) -> ConfirmValidation {
        if self.password.is_empty() && self.password_confirm.is_empty() {
            ConfirmValidation::None
        } else if self.password == self.password_confirm && !self.password.is_empty() {
            ConfirmValidation::Match
        } else {
            ConfirmValidation::NoMatch
        }
    }

    /// Aggregate form validity. An in-flight availability check blocks
    /// submission until it resolves.
    pub fn is_valid(&self) -> bool {
        validate_email(&self.email)
            && validate_username(&self.username)
            && !self.username_taken
            && validate_password(&self.password)
            && self.confirm_validation() == ConfirmValidation::Match
            && !self.is_checking_username
    }
}

// Action enum for login form state mutations
#[derive(Clone, Debug)]
pub enum LoginAction {
    SetEmail(String),
    SetPassword(String),
    SetSubmitting(bool),
    SetError(Option<String>),
    /// Clear the password and transient UI state after a submit, regardless
    /// of the outcome
    ClearTransient,
}

#[derive(Clone, Default)]
pub struct LoginFormState {
    pub email: String,
    pub password: String,
    pub is_submitting: bool,
    pub error: Option<String>,
}

impl LoginFormState {
    pub fn reduce_in_place(&mut self, action: LoginAction) {
        match action {
            LoginAction::SetEmail(email) => {
                self.email = email;
            }
            LoginAction::SetPassword(password) => {
                self.password = password;
            }
            LoginAction::SetSubmitting(submitting) => {
                self.is_submitting = submitting;
            }
            LoginAction::SetError(error) => {
                self.error = error;
            }
            LoginAction::ClearTransient => {
                self.password.clear();
                self.is_submitting = false;
            }
        }
    }

    pub fn email_validation(&self) -> EmailValidation {
        if self.email.is_empty() {
            EmailValidation::None
        } else if validate_email(&self.email) {
            EmailValidation::Valid
        } else {
            EmailValidation::Invalid
        }
    }

    pub fn is_valid(&self) -> bool {
        validate_email(&self.email) && self.password.len() >= 8
    }
}
