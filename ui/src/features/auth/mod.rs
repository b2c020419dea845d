pub mod login;
pub mod register;
pub mod session;
pub mod types;
pub mod validation;

pub use login::{submit_login, LoginError};
pub use register::{check_username_available, submit_registration, RegisterError};
pub use session::{SessionAction, SessionState};
pub use types::*;
pub use validation::{validate_email, validate_password, validate_username};
