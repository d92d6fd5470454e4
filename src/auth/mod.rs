//! Authentication routes: register, login, forgot/reset password.

mod handlers;

pub use handlers::{forgot_password, login, register, reset_password};
