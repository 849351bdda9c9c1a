//! Session establishment: password and device grants, token handling.

pub mod login;
pub mod token;

pub use login::Login;
pub use token::Token;
