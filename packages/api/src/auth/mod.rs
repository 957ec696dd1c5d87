//! Authentication helpers for the credentialed login path.

#[cfg(feature = "server")]
mod password;
#[cfg(feature = "server")]
mod registration;
#[cfg(feature = "server")]
mod session;

#[cfg(feature = "server")]
pub use password::{hash_password, verify_password, PasswordError};
#[cfg(feature = "server")]
pub use registration::{Registration, RegistrationError};
#[cfg(feature = "server")]
pub use session::{SESSION_FAMILY_HEAD_KEY, SESSION_USER_ID_KEY, SESSION_VERIFIED_PHONE_KEY};
