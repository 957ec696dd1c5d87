//! Session keys written by the server functions.

/// Id of the logged-in user.
pub const SESSION_USER_ID_KEY: &str = "user_id";

/// Phone number whose OTP was verified in this session. Consumed by login.
pub const SESSION_VERIFIED_PHONE_KEY: &str = "verified_phone";

/// Set once a family-head Aadhaar OTP has been verified in this session.
///
/// Audit marker only: no server function grants access from it, and the
/// family-head role itself lives in client state.
pub const SESSION_FAMILY_HEAD_KEY: &str = "family_head_verified";
