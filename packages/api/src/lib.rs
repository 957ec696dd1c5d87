//! # API crate — server functions for the ValueKare EMR login
//!
//! Every public `async fn` here is a Dioxus server function, annotated with
//! `#[get(...)]` or `#[post(...)]` and compiled twice: once with the server logic
//! (behind `#[cfg(feature = "server")]`) and once as a thin client stub that
//! forwards the call over HTTP. Arguments travel as a JSON object keyed by
//! argument name, so `send_otp(phone)` posts `{ "phone": ... }`.
//!
//! ## Modules
//!
//! | Module | Feature gate | Purpose |
//! |--------|-------------|---------|
//! | [`auth`] | `server` | Argon2 password verification and session keys |
//! | [`db`] | `server` | PostgreSQL connection pool (lazy `OnceCell` singleton) |
//! | [`models`] | — | `User` row and its client-safe projection `UserInfo` |
//! | [`otp`] | `server` | In-memory one-time code issuer and delivery |
//!
//! ## Server functions exposed here
//!
//! - **Phone OTP**: `send_otp` (`POST /api/send-otp`), `verify_otp` (`POST /api/verify-otp`)
//! - **Aadhaar OTP**: `send_aadhaar_otp` (`POST /api/aadhaar/send-otp`),
//!   `verify_aadhaar_otp` (`POST /api/aadhaar/verify-otp`)
//! - **Accounts**: `register` (new accounts are patients)
//! - **Session**: `login`, `get_current_user`, `logout`
//!
//! A successful phone verification is remembered in the session, and `login`
//! refuses any phone number that was not verified there.

use dioxus::prelude::*;

pub mod auth;
pub mod db;
pub mod models;
#[cfg(feature = "server")]
pub mod otp;

pub use flow::{OtpVerification, Role};
pub use models::UserInfo;

/// Issue a one-time code for a phone number.
#[cfg(feature = "server")]
#[post("/api/send-otp")]
pub async fn send_otp(phone: String) -> Result<(), ServerFnError> {
    let issuer = otp::get_issuer()
        .await
        .map_err(ServerFnError::new)?;

    let phone = phone.trim();
    let code = issuer
        .issue(otp::OtpChannel::Phone, phone)
        .map_err(|e| ServerFnError::new(e.to_string()))?;
    otp::deliver(issuer.config(), otp::OtpChannel::Phone, phone, &code);

    Ok(())
}

#[cfg(not(feature = "server"))]
#[post("/api/send-otp")]
pub async fn send_otp(phone: String) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Check a phone code. On success the phone is marked verified in the session.
#[cfg(feature = "server")]
#[post("/api/verify-otp", session: tower_sessions::Session)]
pub async fn verify_otp(phone: String, otp: String) -> Result<OtpVerification, ServerFnError> {
    let issuer = otp::get_issuer()
        .await
        .map_err(ServerFnError::new)?;

    let phone = phone.trim().to_string();
    if !issuer.verify(otp::OtpChannel::Phone, &phone, &otp) {
        tracing::info!(recipient = %otp::mask(&phone), "phone OTP rejected");
        return Ok(OtpVerification::rejected());
    }

    session
        .insert(auth::SESSION_VERIFIED_PHONE_KEY, phone)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(OtpVerification::accepted())
}

#[cfg(not(feature = "server"))]
#[post("/api/verify-otp")]
pub async fn verify_otp(phone: String, otp: String) -> Result<OtpVerification, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Issue a one-time code for an Aadhaar number.
#[cfg(feature = "server")]
#[post("/api/aadhaar/send-otp")]
pub async fn send_aadhaar_otp(aadhaar: String) -> Result<(), ServerFnError> {
    let issuer = otp::get_issuer()
        .await
        .map_err(ServerFnError::new)?;

    let aadhaar = aadhaar.trim();
    let code = issuer
        .issue(otp::OtpChannel::Aadhaar, aadhaar)
        .map_err(|e| ServerFnError::new(e.to_string()))?;
    otp::deliver(issuer.config(), otp::OtpChannel::Aadhaar, aadhaar, &code);

    Ok(())
}

#[cfg(not(feature = "server"))]
#[post("/api/aadhaar/send-otp")]
pub async fn send_aadhaar_otp(aadhaar: String) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Check an Aadhaar code. On success the session is flagged as family-head verified.
#[cfg(feature = "server")]
#[post("/api/aadhaar/verify-otp", session: tower_sessions::Session)]
pub async fn verify_aadhaar_otp(
    aadhaar: String,
    otp: String,
) -> Result<OtpVerification, ServerFnError> {
    let issuer = otp::get_issuer()
        .await
        .map_err(ServerFnError::new)?;

    let aadhaar = aadhaar.trim();
    if !issuer.verify(otp::OtpChannel::Aadhaar, aadhaar, &otp) {
        tracing::info!(recipient = %otp::mask(aadhaar), "aadhaar OTP rejected");
        return Ok(OtpVerification::rejected());
    }

    session
        .insert(auth::SESSION_FAMILY_HEAD_KEY, true)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;
    tracing::info!(recipient = %otp::mask(aadhaar), "family head verified");

    Ok(OtpVerification::accepted())
}

#[cfg(not(feature = "server"))]
#[post("/api/aadhaar/verify-otp")]
pub async fn verify_aadhaar_otp(
    aadhaar: String,
    otp: String,
) -> Result<OtpVerification, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Create a patient account.
///
/// Does not sign in: the first login still goes through the phone OTP.
#[cfg(feature = "server")]
#[post("/api/auth/register")]
pub async fn register(
    email: String,
    password: String,
    name: String,
    phone: String,
) -> Result<UserInfo, ServerFnError> {
    use crate::db::get_pool;

    let reg = auth::Registration::parse(&email, password, &name, &phone)
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let existing: Option<(i32,)> = sqlx::query_as("SELECT 1 FROM users WHERE email = $1")
        .bind(&reg.email)
        .fetch_optional(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    if existing.is_some() {
        return Err(ServerFnError::new("An account with this email already exists"));
    }

    let password_hash =
        auth::hash_password(&reg.password).map_err(|e| ServerFnError::new(e.to_string()))?;

    let user: models::User = sqlx::query_as(
        "INSERT INTO users (email, name, phone, role, password_hash) VALUES ($1, $2, $3, $4, $5) RETURNING *",
    )
    .bind(&reg.email)
    .bind(&reg.name)
    .bind(&reg.phone)
    .bind(Role::Patient.as_str())
    .bind(&password_hash)
    .fetch_one(pool)
    .await
    .map_err(|e| ServerFnError::new(e.to_string()))?;

    tracing::info!(user_id = %user.id, "account registered");
    Ok(user.to_info())
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/register")]
pub async fn register(
    email: String,
    password: String,
    name: String,
    phone: String,
) -> Result<UserInfo, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Log in with email, password and a phone number verified in this session.
#[cfg(feature = "server")]
#[post("/api/auth/login", session: tower_sessions::Session)]
pub async fn login(
    email: String,
    password: String,
    phone: String,
) -> Result<UserInfo, ServerFnError> {
    use crate::db::get_pool;

    let email = email.trim().to_lowercase();
    let phone = phone.trim().to_string();

    let verified_phone: Option<String> = session
        .get(auth::SESSION_VERIFIED_PHONE_KEY)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    if verified_phone.as_deref() != Some(phone.as_str()) {
        return Err(ServerFnError::new(
            "Please verify your phone number with the OTP before logging in",
        ));
    }

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let user: Option<models::User> = sqlx::query_as("SELECT * FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let Some(user) = user else {
        return Err(ServerFnError::new("Invalid email or password"));
    };

    let Some(ref hash) = user.password_hash else {
        return Err(ServerFnError::new("Invalid email or password"));
    };

    let valid =
        auth::verify_password(&password, hash).map_err(|e| ServerFnError::new(e.to_string()))?;

    if !valid || user.phone.as_deref() != Some(phone.as_str()) {
        return Err(ServerFnError::new("Invalid email or password"));
    }

    session
        .remove::<String>(auth::SESSION_VERIFIED_PHONE_KEY)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;
    session
        .insert(auth::SESSION_USER_ID_KEY, user.id.to_string())
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    tracing::info!(user_id = %user.id, "user logged in");
    Ok(user.to_info())
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/login")]
pub async fn login(
    email: String,
    password: String,
    phone: String,
) -> Result<UserInfo, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Get the current authenticated user from the session.
#[cfg(feature = "server")]
#[get("/api/auth/me", session: tower_sessions::Session)]
pub async fn get_current_user() -> Result<Option<UserInfo>, ServerFnError> {
    use crate::db::get_pool;

    let user_id: Option<String> = session
        .get(auth::SESSION_USER_ID_KEY)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let Some(user_id) = user_id else {
        return Ok(None);
    };

    let user_uuid =
        uuid::Uuid::parse_str(&user_id).map_err(|e| ServerFnError::new(e.to_string()))?;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let user: Option<models::User> = sqlx::query_as("SELECT * FROM users WHERE id = $1")
        .bind(user_uuid)
        .fetch_optional(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(user.map(|u| u.to_info()))
}

#[cfg(not(feature = "server"))]
#[get("/api/auth/me")]
pub async fn get_current_user() -> Result<Option<UserInfo>, ServerFnError> {
    Ok(None)
}

/// Log out the current user by clearing the session.
#[cfg(feature = "server")]
#[post("/api/auth/logout", session: tower_sessions::Session)]
pub async fn logout() -> Result<(), ServerFnError> {
    session
        .flush()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(())
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/logout")]
pub async fn logout() -> Result<(), ServerFnError> {
    Ok(())
}
