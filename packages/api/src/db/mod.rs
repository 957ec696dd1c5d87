//! # Database module — PostgreSQL connection pool
//!
//! Server-only. [`get_pool`] lazily opens a pool of up to 5 connections using
//! `DATABASE_URL` (loaded through `dotenvy`) and hands out the same
//! `&'static PgPool` to every server function afterwards. Migrations live in
//! `packages/api/migrations` and are run by the web binary on startup.

#[cfg(feature = "server")]
mod pool;

#[cfg(feature = "server")]
pub use pool::get_pool;
