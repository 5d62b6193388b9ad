//! Request extractors that guard the admin surface.
//!
//! - [`auth::RequireAdmin`] -- Requires a valid administrator session.

pub mod auth;
