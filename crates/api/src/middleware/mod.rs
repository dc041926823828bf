//! Request-gating middleware.
//!
//! - [`auth::require_bearer`] -- requires a verified bearer token on the
//!   wrapped route.

pub mod auth;
