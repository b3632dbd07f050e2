//! Service layer for commons and memberships.
//! - Separates business logic from data access behind repository traits.
//! - Reuses entity definitions in the `models` crate.
//! - Owns identity: roles, the authenticated caller, and bearer token handling.

pub mod errors;
pub mod auth;
pub mod commons;
#[cfg(test)]
pub mod test_support;
