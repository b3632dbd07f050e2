//! Identity: who is calling and what they may do.
//!
//! Tokens are issued by the login flow elsewhere; this service verifies them
//! and turns their claims into a [`CurrentUser`](domain::CurrentUser).

pub mod domain;
pub mod errors;
pub mod service;

pub use service::TokenService;
