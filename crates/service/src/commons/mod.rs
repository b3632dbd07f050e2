//! Commons module: three-layer architecture (domain, repository, service).
//!
//! The HTTP layer talks only to [`CommonsService`]; storage is reached through
//! the repository traits so the service runs the same over SeaORM or in memory.

pub mod domain;
pub mod repository;
pub mod repo;
pub mod service;

pub use service::CommonsService;
