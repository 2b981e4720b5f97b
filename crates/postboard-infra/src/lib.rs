//! # Postboard Infrastructure
//!
//! Concrete implementations of the ports defined in `postboard-core`:
//! SeaORM persistence behind the generic CRUD pipeline, and JWT tokens.
//!
//! ## Feature Flags
//!
//! - `auth` (default) - JWT token service

pub mod database;

#[cfg(feature = "auth")]
pub mod auth;

pub use database::{CrudRepository, DatabaseConfig, PostRepository, UserRepository};

#[cfg(feature = "auth")]
pub use auth::{JwtConfig, JwtTokenService};
