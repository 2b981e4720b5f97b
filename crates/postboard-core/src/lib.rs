//! # Postboard Core
//!
//! The domain layer of Postboard.
//! Entities, payload validation, the repository hook port and the post
//! policy live here. Nothing in this crate touches a database.

pub mod domain;
pub mod error;
pub mod policy;
pub mod ports;

pub use error::{DomainError, RepoError};
