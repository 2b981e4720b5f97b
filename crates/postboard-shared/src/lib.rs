//! # Postboard Shared
//!
//! Types that cross the HTTP boundary. Kept free of domain and database
//! dependencies so a client can depend on it alone.

pub mod dto;
pub mod response;

pub use dto::{AuthorResponse, PostResponse};
pub use response::ErrorResponse;
