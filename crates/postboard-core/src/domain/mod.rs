//! Domain entities - the core business objects.

mod post;
mod user;
pub mod validation;

pub use post::{NewPost, Post, PostCreate, PostUpdate, Reaction};
pub use user::{NewUser, User};
