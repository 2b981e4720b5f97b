//! Application state - shared across all handlers.

use std::sync::Arc;

use postboard_core::ports::TokenService;
use postboard_infra::{PostRepository, UserRepository};
use sea_orm::DbConn;

/// Shared application state.
///
/// Repositories are built once here; every request borrows them together with
/// the pooled connection.
#[derive(Clone)]
pub struct AppState {
    pub db: DbConn,
    pub posts: Arc<PostRepository>,
    pub users: UserRepository,
    pub tokens: Arc<dyn TokenService>,
    pub my_posts_strict: bool,
}

impl AppState {
    pub fn new(db: DbConn, tokens: Arc<dyn TokenService>, my_posts_strict: bool) -> Self {
        tracing::info!(my_posts_strict, "Application state initialized");

        Self {
            db,
            posts: Arc::new(PostRepository::new()),
            users: UserRepository,
            tokens,
            my_posts_strict,
        }
    }
}
