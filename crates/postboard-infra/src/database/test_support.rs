//! Shared fixtures for database tests.

use sea_orm::{ConnectOptions, Database, DbConn};

use postboard_core::domain::{NewUser, User};

use super::UserRepository;
use super::schema::create_tables;

/// Fresh in-memory SQLite database with the schema applied.
///
/// Pinned to a single connection: every pooled connection would otherwise
/// open its own empty database.
pub(crate) async fn setup_db() -> DbConn {
    let opts = ConnectOptions::new("sqlite::memory:")
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false)
        .to_owned();

    let db = Database::connect(opts).await.unwrap();
    create_tables(&db).await.unwrap();
    db
}

pub(crate) async fn seed_user(db: &DbConn, email: &str) -> User {
    UserRepository.create(db, NewUser::new(email)).await.unwrap()
}

pub(crate) async fn seed_admin(db: &DbConn, email: &str) -> User {
    UserRepository
        .create(db, NewUser::superuser(email))
        .await
        .unwrap()
}
