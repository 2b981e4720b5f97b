//! Database access: connection setup, schema bootstrap and repositories.

mod connections;
mod crud_repository;
pub mod entity;
mod post_repository;
pub mod schema;
mod user_repository;

pub use connections::{DatabaseConfig, connect};
pub use crud_repository::CrudRepository;
pub use post_repository::PostRepository;
pub use user_repository::UserRepository;

use postboard_core::error::{DomainError, RepoError};
use sea_orm::{DatabaseTransaction, DbErr};

/// Lost or unobtainable connections are told apart from failing statements.
pub(crate) fn storage_error(err: DbErr) -> DomainError {
    match err {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => {
            DomainError::Storage(RepoError::Connection(err.to_string()))
        }
        other => DomainError::query(other),
    }
}

/// Commit on success; roll back before handing the error on.
pub(crate) async fn commit_or_rollback<T>(
    txn: DatabaseTransaction,
    result: Result<T, DomainError>,
) -> Result<T, DomainError> {
    match result {
        Ok(value) => {
            txn.commit().await.map_err(storage_error)?;
            Ok(value)
        }
        Err(err) => {
            txn.rollback().await.map_err(storage_error)?;
            Err(err)
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support;
