//! User lookups.

use std::collections::HashMap;

use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, SqlErr};

use postboard_core::domain::{NewUser, User};
use postboard_core::error::DomainError;
use postboard_core::ports::Id;

use super::entity::user::{self, Entity as UserEntity};
use super::storage_error;

pub const USER_ALREADY_EXISTS: &str = "A user with this email already exists.";

/// Read access to users, plus registration of new records.
#[derive(Debug, Clone, Copy, Default)]
pub struct UserRepository;

impl UserRepository {
    pub async fn find_by_id<C>(&self, db: &C, id: Id) -> Result<Option<User>, DomainError>
    where
        C: ConnectionTrait,
    {
        tracing::debug!(user_id = id, "Finding user by id");

        let result = UserEntity::find_by_id(id)
            .one(db)
            .await
            .map_err(storage_error)?;

        Ok(result.map(Into::into))
    }

    /// Users for a batch of ids, keyed by id. Unknown ids are skipped.
    pub async fn find_by_ids<C>(&self, db: &C, ids: &[Id]) -> Result<HashMap<Id, User>, DomainError>
    where
        C: ConnectionTrait,
    {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let result = UserEntity::find()
            .filter(user::Column::Id.is_in(ids.iter().copied()))
            .all(db)
            .await
            .map_err(storage_error)?;

        Ok(result
            .into_iter()
            .map(|model| (model.id, User::from(model)))
            .collect())
    }

    pub async fn create<C>(&self, db: &C, new_user: NewUser) -> Result<User, DomainError>
    where
        C: ConnectionTrait,
    {
        let model = user::ActiveModel::from(new_user)
            .insert(db)
            .await
            .map_err(|err| match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    DomainError::AlreadyExists(USER_ALREADY_EXISTS.to_string())
                }
                _ => storage_error(err),
            })?;

        tracing::info!(user_id = model.id, "User created");
        Ok(model.into())
    }
}
