//! Generic CRUD pipeline over any SeaORM entity.
//!
//! [`CrudRepository`] knows nothing about the domain it serves. Permission
//! checks, update/delete guards and field shaping are delegated to the
//! [`CrudHooks`] implementation it is built with.

use std::marker::PhantomData;

use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction,
    DbBackend, DbErr, EntityTrait, IdenStatic, IntoActiveModel, Iterable, ModelTrait,
    PrimaryKeyToColumn, QueryFilter, QueryOrder, QuerySelect, Select, SqlErr, TransactionTrait,
    TryIntoModel, Value,
};

use postboard_core::domain::User;
use postboard_core::error::DomainError;
use postboard_core::ports::{CrudHooks, FieldMap, Id};

use super::{commit_or_rollback, storage_error};

/// Generic repository: entity `E` persisted through SeaORM, policy `H`.
pub struct CrudRepository<E, H> {
    hooks: H,
    _entity: PhantomData<E>,
}

impl<E, H> CrudRepository<E, H>
where
    H: CrudHooks,
{
    pub fn new(hooks: H) -> Self {
        Self {
            hooks,
            _entity: PhantomData,
        }
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    fn not_found() -> DomainError {
        DomainError::NotFound(H::NOT_FOUND.to_string())
    }
}

impl<E, H> CrudRepository<E, H>
where
    E: EntityTrait,
    E::Model: Into<H::Entity> + IntoActiveModel<E::ActiveModel>,
    E::ActiveModel: ActiveModelBehavior
        + TryIntoModel<E::Model>
        + From<H::Entity>
        + From<H::CreateFields>
        + Send,
    H: CrudHooks,
{
    // === Read ===

    /// Every entity whose `column` equals `value`, ordered by identifier.
    pub async fn fetch_by_attribute<C, V>(
        &self,
        db: &C,
        column: E::Column,
        value: V,
    ) -> Result<Vec<H::Entity>, DomainError>
    where
        C: ConnectionTrait,
        V: Into<Value>,
    {
        self.fetch_all_by_attribute(db, column, value, false).await
    }

    /// First entity whose `column` equals `value`.
    ///
    /// With `fail_if_missing` an empty result is a `NotFound` error instead of
    /// `None`.
    pub async fn fetch_one_by_attribute<C, V>(
        &self,
        db: &C,
        column: E::Column,
        value: V,
        fail_if_missing: bool,
    ) -> Result<Option<H::Entity>, DomainError>
    where
        C: ConnectionTrait,
        V: Into<Value>,
    {
        tracing::debug!(
            table = %Self::table(),
            column = column.as_str(),
            "Fetching one by attribute"
        );

        let model = Self::ordered(E::find().filter(column.eq(value)))
            .one(db)
            .await
            .map_err(storage_error)?;

        match model {
            Some(model) => Ok(Some(model.into())),
            None if fail_if_missing => Err(Self::not_found()),
            None => Ok(None),
        }
    }

    /// Every entity whose `column` equals `value`, ordered by identifier.
    ///
    /// With `fail_if_missing` an empty result is a `NotFound` error.
    pub async fn fetch_all_by_attribute<C, V>(
        &self,
        db: &C,
        column: E::Column,
        value: V,
        fail_if_missing: bool,
    ) -> Result<Vec<H::Entity>, DomainError>
    where
        C: ConnectionTrait,
        V: Into<Value>,
    {
        tracing::debug!(
            table = %Self::table(),
            column = column.as_str(),
            "Fetching all by attribute"
        );

        let query = Self::ordered(E::find().filter(column.eq(value)));
        self.collect(db, query, fail_if_missing).await
    }

    pub async fn fetch_by_id<C>(&self, db: &C, id: Id) -> Result<Option<H::Entity>, DomainError>
    where
        C: ConnectionTrait,
    {
        self.fetch_one_by_attribute(db, Self::id_column()?, id, false)
            .await
    }

    pub async fn fetch_by_id_or_fail<C>(&self, db: &C, id: Id) -> Result<H::Entity, DomainError>
    where
        C: ConnectionTrait,
    {
        self.fetch_one_by_attribute(db, Self::id_column()?, id, true)
            .await?
            .ok_or_else(Self::not_found)
    }

    pub async fn fetch_all<C>(
        &self,
        db: &C,
        fail_if_missing: bool,
    ) -> Result<Vec<H::Entity>, DomainError>
    where
        C: ConnectionTrait,
    {
        tracing::debug!(table = %Self::table(), "Fetching all");

        self.collect(db, Self::ordered(E::find()), fail_if_missing)
            .await
    }

    // === Create, Update, Delete ===

    /// Insert an entity built from `payload`.
    ///
    /// `shape_create_fields` runs only when `apply_create_policy` is set.
    pub async fn create<C, P>(
        &self,
        db: &C,
        payload: P,
        actor: Option<&User>,
        apply_create_policy: bool,
    ) -> Result<H::Entity, DomainError>
    where
        C: ConnectionTrait + TransactionTrait,
        P: Into<H::CreateFields>,
    {
        let mut fields = payload.into();
        if apply_create_policy {
            self.hooks.shape_create_fields(&mut fields, actor)?;
        }

        tracing::debug!(table = %Self::table(), "Creating entity");
        self.save(db, E::ActiveModel::from(fields)).await
    }

    /// Apply a partial update to the entity `id`.
    ///
    /// The row is read and written in one transaction, locked where the
    /// backend supports row locks. Order: fetch, permission (only with an
    /// actor), update guard, shaping, write. Only columns whose value changed
    /// are written. Without `apply_update_policy` the present fields are
    /// assigned as they are and no derived field is touched.
    pub async fn update<C, P>(
        &self,
        db: &C,
        id: Id,
        payload: P,
        actor: Option<&User>,
        apply_update_policy: bool,
    ) -> Result<H::Entity, DomainError>
    where
        C: ConnectionTrait + TransactionTrait,
        P: Into<H::UpdateFields>,
    {
        let txn = db.begin().await.map_err(storage_error)?;
        let result = self
            .update_locked(&txn, id, payload.into(), actor, apply_update_policy)
            .await;
        commit_or_rollback(txn, result).await
    }

    async fn update_locked(
        &self,
        txn: &DatabaseTransaction,
        id: Id,
        fields: H::UpdateFields,
        actor: Option<&User>,
        apply_update_policy: bool,
    ) -> Result<H::Entity, DomainError> {
        let current = self.fetch_for_update(txn, id).await?;
        let mut entity: H::Entity = current.clone().into();
        if let Some(actor) = actor {
            self.hooks.has_permission(&entity, actor)?;
        }
        self.hooks.is_update_allowed(&entity, &fields)?;

        let entity = if apply_update_policy {
            self.hooks.shape_update_fields(entity, fields)?
        } else {
            fields.apply_to(&mut entity);
            entity
        };

        let changes = Self::changes(&current, E::ActiveModel::from(entity));
        if !changes.is_changed() {
            return Ok(current.into());
        }

        tracing::debug!(table = %Self::table(), id, "Updating entity");
        let updated = changes.update(txn).await.map_err(Self::write_error)?;
        Ok(updated.into())
    }

    /// Hard-delete the entity `id` and return its last state.
    pub async fn delete<C>(
        &self,
        db: &C,
        id: Id,
        actor: Option<&User>,
    ) -> Result<H::Entity, DomainError>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        let txn = db.begin().await.map_err(storage_error)?;
        let result = self.delete_locked(&txn, id, actor).await;
        commit_or_rollback(txn, result).await
    }

    async fn delete_locked(
        &self,
        txn: &DatabaseTransaction,
        id: Id,
        actor: Option<&User>,
    ) -> Result<H::Entity, DomainError> {
        let current = self.fetch_for_update(txn, id).await?;
        let entity: H::Entity = current.clone().into();
        if let Some(actor) = actor {
            self.hooks.has_permission(&entity, actor)?;
        }
        self.hooks.is_delete_allowed(&entity)?;

        tracing::debug!(table = %Self::table(), id, "Deleting entity");

        let result = current
            .into_active_model()
            .delete(txn)
            .await
            .map_err(storage_error)?;
        if result.rows_affected == 0 {
            return Err(Self::not_found());
        }

        Ok(entity)
    }

    /// Write `model` in its own transaction and return the stored row.
    ///
    /// A constraint violation rolls the transaction back before
    /// `AlreadyExists` is returned, so the session stays usable.
    pub async fn save<C>(&self, db: &C, model: E::ActiveModel) -> Result<H::Entity, DomainError>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        let txn = db.begin().await.map_err(storage_error)?;

        let result = match model.save(&txn).await {
            Ok(saved) => saved
                .try_into_model()
                .map(|model: E::Model| model.into())
                .map_err(storage_error),
            Err(err) => Err(Self::write_error(err)),
        };

        commit_or_rollback(txn, result).await
    }

    /// Read the row `id` for a write inside `txn`.
    ///
    /// Takes a row lock (`FOR UPDATE`) on backends that have one; SQLite
    /// serializes writers on its own.
    pub async fn fetch_for_update(
        &self,
        txn: &DatabaseTransaction,
        id: Id,
    ) -> Result<E::Model, DomainError> {
        let mut query = E::find().filter(Self::id_column()?.eq(id));
        if txn.get_database_backend() != DbBackend::Sqlite {
            query = query.lock_exclusive();
        }

        query
            .one(txn)
            .await
            .map_err(storage_error)?
            .ok_or_else(Self::not_found)
    }

    // `current` as an active model carrying only the columns `desired` changes.
    fn changes(current: &E::Model, desired: E::ActiveModel) -> E::ActiveModel {
        let mut changes = current.clone().into_active_model();
        for column in E::Column::iter() {
            if let Some(value) = desired.get(column).into_value()
                && value != current.get(column)
            {
                changes.set(column, value);
            }
        }
        changes
    }

    fn write_error(err: DbErr) -> DomainError {
        if is_integrity_violation(&err) {
            tracing::debug!(
                table = %Self::table(),
                error = %err,
                "Write rejected by constraint"
            );
            DomainError::AlreadyExists(H::ALREADY_EXISTS.to_string())
        } else {
            storage_error(err)
        }
    }

    async fn collect<C>(
        &self,
        db: &C,
        query: Select<E>,
        fail_if_missing: bool,
    ) -> Result<Vec<H::Entity>, DomainError>
    where
        C: ConnectionTrait,
    {
        let models = query.all(db).await.map_err(storage_error)?;
        if models.is_empty() && fail_if_missing {
            return Err(Self::not_found());
        }
        Ok(models.into_iter().map(Into::into).collect())
    }

    fn ordered(query: Select<E>) -> Select<E> {
        E::PrimaryKey::iter().fold(query, |query, key| query.order_by_asc(key.into_column()))
    }

    fn id_column() -> Result<E::Column, DomainError> {
        E::PrimaryKey::iter()
            .next()
            .map(|key| key.into_column())
            .ok_or_else(|| DomainError::query(format!("{} has no primary key", Self::table())))
    }

    fn table() -> String {
        E::default().table_name().to_owned()
    }
}

// Unique and foreign-key failures both mean the row cannot exist as given.
fn is_integrity_violation(err: &DbErr) -> bool {
    matches!(
        err.sql_err(),
        Some(SqlErr::UniqueConstraintViolation(_) | SqlErr::ForeignKeyConstraintViolation(_))
    )
}
