//! Post repository - the generic pipeline specialized with [`PostPolicy`].

use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait, QueryFilter, TransactionTrait,
};

use postboard_core::domain::{Post, PostCreate, PostUpdate, Reaction, User};
use postboard_core::error::DomainError;
use postboard_core::policy::PostPolicy;
use postboard_core::ports::Id;

use super::crud_repository::CrudRepository;
use super::{commit_or_rollback, storage_error};
use super::entity::post::{self, Entity as PostEntity};

/// Post storage with authorship and reaction rules.
///
/// Built once at startup and shared by every request.
pub struct PostRepository {
    crud: CrudRepository<PostEntity, PostPolicy>,
}

impl Default for PostRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl PostRepository {
    pub fn new() -> Self {
        Self {
            crud: CrudRepository::new(PostPolicy),
        }
    }

    /// The underlying generic pipeline.
    pub fn crud(&self) -> &CrudRepository<PostEntity, PostPolicy> {
        &self.crud
    }

    pub async fn list<C>(&self, db: &C) -> Result<Vec<Post>, DomainError>
    where
        C: ConnectionTrait,
    {
        self.crud.fetch_all(db, false).await
    }

    pub async fn get<C>(&self, db: &C, id: Id) -> Result<Post, DomainError>
    where
        C: ConnectionTrait,
    {
        self.crud.fetch_by_id_or_fail(db, id).await
    }

    pub async fn create<C>(
        &self,
        db: &C,
        payload: PostCreate,
        author: &User,
    ) -> Result<Post, DomainError>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        let post = self.crud.create(db, payload, Some(author), true).await?;
        tracing::info!(post_id = post.id, author_id = author.id, "Post created");
        Ok(post)
    }

    pub async fn update<C>(
        &self,
        db: &C,
        id: Id,
        payload: PostUpdate,
        actor: &User,
    ) -> Result<Post, DomainError>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        self.crud
            .update(db, id, payload, Some(actor), true)
            .await
            .inspect_err(|err| log_denied(err, id, actor))
    }

    pub async fn delete<C>(&self, db: &C, id: Id, actor: &User) -> Result<Post, DomainError>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        let post = self
            .crud
            .delete(db, id, Some(actor))
            .await
            .inspect_err(|err| log_denied(err, id, actor))?;
        tracing::info!(post_id = id, actor_id = actor.id, "Post deleted");
        Ok(post)
    }

    /// Posts written by `actor`, oldest first.
    pub async fn get_user_posts<C>(
        &self,
        db: &C,
        actor: &User,
        fail_if_missing: bool,
    ) -> Result<Vec<Post>, DomainError>
    where
        C: ConnectionTrait,
    {
        self.crud
            .fetch_all_by_attribute(db, post::Column::AuthorId, actor.id, fail_if_missing)
            .await
    }

    /// Record one like or dislike from `actor` on the post `post_id`.
    ///
    /// The counter is incremented in place, so concurrent reactions all count
    /// and no other column is rewritten.
    pub async fn toggle_like_dislike<C>(
        &self,
        db: &C,
        post_id: Id,
        actor: &User,
        reaction: Reaction,
    ) -> Result<Post, DomainError>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        let txn = db.begin().await.map_err(storage_error)?;
        let result = self.react_locked(&txn, post_id, actor, reaction).await;
        commit_or_rollback(txn, result).await
    }

    async fn react_locked(
        &self,
        txn: &DatabaseTransaction,
        post_id: Id,
        actor: &User,
        reaction: Reaction,
    ) -> Result<Post, DomainError> {
        let target: Post = self.crud.fetch_for_update(txn, post_id).await?.into();
        self.crud
            .hooks()
            .can_react(&target, actor)
            .inspect_err(|err| log_denied(err, post_id, actor))?;

        let counter = match reaction {
            Reaction::Like => post::Column::Likes,
            Reaction::Dislike => post::Column::Dislikes,
        };
        tracing::debug!(post_id, actor_id = actor.id, ?reaction, "Recording reaction");

        // A counter already at i32::MAX stays there.
        PostEntity::update_many()
            .col_expr(counter, Expr::col(counter).add(1))
            .filter(post::Column::Id.eq(post_id))
            .filter(counter.lt(i32::MAX))
            .exec(txn)
            .await
            .map_err(storage_error)?;

        self.crud.fetch_by_id_or_fail(txn, post_id).await
    }

    pub async fn like<C>(&self, db: &C, post_id: Id, actor: &User) -> Result<Post, DomainError>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        self.toggle_like_dislike(db, post_id, actor, Reaction::Like)
            .await
    }

    pub async fn dislike<C>(&self, db: &C, post_id: Id, actor: &User) -> Result<Post, DomainError>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        self.toggle_like_dislike(db, post_id, actor, Reaction::Dislike)
            .await
    }
}

fn log_denied(err: &DomainError, post_id: Id, actor: &User) {
    if let DomainError::Forbidden(reason) = err {
        tracing::warn!(post_id, actor_id = actor.id, %reason, "Post access denied");
    }
}
