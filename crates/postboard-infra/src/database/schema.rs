//! Table bootstrap from the entity definitions.

use sea_orm::{ConnectionTrait, DbErr, EntityTrait, Schema};

use super::entity::{post, user};

/// Create the `users` and `posts` tables when they do not exist yet.
///
/// Safe to run on every start. Referenced tables come first.
pub async fn create_tables<C>(db: &C) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    create_table(db, user::Entity).await?;
    create_table(db, post::Entity).await?;
    tracing::info!("Database schema ready");
    Ok(())
}

async fn create_table<C, E>(db: &C, entity: E) -> Result<(), DbErr>
where
    C: ConnectionTrait,
    E: EntityTrait,
{
    let backend = db.get_database_backend();
    let mut statement = Schema::new(backend).create_table_from_entity(entity);
    statement.if_not_exists();
    db.execute(backend.build(&statement)).await?;
    Ok(())
}
