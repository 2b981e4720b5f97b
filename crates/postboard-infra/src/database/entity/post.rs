//! Post entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};

use postboard_core::domain::{NewPost, Post};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub created: DateTimeUtc,
    pub updated: Option<DateTimeUtc>,
    pub likes: i32,
    pub dislikes: i32,
    pub author_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Post.
impl From<Model> for Post {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            content: model.content,
            created: model.created,
            updated: model.updated,
            likes: model.likes,
            dislikes: model.dislikes,
            author_id: model.author_id,
        }
    }
}

/// Conversion from Domain Post to SeaORM ActiveModel.
impl From<Post> for ActiveModel {
    fn from(post: Post) -> Self {
        Self {
            id: Set(post.id),
            title: Set(post.title),
            content: Set(post.content),
            created: Set(post.created),
            updated: Set(post.updated),
            likes: Set(post.likes),
            dislikes: Set(post.dislikes),
            author_id: Set(post.author_id),
        }
    }
}

/// A fresh row: counters zeroed, creation stamped, never updated.
impl From<NewPost> for ActiveModel {
    fn from(fields: NewPost) -> Self {
        Self {
            id: NotSet,
            title: Set(fields.title),
            content: Set(fields.content),
            created: Set(chrono::Utc::now()),
            updated: Set(None),
            likes: Set(0),
            dislikes: Set(0),
            author_id: Set(fields.author_id),
        }
    }
}
