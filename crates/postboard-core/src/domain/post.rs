use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::validation::is_text;
use crate::ports::{FieldMap, Id};

/// Post entity - a titled text owned by the user who wrote it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Id,
    pub title: String,
    pub content: String,
    pub created: DateTime<Utc>,
    pub updated: Option<DateTime<Utc>>,
    pub likes: i32,
    pub dislikes: i32,
    pub author_id: Option<Id>,
}

impl Post {
    pub fn is_authored_by(&self, user_id: Id) -> bool {
        self.author_id == Some(user_id)
    }
}

/// Like or dislike. Each one bumps its own counter, which never goes down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    Like,
    Dislike,
}

/// Request body for creating a post.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PostCreate {
    #[validate(
        length(max = 100, message = "Title must be at most 100 characters."),
        custom(function = is_text)
    )]
    pub title: String,

    #[validate(custom(function = is_text))]
    pub content: String,
}

/// Request body for editing a post. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct PostUpdate {
    #[validate(
        length(max = 100, message = "Title must be at most 100 characters."),
        custom(function = is_text)
    )]
    pub title: Option<String>,

    #[validate(custom(function = is_text))]
    pub content: Option<String>,
}

impl FieldMap<Post> for PostUpdate {
    fn apply_to(self, post: &mut Post) {
        if let Some(title) = self.title {
            post.title = title;
        }
        if let Some(content) = self.content {
            post.content = content;
        }
    }
}

/// Field map used to insert a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub author_id: Option<Id>,
}

impl From<PostCreate> for NewPost {
    fn from(payload: PostCreate) -> Self {
        Self {
            title: payload.title,
            content: payload.content,
            author_id: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post() -> Post {
        Post {
            id: 1,
            title: "A title here".to_string(),
            content: "Some content".to_string(),
            created: Utc::now(),
            updated: None,
            likes: 0,
            dislikes: 0,
            author_id: Some(7),
        }
    }

    #[test]
    fn update_applies_present_fields_only() {
        let mut post = post();
        PostUpdate {
            title: None,
            content: Some("new content".to_string()),
        }
        .apply_to(&mut post);

        assert_eq!(post.title, "A title here");
        assert_eq!(post.content, "new content");
        assert_eq!(post.author_id, Some(7));
    }

    #[test]
    fn new_post_starts_without_author() {
        let fields = NewPost::from(PostCreate {
            title: "A title here".to_string(),
            content: "Some content".to_string(),
        });
        assert_eq!(fields.author_id, None);
    }
}
