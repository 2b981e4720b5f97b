//! Post policy - the hooks that turn the generic CRUD pipeline into the post
//! repository.

use chrono::Utc;

use crate::domain::{NewPost, Post, PostUpdate, User};
use crate::error::DomainError;
use crate::ports::{CrudHooks, FieldMap};

pub const POST_NOT_FOUND: &str = "Post(s) not found.";
pub const POST_ALREADY_EXISTS: &str = "A post with this title already exists.";
pub const PERMISSION_DENIED: &str = "You do not have permission to access this post.";
pub const LIKE_DISLIKE_DENIED: &str = "You cannot like or dislike your own post.";

/// Authorship, update stamping and the author-or-admin rule for posts.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostPolicy;

impl PostPolicy {
    /// Authors may not react to their own posts; admins are exempt.
    pub fn can_react(&self, post: &Post, actor: &User) -> Result<(), DomainError> {
        if !actor.is_admin() && post.is_authored_by(actor.id) {
            return Err(DomainError::Forbidden(LIKE_DISLIKE_DENIED.to_string()));
        }
        Ok(())
    }
}

impl CrudHooks for PostPolicy {
    type Entity = Post;
    type CreateFields = NewPost;
    type UpdateFields = PostUpdate;

    const NOT_FOUND: &'static str = POST_NOT_FOUND;
    const ALREADY_EXISTS: &'static str = POST_ALREADY_EXISTS;

    fn has_permission(&self, post: &Post, actor: &User) -> Result<(), DomainError> {
        if actor.is_admin() || post.is_authored_by(actor.id) {
            return Ok(());
        }
        Err(DomainError::Forbidden(PERMISSION_DENIED.to_string()))
    }

    fn is_update_allowed(&self, _post: &Post, _fields: &PostUpdate) -> Result<(), DomainError> {
        Ok(())
    }

    fn is_delete_allowed(&self, _post: &Post) -> Result<(), DomainError> {
        Ok(())
    }

    fn shape_create_fields(
        &self,
        fields: &mut NewPost,
        actor: Option<&User>,
    ) -> Result<(), DomainError> {
        if let Some(actor) = actor {
            fields.author_id = Some(actor.id);
        }
        Ok(())
    }

    fn shape_update_fields(&self, mut post: Post, fields: PostUpdate) -> Result<Post, DomainError> {
        post.updated = Some(Utc::now());
        fields.apply_to(&mut post);
        Ok(post)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PostCreate;

    fn user(id: i32, is_superuser: bool) -> User {
        User {
            id,
            email: format!("user{id}@example.com"),
            is_active: true,
            is_superuser,
            is_verified: false,
        }
    }

    fn post_by(author_id: i32) -> Post {
        Post {
            id: 1,
            title: "A title here".to_string(),
            content: "Some content".to_string(),
            created: Utc::now(),
            updated: None,
            likes: 0,
            dislikes: 0,
            author_id: Some(author_id),
        }
    }

    fn is_forbidden(result: Result<(), DomainError>, message: &str) -> bool {
        matches!(result, Err(DomainError::Forbidden(m)) if m == message)
    }

    #[test]
    fn author_and_admin_have_permission() {
        let post = post_by(1);
        assert!(PostPolicy.has_permission(&post, &user(1, false)).is_ok());
        assert!(PostPolicy.has_permission(&post, &user(2, true)).is_ok());
    }

    #[test]
    fn stranger_is_denied() {
        let result = PostPolicy.has_permission(&post_by(1), &user(2, false));
        assert!(is_forbidden(result, PERMISSION_DENIED));
    }

    #[test]
    fn author_cannot_react_to_own_post() {
        let result = PostPolicy.can_react(&post_by(1), &user(1, false));
        assert!(is_forbidden(result, LIKE_DISLIKE_DENIED));
    }

    #[test]
    fn others_and_admins_may_react() {
        assert!(PostPolicy.can_react(&post_by(1), &user(2, false)).is_ok());
        assert!(PostPolicy.can_react(&post_by(1), &user(1, true)).is_ok());
    }

    #[test]
    fn create_injects_author_when_actor_present() {
        let payload = PostCreate {
            title: "A title here".to_string(),
            content: "Some content".to_string(),
        };

        let mut fields = NewPost::from(payload.clone());
        PostPolicy
            .shape_create_fields(&mut fields, Some(&user(5, false)))
            .unwrap();
        assert_eq!(fields.author_id, Some(5));

        let mut anonymous = NewPost::from(payload);
        PostPolicy.shape_create_fields(&mut anonymous, None).unwrap();
        assert_eq!(anonymous.author_id, None);
    }

    #[test]
    fn update_stamps_time_and_keeps_author() {
        let before = Utc::now();
        let post = PostPolicy
            .shape_update_fields(
                post_by(3),
                PostUpdate {
                    title: Some("Another title".to_string()),
                    content: None,
                },
            )
            .unwrap();

        assert!(post.updated.is_some_and(|t| t >= before));
        assert_eq!(post.title, "Another title");
        assert_eq!(post.content, "Some content");
        assert_eq!(post.author_id, Some(3));
    }

    #[test]
    fn update_and_delete_are_always_allowed() {
        let post = post_by(1);
        assert!(PostPolicy.is_update_allowed(&post, &PostUpdate::default()).is_ok());
        assert!(PostPolicy.is_delete_allowed(&post).is_ok());
    }
}
