//! Post endpoints.

use actix_web::{HttpResponse, web};

use postboard_core::domain::validation::validate_payload;
use postboard_core::domain::{Post, PostCreate, PostUpdate, User};
use postboard_core::ports::Id;
use postboard_shared::{AuthorResponse, PostResponse};

use crate::middleware::auth::CurrentUser;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /post/
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.list(&state.db).await?;
    Ok(HttpResponse::Ok().json(present_many(&state, posts).await?))
}

/// POST /post/
pub async fn create_post(
    state: web::Data<AppState>,
    CurrentUser(user): CurrentUser,
    body: web::Json<PostCreate>,
) -> AppResult<HttpResponse> {
    let payload = body.into_inner();
    validate_payload(&payload)?;

    let post = state.posts.create(&state.db, payload, &user).await?;
    Ok(HttpResponse::Ok().json(to_response(post, Some(&user))))
}

/// GET /post/{id}
pub async fn get_post(state: web::Data<AppState>, path: web::Path<Id>) -> AppResult<HttpResponse> {
    let post = state.posts.get(&state.db, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(present_one(&state, post).await?))
}

/// PUT /post/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    CurrentUser(user): CurrentUser,
    path: web::Path<Id>,
    body: web::Json<PostUpdate>,
) -> AppResult<HttpResponse> {
    let payload = body.into_inner();
    validate_payload(&payload)?;

    let post = state
        .posts
        .update(&state.db, path.into_inner(), payload, &user)
        .await?;
    Ok(HttpResponse::Ok().json(present_one(&state, post).await?))
}

/// DELETE /post/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    CurrentUser(user): CurrentUser,
    path: web::Path<Id>,
) -> AppResult<HttpResponse> {
    let post = state.posts.delete(&state.db, path.into_inner(), &user).await?;
    Ok(HttpResponse::Ok().json(present_one(&state, post).await?))
}

/// GET /post/like/{id}
pub async fn like_post(
    state: web::Data<AppState>,
    CurrentUser(user): CurrentUser,
    path: web::Path<Id>,
) -> AppResult<HttpResponse> {
    let post = state.posts.like(&state.db, path.into_inner(), &user).await?;
    Ok(HttpResponse::Ok().json(present_one(&state, post).await?))
}

/// GET /post/dislike/{id}
pub async fn dislike_post(
    state: web::Data<AppState>,
    CurrentUser(user): CurrentUser,
    path: web::Path<Id>,
) -> AppResult<HttpResponse> {
    let post = state.posts.dislike(&state.db, path.into_inner(), &user).await?;
    Ok(HttpResponse::Ok().json(present_one(&state, post).await?))
}

/// GET /post/my_posts/
pub async fn my_posts(
    state: web::Data<AppState>,
    CurrentUser(user): CurrentUser,
) -> AppResult<HttpResponse> {
    let posts = state
        .posts
        .get_user_posts(&state.db, &user, state.my_posts_strict)
        .await?;

    let body: Vec<PostResponse> = posts
        .into_iter()
        .map(|post| to_response(post, Some(&user)))
        .collect();
    Ok(HttpResponse::Ok().json(body))
}

async fn present_one(state: &AppState, post: Post) -> AppResult<PostResponse> {
    let author = match post.author_id {
        Some(id) => state.users.find_by_id(&state.db, id).await?,
        None => None,
    };
    Ok(to_response(post, author.as_ref()))
}

// One user lookup for the whole page.
async fn present_many(state: &AppState, posts: Vec<Post>) -> AppResult<Vec<PostResponse>> {
    let mut ids: Vec<Id> = posts.iter().filter_map(|post| post.author_id).collect();
    ids.sort_unstable();
    ids.dedup();

    let authors = state.users.find_by_ids(&state.db, &ids).await?;

    Ok(posts
        .into_iter()
        .map(|post| {
            let author = post.author_id.and_then(|id| authors.get(&id));
            to_response(post, author)
        })
        .collect())
}

fn to_response(post: Post, author: Option<&User>) -> PostResponse {
    PostResponse {
        id: post.id,
        title: post.title,
        content: post.content,
        created: post.created,
        updated: post.updated,
        likes: post.likes,
        dislikes: post.dislikes,
        author: author.map(|user| AuthorResponse {
            id: user.id,
            email: user.email.clone(),
            is_active: user.is_active,
            is_superuser: user.is_superuser,
            is_verified: user.is_verified,
        }),
    }
}
