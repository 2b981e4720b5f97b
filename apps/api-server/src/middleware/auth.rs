//! Authentication extractors.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use futures::future::LocalBoxFuture;

use postboard_core::domain::User;
use postboard_core::ports::{AuthError, Id, TokenClaims};

use super::error::AppError;
use crate::state::AppState;

/// Verified token identity, not yet resolved against the store.
///
/// [`CurrentUser`] turns it into a stored, active user.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: Id,
    pub email: String,
}

impl From<TokenClaims> for Identity {
    fn from(claims: TokenClaims) -> Self {
        Self {
            user_id: claims.user_id,
            email: claims.email,
        }
    }
}

/// Validate the request's `Authorization: Bearer` token.
fn identify(req: &HttpRequest) -> Result<Identity, AppError> {
    let state = app_state(req)?;

    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingAuth)?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| AuthError::InvalidToken("Invalid authorization header".to_string()))?;

    // Parse "Bearer <token>"
    let token = auth_str
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::InvalidToken("Expected Bearer token".to_string()))?;

    Ok(state.tokens.validate_token(token)?.into())
}

fn app_state(req: &HttpRequest) -> Result<web::Data<AppState>, AppError> {
    req.app_data::<web::Data<AppState>>().cloned().ok_or_else(|| {
        tracing::error!("AppState not found in app data");
        AppError::Internal("Server configuration error".to_string())
    })
}

/// The active user behind the request's bearer token.
///
/// ```ignore
/// async fn protected_route(CurrentUser(user): CurrentUser) -> impl Responder {
///     format!("Hello, user {}!", user.id)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let resolved = identify(req).and_then(|identity| Ok((identity, app_state(req)?)));

        Box::pin(async move {
            let (identity, state) = resolved?;

            let user = state
                .users
                .find_by_id(&state.db, identity.user_id)
                .await?
                .filter(|user| user.is_active);

            match user {
                Some(user) => Ok(CurrentUser(user)),
                None => {
                    tracing::warn!(
                        user_id = identity.user_id,
                        email = %identity.email,
                        "Token for unknown or inactive user"
                    );
                    Err(AppError::Unauthorized(
                        "User not found or inactive.".to_string(),
                    ))
                }
            }
        })
    }
}
