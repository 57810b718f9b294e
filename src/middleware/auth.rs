//! JWT authentication middleware
//!
//! [`jwt_auth_middleware`] resolves who is making the request once and
//! stores it as a [`Requester`] in the request extensions.
//! [`require_authentication`] then guards the routes anonymous users may
//! not reach.

use axum::{
    extract::{Extension, Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use serde::Serialize;

use crate::{
    error::{Error, Result},
    models::users::User,
    queries,
    services::jwt::authenticate_jwt_token,
    state::AppState,
};

use secrecy::ExposeSecret;

/// Authenticated user extracted from JWT token
#[derive(Debug, Clone, Serialize)]
pub struct AuthenticatedUser {
    /// User's unique identifier
    pub id: i64,
    pub username: String,
}

impl From<User> for AuthenticatedUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
        }
    }
}

/// Who is making the request.
#[derive(Debug, Clone)]
pub enum Requester {
    Anonymous,
    Authenticated(AuthenticatedUser),
}

impl Requester {
    /// The requester's user id, `None` when anonymous
    pub fn user_id(&self) -> Option<i64> {
        self.authenticated().map(|user| user.id)
    }

    pub fn authenticated(&self) -> Option<&AuthenticatedUser> {
        match self {
            Requester::Anonymous => None,
            Requester::Authenticated(user) => Some(user),
        }
    }

    /// The requester's user id, or 401 when anonymous
    pub fn require_user_id(&self) -> Result<i64> {
        self.user_id().ok_or_else(|| {
            Error::Authentication("Authentication credentials were not provided.".to_string())
        })
    }
}

/// JWT authentication middleware
///
/// # Behavior
/// 1. No `Authorization` header: the request continues as
///    [`Requester::Anonymous`]
/// 2. Otherwise the header must carry `Bearer <access token>` with a valid
///    signature, an unexpired lifetime and an existing subject
/// 3. Any failure in step 2 returns 401, on public routes too
/// 4. Adds [`Requester::Authenticated`] to request extensions
///
/// # Usage
/// Apply this middleware around the whole API router:
///
/// ```ignore
/// Router::new()
///     .nest("/api", api_routes)
///     .layer(middleware::from_fn_with_state(
///         state.clone(),
///         jwt_auth_middleware,
///     ))
/// ```
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response> {
    let Some(auth_header) = headers.get(AUTHORIZATION) else {
        request.extensions_mut().insert(Requester::Anonymous);
        return Ok(next.run(request).await);
    };

    let auth_header = auth_header
        .to_str()
        .map_err(|_| Error::InvalidToken("Authorization header is not valid text".to_string()))?;

    let user_id = authenticate_jwt_token(auth_header, state.config.jwt.secret.expose_secret())?;

    // The connection goes back to the pool before the handler runs
    let user: AuthenticatedUser = {
        let mut conn = state.pool.acquire().await?;
        queries::users::get_user_by_id(&mut conn, user_id)
            .await?
            .ok_or_else(|| Error::InvalidToken("User not found".to_string()))?
            .into()
    };

    tracing::debug!(user_id = user.id, username = %user.username, "Request authenticated");

    request
        .extensions_mut()
        .insert(Requester::Authenticated(user));
    Ok(next.run(request).await)
}

/// Rejects anonymous requesters with 401
///
/// Must run inside [`jwt_auth_middleware`]. Attach with `route_layer()` to
/// the routes that need a logged-in user.
pub async fn require_authentication(
    Extension(requester): Extension<Requester>,
    request: Request,
    next: Next,
) -> Result<Response> {
    requester.require_user_id()?;
    Ok(next.run(request).await)
}
