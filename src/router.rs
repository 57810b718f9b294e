use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::{
    handlers::{auth, health, movies, users, votes},
    middleware::{jwt_auth_middleware, require_authentication},
    state::AppState,
};

/// Builds the application router with every route mounted under `/api`.
///
/// The JWT middleware wraps all routes and resolves the requester; routes
/// that need a logged-in user add [`require_authentication`] on top.
pub fn build_router(state: AppState) -> Router {
    let vote_routes = Router::new()
        .route(
            "/movies/{movie_id}/votes",
            get(votes::list_votes)
                .post(votes::create_vote)
                .put(votes::update_vote)
                .patch(votes::partial_update_vote)
                .delete(votes::delete_vote),
        )
        .route_layer(middleware::from_fn(require_authentication));

    let api_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/token", post(auth::obtain_token))
        .route("/token/refresh", post(auth::refresh_token))
        .route("/users", get(users::list_users).post(users::register))
        .route("/users/{user_id}", get(users::get_user))
        .route(
            "/movies",
            get(movies::list_movies).merge(
                post(movies::create_movie)
                    .route_layer(middleware::from_fn(require_authentication)),
            ),
        )
        .merge(vote_routes);

    Router::new()
        .nest("/api", api_routes)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
