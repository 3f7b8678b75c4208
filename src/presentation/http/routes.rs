//! Route Configuration
//!
//! Configures all HTTP routes for the API.

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};

use super::handlers;
use crate::presentation::middleware::auth_middleware;
use crate::startup::AppState;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Public authentication endpoints
        .nest("/auth", auth_routes())
        // Entity endpoints
        .nest("/api", api_routes(state.clone()))
        // Health check endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/health/live", get(handlers::health::liveness))
        .route("/health/ready", get(handlers::health::readiness))
        .with_state(state)
}

/// Authentication routes (public)
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signin", post(handlers::auth::sign_in))
        .route("/signout", post(handlers::auth::sign_out))
}

/// API routes grouped per entity
fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/users", user_routes(state.clone()))
        .nest("/chats", chat_routes(state.clone()))
        .nest("/groups", group_routes(state))
}

/// User routes. Listing and signup are public; everything addressing a
/// specific user requires authentication.
fn user_routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/", get(handlers::user::list_users).post(handlers::user::sign_up));

    let protected = Router::new()
        .route(
            "/{user_id}",
            get(handlers::user::get_user)
                .put(handlers::user::update_user)
                .delete(handlers::user::delete_user),
        )
        .route(
            "/{user_id}/avatar",
            get(handlers::user::get_avatar).post(handlers::user::set_avatar),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    public.merge(protected)
}

/// Chat routes (protected)
fn chat_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::chat::send_to_user))
        .route("/{chat_id}", delete(handlers::chat::delete_chat))
        .route("/{chat_id}/messages", post(handlers::chat::send_to_chat))
        .route(
            "/{chat_id}/messages/{message_id}",
            delete(handlers::message::delete_chat_message),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Group routes (protected)
fn group_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::group::create_group))
        .route("/{group_id}", delete(handlers::group::delete_group))
        .route(
            "/{group_id}/members",
            post(handlers::group::add_members).delete(handlers::group::remove_members),
        )
        .route(
            "/{group_id}/admins",
            post(handlers::group::add_administrator)
                .delete(handlers::group::remove_administrator),
        )
        .route(
            "/{group_id}/messages",
            post(handlers::message::send_to_group),
        )
        .route(
            "/{group_id}/messages/{message_id}",
            delete(handlers::message::delete_group_message),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
