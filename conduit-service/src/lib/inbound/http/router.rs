use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::auth::gate::optional_identity;
use super::auth::gate::require_identity;
use super::auth::gate::AuthGate;
use super::handlers::articles;
use super::handlers::comments;
use super::handlers::profiles;
use super::handlers::tags;
use super::handlers::users;
use crate::domain::article::ports::ArticleServicePort;
use crate::domain::comment::ports::CommentServicePort;
use crate::domain::user::ports::UserRepository;
use crate::domain::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub article_service: Arc<dyn ArticleServicePort>,
    pub comment_service: Arc<dyn CommentServicePort>,
}

pub fn create_router<UR>(
    state: AppState,
    gate: Arc<AuthGate<UR>>,
    request_timeout: Duration,
) -> Router
where
    UR: UserRepository,
{
    let optional_routes = Router::new()
        .route("/api/users", post(users::register))
        .route("/api/users/login", post(users::login))
        .route("/api/profiles/:username", get(profiles::get_profile))
        .route("/api/articles/:slug", get(articles::get_article))
        .route("/api/articles/:slug/comments", get(comments::list_comments))
        .route("/api/tags", get(tags::list_tags))
        .route_layer(middleware::from_fn_with_state(
            Arc::clone(&gate),
            optional_identity::<UR>,
        ));

    let required_routes = Router::new()
        .route("/api/user", get(users::current_user).put(users::update_user))
        .route(
            "/api/profiles/:username/follow",
            post(profiles::follow).delete(profiles::unfollow),
        )
        .route("/api/articles", post(articles::create_article))
        .route(
            "/api/articles/:slug",
            put(articles::update_article).delete(articles::delete_article),
        )
        .route(
            "/api/articles/:slug/favorite",
            post(articles::favorite_article).delete(articles::unfavorite_article),
        )
        .route("/api/articles/:slug/comments", post(comments::add_comment))
        .route(
            "/api/articles/:slug/comments/:id",
            delete(comments::delete_comment),
        )
        .route_layer(middleware::from_fn_with_state(
            gate,
            require_identity::<UR>,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri().path(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                path = %request.uri().path(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(optional_routes)
        .merge(required_routes)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
