//! HTTP routes under `/api`.

pub mod auth;
pub mod catalog;
pub mod middleware;
pub mod orders;

use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::state::AppState;

pub fn router(state: AppState, config: &ServerConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .max_age(config.cors_max_age);

    let api = Router::new()
        .route("/items", get(catalog::list_items))
        .route("/items/search", get(catalog::search_items))
        .route("/items/filter", get(catalog::filter_items))
        .route("/items/favorites", get(catalog::favorite_items))
        .route("/orders", post(orders::create_order))
        .route("/orders/:order_id", get(orders::order_detail))
        .route("/users/:user_id/orders", get(orders::orders_for_user))
        .route("/users/:user_id/favorites", get(orders::favorite_orders))
        .route("/users/:user_id/stats", get(orders::user_stats))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/verify", get(auth::verify));

    Router::new()
        .nest("/api", api)
        .layer(axum::middleware::from_fn(middleware::request_id))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
