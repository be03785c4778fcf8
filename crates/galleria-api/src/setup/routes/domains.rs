//! Domain route groups (images, calc).

use crate::constants::{API_PREFIX, UPLOAD_BODY_LIMIT_BYTES};
use crate::handlers;
use crate::state::AppState;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use std::convert::Infallible;
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;

pub fn image_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    let upload = post(handlers::images::upload_image)
        .layer::<_, Infallible>(RequestBodyLimitLayer::new(UPLOAD_BODY_LIMIT_BYTES))
        .layer::<_, Infallible>(DefaultBodyLimit::disable());

    Router::new()
        .route(
            &format!("{}/images", API_PREFIX),
            get(handlers::images::list_images).merge(upload),
        )
        .with_state(state)
}

pub fn calc_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/calc/evaluate", API_PREFIX),
            post(handlers::calc::evaluate_expression),
        )
        .with_state(state)
}
