//! Book search widget: searches a public book catalog, lists the results,
//! and lets the user open a book, show only e-books, or sort by rating.
//!
//! The pieces, leaf first:
//! - [`services::catalog`] talks to the catalog and maps its JSON into
//!   [`models::book::BookRecord`]s.
//! - [`models::store::BookStore`] holds the latest result set.
//! - [`render`] turns records into the list and detail views.
//! - [`services::controller::ViewController`] wires user actions together
//!   and owns which view is visible.
//! - [`routes`] exposes the controller over HTTP.

pub mod config;
pub mod error;
pub mod models;
pub mod render;
pub mod routes;
pub mod services;
pub mod utils;

use axum::{routing::get, Router};
use routes::{
    health::health_check,
    widget::{back, filter, index, search, select, sort, SharedController},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn app(controller: SharedController) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/search", get(search))
        .route("/books/:index", get(select))
        .route("/back", get(back))
        .route("/filter", get(filter))
        .route("/sort", get(sort))
        .route("/status", get(health_check))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(controller)
}
