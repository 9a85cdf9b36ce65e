use crate::error::{ActionError, RenderError};
use crate::models::book::SearchField;
use crate::render::Screen;
use crate::services::controller::ViewController;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, warn};

pub type SharedController = Arc<Mutex<ViewController>>;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    #[serde(rename = "type")]
    pub field: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FilterParams {
    /// Present (as `on`) only while the checkbox is ticked.
    pub ebook: Option<String>,
}

fn page(controller: &ViewController, screen: Result<Screen, RenderError>) -> Response {
    match screen.and_then(|screen| controller.page(&screen)) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!("Failed to render page: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

fn action_page(controller: &ViewController, outcome: Result<Screen, ActionError>) -> Response {
    match outcome {
        Ok(screen) => page(controller, Ok(screen)),
        // Already logged by the controller; the page stays as it was.
        Err(ActionError::Validation(_)) => Redirect::to("/").into_response(),
        Err(ActionError::Render(e)) => page(controller, Err(e)),
    }
}

pub async fn index(State(controller): State<SharedController>) -> Response {
    let controller = controller.lock().await;
    page(&controller, controller.current_view())
}

/// The controller is unlocked while the catalog call is in flight, so other
/// actions keep working against the previous results.
pub async fn search(
    State(controller): State<SharedController>,
    Query(params): Query<SearchParams>,
) -> Response {
    let field = match params.field.as_deref().map(str::parse::<SearchField>) {
        None => SearchField::default(),
        Some(Ok(field)) => field,
        Some(Err(e)) => {
            warn!("{}", e);
            return Redirect::to("/").into_response();
        }
    };

    let pending = match controller.lock().await.begin_search(&params.q, field) {
        Ok(pending) => pending,
        Err(_) => return Redirect::to("/").into_response(),
    };

    let done = pending.run().await;

    let mut controller = controller.lock().await;
    let screen = controller.complete_search(done);
    page(&controller, screen)
}

/// Any segment that is not a list position (`abc`, `-1`) is treated like an
/// out-of-range one.
pub async fn select(
    State(controller): State<SharedController>,
    Path(segment): Path<String>,
) -> Response {
    let Ok(index) = segment.parse::<usize>() else {
        warn!("Not a book position: {}", segment);
        return Redirect::to("/").into_response();
    };

    let mut controller = controller.lock().await;
    let outcome = controller.select_record(index);
    action_page(&controller, outcome)
}

pub async fn back(State(controller): State<SharedController>) -> Response {
    let mut controller = controller.lock().await;
    let screen = controller.back();
    page(&controller, screen)
}

pub async fn filter(
    State(controller): State<SharedController>,
    Query(params): Query<FilterParams>,
) -> Response {
    let mut controller = controller.lock().await;
    let screen = controller.toggle_ebook_filter(params.ebook.is_some());
    page(&controller, screen)
}

pub async fn sort(State(controller): State<SharedController>) -> Response {
    let mut controller = controller.lock().await;
    let screen = controller.request_sort();
    page(&controller, screen)
}
