//! Request errors and the error page
//!
//! Handlers return [`AppError`]; its response carries an [`ErrorPage`]
//! extension that [`render_error_pages`] turns into the HTML error view.

use std::fmt;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Html, IntoResponse, Response},
};
use serde_json::json;

use crate::domain::DomainError;
use crate::infrastructure::AppState;
use crate::views::ViewError;

#[derive(Debug)]
pub enum AppError {
    /// A record the request needs does not exist
    NotFound(String),
    /// The record store could not complete an operation
    Store(DomainError),
    /// A view failed to render
    View(ViewError),
}

impl AppError {
    pub fn not_found(message: impl Into<String>) -> Self {
        AppError::NotFound(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Store(_) | AppError::View(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "{}", msg),
            AppError::Store(e) => write!(f, "{}", e),
            AppError::View(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for AppError {}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::NotFound => AppError::not_found("Not Found"),
            other => AppError::Store(other),
        }
    }
}

impl From<ViewError> for AppError {
    fn from(e: ViewError) -> Self {
        AppError::View(e)
    }
}

/// Error details left on a response for the error page middleware
#[derive(Debug, Clone)]
pub struct ErrorPage {
    pub message: String,
    pub detail: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let page = match &self {
            AppError::NotFound(message) => {
                tracing::debug!("Not found: {}", message);
                ErrorPage {
                    message: message.clone(),
                    detail: None,
                }
            }
            AppError::Store(e) => {
                tracing::error!("Record store failure: {}", e);
                ErrorPage {
                    message: "Internal Server Error".to_string(),
                    detail: Some(e.to_string()),
                }
            }
            AppError::View(e) => {
                tracing::error!("View rendering failure: {}", e);
                ErrorPage {
                    message: "Internal Server Error".to_string(),
                    detail: Some(e.to_string()),
                }
            }
        };

        let mut response = (status, page.message.clone()).into_response();
        response.extensions_mut().insert(page);
        response
    }
}

/// Fallback for unmatched routes
pub async fn not_found() -> AppError {
    AppError::not_found("Not Found")
}

/// Renders the `error` view for every response tagged with an [`ErrorPage`].
pub async fn render_error_pages(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;

    let Some(page) = response.extensions().get::<ErrorPage>().cloned() else {
        return response;
    };

    let status = response.status();
    let detail = page.detail.filter(|_| state.show_error_details);
    let context = json!({
        "title": page.message,
        "message": page.message,
        "status": status.as_u16(),
        "error": detail,
    });

    match state.views.render("error", context) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            tracing::error!("Failed to render error page: {}", e);
            response
        }
    }
}
