//! Catalog controllers and routes
//!
//! Every handler gathers what it needs from the repositories (independent
//! reads run concurrently and fail as a group), then either renders a view or
//! redirects. Validation and guard failures re-render; only missing records
//! and store or view failures become an [`AppError`].

pub mod author;
pub mod book;
pub mod book_instance;
pub mod error;
pub mod genre;

use axum::{
    Router,
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use serde_json::Value;

use crate::infrastructure::AppState;
pub use error::AppError;

/// Renders `template` with `context` as a 200 HTML response
pub(crate) fn render(state: &AppState, template: &str, context: Value) -> Result<Response, AppError> {
    let html = state.views.render(template, context)?;
    Ok(Html(html).into_response())
}

/// 302 Found to `location`
pub(crate) fn redirect(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

/// Id a delete form targets: its hidden id field, else the id in the path
pub(crate) fn submitted_id(form: &crate::forms::FormData, field: &str, path_id: &str) -> String {
    form.get(field)
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .unwrap_or(path_id)
        .to_string()
}

pub fn catalog_router() -> Router<AppState> {
    Router::new()
        // Home
        .route("/catalog", get(book::index))
        .route("/catalog/", get(book::index))
        // Books
        .route(
            "/catalog/book/create",
            get(book::create_book_form).post(book::create_book),
        )
        .route("/catalog/book/:id", get(book::get_book))
        .route(
            "/catalog/book/:id/delete",
            get(book::delete_book_form).post(book::delete_book),
        )
        .route(
            "/catalog/book/:id/update",
            get(book::update_book_form).post(book::update_book),
        )
        .route("/catalog/books", get(book::list_books))
        // Authors
        .route(
            "/catalog/author/create",
            get(author::create_author_form).post(author::create_author),
        )
        .route("/catalog/author/:id", get(author::get_author))
        .route(
            "/catalog/author/:id/delete",
            get(author::delete_author_form).post(author::delete_author),
        )
        .route(
            "/catalog/author/:id/update",
            get(author::update_author_form).post(author::update_author),
        )
        .route("/catalog/authors", get(author::list_authors))
        // Genres
        .route(
            "/catalog/genre/create",
            get(genre::create_genre_form).post(genre::create_genre),
        )
        .route("/catalog/genre/:id", get(genre::get_genre))
        .route(
            "/catalog/genre/:id/delete",
            get(genre::delete_genre_form).post(genre::delete_genre),
        )
        .route(
            "/catalog/genre/:id/update",
            get(genre::update_genre_form).post(genre::update_genre),
        )
        .route("/catalog/genres", get(genre::list_genres))
        // Book instances (copies)
        .route(
            "/catalog/bookinstance/create",
            get(book_instance::create_book_instance_form).post(book_instance::create_book_instance),
        )
        .route(
            "/catalog/bookinstance/:id",
            get(book_instance::get_book_instance),
        )
        .route(
            "/catalog/bookinstance/:id/delete",
            get(book_instance::delete_book_instance_form)
                .post(book_instance::delete_book_instance),
        )
        .route(
            "/catalog/bookinstance/:id/update",
            get(book_instance::update_book_instance_form)
                .post(book_instance::update_book_instance),
        )
        .route(
            "/catalog/bookinstances",
            get(book_instance::list_book_instances),
        )
}
