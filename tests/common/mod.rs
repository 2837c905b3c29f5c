#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
};
use tower::util::ServiceExt; // for `oneshot`

use local_library::domain::{AuthorInput, BookInput, GenreInput};
use local_library::infrastructure::AppState;
use local_library::views::TemplateRenderer;
use local_library::{db, server};

// In-memory catalog with the embedded templates
pub async fn setup_state() -> AppState {
    let db = db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB");
    let views = TemplateRenderer::embedded().expect("Failed to load templates");
    AppState::new(db, Arc::new(views))
}

pub async fn setup() -> (Router, AppState) {
    let state = setup_state().await;
    (server::build_router(state.clone()), state)
}

pub async fn get(app: &Router, uri: &str) -> Response {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.clone().oneshot(req).await.unwrap()
}

pub async fn post_form(app: &Router, uri: &str, body: &str) -> Response {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.clone().oneshot(req).await.unwrap()
}

pub async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Asserts a 302 and returns its Location
pub fn redirect_location(response: &Response) -> String {
    assert_eq!(response.status(), StatusCode::FOUND);
    response
        .headers()
        .get(header::LOCATION)
        .expect("redirect without Location")
        .to_str()
        .unwrap()
        .to_string()
}

pub async fn create_author(state: &AppState, first_name: &str, family_name: &str) -> String {
    state
        .author_repo
        .create(AuthorInput {
            first_name: first_name.to_string(),
            family_name: family_name.to_string(),
            ..Default::default()
        })
        .await
        .expect("Failed to create author")
        .id
}

pub async fn create_genre(state: &AppState, name: &str) -> String {
    state
        .genre_repo
        .create(GenreInput {
            name: name.to_string(),
        })
        .await
        .expect("Failed to create genre")
        .id
}

pub async fn create_book(state: &AppState, title: &str, author: &str, genre: Vec<String>) -> String {
    state
        .book_repo
        .create(BookInput {
            title: title.to_string(),
            author: author.to_string(),
            summary: format!("Summary of {}", title),
            isbn: "9780000000000".to_string(),
            genre,
        })
        .await
        .expect("Failed to create book")
        .id
}
