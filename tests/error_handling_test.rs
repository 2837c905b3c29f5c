mod common;

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use common::*;
use local_library::domain::{DomainError, Genre, GenreInput, GenreRepository, GenreWithBooks};
use local_library::server;

/// Genre store whose every call fails
struct UnavailableGenres;

fn unavailable<T>() -> Result<T, DomainError> {
    Err(DomainError::Database("genre store unavailable".to_string()))
}

#[async_trait]
impl GenreRepository for UnavailableGenres {
    async fn find_all(&self) -> Result<Vec<Genre>, DomainError> {
        unavailable()
    }

    async fn find_all_with_books(&self) -> Result<Vec<GenreWithBooks>, DomainError> {
        unavailable()
    }

    async fn find_by_id(&self, _id: &str) -> Result<Option<Genre>, DomainError> {
        unavailable()
    }

    async fn find_by_name(&self, _name: &str) -> Result<Option<Genre>, DomainError> {
        unavailable()
    }

    async fn create(&self, _input: GenreInput) -> Result<Genre, DomainError> {
        unavailable()
    }

    async fn update(&self, _id: &str, _input: GenreInput) -> Result<Genre, DomainError> {
        unavailable()
    }

    async fn delete(&self, _id: &str) -> Result<(), DomainError> {
        unavailable()
    }

    async fn count(&self) -> Result<u64, DomainError> {
        unavailable()
    }
}

#[tokio::test]
async fn test_failed_parallel_fetch_renders_error_page() {
    let mut state = setup_state().await;
    let author = create_author(&state, "Isaac", "Asimov").await;
    let book = create_book(&state, "The Foundation", &author, vec![]).await;

    state.genre_repo = Arc::new(UnavailableGenres);
    let app = server::build_router(state);

    let response = get(&app, &format!("/catalog/book/{}/update", book)).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_text(response).await;
    assert!(body.contains("Internal Server Error"));
    assert!(!body.contains("<form"));
    // Details stay hidden unless enabled
    assert!(!body.contains("genre store unavailable"));
}

#[tokio::test]
async fn test_error_details_shown_when_enabled() {
    let mut state = setup_state().await.with_error_details(true);
    state.genre_repo = Arc::new(UnavailableGenres);
    let app = server::build_router(state);

    let response = get(&app, "/catalog/genres").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_text(response).await.contains("genre store unavailable"));
}

#[tokio::test]
async fn test_index_reports_count_failure() {
    let mut state = setup_state().await;
    state.genre_repo = Arc::new(UnavailableGenres);
    let app = server::build_router(state);

    let response = get(&app, "/catalog").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Could not load the catalog counts"));
    assert!(!body.contains("<strong>Books:</strong>"));
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let (app, _state) = setup().await;

    let response = get(&app, "/no/such/page").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("Not Found"));
}

#[tokio::test]
async fn test_root_redirects_to_catalog() {
    let (app, _state) = setup().await;

    let response = get(&app, "/").await;
    assert_eq!(redirect_location(&response), "/catalog");

    let response = get(&app, "/catalog/").await;
    assert_eq!(response.status(), StatusCode::OK);
}
