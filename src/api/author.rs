//! Author controller

use axum::{
    Form,
    extract::{Path, State},
    response::Response,
};
use serde_json::json;

use super::{AppError, redirect, render, submitted_id};
use crate::domain::DomainError;
use crate::forms::{FormData, parse_author};
use crate::infrastructure::AppState;

const AUTHOR_LIST_URL: &str = "/catalog/authors";

// List all authors by family name
pub async fn list_authors(State(state): State<AppState>) -> Result<Response, AppError> {
    let authors = state.author_repo.find_all().await?;
    tracing::debug!("Listing {} authors", authors.len());

    render(
        &state,
        "author_list",
        json!({"title": "Author List", "author_list": authors}),
    )
}

// Get a single author with their books
pub async fn get_author(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let (author, author_books) = tokio::try_join!(
        state.author_repo.find_by_id(&id),
        state.book_repo.find_by_author(&id),
    )?;
    let author = author.ok_or_else(|| AppError::not_found("Author not found"))?;

    render(
        &state,
        "author_detail",
        json!({
            "title": "Author Detail",
            "author": author,
            "author_books": author_books
        }),
    )
}

pub async fn create_author_form(State(state): State<AppState>) -> Result<Response, AppError> {
    render(&state, "author_form", json!({"title": "Create Author"}))
}

pub async fn create_author(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let form = FormData::from(pairs);

    match parse_author(&form).into_result() {
        Ok(input) => {
            let author = state.author_repo.create(input).await?;
            tracing::info!("Created author {} ({})", author.id, author.name());
            Ok(redirect(&author.url()))
        }
        Err((input, errors)) => render(
            &state,
            "author_form",
            json!({"title": "Create Author", "author": input, "errors": errors}),
        ),
    }
}

pub async fn delete_author_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let (author, author_books) = tokio::try_join!(
        state.author_repo.find_by_id(&id),
        state.book_repo.find_by_author(&id),
    )?;
    let Some(author) = author else {
        return Ok(redirect(AUTHOR_LIST_URL));
    };

    render(
        &state,
        "author_delete",
        json!({
            "title": "Delete Author",
            "author": author,
            "author_books": author_books
        }),
    )
}

/// Deletes an author unless books still reference them.
pub async fn delete_author(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let id = submitted_id(&FormData::from(pairs), "authorid", &id);

    let (author, author_books) = tokio::try_join!(
        state.author_repo.find_by_id(&id),
        state.book_repo.find_by_author(&id),
    )?;

    if !author_books.is_empty() {
        tracing::warn!(
            "Refusing to delete author {}: {} book(s) reference it",
            id,
            author_books.len()
        );
        return render(
            &state,
            "author_delete",
            json!({
                "title": "Delete Author",
                "author": author,
                "author_books": author_books
            }),
        );
    }

    match state.author_repo.delete(&id).await {
        // Already gone counts as deleted
        Ok(()) | Err(DomainError::NotFound) => {
            tracing::info!("Deleted author {}", id);
            Ok(redirect(AUTHOR_LIST_URL))
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn update_author_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let author = state
        .author_repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Author not found"))?;

    render(
        &state,
        "author_form",
        json!({"title": "Update Author", "author": author}),
    )
}

pub async fn update_author(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let form = FormData::from(pairs);

    match parse_author(&form).into_result() {
        Ok(input) => {
            let author = state.author_repo.update(&id, input).await?;
            tracing::info!("Updated author {}", author.id);
            Ok(redirect(&author.url()))
        }
        Err((input, errors)) => render(
            &state,
            "author_form",
            json!({"title": "Update Author", "author": input, "errors": errors}),
        ),
    }
}
