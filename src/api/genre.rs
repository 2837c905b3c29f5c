//! Genre controller

use axum::{
    Form,
    extract::{Path, State},
    response::Response,
};
use serde_json::json;

use super::{AppError, redirect, render, submitted_id};
use crate::domain::DomainError;
use crate::forms::{FormData, parse_genre};
use crate::infrastructure::AppState;

const GENRE_LIST_URL: &str = "/catalog/genres";

// List all genres with the books in each
pub async fn list_genres(State(state): State<AppState>) -> Result<Response, AppError> {
    let genres = state.genre_repo.find_all_with_books().await?;
    tracing::debug!("Listing {} genres", genres.len());

    render(
        &state,
        "genre_list",
        json!({"title": "Genre List", "genre_list": genres}),
    )
}

// Get a single genre with its books
pub async fn get_genre(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let (genre, genre_books) = tokio::try_join!(
        state.genre_repo.find_by_id(&id),
        state.book_repo.find_by_genre(&id),
    )?;
    let genre = genre.ok_or_else(|| AppError::not_found("Genre not found"))?;

    render(
        &state,
        "genre_detail",
        json!({
            "title": "Genre Detail",
            "genre": genre,
            "genre_books": genre_books
        }),
    )
}

pub async fn create_genre_form(State(state): State<AppState>) -> Result<Response, AppError> {
    render(&state, "genre_form", json!({"title": "Create Genre"}))
}

/// Creates a genre, or redirects to the genre that already has the name.
pub async fn create_genre(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let form = FormData::from(pairs);

    let input = match parse_genre(&form).into_result() {
        Ok(input) => input,
        Err((input, errors)) => {
            return render(
                &state,
                "genre_form",
                json!({"title": "Create Genre", "genre": input, "errors": errors}),
            );
        }
    };

    if let Some(existing) = state.genre_repo.find_by_name(&input.name).await? {
        tracing::debug!("Genre '{}' already exists as {}", input.name, existing.id);
        return Ok(redirect(&existing.url()));
    }

    let genre = state.genre_repo.create(input).await?;
    tracing::info!("Created genre {} ({})", genre.id, genre.name);
    Ok(redirect(&genre.url()))
}

pub async fn delete_genre_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let (genre, genre_books) = tokio::try_join!(
        state.genre_repo.find_by_id(&id),
        state.book_repo.find_by_genre(&id),
    )?;
    let Some(genre) = genre else {
        return Ok(redirect(GENRE_LIST_URL));
    };

    render(
        &state,
        "genre_delete",
        json!({
            "title": "Delete Genre",
            "genre": genre,
            "genre_books": genre_books
        }),
    )
}

/// Deletes a genre unless books still reference it.
pub async fn delete_genre(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let id = submitted_id(&FormData::from(pairs), "genreid", &id);

    let (genre, genre_books) = tokio::try_join!(
        state.genre_repo.find_by_id(&id),
        state.book_repo.find_by_genre(&id),
    )?;

    if !genre_books.is_empty() {
        tracing::warn!(
            "Refusing to delete genre {}: {} book(s) reference it",
            id,
            genre_books.len()
        );
        return render(
            &state,
            "genre_delete",
            json!({
                "title": "Delete Genre",
                "genre": genre,
                "genre_books": genre_books
            }),
        );
    }

    match state.genre_repo.delete(&id).await {
        Ok(()) | Err(DomainError::NotFound) => {
            tracing::info!("Deleted genre {}", id);
            Ok(redirect(GENRE_LIST_URL))
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn update_genre_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let genre = state
        .genre_repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Genre not found"))?;

    render(
        &state,
        "genre_form",
        json!({"title": "Update Genre", "genre": genre}),
    )
}

/// Renames a genre. A name held by another genre redirects there instead.
pub async fn update_genre(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let form = FormData::from(pairs);

    let input = match parse_genre(&form).into_result() {
        Ok(input) => input,
        Err((input, errors)) => {
            return render(
                &state,
                "genre_form",
                json!({"title": "Update Genre", "genre": input, "errors": errors}),
            );
        }
    };

    if let Some(existing) = state.genre_repo.find_by_name(&input.name).await?
        && existing.id != id
    {
        tracing::debug!("Genre '{}' already exists as {}", input.name, existing.id);
        return Ok(redirect(&existing.url()));
    }

    let genre = state.genre_repo.update(&id, input).await?;
    tracing::info!("Updated genre {}", genre.id);
    Ok(redirect(&genre.url()))
}
