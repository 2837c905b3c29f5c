//! BookInstance (copy) controller

use axum::{
    Form,
    extract::{Path, State},
    response::Response,
};
use serde_json::json;

use super::{AppError, redirect, render, submitted_id};
use crate::domain::{BookInstanceInput, BookInstanceStatus, DomainError};
use crate::forms::{FieldError, FormData, parse_book_instance};
use crate::infrastructure::AppState;

const BOOK_INSTANCE_LIST_URL: &str = "/catalog/bookinstances";

fn statuses() -> Vec<&'static str> {
    BookInstanceStatus::ALL.iter().map(|s| s.as_str()).collect()
}

// List all copies with their books
pub async fn list_book_instances(State(state): State<AppState>) -> Result<Response, AppError> {
    let instances = state.instance_repo.find_all().await?;
    tracing::debug!("Listing {} copies", instances.len());

    render(
        &state,
        "bookinstance_list",
        json!({"title": "Book Instance List", "bookinstance_list": instances}),
    )
}

pub async fn get_book_instance(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let instance = state
        .instance_repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Book copy not found"))?;

    render(
        &state,
        "bookinstance_detail",
        json!({"title": "Book:", "bookinstance": instance}),
    )
}

/// Renders the copy form with the book selection list.
async fn render_book_instance_form(
    state: &AppState,
    title: &str,
    instance: Option<BookInstanceInput>,
    errors: Option<Vec<FieldError>>,
) -> Result<Response, AppError> {
    let books = state.book_repo.find_all().await?;
    let selected_book = instance.as_ref().map(|i| i.book.clone());

    render(
        state,
        "bookinstance_form",
        json!({
            "title": title,
            "book_list": books,
            "selected_book": selected_book,
            "bookinstance": instance,
            "statuses": statuses(),
            "errors": errors
        }),
    )
}

pub async fn create_book_instance_form(
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    render_book_instance_form(&state, "Create BookInstance", None, None).await
}

pub async fn create_book_instance(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let form = FormData::from(pairs);

    match parse_book_instance(&form).into_result() {
        Ok(input) => {
            let instance = state.instance_repo.create(input).await?;
            tracing::info!(
                "Created copy {} of book {} ({})",
                instance.id,
                instance.book,
                instance.status
            );
            Ok(redirect(&instance.url()))
        }
        Err((input, errors)) => {
            render_book_instance_form(&state, "Create BookInstance", Some(input), Some(errors))
                .await
        }
    }
}

pub async fn delete_book_instance_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let Some(instance) = state.instance_repo.find_by_id(&id).await? else {
        return Ok(redirect(BOOK_INSTANCE_LIST_URL));
    };

    render(
        &state,
        "bookinstance_delete",
        json!({"title": "Delete BookInstance", "bookinstance": instance}),
    )
}

/// Deletes a copy. Nothing references copies, so there is no guard.
pub async fn delete_book_instance(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let id = submitted_id(&FormData::from(pairs), "bookinstanceid", &id);

    match state.instance_repo.delete(&id).await {
        Ok(()) | Err(DomainError::NotFound) => {
            tracing::info!("Deleted copy {}", id);
            Ok(redirect(BOOK_INSTANCE_LIST_URL))
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn update_book_instance_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let (instance, books) = tokio::try_join!(
        state.instance_repo.find_by_id(&id),
        state.book_repo.find_all(),
    )?;
    let instance = instance.ok_or_else(|| AppError::not_found("Book copy not found"))?;

    render(
        &state,
        "bookinstance_form",
        json!({
            "title": "Update BookInstance",
            "book_list": books,
            "selected_book": instance.instance.book,
            "bookinstance": BookInstanceInput::from(&instance.instance),
            "statuses": statuses()
        }),
    )
}

pub async fn update_book_instance(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let form = FormData::from(pairs);

    match parse_book_instance(&form).into_result() {
        Ok(input) => {
            let instance = state.instance_repo.update(&id, input).await?;
            tracing::info!("Updated copy {}", instance.id);
            Ok(redirect(&instance.url()))
        }
        Err((input, errors)) => {
            render_book_instance_form(&state, "Update BookInstance", Some(input), Some(errors))
                .await
        }
    }
}
