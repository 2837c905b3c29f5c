//! Book controller, plus the catalog home page

use axum::{
    Form,
    extract::{Path, State},
    response::Response,
};
use serde_json::{Value, json};

use super::{AppError, redirect, render, submitted_id};
use crate::domain::{BookInput, BookInstanceStatus, DomainError, GenreChoice};
use crate::forms::{FieldError, FormData, parse_book};
use crate::infrastructure::AppState;

const BOOK_LIST_URL: &str = "/catalog/books";

/// Catalog home: record counts, gathered concurrently.
///
/// A failed count is shown on the page instead of failing the request.
pub async fn index(State(state): State<AppState>) -> Result<Response, AppError> {
    let counts = tokio::try_join!(
        state.book_repo.count(),
        state.instance_repo.count(None),
        state
            .instance_repo
            .count(Some(BookInstanceStatus::Available)),
        state.author_repo.count(),
        state.genre_repo.count(),
    );

    let context = match counts {
        Ok((books, copies, available, authors, genres)) => json!({
            "title": "Local Library Home",
            "error": null,
            "data": {
                "book_count": books,
                "book_instance_count": copies,
                "book_instance_available_count": available,
                "author_count": authors,
                "genre_count": genres
            }
        }),
        Err(e) => {
            tracing::error!("Failed to count catalog records: {}", e);
            json!({"title": "Local Library Home", "error": e.to_string(), "data": null})
        }
    };

    render(&state, "index", context)
}

// List all books with their authors
pub async fn list_books(State(state): State<AppState>) -> Result<Response, AppError> {
    let books = state.book_repo.find_all().await?;
    tracing::debug!("Listing {} books", books.len());

    render(
        &state,
        "book_list",
        json!({"title": "Book List", "book_list": books}),
    )
}

// Get a single book with its copies
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let (book, book_instances) = tokio::try_join!(
        state.book_repo.find_by_id(&id),
        state.instance_repo.find_by_book(&id),
    )?;
    let book = book.ok_or_else(|| AppError::not_found("Book not found"))?;

    render(
        &state,
        "book_detail",
        json!({
            "title": "Book Detail",
            "book": book,
            "book_instances": book_instances
        }),
    )
}

/// Renders the book form with the author and genre selections.
async fn render_book_form(
    state: &AppState,
    title: &str,
    book: Option<BookInput>,
    errors: Option<Vec<FieldError>>,
) -> Result<Response, AppError> {
    let (authors, genres) = tokio::try_join!(
        state.author_repo.find_all(),
        state.genre_repo.find_all(),
    )?;

    let selected = book.as_ref().map(|b| b.genre.as_slice()).unwrap_or_default();
    let genres = GenreChoice::mark(genres, selected);

    render(
        state,
        "book_form",
        json!({
            "title": title,
            "authors": authors,
            "genres": genres,
            "book": book,
            "errors": errors
        }),
    )
}

pub async fn create_book_form(State(state): State<AppState>) -> Result<Response, AppError> {
    render_book_form(&state, "Create Book", None, None).await
}

pub async fn create_book(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let form = FormData::from(pairs);

    match parse_book(&form).into_result() {
        Ok(input) => {
            let book = state.book_repo.create(input).await?;
            tracing::info!("Created book {} ({})", book.id, book.title);
            Ok(redirect(&book.url()))
        }
        Err((input, errors)) => {
            render_book_form(&state, "Create Book", Some(input), Some(errors)).await
        }
    }
}

fn delete_context(book: Value, book_instances: Value) -> Value {
    json!({
        "title": "Delete Book",
        "book": book,
        "book_instances": book_instances
    })
}

pub async fn delete_book_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let (book, book_instances) = tokio::try_join!(
        state.book_repo.find_by_id(&id),
        state.instance_repo.find_by_book(&id),
    )?;
    let Some(book) = book else {
        return Ok(redirect(BOOK_LIST_URL));
    };

    render(
        &state,
        "book_delete",
        delete_context(json!(book), json!(book_instances)),
    )
}

/// Deletes a book unless copies of it still exist.
pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let id = submitted_id(&FormData::from(pairs), "bookid", &id);

    let (book, book_instances) = tokio::try_join!(
        state.book_repo.find_by_id(&id),
        state.instance_repo.find_by_book(&id),
    )?;

    if !book_instances.is_empty() {
        tracing::warn!(
            "Refusing to delete book {}: {} copy(ies) reference it",
            id,
            book_instances.len()
        );
        return render(
            &state,
            "book_delete",
            delete_context(json!(book), json!(book_instances)),
        );
    }

    match state.book_repo.delete(&id).await {
        Ok(()) | Err(DomainError::NotFound) => {
            tracing::info!("Deleted book {}", id);
            Ok(redirect(BOOK_LIST_URL))
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn update_book_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let (book, authors, genres) = tokio::try_join!(
        state.book_repo.find_by_id(&id),
        state.author_repo.find_all(),
        state.genre_repo.find_all(),
    )?;
    let book = book.ok_or_else(|| AppError::not_found("Book not found"))?;

    let genres = GenreChoice::mark(genres, &book.book.genre);

    render(
        &state,
        "book_form",
        json!({
            "title": "Update Book",
            "authors": authors,
            "genres": genres,
            "book": BookInput::from(&book.book)
        }),
    )
}

pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let form = FormData::from(pairs);

    match parse_book(&form).into_result() {
        Ok(input) => {
            let book = state.book_repo.update(&id, input).await?;
            tracing::info!("Updated book {}", book.id);
            Ok(redirect(&book.url()))
        }
        Err((input, errors)) => {
            render_book_form(&state, "Update Book", Some(input), Some(errors)).await
        }
    }
}
