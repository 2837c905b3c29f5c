mod common;

use axum::http::StatusCode;
use common::*;
use local_library::domain::{BookInstanceInput, BookInstanceStatus};

#[tokio::test]
async fn test_book_detail_not_found() {
    let (app, state) = setup().await;
    let author = create_author(&state, "Isaac", "Asimov").await;
    create_book(&state, "The Foundation", &author, vec![]).await;

    let response = get(&app, "/catalog/book/no-such-book").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("Book not found"));
}

#[tokio::test]
async fn test_create_book_without_genre_field() {
    let (app, state) = setup().await;
    let author = create_author(&state, "Ben", "Bova").await;

    let body = format!(
        "title=Apes+and+Angels&author={}&summary=Humankind&isbn=9780765379528",
        author
    );
    let response = post_form(&app, "/catalog/book/create", &body).await;
    let location = redirect_location(&response);

    let id = location.trim_start_matches("/catalog/book/");
    let book = state.book_repo.find_by_id(id).await.unwrap().unwrap();
    assert!(book.book.genre.is_empty());
    assert!(book.genres.is_empty());
    assert_eq!(book.author.unwrap().id, author);
}

#[tokio::test]
async fn test_create_book_with_single_and_repeated_genres() {
    let (app, state) = setup().await;
    let author = create_author(&state, "Patrick", "Rothfuss").await;
    let fantasy = create_genre(&state, "Fantasy").await;
    let poetry = create_genre(&state, "Poetry").await;

    let single = format!(
        "title=One&author={}&summary=S&isbn=1&genre={}",
        author, fantasy
    );
    let location = redirect_location(&post_form(&app, "/catalog/book/create", &single).await);
    let book = state
        .book_repo
        .find_by_id(location.trim_start_matches("/catalog/book/"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(book.book.genre, vec![fantasy.clone()]);

    let repeated = format!(
        "title=Two&author={}&summary=S&isbn=2&genre={}&genre={}",
        author, fantasy, poetry
    );
    let location = redirect_location(&post_form(&app, "/catalog/book/create", &repeated).await);
    let book = state
        .book_repo
        .find_by_id(location.trim_start_matches("/catalog/book/"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(book.genres.len(), 2);

    let body = body_text(get(&app, &location).await).await;
    assert!(body.contains("Fantasy"));
    assert!(body.contains("Poetry"));
}

#[tokio::test]
async fn test_invalid_book_keeps_genre_selection() {
    let (app, state) = setup().await;
    let author = create_author(&state, "Patrick", "Rothfuss").await;
    let fantasy = create_genre(&state, "Fantasy").await;

    let body = format!("title=&author={}&summary=S&isbn=1&genre={}", author, fantasy);
    let response = post_form(&app, "/catalog/book/create", &body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let page = body_text(response).await;
    assert!(page.contains("Title must not be empty."));
    assert!(page.contains(&format!("value=\"{}\" checked", fantasy)));
    assert!(page.contains(&format!("value=\"{}\" selected", author)));
    assert_eq!(state.book_repo.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_update_book_form_checks_current_genres() {
    let (app, state) = setup().await;
    let author = create_author(&state, "Patrick", "Rothfuss").await;
    let fantasy = create_genre(&state, "Fantasy").await;
    let poetry = create_genre(&state, "Poetry").await;
    let book = create_book(&state, "The Wise Man's Fear", &author, vec![fantasy.clone()]).await;

    let page = body_text(get(&app, &format!("/catalog/book/{}/update", book)).await).await;
    assert!(page.contains(&format!("value=\"{}\" checked", fantasy)));
    assert!(!page.contains(&format!("value=\"{}\" checked", poetry)));

    let body = format!(
        "title=Renamed&author={}&summary=S&isbn=1&genre={}",
        author, poetry
    );
    let response = post_form(&app, &format!("/catalog/book/{}/update", book), &body).await;
    assert_eq!(redirect_location(&response), format!("/catalog/book/{}", book));

    let stored = state.book_repo.find_by_id(&book).await.unwrap().unwrap();
    assert_eq!(stored.book.title, "Renamed");
    assert_eq!(stored.book.genre, vec![poetry]);
}

#[tokio::test]
async fn test_update_missing_book_form_is_not_found() {
    let (app, _state) = setup().await;

    let response = get(&app, "/catalog/book/missing/update").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_book_with_copies_is_refused() {
    let (app, state) = setup().await;
    let author = create_author(&state, "Isaac", "Asimov").await;
    let book = create_book(&state, "The Foundation", &author, vec![]).await;
    state
        .instance_repo
        .create(BookInstanceInput {
            book: book.clone(),
            imprint: "Bantam Spectra, 1991.".to_string(),
            status: BookInstanceStatus::Available,
            due_back: None,
        })
        .await
        .unwrap();

    let uri = format!("/catalog/book/{}/delete", book);
    let response = post_form(&app, &uri, &format!("bookid={}", book)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Delete the following copies"));
    assert!(state.book_repo.find_by_id(&book).await.unwrap().is_some());
}

#[tokio::test]
async fn test_delete_book_without_copies() {
    let (app, state) = setup().await;
    let author = create_author(&state, "Isaac", "Asimov").await;
    let genre = create_genre(&state, "Science Fiction").await;
    let book = create_book(&state, "The Foundation", &author, vec![genre.clone()]).await;

    let uri = format!("/catalog/book/{}/delete", book);
    let response = post_form(&app, &uri, &format!("bookid={}", book)).await;

    assert_eq!(redirect_location(&response), "/catalog/books");
    assert!(state.book_repo.find_by_id(&book).await.unwrap().is_none());
    // The genre is free again
    assert!(state.book_repo.find_by_genre(&genre).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_index_counts() {
    let (app, state) = setup().await;
    let author = create_author(&state, "Isaac", "Asimov").await;
    create_genre(&state, "Science Fiction").await;
    let book = create_book(&state, "The Foundation", &author, vec![]).await;
    for status in [BookInstanceStatus::Available, BookInstanceStatus::Loaned] {
        state
            .instance_repo
            .create(BookInstanceInput {
                book: book.clone(),
                imprint: "Imprint".to_string(),
                status,
                due_back: None,
            })
            .await
            .unwrap();
    }

    let response = get(&app, "/catalog").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("<strong>Books:</strong> 1"));
    assert!(body.contains("<strong>Copies:</strong> 2"));
    assert!(body.contains("<strong>Copies available:</strong> 1"));
    assert!(body.contains("<strong>Authors:</strong> 1"));
    assert!(body.contains("<strong>Genres:</strong> 1"));
}

#[tokio::test]
async fn test_invalid_book_update_leaves_record_unchanged() {
    let (app, state) = setup().await;
    let author = create_author(&state, "Isaac", "Asimov").await;
    let book = create_book(&state, "Foundation", &author, vec![]).await;

    let uri = format!("/catalog/book/{}/update", book);
    let body = format!("title=&author={}&summary=S&isbn=", author);
    let response = post_form(&app, &uri, &body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let page = body_text(response).await;
    assert!(page.contains("Title must not be empty."));
    assert!(page.contains("ISBN must not be empty"));

    let stored = state.book_repo.find_by_id(&book).await.unwrap().unwrap();
    assert_eq!(stored.book.title, "Foundation");
    assert_eq!(stored.book.isbn, "9780000000000");
}

#[tokio::test]
async fn test_book_list_shows_authors() {
    let (app, state) = setup().await;
    let author = create_author(&state, "Isaac", "Asimov").await;
    create_book(&state, "Foundation", &author, vec![]).await;

    let response = get(&app, "/catalog/books").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Foundation</a> (Asimov, Isaac)"));
}
