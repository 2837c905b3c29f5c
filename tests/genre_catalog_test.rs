mod common;

use axum::http::StatusCode;
use common::*;

#[tokio::test]
async fn test_create_duplicate_genre_redirects_to_existing() {
    let (app, state) = setup().await;
    let existing = create_genre(&state, "Fantasy").await;

    let response = post_form(&app, "/catalog/genre/create", "name=Fantasy").await;

    assert_eq!(
        redirect_location(&response),
        format!("/catalog/genre/{}", existing)
    );
    assert_eq!(state.genre_repo.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_genre_names_match_exactly() {
    let (app, state) = setup().await;
    create_genre(&state, "Fantasy").await;

    let response = post_form(&app, "/catalog/genre/create", "name=fantasy").await;
    redirect_location(&response);

    assert_eq!(state.genre_repo.count().await.unwrap(), 2);
}

#[tokio::test]
async fn test_create_genre_requires_name() {
    let (app, state) = setup().await;

    let response = post_form(&app, "/catalog/genre/create", "name=+++").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Genre name required"));
    assert_eq!(state.genre_repo.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_update_genre_to_taken_name_redirects() {
    let (app, state) = setup().await;
    let fantasy = create_genre(&state, "Fantasy").await;
    let poetry = create_genre(&state, "Poetry").await;

    let uri = format!("/catalog/genre/{}/update", poetry);
    let response = post_form(&app, &uri, "name=Fantasy").await;

    assert_eq!(
        redirect_location(&response),
        format!("/catalog/genre/{}", fantasy)
    );
    let stored = state.genre_repo.find_by_id(&poetry).await.unwrap().unwrap();
    assert_eq!(stored.name, "Poetry");
}

#[tokio::test]
async fn test_update_genre_keeping_its_own_name() {
    let (app, state) = setup().await;
    let fantasy = create_genre(&state, "Fantasy").await;

    let uri = format!("/catalog/genre/{}/update", fantasy);
    let response = post_form(&app, &uri, "name=Fantasy").await;

    assert_eq!(
        redirect_location(&response),
        format!("/catalog/genre/{}", fantasy)
    );
    assert_eq!(state.genre_repo.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_update_genre_form_not_found() {
    let (app, _state) = setup().await;

    let response = get(&app, "/catalog/genre/missing/update").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_genre_list_shows_books() {
    let (app, state) = setup().await;
    let author = create_author(&state, "Patrick", "Rothfuss").await;
    let fantasy = create_genre(&state, "Fantasy").await;
    create_book(&state, "The Name of the Wind", &author, vec![fantasy]).await;

    let response = get(&app, "/catalog/genres").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Fantasy"));
    assert!(body.contains("The Name of the Wind"));
}

#[tokio::test]
async fn test_delete_genre_guarded_by_books() {
    let (app, state) = setup().await;
    let author = create_author(&state, "Patrick", "Rothfuss").await;
    let fantasy = create_genre(&state, "Fantasy").await;
    let poetry = create_genre(&state, "Poetry").await;
    create_book(&state, "The Name of the Wind", &author, vec![fantasy.clone()]).await;

    let response = post_form(
        &app,
        &format!("/catalog/genre/{}/delete", fantasy),
        &format!("genreid={}", fantasy),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(state.genre_repo.find_by_id(&fantasy).await.unwrap().is_some());

    let response = post_form(
        &app,
        &format!("/catalog/genre/{}/delete", poetry),
        &format!("genreid={}", poetry),
    )
    .await;
    assert_eq!(redirect_location(&response), "/catalog/genres");
    assert!(state.genre_repo.find_by_id(&poetry).await.unwrap().is_none());
}
