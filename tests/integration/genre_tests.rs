//! Genre page integration tests

mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use common::TestApp;
use locallibrary_server::{
    models::{BookData, Genre},
    repository::Filter,
};

async fn seed_genre(app: &TestApp, name: &str) -> Genre {
    let genre = Genre::new(name);
    app.repository.genres.save(&genre).await.unwrap();
    genre
}

async fn seed_book_in(app: &TestApp, genre: &Genre) {
    let book = BookData {
        title: "The Name of the Wind".into(),
        author: "a1".into(),
        summary: "A kingkiller's tale".into(),
        isbn: "9780756404741".into(),
        genre: vec![genre.id.clone()],
    }
    .create();
    app.repository.books.save(&book).await.unwrap();
}

#[tokio::test]
async fn test_list_is_sorted_by_name() {
    let app = TestApp::new();
    seed_genre(&app, "Poetry").await;
    seed_genre(&app, "Fantasy").await;

    let response = app.get("/catalog/genres").await;

    assert_eq!(response.status, StatusCode::OK);
    let fantasy = response.body.find("Fantasy").unwrap();
    let poetry = response.body.find("Poetry").unwrap();
    assert!(fantasy < poetry);
}

#[tokio::test]
async fn test_create_new_genre_redirects_to_detail() {
    let app = TestApp::new();

    let response = app.post_form("/catalog/genre/create", "name=Fantasy").await;

    assert_eq!(response.status, StatusCode::FOUND);
    let genres = app.repository.genres.find_all(None).await.unwrap();
    assert_eq!(genres.len(), 1);
    assert_eq!(response.location(), format!("/catalog/genre/{}", genres[0].id));
}

#[tokio::test]
async fn test_create_existing_name_redirects_without_duplicate() {
    let app = TestApp::new();
    let existing = seed_genre(&app, "Fantasy").await;

    let response = app.post_form("/catalog/genre/create", "name=+Fantasy+").await;

    assert_eq!(response.status, StatusCode::FOUND);
    assert_eq!(response.location(), existing.url());
    assert_eq!(app.repository.genres.count(Filter::all()).await.unwrap(), 1);
}

#[tokio::test]
async fn test_create_name_match_is_case_sensitive() {
    let app = TestApp::new();
    seed_genre(&app, "Fantasy").await;

    let response = app.post_form("/catalog/genre/create", "name=fantasy").await;

    assert_eq!(response.status, StatusCode::FOUND);
    assert_eq!(app.repository.genres.count(Filter::all()).await.unwrap(), 2);
}

#[tokio::test]
async fn test_create_blank_name_rerenders_form() {
    let app = TestApp::new();

    let response = app.post_form("/catalog/genre/create", "name=+++").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Genre name required"));
    assert_eq!(app.repository.genres.count(Filter::all()).await.unwrap(), 0);
}

#[tokio::test]
async fn test_create_without_form_content_type_renders_error_page() {
    let app = TestApp::new();

    let request = Request::post("/catalog/genre/create")
        .body(Body::from("name=Fantasy"))
        .unwrap();
    let response = app.send(request).await;

    assert_eq!(response.status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert!(response.body.contains("<h1>Unsupported Media Type</h1>"));
    assert_eq!(app.repository.genres.count(Filter::all()).await.unwrap(), 0);
}

#[tokio::test]
async fn test_created_name_is_escaped_on_output() {
    let app = TestApp::new();

    let response = app
        .post_form("/catalog/genre/create", "name=%3Cb%3ESci-Fi%3C%2Fb%3E")
        .await;
    let detail = app.get(response.location()).await;

    assert_eq!(detail.status, StatusCode::OK);
    assert!(detail.body.contains("&lt;b&gt;Sci-Fi"));
    assert!(!detail.body.contains("<b>Sci-Fi</b>"));
}

#[tokio::test]
async fn test_detail_lists_books_in_genre() {
    let app = TestApp::new();
    let genre = seed_genre(&app, "Fantasy").await;
    seed_book_in(&app, &genre).await;

    let response = app.get(&genre.url()).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("The Name of the Wind"));
}

#[tokio::test]
async fn test_detail_unknown_id_is_404() {
    let app = TestApp::new();

    let response = app.get("/catalog/genre/0123456789abcdef").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(response.body.contains("Genre not found"));
}

#[tokio::test]
async fn test_update_form_prefills_name() {
    let app = TestApp::new();
    let genre = seed_genre(&app, "Fantasy").await;

    let response = app.get(&format!("{}/update", genre.url())).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("value=\"Fantasy\""));
}

#[tokio::test]
async fn test_update_form_unknown_id_is_404() {
    let app = TestApp::new();

    let response = app.get("/catalog/genre/missing/update").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_short_name_never_mutates() {
    let app = TestApp::new();
    let genre = seed_genre(&app, "Fantasy").await;

    let response = app
        .post_form(&format!("{}/update", genre.url()), "name=Fo")
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Genre name must contain at least 3 characters"));
    let stored = app.repository.genres.get_by_id(&genre.id).await.unwrap();
    assert_eq!(stored.name, "Fantasy");
}

#[tokio::test]
async fn test_update_replaces_record_and_redirects() {
    let app = TestApp::new();
    let genre = seed_genre(&app, "Fantasy").await;

    let response = app
        .post_form(&format!("{}/update", genre.url()), "name=High+Fantasy")
        .await;

    assert_eq!(response.status, StatusCode::FOUND);
    assert_eq!(response.location(), genre.url());
    let stored = app.repository.genres.get_by_id(&genre.id).await.unwrap();
    assert_eq!(stored.name, "High Fantasy");
}

#[tokio::test]
async fn test_delete_form_unknown_id_redirects_to_list() {
    let app = TestApp::new();

    let response = app.get("/catalog/genre/missing/delete").await;

    assert_eq!(response.status, StatusCode::FOUND);
    assert_eq!(response.location(), "/catalog/genres");
}

#[tokio::test]
async fn test_delete_form_lists_blocking_books() {
    let app = TestApp::new();
    let genre = seed_genre(&app, "Fantasy").await;
    seed_book_in(&app, &genre).await;

    let response = app.get(&format!("{}/delete", genre.url())).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Delete the following books"));
    assert!(response.body.contains("The Name of the Wind"));
}

#[tokio::test]
async fn test_delete_with_books_is_refused() {
    let app = TestApp::new();
    let genre = seed_genre(&app, "Fantasy").await;
    seed_book_in(&app, &genre).await;

    let response = app
        .post_form(&format!("{}/delete", genre.url()), &format!("genreid={}", genre.id))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(app.repository.genres.find_by_id(&genre.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_delete_unused_genre_redirects_to_list() {
    let app = TestApp::new();
    let genre = seed_genre(&app, "Fantasy").await;

    let response = app
        .post_form(&format!("{}/delete", genre.url()), &format!("genreid={}", genre.id))
        .await;

    assert_eq!(response.status, StatusCode::FOUND);
    assert_eq!(response.location(), "/catalog/genres");
    assert!(app.repository.genres.find_by_id(&genre.id).await.unwrap().is_none());
}
