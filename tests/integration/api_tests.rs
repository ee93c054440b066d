//! Application integration tests
//!
//! Drive the full router in-process against an in-memory store.

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use chrono::NaiveDate;
use mockall::mock;
use serde_json::Value;

use common::TestApp;
use locallibrary_server::{
    config::RunEnvironment,
    models::{Author, Book, BookData, BookInstance, Genre, InstanceStatus},
    repository::{new_id, DocumentStore, Filter, Query},
    AppConfig, AppError, AppResult,
};

mock! {
    pub Store {}

    #[async_trait]
    impl DocumentStore for Store {
        async fn insert(&self, collection: &str, id: &str, doc: Value) -> AppResult<()>;
        async fn get(&self, collection: &str, id: &str) -> AppResult<Option<Value>>;
        async fn find(&self, collection: &str, query: &Query) -> AppResult<Vec<Value>>;
        async fn count(&self, collection: &str, filter: &Filter) -> AppResult<u64>;
        async fn replace(&self, collection: &str, id: &str, doc: Value) -> AppResult<bool>;
        async fn remove(&self, collection: &str, id: &str) -> AppResult<bool>;
        async fn ping(&self) -> AppResult<()>;
        async fn close(&self);
    }
}

fn unreachable_store() -> MockStore {
    let mut store = MockStore::new();
    store
        .expect_count()
        .returning(|_, _| Err(AppError::Store("connection refused".to_string())));
    store
        .expect_ping()
        .returning(|| Err(AppError::Store("connection refused".to_string())));
    store
}

async fn seed_author(app: &TestApp) -> Author {
    let author = Author::new("Ursula", "LeGuin", NaiveDate::from_ymd_opt(1929, 10, 21), None);
    app.repository.authors.save(&author).await.unwrap();
    author
}

async fn seed_book(app: &TestApp, author: &Author, genres: &[&Genre]) -> Book {
    let book = BookData {
        title: "A Wizard of Earthsea".into(),
        author: author.id.clone(),
        summary: "Ged learns the true names of things".into(),
        isbn: "9780547773742".into(),
        genre: genres.iter().map(|g| g.id.clone()).collect(),
    }
    .create();
    app.repository.books.save(&book).await.unwrap();
    book
}

async fn seed_copy(app: &TestApp, book_id: &str, status: InstanceStatus) -> BookInstance {
    let copy = BookInstance {
        id: new_id(),
        book: book_id.to_string(),
        imprint: "Parnassus Press, 1968".into(),
        status,
        due_back: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
    };
    app.repository.book_instances.save(&copy).await.unwrap();
    copy
}

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::new();

    let response = app.get("/health").await;

    assert_eq!(response.status, StatusCode::OK);
    let body: Value = serde_json::from_str(&response.body).unwrap();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_readiness_with_memory_store() {
    let app = TestApp::new();

    let response = app.get("/ready").await;

    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_readiness_reports_unreachable_store() {
    let app = TestApp::with_store(AppConfig::default(), Arc::new(unreachable_store()));

    let response = app.get("/ready").await;

    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_root_redirects_to_catalog() {
    let app = TestApp::new();

    let response = app.get("/").await;

    assert_eq!(response.status, StatusCode::FOUND);
    assert_eq!(response.location(), "/catalog");
}

#[tokio::test]
async fn test_index_shows_counts() {
    let app = TestApp::new();
    let author = seed_author(&app).await;
    let book = seed_book(&app, &author, &[]).await;
    seed_copy(&app, &book.id, InstanceStatus::Available).await;
    seed_copy(&app, &book.id, InstanceStatus::Loaned).await;

    let response = app.get("/catalog").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Local Library Home"));
    assert!(response.body.contains("<strong>Copies:</strong> 2"));
    assert!(response.body.contains("<strong>Copies available:</strong> 1"));
}

#[tokio::test]
async fn test_static_stylesheet_is_served() {
    let app = TestApp::new();

    let response = app.get("/stylesheets/style.css").await;

    assert_eq!(response.status, StatusCode::OK);
    let content_type = response.headers.get(header::CONTENT_TYPE).unwrap();
    assert_eq!(content_type, "text/css");
}

#[tokio::test]
async fn test_unknown_route_renders_404_page() {
    let app = TestApp::new();

    let response = app.get("/no/such/page").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(response.body.contains("<h1>Not Found</h1>"));
}

#[tokio::test]
async fn test_unknown_route_renders_404_page_for_post() {
    let app = TestApp::new();

    let response = app.post_form("/catalog/nothing/here", "name=x").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(response.body.contains("<h1>Not Found</h1>"));
}

#[tokio::test]
async fn test_wrong_method_on_known_route_renders_404_page() {
    let app = TestApp::new();

    let request = Request::put("/catalog/genres").body(Body::empty()).unwrap();
    let response = app.send(request).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(response.body.contains("<h1>Not Found</h1>"));
}

#[tokio::test]
async fn test_security_headers_are_set() {
    let app = TestApp::new();

    let response = app.get("/catalog/genres").await;

    assert_eq!(response.headers.get(header::X_CONTENT_TYPE_OPTIONS).unwrap(), "nosniff");
    assert_eq!(response.headers.get(header::X_FRAME_OPTIONS).unwrap(), "SAMEORIGIN");
    assert!(response.headers.contains_key(header::CONTENT_SECURITY_POLICY));
}

#[tokio::test]
async fn test_store_failure_renders_500_with_detail_in_development() {
    let app = TestApp::with_store(AppConfig::default(), Arc::new(unreachable_store()));

    let response = app.get("/catalog").await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.body.contains("Store error: connection refused"));
    assert!(response.body.contains("<pre>"));
}

#[tokio::test]
async fn test_store_failure_hides_detail_in_production() {
    let mut config = AppConfig::default();
    config.app.environment = RunEnvironment::Production;
    let app = TestApp::with_store(config, Arc::new(unreachable_store()));

    let response = app.get("/catalog").await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.body.contains("Store error: connection refused"));
    assert!(!response.body.contains("<pre>"));
}

#[tokio::test]
async fn test_author_create_and_detail() {
    let app = TestApp::new();

    let response = app
        .post_form(
            "/catalog/author/create",
            "first_name=Jane&family_name=Austen&date_of_birth=1775-12-16&date_of_death=1817-07-18",
        )
        .await;

    assert_eq!(response.status, StatusCode::FOUND);
    let detail = app.get(response.location()).await;
    assert_eq!(detail.status, StatusCode::OK);
    assert!(detail.body.contains("Author: Austen, Jane"));
    assert!(detail.body.contains("Dec 16, 1775 - Jul 18, 1817"));
}

#[tokio::test]
async fn test_author_invalid_form_rerenders_with_errors() {
    let app = TestApp::new();

    let response = app
        .post_form("/catalog/author/create", "first_name=J4ne!&family_name=&date_of_birth=yesterday")
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("First name has non-alphanumeric characters."));
    assert!(response.body.contains("Family name must be specified."));
    assert!(response.body.contains("Invalid date of birth"));
    assert_eq!(app.repository.authors.count(Filter::all()).await.unwrap(), 0);
}

#[tokio::test]
async fn test_author_delete_blocked_by_books() {
    let app = TestApp::new();
    let author = seed_author(&app).await;
    seed_book(&app, &author, &[]).await;

    let response = app.post_form(&format!("{}/delete", author.url()), "").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("A Wizard of Earthsea"));
    assert!(app.repository.authors.find_by_id(&author.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_book_create_with_repeated_genres() {
    let app = TestApp::new();
    let author = seed_author(&app).await;
    let fantasy = Genre::new("Fantasy");
    let classics = Genre::new("Classics");
    app.repository.genres.save(&fantasy).await.unwrap();
    app.repository.genres.save(&classics).await.unwrap();

    let form = format!(
        "title=Tehanu&author={}&summary=Tenar+and+Therru&isbn=9780689315954&genre={}&genre={}",
        author.id, fantasy.id, classics.id
    );
    let response = app.post_form("/catalog/book/create", &form).await;

    assert_eq!(response.status, StatusCode::FOUND);
    let books = app.repository.books.find_all(None).await.unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].genre, vec![fantasy.id.clone(), classics.id.clone()]);

    let detail = app.get(response.location()).await;
    assert!(detail.body.contains("LeGuin, Ursula"));
    assert!(detail.body.contains("Fantasy"));
    assert!(detail.body.contains("Classics"));
}

#[tokio::test]
async fn test_book_invalid_form_keeps_genre_selection() {
    let app = TestApp::new();
    let fantasy = Genre::new("Fantasy");
    app.repository.genres.save(&fantasy).await.unwrap();

    let response = app
        .post_form("/catalog/book/create", &format!("title=&genre={}", fantasy.id))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Title must not be empty."));
    assert!(response.body.contains(&format!("value=\"{}\" checked", fantasy.id)));
}

#[tokio::test]
async fn test_book_list_shows_author_name() {
    let app = TestApp::new();
    let author = seed_author(&app).await;
    seed_book(&app, &author, &[]).await;

    let response = app.get("/catalog/books").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("A Wizard of Earthsea</a> (LeGuin, Ursula)"));
}

#[tokio::test]
async fn test_book_delete_blocked_by_copies() {
    let app = TestApp::new();
    let author = seed_author(&app).await;
    let book = seed_book(&app, &author, &[]).await;
    seed_copy(&app, &book.id, InstanceStatus::Available).await;

    let response = app.post_form(&format!("{}/delete", book.url()), "").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(app.repository.books.find_by_id(&book.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_book_update_form_unknown_id_is_404() {
    let app = TestApp::new();

    let response = app.get("/catalog/book/missing/update").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_bookinstance_create_defaults_status() {
    let app = TestApp::new();
    let author = seed_author(&app).await;
    let book = seed_book(&app, &author, &[]).await;

    let response = app
        .post_form(
            "/catalog/bookinstance/create",
            &format!("book={}&imprint=Atheneum%2C+1990&due_back=2024-06-01", book.id),
        )
        .await;

    assert_eq!(response.status, StatusCode::FOUND);
    let copies = app.repository.book_instances.find_all(None).await.unwrap();
    assert_eq!(copies.len(), 1);
    assert_eq!(copies[0].status, InstanceStatus::Maintenance);

    let detail = app.get(response.location()).await;
    assert!(detail.body.contains("Jun 1, 2024"));
    assert!(detail.body.contains("A Wizard of Earthsea"));
}

#[tokio::test]
async fn test_bookinstance_list_hides_due_date_when_available() {
    let app = TestApp::new();
    let author = seed_author(&app).await;
    let book = seed_book(&app, &author, &[]).await;
    seed_copy(&app, &book.id, InstanceStatus::Available).await;

    let response = app.get("/catalog/bookinstances").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("A Wizard of Earthsea : Parnassus Press, 1968"));
    assert!(!response.body.contains("Due:"));
}

#[tokio::test]
async fn test_bookinstance_delete_redirects_to_list() {
    let app = TestApp::new();
    let copy = seed_copy(&app, "b1", InstanceStatus::Loaned).await;

    let response = app.post_form(&format!("{}/delete", copy.url()), "").await;

    assert_eq!(response.status, StatusCode::FOUND);
    assert_eq!(response.location(), "/catalog/bookinstances");
    assert!(app
        .repository
        .book_instances
        .find_by_id(&copy.id)
        .await
        .unwrap()
        .is_none());
}
