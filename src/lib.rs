//! Local Library catalog server
//!
//! Server-rendered HTML pages for browsing and editing a small library
//! catalog of genres, books, authors and book copies, persisted in a
//! document store.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod validation;
pub mod views;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

use repository::{DocumentStore, Repository};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
    pub views: Arc<views::Views>,
}

impl AppState {
    /// Wire services and templates around an already opened store
    pub fn new(config: AppConfig, store: Arc<dyn DocumentStore>) -> AppResult<Self> {
        let repository = Repository::new(store);
        Ok(Self {
            config: Arc::new(config),
            services: Arc::new(services::Services::new(repository)),
            views: Arc::new(views::Views::new()?),
        })
    }
}
