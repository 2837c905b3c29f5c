//! Application state containing repositories and shared resources

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::domain::{AuthorRepository, BookInstanceRepository, BookRepository, GenreRepository};
use crate::infrastructure::{
    SeaOrmAuthorRepository, SeaOrmBookInstanceRepository, SeaOrmBookRepository,
    SeaOrmGenreRepository,
};
use crate::views::ViewRenderer;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Author repository
    pub author_repo: Arc<dyn AuthorRepository>,
    /// Book repository
    pub book_repo: Arc<dyn BookRepository>,
    /// Genre repository
    pub genre_repo: Arc<dyn GenreRepository>,
    /// Book instance (copy) repository
    pub instance_repo: Arc<dyn BookInstanceRepository>,
    /// Page renderer
    pub views: Arc<dyn ViewRenderer>,
    /// Include the underlying error on error pages
    pub show_error_details: bool,
}

impl AppState {
    /// Create a new AppState with all repositories sharing one connection pool
    pub fn new(db: DatabaseConnection, views: Arc<dyn ViewRenderer>) -> Self {
        Self {
            author_repo: Arc::new(SeaOrmAuthorRepository::new(db.clone())),
            book_repo: Arc::new(SeaOrmBookRepository::new(db.clone())),
            genre_repo: Arc::new(SeaOrmGenreRepository::new(db.clone())),
            instance_repo: Arc::new(SeaOrmBookInstanceRepository::new(db)),
            views,
            show_error_details: false,
        }
    }

    pub fn with_error_details(mut self, show: bool) -> Self {
        self.show_error_details = show;
        self
    }
}
