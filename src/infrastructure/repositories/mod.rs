//! Repository implementations using SeaORM

pub mod author_repository;
pub mod book_instance_repository;
pub mod book_repository;
pub mod genre_repository;

pub use author_repository::SeaOrmAuthorRepository;
pub use book_instance_repository::SeaOrmBookInstanceRepository;
pub use book_repository::SeaOrmBookRepository;
pub use genre_repository::SeaOrmGenreRepository;

use chrono::NaiveDate;

use crate::domain::DomainError;

const STORED_DATE_FORMAT: &str = "%Y-%m-%d";

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}

fn date_to_column(date: NaiveDate) -> String {
    date.format(STORED_DATE_FORMAT).to_string()
}

fn date_from_column(value: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(value, STORED_DATE_FORMAT)
        .map_err(|e| DomainError::Database(format!("Stored date '{}' is invalid: {}", value, e)))
}

fn optional_date_from_column(value: Option<&str>) -> Result<Option<NaiveDate>, DomainError> {
    value.map(date_from_column).transpose()
}
