//! SeaORM implementation of GenreRepository

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use super::book_repository::to_books;
use super::{new_id, now};
use crate::domain::{DomainError, Genre, GenreInput, GenreRepository, GenreWithBooks};
use crate::models::book::{Column as BookColumn, Entity as BookEntity};
use crate::models::book_genres::Entity as BookGenreEntity;
use crate::models::genre::{ActiveModel, Column, Entity as GenreEntity, Model};

/// SeaORM-based implementation of GenreRepository
pub struct SeaOrmGenreRepository {
    db: DatabaseConnection,
}

impl SeaOrmGenreRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

pub(crate) fn to_genre(model: Model) -> Genre {
    Genre {
        id: model.id,
        name: model.name,
    }
}

#[async_trait]
impl GenreRepository for SeaOrmGenreRepository {
    async fn find_all(&self) -> Result<Vec<Genre>, DomainError> {
        let genres = GenreEntity::find()
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await?;

        Ok(genres.into_iter().map(to_genre).collect())
    }

    async fn find_all_with_books(&self) -> Result<Vec<GenreWithBooks>, DomainError> {
        let genres = self.find_all().await?;
        let links = BookGenreEntity::find().all(&self.db).await?;

        let book_ids: Vec<String> = links.iter().map(|l| l.book_id.clone()).collect();
        let books = if book_ids.is_empty() {
            Vec::new()
        } else {
            let models = BookEntity::find()
                .filter(BookColumn::Id.is_in(book_ids))
                .order_by_asc(BookColumn::Title)
                .all(&self.db)
                .await?;
            to_books(&self.db, models).await?
        };

        let mut by_genre: HashMap<&str, Vec<&str>> = HashMap::new();
        for link in &links {
            by_genre
                .entry(link.genre_id.as_str())
                .or_default()
                .push(link.book_id.as_str());
        }

        Ok(genres
            .into_iter()
            .map(|genre| {
                let ids = by_genre.get(genre.id.as_str()).cloned().unwrap_or_default();
                let genre_books = books
                    .iter()
                    .filter(|book| ids.contains(&book.id.as_str()))
                    .cloned()
                    .collect();
                GenreWithBooks {
                    genre,
                    books: genre_books,
                }
            })
            .collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Genre>, DomainError> {
        let genre = GenreEntity::find_by_id(id).one(&self.db).await?;
        Ok(genre.map(to_genre))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Genre>, DomainError> {
        // SQLite compares TEXT with BINARY collation, so this is case-sensitive
        let genre = GenreEntity::find()
            .filter(Column::Name.eq(name))
            .order_by_asc(Column::CreatedAt)
            .one(&self.db)
            .await?;
        Ok(genre.map(to_genre))
    }

    async fn create(&self, input: GenreInput) -> Result<Genre, DomainError> {
        let now = now();

        let genre = ActiveModel {
            id: Set(new_id()),
            name: Set(input.name),
            created_at: Set(now.clone()),
            updated_at: Set(now),
        };

        let result = genre.insert(&self.db).await?;
        Ok(to_genre(result))
    }

    async fn update(&self, id: &str, input: GenreInput) -> Result<Genre, DomainError> {
        let existing = GenreEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)?;

        let mut active = existing.into_active_model();
        active.name = Set(input.name);
        active.updated_at = Set(now());

        let result = active.update(&self.db).await?;
        Ok(to_genre(result))
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        let result = GenreEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound);
        }

        Ok(())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(GenreEntity::find().count(&self.db).await?)
    }
}
