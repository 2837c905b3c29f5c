//! SeaORM implementation of BookRepository
//!
//! A book row and its `book_genres` rows form one record and are always
//! written inside the same transaction.

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

use super::author_repository::to_author;
use super::genre_repository::to_genre;
use super::{new_id, now};
use crate::domain::{Book, BookDetail, BookInput, BookRepository, BookWithAuthor, DomainError};
use crate::models::author::Entity as AuthorEntity;
use crate::models::book::{ActiveModel, Column, Entity as BookEntity, Model};
use crate::models::book_genres::{
    ActiveModel as BookGenreActiveModel, Column as BookGenreColumn, Entity as BookGenreEntity,
};
use crate::models::genre::{Column as GenreColumn, Entity as GenreEntity};

/// SeaORM-based implementation of BookRepository
pub struct SeaOrmBookRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

pub(crate) fn to_book(model: Model, genre: Vec<String>) -> Book {
    Book {
        id: model.id,
        title: model.title,
        author: model.author_id,
        summary: model.summary,
        isbn: model.isbn,
        genre,
    }
}

/// Genre ids referenced by each of the given books
pub(crate) async fn genre_ids_by_book<C: ConnectionTrait>(
    db: &C,
    book_ids: Vec<String>,
) -> Result<HashMap<String, Vec<String>>, DomainError> {
    let mut map: HashMap<String, Vec<String>> = HashMap::new();
    if book_ids.is_empty() {
        return Ok(map);
    }

    let rows = BookGenreEntity::find()
        .filter(BookGenreColumn::BookId.is_in(book_ids))
        .all(db)
        .await?;

    for row in rows {
        map.entry(row.book_id).or_default().push(row.genre_id);
    }
    Ok(map)
}

/// Converts book rows, attaching the genre ids of each
pub(crate) async fn to_books<C: ConnectionTrait>(
    db: &C,
    models: Vec<Model>,
) -> Result<Vec<Book>, DomainError> {
    let ids = models.iter().map(|m| m.id.clone()).collect();
    let mut genres = genre_ids_by_book(db, ids).await?;

    Ok(models
        .into_iter()
        .map(|model| {
            let genre = genres.remove(&model.id).unwrap_or_default();
            to_book(model, genre)
        })
        .collect())
}

/// Rewrites the genre set of a book, returning the ids actually stored
async fn replace_genres<C: ConnectionTrait>(
    db: &C,
    book_id: &str,
    genre: Vec<String>,
) -> Result<Vec<String>, DomainError> {
    BookGenreEntity::delete_many()
        .filter(BookGenreColumn::BookId.eq(book_id))
        .exec(db)
        .await?;

    let mut unique: Vec<String> = Vec::with_capacity(genre.len());
    for id in genre {
        if !unique.contains(&id) {
            unique.push(id);
        }
    }

    if unique.is_empty() {
        return Ok(unique);
    }

    let rows = unique.iter().map(|genre_id| BookGenreActiveModel {
        book_id: Set(book_id.to_string()),
        genre_id: Set(genre_id.clone()),
    });
    BookGenreEntity::insert_many(rows)
        .exec_without_returning(db)
        .await?;

    Ok(unique)
}

#[async_trait]
impl BookRepository for SeaOrmBookRepository {
    async fn find_all(&self) -> Result<Vec<BookWithAuthor>, DomainError> {
        let rows = BookEntity::find()
            .find_also_related(AuthorEntity)
            .order_by_asc(Column::Title)
            .all(&self.db)
            .await?;

        let ids = rows.iter().map(|(book, _)| book.id.clone()).collect();
        let mut genres = genre_ids_by_book(&self.db, ids).await?;

        rows.into_iter()
            .map(|(book, author)| {
                let genre = genres.remove(&book.id).unwrap_or_default();
                Ok(BookWithAuthor {
                    book: to_book(book, genre),
                    author: author.map(to_author).transpose()?,
                })
            })
            .collect()
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<BookDetail>, DomainError> {
        let Some(model) = BookEntity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let author = model.find_related(AuthorEntity).one(&self.db).await?;
        let genres = model
            .find_related(GenreEntity)
            .order_by_asc(GenreColumn::Name)
            .all(&self.db)
            .await?;
        let genre_ids = genre_ids_by_book(&self.db, vec![model.id.clone()])
            .await?
            .remove(&model.id)
            .unwrap_or_default();

        Ok(Some(BookDetail {
            book: to_book(model, genre_ids),
            author: author.map(to_author).transpose()?,
            genres: genres.into_iter().map(to_genre).collect(),
        }))
    }

    async fn find_by_author(&self, author_id: &str) -> Result<Vec<Book>, DomainError> {
        let books = BookEntity::find()
            .filter(Column::AuthorId.eq(author_id))
            .order_by_asc(Column::Title)
            .all(&self.db)
            .await?;

        to_books(&self.db, books).await
    }

    async fn find_by_genre(&self, genre_id: &str) -> Result<Vec<Book>, DomainError> {
        let book_ids: Vec<String> = BookGenreEntity::find()
            .filter(BookGenreColumn::GenreId.eq(genre_id))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|row| row.book_id)
            .collect();

        if book_ids.is_empty() {
            return Ok(Vec::new());
        }

        let books = BookEntity::find()
            .filter(Column::Id.is_in(book_ids))
            .order_by_asc(Column::Title)
            .all(&self.db)
            .await?;

        to_books(&self.db, books).await
    }

    async fn create(&self, input: BookInput) -> Result<Book, DomainError> {
        let now = now();
        let txn = self.db.begin().await?;

        let book = ActiveModel {
            id: Set(new_id()),
            title: Set(input.title),
            author_id: Set(input.author),
            summary: Set(input.summary),
            isbn: Set(input.isbn),
            created_at: Set(now.clone()),
            updated_at: Set(now),
        };
        let model = book.insert(&txn).await?;
        let genre = replace_genres(&txn, &model.id, input.genre).await?;

        txn.commit().await?;

        Ok(to_book(model, genre))
    }

    async fn update(&self, id: &str, input: BookInput) -> Result<Book, DomainError> {
        let txn = self.db.begin().await?;

        let existing = BookEntity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(DomainError::NotFound)?;

        let mut active = existing.into_active_model();
        active.title = Set(input.title);
        active.author_id = Set(input.author);
        active.summary = Set(input.summary);
        active.isbn = Set(input.isbn);
        active.updated_at = Set(now());

        let model = active.update(&txn).await?;
        let genre = replace_genres(&txn, &model.id, input.genre).await?;

        txn.commit().await?;

        Ok(to_book(model, genre))
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        let txn = self.db.begin().await?;

        BookGenreEntity::delete_many()
            .filter(BookGenreColumn::BookId.eq(id))
            .exec(&txn)
            .await?;
        let result = BookEntity::delete_by_id(id).exec(&txn).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound);
        }

        txn.commit().await?;
        Ok(())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(BookEntity::find().count(&self.db).await?)
    }
}
