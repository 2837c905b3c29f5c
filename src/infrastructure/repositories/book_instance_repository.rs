//! SeaORM implementation of BookInstanceRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use super::book_repository::{genre_ids_by_book, to_book};
use super::{date_from_column, date_to_column, new_id, now};
use crate::domain::{
    Book, BookInstance, BookInstanceInput, BookInstanceRepository, BookInstanceStatus,
    BookInstanceWithBook, DomainError,
};
use crate::models::book::{Entity as BookEntity, Model as BookModel};
use crate::models::book_instance::{ActiveModel, Column, Entity as BookInstanceEntity, Model};

/// SeaORM-based implementation of BookInstanceRepository
pub struct SeaOrmBookInstanceRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookInstanceRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Populates the book reference of each copy
    async fn with_books(
        &self,
        rows: Vec<(Model, Option<BookModel>)>,
    ) -> Result<Vec<BookInstanceWithBook>, DomainError> {
        let book_ids = rows
            .iter()
            .filter_map(|(_, book)| book.as_ref().map(|b| b.id.clone()))
            .collect();
        let genres = genre_ids_by_book(&self.db, book_ids).await?;

        rows.into_iter()
            .map(|(instance, book)| {
                let book: Option<Book> = book.map(|b| {
                    let genre = genres.get(&b.id).cloned().unwrap_or_default();
                    to_book(b, genre)
                });
                Ok(BookInstanceWithBook {
                    instance: to_instance(instance)?,
                    book,
                })
            })
            .collect()
    }
}

fn to_instance(model: Model) -> Result<BookInstance, DomainError> {
    let status = model
        .status
        .parse::<BookInstanceStatus>()
        .map_err(|e| DomainError::Database(e.to_string()))?;

    Ok(BookInstance {
        due_back: date_from_column(&model.due_back)?,
        id: model.id,
        book: model.book_id,
        imprint: model.imprint,
        status,
    })
}

fn due_back_or_today(input: &BookInstanceInput) -> String {
    date_to_column(
        input
            .due_back
            .unwrap_or_else(|| chrono::Local::now().date_naive()),
    )
}

#[async_trait]
impl BookInstanceRepository for SeaOrmBookInstanceRepository {
    async fn find_all(&self) -> Result<Vec<BookInstanceWithBook>, DomainError> {
        let rows = BookInstanceEntity::find()
            .find_also_related(BookEntity)
            .order_by_asc(Column::DueBack)
            .all(&self.db)
            .await?;

        self.with_books(rows).await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<BookInstanceWithBook>, DomainError> {
        let row = BookInstanceEntity::find_by_id(id)
            .find_also_related(BookEntity)
            .one(&self.db)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };
        Ok(self.with_books(vec![row]).await?.pop())
    }

    async fn find_by_book(&self, book_id: &str) -> Result<Vec<BookInstance>, DomainError> {
        let copies = BookInstanceEntity::find()
            .filter(Column::BookId.eq(book_id))
            .order_by_asc(Column::DueBack)
            .all(&self.db)
            .await?;

        copies.into_iter().map(to_instance).collect()
    }

    async fn create(&self, input: BookInstanceInput) -> Result<BookInstance, DomainError> {
        let now = now();

        let new_copy = ActiveModel {
            id: Set(new_id()),
            due_back: Set(due_back_or_today(&input)),
            book_id: Set(input.book),
            imprint: Set(input.imprint),
            status: Set(input.status.to_string()),
            created_at: Set(now.clone()),
            updated_at: Set(now),
        };

        let result = new_copy.insert(&self.db).await?;
        to_instance(result)
    }

    async fn update(
        &self,
        id: &str,
        input: BookInstanceInput,
    ) -> Result<BookInstance, DomainError> {
        let existing = BookInstanceEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)?;

        let mut active = existing.into_active_model();
        active.due_back = Set(due_back_or_today(&input));
        active.book_id = Set(input.book);
        active.imprint = Set(input.imprint);
        active.status = Set(input.status.to_string());
        active.updated_at = Set(now());

        let result = active.update(&self.db).await?;
        to_instance(result)
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        let result = BookInstanceEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound);
        }

        Ok(())
    }

    async fn count(&self, status: Option<BookInstanceStatus>) -> Result<u64, DomainError> {
        let mut query = BookInstanceEntity::find();
        if let Some(status) = status {
            query = query.filter(Column::Status.eq(status.as_str()));
        }
        Ok(query.count(&self.db).await?)
    }
}
