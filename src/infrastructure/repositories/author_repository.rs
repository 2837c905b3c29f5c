//! SeaORM implementation of AuthorRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, PaginatorTrait,
    QueryOrder, Set,
};

use super::{date_to_column, new_id, now, optional_date_from_column};
use crate::domain::{Author, AuthorInput, AuthorRepository, DomainError};
use crate::models::author::{ActiveModel, Column, Entity as AuthorEntity, Model};

/// SeaORM-based implementation of AuthorRepository
pub struct SeaOrmAuthorRepository {
    db: DatabaseConnection,
}

impl SeaOrmAuthorRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

pub(crate) fn to_author(model: Model) -> Result<Author, DomainError> {
    Ok(Author {
        date_of_birth: optional_date_from_column(model.date_of_birth.as_deref())?,
        date_of_death: optional_date_from_column(model.date_of_death.as_deref())?,
        id: model.id,
        first_name: model.first_name,
        family_name: model.family_name,
    })
}

#[async_trait]
impl AuthorRepository for SeaOrmAuthorRepository {
    async fn find_all(&self) -> Result<Vec<Author>, DomainError> {
        let authors = AuthorEntity::find()
            .order_by_asc(Column::FamilyName)
            .all(&self.db)
            .await?;

        authors.into_iter().map(to_author).collect()
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Author>, DomainError> {
        let author = AuthorEntity::find_by_id(id).one(&self.db).await?;

        author.map(to_author).transpose()
    }

    async fn create(&self, input: AuthorInput) -> Result<Author, DomainError> {
        let now = now();

        let author = ActiveModel {
            id: Set(new_id()),
            first_name: Set(input.first_name),
            family_name: Set(input.family_name),
            date_of_birth: Set(input.date_of_birth.map(date_to_column)),
            date_of_death: Set(input.date_of_death.map(date_to_column)),
            created_at: Set(now.clone()),
            updated_at: Set(now),
        };

        let result = author.insert(&self.db).await?;
        to_author(result)
    }

    async fn update(&self, id: &str, input: AuthorInput) -> Result<Author, DomainError> {
        let existing = AuthorEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)?;

        let mut active = existing.into_active_model();
        active.first_name = Set(input.first_name);
        active.family_name = Set(input.family_name);
        active.date_of_birth = Set(input.date_of_birth.map(date_to_column));
        active.date_of_death = Set(input.date_of_death.map(date_to_column));
        active.updated_at = Set(now());

        let result = active.update(&self.db).await?;
        to_author(result)
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        let result = AuthorEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound);
        }

        Ok(())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(AuthorEntity::find().count(&self.db).await?)
    }
}
