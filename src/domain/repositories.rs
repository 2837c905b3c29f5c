//! Repository trait definitions
//!
//! These traits define the record store contract.
//! Implementations live in the infrastructure layer.

use async_trait::async_trait;

use super::DomainError;
use super::records::*;

/// Repository trait for Author records
#[async_trait]
pub trait AuthorRepository: Send + Sync {
    /// Find all authors ordered by family name
    async fn find_all(&self) -> Result<Vec<Author>, DomainError>;

    /// Find an author by ID
    async fn find_by_id(&self, id: &str) -> Result<Option<Author>, DomainError>;

    /// Create a new author
    async fn create(&self, input: AuthorInput) -> Result<Author, DomainError>;

    /// Overwrite the author stored under `id`
    async fn update(&self, id: &str, input: AuthorInput) -> Result<Author, DomainError>;

    /// Delete an author by ID
    async fn delete(&self, id: &str) -> Result<(), DomainError>;

    async fn count(&self) -> Result<u64, DomainError>;
}

/// Repository trait for Book records
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Find all books with their author populated
    async fn find_all(&self) -> Result<Vec<BookWithAuthor>, DomainError>;

    /// Find a single book by ID, author and genres populated
    async fn find_by_id(&self, id: &str) -> Result<Option<BookDetail>, DomainError>;

    /// Find the books written by an author
    async fn find_by_author(&self, author_id: &str) -> Result<Vec<Book>, DomainError>;

    /// Find the books referencing a genre
    async fn find_by_genre(&self, genre_id: &str) -> Result<Vec<Book>, DomainError>;

    /// Create a new book together with its genre references
    async fn create(&self, input: BookInput) -> Result<Book, DomainError>;

    /// Overwrite the book stored under `id`, genre references included
    async fn update(&self, id: &str, input: BookInput) -> Result<Book, DomainError>;

    /// Delete a book by ID
    async fn delete(&self, id: &str) -> Result<(), DomainError>;

    async fn count(&self) -> Result<u64, DomainError>;
}

/// Repository trait for Genre records
#[async_trait]
pub trait GenreRepository: Send + Sync {
    /// Find all genres ordered by name
    async fn find_all(&self) -> Result<Vec<Genre>, DomainError>;

    /// Find all genres with the books referencing each
    async fn find_all_with_books(&self) -> Result<Vec<GenreWithBooks>, DomainError>;

    /// Find a genre by ID
    async fn find_by_id(&self, id: &str) -> Result<Option<Genre>, DomainError>;

    /// Find the genre with exactly this name (case-sensitive)
    async fn find_by_name(&self, name: &str) -> Result<Option<Genre>, DomainError>;

    /// Create a new genre
    async fn create(&self, input: GenreInput) -> Result<Genre, DomainError>;

    /// Overwrite the genre stored under `id`
    async fn update(&self, id: &str, input: GenreInput) -> Result<Genre, DomainError>;

    /// Delete a genre by ID
    async fn delete(&self, id: &str) -> Result<(), DomainError>;

    async fn count(&self) -> Result<u64, DomainError>;
}

/// Repository trait for BookInstance records
#[async_trait]
pub trait BookInstanceRepository: Send + Sync {
    /// Find all copies with their book populated
    async fn find_all(&self) -> Result<Vec<BookInstanceWithBook>, DomainError>;

    /// Find a copy by ID with its book populated
    async fn find_by_id(&self, id: &str) -> Result<Option<BookInstanceWithBook>, DomainError>;

    /// Find copies of a specific book
    async fn find_by_book(&self, book_id: &str) -> Result<Vec<BookInstance>, DomainError>;

    /// Create a new copy
    async fn create(&self, input: BookInstanceInput) -> Result<BookInstance, DomainError>;

    /// Overwrite the copy stored under `id`
    async fn update(&self, id: &str, input: BookInstanceInput)
    -> Result<BookInstance, DomainError>;

    /// Delete a copy
    async fn delete(&self, id: &str) -> Result<(), DomainError>;

    /// Count copies, restricted to one status when given
    async fn count(&self, status: Option<BookInstanceStatus>) -> Result<u64, DomainError>;
}
