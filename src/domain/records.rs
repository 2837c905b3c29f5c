//! Catalog records and the form inputs that produce them
//!
//! Records carry the identifiers assigned by the store. Inputs are the
//! sanitized form values a record is built from; they serialize with the same
//! field names as the records so a form can be re-rendered from either.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

/// Display format shared by every formatted date ("May 1, 2024")
pub const DISPLAY_DATE_FORMAT: &str = "%B %-d, %Y";

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(DISPLAY_DATE_FORMAT).to_string())
        .unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Author {
    pub id: String,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl Author {
    pub fn name(&self) -> String {
        format!("{}, {}", self.family_name, self.first_name)
    }

    /// Empty when neither date is known
    pub fn lifespan(&self) -> String {
        if self.date_of_birth.is_none() && self.date_of_death.is_none() {
            return String::new();
        }
        format!(
            "{} - {}",
            format_date(self.date_of_birth),
            format_date(self.date_of_death)
        )
    }

    pub fn url(&self) -> String {
        format!("/catalog/author/{}", self.id)
    }
}

impl Serialize for Author {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Author", 8)?;
        s.serialize_field("id", &self.id)?;
        s.serialize_field("first_name", &self.first_name)?;
        s.serialize_field("family_name", &self.family_name)?;
        s.serialize_field("date_of_birth", &self.date_of_birth)?;
        s.serialize_field("date_of_death", &self.date_of_death)?;
        s.serialize_field("name", &self.name())?;
        s.serialize_field("lifespan", &self.lifespan())?;
        s.serialize_field("url", &self.url())?;
        s.end()
    }
}

/// Sanitized author form values
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AuthorInput {
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl From<&Author> for AuthorInput {
    fn from(author: &Author) -> Self {
        Self {
            first_name: author.first_name.clone(),
            family_name: author.family_name.clone(),
            date_of_birth: author.date_of_birth,
            date_of_death: author.date_of_death,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    pub id: String,
    pub title: String,
    /// Id of the referenced Author
    pub author: String,
    pub summary: String,
    pub isbn: String,
    /// Ids of the referenced Genres
    pub genre: Vec<String>,
}

impl Book {
    pub fn url(&self) -> String {
        format!("/catalog/book/{}", self.id)
    }
}

impl Serialize for Book {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Book", 7)?;
        s.serialize_field("id", &self.id)?;
        s.serialize_field("title", &self.title)?;
        s.serialize_field("author", &self.author)?;
        s.serialize_field("summary", &self.summary)?;
        s.serialize_field("isbn", &self.isbn)?;
        s.serialize_field("genre", &self.genre)?;
        s.serialize_field("url", &self.url())?;
        s.end()
    }
}

/// Sanitized book form values
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BookInput {
    pub title: String,
    pub author: String,
    pub summary: String,
    pub isbn: String,
    pub genre: Vec<String>,
}

impl From<&Book> for BookInput {
    fn from(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            summary: book.summary.clone(),
            isbn: book.isbn.clone(),
            genre: book.genre.clone(),
        }
    }
}

/// A book with its author reference populated
#[derive(Debug, Clone, Serialize)]
pub struct BookWithAuthor {
    #[serde(flatten)]
    pub book: Book,
    /// `None` when the referenced author no longer exists
    #[serde(rename = "author_record")]
    pub author: Option<Author>,
}

/// A book with both its author and genre references populated
#[derive(Debug, Clone, Serialize)]
pub struct BookDetail {
    #[serde(flatten)]
    pub book: Book,
    #[serde(rename = "author_record")]
    pub author: Option<Author>,
    #[serde(rename = "genre_records")]
    pub genres: Vec<Genre>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Genre {
    pub id: String,
    pub name: String,
}

impl Genre {
    pub fn url(&self) -> String {
        format!("/catalog/genre/{}", self.id)
    }
}

impl Serialize for Genre {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Genre", 3)?;
        s.serialize_field("id", &self.id)?;
        s.serialize_field("name", &self.name)?;
        s.serialize_field("url", &self.url())?;
        s.end()
    }
}

/// Sanitized genre form values
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GenreInput {
    pub name: String,
}

/// A genre with the books that reference it
#[derive(Debug, Clone, Serialize)]
pub struct GenreWithBooks {
    #[serde(flatten)]
    pub genre: Genre,
    pub books: Vec<Book>,
}

/// Genre entry of a selection list, `checked` when the book references it
#[derive(Debug, Clone, Serialize)]
pub struct GenreChoice {
    #[serde(flatten)]
    pub genre: Genre,
    pub checked: bool,
}

impl GenreChoice {
    /// Marks every genre whose id appears in `selected`.
    pub fn mark(genres: Vec<Genre>, selected: &[String]) -> Vec<GenreChoice> {
        genres
            .into_iter()
            .map(|genre| {
                let checked = selected.iter().any(|id| *id == genre.id);
                GenreChoice { genre, checked }
            })
            .collect()
    }
}

/// Availability of a physical copy. Any value may follow any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BookInstanceStatus {
    Available,
    #[default]
    Maintenance,
    Loaned,
    Reserved,
}

impl BookInstanceStatus {
    pub const ALL: [BookInstanceStatus; 4] = [
        BookInstanceStatus::Available,
        BookInstanceStatus::Maintenance,
        BookInstanceStatus::Loaned,
        BookInstanceStatus::Reserved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookInstanceStatus::Available => "Available",
            BookInstanceStatus::Maintenance => "Maintenance",
            BookInstanceStatus::Loaned => "Loaned",
            BookInstanceStatus::Reserved => "Reserved",
        }
    }
}

impl fmt::Display for BookInstanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown book instance status '{}'", self.0)
    }
}

impl std::error::Error for UnknownStatus {}

impl FromStr for BookInstanceStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BookInstance {
    pub id: String,
    /// Id of the referenced Book
    pub book: String,
    pub imprint: String,
    pub status: BookInstanceStatus,
    pub due_back: NaiveDate,
}

impl BookInstance {
    pub fn url(&self) -> String {
        format!("/catalog/bookinstance/{}", self.id)
    }

    pub fn due_back_formatted(&self) -> String {
        format_date(Some(self.due_back))
    }
}

impl Serialize for BookInstance {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("BookInstance", 7)?;
        s.serialize_field("id", &self.id)?;
        s.serialize_field("book", &self.book)?;
        s.serialize_field("imprint", &self.imprint)?;
        s.serialize_field("status", &self.status)?;
        s.serialize_field("due_back", &self.due_back)?;
        s.serialize_field("due_back_formatted", &self.due_back_formatted())?;
        s.serialize_field("url", &self.url())?;
        s.end()
    }
}

/// Sanitized book instance form values
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BookInstanceInput {
    pub book: String,
    pub imprint: String,
    pub status: BookInstanceStatus,
    /// Stored as today's date when absent
    pub due_back: Option<NaiveDate>,
}

impl From<&BookInstance> for BookInstanceInput {
    fn from(instance: &BookInstance) -> Self {
        Self {
            book: instance.book.clone(),
            imprint: instance.imprint.clone(),
            status: instance.status,
            due_back: Some(instance.due_back),
        }
    }
}

/// A book instance with its book reference populated
#[derive(Debug, Clone, Serialize)]
pub struct BookInstanceWithBook {
    #[serde(flatten)]
    pub instance: BookInstance,
    #[serde(rename = "book_record")]
    pub book: Option<Book>,
}
