pub mod author;
pub mod book;
pub mod book_genres;
pub mod book_instance;
pub mod genre;
