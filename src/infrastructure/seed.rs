//! Demo catalog for local development

use chrono::NaiveDate;

use crate::domain::{
    AuthorInput, BookInput, BookInstanceInput, BookInstanceStatus, DomainError, GenreInput,
};
use crate::infrastructure::AppState;

struct DemoBook {
    title: &'static str,
    author: usize,
    summary: &'static str,
    isbn: &'static str,
    genres: &'static [usize],
}

const AUTHORS: &[(&str, &str, Option<(i32, u32, u32)>, Option<(i32, u32, u32)>)] = &[
    ("Patrick", "Rothfuss", Some((1973, 6, 6)), None),
    ("Ben", "Bova", Some((1932, 11, 8)), Some((2020, 11, 29))),
    ("Isaac", "Asimov", Some((1920, 1, 2)), Some((1992, 4, 6))),
    ("Bob", "Billings", None, None),
    ("Jim", "Jones", Some((1971, 12, 16)), None),
];

const GENRES: &[&str] = &["Fantasy", "Science Fiction", "French Poetry"];

const BOOKS: &[DemoBook] = &[
    DemoBook {
        title: "The Name of the Wind (The Kingkiller Chronicle, #1)",
        author: 0,
        summary: "I have stolen princesses back from sleeping barrow kings.",
        isbn: "9781473211896",
        genres: &[0],
    },
    DemoBook {
        title: "The Wise Man's Fear (The Kingkiller Chronicle, #2)",
        author: 0,
        summary: "Picking up the tale of Kvothe Kingkiller once again.",
        isbn: "9788401352836",
        genres: &[0],
    },
    DemoBook {
        title: "Apes and Angels",
        author: 1,
        summary: "Humankind headed out to the stars not for conquest, nor exploration.",
        isbn: "9780765379528",
        genres: &[1],
    },
    DemoBook {
        title: "The Foundation",
        author: 2,
        summary: "A galactic empire in decline and the science that predicts its fall.",
        isbn: "9780553293357",
        genres: &[1],
    },
    DemoBook {
        title: "Test Book 1",
        author: 4,
        summary: "Summary of test book 1",
        isbn: "ISBN111111",
        genres: &[0, 1],
    },
];

const COPIES: &[(usize, &str, BookInstanceStatus, Option<(i32, u32, u32)>)] = &[
    (0, "London Gollancz, 2014.", BookInstanceStatus::Available, None),
    (1, "Gollancz, 2011.", BookInstanceStatus::Loaned, Some((2024, 5, 1))),
    (2, "New York Tom Doherty Associates, 2016.", BookInstanceStatus::Available, None),
    (3, "Bantam Spectra, 1991.", BookInstanceStatus::Maintenance, None),
    (4, "Imprint XXX2", BookInstanceStatus::Reserved, Some((2024, 6, 15))),
];

fn ymd(date: Option<(i32, u32, u32)>) -> Option<NaiveDate> {
    date.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d))
}

/// Fill an empty catalog with a few authors, genres, books and copies.
/// A catalog that already holds books is left untouched.
pub async fn seed_demo_data(state: &AppState) -> Result<(), DomainError> {
    if state.book_repo.count().await? > 0 {
        tracing::info!("Catalog already has books, skipping demo data");
        return Ok(());
    }

    let mut authors = Vec::with_capacity(AUTHORS.len());
    for (first_name, family_name, born, died) in AUTHORS {
        let author = state
            .author_repo
            .create(AuthorInput {
                first_name: first_name.to_string(),
                family_name: family_name.to_string(),
                date_of_birth: ymd(*born),
                date_of_death: ymd(*died),
            })
            .await?;
        authors.push(author.id);
    }

    let mut genres = Vec::with_capacity(GENRES.len());
    for name in GENRES {
        let genre = state
            .genre_repo
            .create(GenreInput { name: name.to_string() })
            .await?;
        genres.push(genre.id);
    }

    let mut books = Vec::with_capacity(BOOKS.len());
    for demo in BOOKS {
        let book = state
            .book_repo
            .create(BookInput {
                title: demo.title.to_string(),
                author: authors[demo.author].clone(),
                summary: demo.summary.to_string(),
                isbn: demo.isbn.to_string(),
                genre: demo.genres.iter().map(|&g| genres[g].clone()).collect(),
            })
            .await?;
        books.push(book.id);
    }

    for (book, imprint, status, due_back) in COPIES {
        state
            .instance_repo
            .create(BookInstanceInput {
                book: books[*book].clone(),
                imprint: imprint.to_string(),
                status: *status,
                due_back: ymd(*due_back),
            })
            .await?;
    }

    tracing::info!(
        "Seeded {} authors, {} genres, {} books and {} copies",
        authors.len(),
        genres.len(),
        books.len(),
        COPIES.len()
    );
    Ok(())
}
