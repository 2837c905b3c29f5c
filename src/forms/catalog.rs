//! Submission pipelines for the four catalog forms.

use super::validation::{FieldError, FieldRule, validate};
use super::{FormData, Submission, sanitize};
use crate::domain::{AuthorInput, BookInput, BookInstanceInput, BookInstanceStatus, GenreInput};

const AUTHOR_RULES: &[FieldRule] = &[
    FieldRule::required("first_name", "First name must be specified."),
    FieldRule::required("family_name", "Family name must be specified."),
    FieldRule::optional_date("date_of_birth", "Invalid date of birth"),
    FieldRule::optional_date("date_of_death", "Invalid date of death"),
];

const BOOK_RULES: &[FieldRule] = &[
    FieldRule::required("title", "Title must not be empty."),
    FieldRule::required("author", "Author must not be empty."),
    FieldRule::required("summary", "Summary must not be empty."),
    FieldRule::required("isbn", "ISBN must not be empty"),
];

const GENRE_RULES: &[FieldRule] = &[FieldRule::required("name", "Genre name required")];

const BOOK_INSTANCE_RULES: &[FieldRule] = &[
    FieldRule::required("book", "Book must be specified"),
    FieldRule::required("imprint", "Imprint must be specified"),
    FieldRule::optional_date("due_back", "Invalid date"),
];

pub fn parse_author(form: &FormData) -> Submission<AuthorInput> {
    let errors = validate(form, AUTHOR_RULES);

    let value = AuthorInput {
        first_name: sanitize::text(form.get("first_name")),
        family_name: sanitize::text(form.get("family_name")),
        date_of_birth: sanitize::date(form.get("date_of_birth")),
        date_of_death: sanitize::date(form.get("date_of_death")),
    };

    Submission { value, errors }
}

pub fn parse_book(form: &FormData) -> Submission<BookInput> {
    // The checkbox set arrives missing, once, or repeated
    let genre = form.value("genre").into_sequence();

    let errors = validate(form, BOOK_RULES);

    let value = BookInput {
        title: sanitize::text(form.get("title")),
        author: sanitize::text(form.get("author")),
        summary: sanitize::text(form.get("summary")),
        isbn: sanitize::text(form.get("isbn")),
        genre: genre
            .iter()
            .map(|id| sanitize::text(Some(id)))
            .filter(|id| !id.is_empty())
            .collect(),
    };

    Submission { value, errors }
}

pub fn parse_genre(form: &FormData) -> Submission<GenreInput> {
    let errors = validate(form, GENRE_RULES);

    let value = GenreInput {
        name: sanitize::text(form.get("name")),
    };

    Submission { value, errors }
}

pub fn parse_book_instance(form: &FormData) -> Submission<BookInstanceInput> {
    let mut errors = validate(form, BOOK_INSTANCE_RULES);

    let raw_status = sanitize::text(form.get("status"));
    let status = if raw_status.is_empty() {
        BookInstanceStatus::default()
    } else {
        match raw_status.parse() {
            Ok(status) => status,
            Err(_) => {
                errors.push(FieldError {
                    param: "status".to_string(),
                    msg: "Invalid status".to_string(),
                    value: raw_status,
                });
                BookInstanceStatus::default()
            }
        }
    };

    let value = BookInstanceInput {
        book: sanitize::text(form.get("book")),
        imprint: sanitize::text(form.get("imprint")),
        status,
        due_back: sanitize::date(form.get("due_back")),
    };

    Submission { value, errors }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn form(pairs: &[(&str, &str)]) -> FormData {
        FormData::from(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<Vec<_>>(),
        )
    }

    #[test]
    fn author_without_first_name_is_rejected_but_sanitized() {
        let submission = parse_author(&form(&[
            ("first_name", "  "),
            ("family_name", " O'Brien "),
            ("date_of_birth", "1900-01-01"),
        ]));

        assert!(!submission.is_valid());
        assert_eq!(submission.errors.len(), 1);
        assert_eq!(submission.errors[0].msg, "First name must be specified.");
        assert_eq!(submission.value.family_name, "O&#x27;Brien");
        assert_eq!(
            submission.value.date_of_birth,
            NaiveDate::from_ymd_opt(1900, 1, 1)
        );
    }

    #[test]
    fn author_rejects_malformed_dates() {
        let submission = parse_author(&form(&[
            ("first_name", "Ann"),
            ("family_name", "Leckie"),
            ("date_of_death", "yesterday"),
        ]));

        let messages: Vec<_> = submission.errors.iter().map(|e| e.msg.as_str()).collect();
        assert_eq!(messages, vec!["Invalid date of death"]);
        assert_eq!(submission.value.date_of_death, None);
    }

    #[test]
    fn book_genre_is_always_a_sequence() {
        let base = [
            ("title", "Dune"),
            ("author", "a1"),
            ("summary", "Spice"),
            ("isbn", "9780441013593"),
        ];

        let none = parse_book(&form(&base));
        assert!(none.is_valid());
        assert!(none.value.genre.is_empty());

        let mut one = base.to_vec();
        one.push(("genre", "g1"));
        assert_eq!(parse_book(&form(&one)).value.genre, vec!["g1"]);

        let mut many = one.clone();
        many.push(("genre", "g2"));
        assert_eq!(parse_book(&form(&many)).value.genre, vec!["g1", "g2"]);
    }

    #[test]
    fn book_reports_every_missing_field() {
        let submission = parse_book(&form(&[("genre", "<g>")]));

        assert_eq!(submission.errors.len(), 4);
        assert_eq!(submission.value.genre, vec!["&lt;g&gt;"]);
    }

    #[test]
    fn genre_name_is_required() {
        assert!(!parse_genre(&form(&[("name", "")])).is_valid());

        let submission = parse_genre(&form(&[("name", " Science Fiction ")]));
        assert!(submission.is_valid());
        assert_eq!(submission.value.name, "Science Fiction");
    }

    #[test]
    fn book_instance_status_defaults_and_rejects_unknown() {
        let ok = parse_book_instance(&form(&[("book", "b1"), ("imprint", "Gollancz, 2011")]));
        assert!(ok.is_valid());
        assert_eq!(ok.value.status, BookInstanceStatus::Maintenance);
        assert_eq!(ok.value.imprint, "Gollancz, 2011");
        assert_eq!(ok.value.due_back, None);

        let bad = parse_book_instance(&form(&[
            ("book", "b1"),
            ("imprint", "Gollancz"),
            ("status", "Lost"),
            ("due_back", "2024-05-01"),
        ]));
        assert_eq!(bad.errors.len(), 1);
        assert_eq!(bad.errors[0].param, "status");
        assert_eq!(bad.value.due_back, NaiveDate::from_ymd_opt(2024, 5, 1));
    }
}
