//! Form handling: every create/update submission goes through the same
//! pipeline of normalize → validate + sanitize → branch on the result.
//!
//! [`FormData`] keeps the raw urlencoded pairs so repeated keys (checkbox
//! sets) survive, [`validation`] holds the declarative field rules,
//! [`sanitize`] the cleaning functions and [`catalog`] the per-record
//! pipelines producing a [`Submission`].

pub mod catalog;
pub mod sanitize;
pub mod validation;

pub use catalog::{parse_author, parse_book, parse_book_instance, parse_genre};
pub use validation::FieldError;

/// Raw `application/x-www-form-urlencoded` payload, repeated keys preserved
#[derive(Debug, Clone, Default)]
pub struct FormData {
    pairs: Vec<(String, String)>,
}

impl From<Vec<(String, String)>> for FormData {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }
}

impl FormData {
    /// First value submitted under `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Shape of the value(s) submitted under `name`
    pub fn value(&self, name: &str) -> FieldValue {
        let mut values: Vec<String> = self
            .pairs
            .iter()
            .filter(|(key, _)| key == name)
            .map(|(_, value)| value.clone())
            .collect();

        match values.len() {
            0 => FieldValue::Absent,
            1 => FieldValue::Single(values.remove(0)),
            _ => FieldValue::Many(values),
        }
    }
}

/// A form field may arrive missing, once, or repeated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Absent,
    Single(String),
    Many(Vec<String>),
}

impl FieldValue {
    /// Canonical sequence form: absent is empty, a single value is one element.
    pub fn into_sequence(self) -> Vec<String> {
        match self {
            FieldValue::Absent => Vec::new(),
            FieldValue::Single(value) => vec![value],
            FieldValue::Many(values) => values,
        }
    }
}

/// Sanitized form values plus whatever field errors the rules produced.
///
/// The value is always sanitized, valid or not, so a failed submission can
/// be shown back to the user safely.
#[derive(Debug, Clone)]
pub struct Submission<T> {
    pub value: T,
    pub errors: Vec<FieldError>,
}

impl<T> Submission<T> {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// `Ok` with the value when no rule failed, otherwise the value and errors
    pub fn into_result(self) -> Result<T, (T, Vec<FieldError>)> {
        if self.errors.is_empty() {
            Ok(self.value)
        } else {
            Err((self.value, self.errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(pairs: &[(&str, &str)]) -> FormData {
        FormData::from(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<Vec<_>>(),
        )
    }

    #[test]
    fn normalizes_field_shapes_to_sequences() {
        let data = form(&[("genre", "a"), ("title", "t"), ("genre", "b")]);

        assert_eq!(data.value("missing").into_sequence(), Vec::<String>::new());
        assert_eq!(data.value("title"), FieldValue::Single("t".to_string()));
        assert_eq!(data.value("title").into_sequence(), vec!["t"]);
        assert_eq!(data.value("genre").into_sequence(), vec!["a", "b"]);
    }

    #[test]
    fn get_returns_first_value() {
        let data = form(&[("genre", "a"), ("genre", "b")]);
        assert_eq!(data.get("genre"), Some("a"));
        assert_eq!(data.get("title"), None);
    }
}
