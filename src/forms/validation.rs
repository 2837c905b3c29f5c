//! Declarative per-field validation rules.

use serde::Serialize;

use super::FormData;
use super::sanitize;

/// A failed rule, shown next to the form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub param: String,
    pub msg: String,
    /// Submitted value, trimmed and escaped
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    /// At least this many characters once trimmed; a missing field has none
    MinLength(usize),
    /// Empty or missing passes, anything else must be an ISO-8601 date
    OptionalIso8601,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub field: &'static str,
    pub check: Check,
    pub message: &'static str,
}

impl FieldRule {
    pub const fn required(field: &'static str, message: &'static str) -> Self {
        Self {
            field,
            check: Check::MinLength(1),
            message,
        }
    }

    pub const fn optional_date(field: &'static str, message: &'static str) -> Self {
        Self {
            field,
            check: Check::OptionalIso8601,
            message,
        }
    }

    fn passes(&self, value: Option<&str>) -> bool {
        match self.check {
            Check::MinLength(min) => value.unwrap_or_default().trim().chars().count() >= min,
            Check::OptionalIso8601 => match value {
                None | Some("") => true,
                Some(v) => sanitize::parse_iso8601(v).is_some(),
            },
        }
    }
}

/// Runs every rule against the form, in order, collecting the failures.
pub fn validate(form: &FormData, rules: &[FieldRule]) -> Vec<FieldError> {
    rules
        .iter()
        .filter_map(|rule| {
            let value = form.get(rule.field);
            (!rule.passes(value)).then(|| FieldError {
                param: rule.field.to_string(),
                msg: rule.message.to_string(),
                value: sanitize::text(value),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const RULES: &[FieldRule] = &[
        FieldRule::required("name", "Name required"),
        FieldRule::optional_date("born", "Invalid date"),
    ];

    fn form(pairs: &[(&str, &str)]) -> FormData {
        FormData::from(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<Vec<_>>(),
        )
    }

    #[test]
    fn whitespace_only_is_empty() {
        let errors = validate(&form(&[("name", "   ")]), RULES);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].param, "name");
        assert_eq!(errors[0].msg, "Name required");
    }

    #[test]
    fn optional_date_skips_blank_values() {
        assert!(validate(&form(&[("name", "x"), ("born", "")]), RULES).is_empty());
        assert!(validate(&form(&[("name", "x")]), RULES).is_empty());

        let errors = validate(&form(&[("name", "x"), ("born", "<soon>")]), RULES);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].value, "&lt;soon&gt;");
    }
}
