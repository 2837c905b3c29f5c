//! View rendering
//!
//! Controllers hand a template name and a JSON context to a [`ViewRenderer`].
//! [`TemplateRenderer`] is the minijinja implementation, using the templates
//! embedded in the binary or, when configured, a directory of overrides.

use std::fmt;
use std::path::Path;

use minijinja::{AutoEscape, Environment};
use serde_json::Value;

/// Turns a template name plus data into HTML
pub trait ViewRenderer: Send + Sync {
    fn render(&self, template: &str, context: Value) -> Result<String, ViewError>;
}

#[derive(Debug)]
pub struct ViewError(minijinja::Error);

impl fmt::Display for ViewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Template error: {}", self.0)
    }
}

impl std::error::Error for ViewError {}

impl From<minijinja::Error> for ViewError {
    fn from(e: minijinja::Error) -> Self {
        ViewError(e)
    }
}

const EMBEDDED_TEMPLATES: &[(&str, &str)] = &[
    ("layout.html", include_str!("templates/layout.html")),
    ("error.html", include_str!("templates/error.html")),
    ("index.html", include_str!("templates/index.html")),
    ("author_list.html", include_str!("templates/author_list.html")),
    ("author_detail.html", include_str!("templates/author_detail.html")),
    ("author_form.html", include_str!("templates/author_form.html")),
    ("author_delete.html", include_str!("templates/author_delete.html")),
    ("book_list.html", include_str!("templates/book_list.html")),
    ("book_detail.html", include_str!("templates/book_detail.html")),
    ("book_form.html", include_str!("templates/book_form.html")),
    ("book_delete.html", include_str!("templates/book_delete.html")),
    ("genre_list.html", include_str!("templates/genre_list.html")),
    ("genre_detail.html", include_str!("templates/genre_detail.html")),
    ("genre_form.html", include_str!("templates/genre_form.html")),
    ("genre_delete.html", include_str!("templates/genre_delete.html")),
    ("bookinstance_list.html", include_str!("templates/bookinstance_list.html")),
    ("bookinstance_detail.html", include_str!("templates/bookinstance_detail.html")),
    ("bookinstance_form.html", include_str!("templates/bookinstance_form.html")),
    ("bookinstance_delete.html", include_str!("templates/bookinstance_delete.html")),
    ("form_errors.html", include_str!("templates/form_errors.html")),
];

/// minijinja-backed renderer. Template names are given without extension.
pub struct TemplateRenderer {
    env: Environment<'static>,
}

impl TemplateRenderer {
    /// Renderer over the templates compiled into the binary
    pub fn embedded() -> Result<Self, ViewError> {
        let mut env = Self::base_env();
        for (name, source) in EMBEDDED_TEMPLATES {
            env.add_template(*name, *source)?;
        }
        Ok(Self { env })
    }

    /// Renderer loading every template from `dir` on first use
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        let mut env = Self::base_env();
        env.set_loader(minijinja::path_loader(dir.as_ref()));
        Self { env }
    }

    fn base_env() -> Environment<'static> {
        let mut env = Environment::new();
        // Stored text is escaped by the form sanitizers
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env
    }
}

impl ViewRenderer for TemplateRenderer {
    fn render(&self, template: &str, context: Value) -> Result<String, ViewError> {
        let tmpl = self.env.get_template(&format!("{}.html", template))?;
        Ok(tmpl.render(context)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn embedded_templates_all_parse() {
        let renderer = TemplateRenderer::embedded().unwrap();
        for (name, _) in EMBEDDED_TEMPLATES {
            assert!(renderer.env.get_template(name).is_ok(), "{} failed", name);
        }
    }

    #[test]
    fn renders_error_page() {
        let renderer = TemplateRenderer::embedded().unwrap();
        let html = renderer
            .render(
                "error",
                json!({"message": "Book not found", "status": 404, "error": null}),
            )
            .unwrap();
        assert!(html.contains("Book not found"));
        assert!(html.contains("404"));
    }

    #[test]
    fn unknown_template_is_an_error() {
        let renderer = TemplateRenderer::embedded().unwrap();
        assert!(renderer.render("missing", json!({})).is_err());
    }
}
