//! Page templates.
//!
//! Templates are embedded at compile time and registered once at startup.
//! Registered templates double as partials, so shared chrome (header,
//! footer, section blocks, the debug panel) lives in its own template and
//! is pulled in with `{{> name}}`.

use beacon_core::AppError;
use handlebars::Handlebars;
use serde::Serialize;

const TEMPLATES: &[(&str, &str)] = &[
    ("header", include_str!("templates/header.hbs")),
    ("footer", include_str!("templates/footer.hbs")),
    ("debug", include_str!("templates/debug.hbs")),
    ("news_section", include_str!("templates/news_section.hbs")),
    (
        "publications_section",
        include_str!("templates/publications_section.hbs"),
    ),
    (
        "resources_section",
        include_str!("templates/resources_section.hbs"),
    ),
    ("home", include_str!("templates/home.hbs")),
    ("news", include_str!("templates/news.hbs")),
    ("publications", include_str!("templates/publications.hbs")),
    ("resources", include_str!("templates/resources.hbs")),
    ("detail", include_str!("templates/detail.hbs")),
    ("page", include_str!("templates/page.hbs")),
    ("not_found", include_str!("templates/not_found.hbs")),
];

/// Compiled template registry.
pub struct Views {
    engine: Handlebars<'static>,
}

impl Views {
    pub fn new() -> Result<Self, AppError> {
        let mut engine = Handlebars::new();
        engine.register_escape_fn(handlebars::html_escape);
        for (name, source) in TEMPLATES {
            engine
                .register_template_string(name, *source)
                .map_err(|e| AppError::TemplateError(format!("{}: {}", name, e)))?;
        }
        Ok(Self { engine })
    }

    pub fn render<T: Serialize>(&self, name: &str, context: &T) -> Result<String, AppError> {
        self.engine
            .render(name, context)
            .map_err(|e| AppError::TemplateError(e.to_string()))
    }
}
