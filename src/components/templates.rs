use std::path::Path;

use log::{debug, info};
use serde::Serialize;
use tera::Tera;

use crate::errors::WikiError;
use crate::services::LinkRenderer;
use crate::types::Page;

/// The two page views the wiki knows how to render
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    View,
    Edit,
}

impl View {
    pub fn template_name(self) -> &'static str {
        match self {
            View::View => "view.html",
            View::Edit => "edit.html",
        }
    }
}

/// What a template sees of a page
#[derive(Serialize)]
struct PageContext<'a> {
    title: &'a str,
    body: String,
    is_front: bool,
}

/// Parsed template set, built once at startup and shared read-only
pub struct TemplateComponent {
    tera: Tera,
}

impl TemplateComponent {
    /// Parse every `*.html` file in `dir`. Both `view.html` and `edit.html` must exist.
    pub fn load(dir: &Path) -> Result<Self, WikiError> {
        let pattern = dir.join("*.html");
        let tera = Tera::new(&pattern.to_string_lossy())?;
        let component = Self::from_tera(tera)?;
        info!("Loaded templates from {:?}", dir);
        Ok(component)
    }

    /// Build from in-memory `(name, source)` pairs
    pub fn from_raw(templates: &[(&str, &str)]) -> Result<Self, WikiError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(templates.iter().copied())?;
        Self::from_tera(tera)
    }

    fn from_tera(mut tera: Tera) -> Result<Self, WikiError> {
        for view in [View::View, View::Edit] {
            let name = view.template_name();
            if !tera.get_template_names().any(|n| n == name) {
                return Err(WikiError::Template(format!("template '{}' not found", name)));
            }
        }
        tera.register_filter("wikilinks", LinkRenderer::new());
        debug!("Templates: {:?}", tera.get_template_names().collect::<Vec<_>>());
        Ok(Self { tera })
    }

    /// Render `view` for `page`
    pub fn render(&self, view: View, page: &Page) -> Result<String, WikiError> {
        let context = PageContext {
            title: &page.title,
            body: String::from_utf8_lossy(page.body_bytes()).into_owned(),
            is_front: page.is_front_page(),
        };
        let context = tera::Context::from_serialize(&context)?;
        Ok(self.tera.render(view.template_name(), &context)?)
    }
}
