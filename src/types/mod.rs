use std::sync::Arc;

use crate::components::TemplateComponent;
use crate::services::PageStore;

/// Reserved title of the page served at `/`
pub const FRONT_PAGE: &str = "FrontPage";

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<PageStore>,
    pub templates: Arc<TemplateComponent>,
}

impl AppState {
    pub fn new(store: PageStore, templates: TemplateComponent) -> Self {
        Self {
            store: Arc::new(store),
            templates: Arc::new(templates),
        }
    }
}

/// A wiki page. `body` is `None` when no file backs the page yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub title: String,
    pub body: Option<Vec<u8>>,
}

impl Page {
    /// A page that has not been saved yet
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into(), body: None }
    }

    pub fn with_body(title: impl Into<String>, body: Vec<u8>) -> Self {
        Self { title: title.into(), body: Some(body) }
    }

    pub fn body_bytes(&self) -> &[u8] {
        self.body.as_deref().unwrap_or_default()
    }

    /// Computed on demand, never persisted
    pub fn is_front_page(&self) -> bool {
        self.title.is_empty() || self.title.eq_ignore_ascii_case(FRONT_PAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn front_page_flag_ignores_case() {
        assert!(Page::new("FrontPage").is_front_page());
        assert!(Page::new("frontpage").is_front_page());
        assert!(Page::new("FRONTPAGE").is_front_page());
        assert!(Page::new("").is_front_page());
        assert!(!Page::new("FrontPages").is_front_page());
        assert!(!Page::new("Other").is_front_page());
    }

    #[test]
    fn missing_body_reads_as_empty() {
        assert_eq!(Page::new("Draft").body_bytes(), b"");
        assert_eq!(Page::with_body("Note", b"hi".to_vec()).body_bytes(), b"hi");
    }
}
