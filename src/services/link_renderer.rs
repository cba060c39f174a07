use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::route::Operation;
use crate::utils::{escape_html, page_url};

static WIKI_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([a-zA-Z0-9]+)\]").expect("wiki link pattern is valid"));

/// Rewrites `[Word]` tokens in a page body into links to `/view/Word`
#[derive(Clone, Copy, Debug, Default)]
pub struct LinkRenderer;

impl LinkRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Render a raw body into HTML. Text outside of wiki links is escaped, so
    /// the result can be emitted without further escaping.
    pub fn render(&self, body: &[u8]) -> String {
        self.render_text(&String::from_utf8_lossy(body))
    }

    fn render_text(&self, body: &str) -> String {
        let mut html = String::with_capacity(body.len());
        let mut last = 0;

        for caps in WIKI_LINK.captures_iter(body) {
            let (Some(whole), Some(word)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            html.push_str(&escape_html(&body[last..whole.start()]));
            // word is alphanumeric, nothing to escape
            html.push_str(&format!(
                "<a href=\"{}\">{}</a>",
                page_url(Operation::View.as_str(), word.as_str()),
                word.as_str()
            ));
            last = whole.end();
        }
        html.push_str(&escape_html(&body[last..]));
        html
    }
}

/// Exposes the renderer to templates as `{{ body | wikilinks }}`; the output is marked safe
impl tera::Filter for LinkRenderer {
    fn filter(
        &self,
        value: &tera::Value,
        _args: &HashMap<String, tera::Value>,
    ) -> tera::Result<tera::Value> {
        let input = tera::from_value::<String>(value.clone())?;
        Ok(tera::to_value(self.render(input.as_bytes()))?)
    }

    fn is_safe(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(body: &str) -> String {
        LinkRenderer::new().render(body.as_bytes())
    }

    #[test]
    fn bracketed_word_becomes_link() {
        assert_eq!(render("[FooBar]"), "<a href=\"/view/FooBar\">FooBar</a>");
        assert_eq!(
            render("Hello [World]"),
            "Hello <a href=\"/view/World\">World</a>"
        );
    }

    #[test]
    fn adjacent_links_are_independent() {
        assert_eq!(
            render("[A][B2] and [c3]"),
            "<a href=\"/view/A\">A</a><a href=\"/view/B2\">B2</a> and <a href=\"/view/c3\">c3</a>"
        );
    }

    #[test]
    fn non_alphanumeric_brackets_are_left_alone() {
        assert_eq!(render("[foo-bar] [a b] [] [[x]"), "[foo-bar] [a b] [] [<a href=\"/view/x\">x</a>");
    }

    #[test]
    fn surrounding_text_is_escaped() {
        assert_eq!(
            render("<script>[Safe]</script>"),
            "&lt;script&gt;<a href=\"/view/Safe\">Safe</a>&lt;/script&gt;"
        );
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        assert_eq!(LinkRenderer::new().render(b"[Ok]\xff"), "<a href=\"/view/Ok\">Ok</a>\u{fffd}");
    }
}
