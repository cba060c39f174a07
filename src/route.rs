use percent_encoding::percent_decode_str;

use crate::errors::WikiError;

/// The three title-addressed page operations
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    View,
    Edit,
    Save,
}

impl Operation {
    pub const ALL: [Operation; 3] = [Operation::View, Operation::Edit, Operation::Save];

    pub fn as_str(self) -> &'static str {
        match self {
            Operation::View => "view",
            Operation::Edit => "edit",
            Operation::Save => "save",
        }
    }
}

/// Match `^/(view|edit|save)/([a-zA-Z0-9]+)$` without a regex engine.
pub fn match_path(path: &str) -> Option<(Operation, &str)> {
    let rest = path.strip_prefix('/')?;
    Operation::ALL.into_iter().find_map(|op| {
        let title = rest.strip_prefix(op.as_str())?.strip_prefix('/')?;
        is_valid_title(title).then_some((op, title))
    })
}

pub fn is_valid_title(title: &str) -> bool {
    !title.is_empty() && title.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// Title addressed by the raw request `path`, or `NotFound` unless the whole
/// percent-decoded path matches and names `expected`.
pub fn title_for(expected: Operation, path: &str) -> Result<String, WikiError> {
    let decoded = percent_decode_str(path).decode_utf8().ok();
    match decoded.as_deref().and_then(match_path) {
        Some((op, title)) if op == expected => Ok(title.to_string()),
        _ => {
            log::debug!("No {} route for '{}'", expected.as_str(), path);
            Err(WikiError::NotFound)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_each_operation() {
        assert_eq!(match_path("/view/Abc123"), Some((Operation::View, "Abc123")));
        assert_eq!(match_path("/edit/x"), Some((Operation::Edit, "x")));
        assert_eq!(match_path("/save/FrontPage"), Some((Operation::Save, "FrontPage")));
    }

    #[test]
    fn rejects_anything_else() {
        for path in [
            "/view/abc-123",
            "/edit/",
            "/view",
            "/view/a/b",
            "/view/a/",
            "/view/a.txt",
            "/view/..",
            "/delete/Page",
            "/viewer/Page",
            "view/Page",
            "/",
            "",
            "/view/Ünïcode",
        ] {
            assert_eq!(match_path(path), None, "{path}");
        }
    }

    #[test]
    fn title_for_checks_the_operation() {
        assert_eq!(title_for(Operation::Edit, "/edit/Page").unwrap(), "Page");
        assert!(matches!(title_for(Operation::View, "/edit/Page"), Err(WikiError::NotFound)));
        assert!(matches!(title_for(Operation::Save, "/save/no_way"), Err(WikiError::NotFound)));
    }

    #[test]
    fn title_for_decodes_the_path() {
        assert_eq!(title_for(Operation::View, "/view/%46oo").unwrap(), "Foo");
        assert_eq!(title_for(Operation::Edit, "/edit/Ab%63").unwrap(), "Abc");
        for path in ["/view/a%2Fb", "/view/a%2D1", "/view/%ff", "/view/%20"] {
            assert!(matches!(title_for(Operation::View, path), Err(WikiError::NotFound)), "{path}");
        }
    }
}
