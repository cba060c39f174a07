use std::error::Error as StdError;
use std::fmt;
use std::io;
use axum::{http::StatusCode, response::{IntoResponse, Response}};

/// Custom error types for the wiki application
#[derive(Debug)]
pub enum WikiError {
    Io(io::Error),
    NotFound,
    BadRequest(String),
    Template(String),
    Config(String),
}

impl fmt::Display for WikiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WikiError::Io(e) => write!(f, "{}", e),
            WikiError::NotFound => write!(f, "404 page not found"),
            WikiError::BadRequest(e) => write!(f, "{}", e),
            WikiError::Template(e) => write!(f, "{}", e),
            WikiError::Config(e) => write!(f, "invalid configuration: {}", e),
        }
    }
}

impl StdError for WikiError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            WikiError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for WikiError {
    fn from(err: io::Error) -> Self {
        WikiError::Io(err)
    }
}

impl From<tera::Error> for WikiError {
    fn from(err: tera::Error) -> Self {
        // tera nests the interesting part of the message in its source chain
        let mut message = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        WikiError::Template(message)
    }
}

impl IntoResponse for WikiError {
    fn into_response(self) -> Response {
        match self {
            WikiError::NotFound => (StatusCode::NOT_FOUND, self.to_string()).into_response(),
            WikiError::BadRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()).into_response(),
            WikiError::Io(_) | WikiError::Template(_) | WikiError::Config(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_keep_their_message() {
        let err = WikiError::from(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"));
        assert!(matches!(err, WikiError::Io(_)));
        assert_eq!(err.to_string(), "read-only");
    }

    #[test]
    fn status_codes() {
        assert_eq!(WikiError::NotFound.into_response().status(), StatusCode::NOT_FOUND);
        assert_eq!(
            WikiError::BadRequest("bad form".into()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            WikiError::Template("boom".into()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
