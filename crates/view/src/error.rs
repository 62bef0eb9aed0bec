use crate::route::Route;
use http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// None of the accepted keys for a required value were present.
    #[error("missing parameter '{name}': {reason}")]
    MissingParameter {
        name: &'static str,
        reason: &'static str,
    },

    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("repository error: {0}")]
    Repository(#[from] domain::Error),

    #[error("form error: {0}")]
    Form(#[from] forms::Error),

    #[error("unknown route: {0}")]
    UnknownRoute(String),

    #[error("no view builder matches route {0:?}")]
    NoBuilder(Route),

    #[error("invalid header value: {0}")]
    InvalidHeaderValue(String),
}

impl Error {
    #[inline]
    pub fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub fn to_status(&self) -> StatusCode {
        match self {
            Error::MissingParameter { .. }
            | Error::InvalidParameter { .. }
            | Error::UnknownRoute(_) => StatusCode::BAD_REQUEST,
            Error::Repository(e) if e.is_not_found() => StatusCode::NOT_FOUND,
            Error::Repository(e) if e.is_unauthorized() => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        let missing = Error::MissingParameter {
            name: "Language",
            reason: "none",
        };
        assert_eq!(missing.to_status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            Error::from(domain::Error::not_found("Location", 3)).to_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            Error::from(domain::Error::unauthorized("Content", 3)).to_status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            Error::NoBuilder(Route::ContentEdit).to_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
