use std::io;
use thiserror::Error;

/// Failures raised by repository services.
#[derive(Debug, Error)]
pub enum Error {
    #[error("could not find '{what}' with identifier '{id}'")]
    NotFound { what: &'static str, id: String },

    #[error("user does not have access to '{what}' with identifier '{id}'")]
    Unauthorized { what: &'static str, id: String },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid fixture: {0}")]
    Fixture(String),
}

impl Error {
    #[inline]
    pub fn not_found(what: &'static str, id: impl ToString) -> Self {
        Error::NotFound {
            what,
            id: id.to_string(),
        }
    }

    #[inline]
    pub fn unauthorized(what: &'static str, id: impl ToString) -> Self {
        Error::Unauthorized {
            what,
            id: id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Error::Unauthorized { .. })
    }
}
