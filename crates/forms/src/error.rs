use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("form '{form}' does not accept option '{option}'")]
    UndefinedOption { form: String, option: String },

    #[error("form '{form}' requires option '{option}'")]
    MissingOption { form: String, option: String },

    #[error("no form mapper registered for field type '{0}'")]
    UnknownFieldType(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
