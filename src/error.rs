use thiserror::Error;

#[derive(Error, Debug)]
pub enum RatingsError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unrecognized ratings column: {header}")]
    UnrecognizedColumn { header: String },

    #[error("invalid value for {field}: {value:?}")]
    InvalidValue { field: &'static str, value: String },

    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("no air date found in post title: {title:?}")]
    TitleDate { title: String },

    #[error("malformed ratings table: {0}")]
    MalformedTable(String),

    #[error("storage error: {0}")]
    Store(String),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, RatingsError>;
