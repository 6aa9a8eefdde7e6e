use thiserror::Error;

#[derive(Error, Debug)]
pub enum ListingsError {
    #[error("Listing not found: {0}")]
    ListingNotFound(i64),

    #[error("Unknown attribute: {0}")]
    UnknownAttribute(String),

    #[error("Attribute {code} does not take a {expected} action")]
    WidgetMismatch { code: String, expected: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Source error: {0}")]
    Source(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Api Error: {0}")]
    Api(String),
}

impl From<confique::Error> for ListingsError {
    fn from(err: confique::Error) -> Self {
        ListingsError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ListingsError>;
