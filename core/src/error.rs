use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid {field} '{value}': {source}")]
    DateParse {
        field: &'static str,
        value: String,
        #[source]
        source: time::error::Parse,
    },

    #[error("unexpected document shape: {0}")]
    Shape(String),

    #[error("timestamp formatting failed: {0}")]
    TimeFormat(#[from] time::error::Format),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

pub type CoreResult<T> = Result<T, CoreError>;
