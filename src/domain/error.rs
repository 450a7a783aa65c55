use thiserror::Error;

/// Top-level error type for the ingest pipeline.
#[derive(Error, Debug)]
pub enum ScribeError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("ingest error: {0}")]
    Ingest(String),
}
