use thiserror::Error;

#[derive(Error, Debug)]
pub enum BurnError {
    #[error("Please provide a secret key or a secret key file.")]
    MissingSecretKey,
    #[error("Invalid secret key: {0}")]
    InvalidSecretKey(String),
    #[error("Error reading secret key file: {0}")]
    KeyFile(#[from] std::io::Error),
    #[error("Invalid address: {0}")]
    InvalidAddress(String),
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API returned {status}: {message}")]
    Api { status: u16, message: String },
    #[error("Indexer query failed: {0}")]
    Indexer(String),
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
    #[error("Encoding error: {0}")]
    Encoding(String),
    #[error("Timed out waiting for transaction {0}")]
    WaitTimeout(String),
    #[error("Gave up after {0} pages of owned assets")]
    PageLimit(u64),
    #[error("Batch size must be greater than zero")]
    InvalidBatchSize,
    #[error("Page size must be greater than zero")]
    InvalidPageSize,
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

impl BurnError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        1
    }
}

pub type Result<T> = std::result::Result<T, BurnError>;
