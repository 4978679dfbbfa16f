use std::path::PathBuf;

/// Errors detected before any network call is made.
#[derive(thiserror::Error, Debug)]
pub enum UsageError {
    #[error(
        "REDUCTO_API_KEY environment variable is not set. \
         Please set it in your environment or .env file."
    )]
    MissingApiKey,

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Not a file: {0}")]
    NotAFile(PathBuf),

    #[error(
        "Invalid value '{0}'. Only 'figure' and 'table' are allowed for \
         --settings-return-images. Example: --settings-return-images figure \
         --settings-return-images table"
    )]
    InvalidReturnImages(String),
}

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API returned status {status}")]
    Api {
        status: u16,
        response: serde_json::Value,
    },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Job timed out after {0} seconds")]
    Timeout(u64),

    #[error("Job failed: {0}")]
    JobFailed(String),
}

/// Top-level error for one command invocation. Every variant funnels to the
/// same structured JSON report and exit code 1.
#[derive(thiserror::Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Usage(#[from] UsageError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
}
