use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use crate::error::{ApiError, CliError};

/// True only for paths that exist on disk. URLs and `reducto://` references
/// fall through to false.
pub fn is_local_file(input: &str) -> bool {
    Path::new(input).exists()
}

/// Print a value as pretty JSON on stdout.
pub fn output_json<T: Serialize>(data: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(data)?;
    println!("{rendered}");
    Ok(())
}

/// Write a value as pretty JSON to a file.
pub fn save_json_to_file<T: Serialize>(data: &T, path: &Path) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(data)?;
    std::fs::write(path, rendered)?;
    Ok(())
}

/// The one JSON object every failure path prints to stdout before exiting 1.
/// Fields are present only when available.
#[derive(Debug, Serialize)]
pub struct ErrorReport {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<Value>,
}

impl ErrorReport {
    pub fn new(message: &str) -> Self {
        Self {
            error: message.to_string(),
            details: None,
            status_code: None,
            response: None,
        }
    }

    pub fn from_error(message: &str, error: &CliError) -> Self {
        let mut report = Self::new(message);
        report.details = Some(error.to_string());
        if let CliError::Api(ApiError::Api { status, response }) = error {
            report.status_code = Some(*status);
            report.response = Some(response.clone());
        }
        report
    }
}

/// Emit the structured error report on stdout. Serialization of the report
/// itself cannot fail; a plain message is the last resort.
pub fn output_error(report: &ErrorReport) {
    match serde_json::to_string_pretty(report) {
        Ok(rendered) => println!("{rendered}"),
        Err(_) => println!("{{\"error\": \"{}\"}}", report.error),
    }
}
