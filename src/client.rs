use std::path::Path;
use std::time::Duration;

use reqwest::{multipart, Client, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::environment::Environment;
use crate::error::{ApiError, CliError, UsageError};
use crate::options::ParseOptions;
use crate::types::{JobResponse, JobStatus, UploadResult};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

pub struct ReductoClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl ReductoClient {
    /// Builds a client for the given environment. The API key comes from the
    /// `REDUCTO_API_KEY` environment variable; its absence is a usage error
    /// raised before any network call.
    pub fn from_env(environment: Environment) -> Result<Self, CliError> {
        let api_key = std::env::var("REDUCTO_API_KEY")
            .ok()
            .filter(|key| !key.is_empty())
            .ok_or(UsageError::MissingApiKey)?;
        Ok(Self::new(environment.base_url(), api_key)?)
    }

    pub fn new(base_url: &str, api_key: String) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(ApiError::Request)?;
        let base_url = base_url.trim_end_matches('/').to_string();
        Ok(Self {
            http,
            base_url,
            api_key,
        })
    }

    /// Upload a local file, returning the opaque file reference.
    pub async fn upload(
        &self,
        file_path: &Path,
        extension: Option<&str>,
    ) -> Result<UploadResult, ApiError> {
        let bytes = tokio::fs::read(file_path)
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to read file: {e}")))?;

        let filename = file_path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        debug!(file = %filename, bytes = bytes.len(), "Uploading file");

        let part = multipart::Part::bytes(bytes).file_name(filename);
        let form = multipart::Form::new().part("file", part);

        let mut request = self
            .http
            .post(format!("{}/upload", self.base_url))
            .bearer_auth(&self.api_key)
            .multipart(form);
        if let Some(ext) = extension {
            request = request.query(&[("extension", ext)]);
        }

        let response = request.send().await?;
        decode(response).await
    }

    /// Submit an async parse job for the given input reference.
    pub async fn create_parse_job(
        &self,
        input: &str,
        options: &ParseOptions,
    ) -> Result<JobResponse, ApiError> {
        debug!(input = %input, "Submitting parse job");

        #[derive(serde::Serialize)]
        struct ParseJobRequest<'a> {
            input: &'a str,
            #[serde(flatten)]
            options: &'a ParseOptions,
        }

        let response = self
            .http
            .post(format!("{}/parse_async", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&ParseJobRequest { input, options })
            .send()
            .await?;
        decode(response).await
    }

    /// Fetch the current status of a job.
    pub async fn get_job(&self, job_id: &str) -> Result<JobStatus, ApiError> {
        let response = self
            .http
            .get(format!("{}/job/{}", self.base_url, job_id))
            .bearer_auth(&self.api_key)
            .send()
            .await?;
        decode(response).await
    }

    /// Fetch API version information.
    pub async fn api_version(&self) -> Result<Value, ApiError> {
        let response = self
            .http
            .get(format!("{}/version", self.base_url))
            .bearer_auth(&self.api_key)
            .send()
            .await?;
        decode(response).await
    }
}

/// Decodes a response, mapping non-success statuses to `ApiError::Api` with
/// the response body attached (parsed as JSON when possible).
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let response = serde_json::from_str(&body).unwrap_or(Value::String(body));
        return Err(ApiError::Api {
            status: status.as_u16(),
            response,
        });
    }

    serde_json::from_str(&body).map_err(|e| ApiError::InvalidResponse(format!("{e}: {body}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_env_requires_api_key() {
        // Serialize env mutation against other tests in this module.
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::remove_var("REDUCTO_API_KEY");
        let result = ReductoClient::from_env(Environment::Production);
        assert!(matches!(
            result,
            Err(CliError::Usage(UsageError::MissingApiKey))
        ));

        std::env::set_var("REDUCTO_API_KEY", "");
        let result = ReductoClient::from_env(Environment::Production);
        assert!(matches!(
            result,
            Err(CliError::Usage(UsageError::MissingApiKey))
        ));
        std::env::remove_var("REDUCTO_API_KEY");
    }

    #[test]
    fn test_from_env_reads_api_key() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::set_var("REDUCTO_API_KEY", "test-api-key-123");
        let client = ReductoClient::from_env(Environment::Eu).unwrap();
        assert_eq!(client.base_url, "https://eu.platform.reducto.ai");
        assert_eq!(client.api_key, "test-api-key-123");
        std::env::remove_var("REDUCTO_API_KEY");
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = ReductoClient::new("http://localhost:8000/", "key".into()).unwrap();
        assert_eq!(client.base_url, "http://localhost:8000");
    }

    static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
}
