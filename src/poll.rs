//! Fixed-interval job polling with a caller-supplied deadline.

use std::future::Future;
use std::io::Write;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::client::ReductoClient;
use crate::error::ApiError;
use crate::types::JobStatus;

const POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Poll a job every five seconds until it reaches a terminal state, showing a
/// transient status line on stderr. `timeout` is measured from loop start.
pub async fn poll_job(
    client: &ReductoClient,
    job_id: &str,
    timeout: Option<u64>,
) -> Result<JobStatus, ApiError> {
    let status = poll_with(
        || client.get_job(job_id),
        POLL_INTERVAL,
        timeout,
        Some(&StatusLine::new(job_id)),
    )
    .await?;
    info!(job_id = %job_id, "Job completed");
    Ok(status)
}

/// Polling core, generic over the status fetch so the loop can be exercised
/// without a network.
///
/// Per iteration: fetch, check terminal states case-insensitively, then check
/// the deadline. No retry cap, no backoff. On `failed` the remote error
/// message is carried through (`Unknown error` when absent).
pub(crate) async fn poll_with<F, Fut>(
    mut fetch: F,
    interval: Duration,
    timeout: Option<u64>,
    progress: Option<&StatusLine<'_>>,
) -> Result<JobStatus, ApiError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<JobStatus, ApiError>>,
{
    let start = Instant::now();

    loop {
        let status = fetch().await?;
        let elapsed = start.elapsed();

        if status.is_completed() {
            if let Some(line) = progress {
                line.finish(elapsed);
            }
            return Ok(status);
        }

        if status.is_failed() {
            if let Some(line) = progress {
                line.clear();
            }
            let message = status.error.unwrap_or_else(|| "Unknown error".to_string());
            return Err(ApiError::JobFailed(message));
        }

        if let Some(limit) = timeout {
            if elapsed >= Duration::from_secs(limit) {
                if let Some(line) = progress {
                    line.clear();
                }
                return Err(ApiError::Timeout(limit));
            }
        }

        debug!(status = %status.status, elapsed_secs = elapsed.as_secs(), "Job still pending");
        if let Some(line) = progress {
            line.update(elapsed);
        }

        tokio::time::sleep(interval).await;
    }
}

/// Transient single-line progress display on stderr. Stdout stays reserved
/// for JSON output.
pub(crate) struct StatusLine<'a> {
    job_id: &'a str,
}

impl<'a> StatusLine<'a> {
    pub(crate) fn new(job_id: &'a str) -> Self {
        Self { job_id }
    }

    fn update(&self, elapsed: Duration) {
        eprint!(
            "\r\x1b[2KProcessing job {}... {}",
            self.job_id,
            format_elapsed_time(elapsed)
        );
        let _ = std::io::stderr().flush();
    }

    fn clear(&self) {
        eprint!("\r\x1b[2K");
        let _ = std::io::stderr().flush();
    }

    fn finish(&self, elapsed: Duration) {
        eprintln!(
            "\r\x1b[2K\u{2713} Parsing completed in {}",
            format_elapsed_time(elapsed)
        );
    }
}

/// Human-readable elapsed time, e.g. "45s" or "1m 23s".
pub fn format_elapsed_time(elapsed: Duration) -> String {
    let seconds = elapsed.as_secs();
    if seconds < 60 {
        return format!("{seconds}s");
    }
    format!("{}m {}s", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn status(s: &str) -> JobStatus {
        JobStatus {
            status: s.to_string(),
            error: None,
            extra: Map::new(),
        }
    }

    #[tokio::test]
    async fn test_completed_on_first_poll_returns_payload_unchanged() {
        let payload = json!({
            "status": "completed",
            "job_id": "mock-job-id-456",
            "result": {"chunks": [], "blocks": []}
        });
        let expected: JobStatus = serde_json::from_value(payload.clone()).unwrap();

        let result = poll_with(
            || {
                let value = payload.clone();
                async move { Ok(serde_json::from_value(value).unwrap()) }
            },
            Duration::ZERO,
            Some(10),
            None,
        )
        .await
        .unwrap();

        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            serde_json::to_value(&expected).unwrap()
        );
    }

    #[tokio::test]
    async fn test_processing_then_completed() {
        let calls = AtomicUsize::new(0);
        let result = poll_with(
            || {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if n == 0 {
                        Ok(status("processing"))
                    } else {
                        Ok(status("completed"))
                    }
                }
            },
            Duration::from_millis(1),
            Some(30),
            None,
        )
        .await
        .unwrap();

        assert!(result.is_completed());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_terminal_states_match_case_insensitively() {
        let result = poll_with(
            || async { Ok(status("COMPLETED")) },
            Duration::ZERO,
            None,
            None,
        )
        .await
        .unwrap();
        assert_eq!(result.status, "COMPLETED");
    }

    #[tokio::test]
    async fn test_failed_job_carries_remote_error_message() {
        let err = poll_with(
            || async {
                Ok(JobStatus {
                    status: "failed".into(),
                    error: Some("Processing failed".into()),
                    extra: Map::new(),
                })
            },
            Duration::ZERO,
            None,
            None,
        )
        .await
        .unwrap_err();

        assert!(err.to_string().contains("Job failed: Processing failed"));
    }

    #[tokio::test]
    async fn test_failed_job_without_message_defaults_to_unknown() {
        let err = poll_with(
            || async { Ok(status("failed")) },
            Duration::ZERO,
            None,
            None,
        )
        .await
        .unwrap_err();

        assert_eq!(err.to_string(), "Job failed: Unknown error");
    }

    #[tokio::test]
    async fn test_timeout_reports_configured_seconds() {
        // A zero deadline trips on the first pending poll.
        let err = poll_with(
            || async { Ok(status("processing")) },
            Duration::from_millis(1),
            Some(0),
            None,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ApiError::Timeout(0)));
        assert_eq!(err.to_string(), "Job timed out after 0 seconds");
    }

    #[tokio::test]
    async fn test_fetch_error_propagates() {
        let err = poll_with(
            || async { Err(ApiError::InvalidResponse("bad json".into())) },
            Duration::ZERO,
            None,
            None,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ApiError::InvalidResponse(_)));
    }

    #[test]
    fn test_format_elapsed_time() {
        assert_eq!(format_elapsed_time(Duration::from_secs(45)), "45s");
        assert_eq!(format_elapsed_time(Duration::from_secs(60)), "1m 0s");
        assert_eq!(format_elapsed_time(Duration::from_secs(83)), "1m 23s");
    }
}
