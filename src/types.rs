use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Response from the upload endpoint. The file id is an opaque
/// `reducto://` reference usable as parse input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResult {
    pub file_id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response from the job-creation endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct JobResponse {
    pub job_id: String,
}

/// Status payload for an async job. Only `status` and `error` are
/// interpreted locally; everything else is carried through untouched so the
/// completed payload can be written to disk exactly as the API returned it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobStatus {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl JobStatus {
    pub fn is_completed(&self) -> bool {
        self.status.eq_ignore_ascii_case("completed")
    }

    pub fn is_failed(&self) -> bool {
        self.status.eq_ignore_ascii_case("failed")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_checks_are_case_insensitive() {
        let status = JobStatus {
            status: "Completed".into(),
            error: None,
            extra: Map::new(),
        };
        assert!(status.is_completed());
        assert!(!status.is_failed());

        let status = JobStatus {
            status: "FAILED".into(),
            error: Some("boom".into()),
            extra: Map::new(),
        };
        assert!(status.is_failed());
    }

    #[test]
    fn test_job_status_preserves_unknown_fields() {
        let payload = json!({
            "status": "completed",
            "job_id": "mock-job-id-456",
            "result": {"chunks": [], "blocks": []}
        });
        let status: JobStatus = serde_json::from_value(payload.clone()).unwrap();
        assert!(status.is_completed());
        assert_eq!(serde_json::to_value(&status).unwrap(), payload);
    }
}
