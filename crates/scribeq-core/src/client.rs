//! Client for the transcription job server.
//!
//! Four operations, each a single HTTP call with no retry:
//! - `POST /add-job/low-priority` — multipart `language` + `audio_files`
//! - `GET /get-result/{uuid}` — 200 completed, 202 queued, 404 not found
//! - `DELETE /cancel-job/{uuid}`
//! - `DELETE /remove-result/{uuid}`
//!
//! Status-to-state mapping lives in pure functions over `(StatusCode, body)`
//! so it can be tested without a running server.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use uuid::Uuid;

use crate::config::ServerConfig;
use crate::http::get_http_client;
use crate::job::{JobId, JobStatus, JobSubmission, SubmitStage};

/// Operations against a transcription job server.
///
/// Sync and async pairs so both blocking tools and async front ends can
/// share one implementation. `HttpJobClient` talks to a real server;
/// `DummyJobClient` fakes one for offline use.
#[async_trait]
pub trait JobService: Send + Sync {
    fn submit_job_sync(&self, submission: JobSubmission) -> Result<JobId>;
    async fn submit_job_async(&self, submission: JobSubmission) -> Result<JobId>;

    fn get_result_sync(&self, job_id: &JobId) -> Result<JobStatus>;
    async fn get_result_async(&self, job_id: &JobId) -> Result<JobStatus>;

    fn cancel_job_sync(&self, job_id: &JobId) -> Result<()>;
    async fn cancel_job_async(&self, job_id: &JobId) -> Result<()>;

    fn remove_result_sync(&self, job_id: &JobId) -> Result<()>;
    async fn remove_result_async(&self, job_id: &JobId) -> Result<()>;
}

/// Envelope for a successful job submission: `data[0].job_id`.
#[derive(Deserialize)]
struct AddJobResponse {
    data: Vec<AddedJob>,
}

#[derive(Deserialize)]
struct AddedJob {
    job_id: JobId,
}

/// Envelope for a finished transcription: `data.transcription`.
#[derive(Deserialize)]
struct CompletedResponse {
    data: CompletedData,
}

#[derive(Deserialize)]
struct CompletedData {
    transcription: String,
}

/// Envelope for a still-queued job: `data.n_wait`.
#[derive(Deserialize)]
struct QueuedResponse {
    data: QueuedData,
}

#[derive(Deserialize)]
struct QueuedData {
    n_wait: u64,
}

fn parse_submit_response(status: StatusCode, body: &str) -> Result<JobId> {
    if status != StatusCode::OK {
        anyhow::bail!("job submission failed: server returned {status}");
    }

    let response: AddJobResponse =
        serde_json::from_str(body).context("failed to parse job submission response")?;
    let added = response
        .data
        .first()
        .context("job submission response contained no jobs")?;
    Ok(added.job_id)
}

fn parse_result_response(status: StatusCode, body: &str) -> Result<JobStatus> {
    match status {
        StatusCode::OK => {
            let response: CompletedResponse =
                serde_json::from_str(body).context("failed to parse completed result")?;
            Ok(JobStatus::Completed {
                text: response.data.transcription,
            })
        }
        StatusCode::ACCEPTED => {
            let response: QueuedResponse =
                serde_json::from_str(body).context("failed to parse queue position")?;
            Ok(JobStatus::Queued {
                position: response.data.n_wait,
            })
        }
        // The one non-error miss: the server has no such job
        StatusCode::NOT_FOUND => Ok(JobStatus::NotFound),
        other => anyhow::bail!("result lookup failed: server returned {other}"),
    }
}

fn check_delete_response(status: StatusCode, action: &str) -> Result<()> {
    if status != StatusCode::OK {
        anyhow::bail!("{action} failed: server returned {status}");
    }
    Ok(())
}

/// HTTP client bound to one server endpoint.
#[derive(Debug, Clone)]
pub struct HttpJobClient {
    config: ServerConfig,
}

impl HttpJobClient {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.endpoint())
    }
}

#[async_trait]
impl JobService for HttpJobClient {
    fn submit_job_sync(&self, mut submission: JobSubmission) -> Result<JobId> {
        let url = self.url("/add-job/low-priority");
        crate::verbose!("POST {url} ({} bytes)", submission.audio_data.len());

        // The buffer moves into the request body; a clone would hold two
        // copies of a file that may be up to 1 GiB.
        let form = reqwest::blocking::multipart::Form::new()
            .text("language", submission.language.clone())
            .part(
                "audio_files",
                reqwest::blocking::multipart::Part::bytes(submission.take_audio())
                    .file_name(submission.filename.clone())
                    .mime_str(&submission.mime_type)?,
            );

        submission.report(SubmitStage::Uploading);
        let client = reqwest::blocking::Client::new();
        let response = client
            .post(&url)
            .multipart(form)
            .send()
            .context("failed to send submission request")?;
        submission.report(SubmitStage::Waiting);

        let status = response.status();
        let body = response
            .text()
            .context("failed to read submission response")?;
        crate::verbose!("POST {url} -> {status}");
        parse_submit_response(status, &body)
    }

    async fn submit_job_async(&self, mut submission: JobSubmission) -> Result<JobId> {
        let url = self.url("/add-job/low-priority");
        crate::verbose!("POST {url} ({} bytes)", submission.audio_data.len());

        let form = reqwest::multipart::Form::new()
            .text("language", submission.language.clone())
            .part(
                "audio_files",
                reqwest::multipart::Part::bytes(submission.take_audio())
                    .file_name(submission.filename.clone())
                    .mime_str(&submission.mime_type)?,
            );

        submission.report(SubmitStage::Uploading);
        let response = get_http_client()
            .post(&url)
            .multipart(form)
            .send()
            .await
            .context("failed to send submission request")?;
        submission.report(SubmitStage::Waiting);

        let status = response.status();
        let body = response
            .text()
            .await
            .context("failed to read submission response")?;
        crate::verbose!("POST {url} -> {status}");
        parse_submit_response(status, &body)
    }

    fn get_result_sync(&self, job_id: &JobId) -> Result<JobStatus> {
        let url = self.url(&format!("/get-result/{job_id}"));
        let client = reqwest::blocking::Client::new();
        let response = client
            .get(&url)
            .send()
            .context("failed to send result request")?;

        let status = response.status();
        let body = response.text().context("failed to read result response")?;
        crate::verbose!("GET {url} -> {status}");
        parse_result_response(status, &body)
    }

    async fn get_result_async(&self, job_id: &JobId) -> Result<JobStatus> {
        let url = self.url(&format!("/get-result/{job_id}"));
        let response = get_http_client()
            .get(&url)
            .send()
            .await
            .context("failed to send result request")?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("failed to read result response")?;
        crate::verbose!("GET {url} -> {status}");
        parse_result_response(status, &body)
    }

    fn cancel_job_sync(&self, job_id: &JobId) -> Result<()> {
        let url = self.url(&format!("/cancel-job/{job_id}"));
        let client = reqwest::blocking::Client::new();
        let response = client
            .delete(&url)
            .send()
            .context("failed to send cancel request")?;
        crate::verbose!("DELETE {url} -> {}", response.status());
        check_delete_response(response.status(), "job cancellation")
    }

    async fn cancel_job_async(&self, job_id: &JobId) -> Result<()> {
        let url = self.url(&format!("/cancel-job/{job_id}"));
        let response = get_http_client()
            .delete(&url)
            .send()
            .await
            .context("failed to send cancel request")?;
        crate::verbose!("DELETE {url} -> {}", response.status());
        check_delete_response(response.status(), "job cancellation")
    }

    fn remove_result_sync(&self, job_id: &JobId) -> Result<()> {
        let url = self.url(&format!("/remove-result/{job_id}"));
        let client = reqwest::blocking::Client::new();
        let response = client
            .delete(&url)
            .send()
            .context("failed to send remove request")?;
        crate::verbose!("DELETE {url} -> {}", response.status());
        check_delete_response(response.status(), "result removal")
    }

    async fn remove_result_async(&self, job_id: &JobId) -> Result<()> {
        let url = self.url(&format!("/remove-result/{job_id}"));
        let response = get_http_client()
            .delete(&url)
            .send()
            .await
            .context("failed to send remove request")?;
        crate::verbose!("DELETE {url} -> {}", response.status());
        check_delete_response(response.status(), "result removal")
    }
}

const DUMMY_TRANSCRIPTION: &str = "This is sample transcription output. A real server \
would return the text recognized from the submitted audio file.";

/// Offline stand-in for a real server.
///
/// Submissions get a fresh id; lookups derive a stable status from the id
/// bytes, so repeating a query gives the same answer. Useful for trying the
/// CLI without a server and for tests.
#[derive(Debug, Clone)]
pub struct DummyJobClient {
    /// Simulated round-trip delay per call
    pub latency: Duration,
}

impl Default for DummyJobClient {
    fn default() -> Self {
        Self {
            latency: Duration::from_secs(1),
        }
    }
}

impl DummyJobClient {
    fn status_for(job_id: &JobId) -> JobStatus {
        let bytes = job_id.as_uuid().as_bytes();
        match bytes[0] % 3 {
            0 => JobStatus::Queued {
                position: u64::from(bytes[1] % 2),
            },
            1 => JobStatus::Completed {
                text: DUMMY_TRANSCRIPTION.to_string(),
            },
            _ => JobStatus::NotFound,
        }
    }
}

#[async_trait]
impl JobService for DummyJobClient {
    fn submit_job_sync(&self, submission: JobSubmission) -> Result<JobId> {
        submission.report(SubmitStage::Uploading);
        std::thread::sleep(self.latency);
        submission.report(SubmitStage::Waiting);
        Ok(JobId::from(Uuid::new_v4()))
    }

    async fn submit_job_async(&self, submission: JobSubmission) -> Result<JobId> {
        submission.report(SubmitStage::Uploading);
        tokio::time::sleep(self.latency).await;
        submission.report(SubmitStage::Waiting);
        Ok(JobId::from(Uuid::new_v4()))
    }

    fn get_result_sync(&self, job_id: &JobId) -> Result<JobStatus> {
        std::thread::sleep(self.latency);
        Ok(Self::status_for(job_id))
    }

    async fn get_result_async(&self, job_id: &JobId) -> Result<JobStatus> {
        tokio::time::sleep(self.latency).await;
        Ok(Self::status_for(job_id))
    }

    fn cancel_job_sync(&self, _job_id: &JobId) -> Result<()> {
        std::thread::sleep(self.latency);
        Ok(())
    }

    async fn cancel_job_async(&self, _job_id: &JobId) -> Result<()> {
        tokio::time::sleep(self.latency).await;
        Ok(())
    }

    fn remove_result_sync(&self, _job_id: &JobId) -> Result<()> {
        std::thread::sleep(self.latency);
        Ok(())
    }

    async fn remove_result_async(&self, _job_id: &JobId) -> Result<()> {
        tokio::time::sleep(self.latency).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn submit_200_yields_job_id() {
        let body = r#"{"data":[{"job_id":"11111111-1111-1111-1111-111111111111"}]}"#;
        let id = parse_submit_response(StatusCode::OK, body).unwrap();
        assert_eq!(id.to_string(), "11111111-1111-1111-1111-111111111111");
    }

    #[test]
    fn submit_200_with_empty_data_is_an_error() {
        let result = parse_submit_response(StatusCode::OK, r#"{"data":[]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn submit_non_200_is_an_error() {
        let result = parse_submit_response(StatusCode::INTERNAL_SERVER_ERROR, "");
        assert!(result.is_err());
    }

    #[test]
    fn result_200_yields_completed() {
        let body = r#"{"data":{"transcription":"hello world"}}"#;
        let status = parse_result_response(StatusCode::OK, body).unwrap();
        assert_eq!(
            status,
            JobStatus::Completed {
                text: "hello world".to_string()
            }
        );
    }

    #[test]
    fn result_202_yields_queue_position() {
        let body = r#"{"data":{"n_wait":3}}"#;
        let status = parse_result_response(StatusCode::ACCEPTED, body).unwrap();
        assert_eq!(status, JobStatus::Queued { position: 3 });
    }

    #[test]
    fn result_404_yields_not_found_not_error() {
        let status = parse_result_response(StatusCode::NOT_FOUND, "gone").unwrap();
        assert_eq!(status, JobStatus::NotFound);
    }

    #[test]
    fn result_unexpected_status_is_an_error() {
        assert!(parse_result_response(StatusCode::BAD_GATEWAY, "").is_err());
    }

    #[test]
    fn result_malformed_body_is_an_error() {
        assert!(parse_result_response(StatusCode::OK, r#"{"data":{}}"#).is_err());
        assert!(parse_result_response(StatusCode::ACCEPTED, "not json").is_err());
    }

    #[test]
    fn delete_only_accepts_200() {
        assert!(check_delete_response(StatusCode::OK, "job cancellation").is_ok());
        assert!(check_delete_response(StatusCode::NOT_FOUND, "job cancellation").is_err());
    }

    #[test]
    fn dummy_status_is_stable_per_id() {
        let dummy = DummyJobClient {
            latency: Duration::ZERO,
        };

        let queued = JobId::from_str("00010000-0000-0000-0000-000000000000").unwrap();
        assert_eq!(
            dummy.get_result_sync(&queued).unwrap(),
            JobStatus::Queued { position: 1 }
        );

        let completed = JobId::from_str("01000000-0000-0000-0000-000000000000").unwrap();
        assert!(matches!(
            dummy.get_result_sync(&completed).unwrap(),
            JobStatus::Completed { .. }
        ));

        let missing = JobId::from_str("02000000-0000-0000-0000-000000000000").unwrap();
        assert_eq!(dummy.get_result_sync(&missing).unwrap(), JobStatus::NotFound);

        // Same id, same answer
        assert_eq!(
            dummy.get_result_sync(&queued).unwrap(),
            dummy.get_result_sync(&queued).unwrap()
        );
    }

    #[test]
    fn dummy_submit_reports_stages_in_order() {
        use std::sync::Mutex;

        let dummy = DummyJobClient {
            latency: Duration::ZERO,
        };
        let stages: std::sync::Arc<Mutex<Vec<SubmitStage>>> = Default::default();
        let seen = stages.clone();

        let submission = JobSubmission::new(vec![0u8; 16], "take.wav", "audio/wav", "English")
            .with_progress(move |stage| seen.lock().unwrap().push(stage));

        dummy.submit_job_sync(submission).unwrap();
        assert_eq!(
            *stages.lock().unwrap(),
            vec![SubmitStage::Uploading, SubmitStage::Waiting]
        );
    }
}
