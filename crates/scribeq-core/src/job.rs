//! Job identifiers, submission payloads, and the transcription result model.

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::validate::{self, ValidationError};

/// Identifier the server assigns to a submitted job.
///
/// Opaque to callers; the only operations are display (hyphenated, as the
/// server emits it) and use as a lookup key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(Uuid);

impl JobId {
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for JobId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for JobId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate::parse_job_id(s)
    }
}

/// Outcome of a result lookup. Exactly one variant holds per query; nothing
/// is cached between queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum JobStatus {
    /// Accepted but not finished. `position` 0 means actively processing.
    Queued { position: u64 },
    /// Transcription text is available.
    Completed { text: String },
    /// The server knows nothing about this id.
    NotFound,
}

/// Stages a submission passes through, reported to the optional progress
/// callback so a front end can show what the request is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitStage {
    /// Request body is being sent to the server
    Uploading,
    /// Upload finished, waiting for the server to acknowledge
    Waiting,
}

type ProgressCallback = Arc<dyn Fn(SubmitStage) + Send + Sync>;

/// One audio file plus the language hint, ready to upload.
#[derive(Clone)]
pub struct JobSubmission {
    pub audio_data: Vec<u8>,
    pub filename: String,
    pub mime_type: String,
    pub language: String,
    progress: Option<ProgressCallback>,
}

impl std::fmt::Debug for JobSubmission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JobSubmission")
            .field("audio_data", &format_args!("{} bytes", self.audio_data.len()))
            .field("filename", &self.filename)
            .field("mime_type", &self.mime_type)
            .field("language", &self.language)
            .field("progress", &self.progress.is_some())
            .finish()
    }
}

impl JobSubmission {
    /// Build a submission from in-memory audio bytes.
    pub fn new(audio_data: Vec<u8>, filename: &str, mime_type: &str, language: &str) -> Self {
        Self {
            audio_data,
            filename: filename.to_string(),
            mime_type: mime_type.to_string(),
            language: language.trim().to_string(),
            progress: None,
        }
    }

    /// Validate and load an audio file from disk.
    ///
    /// Presence, file type, and the 1 GiB size limit are checked against
    /// metadata before any bytes are read; an over-limit file is rejected
    /// without being loaded.
    pub fn from_file(path: &Path, language: &str) -> Result<Self> {
        validate::check_language(language)?;
        validate::check_audio_file(path)?;

        let audio_data = std::fs::read(path)
            .with_context(|| format!("failed to read audio file: {}", path.display()))?;

        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("audio")
            .to_string();

        let mime_type = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| mime_for_extension(&e.to_lowercase()))
            .unwrap_or("application/octet-stream")
            .to_string();

        Ok(Self {
            audio_data,
            filename,
            mime_type,
            language: language.trim().to_string(),
            progress: None,
        })
    }

    /// Attach a progress callback invoked as the upload advances.
    pub fn with_progress(mut self, callback: impl Fn(SubmitStage) + Send + Sync + 'static) -> Self {
        self.progress = Some(Arc::new(callback));
        self
    }

    pub(crate) fn report(&self, stage: SubmitStage) {
        if let Some(callback) = &self.progress {
            callback(stage);
        }
    }

    /// Detach the audio payload for the request body, leaving the rest of
    /// the submission usable for progress reporting. Moving instead of
    /// cloning keeps peak memory at one copy of the file.
    pub(crate) fn take_audio(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.audio_data)
    }
}

fn mime_for_extension(ext: &str) -> &'static str {
    match ext {
        "wav" => "audio/wav",
        "mp3" => "audio/mpeg",
        "m4a" | "mp4" => "audio/mp4",
        "ogg" | "oga" => "audio/ogg",
        "opus" => "audio/opus",
        "flac" => "audio/flac",
        "webm" => "audio/webm",
        "aac" => "audio/aac",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::ValidationError;

    fn temp_audio_file(name: &str, contents: &[u8]) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("scribeq-test-{}-{name}", std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn mime_guessing() {
        assert_eq!(mime_for_extension("wav"), "audio/wav");
        assert_eq!(mime_for_extension("mp3"), "audio/mpeg");
        assert_eq!(mime_for_extension("xyz"), "application/octet-stream");
    }

    #[test]
    fn from_file_loads_bytes_and_metadata() {
        let path = temp_audio_file("take.wav", b"RIFFdata");
        let submission = JobSubmission::from_file(&path, "  Japanese ").unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(submission.audio_data, b"RIFFdata");
        assert_eq!(submission.mime_type, "audio/wav");
        assert_eq!(submission.language, "Japanese");
        assert!(submission.filename.ends_with("take.wav"));
    }

    #[test]
    fn from_file_rejects_empty_language_before_reading() {
        let err = JobSubmission::from_file(Path::new("/nonexistent.wav"), "").unwrap_err();
        assert_eq!(
            err.downcast::<ValidationError>().unwrap(),
            ValidationError::LanguageEmpty
        );
    }

    #[test]
    fn take_audio_leaves_no_second_copy() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let reports = std::sync::Arc::new(AtomicUsize::new(0));
        let seen = reports.clone();
        let mut submission = JobSubmission::new(vec![7u8; 64], "take.wav", "audio/wav", "English")
            .with_progress(move |_| {
                seen.fetch_add(1, Ordering::SeqCst);
            });

        let audio = submission.take_audio();
        assert_eq!(audio, vec![7u8; 64]);
        assert!(submission.audio_data.is_empty());

        // Metadata and the progress callback survive the move
        assert_eq!(submission.filename, "take.wav");
        submission.report(SubmitStage::Uploading);
        assert_eq!(reports.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn job_status_serializes_with_snake_case_tags() {
        let json = serde_json::to_string(&JobStatus::Queued { position: 3 }).unwrap();
        assert!(json.contains("\"queued\""));
        let json = serde_json::to_string(&JobStatus::NotFound).unwrap();
        assert!(json.contains("\"not_found\""));
    }
}
