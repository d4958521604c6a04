//! Client-side validation for job submissions and result lookups.
//!
//! Every check runs before any request is constructed, so a rejected form
//! never touches the network.

use std::path::Path;

use thiserror::Error;
use uuid::Uuid;

use crate::job::JobId;

/// Largest accepted audio upload: 1 GiB.
pub const MAX_AUDIO_FILE_BYTES: u64 = 1024 * 1024 * 1024;

/// Field-level validation failure.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("audio file not found: {0}")]
    AudioFileMissing(String),

    #[error("not a regular file: {0}")]
    AudioFileNotRegular(String),

    #[error("audio file is {size} bytes, exceeding the 1 GiB limit")]
    AudioFileTooLarge { size: u64 },

    #[error("language must not be empty")]
    LanguageEmpty,

    #[error("job id must not be empty")]
    JobIdEmpty,

    #[error("job id is not a valid UUID: {0}")]
    JobIdInvalid(String),
}

/// Check that the audio file exists, is a regular file, and fits the size
/// limit. Returns the file size so callers can reuse the metadata lookup.
pub fn check_audio_file(path: &Path) -> Result<u64, ValidationError> {
    let display = path.display().to_string();
    let metadata =
        std::fs::metadata(path).map_err(|_| ValidationError::AudioFileMissing(display.clone()))?;

    if !metadata.is_file() {
        return Err(ValidationError::AudioFileNotRegular(display));
    }

    check_audio_size(metadata.len())?;
    Ok(metadata.len())
}

/// Size limit check, split out so it can be tested without a 1 GiB fixture.
pub fn check_audio_size(size: u64) -> Result<(), ValidationError> {
    if size > MAX_AUDIO_FILE_BYTES {
        return Err(ValidationError::AudioFileTooLarge { size });
    }
    Ok(())
}

pub fn check_language(language: &str) -> Result<(), ValidationError> {
    if language.trim().is_empty() {
        return Err(ValidationError::LanguageEmpty);
    }
    Ok(())
}

/// Parse a user-supplied job identifier. Empty input gets its own message
/// so the user sees "must not be empty" rather than a UUID syntax error.
pub fn parse_job_id(raw: &str) -> Result<JobId, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::JobIdEmpty);
    }

    Uuid::parse_str(trimmed)
        .map(JobId::from)
        .map_err(|_| ValidationError::JobIdInvalid(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_rejected() {
        let result = check_audio_file(Path::new("/nonexistent/take-42.wav"));
        assert!(matches!(result, Err(ValidationError::AudioFileMissing(_))));
    }

    #[test]
    fn size_limit_is_inclusive() {
        assert!(check_audio_size(MAX_AUDIO_FILE_BYTES).is_ok());
        assert_eq!(
            check_audio_size(MAX_AUDIO_FILE_BYTES + 1),
            Err(ValidationError::AudioFileTooLarge {
                size: MAX_AUDIO_FILE_BYTES + 1
            })
        );
    }

    #[test]
    fn language_must_be_non_empty() {
        assert_eq!(check_language(""), Err(ValidationError::LanguageEmpty));
        assert_eq!(check_language("   "), Err(ValidationError::LanguageEmpty));
        assert!(check_language("Japanese").is_ok());
    }

    #[test]
    fn job_id_parsing() {
        assert_eq!(parse_job_id("  "), Err(ValidationError::JobIdEmpty));
        assert_eq!(
            parse_job_id("not-a-uuid"),
            Err(ValidationError::JobIdInvalid("not-a-uuid".to_string()))
        );

        let id = parse_job_id("11111111-1111-1111-1111-111111111111").unwrap();
        assert_eq!(id.to_string(), "11111111-1111-1111-1111-111111111111");
    }

    #[test]
    fn job_id_parsing_trims_whitespace() {
        let id = parse_job_id(" 11111111-1111-1111-1111-111111111111\n").unwrap();
        assert_eq!(id.to_string(), "11111111-1111-1111-1111-111111111111");
    }
}
