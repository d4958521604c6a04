pub mod client;
#[cfg(feature = "clipboard")]
pub mod clipboard;
pub mod config;
pub mod http;
pub mod job;
pub mod validate;
pub mod verbose;

pub use client::{DummyJobClient, HttpJobClient, JobService};
#[cfg(feature = "clipboard")]
pub use clipboard::copy_to_clipboard;
pub use config::ServerConfig;
pub use job::{JobId, JobStatus, JobSubmission, SubmitStage};
pub use validate::{MAX_AUDIO_FILE_BYTES, ValidationError};
pub use verbose::set_verbose;
