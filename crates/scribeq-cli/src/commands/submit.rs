//! Submit an audio file for transcription.
//!
//! Validation (file presence, 1 GiB limit, non-empty language) happens
//! before the request is built; a rejected submission never touches the
//! network.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use scribeq_core::{JobService, JobSubmission, SubmitStage};

use crate::ui;

#[derive(Args)]
pub struct SubmitArgs {
    /// Audio file to transcribe (up to 1 GiB)
    pub file: PathBuf,

    /// Language of the recording, e.g. "Japanese"
    #[arg(short, long)]
    pub language: String,

    /// Copy the returned job id to the clipboard
    #[arg(long)]
    pub copy: bool,
}

pub async fn run(service: &dyn JobService, args: SubmitArgs) -> Result<()> {
    let submission =
        JobSubmission::from_file(&args.file, &args.language)?.with_progress(|stage| match stage {
            SubmitStage::Uploading => ui::info("Uploading audio..."),
            SubmitStage::Waiting => ui::info("Waiting for the server..."),
        });

    let job_id = service.submit_job_async(submission).await?;

    ui::success("Job submitted. Look up the result with this id:");
    println!("{job_id}");

    if args.copy {
        scribeq_core::copy_to_clipboard(&job_id.to_string())?;
        ui::info("Job id copied to clipboard");
    }

    Ok(())
}
