//! Look up the result of a submitted job.
//!
//! Renders one of three states: queued (with position), completed (with the
//! transcription), or not found. A 404 from the server is the not-found
//! state, not an error. Follow-up actions match the state: a queued job can
//! be cancelled, a completed result can be removed. A plain lookup never
//! mutates anything on the server; the destructive follow-ups require
//! either an interactive confirmation or their explicit flag.

use anyhow::Result;
use clap::Args;
use scribeq_core::{JobService, JobStatus, validate};

use crate::ui;

#[derive(Args)]
pub struct ResultArgs {
    /// Job id returned at submission time (UUID)
    pub job_id: String,

    /// Copy the transcription to the clipboard when completed
    #[arg(long)]
    pub copy: bool,

    /// Cancel the job without prompting if it is still queued
    #[arg(long)]
    pub cancel: bool,

    /// Remove the result from the server without prompting if it is completed
    #[arg(long, conflicts_with = "cancel")]
    pub remove: bool,
}

pub async fn run(service: &dyn JobService, args: ResultArgs) -> Result<()> {
    let job_id = validate::parse_job_id(&args.job_id)?;

    match service.get_result_async(&job_id).await? {
        JobStatus::Queued { position } => {
            if position == 0 {
                ui::info("Job is being processed right now");
            } else {
                ui::info(&format!("Job is queued at position {position}"));
            }
            if args.remove {
                ui::info("Job has not completed; nothing to remove");
            }

            if args.cancel || ui::confirm("Cancel this job?", false)? {
                service.cancel_job_async(&job_id).await?;
                ui::success("Job cancelled");
            }
        }
        JobStatus::Completed { text } => {
            ui::success("Transcription completed");
            println!("{text}");

            if args.copy {
                scribeq_core::copy_to_clipboard(&text)?;
                ui::info("Transcription copied to clipboard");
            }
            if args.cancel {
                ui::info("Job already completed; nothing to cancel");
            }

            if args.remove || ui::confirm("Remove the result from the server?", false)? {
                service.remove_result_async(&job_id).await?;
                ui::success("Result removed");
            }
        }
        JobStatus::NotFound => {
            ui::info(&format!("No job or result found for {job_id}"));
        }
    }

    Ok(())
}
