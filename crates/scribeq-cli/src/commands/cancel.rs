//! Cancel a queued job.

use anyhow::Result;
use clap::Args;
use scribeq_core::{JobService, validate};

use crate::ui;

#[derive(Args)]
pub struct CancelArgs {
    /// Job id to cancel (UUID)
    pub job_id: String,

    /// Skip the confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,
}

pub async fn run(service: &dyn JobService, args: CancelArgs) -> Result<()> {
    let job_id = validate::parse_job_id(&args.job_id)?;

    if !args.yes && !ui::confirm(&format!("Cancel job {job_id}?"), false)? {
        ui::info("Nothing cancelled");
        return Ok(());
    }

    service.cancel_job_async(&job_id).await?;
    ui::success("Job cancelled");
    Ok(())
}
