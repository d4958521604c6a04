//! Remove a stored result from the server.

use anyhow::Result;
use clap::Args;
use scribeq_core::{JobService, validate};

use crate::ui;

#[derive(Args)]
pub struct RemoveArgs {
    /// Job id whose result should be removed (UUID)
    pub job_id: String,

    /// Skip the confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,
}

pub async fn run(service: &dyn JobService, args: RemoveArgs) -> Result<()> {
    let job_id = validate::parse_job_id(&args.job_id)?;

    if !args.yes && !ui::confirm(&format!("Remove the result for {job_id}?"), false)? {
        ui::info("Nothing removed");
        return Ok(());
    }

    service.remove_result_async(&job_id).await?;
    ui::success("Result removed");
    Ok(())
}
