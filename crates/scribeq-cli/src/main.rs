use anyhow::Result;
use clap::{Parser, Subcommand};
use scribeq_core::{DummyJobClient, HttpJobClient, JobService, ServerConfig};

mod commands;
mod ui;

use commands::{cancel, remove, result, submit};

#[derive(Parser)]
#[command(
    name = "scribeq",
    version,
    about = "Submit audio to a transcription server and fetch results"
)]
struct Cli {
    /// Server host (overrides SCRIBEQ_SERVER_HOST)
    #[arg(long, global = true)]
    host: Option<String>,

    /// Server port (overrides SCRIBEQ_SERVER_PORT)
    #[arg(long, global = true)]
    port: Option<u16>,

    /// Trace requests and responses to stderr
    #[arg(long, global = true)]
    verbose: bool,

    /// Run against a built-in fake server, no network needed
    #[arg(long, global = true, hide = true)]
    dummy: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Submit an audio file for transcription
    Submit(submit::SubmitArgs),
    /// Look up the result of a submitted job
    Result(result::ResultArgs),
    /// Cancel a queued job
    Cancel(cancel::CancelArgs),
    /// Remove a stored result from the server
    Remove(remove::RemoveArgs),
}

#[tokio::main]
async fn main() {
    // .env is optional; a missing file is fine
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    scribeq_core::set_verbose(cli.verbose);

    if let Err(error) = run(cli).await {
        ui::error(&format!("{error:#}"));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = ServerConfig::resolve(cli.host, cli.port)?;

    let service: Box<dyn JobService> = if cli.dummy {
        Box::new(DummyJobClient::default())
    } else {
        Box::new(HttpJobClient::new(config))
    };

    match cli.command {
        Command::Submit(args) => submit::run(service.as_ref(), args).await,
        Command::Result(args) => result::run(service.as_ref(), args).await,
        Command::Cancel(args) => cancel::run(service.as_ref(), args).await,
        Command::Remove(args) => remove::run(service.as_ref(), args).await,
    }
}
