use crate::demo::{run_demo, run_profile_import, run_profile_score, ImportArgs, ScoreArgs};
use crate::server;
use care_connect::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "Care Connect",
    about = "Score caregiver profiles and run the Care Connect profile service",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score caregiver profiles from JSON or a CSV export
    Profile {
        #[command(subcommand)]
        command: ProfileCommand,
    },
    /// Walk through saving, verifying, and searching sample caregivers
    Demo,
}

#[derive(Subcommand, Debug)]
enum ProfileCommand {
    /// Score a single profile stored as JSON
    Score(ScoreArgs),
    /// Score every row of a caregiver CSV export
    Import(ImportArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Profile {
            command: ProfileCommand::Score(args),
        } => run_profile_score(args),
        Command::Profile {
            command: ProfileCommand::Import(args),
        } => run_profile_import(args),
        Command::Demo => run_demo(),
    }
}
