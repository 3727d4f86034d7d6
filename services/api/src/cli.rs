use crate::demo::{run_calculate, run_demo, run_score_report, CalculateArgs, DemoArgs, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use esg_engine::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Supplier ESG Compass",
    about = "Run and demonstrate the supplier ESG due-diligence service from the command line",
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
    /// Work with CSDDD self-assessments
    Assessment {
        #[command(subcommand)]
        command: AssessmentCommand,
    },
    /// Work with Scope 1/2/3 emission calculations
    Emissions {
        #[command(subcommand)]
        command: EmissionsCommand,
    },
    /// Run an end-to-end CLI demo covering assessment scoring and emission accounting
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum AssessmentCommand {
    /// Score an answer file and render the violation report
    Score(ScoreArgs),
}

#[derive(Subcommand, Debug)]
enum EmissionsCommand {
    /// Resolve an emission factor and calculate total emissions
    Calculate(CalculateArgs),
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
        Command::Assessment {
            command: AssessmentCommand::Score(args),
        } => run_score_report(args),
        Command::Emissions {
            command: EmissionsCommand::Calculate(args),
        } => run_calculate(args),
        Command::Demo(args) => run_demo(args),
    }
}
