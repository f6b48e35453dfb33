use crate::demo::{run_code, run_demo, run_score, CodeArgs, DemoArgs, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use utility_dashboard::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Utility Dashboard",
    about = "Issue property codes, score utility costs, and serve the property API",
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
    /// Generate a property code without storing it
    Code {
        #[command(subcommand)]
        command: CodeCommand,
    },
    /// Score monthly utility costs and show the penalties applied
    Score(ScoreArgs),
    /// Register a sample portfolio in memory and walk through code lookups
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
pub(crate) enum CodeCommand {
    /// Code for a single property (SC- prefix)
    Single(CodeArgs),
    /// Code for a real estate complex (RC- prefix)
    Complex(CodeArgs),
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
        Command::Code { command } => run_code(command),
        Command::Score(args) => run_score(args),
        Command::Demo(args) => run_demo(args),
    }
}
