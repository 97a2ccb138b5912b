use crate::demo::{run_catalog, run_demo, run_match, CatalogArgs, DemoArgs, MatchArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use realty_ai::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Realty Advisor",
    about = "Match property listings to client preferences and serve the advisory API",
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
    /// Rank a catalog against a preferences JSON file
    Match(MatchArgs),
    /// Print the listings of a catalog
    Catalog(CatalogArgs),
    /// Walk through the built-in catalog with a sample client brief
    Demo(DemoArgs),
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
        Command::Match(args) => run_match(args).await,
        Command::Catalog(args) => run_catalog(args),
        Command::Demo(args) => run_demo(args).await,
    }
}
