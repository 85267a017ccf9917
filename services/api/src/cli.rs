use std::path::PathBuf;

use bnb_market::error::AppError;
use clap::{Args, Parser, Subcommand};

use crate::demo::{run_demo, run_listing_search, run_route, DemoArgs, ListingSearchArgs, RouteArgs};
use crate::server;

#[derive(Parser, Debug)]
#[command(
    name = "BNB Accommodations",
    about = "Serve and explore the student accommodation marketplace from the command line",
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
    /// Query the listing catalogue
    Listings {
        #[command(subcommand)]
        command: ListingsCommand,
    },
    /// Show where a user would land after login
    Route(RouteArgs),
    /// Walk through student search, agent onboarding, and a property submission
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum ListingsCommand {
    /// Filter listings the way the student dashboard does
    Search(ListingSearchArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// CSV catalogue to serve instead of the seeded listings
    #[arg(long)]
    pub(crate) listings_csv: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Listings {
            command: ListingsCommand::Search(args),
        } => run_listing_search(args),
        Command::Route(args) => run_route(args).await,
        Command::Demo(args) => run_demo(args),
    }
}
