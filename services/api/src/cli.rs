use crate::demo::{run_demo, DemoArgs};
use crate::search::{run_search, SearchArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use haulsite::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Haulsite",
    about = "Serve and exercise the junk-removal site content and intake API",
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
    /// Search FAQs, blog posts or locations in the configured content document
    Search(SearchArgs),
    /// Walk a quote request through the step form, uploading a photo to disk
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
        Command::Search(args) => run_search(args).await,
        Command::Demo(args) => run_demo(args).await,
    }
}
