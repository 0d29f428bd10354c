mod generate;
mod inflect;
mod introspect;
mod render;

use clap::{Parser, Subcommand};
use generate::Generate;
use tracing::{error, level_filters::LevelFilter};
use tracing_subscriber::{
    fmt::{format, layer},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Subcommand, Debug)]
enum Subcommands {
    Generate(Generate),
}

#[derive(Parser, Debug)]
#[command(version, about = "Go struct generator for MySQL and SQLite tables")]
struct Args {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Subcommands,
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(if args.verbose {
            LevelFilter::DEBUG
        } else {
            LevelFilter::INFO
        })
        .with(layer().event_format(format().without_time().with_target(false).compact()))
        .init();

    let r = match args.command {
        Subcommands::Generate(cmd) => cmd.run().await,
    };

    if let Err(e) = r {
        error!("Command execution failed: {e:#}");
        return std::process::ExitCode::FAILURE;
    }

    std::process::ExitCode::SUCCESS
}
