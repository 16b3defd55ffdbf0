use std::process::ExitCode;

use clap::{Parser, Subcommand};
use dgeumi::command;
use dgeumi::runtime;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// trace, debug, info, warn, error or off
    #[arg(long = "log-level", global = true, default_value = "info")]
    log_level: runtime::LogLevel,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Demux(command::DemuxCMD),
    Count(command::CountCMD),
    Inspect(command::InspectCMD),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    runtime::setup_global_logger(cli.log_level);

    let result = match cli.command {
        Commands::Demux(mut cmd) => cmd.try_execute(),
        Commands::Count(mut cmd) => cmd.try_execute(),
        Commands::Inspect(mut cmd) => cmd.try_execute(),
    };

    if let Err(e) = result {
        let category = e
            .downcast_ref::<runtime::Error>()
            .map(runtime::Error::category)
            .unwrap_or("Error");
        eprintln!("{}: {:#}", category, e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
