use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

mod commands;

use commands::IoParameters;
use commands::{info, scan};

#[derive(Parser, Debug)]
#[command(
    name = "biobridge",
    about = "A command-line tool for tracking direct and water-mediated hydrogen-bond bridges across molecular dynamics trajectories.",
    version,
    author,
    arg_required_else_help = true
)]
struct Cli {
    /// Input trajectory (multi-model PDB). When omitted, stdin is used.
    #[arg(short, long, value_name = "FILE", global = true)]
    input: Option<PathBuf>,
    /// Output file path. When omitted, stdout is used.
    #[arg(short, long, value_name = "FILE", global = true)]
    output: Option<PathBuf>,
    /// Increase log verbosity (-v for info, -vv for debug, -vvv for trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Summarize the trajectory topology without scanning it.
    Info(info::InfoArgs),
    /// Scan every frame for bridges and write the residue presence table as CSV.
    Scan(scan::ScanArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let io_params = IoParameters {
        input: cli.input.clone(),
        output: cli.output.clone(),
    };

    match cli.command {
        Command::Info(args) => {
            let trajectory = commands::load_input(&io_params)?;
            info::run(&trajectory, &args)?;
        }
        Command::Scan(args) => {
            commands::ensure_noninteractive_stdout("scan", &io_params)?;
            let trajectory = commands::load_input(&io_params)?;
            let table = scan::run(&trajectory, &args)?;
            commands::save_table(&table, &io_params)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}
