use std::fs::File;
use std::io::{self as stdio, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use indicatif::{ProgressBar, ProgressStyle};
use is_terminal::IsTerminal;

use bio_bridge::Trajectory;
use bio_bridge::io::{IoContext, read_pdb_trajectory};
use bio_bridge::ops::PresenceTable;

pub mod info;
pub mod scan;

/// Aggregated IO parameters shared by every subcommand.
#[derive(Debug, Clone, Default)]
pub struct IoParameters {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

/// Loads a trajectory from the configured input source.
pub fn load_input(params: &IoParameters) -> Result<Trajectory> {
    let io_context = IoContext::new_default();

    let trajectory = if let Some(path) = &params.input {
        let file = File::open(path)
            .with_context(|| format!("Failed to open input file {}", path.display()))?;
        let reader = BufReader::new(file);
        run_with_spinner("Reading trajectory", || {
            read_pdb_trajectory(reader, &io_context)
                .map_err(|e| e.with_path(path))
                .map_err(anyhow::Error::new)
        })
        .with_context(|| format!("Failed to parse PDB input from {}", path.display()))?
    } else {
        let stdin = stdio::stdin();
        if stdin.is_terminal() {
            bail!(
                "No --input provided and stdin is a TTY. Provide -i/--input or pipe a trajectory into biobridge."
            );
        }
        let reader = BufReader::new(stdin.lock());
        run_with_spinner("Reading trajectory", || {
            read_pdb_trajectory(reader, &io_context).map_err(anyhow::Error::new)
        })
        .context("Failed to parse PDB input from stdin")?
    };

    log::info!("loaded {}", trajectory);
    Ok(trajectory)
}

/// Writes the presence table to the configured output destination.
pub fn save_table(table: &PresenceTable, params: &IoParameters) -> Result<()> {
    match params.output.as_deref() {
        Some(path) => write_table_to_file(table, path),
        None => {
            let stdout = stdio::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            table
                .write_csv(&mut writer)
                .context("Failed to write presence table to stdout")?;
            writer.flush().context("Failed to flush stdout")?;
            Ok(())
        }
    }
}

fn write_table_to_file(table: &PresenceTable, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    table
        .write_csv(&mut writer)
        .with_context(|| format!("Failed to write presence table to {}", path.display()))?;
    writer.flush().context("Failed to flush output writer")?;
    Ok(())
}

/// Wraps long-running operations with a spinner rendered to stderr.
pub fn run_with_spinner<T, F>(message: &str, work: F) -> Result<T>
where
    F: FnOnce() -> Result<T>,
{
    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    spinner.set_style(style);
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner.set_message(message.to_string());

    let result = work();

    match &result {
        Ok(_) => spinner.finish_with_message(format!("{} ✓", message)),
        Err(_) => spinner.abandon_with_message(format!("{} ✗", message)),
    }

    result
}

/// Progress bar over the frames of a scan, rendered to stderr.
pub fn frame_progress(frame_count: usize) -> ProgressBar {
    let bar = ProgressBar::new(frame_count as u64);
    let style = ProgressStyle::with_template(
        "{spinner:.green} Scanning frames [{bar:40.cyan/blue}] {pos}/{len} ({eta})",
    )
    .map(|style| style.progress_chars("##-"))
    .unwrap_or_else(|_| ProgressStyle::default_bar());
    bar.set_style(style);
    bar
}

/// Returns true when stdout is a TTY and no explicit output file was supplied.
pub fn interactive_stdout_requested(params: &IoParameters) -> bool {
    params.output.is_none() && stdio::stdout().is_terminal()
}

/// Ensures commands do not dump CSV output directly into an interactive terminal.
pub fn ensure_noninteractive_stdout(command: &str, params: &IoParameters) -> Result<()> {
    if interactive_stdout_requested(params) {
        bail!(
            "Refusing to stream {command} results to an interactive terminal. Use -o/--output or pipe the command into a file."
        );
    }
    Ok(())
}
