use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use prettytable::{Table, format, row};

use bio_bridge::ops::{
    BridgeConfig, BridgeScanner, FrameCursor, GeometricDetector, PresenceTable, TrajectoryCursor,
};
use bio_bridge::select::{self, Expression};
use bio_bridge::{AtomSet, FrameView, Trajectory};

use crate::commands::frame_progress;

#[derive(Debug, Args)]
pub struct ScanArgs {
    /// Selection for the source atoms (e.g. "resn LIG").
    #[arg(long, value_name = "SELECTION")]
    pub source: String,
    /// Selection for the target atoms (e.g. "protein").
    #[arg(long, value_name = "SELECTION")]
    pub target: String,
    /// TOML file with scan parameters; command-line flags take precedence.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Neighborhood around the source atoms considered for hydrogen bonds (Å) [default: 5.0].
    #[arg(long)]
    pub radius: Option<f64>,
    /// Maximum donor–acceptor distance (Å) [default: 3.0].
    #[arg(long)]
    pub max_distance: Option<f64>,
    /// Minimum donor–H···acceptor angle (degrees) [default: 120].
    #[arg(long)]
    pub min_angle: Option<f64>,
    /// Maximum number of bridging residues between source and target [default: 2].
    #[arg(long = "waters", value_name = "N")]
    pub max_waters: Option<usize>,
    /// Maximum donor–hydrogen distance (Å) used to attach hydrogens to donors.
    #[arg(long, default_value_t = 1.25)]
    pub covalent_cutoff: f64,
    /// Treat sulfur atoms as donors and acceptors.
    #[arg(long)]
    pub include_sulfur: bool,
    /// Re-evaluate the selections on every frame instead of only the first.
    #[arg(long)]
    pub dynamic: bool,
    /// Skip the bridged-residue summary printed to stderr.
    #[arg(long)]
    pub quiet: bool,
}

/// Scans the trajectory and returns the frame × residue presence table.
pub fn run(trajectory: &Trajectory, args: &ScanArgs) -> Result<PresenceTable> {
    let config = resolve_config(args)?;
    config.validate().context("Invalid scan parameters")?;

    let source_expr = select::parse(&args.source)
        .with_context(|| format!("Invalid --source selection '{}'", args.source))?;
    let target_expr = select::parse(&args.target)
        .with_context(|| format!("Invalid --target selection '{}'", args.target))?;

    let detector = GeometricDetector::default()
        .with_covalent_cutoff(args.covalent_cutoff)
        .with_sulfur(args.include_sulfur);
    let scanner = BridgeScanner::new(detector).with_config(config);
    log::info!("scan parameters: {:?}", scanner.config());
    let mut cursor = FrameCursor::new(trajectory).context("Trajectory contains no frames")?;
    let progress = frame_progress(cursor.frame_count());

    let result = if args.dynamic {
        scanner.scan_trajectory_with(
            &mut cursor,
            |frame| Ok((evaluate(&source_expr, frame)?, evaluate(&target_expr, frame)?)),
            |_| progress.inc(1),
        )
    } else {
        let first = cursor.frame();
        let source = evaluate(&source_expr, &first)?;
        let target = evaluate(&target_expr, &first)?;
        warn_if_empty("source", &args.source, &source);
        warn_if_empty("target", &args.target, &target);
        scanner.scan_trajectory_with(
            &mut cursor,
            |_| Ok((source.clone(), target.clone())),
            |_| progress.inc(1),
        )
    };

    let result = match result {
        Ok(result) => {
            progress.finish_and_clear();
            result
        }
        Err(err) => {
            progress.abandon();
            return Err(anyhow::Error::new(err).context("Bridge scan failed"));
        }
    };

    let table =
        PresenceTable::from_frames(trajectory.system(), &result.residues(), result.per_frame())
            .context("Failed to build presence table")?;

    if !args.quiet {
        print_summary(&table).context("Failed to render scan summary")?;
    }
    Ok(table)
}

fn resolve_config(args: &ScanArgs) -> Result<BridgeConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            BridgeConfig::from_toml_str(&content)
                .with_context(|| format!("Failed to parse config file {}", path.display()))?
        }
        None => BridgeConfig::default(),
    };

    if let Some(radius) = args.radius {
        config.radius = radius;
    }
    if let Some(max_distance) = args.max_distance {
        config.max_distance = max_distance;
    }
    if let Some(min_angle) = args.min_angle {
        config.min_angle = min_angle;
    }
    if let Some(max_waters) = args.max_waters {
        config.max_waters = max_waters;
    }
    Ok(config)
}

fn evaluate(expression: &Expression, frame: &FrameView<'_>) -> Result<AtomSet, select::Error> {
    select::evaluate(expression, frame.system(), Some(frame))
}

fn warn_if_empty(role: &str, query: &str, atoms: &AtomSet) {
    if atoms.is_empty() {
        log::warn!("{} selection '{}' matches no atoms in the first frame", role, query);
    }
}

fn print_summary(table: &PresenceTable) -> Result<()> {
    let mut stderr = io::stderr().lock();
    let frames = table.rows().len();

    if table.columns().is_empty() {
        writeln!(&mut stderr, "No bridges found in {} frames.", frames)?;
        return Ok(());
    }

    let mut summary = Table::new();
    summary.set_format(*format::consts::FORMAT_BOX_CHARS);
    summary.set_titles(row!["Residue", "Frames", "Occupancy"]);

    let mut entries: Vec<_> = table.labels().iter().zip(table.totals()).collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    for (label, total) in entries {
        let occupancy = if frames == 0 {
            0.0
        } else {
            100.0 * total as f64 / frames as f64
        };
        summary.add_row(row![label, total, format!("{:.1} %", occupancy)]);
    }

    summary
        .print(&mut stderr)
        .context("Failed to render bridged residue summary")?;
    Ok(())
}
