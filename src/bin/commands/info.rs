use std::collections::BTreeMap;
use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Args;
use nalgebra::Vector3;
use prettytable::{Table, format, row};

use bio_bridge::{FrameView, ResidueCategory, System, Trajectory};

use crate::commands::run_with_spinner;

/// Report-only command that inspects a trajectory.
#[derive(Debug, Default, Args)]
pub struct InfoArgs {}

/// Computes and prints trajectory statistics.
pub fn run(trajectory: &Trajectory, _args: &InfoArgs) -> Result<()> {
    let (chain_reports, category_reports, extent) = run_with_spinner("Analyzing trajectory", || {
        let chains = collect_chain_reports(trajectory.system());
        let categories = collect_category_reports(trajectory.system());
        let extent = trajectory.frame(0).and_then(|frame| bounding_extent(&frame));
        Ok((chains, categories, extent))
    })?;

    print_tables(trajectory, &chain_reports, &category_reports, extent)?;
    Ok(())
}

fn collect_chain_reports(system: &System) -> Vec<ChainReport> {
    system
        .chain_ids()
        .into_iter()
        .map(|id| {
            let residues: Vec<_> = system
                .residues()
                .iter()
                .filter(|residue| residue.chain_id == id)
                .collect();
            let mut composition: Vec<&'static str> = Vec::new();
            for residue in &residues {
                let name = residue.category.name();
                if !composition.contains(&name) {
                    composition.push(name);
                }
            }

            ChainReport {
                id: if id.is_empty() { "-".to_string() } else { id.to_string() },
                residues: residues.len(),
                atoms: residues.iter().map(|residue| residue.atom_count()).sum(),
                composition: composition.join(", "),
            }
        })
        .collect()
}

fn collect_category_reports(system: &System) -> BTreeMap<&'static str, (usize, usize)> {
    let mut reports = BTreeMap::new();
    for category in [
        ResidueCategory::Protein,
        ResidueCategory::Nucleic,
        ResidueCategory::Water,
        ResidueCategory::Ion,
        ResidueCategory::Hetero,
    ] {
        let (residues, atoms) = system
            .residues()
            .iter()
            .filter(|residue| residue.category == category)
            .fold((0, 0), |(r, a), residue| (r + 1, a + residue.atom_count()));
        if residues > 0 {
            reports.insert(category.name(), (residues, atoms));
        }
    }
    reports
}

/// Axis-aligned size of the first frame in ångströms.
fn bounding_extent(frame: &FrameView<'_>) -> Option<Vector3<f64>> {
    let system = frame.system();
    let mut positions = (0..system.atom_count()).filter_map(|atom| frame.position(atom));
    let first = positions.next()?;

    let (min, max) = positions.fold((first, first), |(min, max), p| {
        (
            min.coords.inf(&p.coords).into(),
            max.coords.sup(&p.coords).into(),
        )
    });
    Some(max - min)
}

fn print_tables(
    trajectory: &Trajectory,
    chains: &[ChainReport],
    categories: &BTreeMap<&'static str, (usize, usize)>,
    extent: Option<Vector3<f64>>,
) -> Result<()> {
    let mut stderr = io::stderr().lock();
    let system = trajectory.system();

    print_boxed_label(&mut stderr, "BioBridge Trajectory Report")?;
    writeln!(&mut stderr)?;

    let mut chain_table = Table::new();
    print_boxed_label(&mut stderr, "Chain Breakdown")?;
    chain_table.set_format(*format::consts::FORMAT_BOX_CHARS);
    chain_table.set_titles(row!["Chain", "Residues", "Atoms", "Composition"]);
    for report in chains {
        chain_table.add_row(row![
            report.id,
            report.residues,
            report.atoms,
            report.composition
        ]);
    }
    chain_table
        .print(&mut stderr)
        .context("Failed to render chain summary")?;
    writeln!(&mut stderr)?;

    let mut category_table = Table::new();
    print_boxed_label(&mut stderr, "Residue Categories")?;
    category_table.set_format(*format::consts::FORMAT_BOX_CHARS);
    category_table.set_titles(row!["Category", "Residues", "Atoms"]);
    for (name, (residues, atoms)) in categories {
        category_table.add_row(row![name, residues, atoms]);
    }
    category_table
        .print(&mut stderr)
        .context("Failed to render category summary")?;
    writeln!(&mut stderr)?;

    let mut summary_table = Table::new();
    print_boxed_label(&mut stderr, "Trajectory Summary")?;
    summary_table.set_format(*format::consts::FORMAT_BOX_CHARS);
    summary_table.set_titles(row!["Metric", "Value"]);
    summary_table.add_row(row!["Frames", trajectory.frame_count()]);
    summary_table.add_row(row!["Chains", chains.len()]);
    summary_table.add_row(row!["Residues", system.residue_count()]);
    summary_table.add_row(row!["Atoms", system.atom_count()]);
    match extent {
        Some(size) => summary_table.add_row(row![
            "Extent of Frame 0 (Å)",
            format!("x = {:.2}, y = {:.2}, z = {:.2}", size.x, size.y, size.z)
        ]),
        None => summary_table.add_row(row!["Extent of Frame 0 (Å)", "Not available"]),
    };
    summary_table
        .print(&mut stderr)
        .context("Failed to render trajectory summary")?;

    Ok(())
}

fn print_boxed_label<W: Write>(writer: &mut W, title: &str) -> io::Result<()> {
    let inner = format!(" {title} ");
    let width = inner.chars().count();
    writeln!(writer, "╭{}╮", "─".repeat(width))?;
    writeln!(writer, "│{}│", inner)?;
    writeln!(writer, "╰{}╯", "─".repeat(width))?;
    Ok(())
}

#[derive(Debug)]
struct ChainReport {
    id: String,
    residues: usize,
    atoms: usize,
    composition: String,
}
