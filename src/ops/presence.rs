use crate::model::system::System;
use crate::model::types::ResidueIndex;
use crate::ops::error::Error;
use std::io::Write;

/// Frame-by-residue membership table of bridged residues.
///
/// Columns are fixed at construction in ascending residue order. Row `i` corresponds to
/// the `i`-th frame list passed in, and cell `(i, j)` is set when column `j` appears in
/// that list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresenceTable {
    columns: Vec<ResidueIndex>,
    labels: Vec<String>,
    rows: Vec<Vec<bool>>,
}

impl PresenceTable {
    /// Builds the table, labelling each column `chain:resnameresid`.
    ///
    /// # Arguments
    ///
    /// * `system` - Topology used to label the column residues.
    /// * `residues` - Residues to report; duplicates are collapsed.
    /// * `per_frame` - Bridged residues of each frame, in frame order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingResidue`] if a column residue is not in `system`.
    pub fn from_frames<T>(
        system: &System,
        residues: &[ResidueIndex],
        per_frame: &[T],
    ) -> Result<Self, Error>
    where
        T: AsRef<[ResidueIndex]>,
    {
        let mut columns = residues.to_vec();
        columns.sort_unstable();
        columns.dedup();

        let labels = columns
            .iter()
            .map(|&residue| {
                system
                    .residue_label(residue)
                    .map(|label| label.to_string())
                    .ok_or(Error::MissingResidue { residue })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let rows = per_frame
            .iter()
            .map(|terminals| {
                let terminals = terminals.as_ref();
                columns.iter().map(|c| terminals.contains(c)).collect()
            })
            .collect();

        Ok(Self {
            columns,
            labels,
            rows,
        })
    }

    /// Column residues in ascending index order.
    pub fn columns(&self) -> &[ResidueIndex] {
        &self.columns
    }

    /// Column headers, parallel to [`PresenceTable::columns`].
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// One row per frame with a presence flag per column.
    pub fn rows(&self) -> &[Vec<bool>] {
        &self.rows
    }

    /// Number of frames each column residue appears in.
    pub fn totals(&self) -> Vec<usize> {
        (0..self.columns.len())
            .map(|j| self.rows.iter().filter(|row| row[j]).count())
            .collect()
    }

    /// Writes the table as CSV: a header, one row per frame, and a closing `total` row.
    pub fn write_csv<W: Write>(&self, out: &mut W) -> Result<(), Error> {
        write!(out, "frame")?;
        for label in &self.labels {
            write!(out, ",{}", label)?;
        }
        writeln!(out)?;

        for (frame, row) in self.rows.iter().enumerate() {
            write!(out, "{}", frame)?;
            for &present in row {
                write!(out, ",{}", u8::from(present))?;
            }
            writeln!(out)?;
        }

        write!(out, "total")?;
        for total in self.totals() {
            write!(out, ",{}", total)?;
        }
        writeln!(out)?;
        Ok(())
    }
}

/// Builds a [`PresenceTable`] and writes it to `out` as CSV.
pub fn render_presence_table<W, T>(
    out: &mut W,
    system: &System,
    residues: &[ResidueIndex],
    per_frame: &[T],
) -> Result<(), Error>
where
    W: Write,
    T: AsRef<[ResidueIndex]>,
{
    PresenceTable::from_frames(system, residues, per_frame)?.write_csv(out)
}
