use crate::io::context::IoContext;
use crate::io::error::Error;
use crate::model::{
    frame::Frame,
    system::System,
    trajectory::Trajectory,
    types::{Element, Point, ResidueCategory, ResidueIndex},
};
use std::io::BufRead;
use std::str::FromStr;

const FORMAT: &str = "PDB";

/// Identity of the residue an atom record belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ResKey {
    chain_id: String,
    res_name: String,
    res_seq: i32,
    i_code: Option<char>,
}

/// Topology accumulated while reading the first model.
struct TopologyDraft {
    context_residue: Option<(ResKey, ResidueIndex)>,
    system: System,
}

/// Reads a (possibly multi-model) PDB stream into a [`Trajectory`].
///
/// Each `MODEL`/`ENDMDL` block (or each block terminated by `END`) becomes one frame; a
/// file without such delimiters is a single frame. The first frame defines the topology
/// and every later frame must list the same number of atoms in the same order.
///
/// # Errors
///
/// Returns [`Error::Parse`] for malformed atom records, [`Error::InconsistentData`] for
/// frames whose atom count differs from the first frame or for streams without atoms,
/// and [`Error::Io`] when the underlying reader fails.
pub fn read<R: BufRead>(reader: R, context: &IoContext) -> Result<Trajectory, Error> {
    let mut draft = Some(TopologyDraft {
        context_residue: None,
        system: System::new(),
    });
    let mut trajectory: Option<Trajectory> = None;
    let mut positions: Vec<Point> = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line_num = index + 1;
        let line = line.map_err(|e| Error::from_io(e, None))?;

        if line.starts_with("ATOM  ") || line.starts_with("HETATM") {
            positions.push(parse_coordinates(&line, line_num)?);
            if let Some(draft) = draft.as_mut() {
                parse_topology(&line, line_num, context, draft)?;
            }
        } else if line.starts_with("MODEL") || line.starts_with("ENDMDL") || line.trim_end() == "END"
        {
            flush_frame(&mut positions, &mut draft, &mut trajectory)?;
        }
    }
    flush_frame(&mut positions, &mut draft, &mut trajectory)?;

    trajectory.ok_or_else(|| Error::inconsistent_data(FORMAT, None, "no atom records found"))
}

fn flush_frame(
    positions: &mut Vec<Point>,
    draft: &mut Option<TopologyDraft>,
    trajectory: &mut Option<Trajectory>,
) -> Result<(), Error> {
    if positions.is_empty() {
        return Ok(());
    }
    let frame = Frame::new(std::mem::take(positions));

    if let Some(draft) = draft.take() {
        *trajectory = Some(Trajectory::new(draft.system));
    }
    let Some(trajectory) = trajectory.as_mut() else {
        return Ok(());
    };

    let model_number = trajectory.frame_count() + 1;
    let expected = trajectory.system().atom_count();
    trajectory.push_frame(frame).map_err(|rejected| {
        Error::inconsistent_data(
            FORMAT,
            None,
            format!(
                "model {} has {} atoms, expected {}",
                model_number,
                rejected.len(),
                expected
            ),
        )
    })
}

fn parse_coordinates(line: &str, line_num: usize) -> Result<Point, Error> {
    if line.len() < 54 {
        return Err(Error::parse(FORMAT, None, line_num, "Atom record too short"));
    }

    let coordinate = |start: usize, axis: &str| {
        field(line, start, start + 8)
            .parse::<f64>()
            .map_err(|_| Error::parse(FORMAT, None, line_num, format!("Invalid {} coordinate", axis)))
    };

    Ok(Point::new(
        coordinate(30, "X")?,
        coordinate(38, "Y")?,
        coordinate(46, "Z")?,
    ))
}

fn parse_topology(
    line: &str,
    line_num: usize,
    context: &IoContext,
    draft: &mut TopologyDraft,
) -> Result<(), Error> {
    let atom_name = field(line, 12, 16);
    let res_name = field(line, 17, 21);
    let chain_id = field(line, 21, 22);
    let res_seq = field(line, 22, 26)
        .parse::<i32>()
        .map_err(|_| Error::parse(FORMAT, None, line_num, "Invalid residue sequence number"))?;
    let i_code = line.get(26..27).and_then(|s| s.chars().next()).filter(|c| *c != ' ');

    let key = ResKey {
        chain_id: chain_id.to_string(),
        res_name: res_name.to_string(),
        res_seq,
        i_code,
    };

    let category = context.classify_residue(res_name);
    let residue = match &draft.context_residue {
        Some((current, index)) if *current == key => *index,
        _ => {
            let index = draft
                .system
                .push_residue(chain_id, res_name, res_seq, category);
            if let Some(residue) = draft.system.residue_mut(index) {
                residue.insertion_code = i_code;
            }
            draft.context_residue = Some((key, index));
            index
        }
    };

    let element_str = field(line, 76, 78);
    let element = if element_str.is_empty() {
        parse_element_from_name(atom_name, category)
    } else {
        Element::from_str(element_str).unwrap_or(Element::Unknown)
    };

    draft.system.push_atom(residue, atom_name, element);
    Ok(())
}

/// Trimmed fixed-width column, empty when the line is too short.
fn field(line: &str, start: usize, end: usize) -> &str {
    let end = end.min(line.len());
    line.get(start..end).map(str::trim).unwrap_or("")
}

/// Infers the element from an atom name when columns 77-78 are blank.
///
/// Only monatomic ions use the full two-letter name (`CL`, `NA`, `ZN`); elsewhere the
/// first letter wins so that `CA` in a protein stays a carbon.
fn parse_element_from_name(name: &str, category: ResidueCategory) -> Element {
    let symbol: String = name
        .chars()
        .skip_while(|c| !c.is_ascii_alphabetic())
        .take_while(|c| c.is_ascii_alphabetic())
        .collect();

    if category == ResidueCategory::Ion {
        if let Ok(element) = Element::from_str(&symbol) {
            return element;
        }
    }

    symbol
        .get(0..1)
        .and_then(|first| Element::from_str(first).ok())
        .unwrap_or(Element::Unknown)
}
