use super::{Error, Expression, parse};
use crate::model::atom_set::AtomSet;
use crate::model::frame::FrameView;
use crate::model::system::System;

/// Evaluates an expression against a topology.
///
/// Property terms only need the [`System`]; `within` terms need coordinates and fail with
/// [`Error::MissingCoordinates`] when `frame` is `None`.
pub fn evaluate(
    expression: &Expression,
    system: &System,
    frame: Option<&FrameView<'_>>,
) -> Result<AtomSet, Error> {
    let selected = match expression {
        Expression::All => system.all_atoms(),
        Expression::None => AtomSet::new(),
        Expression::Chain(ids) => {
            system.atoms_where(|_, residue| ids.iter().any(|id| residue.chain_id == id.as_str()))
        }
        Expression::ResidueName(names) => system.atoms_where(|_, residue| {
            names
                .iter()
                .any(|name| residue.name.eq_ignore_ascii_case(name))
        }),
        Expression::ResidueNumber(ranges) => system
            .atoms_where(|_, residue| ranges.iter().any(|range| range.contains(&residue.number))),
        Expression::AtomName(names) => system.atoms_where(|atom, _| {
            names.iter().any(|name| atom.name.eq_ignore_ascii_case(name))
        }),
        Expression::Element(elements) => {
            system.atoms_where(|atom, _| elements.contains(&atom.element))
        }
        Expression::Index(ranges) => (0..system.atom_count())
            .filter(|index| ranges.iter().any(|range| range.contains(index)))
            .collect(),
        Expression::Category(category) => {
            system.atoms_where(|_, residue| residue.category == *category)
        }
        Expression::Hydrogen => system.atoms_where(|atom, _| atom.is_hydrogen()),
        Expression::Within(distance, inner) => {
            let frame = frame.ok_or(Error::MissingCoordinates)?;
            let source = evaluate(inner, system, Some(frame))?;
            frame.select_within(&source, *distance)
        }
        Expression::And(left, right) => {
            evaluate(left, system, frame)?.intersection(&evaluate(right, system, frame)?)
        }
        Expression::Or(left, right) => {
            evaluate(left, system, frame)?.union(&evaluate(right, system, frame)?)
        }
        Expression::Not(inner) => system
            .all_atoms()
            .difference(&evaluate(inner, system, frame)?),
    };
    Ok(selected)
}

/// Parses `query` and evaluates it against one frame.
pub fn select_atoms(query: &str, frame: &FrameView<'_>) -> Result<AtomSet, Error> {
    let expression = parse(query)?;
    evaluate(&expression, frame.system(), Some(frame))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::frame::Frame;
    use crate::model::types::{Element, Point, ResidueCategory};

    /// Ligand at the origin, one water 3 Å away, one protein residue 10 Å away.
    fn fixture() -> (System, Frame) {
        let mut system = System::new();
        let lig = system.push_residue("L", "LIG", 1, ResidueCategory::Hetero);
        system.push_atom(lig, "O1", Element::O);
        system.push_atom(lig, "H1", Element::H);
        let wat = system.push_residue("W", "HOH", 501, ResidueCategory::Water);
        system.push_atom(wat, "OW", Element::O);
        let ser = system.push_residue("A", "SER", 42, ResidueCategory::Protein);
        system.push_atom(ser, "OG", Element::O);
        system.push_atom(ser, "HG", Element::H);

        let frame = Frame::new(vec![
            Point::new(0.0, 0.0, 0.0),
            Point::new(0.96, 0.0, 0.0),
            Point::new(3.0, 0.0, 0.0),
            Point::new(10.0, 0.0, 0.0),
            Point::new(10.96, 0.0, 0.0),
        ]);
        (system, frame)
    }

    fn indices(set: &AtomSet) -> Vec<usize> {
        set.iter().collect()
    }

    #[test]
    fn property_terms_select_expected_atoms() {
        let (system, _) = fixture();
        let eval = |query: &str| indices(&evaluate(&parse(query).unwrap(), &system, None).unwrap());

        assert_eq!(eval("resn lig"), vec![0, 1]);
        assert_eq!(eval("chain A+W"), vec![2, 3, 4]);
        assert_eq!(eval("resi 40-501"), vec![2, 3, 4]);
        assert_eq!(eval("name og"), vec![3]);
        assert_eq!(eval("elem H"), vec![1, 4]);
        assert_eq!(eval("hydrogen"), vec![1, 4]);
        assert_eq!(eval("index 1-2"), vec![1, 2]);
        assert_eq!(eval("water"), vec![2]);
        assert_eq!(eval("protein and not hydrogen"), vec![3]);
        assert_eq!(eval("water or hetero"), vec![0, 1, 2]);
        assert_eq!(eval("none"), Vec::<usize>::new());
        assert_eq!(eval("all").len(), 5);
    }

    #[test]
    fn within_uses_frame_coordinates() {
        let (system, frame) = fixture();
        let view = FrameView::new(0, &system, &frame);

        let near = select_atoms("water and within 3.5 of resn LIG", &view).unwrap();
        let far = select_atoms("protein and within 3.5 of resn LIG", &view).unwrap();

        assert_eq!(indices(&near), vec![2]);
        assert!(far.is_empty());
    }

    #[test]
    fn within_without_frame_is_an_error() {
        let (system, _) = fixture();
        let expression = parse("within 3 of water").unwrap();

        assert_eq!(
            evaluate(&expression, &system, None).unwrap_err(),
            Error::MissingCoordinates
        );
    }

    #[test]
    fn select_atoms_propagates_parse_errors() {
        let (system, frame) = fixture();
        let view = FrameView::new(0, &system, &frame);

        assert!(matches!(
            select_atoms("resn", &view),
            Err(Error::Parse { .. })
        ));
    }
}
