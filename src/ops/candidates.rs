use crate::model::atom_set::AtomSet;
use crate::model::frame::FrameView;
use crate::ops::config::check_distance;
use crate::ops::error::Error;

/// Atoms within `radius` Å of any source atom in `frame`, source atoms included.
///
/// The neighborhood is measured once around the source set; it does not grow hop by hop
/// through intermediate residues.
pub fn select_candidates(
    frame: &FrameView<'_>,
    source: &AtomSet,
    radius: f64,
) -> Result<AtomSet, Error> {
    check_distance("radius", radius)?;
    Ok(frame.select_within(source, radius))
}
