use crate::model::atom_set::AtomSet;
use crate::model::frame::FrameView;
use crate::model::grid::Grid;
use crate::model::types::{AtomIndex, Point, ResidueIndex};
use crate::ops::config::check_distance;
use crate::ops::error::Error;
use crate::utils::parallel::*;
use std::collections::HashMap;

const DEFAULT_COVALENT_CUTOFF: f64 = 1.25;
const MIN_CELL_SIZE: f64 = 1.0;

/// A donor–acceptor atom pair that satisfies the hydrogen-bond criteria in one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HBondHit {
    pub donor: AtomIndex,
    pub acceptor: AtomIndex,
}

impl HBondHit {
    pub fn new(donor: AtomIndex, acceptor: AtomIndex) -> Self {
        Self { donor, acceptor }
    }
}

/// Source of atom-level hydrogen bonds for a single frame.
///
/// Implementations only look at atoms in `candidates`. Hits must be deterministic for a
/// given frame and candidate set.
pub trait HBondDetector {
    fn detect(
        &self,
        frame: &FrameView<'_>,
        candidates: &AtomSet,
        max_distance: f64,
        min_angle: f64,
    ) -> Result<Vec<HBondHit>, Error>;
}

impl<D: HBondDetector + ?Sized> HBondDetector for &D {
    fn detect(
        &self,
        frame: &FrameView<'_>,
        candidates: &AtomSet,
        max_distance: f64,
        min_angle: f64,
    ) -> Result<Vec<HBondHit>, Error> {
        (**self).detect(frame, candidates, max_distance, min_angle)
    }
}

/// Donor–H···acceptor detector based on distance and angle cutoffs.
///
/// Acceptors are candidate N, O, and F atoms (plus S when `include_sulfur` is set). A
/// donor is any such atom carrying a candidate hydrogen of the same residue within
/// `covalent_cutoff`. A pair is reported when the donor–acceptor distance is at most
/// `max_distance` and, for at least one of the donor's hydrogens, the D–H···A angle is at
/// least `min_angle` degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometricDetector {
    pub covalent_cutoff: f64,
    pub include_sulfur: bool,
}

impl Default for GeometricDetector {
    fn default() -> Self {
        Self {
            covalent_cutoff: DEFAULT_COVALENT_CUTOFF,
            include_sulfur: false,
        }
    }
}

struct Donor {
    atom: AtomIndex,
    position: Point,
    hydrogens: Vec<Point>,
}

impl GeometricDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_covalent_cutoff(mut self, cutoff: f64) -> Self {
        self.covalent_cutoff = cutoff;
        self
    }

    pub fn with_sulfur(mut self, include_sulfur: bool) -> Self {
        self.include_sulfur = include_sulfur;
        self
    }

    fn collect_donors(
        &self,
        polar: &[(AtomIndex, Point)],
        hydrogens: &HashMap<ResidueIndex, Vec<Point>>,
        frame: &FrameView<'_>,
    ) -> Vec<Donor> {
        let system = frame.system();
        let cutoff_sq = self.covalent_cutoff * self.covalent_cutoff;

        polar
            .iter()
            .filter_map(|&(atom, position)| {
                let residue = system.residue_of(atom)?;
                let attached: Vec<Point> = hydrogens
                    .get(&residue)?
                    .iter()
                    .filter(|h| (**h - position).norm_squared() <= cutoff_sq)
                    .copied()
                    .collect();
                (!attached.is_empty()).then_some(Donor {
                    atom,
                    position,
                    hydrogens: attached,
                })
            })
            .collect()
    }
}

impl HBondDetector for GeometricDetector {
    fn detect(
        &self,
        frame: &FrameView<'_>,
        candidates: &AtomSet,
        max_distance: f64,
        min_angle: f64,
    ) -> Result<Vec<HBondHit>, Error> {
        check_distance("max_distance", max_distance)?;
        check_distance("covalent_cutoff", self.covalent_cutoff)?;
        if !(0.0..=180.0).contains(&min_angle) {
            return Err(Error::invalid_parameter(
                "min_angle",
                format!("{} is outside [0, 180] degrees", min_angle),
            ));
        }

        let system = frame.system();
        let mut polar = Vec::new();
        let mut hydrogens: HashMap<ResidueIndex, Vec<Point>> = HashMap::new();

        for atom in candidates.iter() {
            let (Some(info), Some(position)) = (system.atom(atom), frame.position(atom)) else {
                return Err(Error::UnknownAtom { atom });
            };
            if info.element.is_hydrogen() {
                hydrogens.entry(info.residue).or_default().push(position);
            } else if info.element.is_hbond_capable(self.include_sulfur) {
                polar.push((atom, position));
            }
        }

        let donors = self.collect_donors(&polar, &hydrogens, frame);
        log::trace!(
            "frame {}: {} polar atoms, {} donors",
            frame.index(),
            polar.len(),
            donors.len()
        );
        if donors.is_empty() {
            return Ok(Vec::new());
        }

        let acceptors = Grid::new(
            polar.iter().map(|&(atom, position)| (position, (atom, position))),
            max_distance.max(MIN_CELL_SIZE),
        );

        let mut hits: Vec<HBondHit> = donors
            .par_iter()
            .flat_map(|donor| {
                acceptors
                    .within(donor.position, max_distance)
                    .filter(|(acceptor, _)| *acceptor != donor.atom)
                    .filter(|(_, acceptor_pos)| {
                        donor.hydrogens.iter().any(|h| {
                            dha_angle(donor.position, *h, *acceptor_pos) >= min_angle
                        })
                    })
                    .map(|(acceptor, _)| HBondHit::new(donor.atom, *acceptor))
                    .collect::<Vec<_>>()
            })
            .collect();

        hits.par_sort_unstable();
        hits.dedup();
        Ok(hits)
    }
}

/// D–H···A angle in degrees, measured at the hydrogen.
///
/// When the hydrogen coincides with the donor or the acceptor the angle is undefined; it
/// is taken as 180° if the hydrogen is closer to the acceptor than the donor is, else 0°.
fn dha_angle(donor: Point, hydrogen: Point, acceptor: Point) -> f64 {
    let to_donor = donor - hydrogen;
    let to_acceptor = acceptor - hydrogen;
    let norms = to_donor.norm() * to_acceptor.norm();

    if norms <= f64::EPSILON {
        return if to_acceptor.norm() < (acceptor - donor).norm() {
            180.0
        } else {
            0.0
        };
    }

    (to_donor.dot(&to_acceptor) / norms)
        .clamp(-1.0, 1.0)
        .acos()
        .to_degrees()
}
