//! Primitive identifiers, chemical elements, and residue classifications.
//!
//! These small value types are shared by every layer of the crate: readers resolve them
//! from raw records, the selection language matches against them, and the bridge search
//! treats [`ResidueIndex`] as its node identity.

use nalgebra::Point3;
use std::fmt;
use std::str::FromStr;

/// Cartesian position in ångströms.
pub type Point = Point3<f64>;

/// Zero-based position of an atom inside a [`System`](super::system::System).
pub type AtomIndex = usize;

/// Zero-based, stable residue identifier (`resindex`).
///
/// Independent of chain labels and author residue numbering, so two residues sharing a
/// number on different chains (or after a numbering wrap in large solvent boxes) still
/// receive distinct identifiers.
pub type ResidueIndex = usize;

/// Chemical elements commonly found in biomolecular simulation systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Element {
    H,
    C,
    N,
    O,
    F,
    Na,
    Mg,
    P,
    S,
    Cl,
    K,
    Ca,
    Mn,
    Fe,
    Cu,
    Zn,
    Br,
    I,
    Unknown,
}

impl Element {
    pub fn symbol(&self) -> &'static str {
        match self {
            Element::H => "H",
            Element::C => "C",
            Element::N => "N",
            Element::O => "O",
            Element::F => "F",
            Element::Na => "Na",
            Element::Mg => "Mg",
            Element::P => "P",
            Element::S => "S",
            Element::Cl => "Cl",
            Element::K => "K",
            Element::Ca => "Ca",
            Element::Mn => "Mn",
            Element::Fe => "Fe",
            Element::Cu => "Cu",
            Element::Zn => "Zn",
            Element::Br => "Br",
            Element::I => "I",
            Element::Unknown => "X",
        }
    }

    pub fn is_hydrogen(&self) -> bool {
        matches!(self, Element::H)
    }

    /// Returns `true` for electronegative elements that can donate or accept a hydrogen bond.
    ///
    /// Sulfur is only considered when `include_sulfur` is set; thiol and thioether contacts
    /// are weak and excluded by default.
    pub fn is_hbond_capable(&self, include_sulfur: bool) -> bool {
        match self {
            Element::N | Element::O | Element::F => true,
            Element::S => include_sulfur,
            _ => false,
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Element {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "H" | "D" => Ok(Element::H),
            "C" => Ok(Element::C),
            "N" => Ok(Element::N),
            "O" => Ok(Element::O),
            "F" => Ok(Element::F),
            "NA" => Ok(Element::Na),
            "MG" => Ok(Element::Mg),
            "P" => Ok(Element::P),
            "S" => Ok(Element::S),
            "CL" => Ok(Element::Cl),
            "K" => Ok(Element::K),
            "CA" => Ok(Element::Ca),
            "MN" => Ok(Element::Mn),
            "FE" => Ok(Element::Fe),
            "CU" => Ok(Element::Cu),
            "ZN" => Ok(Element::Zn),
            "BR" => Ok(Element::Br),
            "I" => Ok(Element::I),
            "X" => Ok(Element::Unknown),
            other => Err(format!("Invalid element symbol: {}", other)),
        }
    }
}

/// Broad chemical role of a residue, used by selections and reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResidueCategory {
    Protein,
    Nucleic,
    Water,
    Ion,
    Hetero,
}

impl ResidueCategory {
    pub fn name(&self) -> &'static str {
        match self {
            ResidueCategory::Protein => "Protein",
            ResidueCategory::Nucleic => "Nucleic",
            ResidueCategory::Water => "Water",
            ResidueCategory::Ion => "Ion",
            ResidueCategory::Hetero => "Hetero",
        }
    }
}

impl fmt::Display for ResidueCategory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ResidueCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Protein" => Ok(ResidueCategory::Protein),
            "Nucleic" => Ok(ResidueCategory::Nucleic),
            "Water" => Ok(ResidueCategory::Water),
            "Ion" => Ok(ResidueCategory::Ion),
            "Hetero" => Ok(ResidueCategory::Hetero),
            _ => Err(format!("Invalid residue category: {}", s)),
        }
    }
}
