use crate::model::types::ResidueCategory;
use std::collections::HashMap;

/// Residue-name lookup table used by readers to assign a [`ResidueCategory`].
///
/// Simulation packages spell water and ions in many ways (`HOH`, `WAT`, `TIP3`, `SOL`,
/// `NA+`, `SOD`...). Names that are not registered are classified as hetero residues.
#[derive(Debug, Clone)]
pub struct IoContext {
    categories: HashMap<String, ResidueCategory>,
}

impl IoContext {
    pub fn new_default() -> Self {
        let mut categories = HashMap::new();

        macro_rules! register {
            ($category:expr, [$($name:expr),* $(,)?]) => {
                $(categories.insert($name.to_string(), $category);)*
            };
        }

        register!(
            ResidueCategory::Protein,
            [
                "ALA", "ARG", "ASN", "ASP", "CYS", "GLN", "GLU", "GLY", "HIS", "ILE", "LEU",
                "LYS", "MET", "PHE", "PRO", "SER", "THR", "TRP", "TYR", "VAL", "ARN", "ASH",
                "CYM", "CYX", "GLH", "HID", "HIE", "HIP", "HSD", "HSE", "HSP", "LYN", "TYM",
                "MSE", "SEC", "PYL", "ACE", "NME", "NMA",
            ]
        );

        register!(
            ResidueCategory::Nucleic,
            [
                "A", "C", "G", "U", "I", "DA", "DC", "DG", "DT", "DI", "RA", "RC", "RG", "RU",
                "ADE", "CYT", "GUA", "URA", "THY",
            ]
        );

        register!(
            ResidueCategory::Water,
            [
                "HOH", "WAT", "H2O", "SOL", "TIP", "TIP3", "TIP4", "TIP5", "T3P", "T4P", "T5P",
                "SPC", "SPCE", "TP3", "DOD",
            ]
        );

        register!(
            ResidueCategory::Ion,
            [
                "NA", "NA+", "SOD", "K", "K+", "POT", "CL", "CL-", "CLA", "MG", "MG2", "CA",
                "CAL", "ZN", "ZN2", "LI", "RB", "CS", "BR", "IOD", "F",
            ]
        );

        Self { categories }
    }

    /// Classifies a raw residue name; lookups are case-insensitive and ignore padding.
    pub fn classify_residue(&self, raw_name: &str) -> ResidueCategory {
        let name = raw_name.trim().to_ascii_uppercase();
        self.categories
            .get(&name)
            .copied()
            .unwrap_or(ResidueCategory::Hetero)
    }

    /// Registers or overrides the category of a residue name.
    pub fn register(&mut self, name: &str, category: ResidueCategory) {
        self.categories
            .insert(name.trim().to_ascii_uppercase(), category);
    }
}

impl Default for IoContext {
    fn default() -> Self {
        Self::new_default()
    }
}
