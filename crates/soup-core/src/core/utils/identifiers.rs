use phf::{Set, phf_set};

/// Backbone atoms whose presence marks an amino-acid residue.
pub const PROTEIN_BACKBONE_ATOMS: [&str; 3] = ["CA", "N", "C"];

/// Sugar backbone atoms whose presence marks a nucleotide residue.
pub const NUCLEIC_BACKBONE_ATOMS: [&str; 5] = ["C3'", "O3'", "C5'", "O4'", "C1'"];

/// Residue-type name of the placeholder grid residue.
pub const GRID_RESIDUE_NAME: &str = "XXX";

static WATER_RESIDUE_NAMES: Set<&'static str> = phf_set! {
    "HOH", "WAT", "H2O", "DOD", "TIP", "TIP3", "SOL",
};

static DEOXY_RESIDUE_NAMES: Set<&'static str> = phf_set! {
    "DA", "DC", "DG", "DT", "DU", "DI",
};

static ORGANIC_ELEMENTS: Set<&'static str> = phf_set! {
    "C", "H", "O", "N", "P", "S",
};

pub fn is_water_residue(residue_name: &str) -> bool {
    WATER_RESIDUE_NAMES.contains(residue_name.trim())
}

pub fn is_grid_residue(residue_name: &str) -> bool {
    residue_name.trim() == GRID_RESIDUE_NAME
}

pub fn is_deoxy_residue(residue_name: &str) -> bool {
    DEOXY_RESIDUE_NAMES.contains(residue_name.trim())
}

pub fn is_organic_element(element: &str) -> bool {
    ORGANIC_ELEMENTS.contains(element)
}

pub fn is_hydrogen_element(element: &str) -> bool {
    element == "H"
}

/// Derives an element symbol from an atom name by dropping digits and
/// keeping the first remaining character, e.g. `1HB` gives `H`.
pub fn element_from_atom_name(atom_name: &str) -> Option<char> {
    atom_name
        .trim()
        .chars()
        .find(|c| !c.is_ascii_digit())
        .map(|c| c.to_ascii_uppercase())
}
