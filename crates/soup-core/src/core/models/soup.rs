use super::atom::AtomProxy;
use super::intern::InternTable;
use super::normals::NormalTable;
use super::residue::{ResidueProxy, ResidueProxyMut};
use super::store::{ColumnSpec, ColumnStore, ColumnType};
use super::topology::BondProxy;
use itertools::Itertools;

pub(crate) const ATOM_X: usize = 0;
pub(crate) const ATOM_Y: usize = 1;
pub(crate) const ATOM_Z: usize = 2;
pub(crate) const ATOM_B_FACTOR: usize = 3;
pub(crate) const ATOM_ALT_LOC: usize = 4;
pub(crate) const ATOM_TYPE: usize = 5;
pub(crate) const ATOM_ELEMENT: usize = 6;
pub(crate) const ATOM_RESIDUE: usize = 7;
pub(crate) const ATOM_BOND_OFFSET: usize = 8;
pub(crate) const ATOM_BOND_COUNT: usize = 9;

const ATOM_COLUMNS: [ColumnSpec; 10] = [
    ColumnSpec::new("x", ColumnType::F32),
    ColumnSpec::new("y", ColumnType::F32),
    ColumnSpec::new("z", ColumnType::F32),
    ColumnSpec::new("b_factor", ColumnType::F32),
    ColumnSpec::new("alt_loc", ColumnType::I8),
    ColumnSpec::new("atom_type", ColumnType::I32),
    ColumnSpec::new("element", ColumnType::I16),
    ColumnSpec::new("residue", ColumnType::I32),
    ColumnSpec::new("bond_offset", ColumnType::I32),
    ColumnSpec::new("bond_count", ColumnType::I32),
];

pub(crate) const RES_ATOM_OFFSET: usize = 0;
pub(crate) const RES_ATOM_COUNT: usize = 1;
pub(crate) const RES_CENTRAL_ATOM: usize = 2;
pub(crate) const RES_TYPE: usize = 3;
pub(crate) const RES_CHAIN: usize = 4;
pub(crate) const RES_NUMBER: usize = 5;
pub(crate) const RES_INS_CODE: usize = 6;
pub(crate) const RES_SS: usize = 7;
pub(crate) const RES_COLOR: usize = 8;
pub(crate) const RES_IS_POLYMER: usize = 9;
pub(crate) const RES_SELECTED: usize = 10;

const RESIDUE_COLUMNS: [ColumnSpec; 11] = [
    ColumnSpec::new("atom_offset", ColumnType::I32),
    ColumnSpec::new("atom_count", ColumnType::I32),
    ColumnSpec::new("central_atom", ColumnType::I32),
    ColumnSpec::new("residue_type", ColumnType::I32),
    ColumnSpec::new("chain", ColumnType::I16),
    ColumnSpec::new("number", ColumnType::I32),
    ColumnSpec::new("ins_code", ColumnType::I8),
    ColumnSpec::new("ss", ColumnType::I8),
    ColumnSpec::new("color", ColumnType::I16),
    ColumnSpec::new("is_polymer", ColumnType::I8),
    ColumnSpec::new("selected", ColumnType::I8),
];

pub(crate) const BOND_ATOM1: usize = 0;
pub(crate) const BOND_ATOM2: usize = 1;

const BOND_COLUMNS: [ColumnSpec; 2] = [
    ColumnSpec::new("atom1", ColumnType::I32),
    ColumnSpec::new("atom2", ColumnType::I32),
];

/// Packs an optional one-byte code (alt-loc, insertion code) into an `i8` cell.
/// Non-ASCII codes do not fit and read back as blank; the PDB reader rejects
/// records carrying them.
pub(crate) fn encode_code(code: Option<char>) -> i8 {
    code.filter(char::is_ascii).map_or(0, |c| c as u8 as i8)
}

pub(crate) fn decode_code(value: i8) -> Option<char> {
    (value != 0).then(|| value as u8 as char)
}

/// The columnar molecular model: atom, residue and bond tables plus the
/// interned name tables and the per-residue derived data.
///
/// Rows are only ever appended while a structure is being built; after that
/// the model is read through [`AtomProxy`], [`ResidueProxy`] and
/// [`BondProxy`], and the only mutations are the explicit residue setters on
/// [`ResidueProxyMut`].
#[derive(Debug, Clone)]
pub struct Soup {
    pub(crate) atoms: ColumnStore,
    pub(crate) residues: ColumnStore,
    pub(crate) bonds: ColumnStore,
    pub(crate) elements: InternTable,
    pub(crate) atom_types: InternTable,
    pub(crate) residue_types: InternTable,
    pub(crate) chains: InternTable,
    pub(crate) colors: InternTable,
    pub(crate) normals: NormalTable,
    pub(crate) hbond_partners: Vec<Vec<usize>>,
    pub(crate) title: String,
    pub(crate) parse_error: Option<String>,
}

impl Default for Soup {
    fn default() -> Self {
        Self::new()
    }
}

impl Soup {
    pub fn new() -> Self {
        Self {
            atoms: ColumnStore::new(&ATOM_COLUMNS),
            residues: ColumnStore::new(&RESIDUE_COLUMNS),
            bonds: ColumnStore::new(&BOND_COLUMNS),
            elements: InternTable::new(),
            atom_types: InternTable::new(),
            residue_types: InternTable::new(),
            chains: InternTable::new(),
            colors: InternTable::new(),
            normals: NormalTable::default(),
            hbond_partners: Vec::new(),
            title: String::new(),
            parse_error: None,
        }
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.count()
    }

    pub fn residue_count(&self) -> usize {
        self.residues.count()
    }

    pub fn bond_count(&self) -> usize {
        self.bonds.count()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn atom(&self, index: usize) -> Option<AtomProxy<'_>> {
        (index < self.atom_count()).then(|| AtomProxy::new(self, index))
    }

    pub fn residue(&self, index: usize) -> Option<ResidueProxy<'_>> {
        (index < self.residue_count()).then(|| ResidueProxy::new(self, index))
    }

    pub fn residue_mut(&mut self, index: usize) -> Option<ResidueProxyMut<'_>> {
        if index < self.residue_count() {
            Some(ResidueProxyMut::new(self, index))
        } else {
            None
        }
    }

    pub fn bond(&self, index: usize) -> Option<BondProxy<'_>> {
        (index < self.bond_count()).then(|| BondProxy::new(self, index))
    }

    pub fn atoms(&self) -> impl Iterator<Item = AtomProxy<'_>> {
        (0..self.atom_count()).map(move |index| AtomProxy::new(self, index))
    }

    pub fn residues(&self) -> impl Iterator<Item = ResidueProxy<'_>> {
        (0..self.residue_count()).map(move |index| ResidueProxy::new(self, index))
    }

    pub fn bonds(&self) -> impl Iterator<Item = BondProxy<'_>> {
        (0..self.bond_count()).map(move |index| BondProxy::new(self, index))
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// The message of a terminal load failure, if the structure is empty
    /// because no atom records could be read.
    pub fn parse_error(&self) -> Option<&str> {
        self.parse_error.as_deref()
    }

    pub fn elements(&self) -> &InternTable {
        &self.elements
    }

    pub fn atom_types(&self) -> &InternTable {
        &self.atom_types
    }

    pub fn residue_types(&self) -> &InternTable {
        &self.residue_types
    }

    pub fn chains(&self) -> &InternTable {
        &self.chains
    }

    pub fn colors(&self) -> &InternTable {
        &self.colors
    }

    pub fn normals(&self) -> &NormalTable {
        &self.normals
    }

    /// Residues whose backbone O lies within the hydrogen-bond cutoff of the
    /// backbone N of `residue`.
    pub fn hbond_partners(&self, residue: usize) -> &[usize] {
        self.hbond_partners
            .get(residue)
            .map_or(&[], Vec::as_slice)
    }

    /// Largest axis-aligned extent of all atom coordinates.
    pub fn max_length(&self) -> f32 {
        if self.is_empty() {
            return 0.0;
        }
        let mut min = [f32::INFINITY; 3];
        let mut max = [f32::NEG_INFINITY; 3];
        for atom in 0..self.atom_count() {
            for (axis, column) in [ATOM_X, ATOM_Y, ATOM_Z].into_iter().enumerate() {
                let value = self.atoms.get_f32(column, atom);
                min[axis] = min[axis].min(value);
                max[axis] = max[axis].max(value);
            }
        }
        (0..3).map(|axis| max[axis] - min[axis]).fold(0.0, f32::max)
    }

    /// Replaces the bond table with both directions of every contact, sorts it
    /// by first atom and records each atom's adjacency run.
    pub(crate) fn install_bonds(&mut self, contacts: &[(usize, usize)]) {
        self.bonds.clear();
        for &(a, b) in contacts {
            for (first, second) in [(a, b), (b, a)] {
                let row = self.bonds.increment();
                self.bonds.set_i32(BOND_ATOM1, row, first as i32);
                self.bonds.set_i32(BOND_ATOM2, row, second as i32);
            }
        }
        self.bonds
            .sort_by(|table, x, y| table.get_i32(BOND_ATOM1, x).cmp(&table.get_i32(BOND_ATOM1, y)));

        for atom in 0..self.atoms.count() {
            self.atoms.set_i32(ATOM_BOND_OFFSET, atom, 0);
            self.atoms.set_i32(ATOM_BOND_COUNT, atom, 0);
        }

        let bonds = &self.bonds;
        let mut offset = 0;
        for (atom, run) in &(0..bonds.count()).chunk_by(|&row| bonds.get_i32(BOND_ATOM1, row)) {
            let count = run.count();
            self.atoms
                .set_i32(ATOM_BOND_OFFSET, atom as usize, offset as i32);
            self.atoms.set_i32(ATOM_BOND_COUNT, atom as usize, count as i32);
            offset += count;
        }
    }

    pub(crate) fn atom_position_raw(&self, atom: usize) -> [f32; 3] {
        [
            self.atoms.get_f32(ATOM_X, atom),
            self.atoms.get_f32(ATOM_Y, atom),
            self.atoms.get_f32(ATOM_Z, atom),
        ]
    }

    pub(crate) fn residue_atom_range(&self, residue: usize) -> std::ops::Range<usize> {
        let offset = self.residues.get_i32(RES_ATOM_OFFSET, residue) as usize;
        let count = self.residues.get_i32(RES_ATOM_COUNT, residue) as usize;
        offset..offset + count
    }
}
