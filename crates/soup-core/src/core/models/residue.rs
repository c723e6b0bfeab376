use super::atom::AtomProxy;
use super::soup::{
    ATOM_TYPE, RES_ATOM_COUNT, RES_CENTRAL_ATOM, RES_CHAIN, RES_COLOR, RES_INS_CODE,
    RES_IS_POLYMER, RES_NUMBER, RES_SELECTED, RES_SS, RES_TYPE, Soup, decode_code,
};
use nalgebra::{Point3, Vector3};
use std::fmt;
use std::ops::Range;
use thiserror::Error;

/// The per-residue secondary-structure tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SecondaryStructure {
    Helix,  // H
    Sheet,  // E
    Coil,   // C
    Water,  // W
    Grid,   // G
    Dna,    // D
    Rna,    // R
    #[default]
    Other, // -
}

impl SecondaryStructure {
    pub fn as_char(self) -> char {
        match self {
            Self::Helix => 'H',
            Self::Sheet => 'E',
            Self::Coil => 'C',
            Self::Water => 'W',
            Self::Grid => 'G',
            Self::Dna => 'D',
            Self::Rna => 'R',
            Self::Other => '-',
        }
    }

    pub fn is_nucleic(self) -> bool {
        matches!(self, Self::Dna | Self::Rna)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid secondary structure tag: '{0}'")]
pub struct ParseSecondaryStructureError(pub char);

impl TryFrom<char> for SecondaryStructure {
    type Error = ParseSecondaryStructureError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'H' => Ok(Self::Helix),
            'E' => Ok(Self::Sheet),
            'C' => Ok(Self::Coil),
            'W' => Ok(Self::Water),
            'G' => Ok(Self::Grid),
            'D' => Ok(Self::Dna),
            'R' => Ok(Self::Rna),
            '-' => Ok(Self::Other),
            _ => Err(ParseSecondaryStructureError(c)),
        }
    }
}

impl fmt::Display for SecondaryStructure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A read-only cursor over one row of the residue table.
#[derive(Debug, Clone, Copy)]
pub struct ResidueProxy<'a> {
    soup: &'a Soup,
    index: usize,
}

impl<'a> ResidueProxy<'a> {
    pub(crate) fn new(soup: &'a Soup, index: usize) -> Self {
        Self { soup, index }
    }

    /// Re-points this cursor at another residue row.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not a valid residue row.
    pub fn load(&mut self, index: usize) -> &mut Self {
        assert!(
            index < self.soup.residue_count(),
            "residue index {} out of bounds ({} residues)",
            index,
            self.soup.residue_count()
        );
        self.index = index;
        self
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// The contiguous range of atom rows owned by this residue.
    pub fn atom_range(&self) -> Range<usize> {
        self.soup.residue_atom_range(self.index)
    }

    pub fn atom_count(&self) -> usize {
        self.soup.residues.get_i32(RES_ATOM_COUNT, self.index) as usize
    }

    pub fn atoms(&self) -> impl Iterator<Item = AtomProxy<'a>> + 'a {
        let soup = self.soup;
        self.atom_range().map(move |atom| AtomProxy::new(soup, atom))
    }

    /// Finds the first atom of this residue with the given atom-type name.
    pub fn atom_by_name(&self, name: &str) -> Option<AtomProxy<'a>> {
        let type_id = self.soup.atom_types.id_of(name)?;
        let soup = self.soup;
        self.atom_range()
            .find(|&atom| soup.atoms.get_i32(ATOM_TYPE, atom) as usize == type_id)
            .map(|atom| AtomProxy::new(soup, atom))
    }

    pub fn central_atom(&self) -> AtomProxy<'a> {
        let atom = self.soup.residues.get_i32(RES_CENTRAL_ATOM, self.index) as usize;
        AtomProxy::new(self.soup, atom)
    }

    /// Position of the residue's central atom.
    pub fn position(&self) -> Point3<f32> {
        self.central_atom().position()
    }

    /// The residue-type name, e.g. `ALA` or `HOH`.
    pub fn name(&self) -> &'a str {
        let id = self.soup.residues.get_i32(RES_TYPE, self.index) as usize;
        self.soup.residue_types.get(id).unwrap_or("")
    }

    pub fn chain(&self) -> &'a str {
        let id = self.soup.residues.get_i16(RES_CHAIN, self.index) as usize;
        self.soup.chains.get(id).unwrap_or("")
    }

    pub fn number(&self) -> i32 {
        self.soup.residues.get_i32(RES_NUMBER, self.index)
    }

    pub fn insertion_code(&self) -> Option<char> {
        decode_code(self.soup.residues.get_i8(RES_INS_CODE, self.index))
    }

    pub fn secondary_structure(&self) -> SecondaryStructure {
        let tag = self.soup.residues.get_i8(RES_SS, self.index) as u8 as char;
        SecondaryStructure::try_from(tag).unwrap_or_default()
    }

    pub fn color(&self) -> usize {
        self.soup.residues.get_i16(RES_COLOR, self.index) as usize
    }

    pub fn is_polymer(&self) -> bool {
        self.soup.residues.get_i8(RES_IS_POLYMER, self.index) != 0
    }

    pub fn is_selected(&self) -> bool {
        self.soup.residues.get_i8(RES_SELECTED, self.index) != 0
    }

    /// The averaged unit orientation normal, if one was derived.
    pub fn normal(&self) -> Option<Vector3<f32>> {
        self.soup.normals.normal(self.index)
    }

    pub fn hbond_partners(&self) -> &'a [usize] {
        self.soup.hbond_partners(self.index)
    }
}

/// A mutating cursor over one residue row, limited to the fields that may
/// change after a structure has been loaded.
#[derive(Debug)]
pub struct ResidueProxyMut<'a> {
    soup: &'a mut Soup,
    index: usize,
}

impl<'a> ResidueProxyMut<'a> {
    pub(crate) fn new(soup: &'a mut Soup, index: usize) -> Self {
        Self { soup, index }
    }

    pub fn as_proxy(&self) -> ResidueProxy<'_> {
        ResidueProxy::new(&*self.soup, self.index)
    }

    pub fn set_selected(&mut self, selected: bool) -> &mut Self {
        self.soup
            .residues
            .set_i8(RES_SELECTED, self.index, selected as i8);
        self
    }

    pub fn set_secondary_structure(&mut self, ss: SecondaryStructure) -> &mut Self {
        self.soup
            .residues
            .set_i8(RES_SS, self.index, ss.as_char() as u8 as i8);
        self
    }

    pub fn set_color(&mut self, color: usize) -> &mut Self {
        self.soup
            .residues
            .set_i16(RES_COLOR, self.index, color as i16);
        self
    }

    pub(crate) fn set_central_atom(&mut self, atom: usize) -> &mut Self {
        self.soup
            .residues
            .set_i32(RES_CENTRAL_ATOM, self.index, atom as i32);
        self
    }

    pub(crate) fn set_polymer(&mut self, is_polymer: bool) -> &mut Self {
        self.soup
            .residues
            .set_i8(RES_IS_POLYMER, self.index, is_polymer as i8);
        self
    }
}
