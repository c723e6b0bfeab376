use super::residue::ResidueProxy;
use super::soup::{
    ATOM_ALT_LOC, ATOM_B_FACTOR, ATOM_BOND_COUNT, ATOM_BOND_OFFSET, ATOM_ELEMENT, ATOM_RESIDUE,
    ATOM_TYPE, BOND_ATOM2, Soup, decode_code,
};
use nalgebra::Point3;

/// A read-only cursor over one row of the atom table.
///
/// Proxies are `Copy` and hold nothing but a reference to the [`Soup`] and a
/// row index, so they can be created freely or re-pointed with
/// [`AtomProxy::load`] while walking the table.
#[derive(Debug, Clone, Copy)]
pub struct AtomProxy<'a> {
    soup: &'a Soup,
    index: usize,
}

impl<'a> AtomProxy<'a> {
    pub(crate) fn new(soup: &'a Soup, index: usize) -> Self {
        Self { soup, index }
    }

    /// Re-points this cursor at another atom row.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not a valid atom row.
    pub fn load(&mut self, index: usize) -> &mut Self {
        assert!(
            index < self.soup.atom_count(),
            "atom index {} out of bounds ({} atoms)",
            index,
            self.soup.atom_count()
        );
        self.index = index;
        self
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn position(&self) -> Point3<f32> {
        let [x, y, z] = self.soup.atom_position_raw(self.index);
        Point3::new(x, y, z)
    }

    pub fn b_factor(&self) -> f32 {
        self.soup.atoms.get_f32(ATOM_B_FACTOR, self.index)
    }

    pub fn alt_loc(&self) -> Option<char> {
        decode_code(self.soup.atoms.get_i8(ATOM_ALT_LOC, self.index))
    }

    /// The atom-type name, e.g. `CA` or `O3'`.
    pub fn name(&self) -> &'a str {
        let id = self.soup.atoms.get_i32(ATOM_TYPE, self.index) as usize;
        self.soup.atom_types.get(id).unwrap_or("")
    }

    pub fn element(&self) -> &'a str {
        let id = self.soup.atoms.get_i16(ATOM_ELEMENT, self.index) as usize;
        self.soup.elements.get(id).unwrap_or("")
    }

    pub fn is_hydrogen(&self) -> bool {
        self.element() == "H"
    }

    pub fn residue_index(&self) -> usize {
        self.soup.atoms.get_i32(ATOM_RESIDUE, self.index) as usize
    }

    pub fn residue(&self) -> ResidueProxy<'a> {
        ResidueProxy::new(self.soup, self.residue_index())
    }

    /// Indices of the atoms bonded to this one, read from its contiguous run
    /// in the sorted bond table.
    pub fn bonded_atoms(&self) -> impl Iterator<Item = usize> + 'a {
        let soup = self.soup;
        let offset = soup.atoms.get_i32(ATOM_BOND_OFFSET, self.index) as usize;
        let count = soup.atoms.get_i32(ATOM_BOND_COUNT, self.index) as usize;
        (offset..offset + count).map(move |row| soup.bonds.get_i32(BOND_ATOM2, row) as usize)
    }
}
