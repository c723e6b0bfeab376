use super::atom::AtomProxy;
use super::soup::{BOND_ATOM1, BOND_ATOM2, Soup};
use std::fmt;

/// A read-only cursor over one directed row of the bond table.
#[derive(Debug, Clone, Copy)]
pub struct BondProxy<'a> {
    soup: &'a Soup,
    index: usize,
}

impl<'a> BondProxy<'a> {
    pub(crate) fn new(soup: &'a Soup, index: usize) -> Self {
        Self { soup, index }
    }

    /// Re-points this cursor at another bond row.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not a valid bond row.
    pub fn load(&mut self, index: usize) -> &mut Self {
        assert!(
            index < self.soup.bond_count(),
            "bond index {} out of bounds ({} bonds)",
            index,
            self.soup.bond_count()
        );
        self.index = index;
        self
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn atom1(&self) -> usize {
        self.soup.bonds.get_i32(BOND_ATOM1, self.index) as usize
    }

    pub fn atom2(&self) -> usize {
        self.soup.bonds.get_i32(BOND_ATOM2, self.index) as usize
    }

    pub fn atoms(&self) -> (AtomProxy<'a>, AtomProxy<'a>) {
        (
            AtomProxy::new(self.soup, self.atom1()),
            AtomProxy::new(self.soup, self.atom2()),
        )
    }

    /// Whether this row is the lower-to-higher direction of its contact.
    pub fn is_forward(&self) -> bool {
        self.atom1() < self.atom2()
    }

    pub fn length(&self) -> f32 {
        let (a, b) = self.atoms();
        nalgebra::distance(&a.position(), &b.position())
    }
}

impl fmt::Display for BondProxy<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.atom1(), self.atom2())
    }
}
