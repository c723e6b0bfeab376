use super::normals::NormalTable;
use super::residue::SecondaryStructure;
use super::soup::{
    ATOM_ALT_LOC, ATOM_B_FACTOR, ATOM_ELEMENT, ATOM_RESIDUE, ATOM_TYPE, ATOM_X, ATOM_Y, ATOM_Z,
    RES_ATOM_COUNT, RES_ATOM_OFFSET, RES_CENTRAL_ATOM, RES_CHAIN, RES_COLOR, RES_INS_CODE,
    RES_NUMBER, RES_SS, RES_TYPE, Soup, encode_code,
};
use nalgebra::Point3;

/// The per-atom fields supplied when appending an atom row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewAtom<'a> {
    pub name: &'a str,
    pub element: &'a str,
    pub alt_loc: Option<char>,
    pub position: Point3<f32>,
    pub b_factor: f32,
}

impl<'a> NewAtom<'a> {
    pub fn new(name: &'a str, element: &'a str, position: Point3<f32>) -> Self {
        Self {
            name,
            element,
            alt_loc: None,
            position,
            b_factor: 0.0,
        }
    }

    pub fn with_alt_loc(mut self, alt_loc: Option<char>) -> Self {
        self.alt_loc = alt_loc;
        self
    }

    pub fn with_b_factor(mut self, b_factor: f32) -> Self {
        self.b_factor = b_factor;
        self
    }
}

/// Appends residues and atoms to a fresh [`Soup`] in file order.
///
/// Every atom belongs to the most recently started residue, which keeps each
/// residue's atom range contiguous. Starting a residue never merges with an
/// earlier one, even if its identifiers repeat.
pub struct SoupBuilder {
    soup: Soup,
    current_residue: Option<usize>,
}

impl Default for SoupBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SoupBuilder {
    pub fn new() -> Self {
        Self {
            soup: Soup::new(),
            current_residue: None,
        }
    }

    pub fn title(&mut self, title: &str) -> &mut Self {
        self.soup.title = title.to_string();
        self
    }

    pub fn start_residue(
        &mut self,
        name: &str,
        chain: &str,
        number: i32,
        insertion_code: Option<char>,
    ) -> &mut Self {
        let soup = &mut self.soup;
        let type_id = soup.residue_types.intern(name);
        let chain_id = soup.chains.intern(chain);
        let color_id = soup.colors.intern(chain);
        let first_atom = soup.atoms.count() as i32;

        let row = soup.residues.increment();
        let residues = &mut soup.residues;
        residues.set_i32(RES_ATOM_OFFSET, row, first_atom);
        residues.set_i32(RES_ATOM_COUNT, row, 0);
        residues.set_i32(RES_CENTRAL_ATOM, row, first_atom);
        residues.set_i32(RES_TYPE, row, type_id as i32);
        residues.set_i16(RES_CHAIN, row, chain_id as i16);
        residues.set_i32(RES_NUMBER, row, number);
        residues.set_i8(RES_INS_CODE, row, encode_code(insertion_code));
        residues.set_i8(RES_SS, row, SecondaryStructure::Other.as_char() as u8 as i8);
        residues.set_i16(RES_COLOR, row, color_id as i16);

        self.current_residue = Some(row);
        self
    }

    pub fn add_atom(&mut self, atom: NewAtom<'_>) -> &mut Self {
        let residue = self
            .current_residue
            .expect("Cannot add atom without a current residue");
        let soup = &mut self.soup;
        let type_id = soup.atom_types.intern(atom.name);
        let element_id = soup.elements.intern(atom.element);

        let row = soup.atoms.increment();
        let atoms = &mut soup.atoms;
        atoms.set_f32(ATOM_X, row, atom.position.x);
        atoms.set_f32(ATOM_Y, row, atom.position.y);
        atoms.set_f32(ATOM_Z, row, atom.position.z);
        atoms.set_f32(ATOM_B_FACTOR, row, atom.b_factor);
        atoms.set_i8(ATOM_ALT_LOC, row, encode_code(atom.alt_loc));
        atoms.set_i32(ATOM_TYPE, row, type_id as i32);
        atoms.set_i16(ATOM_ELEMENT, row, element_id as i16);
        atoms.set_i32(ATOM_RESIDUE, row, residue as i32);

        let count = soup.residues.get_i32(RES_ATOM_COUNT, residue);
        soup.residues.set_i32(RES_ATOM_COUNT, residue, count + 1);
        self
    }

    pub fn atom_count(&self) -> usize {
        self.soup.atom_count()
    }

    pub fn build(self) -> Soup {
        let mut soup = self.soup;
        let residue_count = soup.residue_count();
        soup.normals = NormalTable::with_residues(residue_count);
        soup.hbond_partners = vec![Vec::new(); residue_count];
        soup
    }
}
