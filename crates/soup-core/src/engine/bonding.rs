use crate::core::models::atom::AtomProxy;
use crate::core::models::soup::Soup;
use crate::core::spatial::SpatialHash;
use crate::core::utils::identifiers::{is_grid_residue, is_hydrogen_element, is_organic_element};
use crate::engine::config::{BondStrategy, BondingConfig};
use crate::engine::progress::{Progress, ProgressReporter};
use itertools::Itertools;
use tracing::debug;

pub const HYDROGEN_BOND_CUTOFF: f32 = 1.2;
pub const ORGANIC_BOND_CUTOFF: f32 = 1.9;
pub const DEFAULT_BOND_CUTOFF: f32 = 2.4;

/// Covalent cutoff (Å) for a pair of element symbols.
pub fn bond_cutoff(element_a: &str, element_b: &str) -> f32 {
    if is_hydrogen_element(element_a) || is_hydrogen_element(element_b) {
        HYDROGEN_BOND_CUTOFF
    } else if is_organic_element(element_a) && is_organic_element(element_b) {
        ORGANIC_BOND_CUTOFF
    } else {
        DEFAULT_BOND_CUTOFF
    }
}

/// Distance test shared by every strategy. Atoms in different alternate
/// conformations never bond.
pub fn is_bonded(a: &AtomProxy<'_>, b: &AtomProxy<'_>) -> bool {
    if let (Some(alt_a), Some(alt_b)) = (a.alt_loc(), b.alt_loc()) {
        if alt_a != alt_b {
            return false;
        }
    }
    let cutoff = bond_cutoff(a.element(), b.element());
    nalgebra::distance_squared(&a.position(), &b.position()) <= cutoff * cutoff
}

/// Finds every bonded atom pair, each reported once as `(lower, higher)`.
pub fn find_bonds(soup: &Soup, config: &BondingConfig) -> Vec<(usize, usize)> {
    find_bonds_with_progress(soup, config, &ProgressReporter::new())
}

fn find_bonds_with_progress(
    soup: &Soup,
    config: &BondingConfig,
    reporter: &ProgressReporter,
) -> Vec<(usize, usize)> {
    match config.strategy {
        BondStrategy::Strategic => intra_residue_bonds(soup, reporter),
        BondStrategy::Spatial => spatial_bonds(soup),
        BondStrategy::NeighborResidues => {
            let mut contacts = intra_residue_bonds(soup, reporter);
            contacts.extend(neighbor_residue_bonds(soup, config.neighbor_distance));
            contacts
        }
    }
}

/// Runs [`find_bonds`] and installs the result as the soup's bond table.
/// Returns the number of contacts found.
///
/// Residue-by-residue strategies report one task step per residue.
pub fn infer_bonds(soup: &mut Soup, config: &BondingConfig, reporter: &ProgressReporter) -> usize {
    let contacts = find_bonds_with_progress(soup, config, reporter);
    debug!(
        "Found {} contacts with the {} strategy.",
        contacts.len(),
        config.strategy
    );
    soup.install_bonds(&contacts);
    contacts.len()
}

fn intra_residue_bonds(soup: &Soup, reporter: &ProgressReporter) -> Vec<(usize, usize)> {
    reporter.report(Progress::TaskStart {
        total_steps: soup.residue_count() as u64,
    });
    let mut contacts = Vec::new();
    for residue in soup.residues() {
        for (i, j) in residue.atom_range().tuple_combinations() {
            if bonded_pair(soup, i, j) {
                contacts.push((i, j));
            }
        }
        reporter.report(Progress::TaskIncrement);
    }
    reporter.report(Progress::TaskFinish);
    contacts
}

fn spatial_bonds(soup: &Soup) -> Vec<(usize, usize)> {
    let hash = SpatialHash::new(
        soup.atoms().map(|atom| atom.position()).collect(),
        DEFAULT_BOND_CUTOFF,
    );
    let on_grid: Vec<bool> = soup
        .atoms()
        .map(|atom| is_grid_residue(atom.residue().name()))
        .collect();

    hash.close_pairs()
        .filter(|&(i, j)| !on_grid[i] && !on_grid[j])
        .filter(|&(i, j)| bonded_pair(soup, i, j))
        .collect()
}

/// Cross-residue contacts for the neighbour strategy.
///
/// Two polymer residues are only compared when their central atoms lie
/// within `neighbor_distance`. Any pair involving a non-polymer (ligand,
/// water, ion) is compared atom by atom, so covalent links to ligands are
/// kept however large the ligand is.
fn neighbor_residue_bonds(soup: &Soup, neighbor_distance: f32) -> Vec<(usize, usize)> {
    let skipped: Vec<bool> = soup
        .residues()
        .map(|residue| is_grid_residue(residue.name()))
        .collect();
    let polymer: Vec<bool> = soup.residues().map(|residue| residue.is_polymer()).collect();
    let mut contacts = Vec::new();

    let polymer_residues: Vec<usize> = (0..soup.residue_count())
        .filter(|&r| polymer[r] && !skipped[r])
        .collect();
    let residue_hash = SpatialHash::new(
        polymer_residues
            .iter()
            .filter_map(|&r| soup.residue(r).map(|residue| residue.position()))
            .collect(),
        neighbor_distance,
    );
    let max_d2 = neighbor_distance * neighbor_distance;
    for (a, b) in residue_hash.close_pairs() {
        let (Some(first), Some(second)) = (
            soup.residue(polymer_residues[a]),
            soup.residue(polymer_residues[b]),
        ) else {
            continue;
        };
        if nalgebra::distance_squared(&first.position(), &second.position()) > max_d2 {
            continue;
        }
        for (i, j) in first.atom_range().cartesian_product(second.atom_range()) {
            if bonded_pair(soup, i, j) {
                contacts.push((i.min(j), i.max(j)));
            }
        }
    }

    let residue_of: Vec<usize> = soup.atoms().map(|atom| atom.residue_index()).collect();
    let atom_hash = SpatialHash::new(
        soup.atoms().map(|atom| atom.position()).collect(),
        DEFAULT_BOND_CUTOFF,
    );
    for (i, j) in atom_hash.close_pairs() {
        let (r1, r2) = (residue_of[i], residue_of[j]);
        if r1 == r2 || skipped[r1] || skipped[r2] || (polymer[r1] && polymer[r2]) {
            continue;
        }
        if bonded_pair(soup, i, j) {
            contacts.push((i, j));
        }
    }
    contacts
}

fn bonded_pair(soup: &Soup, i: usize, j: usize) -> bool {
    match (soup.atom(i), soup.atom(j)) {
        (Some(a), Some(b)) => is_bonded(&a, &b),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::builder::{NewAtom, SoupBuilder};
    use nalgebra::Point3;

    fn pair_soup(first: NewAtom<'_>, second: NewAtom<'_>) -> Soup {
        let mut builder = SoupBuilder::new();
        builder.start_residue("LIG", "A", 1, None);
        builder.add_atom(first);
        builder.add_atom(second);
        builder.build()
    }

    fn at(name: &'static str, element: &'static str, x: f32) -> NewAtom<'static> {
        NewAtom::new(name, element, Point3::new(x, 0.0, 0.0))
    }

    fn strategic() -> BondingConfig {
        BondingConfig::default()
    }

    fn with_strategy(strategy: BondStrategy) -> BondingConfig {
        BondingConfig {
            strategy,
            ..BondingConfig::default()
        }
    }

    #[test]
    fn cutoff_depends_on_element_class() {
        assert_eq!(bond_cutoff("H", "C"), HYDROGEN_BOND_CUTOFF);
        assert_eq!(bond_cutoff("FE", "H"), HYDROGEN_BOND_CUTOFF);
        assert_eq!(bond_cutoff("C", "N"), ORGANIC_BOND_CUTOFF);
        assert_eq!(bond_cutoff("P", "O"), ORGANIC_BOND_CUTOFF);
        assert_eq!(bond_cutoff("FE", "S"), DEFAULT_BOND_CUTOFF);
        assert_eq!(bond_cutoff("SE", "C"), DEFAULT_BOND_CUTOFF);
    }

    #[test]
    fn atoms_exactly_at_cutoff_are_bonded() {
        let soup = pair_soup(at("C1", "C", 0.0), at("C2", "C", ORGANIC_BOND_CUTOFF));
        assert_eq!(find_bonds(&soup, &strategic()), vec![(0, 1)]);

        let soup = pair_soup(at("C1", "C", 0.0), at("H1", "H", HYDROGEN_BOND_CUTOFF));
        assert_eq!(find_bonds(&soup, &strategic()), vec![(0, 1)]);
    }

    #[test]
    fn atoms_just_beyond_cutoff_are_not_bonded() {
        let soup = pair_soup(at("C1", "C", 0.0), at("C2", "C", ORGANIC_BOND_CUTOFF + 0.001));
        assert!(find_bonds(&soup, &strategic()).is_empty());

        let soup = pair_soup(at("C1", "C", 0.0), at("H1", "H", 1.25));
        assert!(find_bonds(&soup, &strategic()).is_empty());
    }

    #[test]
    fn metal_contacts_use_the_long_cutoff() {
        let soup = pair_soup(at("FE", "FE", 0.0), at("SG", "S", 2.3));
        assert_eq!(find_bonds(&soup, &strategic()), vec![(0, 1)]);
    }

    #[test]
    fn differing_alt_locs_never_bond() {
        let soup = pair_soup(
            at("CB", "C", 0.0).with_alt_loc(Some('A')),
            at("CG", "C", 1.0).with_alt_loc(Some('B')),
        );
        for strategy in [
            BondStrategy::Strategic,
            BondStrategy::Spatial,
            BondStrategy::NeighborResidues,
        ] {
            assert!(find_bonds(&soup, &with_strategy(strategy)).is_empty());
        }
    }

    #[test]
    fn matching_or_blank_alt_locs_bond() {
        let soup = pair_soup(
            at("CB", "C", 0.0).with_alt_loc(Some('A')),
            at("CG", "C", 1.5),
        );
        assert_eq!(find_bonds(&soup, &strategic()), vec![(0, 1)]);

        let soup = pair_soup(
            at("CB", "C", 0.0).with_alt_loc(Some('A')),
            at("CG", "C", 1.5).with_alt_loc(Some('A')),
        );
        assert_eq!(find_bonds(&soup, &strategic()), vec![(0, 1)]);
    }

    fn peptide() -> Soup {
        let mut builder = SoupBuilder::new();
        builder.start_residue("GLY", "A", 1, None);
        builder.add_atom(at("CA", "C", 0.0));
        builder.add_atom(at("C", "C", 1.5));
        builder.start_residue("GLY", "A", 2, None);
        builder.add_atom(at("N", "N", 2.83));
        builder.add_atom(at("CA", "C", 4.3));
        builder.start_residue(crate::core::utils::identifiers::GRID_RESIDUE_NAME, "Z", 3, None);
        builder.add_atom(at("X", "C", 5.0));
        let mut soup = builder.build();
        for index in 0..2 {
            if let Some(mut residue) = soup.residue_mut(index) {
                residue.set_polymer(true);
            }
        }
        soup
    }

    #[test]
    fn strategic_bonds_only_within_residues() {
        let soup = peptide();
        assert_eq!(find_bonds(&soup, &strategic()), vec![(0, 1), (2, 3)]);
    }

    #[test]
    fn spatial_bonds_cross_residues_but_skip_grid_residues() {
        let soup = peptide();
        let mut contacts = find_bonds(&soup, &with_strategy(BondStrategy::Spatial));
        contacts.sort();
        assert_eq!(contacts, vec![(0, 1), (1, 2), (2, 3)]);
    }

    #[test]
    fn neighbor_residues_connect_adjacent_residues() {
        let soup = peptide();
        let mut contacts = find_bonds(&soup, &with_strategy(BondStrategy::NeighborResidues));
        contacts.sort();
        assert_eq!(contacts, vec![(0, 1), (1, 2), (2, 3)]);
    }

    #[test]
    fn neighbor_residues_respect_the_central_atom_distance() {
        let soup = peptide();
        let config = BondingConfig {
            strategy: BondStrategy::NeighborResidues,
            neighbor_distance: 2.0,
        };
        let mut contacts = find_bonds(&soup, &config);
        contacts.sort();
        assert_eq!(contacts, vec![(0, 1), (2, 3)]);
    }

    #[test]
    fn infer_bonds_installs_a_symmetric_table() {
        let mut soup = peptide();
        let found = infer_bonds(
            &mut soup,
            &with_strategy(BondStrategy::Spatial),
            &ProgressReporter::new(),
        );

        assert_eq!(found, 3);
        assert_eq!(soup.bond_count(), 6);
        for bond in soup.bonds() {
            assert!(
                soup.bonds()
                    .any(|other| other.atom1() == bond.atom2() && other.atom2() == bond.atom1())
            );
        }
        for atom in soup.atoms() {
            let expected = soup.bonds().filter(|b| b.atom1() == atom.index()).count();
            assert_eq!(atom.bonded_atoms().count(), expected);
        }
    }

    /// A cysteine whose SG sits 1.8 Å from C1 of a long linear ligand. The
    /// ligand's central atom is far beyond the neighbour distance.
    fn cysteine_ligand() -> Soup {
        let mut builder = SoupBuilder::new();
        builder.start_residue("CYS", "A", 1, None);
        builder.add_atom(NewAtom::new("CA", "C", Point3::new(-2.5, 0.0, 0.0)));
        builder.add_atom(NewAtom::new("CB", "C", Point3::new(-1.5, 1.0, 0.0)));
        builder.add_atom(NewAtom::new("SG", "S", Point3::origin()));
        builder.start_residue("LIG", "A", 2, None);
        for k in 0..12 {
            let name = format!("C{}", k + 1);
            builder.add_atom(NewAtom::new(&name, "C", Point3::new(1.8 + 1.5 * k as f32, 0.0, 0.0)));
        }
        let mut soup = builder.build();
        if let Some(mut residue) = soup.residue_mut(0) {
            residue.set_polymer(true).set_central_atom(0);
        }
        if let Some(mut residue) = soup.residue_mut(1) {
            residue.set_central_atom(3 + 6);
        }
        soup
    }

    #[test]
    fn neighbor_residues_link_ligands_regardless_of_central_atom_distance() {
        let soup = cysteine_ligand();
        let distance = nalgebra::distance(
            &soup.residue(0).unwrap().position(),
            &soup.residue(1).unwrap().position(),
        );
        assert!(distance > 8.0);

        let contacts = find_bonds(&soup, &with_strategy(BondStrategy::NeighborResidues));
        let sg = soup.residue(0).unwrap().atom_by_name("SG").unwrap().index();
        let c1 = soup.residue(1).unwrap().atom_by_name("C1").unwrap().index();
        assert!(contacts.contains(&(sg.min(c1), sg.max(c1))));
        let cross: Vec<_> = contacts
            .iter()
            .filter(|&&(i, j)| {
                soup.atom(i).unwrap().residue_index() != soup.atom(j).unwrap().residue_index()
            })
            .collect();
        assert_eq!(cross, vec![&(sg.min(c1), sg.max(c1))]);
    }

    #[test]
    fn neighbor_residues_still_gate_distant_polymer_pairs() {
        let mut soup = cysteine_ligand();
        if let Some(mut residue) = soup.residue_mut(1) {
            residue.set_polymer(true);
        }
        let contacts = find_bonds(&soup, &with_strategy(BondStrategy::NeighborResidues));
        assert!(contacts.iter().all(|&(i, j)| {
            soup.atom(i).unwrap().residue_index() == soup.atom(j).unwrap().residue_index()
        }));
    }

    #[test]
    fn residue_strategies_report_one_step_per_residue() {
        use std::sync::Mutex;

        let events = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event: Progress| {
            events.lock().unwrap().push(event);
        }));
        let mut soup = peptide();
        infer_bonds(&mut soup, &strategic(), &reporter);
        drop(reporter);

        let events = events.into_inner().unwrap();
        assert!(matches!(events.first(), Some(Progress::TaskStart { total_steps: 3 })));
        let steps = events
            .iter()
            .filter(|event| matches!(event, Progress::TaskIncrement))
            .count();
        assert_eq!(steps, 3);
        assert!(matches!(events.last(), Some(Progress::TaskFinish)));
    }
}
