use crate::core::models::normals::NormalTable;
use crate::core::models::residue::{ResidueProxy, SecondaryStructure};
use crate::core::models::soup::Soup;
use crate::core::spatial::SpatialHash;
use crate::core::utils::geometry::{centroid, closest_point, sugar_normal};
use crate::core::utils::identifiers::{
    NUCLEIC_BACKBONE_ATOMS, PROTEIN_BACKBONE_ATOMS, is_deoxy_residue, is_grid_residue,
    is_water_residue,
};
use crate::engine::config::SecondaryConfig;
use crate::engine::progress::{Progress, ProgressReporter};
use nalgebra::{Point3, Vector3};
use std::collections::HashSet;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClassificationSummary {
    pub protein: usize,
    pub nucleic: usize,
    pub water: usize,
    pub grid: usize,
    pub other: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SecondarySummary {
    pub hydrogen_bonds: usize,
    pub helix_residues: usize,
    pub sheet_residues: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Backbone {
    Protein,
    Nucleic,
}

fn detect_backbone(residue: &ResidueProxy<'_>) -> Option<Backbone> {
    let has_all = |names: &[&str]| names.iter().all(|name| residue.atom_by_name(name).is_some());
    if has_all(&PROTEIN_BACKBONE_ATOMS) {
        Some(Backbone::Protein)
    } else if has_all(&NUCLEIC_BACKBONE_ATOMS) {
        Some(Backbone::Nucleic)
    } else {
        None
    }
}

fn centroid_atom(residue: &ResidueProxy<'_>) -> usize {
    let positions: Vec<Point3<f32>> = residue.atoms().map(|atom| atom.position()).collect();
    let offset = residue.atom_range().start;
    centroid(&positions)
        .and_then(|center| closest_point(&positions, &center))
        .map_or(offset, |local| offset + local)
}

/// Tags every residue by its backbone and picks its central atom.
///
/// Protein residues (CA, N, C) become coil centred on CA; nucleotides
/// (C3', O3', C5', O4', C1') become DNA or RNA centred on C3'. Everything
/// else is a non-polymer tagged water, grid or other, centred on the atom
/// nearest its centroid.
pub fn classify_residues(soup: &mut Soup) -> ClassificationSummary {
    let mut summary = ClassificationSummary::default();
    let assignments: Vec<(usize, SecondaryStructure, bool)> = soup
        .residues()
        .map(|residue| {
            let backbone = detect_backbone(&residue);
            let central = match backbone {
                Some(Backbone::Protein) => residue.atom_by_name("CA").map(|atom| atom.index()),
                Some(Backbone::Nucleic) => residue.atom_by_name("C3'").map(|atom| atom.index()),
                None => None,
            }
            .unwrap_or_else(|| centroid_atom(&residue));

            let name = residue.name();
            let tag = match backbone {
                Some(Backbone::Protein) => SecondaryStructure::Coil,
                Some(Backbone::Nucleic) if is_deoxy_residue(name) => SecondaryStructure::Dna,
                Some(Backbone::Nucleic) => SecondaryStructure::Rna,
                None if is_water_residue(name) => SecondaryStructure::Water,
                None if is_grid_residue(name) => SecondaryStructure::Grid,
                None => SecondaryStructure::Other,
            };
            (central, tag, backbone.is_some())
        })
        .collect();

    for (index, (central, tag, is_polymer)) in assignments.into_iter().enumerate() {
        match (tag, is_polymer) {
            (_, true) if tag.is_nucleic() => summary.nucleic += 1,
            (_, true) => summary.protein += 1,
            (SecondaryStructure::Water, _) => summary.water += 1,
            (SecondaryStructure::Grid, _) => summary.grid += 1,
            _ => summary.other += 1,
        }
        if let Some(mut residue) = soup.residue_mut(index) {
            residue
                .set_central_atom(central)
                .set_polymer(is_polymer)
                .set_secondary_structure(tag);
        }
    }
    debug!(?summary, "Classified residues.");
    summary
}

/// Finds backbone hydrogen bonds between polymer residues.
///
/// The result is indexed by the residue owning the N; each entry lists the
/// residues whose O lies within `cutoff` of that N. The map is directed and
/// may hold duplicates.
pub fn find_backbone_hbonds(soup: &Soup, cutoff: f32) -> Vec<Vec<usize>> {
    let mut partners = vec![Vec::new(); soup.residue_count()];

    // (residue, is_nitrogen) for each collected backbone atom
    let mut owners: Vec<(usize, bool)> = Vec::new();
    let mut points = Vec::new();
    for residue in soup.residues().filter(|residue| residue.is_polymer()) {
        for (name, is_nitrogen) in [("N", true), ("O", false)] {
            if let Some(atom) = residue.atom_by_name(name) {
                owners.push((residue.index(), is_nitrogen));
                points.push(atom.position());
            }
        }
    }

    let hash = SpatialHash::new(points, cutoff);
    let max_d2 = cutoff * cutoff;
    for (i, j) in hash.close_pairs() {
        let ((res_i, i_is_n), (res_j, j_is_n)) = (owners[i], owners[j]);
        if i_is_n == j_is_n || res_i == res_j {
            continue;
        }
        let (Some(a), Some(b)) = (hash.point(i), hash.point(j)) else {
            continue;
        };
        if nalgebra::distance_squared(a, b) > max_d2 {
            continue;
        }
        let (donor, acceptor) = if i_is_n { (res_i, res_j) } else { (res_j, res_i) };
        partners[donor].push(acceptor);
    }
    partners
}

/// Infers hydrogen bonds, helices, sheets and per-residue normals.
///
/// Residues must already be classified with [`classify_residues`]. The
/// residue-pair sheet scan reports one task step per residue.
pub fn assign_secondary_structure(
    soup: &mut Soup,
    config: &SecondaryConfig,
    reporter: &ProgressReporter,
) -> SecondarySummary {
    soup.hbond_partners = find_backbone_hbonds(soup, config.hbond_cutoff);
    apply_patterns(soup, config, reporter)
}

struct PatternContext {
    hbonds: HashSet<(usize, usize)>,
    positions: Vec<Point3<f32>>,
    count: usize,
}

impl PatternContext {
    /// Whether the O of `acceptor` takes a hydrogen bond from the N of `donor`.
    fn hbond(&self, acceptor: Option<usize>, donor: Option<usize>) -> bool {
        match (acceptor, donor) {
            (Some(a), Some(d)) => self.hbonds.contains(&(a, d)),
            _ => false,
        }
    }

    fn at(&self, index: usize, offset: isize) -> Option<usize> {
        index
            .checked_add_signed(offset)
            .filter(|&shifted| shifted < self.count)
    }

    fn vector(&self, from: usize, to: usize) -> Vector3<f32> {
        self.positions[to] - self.positions[from]
    }
}

pub(crate) fn apply_patterns(
    soup: &mut Soup,
    config: &SecondaryConfig,
    reporter: &ProgressReporter,
) -> SecondarySummary {
    let count = soup.residue_count();
    let context = PatternContext {
        hbonds: soup
            .hbond_partners
            .iter()
            .enumerate()
            .flat_map(|(donor, acceptors)| acceptors.iter().map(move |&acceptor| (acceptor, donor)))
            .collect(),
        positions: soup.residues().map(|residue| residue.position()).collect(),
        count,
    };
    let mut tags: Vec<SecondaryStructure> = soup
        .residues()
        .map(|residue| residue.secondary_structure())
        .collect();
    let mut normals = NormalTable::with_residues(count);

    for i in 0..count {
        let at = |offset| context.at(i, offset);
        if context.hbond(Some(i), at(4)) && context.hbond(at(1), at(5)) {
            let candidates = [context.vector(i, i + 4), context.vector(i + 1, i + 5)];
            mark_helix(&mut tags, &mut normals, i + 1..=i + 4, &candidates);
        }
        if context.hbond(Some(i), at(3)) && context.hbond(at(1), at(4)) {
            let candidates = [context.vector(i, i + 3), context.vector(i + 1, i + 4)];
            mark_helix(&mut tags, &mut normals, i + 1..=i + 3, &candidates);
        }
    }

    reporter.report(Progress::TaskStart {
        total_steps: count as u64,
    });
    for i in 0..count {
        for j in i.saturating_add(config.min_sheet_separation).saturating_add(1)..count {
            let (before_i, after_i) = (context.at(i, -1), context.at(i, 1));
            let (before_j, after_j) = (context.at(j, -1), context.at(j, 1));
            let (some_i, some_j) = (Some(i), Some(j));

            let parallel = (context.hbond(some_i, after_j) && context.hbond(before_j, some_i))
                || (context.hbond(before_i, some_j) && context.hbond(some_j, after_i));
            let antiparallel_bonded =
                context.hbond(some_i, some_j) && context.hbond(some_j, some_i);
            let antiparallel_unbonded =
                context.hbond(before_i, after_j) && context.hbond(before_j, after_i);

            if antiparallel_bonded {
                let normal = context.vector(i, j);
                normals.push_candidate(i, normal);
                normals.push_candidate(j, -normal);
            }
            if antiparallel_unbonded {
                let normal = context.vector(i, j);
                normals.push_candidate(i, -normal);
                normals.push_candidate(j, normal);
            }
            if parallel || antiparallel_bonded || antiparallel_unbonded {
                tags[i] = SecondaryStructure::Sheet;
                tags[j] = SecondaryStructure::Sheet;
            }
        }
        reporter.report(Progress::TaskIncrement);
    }
    reporter.report(Progress::TaskFinish);

    for residue in soup.residues().filter(|residue| residue.secondary_structure().is_nucleic()) {
        let sugar = ["C3'", "C1'", "C5'"].map(|name| residue.atom_by_name(name));
        if let [Some(c3), Some(c1), Some(c5)] = sugar {
            normals.push_candidate(
                residue.index(),
                sugar_normal(&c3.position(), &c1.position(), &c5.position()),
            );
        }
    }

    normals.average();
    align_sheet_normals(&tags, &mut normals);

    for (index, tag) in tags.iter().enumerate() {
        if let Some(mut residue) = soup.residue_mut(index) {
            residue.set_secondary_structure(*tag);
        }
    }
    soup.normals = normals;

    let summary = SecondarySummary {
        hydrogen_bonds: soup.hbond_partners.iter().map(Vec::len).sum(),
        helix_residues: tags.iter().filter(|&&t| t == SecondaryStructure::Helix).count(),
        sheet_residues: tags.iter().filter(|&&t| t == SecondaryStructure::Sheet).count(),
    };
    debug!(?summary, "Assigned secondary structure.");
    summary
}

fn mark_helix(
    tags: &mut [SecondaryStructure],
    normals: &mut NormalTable,
    residues: std::ops::RangeInclusive<usize>,
    candidates: &[Vector3<f32>],
) {
    for residue in residues {
        tags[residue] = SecondaryStructure::Helix;
        for &candidate in candidates {
            normals.push_candidate(residue, candidate);
        }
    }
}

/// Flips the later of two adjacent sheet residues whose normals disagree.
fn align_sheet_normals(tags: &[SecondaryStructure], normals: &mut NormalTable) {
    for index in 1..tags.len() {
        if tags[index - 1] != SecondaryStructure::Sheet || tags[index] != SecondaryStructure::Sheet {
            continue;
        }
        if let (Some(previous), Some(current)) = (normals.normal(index - 1), normals.normal(index)) {
            if previous.dot(&current) < 0.0 {
                normals.set_normal(index, -current);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::builder::{NewAtom, SoupBuilder};

    fn add_backbone(builder: &mut SoupBuilder, number: i32, x: f32, o_position: Option<Point3<f32>>) {
        builder.start_residue("ALA", "A", number, None);
        builder.add_atom(NewAtom::new("N", "N", Point3::new(x, 0.0, 0.0)));
        builder.add_atom(NewAtom::new("CA", "C", Point3::new(x + 1.5, 0.0, 0.0)));
        builder.add_atom(NewAtom::new("C", "C", Point3::new(x + 2.5, 1.0, 0.0)));
        let o = o_position.unwrap_or_else(|| Point3::new(x + 2.5, 2.2, 0.0));
        builder.add_atom(NewAtom::new("O", "O", o));
    }

    /// Six residues 20 Å apart whose only hydrogen bonds are O(0)→N(4)
    /// and O(1)→N(5).
    fn helix_soup() -> Soup {
        let mut builder = SoupBuilder::new();
        for k in 0..6 {
            let x = 20.0 * k as f32;
            let o = match k {
                0 => Some(Point3::new(80.0, 0.0, 3.0)),
                1 => Some(Point3::new(100.0, 0.0, 3.0)),
                _ => None,
            };
            add_backbone(&mut builder, k + 1, x, o);
        }
        builder.build()
    }

    /// One atom per residue at the given positions; classification is left
    /// untouched so central atoms are the single atoms.
    fn point_soup(positions: &[[f32; 3]]) -> Soup {
        let mut builder = SoupBuilder::new();
        for (k, &[x, y, z]) in positions.iter().enumerate() {
            builder.start_residue("ALA", "A", k as i32 + 1, None);
            builder.add_atom(NewAtom::new("CA", "C", Point3::new(x, y, z)));
        }
        builder.build()
    }

    fn tags(soup: &Soup) -> String {
        soup.residues()
            .map(|residue| residue.secondary_structure().as_char())
            .collect()
    }

    #[test]
    fn classification_tags_each_residue_kind() {
        let mut builder = SoupBuilder::new();
        add_backbone(&mut builder, 1, 0.0, None);
        builder.start_residue("DA", "B", 1, None);
        for (name, element, x) in [
            ("C5'", "C", 0.0),
            ("O4'", "O", 1.0),
            ("C3'", "C", 2.0),
            ("O3'", "O", 3.0),
            ("C1'", "C", 4.0),
        ] {
            builder.add_atom(NewAtom::new(name, element, Point3::new(x, 10.0, 0.0)));
        }
        builder.start_residue("U", "C", 1, None);
        for name in NUCLEIC_BACKBONE_ATOMS {
            builder.add_atom(NewAtom::new(name, "C", Point3::new(0.0, 20.0, 0.0)));
        }
        builder.start_residue("HOH", "W", 1, None);
        builder.add_atom(NewAtom::new("O", "O", Point3::new(0.0, 30.0, 0.0)));
        builder.start_residue(crate::core::utils::identifiers::GRID_RESIDUE_NAME, "G", 1, None);
        builder.add_atom(NewAtom::new("X", "C", Point3::new(0.0, 40.0, 0.0)));
        builder.start_residue("LIG", "L", 1, None);
        builder.add_atom(NewAtom::new("C1", "C", Point3::new(0.0, 50.0, 0.0)));
        builder.add_atom(NewAtom::new("C2", "C", Point3::new(1.0, 50.0, 0.0)));
        builder.add_atom(NewAtom::new("C3", "C", Point3::new(2.1, 50.0, 0.0)));
        let mut soup = builder.build();

        let summary = classify_residues(&mut soup);

        assert_eq!(tags(&soup), "CDRWG-");
        assert_eq!(
            summary,
            ClassificationSummary {
                protein: 1,
                nucleic: 2,
                water: 1,
                grid: 1,
                other: 1,
            }
        );
        assert_eq!(soup.residue(0).unwrap().central_atom().name(), "CA");
        assert_eq!(soup.residue(1).unwrap().central_atom().name(), "C3'");
        assert_eq!(soup.residue(5).unwrap().central_atom().name(), "C2");
        assert!(soup.residue(0).unwrap().is_polymer());
        assert!(soup.residue(1).unwrap().is_polymer());
        assert!(!soup.residue(3).unwrap().is_polymer());
    }

    #[test]
    fn residue_missing_ca_is_not_backbone() {
        let mut builder = SoupBuilder::new();
        builder.start_residue("ALA", "A", 1, None);
        builder.add_atom(NewAtom::new("N", "N", Point3::origin()));
        builder.add_atom(NewAtom::new("C", "C", Point3::new(1.0, 0.0, 0.0)));
        let mut soup = builder.build();

        classify_residues(&mut soup);
        let residue = soup.residue(0).unwrap();
        assert_eq!(residue.secondary_structure(), SecondaryStructure::Other);
        assert!(!residue.is_polymer());
    }

    #[test]
    fn hydrogen_bond_partner_map_is_directed() {
        let mut soup = helix_soup();
        classify_residues(&mut soup);
        let partners = find_backbone_hbonds(&soup, 3.5);

        assert_eq!(partners[4], vec![0]);
        assert_eq!(partners[5], vec![1]);
        assert!(partners[0].is_empty());
        assert!(partners[1].is_empty());
    }

    #[test]
    fn non_polymer_residues_are_ignored_for_hydrogen_bonds() {
        let mut soup = helix_soup();
        let partners = find_backbone_hbonds(&soup, 3.5);
        assert!(partners.iter().all(Vec::is_empty));

        classify_residues(&mut soup);
        assert!(!find_backbone_hbonds(&soup, 3.5)[4].is_empty());
    }

    #[test]
    fn alpha_helix_pattern_tags_the_inner_four_residues() {
        let mut soup = helix_soup();
        classify_residues(&mut soup);
        let summary = assign_secondary_structure(
            &mut soup,
            &SecondaryConfig::default(),
            &ProgressReporter::new(),
        );

        assert_eq!(tags(&soup), "CHHHHC");
        assert_eq!(summary.helix_residues, 4);
        assert_eq!(summary.hydrogen_bonds, 2);
        for index in 1..=4 {
            let normal = soup.residue(index).unwrap().normal().unwrap();
            assert!((normal - Vector3::new(1.0, 0.0, 0.0)).norm() < 1e-5);
        }
        assert!(soup.residue(0).unwrap().normal().is_none());
    }

    #[test]
    fn one_sided_hydrogen_bond_is_not_a_helix() {
        let mut soup = point_soup(&[[0.0; 3]; 6]);
        soup.hbond_partners[4].push(0);
        apply_patterns(
            &mut soup,
            &SecondaryConfig::default(),
            &ProgressReporter::new(),
        );
        assert_eq!(tags(&soup), "------");
    }

    #[test]
    fn three_ten_helix_pattern_tags_three_residues() {
        let positions: Vec<[f32; 3]> = (0..5).map(|k| [k as f32, 0.0, 0.0]).collect();
        let mut soup = point_soup(&positions);
        soup.hbond_partners[3].push(0);
        soup.hbond_partners[4].push(1);
        apply_patterns(
            &mut soup,
            &SecondaryConfig::default(),
            &ProgressReporter::new(),
        );

        assert_eq!(tags(&soup), "-HHH-");
        assert_eq!(soup.normals().candidates(2).len(), 2);
    }

    #[test]
    fn overlapping_windows_keep_the_last_write() {
        let positions: Vec<[f32; 3]> = (0..12).map(|k| [k as f32, 0.0, 0.0]).collect();
        let mut soup = point_soup(&positions);
        // helix 1..=4 from i = 0, then a bonded antiparallel pair (4, 10)
        soup.hbond_partners[4].push(0);
        soup.hbond_partners[5].push(1);
        soup.hbond_partners[10].push(4);
        soup.hbond_partners[4].push(10);
        apply_patterns(
            &mut soup,
            &SecondaryConfig::default(),
            &ProgressReporter::new(),
        );

        assert_eq!(&tags(&soup)[..5], "-HHHE");
        assert_eq!(soup.residue(10).unwrap().secondary_structure(), SecondaryStructure::Sheet);
        assert_eq!(soup.normals().candidates(4).len(), 3);
    }

    #[test]
    fn sheet_pairs_must_be_far_apart_in_sequence() {
        let positions: Vec<[f32; 3]> = (0..8).map(|k| [k as f32, 0.0, 0.0]).collect();
        let mut soup = point_soup(&positions);
        soup.hbond_partners[5].push(0);
        soup.hbond_partners[0].push(5);
        apply_patterns(
            &mut soup,
            &SecondaryConfig::default(),
            &ProgressReporter::new(),
        );
        assert!(!tags(&soup).contains('E'));

        soup.hbond_partners = vec![Vec::new(); 8];
        soup.hbond_partners[6].push(0);
        soup.hbond_partners[0].push(6);
        apply_patterns(
            &mut soup,
            &SecondaryConfig::default(),
            &ProgressReporter::new(),
        );
        assert_eq!(tags(&soup), "E-----E-");
    }

    #[test]
    fn parallel_and_unbonded_antiparallel_evidence_tag_sheets() {
        let positions: Vec<[f32; 3]> = (0..12).map(|k| [k as f32, 0.0, 0.0]).collect();

        let mut parallel = point_soup(&positions);
        // hbond(2, 9) and hbond(7, 2) around the pair (2, 8)
        parallel.hbond_partners[9].push(2);
        parallel.hbond_partners[2].push(7);
        apply_patterns(
            &mut parallel,
            &SecondaryConfig::default(),
            &ProgressReporter::new(),
        );
        let tagged: Vec<usize> = (0..12)
            .filter(|&r| parallel.residue(r).unwrap().secondary_structure() == SecondaryStructure::Sheet)
            .collect();
        assert_eq!(tagged, vec![2, 8]);

        let mut unbonded = point_soup(&positions);
        // hbond(1, 10) and hbond(8, 3) around the pair (2, 9)
        unbonded.hbond_partners[10].push(1);
        unbonded.hbond_partners[3].push(8);
        apply_patterns(
            &mut unbonded,
            &SecondaryConfig::default(),
            &ProgressReporter::new(),
        );
        assert_eq!(unbonded.residue(2).unwrap().secondary_structure(), SecondaryStructure::Sheet);
        assert_eq!(unbonded.residue(9).unwrap().secondary_structure(), SecondaryStructure::Sheet);
        let on_i = unbonded.residue(2).unwrap().normal().unwrap();
        let on_j = unbonded.residue(9).unwrap().normal().unwrap();
        assert!((on_i - Vector3::new(-1.0, 0.0, 0.0)).norm() < 1e-5);
        assert!((on_j - Vector3::new(1.0, 0.0, 0.0)).norm() < 1e-5);
    }

    #[test]
    fn adjacent_sheet_normals_are_flipped_to_agree() {
        let mut positions = [[0.0, 20.0, 0.0]; 12];
        positions[1] = [0.0, 0.0, 0.0];
        positions[2] = [0.0, 1.0, 0.0];
        positions[9] = [-5.0, 1.0, 0.0];
        positions[10] = [5.0, 0.0, 0.0];
        let mut soup = point_soup(&positions);
        for (a, b) in [(1, 10), (2, 9)] {
            soup.hbond_partners[a].push(b);
            soup.hbond_partners[b].push(a);
        }
        apply_patterns(
            &mut soup,
            &SecondaryConfig::default(),
            &ProgressReporter::new(),
        );

        for (first, second) in [(1, 2), (9, 10)] {
            let a = soup.residue(first).unwrap();
            let b = soup.residue(second).unwrap();
            assert_eq!(a.secondary_structure(), SecondaryStructure::Sheet);
            assert_eq!(b.secondary_structure(), SecondaryStructure::Sheet);
            assert!(a.normal().unwrap().dot(&b.normal().unwrap()) >= 0.0);
        }
        let flipped = soup.residue(2).unwrap().normal().unwrap();
        assert!((flipped - Vector3::new(1.0, 0.0, 0.0)).norm() < 1e-5);
    }

    #[test]
    fn nucleotides_get_a_sugar_plane_normal() {
        let mut builder = SoupBuilder::new();
        builder.start_residue("DG", "B", 1, None);
        for (name, element, position) in [
            ("C5'", "C", Point3::new(0.0, 1.0, 0.0)),
            ("O4'", "O", Point3::new(1.0, 1.0, 0.0)),
            ("C3'", "C", Point3::new(0.0, 0.0, 0.0)),
            ("O3'", "O", Point3::new(-1.0, 0.0, 0.0)),
            ("C1'", "C", Point3::new(1.0, 0.0, 0.0)),
        ] {
            builder.add_atom(NewAtom::new(name, element, position));
        }
        let mut soup = builder.build();
        classify_residues(&mut soup);
        assign_secondary_structure(
            &mut soup,
            &SecondaryConfig::default(),
            &ProgressReporter::new(),
        );

        let residue = soup.residue(0).unwrap();
        assert_eq!(residue.secondary_structure(), SecondaryStructure::Dna);
        let normal = residue.normal().unwrap();
        assert!((normal - Vector3::new(0.0, 0.0, 1.0)).norm() < 1e-5);
    }

    #[test]
    fn reassignment_does_not_accumulate_candidates() {
        let mut soup = helix_soup();
        classify_residues(&mut soup);
        assign_secondary_structure(
            &mut soup,
            &SecondaryConfig::default(),
            &ProgressReporter::new(),
        );
        assign_secondary_structure(
            &mut soup,
            &SecondaryConfig::default(),
            &ProgressReporter::new(),
        );
        assert_eq!(soup.normals().candidates(2).len(), 2);
    }

    #[test]
    fn sheet_scan_reports_one_step_per_residue() {
        use std::sync::Mutex;

        let steps = Mutex::new((None, 0u64, false));
        let reporter = ProgressReporter::with_callback(Box::new(|event: Progress| {
            let mut steps = steps.lock().unwrap();
            match event {
                Progress::TaskStart { total_steps } => steps.0 = Some(total_steps),
                Progress::TaskIncrement => steps.1 += 1,
                Progress::TaskFinish => steps.2 = true,
                _ => {}
            }
        }));
        let mut soup = helix_soup();
        classify_residues(&mut soup);
        assign_secondary_structure(&mut soup, &SecondaryConfig::default(), &reporter);
        drop(reporter);

        assert_eq!(steps.into_inner().unwrap(), (Some(6), 6, true));
    }
}
