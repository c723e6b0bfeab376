use nalgebra::Vector3;

/// Per-residue orientation data: the candidate vectors collected while
/// classifying secondary structure and the averaged unit normal derived
/// from them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalTable {
    candidates: Vec<Vec<Vector3<f32>>>,
    normals: Vec<Option<Vector3<f32>>>,
}

impl NormalTable {
    pub(crate) fn with_residues(count: usize) -> Self {
        Self {
            candidates: vec![Vec::new(); count],
            normals: vec![None; count],
        }
    }

    pub fn candidates(&self, residue: usize) -> &[Vector3<f32>] {
        self.candidates.get(residue).map_or(&[], Vec::as_slice)
    }

    pub fn normal(&self, residue: usize) -> Option<Vector3<f32>> {
        self.normals.get(residue).copied().flatten()
    }

    pub(crate) fn push_candidate(&mut self, residue: usize, candidate: Vector3<f32>) {
        self.candidates[residue].push(candidate);
    }

    pub(crate) fn set_normal(&mut self, residue: usize, normal: Vector3<f32>) {
        self.normals[residue] = Some(normal);
    }

    /// Sums each residue's candidates and renormalises the result. Residues
    /// without candidates, or whose candidates cancel out, get no normal.
    pub(crate) fn average(&mut self) {
        for (residue, candidates) in self.candidates.iter().enumerate() {
            if candidates.is_empty() {
                continue;
            }
            let sum: Vector3<f32> = candidates.iter().sum();
            self.normals[residue] = sum.try_normalize(f32::EPSILON);
        }
    }
}
