use nalgebra::Point3;
use std::collections::HashMap;

type CellKey = (i32, i32, i32);

/// A coarse bucket index over a fixed point set.
///
/// Points are hashed into cubic cells of `cell_size`; two points closer than
/// `cell_size` always sit in the same or adjacent cells, so scanning the 3×3×3
/// neighbourhood of each cell finds every such pair. The scan is a superset:
/// callers apply their own exact distance test.
#[derive(Debug, Clone)]
pub struct SpatialHash {
    points: Vec<Point3<f32>>,
    cells: HashMap<CellKey, Vec<usize>>,
    cell_size: f32,
}

impl SpatialHash {
    pub fn new(points: Vec<Point3<f32>>, cell_size: f32) -> Self {
        let mut cells: HashMap<CellKey, Vec<usize>> = HashMap::with_capacity(points.len());
        for (index, point) in points.iter().enumerate() {
            cells
                .entry(cell_key(point, cell_size))
                .or_default()
                .push(index);
        }
        Self {
            points,
            cells,
            cell_size,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn point(&self, index: usize) -> Option<&Point3<f32>> {
        self.points.get(index)
    }

    /// Collects the indices of every point in the 3×3×3 cell neighbourhood
    /// of `position`, including points in its own cell.
    pub fn neighbours_of(&self, position: &Point3<f32>, out: &mut Vec<usize>) {
        out.clear();
        let (cx, cy, cz) = cell_key(position, self.cell_size);
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let key = (
                        cx.checked_add(dx),
                        cy.checked_add(dy),
                        cz.checked_add(dz),
                    );
                    if let (Some(x), Some(y), Some(z)) = key {
                        if let Some(indices) = self.cells.get(&(x, y, z)) {
                            out.extend_from_slice(indices);
                        }
                    }
                }
            }
        }
    }

    /// Lazily enumerates candidate pairs `(i, j)` with `i < j` whose cells
    /// touch. Each unordered pair is produced exactly once.
    pub fn close_pairs(&self) -> ClosePairs<'_> {
        ClosePairs {
            hash: self,
            next_point: 0,
            current: 0,
            candidates: Vec::new(),
            cursor: 0,
        }
    }
}

/// Coordinates beyond the `i32` cell range saturate into the outermost cells.
fn cell_key(position: &Point3<f32>, cell_size: f32) -> CellKey {
    (
        (position.x / cell_size).floor() as i32,
        (position.y / cell_size).floor() as i32,
        (position.z / cell_size).floor() as i32,
    )
}

/// Iterator returned by [`SpatialHash::close_pairs`].
///
/// Walks the points in index order and, for each one, buffers the neighbours
/// with a higher index. Once exhausted it stays exhausted.
#[derive(Debug)]
pub struct ClosePairs<'a> {
    hash: &'a SpatialHash,
    next_point: usize,
    current: usize,
    candidates: Vec<usize>,
    cursor: usize,
}

impl Iterator for ClosePairs<'_> {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(&other) = self.candidates.get(self.cursor) {
                self.cursor += 1;
                return Some((self.current, other));
            }
            if self.next_point >= self.hash.len() {
                return None;
            }

            self.current = self.next_point;
            self.next_point += 1;
            let current = self.current;
            self.hash
                .neighbours_of(&self.hash.points[current], &mut self.candidates);
            self.candidates.retain(|&other| other > current);
            self.candidates.sort_unstable();
            self.cursor = 0;
        }
    }
}
