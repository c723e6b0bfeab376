use nalgebra::{Point3, Vector3};

pub fn centroid(points: &[Point3<f32>]) -> Option<Point3<f32>> {
    if points.is_empty() {
        return None;
    }
    let sum: Vector3<f32> = points.iter().map(|p| p.coords).sum();
    Some(Point3::from(sum / points.len() as f32))
}

/// Index into `points` of the point nearest to `target`; ties keep the
/// earliest point.
pub fn closest_point(points: &[Point3<f32>], target: &Point3<f32>) -> Option<usize> {
    points
        .iter()
        .enumerate()
        .map(|(index, point)| (index, nalgebra::distance_squared(point, target)))
        .fold(None, |best: Option<(usize, f32)>, (index, d2)| match best {
            Some((_, best_d2)) if best_d2 <= d2 => best,
            _ => Some((index, d2)),
        })
        .map(|(index, _)| index)
}

/// Plane normal of a nucleotide sugar: (C3'→C1') × (C3'→C5').
pub fn sugar_normal(c3: &Point3<f32>, c1: &Point3<f32>, c5: &Point3<f32>) -> Vector3<f32> {
    (c1 - c3).cross(&(c5 - c3))
}
