use nalgebra::{Point3, Rotation3, Unit, Vector3};

const AXIS_NORM_EPSILON: f64 = 1e-12;

/// Builds a right-handed rotation of `angle_degrees` about `axis`.
///
/// The axis does not need to be normalized. Returns `None` when the axis has
/// (numerically) zero length and therefore defines no direction.
pub fn rotation_from_axis_angle(axis: &Vector3<f64>, angle_degrees: f64) -> Option<Rotation3<f64>> {
    Unit::try_new(*axis, AXIS_NORM_EPSILON)
        .map(|unit_axis| Rotation3::from_axis_angle(&unit_axis, angle_degrees.to_radians()))
}

/// Computes the weighted mean of a set of points.
///
/// Returns `None` for an empty input or when the weights sum to zero.
pub fn weighted_centroid<I>(weighted_points: I) -> Option<Point3<f64>>
where
    I: IntoIterator<Item = (Point3<f64>, f64)>,
{
    let (sum, total_weight) = weighted_points.into_iter().fold(
        (Vector3::<f64>::zeros(), 0.0_f64),
        |(sum, total), (point, weight)| (sum + point.coords * weight, total + weight),
    );
    if total_weight == 0.0 {
        None
    } else {
        Some(Point3::from(sum / total_weight))
    }
}

pub fn calculate_rmsd(coords1: &[Point3<f64>], coords2: &[Point3<f64>]) -> Option<f64> {
    if coords1.len() != coords2.len() || coords1.is_empty() {
        return None;
    }
    let n = coords1.len() as f64;
    let squared_dist_sum: f64 = coords1
        .iter()
        .zip(coords2.iter())
        .map(|(p1, p2)| (p1 - p2).norm_squared())
        .sum();
    Some((squared_dist_sum / n).sqrt())
}
