use super::{Matrix4, Point3};

/// Transforms local vertex positions into world space.
///
/// `world` is a homogeneous object-to-world matrix; the projective row is
/// honoured, so affine matrices behave as `R * p + t`.
#[must_use]
pub fn to_world(local: &[Point3], world: &Matrix4) -> Vec<Point3> {
    local.iter().map(|p| world.transform_point(p)).collect()
}
