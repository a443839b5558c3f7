//! Pure geometry used to evaluate measurements.
//!
//! Nothing here knows about units or capture state; inputs are scene
//! world-space coordinates and outputs are scene units (or degrees).

pub mod point3;

pub use point3::Point3;

/// Calculates the Euclidean distance between two 3D points.
pub fn distance(a: Point3, b: Point3) -> f64 {
    (b - a).length()
}

/// Calculates the area of a polygon using the shoelace formula on its XY
/// projection.
///
/// The Z component is ignored, so a polygon lying in a tilted plane is
/// measured by its footprint on the XY plane rather than its true surface
/// area. Fewer than three vertices yield `0.0`.
pub fn polygon_area(vertices: &[Point3]) -> f64 {
    if vertices.len() < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..vertices.len() {
        let j = (i + 1) % vertices.len();
        sum += vertices[i].x * vertices[j].y - vertices[j].x * vertices[i].y;
    }
    sum.abs() * 0.5
}

/// Returns the angle at `vertex` between the rays towards `a` and `b`, in
/// degrees within `[0, 180]`.
///
/// If either ray has zero length the angle is undefined and `0.0` is
/// returned.
pub fn angle_at(a: Point3, vertex: Point3, b: Point3) -> f64 {
    let (Some(u1), Some(u2)) = ((a - vertex).normalized(), (b - vertex).normalized()) else {
        return 0.0;
    };
    // rounding can push the cosine slightly outside acos' domain
    let cos = u1.dot(u2).clamp(-1.0, 1.0);
    cos.acos().to_degrees()
}
