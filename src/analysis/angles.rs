//! Joint angle calculation using dot product
//!
//! Computes the angle at a vertex point from vectors toward two
//! neighboring points. Stateless; every frame recomputes from scratch.

/// Angle magnitudes below this are treated as zero-length vectors.
const MIN_MAGNITUDE: f64 = 1e-9;

/// Calculate the angle at `vertex` in degrees.
///
/// Uses dot product formula: cos(θ) = (v1 · v2) / (|v1| × |v2|)
/// with v1 = p1 − vertex and v2 = p3 − vertex.
///
/// Returns degrees in [0, 180]:
/// - 180° = the three points are in a straight line
/// - 0° = both neighbors fold onto the same ray, or degenerate input
///
/// Either vector having zero magnitude yields 0.0 instead of failing.
/// Callers must treat a 0° reading as indeterminate whenever an input
/// landmark sat near the confidence floor; a raw 0° is never trustworthy
/// on its own.
pub fn angle_at(p1: (f64, f64), vertex: (f64, f64), p3: (f64, f64)) -> f64 {
    let v1 = (p1.0 - vertex.0, p1.1 - vertex.1);
    let v2 = (p3.0 - vertex.0, p3.1 - vertex.1);

    let dot = v1.0 * v2.0 + v1.1 * v2.1;

    let mag1 = (v1.0 * v1.0 + v1.1 * v1.1).sqrt();
    let mag2 = (v2.0 * v2.0 + v2.1 * v2.1).sqrt();

    if mag1 < MIN_MAGNITUDE || mag2 < MIN_MAGNITUDE {
        return 0.0;
    }

    // Clamp keeps acos defined when rounding pushes |cos θ| past 1.
    let cos_angle = (dot / (mag1 * mag2)).clamp(-1.0, 1.0);

    cos_angle.acos().to_degrees()
}

/// Euclidean distance between two points.
pub fn distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    let dx = b.0 - a.0;
    let dy = b.1 - a.1;
    (dx * dx + dy * dy).sqrt()
}

/// Perpendicular offset of `point` from the infinite line through `a` and
/// `b`, normalized by the length of the a→b segment.
///
/// Scale-invariant: the same body pose yields the same ratio at any image
/// resolution. Returns `None` when a and b coincide.
pub fn line_offset_ratio(point: (f64, f64), a: (f64, f64), b: (f64, f64)) -> Option<f64> {
    let len = distance(a, b);
    if len < MIN_MAGNITUDE {
        return None;
    }
    let cross = (b.0 - a.0) * (point.1 - a.1) - (b.1 - a.1) * (point.0 - a.0);
    Some(cross.abs() / (len * len))
}
