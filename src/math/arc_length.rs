use super::Point3;

/// Returns the cumulative arc length at each point of a polyline.
///
/// The first entry is always `0.0` and the last is the total length.
#[must_use]
pub fn cumulative_lengths(points: &[Point3]) -> Vec<f64> {
    let mut lengths = Vec::with_capacity(points.len());
    if points.is_empty() {
        return lengths;
    }
    lengths.push(0.0);
    for i in 1..points.len() {
        let seg_len = (points[i] - points[i - 1]).norm();
        lengths.push(lengths[i - 1] + seg_len);
    }
    lengths
}

/// Returns the point at arc-length `distance` along a polyline.
///
/// `cumulative` must come from [`cumulative_lengths`] for the same points.
/// The distance is clamped to `[0, total]`, so the returned point is always
/// on the polyline. Positions that fall exactly on a vertex return that
/// vertex unchanged. An empty slice yields the origin.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn point_at_distance(points: &[Point3], cumulative: &[f64], distance: f64) -> Point3 {
    let (Some(&first), Some(&last)) = (points.first(), points.last()) else {
        return Point3::origin();
    };
    let total = cumulative.last().copied().unwrap_or(0.0);
    if distance <= 0.0 {
        return first;
    }
    if distance >= total {
        return last;
    }

    // First vertex at or beyond the requested distance.
    let idx = cumulative.partition_point(|&c| c < distance);
    if idx == 0 {
        return first;
    }
    if idx >= points.len() {
        return last;
    }
    if cumulative[idx] == distance {
        return points[idx];
    }

    let seg_start = cumulative[idx - 1];
    let seg_len = cumulative[idx] - seg_start;
    if seg_len <= f64::EPSILON {
        return points[idx];
    }
    let t = (distance - seg_start) / seg_len;
    points[idx - 1] + (points[idx] - points[idx - 1]) * t
}
