use super::tolerance::clamp01;

#[inline]
pub fn distance(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    let dx = x1 - x2;
    let dy = y1 - y2;
    (dx * dx + dy * dy).sqrt()
}

/// Squared distance from `p` to the segment `(x1,y1)-(x2,y2)` and the
/// parameter `t` of the closest point along it.
pub fn seg_distance_sq(px: f64, py: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> (f64, f64) {
    let vx = x2 - x1;
    let vy = y2 - y1;
    let wx = px - x1;
    let wy = py - y1;
    let vv = vx * vx + vy * vy;
    let t = if vv > 0.0 { clamp01((wx * vx + wy * vy) / vv) } else { 0.0 };
    let dx = px - (x1 + t * vx);
    let dy = py - (y1 + t * vy);
    (dx * dx + dy * dy, t)
}
