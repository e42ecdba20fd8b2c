// Centralized tolerances for position comparisons

pub const EPS_POS: f64 = 1e-9; // point coincidence threshold (map units)

#[inline] pub fn clamp01(x: f64) -> f64 { x.max(0.0).min(1.0) }
#[inline] pub fn approx_eq(a: f64, b: f64, eps: f64) -> bool { (a - b).abs() <= eps }
