//! Scalar helpers for snapping values onto the grid or into a range.

/// Grid step in canvas units.
pub const GRID_STEP: f64 = 10.0;

/// Snap a value to the nearest multiple of [`GRID_STEP`].
///
/// A remainder strictly greater than half a step rounds up, anything else
/// rounds down. Values at or below zero map to zero.
pub fn align_to_grid(value: f64) -> f64 {
    if value <= 0.0 {
        return 0.0;
    }
    let steps = (value / GRID_STEP).floor();
    let rest = value % GRID_STEP;
    if rest > GRID_STEP / 2.0 {
        (steps + 1.0) * GRID_STEP
    } else {
        steps * GRID_STEP
    }
}

/// Clamp a value into `[min, max]`.
///
/// A missing minimum is treated as zero.
pub fn align_to_range(value: f64, (min, max): (Option<f64>, f64)) -> f64 {
    let min = min.unwrap_or(0.0);
    max.min(min.max(value))
}
