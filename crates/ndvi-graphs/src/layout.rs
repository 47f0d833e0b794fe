//! Axis ranges and tick spacing for the two-axis chart.

/// Headroom added above the largest value on auto-ranged axes.
const AUTO_RANGE_HEADROOM: f64 = 0.05;

/// Value range of one axis.
///
/// The lower bound starts at zero unless the data dips below it. The upper
/// bound is `axis_max` when fixed, else the largest finite value plus
/// headroom. A flat or empty series gets a unit-height range.
pub fn value_range(values: &[f64], axis_max: Option<f64>) -> (f64, f64) {
    let finite = values.iter().copied().filter(|v| v.is_finite());
    let (min, max) = finite.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });

    let low = if min.is_finite() { min.min(0.0) } else { 0.0 };
    let high = axis_max.unwrap_or_else(|| {
        if max.is_finite() {
            max + max.abs() * AUTO_RANGE_HEADROOM
        } else {
            low + 1.0
        }
    });

    if high > low {
        (low, high)
    } else {
        (low, low + 1.0)
    }
}

/// Last x coordinate of a categorical axis over `len` points.
///
/// Never zero, so plotters always gets a non-degenerate range.
pub fn x_axis_end(len: usize) -> usize {
    len.saturating_sub(1).max(1)
}

/// Number of x labels to request for `len` points.
pub fn x_label_count(len: usize, max_ticks: usize) -> usize {
    len.min(max_ticks).max(1)
}
