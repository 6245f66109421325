/// Compute X (seconds) and Y (WPM) bounds for the results chart
pub fn compute_chart_params(points: &[(f64, f64)], duration_secs: f64) -> (f64, f64) {
    let highest_wpm = points
        .iter()
        .map(|&(_, wpm)| wpm)
        .fold(0.0_f64, f64::max);

    let overall_duration = match points.last() {
        Some(&(t, _)) => t,
        None => duration_secs,
    }
    .max(1.0);

    (overall_duration, highest_wpm.round().max(1.0))
}

/// Format a simple numeric label consistently
pub fn format_label(val: f64) -> String {
    if (val - val.round()).abs() < f64::EPSILON {
        format!("{}", val.round())
    } else {
        format!("{val:.2}")
    }
}
