//! Number formatting shared by output file names and XYZ comment lines.
//!
//! Floats print in their shortest round-trip form with a trailing `.0` when the
//! value is integral (`4.0`, `90.0`, `2.5`), so names stay stable across runs.

const INTEGRAL_DISPLAY_LIMIT: f64 = 1e16;

fn is_displayable_integer(value: f64) -> bool {
    value.is_finite() && value.fract() == 0.0 && value.abs() < INTEGRAL_DISPLAY_LIMIT
}

pub fn format_float(value: f64) -> String {
    if is_displayable_integer(value) {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

/// Formats a rotation axis as a bracketed list, e.g. `[1, 0, 0]` or `[0.5, 0, 1]`.
///
/// Integral components are printed without a fractional part; others use
/// [`format_float`].
pub fn format_axis(axis: &[f64; 3]) -> String {
    let components: Vec<String> = axis
        .iter()
        .map(|&c| {
            if is_displayable_integer(c) {
                format!("{}", c as i64)
            } else {
                format_float(c)
            }
        })
        .collect();
    format!("[{}]", components.join(", "))
}
