use super::config::Placement;
use super::error::EngineError;
use crate::core::utils::format::{format_axis, format_float};
use std::path::Path;

pub const XYZ_EXTENSION: &str = "xyz";

/// Returns the file name of `path` with its last extension removed.
pub fn base_name(path: &Path) -> Result<String, EngineError> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .map(str::to_string)
        .ok_or_else(|| EngineError::InvalidFileName {
            path: path.to_path_buf(),
        })
}

/// `<monomer>_<cluster>_D<distance>_A<angle>.xyz`
///
/// The axis is not part of the name, so two placements that differ only in
/// their axis map to the same file.
pub fn output_file_name(monomer: &str, cluster: &str, placement: &Placement) -> String {
    format!(
        "{}_{}_D{}_A{}.{}",
        monomer,
        cluster,
        format_float(placement.distance),
        format_float(placement.angle),
        XYZ_EXTENSION
    )
}

pub fn comment_line(monomer: &str, cluster: &str, placement: &Placement) -> String {
    format!(
        "{} + {}: Distance = {}, Angle = {}, Axis = {}",
        monomer,
        cluster,
        format_float(placement.distance),
        format_float(placement.angle),
        format_axis(&placement.axis)
    )
}
