use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_MOLECULES_DIR: &str = "../molecules";
pub const DEFAULT_CLUSTERS_DIR: &str = "../clusters";
pub const DEFAULT_OUTPUT_DIR: &str = ".";

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("At least one placement is required")]
    NoPlacements,

    #[error("Invalid placement #{index}: {reason}")]
    InvalidPlacement { index: usize, reason: String },
}

/// How the cluster is positioned relative to the monomer.
///
/// Both structures are centred on their centre of mass; the cluster is then
/// rotated by `angle` degrees about `axis` and shifted by `distance` along +z.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Separation of the two centres of mass along z, in Angstroms.
    pub distance: f64,
    /// Rotation applied to the cluster, in degrees (right-hand rule).
    pub angle: f64,
    /// Rotation axis; normalized when the rotation is built.
    pub axis: [f64; 3],
}

impl Placement {
    pub const fn new(distance: f64, angle: f64, axis: [f64; 3]) -> Self {
        Self {
            distance,
            angle,
            axis,
        }
    }

    /// The two stock orientations: a straight approach along z, and the same
    /// approach with the cluster turned 90 degrees about z.
    pub fn presets() -> Vec<Placement> {
        vec![
            Placement::new(4.0, 0.0, [1.0, 0.0, 0.0]),
            Placement::new(4.0, 90.0, [0.0, 0.0, 1.0]),
        ]
    }

    pub fn axis_vector(&self) -> Vector3<f64> {
        Vector3::from(self.axis)
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.distance.is_finite() {
            return Err(format!("distance must be finite (got {})", self.distance));
        }
        if !self.angle.is_finite() {
            return Err(format!("angle must be finite (got {})", self.angle));
        }
        if self.axis.iter().any(|c| !c.is_finite()) {
            return Err(format!("axis components must be finite (got {:?})", self.axis));
        }
        if self.axis.iter().all(|&c| c == 0.0) {
            return Err("axis must not be the zero vector".to_string());
        }
        Ok(())
    }
}

impl Default for Placement {
    fn default() -> Self {
        Placement::new(4.0, 0.0, [1.0, 0.0, 0.0])
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationConfig {
    pub molecules_dir: PathBuf,
    pub clusters_dir: PathBuf,
    pub output_dir: PathBuf,
    pub placements: Vec<Placement>,
    /// Run independent jobs on the rayon pool. Ignored without the `parallel` feature.
    pub parallel: bool,
    /// Where to write a CSV index of the generated files, if anywhere.
    pub manifest_path: Option<PathBuf>,
}

#[derive(Default)]
pub struct GenerationConfigBuilder {
    molecules_dir: Option<PathBuf>,
    clusters_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    placements: Option<Vec<Placement>>,
    parallel: Option<bool>,
    manifest_path: Option<PathBuf>,
}

impl GenerationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn molecules_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.molecules_dir = Some(path.into());
        self
    }
    pub fn clusters_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.clusters_dir = Some(path.into());
        self
    }
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(path.into());
        self
    }
    pub fn placements(mut self, placements: Vec<Placement>) -> Self {
        self.placements = Some(placements);
        self
    }
    pub fn add_placement(mut self, placement: Placement) -> Self {
        self.placements.get_or_insert_with(Vec::new).push(placement);
        self
    }
    pub fn parallel(mut self, enabled: bool) -> Self {
        self.parallel = Some(enabled);
        self
    }
    pub fn manifest_path(mut self, path: Option<PathBuf>) -> Self {
        self.manifest_path = path;
        self
    }

    pub fn build(self) -> Result<GenerationConfig, ConfigError> {
        let placements = self
            .placements
            .ok_or(ConfigError::MissingParameter("placements"))?;
        if placements.is_empty() {
            return Err(ConfigError::NoPlacements);
        }
        for (index, placement) in placements.iter().enumerate() {
            placement
                .validate()
                .map_err(|reason| ConfigError::InvalidPlacement { index, reason })?;
        }

        Ok(GenerationConfig {
            molecules_dir: self
                .molecules_dir
                .ok_or(ConfigError::MissingParameter("molecules_dir"))?,
            clusters_dir: self
                .clusters_dir
                .ok_or(ConfigError::MissingParameter("clusters_dir"))?,
            output_dir: self
                .output_dir
                .ok_or(ConfigError::MissingParameter("output_dir"))?,
            placements,
            parallel: self.parallel.unwrap_or(false),
            manifest_path: self.manifest_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_builder() -> GenerationConfigBuilder {
        GenerationConfigBuilder::new()
            .molecules_dir("mols")
            .clusters_dir("clus")
            .output_dir("out")
            .placements(Placement::presets())
    }

    #[test]
    fn presets_match_stock_orientations() {
        let presets = Placement::presets();
        assert_eq!(presets.len(), 2);
        assert_eq!(presets[0], Placement::new(4.0, 0.0, [1.0, 0.0, 0.0]));
        assert_eq!(presets[1], Placement::new(4.0, 90.0, [0.0, 0.0, 1.0]));
    }

    #[test]
    fn builder_succeeds_with_all_parameters() {
        let config = complete_builder().build().unwrap();
        assert_eq!(config.molecules_dir, PathBuf::from("mols"));
        assert_eq!(config.clusters_dir, PathBuf::from("clus"));
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.placements.len(), 2);
        assert!(!config.parallel);
        assert!(config.manifest_path.is_none());
    }

    #[test]
    fn builder_reports_missing_directories() {
        let result = GenerationConfigBuilder::new()
            .clusters_dir("clus")
            .output_dir("out")
            .placements(Placement::presets())
            .build();
        assert_eq!(result, Err(ConfigError::MissingParameter("molecules_dir")));
    }

    #[test]
    fn builder_requires_placements() {
        let result = GenerationConfigBuilder::new()
            .molecules_dir("mols")
            .clusters_dir("clus")
            .output_dir("out")
            .build();
        assert_eq!(result, Err(ConfigError::MissingParameter("placements")));

        let result = complete_builder().placements(vec![]).build();
        assert_eq!(result, Err(ConfigError::NoPlacements));
    }

    #[test]
    fn add_placement_appends_to_list() {
        let config = complete_builder()
            .add_placement(Placement::new(5.0, 45.0, [0.0, 1.0, 0.0]))
            .build()
            .unwrap();
        assert_eq!(config.placements.len(), 3);
        assert_eq!(config.placements[2].angle, 45.0);
    }

    #[test]
    fn builder_rejects_zero_axis() {
        let result = complete_builder()
            .add_placement(Placement::new(4.0, 10.0, [0.0, 0.0, 0.0]))
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidPlacement { index: 2, .. })
        ));
    }

    #[test]
    fn validate_rejects_non_finite_values() {
        assert!(Placement::new(f64::NAN, 0.0, [1.0, 0.0, 0.0]).validate().is_err());
        assert!(Placement::new(4.0, f64::INFINITY, [1.0, 0.0, 0.0]).validate().is_err());
        assert!(Placement::new(4.0, 0.0, [f64::NAN, 0.0, 1.0]).validate().is_err());
        assert!(Placement::default().validate().is_ok());
    }

    #[test]
    fn axis_vector_is_not_normalized() {
        let placement = Placement::new(4.0, 0.0, [2.0, 0.0, 0.0]);
        assert_eq!(placement.axis_vector(), Vector3::new(2.0, 0.0, 0.0));
    }
}
