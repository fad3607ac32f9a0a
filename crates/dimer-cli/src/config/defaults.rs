use dimergen::engine::config::{
    DEFAULT_CLUSTERS_DIR, DEFAULT_MOLECULES_DIR, DEFAULT_OUTPUT_DIR, Placement,
};
use std::path::PathBuf;

/// Values used for any setting that neither the CLI nor the config file provides.
pub struct DefaultsConfig {
    pub molecules_dir: PathBuf,
    pub clusters_dir: PathBuf,
    pub output_dir: PathBuf,
    pub parallel: bool,
    pub placements: Vec<Placement>,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            molecules_dir: PathBuf::from(DEFAULT_MOLECULES_DIR),
            clusters_dir: PathBuf::from(DEFAULT_CLUSTERS_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            parallel: false,
            placements: Placement::presets(),
        }
    }
}
