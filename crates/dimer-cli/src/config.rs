mod defaults;

use crate::cli::GenerateArgs;
use crate::error::{CliError, Result};
use defaults::DefaultsConfig;
use dimergen::engine::config::{self as core_config, Placement};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A `[[placements]]` entry; omitted fields fall back to the first stock preset.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
struct PartialPlacement {
    distance: Option<f64>,
    angle: Option<f64>,
    axis: Option<[f64; 3]>,
}

impl From<PartialPlacement> for Placement {
    fn from(p: PartialPlacement) -> Self {
        let fallback = Placement::default();
        Placement::new(
            p.distance.unwrap_or(fallback.distance),
            p.angle.unwrap_or(fallback.angle),
            p.axis.unwrap_or(fallback.axis),
        )
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct PartialGenerationConfig {
    molecules_dir: Option<PathBuf>,
    clusters_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    parallel: Option<bool>,
    manifest: Option<PathBuf>,
    placements: Option<Vec<PartialPlacement>>,
}

impl PartialGenerationConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Loads the config file if one was given, otherwise starts from an empty config.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Resolves every setting as CLI argument, then `-S` override, then config
    /// file, then built-in default.
    pub fn merge_with_cli(mut self, args: &GenerateArgs) -> Result<core_config::GenerationConfig> {
        self.apply_set_values(&args.set_values)?;
        let defaults = DefaultsConfig::default();

        let placements = if !args.placements.is_empty() {
            args.placements.clone()
        } else if let Some(partial) = self.placements {
            partial.into_iter().map(Into::into).collect()
        } else {
            defaults.placements
        };

        core_config::GenerationConfigBuilder::new()
            .molecules_dir(
                args.molecules
                    .clone()
                    .or(self.molecules_dir)
                    .unwrap_or(defaults.molecules_dir),
            )
            .clusters_dir(
                args.clusters
                    .clone()
                    .or(self.clusters_dir)
                    .unwrap_or(defaults.clusters_dir),
            )
            .output_dir(
                args.output_dir
                    .clone()
                    .or(self.output_dir)
                    .unwrap_or(defaults.output_dir),
            )
            .placements(placements)
            .parallel(args.parallel || self.parallel.unwrap_or(defaults.parallel))
            .manifest_path(args.manifest.clone().or(self.manifest))
            .build()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value_str)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };

            match key {
                "molecules-dir" => self.molecules_dir = Some(PathBuf::from(value_str)),
                "clusters-dir" => self.clusters_dir = Some(PathBuf::from(value_str)),
                "output-dir" => self.output_dir = Some(PathBuf::from(value_str)),
                "manifest" => self.manifest = Some(PathBuf::from(value_str)),
                "parallel" => {
                    self.parallel = Some(value_str.parse().map_err(|_| {
                        CliError::Config(format!(
                            "Invalid boolean value for {}: {}",
                            key, value_str
                        ))
                    })?);
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}
