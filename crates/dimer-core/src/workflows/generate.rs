use crate::core::io::traits::MolecularFile;
use crate::core::io::xyz::{XyzFile, XyzMetadata};
use crate::core::models::system::MolecularSystem;
use crate::engine::combine;
use crate::engine::config::{GenerationConfig, Placement};
use crate::engine::error::EngineError;
use crate::engine::naming;
use crate::engine::progress::{Progress, ProgressReporter};
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// One monomer/cluster/placement combination; fully determines one output file.
#[derive(Debug, Clone, PartialEq)]
pub struct CombinationJob {
    pub monomer_path: PathBuf,
    pub cluster_path: PathBuf,
    pub placement: Placement,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedDimer {
    pub path: PathBuf,
    pub file_name: String,
    pub monomer: String,
    pub cluster: String,
    pub placement: Placement,
    pub atom_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationReport {
    pub monomer_count: usize,
    pub cluster_count: usize,
    /// Written dimers, in job order.
    pub dimers: Vec<GeneratedDimer>,
}

#[derive(Serialize)]
struct ManifestRecord<'a> {
    file: &'a str,
    monomer: &'a str,
    cluster: &'a str,
    distance: f64,
    angle: f64,
    axis_x: f64,
    axis_y: f64,
    axis_z: f64,
    atoms: usize,
}

/// Generates one dimer per (monomer, cluster, placement) combination.
///
/// Monomers and clusters are the `.xyz` files found directly inside the configured
/// directories, visited in lexicographic order. The first failing job aborts the
/// batch; outputs written before the failure are left on disk.
#[instrument(skip_all, name = "generation_workflow")]
pub fn run(
    config: &GenerationConfig,
    reporter: &ProgressReporter,
) -> Result<GenerationReport, EngineError> {
    info!(
        "Scanning monomers in {:?} and clusters in {:?}.",
        config.molecules_dir, config.clusters_dir
    );
    let monomers = list_xyz_files(&config.molecules_dir)?;
    let clusters = list_xyz_files(&config.clusters_dir)?;
    reporter.report(Progress::ScanFinished {
        monomers: monomers.len(),
        clusters: clusters.len(),
    });

    let jobs = plan_jobs(&monomers, &clusters, &config.placements);
    info!(
        monomers = monomers.len(),
        clusters = clusters.len(),
        jobs = jobs.len(),
        "Planned dimer generation."
    );
    warn_on_name_collisions(&jobs);

    if jobs.is_empty() {
        info!("No monomer/cluster combinations found; nothing to generate.");
        reporter.report(Progress::Message(
            "No monomer/cluster combinations found.".to_string(),
        ));
    } else {
        fs::create_dir_all(&config.output_dir).map_err(|source| EngineError::Io {
            path: config.output_dir.clone(),
            source,
        })?;
    }

    reporter.report(Progress::BatchStart {
        total_jobs: jobs.len() as u64,
    });
    let dimers = if config.parallel {
        execute_parallel(&jobs, &config.output_dir, reporter)?
    } else {
        execute_sequential(&jobs, &config.output_dir, reporter)?
    };
    reporter.report(Progress::BatchFinish);

    if let Some(manifest_path) = &config.manifest_path {
        write_manifest(manifest_path, &dimers)?;
        info!("Manifest written to {:?}.", manifest_path);
    }

    info!(written = dimers.len(), "Dimer generation complete.");
    Ok(GenerationReport {
        monomer_count: monomers.len(),
        cluster_count: clusters.len(),
        dimers,
    })
}

/// Reads, combines and writes a single job into `output_dir`.
pub fn make_dimer(job: &CombinationJob, output_dir: &Path) -> Result<GeneratedDimer, EngineError> {
    let monomer_name = naming::base_name(&job.monomer_path)?;
    let cluster_name = naming::base_name(&job.cluster_path)?;

    let monomer = read_structure(&job.monomer_path)?;
    let cluster = read_structure(&job.cluster_path)?;
    let dimer = combine::combine(monomer, cluster, &job.placement)?;

    let file_name = naming::output_file_name(&monomer_name, &cluster_name, &job.placement);
    let path = output_dir.join(&file_name);
    let metadata =
        XyzMetadata::with_comment(naming::comment_line(&monomer_name, &cluster_name, &job.placement));
    XyzFile::write_to_path(&dimer, &metadata, &path).map_err(|source| {
        EngineError::StructureWrite {
            path: path.clone(),
            source,
        }
    })?;
    debug!("Wrote {} atoms to {:?}.", dimer.len(), path);

    Ok(GeneratedDimer {
        path,
        file_name,
        monomer: monomer_name,
        cluster: cluster_name,
        placement: job.placement,
        atom_count: dimer.len(),
    })
}

/// Lists the regular files in `dir` whose name ends in `.xyz`, sorted by path.
pub fn list_xyz_files(dir: &Path) -> Result<Vec<PathBuf>, EngineError> {
    let to_io_error = |source| EngineError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(to_io_error)? {
        let path = entry.map_err(to_io_error)?.path();
        let has_xyz_suffix = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with(".xyz"));
        if has_xyz_suffix && path.is_file() {
            files.push(path);
        } else {
            debug!("Skipping {:?}.", path);
        }
    }
    files.sort();
    Ok(files)
}

/// Monomer-major, then cluster, then placement in configured order.
pub fn plan_jobs(
    monomers: &[PathBuf],
    clusters: &[PathBuf],
    placements: &[Placement],
) -> Vec<CombinationJob> {
    let mut jobs = Vec::with_capacity(monomers.len() * clusters.len() * placements.len());
    for monomer in monomers {
        for cluster in clusters {
            for placement in placements {
                jobs.push(CombinationJob {
                    monomer_path: monomer.clone(),
                    cluster_path: cluster.clone(),
                    placement: *placement,
                });
            }
        }
    }
    jobs
}

pub fn write_manifest(path: &Path, dimers: &[GeneratedDimer]) -> Result<(), EngineError> {
    let to_manifest_error = |source: csv::Error| EngineError::Manifest {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::Writer::from_path(path).map_err(to_manifest_error)?;
    for dimer in dimers {
        let [axis_x, axis_y, axis_z] = dimer.placement.axis;
        writer
            .serialize(ManifestRecord {
                file: &dimer.file_name,
                monomer: &dimer.monomer,
                cluster: &dimer.cluster,
                distance: dimer.placement.distance,
                angle: dimer.placement.angle,
                axis_x,
                axis_y,
                axis_z,
                atoms: dimer.atom_count,
            })
            .map_err(to_manifest_error)?;
    }
    writer.flush().map_err(|source| EngineError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn read_structure(path: &Path) -> Result<MolecularSystem, EngineError> {
    let (system, _) = XyzFile::read_from_path(path).map_err(|source| EngineError::StructureRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(system)
}

fn run_job(
    job: &CombinationJob,
    output_dir: &Path,
    reporter: &ProgressReporter,
) -> Result<GeneratedDimer, EngineError> {
    let dimer = make_dimer(job, output_dir)?;
    reporter.report(Progress::DimerSaved {
        path: dimer.path.clone(),
    });
    Ok(dimer)
}

fn execute_sequential(
    jobs: &[CombinationJob],
    output_dir: &Path,
    reporter: &ProgressReporter,
) -> Result<Vec<GeneratedDimer>, EngineError> {
    jobs.iter()
        .map(|job| run_job(job, output_dir, reporter))
        .collect()
}

#[cfg(feature = "parallel")]
fn execute_parallel(
    jobs: &[CombinationJob],
    output_dir: &Path,
    reporter: &ProgressReporter,
) -> Result<Vec<GeneratedDimer>, EngineError> {
    jobs.par_iter()
        .map(|job| run_job(job, output_dir, reporter))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn execute_parallel(
    jobs: &[CombinationJob],
    output_dir: &Path,
    reporter: &ProgressReporter,
) -> Result<Vec<GeneratedDimer>, EngineError> {
    warn!("Parallel generation requested but the `parallel` feature is disabled; running sequentially.");
    execute_sequential(jobs, output_dir, reporter)
}

fn warn_on_name_collisions(jobs: &[CombinationJob]) {
    let mut seen: HashMap<String, &CombinationJob> = HashMap::new();
    for job in jobs {
        let (Ok(monomer), Ok(cluster)) = (
            naming::base_name(&job.monomer_path),
            naming::base_name(&job.cluster_path),
        ) else {
            continue;
        };
        let name = naming::output_file_name(&monomer, &cluster, &job.placement);
        if let Some(previous) = seen.insert(name.clone(), job) {
            warn!(
                "Output '{}' is produced by more than one job ({:?} and {:?}); the later one overwrites the earlier.",
                name, previous.placement, job.placement
            );
        }
    }
}
