use crate::cli::CombineArgs;
use crate::error::{CliError, Result};
use dimergen::engine::config::Placement;
use dimergen::workflows::generate::{self, CombinationJob};
use tracing::info;

pub fn run(args: CombineArgs) -> Result<()> {
    let defaults = Placement::default();
    let placement = Placement::new(
        args.distance.unwrap_or(defaults.distance),
        args.angle.unwrap_or(defaults.angle),
        args.axis.unwrap_or(defaults.axis),
    );
    placement.validate().map_err(CliError::Argument)?;

    std::fs::create_dir_all(&args.output_dir)?;

    let job = CombinationJob {
        monomer_path: args.monomer,
        cluster_path: args.cluster,
        placement,
    };
    info!(
        "Combining {:?} with {:?} using {:?}.",
        job.monomer_path, job.cluster_path, placement
    );
    let dimer = generate::make_dimer(&job, &args.output_dir)?;

    println!("Saved: {}", dimer.file_name);
    Ok(())
}
