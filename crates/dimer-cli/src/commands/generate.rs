use crate::cli::GenerateArgs;
use crate::config::PartialGenerationConfig;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use dimergen::{engine::progress::ProgressReporter, workflows};
use tracing::{debug, info, warn};

pub fn run(args: GenerateArgs) -> Result<()> {
    let partial_config = PartialGenerationConfig::load(args.config.as_deref())?;
    info!("Merging configuration from file and CLI arguments...");
    let final_config = partial_config.merge_with_cli(&args)?;
    debug!("Final generation config: {:?}", final_config);

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!("Invoking the dimer generation workflow...");
    let report = workflows::generate::run(&final_config, &reporter)?;

    if report.dimers.is_empty() {
        warn!(
            "No dimers generated ({} monomer(s), {} cluster(s)).",
            report.monomer_count, report.cluster_count
        );
        println!(
            "Warning: no dimers generated. Found {} monomer(s) in {} and {} cluster(s) in {}.",
            report.monomer_count,
            final_config.molecules_dir.display(),
            report.cluster_count,
            final_config.clusters_dir.display()
        );
    } else {
        println!(
            "Generated {} dimer(s) from {} monomer(s) and {} cluster(s) in {}.",
            report.dimers.len(),
            report.monomer_count,
            report.cluster_count,
            final_config.output_dir.display()
        );
    }

    Ok(())
}
