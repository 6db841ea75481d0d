
use log::{LevelFilter, error, info, warn};
use std::time::Instant;

use vcfconcord::cli::compare::{CompareSettings, check_compare_settings};
use vcfconcord::cli::core::{Commands, get_cli};
use vcfconcord::data_types::metrics::{compute, compute_per_chromosome};
use vcfconcord::parsing::canonicalizer::load_vcf_as_set;
use vcfconcord::parsing::interval_index::IntervalIndex;
use vcfconcord::writers::summary::{GlobalSummary, log_per_chromosome, write_per_chromosome_csv};

fn run_compare(settings: CompareSettings) {
    // start the timer
    let start_time = Instant::now();

    // set up logging before we check the other settings
    let filter_level: LevelFilter = match settings.verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace
    };
    env_logger::builder()
        .format_timestamp_millis()
        .filter_level(filter_level)
        .init();

    let settings = match check_compare_settings(settings) {
        Ok(s) => s,
        Err(e) => {
            error!("Error while verifying settings: {e:#}");
            std::process::exit(exitcode::CONFIG);
        }
    };

    // load the regions if we have them
    let regions = settings.regions.as_deref().map(|bed_fn| {
        info!("Loading regions from {bed_fn:?}...");
        match IntervalIndex::from_bed(bed_fn) {
            Ok(index) => {
                if index.is_empty() {
                    warn!("No regions found in {bed_fn:?}, all variants will be kept.");
                } else {
                    info!("Loaded {} regions on {} chromosomes.", index.num_regions(), index.chromosomes().count());
                }
                index
            },
            Err(e) => {
                error!("Error while loading regions: {e:#}");
                std::process::exit(exitcode::DATAERR);
            }
        }
    });

    // load the variant sets
    let truth = match load_vcf_as_set(&settings.truth_vcf_filename, regions.as_ref()) {
        Ok(v) => v,
        Err(e) => {
            error!("Error while loading truth variants: {e:#}");
            std::process::exit(exit_code_for(&e));
        }
    };
    info!("Loaded truth variants: {}", truth.len());

    let pred = match load_vcf_as_set(&settings.pred_vcf_filename, regions.as_ref()) {
        Ok(v) => v,
        Err(e) => {
            error!("Error while loading predicted variants: {e:#}");
            std::process::exit(exit_code_for(&e));
        }
    };
    info!("Loaded predicted variants: {}", pred.len());
    info!("Running comparison...");

    // global metrics
    let global_summary = GlobalSummary::new(
        compute(&truth, &pred), truth.len() as u64, pred.len() as u64
    );
    global_summary.log_report();

    if let Some(json_fn) = settings.output_json.as_deref() {
        info!("Saving global results to {json_fn:?}...");
        if let Err(e) = global_summary.write_json(json_fn) {
            error!("Error while saving JSON file: {e:#}");
            std::process::exit(exitcode::IOERR);
        }
    }

    if let Some(csv_fn) = settings.output_csv.as_deref() {
        info!("Saving global results to {csv_fn:?}...");
        if let Err(e) = global_summary.write_csv(csv_fn) {
            error!("Error while saving CSV file: {e:#}");
            std::process::exit(exitcode::IOERR);
        }
    }

    // per-chromosome metrics, all accumulated before anything is written
    if settings.per_chrom {
        let per_chrom_results = compute_per_chromosome(&truth, &pred);
        log_per_chromosome(&per_chrom_results);

        if let Some(csv_fn) = settings.output_perchrom_csv.as_deref() {
            info!("Saving per-chromosome results to {csv_fn:?}...");
            if let Err(e) = write_per_chromosome_csv(&per_chrom_results, csv_fn) {
                error!("Error while saving per-chromosome CSV file: {e:#}");
                std::process::exit(exitcode::IOERR);
            }
        }
    }

    info!("Comparison completed in {} seconds.", start_time.elapsed().as_secs_f64());
}

/// I/O failures are reported as IOERR, anything else in a VCF load is a parsing problem
fn exit_code_for(error: &anyhow::Error) -> exitcode::ExitCode {
    let is_io = error.chain()
        .any(|cause| {
            cause.downcast_ref::<std::io::Error>()
                .map(|io_err| io_err.kind() != std::io::ErrorKind::InvalidData)
                .unwrap_or(false)
        });
    if is_io {
        exitcode::IOERR
    } else {
        exitcode::DATAERR
    }
}

fn main() {
    let cli = get_cli();
    match cli.command {
        Commands::Compare(settings) => {
            run_compare(*settings);
        }
    }

    info!("Process finished successfully.");
}
