//! # MP Benchmark Suite - Main Entry Point
//!
//! The binary orchestrates one or more message-passing benchmark runs:
//!
//! 1. **Initialize logging**: structured logging with tracing, routed to
//!    stderr so stdout carries only measurements
//! 2. **Parse arguments**: workload selection, group size, payload size
//! 3. **Create benchmark config**: CLI arguments become the validated
//!    internal configuration
//! 4. **Run benchmarks**: each selected workload executes across a fresh
//!    participant group under the timing harness
//! 5. **Emit results**: the reporter's elapsed seconds per run on stdout,
//!    plus an optional consolidated JSON file
//!
//! ## Error Handling
//!
//! The application uses `anyhow::Result` throughout. Malformed
//! configurations fail eagerly before any participant spawns. Depending
//! on the `--continue-on-error` flag, a failing workload either aborts
//! the run or lets the remaining workloads proceed.

use anyhow::Result;
use clap::Parser;
use mp_benchmark::{
    benchmark::{BenchmarkConfig, BenchmarkRunner},
    cli::{Args, WorkloadKind},
    logging::init_logging,
    results::ResultsManager,
};
use tracing::{error, info};

fn main() -> Result<()> {
    // The log level can be controlled via the RUST_LOG environment
    // variable, e.g. RUST_LOG=debug mp-benchmark -w ring
    let args = Args::parse();
    init_logging(args.verbose);

    info!("Starting MP Benchmark Suite");
    info!("Configuration: {:?}", args);

    let config = BenchmarkConfig::from_args(&args)?;
    let mut results_manager = ResultsManager::new(args.output_file.as_deref());

    // Handles the 'all' expansion
    let workloads = WorkloadKind::expand_all(args.workloads.clone());

    for workload in &workloads {
        info!("Running benchmark for workload: {:?}", workload);

        match run_benchmark_for_workload(&config, *workload, &mut results_manager) {
            Ok(()) => info!("Benchmark completed successfully for {:?}", workload),
            Err(e) => {
                error!("Benchmark failed for {:?}: {}", workload, e);
                if !args.continue_on_error {
                    return Err(e);
                }
            }
        }
    }

    results_manager.finalize()?;

    info!("MP Benchmark Suite completed successfully");
    Ok(())
}

/// Run a single workload and record its measurement
fn run_benchmark_for_workload(
    config: &BenchmarkConfig,
    workload: WorkloadKind,
    results_manager: &mut ResultsManager,
) -> Result<()> {
    let runner = BenchmarkRunner::new(config.clone(), workload);
    let results = runner.run()?;
    results_manager.add_results(results);
    Ok(())
}
