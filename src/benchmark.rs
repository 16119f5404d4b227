//! Benchmark engine
//!
//! Orchestrates one benchmark run: validate the configuration eagerly,
//! build the workload, spin up a local process group, execute the
//! workload under the timing harness on every participant, and package
//! the reporter's sample into a results record.
//!
//! Validation happens before any participant thread spawns. A group
//! shape the workload cannot run on (a one-rank ring, an empty payload)
//! must fail with a configuration error up front, because once the
//! participants are running the only failure mode left for a missing
//! counterpart is a hang.

use crate::{
    cli::{Args, WorkloadKind},
    group::{LocalProcessGroup, Rank},
    harness::{TimingHarness, TimingSample},
    results::BenchmarkResults,
    utils::{validate_participants, validate_payload_size},
    workloads::WorkloadFactory,
};
use anyhow::{anyhow, Context, Result};
use std::time::Instant;
use tracing::{debug, info};

/// Configuration for benchmark execution
#[derive(Clone, Debug)]
pub struct BenchmarkConfig {
    /// The workload being measured
    pub workload: WorkloadKind,

    /// Number of cooperating participants; fixed for the whole run
    pub participants: usize,

    /// Element count for the transfer workload's random payload
    pub payload_size: usize,

    /// The rank whose clock readings are reported
    pub reporter: Rank,
}

impl BenchmarkConfig {
    /// Build a validated configuration from parsed CLI arguments
    pub fn from_args(args: &Args) -> Result<Self> {
        validate_participants(args.participants)?;
        validate_payload_size(args.payload_size)?;

        Ok(Self {
            workload: args.workloads.first().copied().unwrap_or_default(),
            participants: args.participants,
            payload_size: args.payload_size,
            reporter: crate::defaults::REPORTER_RANK,
        })
    }
}

/// Executes a single workload across a local participant group
pub struct BenchmarkRunner {
    config: BenchmarkConfig,
}

impl BenchmarkRunner {
    /// Create a runner for `workload` with the given base configuration
    pub fn new(mut config: BenchmarkConfig, workload: WorkloadKind) -> Self {
        config.workload = workload;
        Self { config }
    }

    /// Run the workload once and return the reporter's measurement
    pub fn run(&self) -> Result<BenchmarkResults> {
        let workload = WorkloadFactory::create(self.config.workload, &self.config)?;
        workload
            .validate(self.config.participants)
            .with_context(|| format!("invalid configuration for the {} workload", workload.name()))?;

        info!(
            "Running {} across {} participants (reporter: rank {})",
            workload.name(),
            self.config.participants,
            self.config.reporter
        );

        let harness = TimingHarness::new(self.config.reporter);
        let run_started = Instant::now();

        let samples = LocalProcessGroup::run(self.config.participants, |endpoint| {
            workload.run(endpoint, &harness)
        })?;

        let sample = self.reporter_sample(samples)?;
        debug!(
            "{} run finished in {:?} wall-clock total",
            workload.name(),
            run_started.elapsed()
        );

        Ok(BenchmarkResults::new(&self.config, sample))
    }

    /// Extract the single sample the reporter produced
    ///
    /// Exactly one participant reports; anything else means the harness
    /// contract was broken.
    fn reporter_sample(&self, samples: Vec<Option<TimingSample>>) -> Result<TimingSample> {
        let mut reported = samples.into_iter().flatten();
        let sample = reported
            .next()
            .ok_or_else(|| anyhow!("no participant produced a timing sample"))?;
        if reported.next().is_some() {
            return Err(anyhow!("more than one participant produced a timing sample"));
        }
        Ok(sample)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(workload: WorkloadKind, participants: usize) -> BenchmarkConfig {
        BenchmarkConfig {
            workload,
            participants,
            payload_size: 32,
            reporter: 0,
        }
    }

    #[test]
    fn test_transfer_run_produces_a_sample() {
        let runner = BenchmarkRunner::new(config(WorkloadKind::Transfer, 2), WorkloadKind::Transfer);
        let results = runner.run().unwrap();
        assert!(results.elapsed_secs >= 0.0);
        assert_eq!(results.test_config.participants, 2);
    }

    #[test]
    fn test_ring_with_one_participant_fails_before_spawning() {
        let runner = BenchmarkRunner::new(config(WorkloadKind::TokenRing, 1), WorkloadKind::TokenRing);
        let error = runner.run().unwrap_err();
        assert!(error.to_string().contains("invalid configuration"));
    }

    #[test]
    fn test_daxpy_runs_with_a_single_participant() {
        let runner = BenchmarkRunner::new(config(WorkloadKind::Daxpy, 1), WorkloadKind::Daxpy);
        let results = runner.run().unwrap();
        assert!(results.elapsed_secs >= 0.0);
    }

    #[test]
    fn test_from_args_rejects_zero_participants() {
        let args = Args {
            participants: 0,
            payload_size: 8,
            ..Default::default()
        };
        assert!(BenchmarkConfig::from_args(&args).is_err());
    }
}
