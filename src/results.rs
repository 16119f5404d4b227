use crate::benchmark::BenchmarkConfig;
use crate::cli::WorkloadKind;
use crate::harness::TimingSample;
use crate::utils::format_duration;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Complete results for a single workload run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkResults {
    pub workload: WorkloadKind,
    pub test_config: TestConfiguration,
    pub elapsed: Duration,
    pub elapsed_secs: f64,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub system_info: SystemInfo,
}

impl BenchmarkResults {
    pub fn new(config: &BenchmarkConfig, sample: TimingSample) -> Self {
        let elapsed = sample.elapsed();
        Self {
            workload: config.workload,
            test_config: TestConfiguration {
                participants: config.participants,
                payload_size: config.payload_size,
                reporter: config.reporter,
            },
            elapsed,
            elapsed_secs: elapsed.as_secs_f64(),
            timestamp: chrono::Utc::now(),
            system_info: SystemInfo::collect(),
        }
    }
}

/// Test configuration used for the run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestConfiguration {
    pub participants: usize,
    pub payload_size: usize,
    pub reporter: usize,
}

/// System information for reproducibility
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemInfo {
    pub os: String,
    pub architecture: String,
    pub cpu_cores: usize,
    pub benchmark_version: String,
}

impl SystemInfo {
    pub fn collect() -> Self {
        Self {
            os: std::env::consts::OS.to_string(),
            architecture: std::env::consts::ARCH.to_string(),
            cpu_cores: num_cpus::get(),
            benchmark_version: crate::VERSION.to_string(),
        }
    }
}

/// Consolidated output written to the results file
#[derive(Debug, Clone, Serialize, Deserialize)]
struct FinalBenchmarkResults {
    metadata: BenchmarkMetadata,
    results: Vec<BenchmarkResults>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct BenchmarkMetadata {
    version: String,
    timestamp: chrono::DateTime<chrono::Utc>,
    total_runs: usize,
    system_info: SystemInfo,
}

/// Results manager for handling measurement output
///
/// Two output channels: the reporter's elapsed seconds always go to
/// stdout as one bare float per run (logs stay on stderr so the stream
/// remains machine-readable), and an optional JSON file collects the
/// full records for later analysis.
pub struct ResultsManager {
    output_file: Option<PathBuf>,
    results: Vec<BenchmarkResults>,
}

impl ResultsManager {
    /// Create a new results manager; `output_file` enables the JSON record
    pub fn new(output_file: Option<&Path>) -> Self {
        Self {
            output_file: output_file.map(Path::to_path_buf),
            results: Vec::new(),
        }
    }

    /// Record one run and emit its measurement on stdout
    pub fn add_results(&mut self, results: BenchmarkResults) {
        info!(
            "{} across {} participants took {}",
            results.workload,
            results.test_config.participants,
            format_duration(results.elapsed)
        );
        println!("{}", results.elapsed_secs);
        self.results.push(results);
    }

    /// Number of recorded runs so far
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Write the consolidated JSON record, if a file was requested
    pub fn finalize(&self) -> Result<()> {
        let output_file = match &self.output_file {
            Some(path) => path,
            None => {
                debug!("No output file configured; skipping JSON results");
                return Ok(());
            }
        };

        let final_results = FinalBenchmarkResults {
            metadata: BenchmarkMetadata {
                version: crate::VERSION.to_string(),
                timestamp: chrono::Utc::now(),
                total_runs: self.results.len(),
                system_info: SystemInfo::collect(),
            },
            results: self.results.clone(),
        };

        let json = serde_json::to_string_pretty(&final_results)?;
        std::fs::write(output_file, json)?;

        info!("Results written to: {:?}", output_file);
        Ok(())
    }
}
