use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// MP Benchmark Suite - measures message-passing latency across a participant group
#[derive(Parser, Debug, Clone, Default)]
#[clap(version, about, long_about = None)]
pub struct Args {
    /// Workloads to benchmark (space-separated: transfer, ring, daxpy, or all)
    #[clap(short = 'w', value_enum, default_values_t = vec![WorkloadKind::Transfer], help_heading = "Core Options", num_args = 1..)]
    pub workloads: Vec<WorkloadKind>,

    /// Number of cooperating participants in the group
    #[clap(short = 'n', long, default_value_t = crate::defaults::PARTICIPANTS)]
    pub participants: usize,

    /// Random payload size in elements for the transfer workload
    #[clap(short = 's', long, default_value_t = crate::defaults::PAYLOAD_SIZE)]
    pub payload_size: usize,

    /// Output file for results (JSON format); elapsed seconds always go to stdout
    #[clap(short = 'o', long)]
    pub output_file: Option<PathBuf>,

    /// Continue running other workloads even if one fails
    #[clap(long, default_value_t = false)]
    pub continue_on_error: bool,

    /// Verbose output
    #[clap(short = 'v', long, default_value_t = false)]
    pub verbose: bool,
}

/// Available workloads for benchmarking
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum WorkloadKind {
    /// One-hop transfer of a random payload
    #[clap(name = "transfer")]
    Transfer,

    /// Token passed once around the full ring
    #[clap(name = "ring")]
    TokenRing,

    /// Vector multiply-add reduction with an unordered gather
    #[clap(name = "daxpy")]
    Daxpy,

    /// All available workloads
    #[clap(name = "all")]
    All,
}

impl Default for WorkloadKind {
    fn default() -> Self {
        WorkloadKind::Transfer
    }
}

impl std::fmt::Display for WorkloadKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkloadKind::Transfer => write!(f, "Transfer"),
            WorkloadKind::TokenRing => write!(f, "Token Ring"),
            WorkloadKind::Daxpy => write!(f, "DAXPY Reduction"),
            WorkloadKind::All => write!(f, "All Workloads"),
        }
    }
}

impl WorkloadKind {
    /// Expand the "All" variant to all available workloads
    pub fn expand_all(workloads: Vec<WorkloadKind>) -> Vec<WorkloadKind> {
        if workloads.contains(&WorkloadKind::All) {
            vec![
                WorkloadKind::Transfer,
                WorkloadKind::TokenRing,
                WorkloadKind::Daxpy,
            ]
        } else {
            workloads
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workload_kind_display() {
        assert_eq!(WorkloadKind::Transfer.to_string(), "Transfer");
        assert_eq!(WorkloadKind::TokenRing.to_string(), "Token Ring");
        assert_eq!(WorkloadKind::Daxpy.to_string(), "DAXPY Reduction");
        assert_eq!(WorkloadKind::All.to_string(), "All Workloads");
    }

    #[test]
    fn test_workload_kind_expand_all() {
        let all_workloads = vec![
            WorkloadKind::Transfer,
            WorkloadKind::TokenRing,
            WorkloadKind::Daxpy,
        ];
        assert_eq!(
            WorkloadKind::expand_all(vec![WorkloadKind::All]),
            all_workloads
        );
        assert_eq!(
            WorkloadKind::expand_all(vec![WorkloadKind::TokenRing]),
            vec![WorkloadKind::TokenRing]
        );
        assert_eq!(
            WorkloadKind::expand_all(vec![WorkloadKind::Daxpy, WorkloadKind::All]),
            all_workloads
        );
    }

    #[test]
    fn test_args_parse_defaults() {
        let args = Args::parse_from(["mp-benchmark"]);
        assert_eq!(args.workloads, vec![WorkloadKind::Transfer]);
        assert_eq!(args.participants, crate::defaults::PARTICIPANTS);
        assert_eq!(args.payload_size, crate::defaults::PAYLOAD_SIZE);
        assert!(args.output_file.is_none());
        assert!(!args.continue_on_error);
    }

    #[test]
    fn test_args_parse_workload_names() {
        let args = Args::parse_from(["mp-benchmark", "-w", "ring", "daxpy", "-n", "4"]);
        assert_eq!(
            args.workloads,
            vec![WorkloadKind::TokenRing, WorkloadKind::Daxpy]
        );
        assert_eq!(args.participants, 4);
    }
}
