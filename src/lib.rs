//! # MP Benchmark Suite Library
//!
//! A message-passing latency benchmark suite implemented in Rust. The
//! library measures how long a single communication or compute step takes
//! across a group of cooperating participants, using a shared
//! barrier-bracketed timing harness.
//!
//! ## Supported Workloads
//!
//! The library ships three operations under test:
//!
//! - **Transfer**: one-hop delivery of a random integer payload from the
//!   reporter to a designated peer
//! - **Token Ring**: a token passed once around the full ring, incremented
//!   at every hop, measuring the full-ring round trip
//! - **DAXPY Reduction**: a local fused multiply-add over a vector pair on
//!   every participant, followed by an unordered many-to-one gather of the
//!   resulting scalars
//!
//! ## Architecture Overview
//!
//! The library is organized into several key modules:
//!
//! - `group`: The process-group substrate - ranks, tags, blocking
//!   send/receive with selective matching, and the in-process participant
//!   mesh used to run a group
//! - `harness`: The synchronized timing harness that brackets every
//!   measured operation with two barrier rendezvous
//! - `workloads`: The pluggable operations under test
//! - `benchmark`: The runner that validates configuration and drives a
//!   workload across a group
//! - `cli`: Command-line interface parsing and workload selection
//! - `results`: Result records, stdout measurement output, and the
//!   optional JSON results file
//! - `utils`: Formatting and validation helpers
//!
//! ## Measurement Model
//!
//! Every participant rendezvous at a barrier, the reporter (rank 0 by
//! convention) stamps its monotonic clock, every participant executes the
//! operation under test exactly once, all rendezvous at a second barrier,
//! and the reporter stamps its clock again. The interval therefore bounds
//! the operation's completion on every participant, not just the
//! reporter's. Only the reporter holds a timing sample; its elapsed
//! seconds are printed to stdout as a bare float.
//!
//! All coordination is blocking by design. A participant that never calls
//! its counterpart send, receive, or barrier hangs the run; there is no
//! timeout, retry, or recovery at this layer.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use mp_benchmark::{BenchmarkConfig, BenchmarkRunner, WorkloadKind};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = BenchmarkConfig {
//!         workload: WorkloadKind::TokenRing,
//!         participants: 4,
//!         payload_size: 1024,
//!         reporter: 0,
//!     };
//!
//!     let runner = BenchmarkRunner::new(config, WorkloadKind::TokenRing);
//!     let results = runner.run()?;
//!
//!     println!("{}", results.elapsed_secs);
//!     Ok(())
//! }
//! ```

/// Benchmark engine and configuration
///
/// Contains the `BenchmarkRunner` and `BenchmarkConfig` types that drive a
/// workload across a participant group. The runner handles:
/// - Eager configuration validation before any participant spawns
/// - Group construction and per-rank workload execution
/// - Extraction of the reporter's timing sample into a results record
pub mod benchmark;

/// Command-line interface and workload selection
///
/// Provides argument parsing using clap and the `WorkloadKind` enumeration
/// with "all" expansion, mirroring the way workloads are selected on the
/// command line.
pub mod cli;

/// Process-group substrate
///
/// The `ProcessGroup` trait is the minimal blocking interface every
/// workload and the harness depend on: rank and size queries, a barrier,
/// tagged send, selective receive with optional source wildcarding, and a
/// monotonic clock. `LocalProcessGroup` implements it with one OS thread
/// per participant connected by channels.
pub mod group;

/// Synchronized timing harness
///
/// Implements the barrier-bracketed measurement pattern shared by every
/// workload, attributing clock readings to a single reporter rank.
pub mod harness;

/// Custom log formatting
pub mod logging;

/// Result collection and output
///
/// Manages measurement output with support for:
/// - The stdout contract: one bare elapsed-seconds float per run
/// - An optional consolidated JSON results file with system metadata
pub mod results;

pub mod utils;

/// The operations under test
///
/// Each workload prepares its local data outside the measured interval
/// and drives the harness for the exchange it exists to measure.
pub mod workloads;

// Re-export key types for convenient library usage

/// Main benchmark execution engine
pub use benchmark::{BenchmarkConfig, BenchmarkRunner};

/// Command-line interface types
pub use cli::{Args, WorkloadKind};

/// Core substrate abstractions
pub use group::{LocalProcessGroup, ProcessGroup, ProcessGroupExt, Rank, Source, Tag};

/// Timing primitives
pub use harness::{TimingHarness, TimingSample};

/// Result collection and management
pub use results::{BenchmarkResults, ResultsManager};

/// The current version of the benchmark suite
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default configuration values
///
/// Defaults follow the classic forms of these benchmarks so a bare
/// invocation reproduces the canonical runs.
pub mod defaults {
    use crate::group::{Rank, Tag};

    /// Default number of participants
    ///
    /// Two is the smallest group every workload can run on and the
    /// natural shape for the point-to-point transfer.
    pub const PARTICIPANTS: usize = 2;

    /// Default transfer payload size in elements
    pub const PAYLOAD_SIZE: usize = 1024;

    /// The rank that holds the timer and reports the measurement
    pub const REPORTER_RANK: Rank = 0;

    /// Tag classifying every benchmark exchange
    pub const MESSAGE_TAG: Tag = 42;

    /// Initial token value for the ring workload
    ///
    /// ASCII 'A'; after a full traversal of an N-rank ring the reporter
    /// receives `65 + N`.
    pub const INITIAL_TOKEN: i64 = 65;

    /// Vector length for the DAXPY workload
    pub const VECTOR_LEN: usize = 1024;

    /// Scale factor `a` in the DAXPY accumulation `x[i] * a + y[i]`
    pub const SCALE: f64 = 313.37;
}
