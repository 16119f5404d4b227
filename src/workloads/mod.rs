use crate::benchmark::BenchmarkConfig;
use crate::cli::WorkloadKind;
use crate::group::ProcessGroup;
use crate::harness::{TimingHarness, TimingSample};
use anyhow::Result;

pub mod daxpy;
pub mod ring;
pub mod transfer;

pub use daxpy::DaxpyWorkload;
pub use ring::TokenRingWorkload;
pub use transfer::TransferWorkload;

/// An operation under test, pluggable into the timing harness
///
/// A workload owns its local preparation (random payloads, input
/// vectors) and drives the harness itself, so only the exchange it
/// exists to measure lands between the barriers. Every participant
/// calls `run` exactly once per benchmark.
pub trait Workload: Send + Sync {
    /// Short name used in logs and results
    fn name(&self) -> &'static str;

    /// Reject group shapes the operation cannot run on
    ///
    /// Called once before any participant thread spawns, so a malformed
    /// configuration fails with a clear error instead of a hang.
    fn validate(&self, participants: usize) -> Result<()>;

    /// Prepare local data, then execute the measured section under `harness`
    fn run(
        &self,
        group: &mut dyn ProcessGroup,
        harness: &TimingHarness,
    ) -> Result<Option<TimingSample>>;
}

/// Factory for creating workload instances from a benchmark configuration
pub struct WorkloadFactory;

impl WorkloadFactory {
    pub fn create(kind: WorkloadKind, config: &BenchmarkConfig) -> Result<Box<dyn Workload>> {
        match kind {
            WorkloadKind::Transfer => Ok(Box::new(TransferWorkload::new(config.payload_size))),
            WorkloadKind::TokenRing => {
                Ok(Box::new(TokenRingWorkload::new(crate::defaults::INITIAL_TOKEN)))
            }
            WorkloadKind::Daxpy => Ok(Box::new(DaxpyWorkload::new(
                crate::defaults::VECTOR_LEN,
                crate::defaults::SCALE,
            ))),
            WorkloadKind::All => Err(anyhow::anyhow!(
                "'All' workload should be expanded before workload creation"
            )),
        }
    }
}
