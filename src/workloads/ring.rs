//! Token-ring workload
//!
//! A token value travels once around the logical ring: each rank
//! receives from its predecessor, increments, and forwards to its
//! successor. The reporter seeds the ring and closes it, so the token
//! comes back incremented exactly once per participant.

use super::Workload;
use crate::defaults::MESSAGE_TAG;
use crate::group::{GroupError, ProcessGroup, ProcessGroupExt, Rank, Source};
use crate::harness::{TimingHarness, TimingSample};
use anyhow::{bail, Result};
use tracing::trace;

/// Full-ring round trip of an incrementing token
pub struct TokenRingWorkload {
    initial_token: i64,
}

impl TokenRingWorkload {
    pub fn new(initial_token: i64) -> Self {
        Self { initial_token }
    }
}

/// Pass `initial + 1` around the ring, incrementing at every hop
///
/// The reporter returns the token it receives back after the full
/// traversal, which is `initial + size`; every other rank returns
/// `None`.
pub fn pass_token(
    group: &mut dyn ProcessGroup,
    reporter: Rank,
    initial: i64,
) -> Result<Option<i64>, GroupError> {
    let size = group.size();
    let rank = group.rank();
    let successor = (rank + 1) % size;
    let predecessor = (rank + size - 1) % size;

    if rank == reporter {
        group.send_value(&(initial + 1), successor, MESSAGE_TAG)?;
        let token: i64 = group.recv_value(Source::Rank(predecessor), MESSAGE_TAG)?;
        trace!("rank {} closed the ring with token {}", rank, token);
        Ok(Some(token))
    } else {
        let token: i64 = group.recv_value(Source::Rank(predecessor), MESSAGE_TAG)?;
        trace!("rank {} received token {} from rank {}", rank, token, predecessor);
        group.send_value(&(token + 1), successor, MESSAGE_TAG)?;
        Ok(None)
    }
}

impl Workload for TokenRingWorkload {
    fn name(&self) -> &'static str {
        "ring"
    }

    fn validate(&self, participants: usize) -> Result<()> {
        // A one-rank ring would have the reporter receive from itself
        // before it ever sends.
        if participants < 2 {
            bail!(
                "the ring workload needs at least 2 participants, got {}",
                participants
            );
        }
        Ok(())
    }

    fn run(
        &self,
        group: &mut dyn ProcessGroup,
        harness: &TimingHarness,
    ) -> Result<Option<TimingSample>> {
        let reporter = harness.reporter();
        let initial = self.initial_token;
        harness.measure(group, |g| {
            pass_token(g, reporter, initial)?;
            Ok(())
        })
    }
}
