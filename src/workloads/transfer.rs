//! Point-to-point transfer workload
//!
//! The reporter ships one randomly generated payload to a designated
//! peer, which receives and discards it. Payload generation happens
//! before the opening barrier so the measured interval covers only the
//! one-hop exchange.

use super::Workload;
use crate::defaults::MESSAGE_TAG;
use crate::group::{GroupError, ProcessGroup, ProcessGroupExt, Rank, Source};
use crate::harness::{TimingHarness, TimingSample};
use anyhow::{bail, Result};
use rand::Rng;

/// One-hop transfer of a random integer payload
pub struct TransferWorkload {
    payload_len: usize,
    receiver: Rank,
}

impl TransferWorkload {
    /// Payloads are `payload_len` integers; the peer is always rank 1
    pub fn new(payload_len: usize) -> Self {
        Self {
            payload_len,
            receiver: 1,
        }
    }
}

/// Move `payload` from `sender` to `receiver` in a single hop
///
/// Returns the delivered payload on the receiving rank and `None`
/// everywhere else; ranks other than the pair take no part in the
/// exchange and never observe the bytes.
pub fn transfer_once(
    group: &mut dyn ProcessGroup,
    sender: Rank,
    receiver: Rank,
    payload: &[u32],
) -> Result<Option<Vec<u32>>, GroupError> {
    let rank = group.rank();
    if rank == sender {
        group.send_value(&payload, receiver, MESSAGE_TAG)?;
        Ok(None)
    } else if rank == receiver {
        let delivered: Vec<u32> = group.recv_value(Source::Rank(sender), MESSAGE_TAG)?;
        Ok(Some(delivered))
    } else {
        Ok(None)
    }
}

/// Draw `len` integers uniformly from `[0, len)`
fn generate_payload(len: usize) -> Vec<u32> {
    let mut rng = rand::thread_rng();
    (0..len).map(|_| rng.gen_range(0..len as u32)).collect()
}

impl Workload for TransferWorkload {
    fn name(&self) -> &'static str {
        "transfer"
    }

    fn validate(&self, participants: usize) -> Result<()> {
        if participants < 2 {
            bail!(
                "the transfer workload needs at least 2 participants, got {}",
                participants
            );
        }
        if self.payload_len == 0 {
            bail!("the transfer payload must contain at least one element");
        }
        Ok(())
    }

    fn run(
        &self,
        group: &mut dyn ProcessGroup,
        harness: &TimingHarness,
    ) -> Result<Option<TimingSample>> {
        let sender = harness.reporter();
        let payload = if group.rank() == sender {
            generate_payload(self.payload_len)
        } else {
            Vec::new()
        };

        let receiver = self.receiver;
        harness.measure(group, |g| {
            transfer_once(g, sender, receiver, &payload)?;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_needs_a_pair() {
        let workload = TransferWorkload::new(8);
        assert!(workload.validate(1).is_err());
        assert!(workload.validate(2).is_ok());
        assert!(workload.validate(5).is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_payload() {
        let workload = TransferWorkload::new(0);
        assert!(workload.validate(2).is_err());
    }

    #[test]
    fn test_generated_payload_stays_in_range() {
        let payload = generate_payload(10);
        assert_eq!(payload.len(), 10);
        assert!(payload.iter().all(|&value| value < 10));
    }
}
