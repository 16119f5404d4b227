//! Synchronized timing harness
//!
//! The one piece of machinery every workload shares: rendezvous at a
//! barrier, stamp the reporter's clock, run the operation under test on
//! every participant, rendezvous again, stamp the reporter's clock a
//! second time. The two barriers guarantee the measured interval bounds
//! the operation's completion on *every* rank, not just the reporter's,
//! because no rank can pass the closing barrier until all have finished.

use crate::group::{GroupError, ProcessGroup, Rank};
use anyhow::Result;
use std::time::{Duration, Instant};
use tracing::debug;

/// A pair of clock readings taken by the reporting participant
#[derive(Debug, Clone, Copy)]
pub struct TimingSample {
    pub start: Instant,
    pub stop: Instant,
}

impl TimingSample {
    /// Wall-clock time between the two readings
    ///
    /// `Instant` is monotonic, so this is always non-negative.
    pub fn elapsed(&self) -> Duration {
        self.stop.duration_since(self.start)
    }
}

/// Measures one operation across a group, attributing a single rank's clock
#[derive(Debug, Clone, Copy)]
pub struct TimingHarness {
    reporter: Rank,
}

impl TimingHarness {
    pub fn new(reporter: Rank) -> Self {
        Self { reporter }
    }

    /// The rank whose clock readings make up the sample
    pub fn reporter(&self) -> Rank {
        self.reporter
    }

    /// Run `operation` once on this participant and time it group-wide
    ///
    /// Every participant must call this with the same reporter rank and
    /// the same operation, or the barriers never complete. The reporter
    /// gets back `Some(sample)`; every other rank gets `None`.
    ///
    /// The operation may perform arbitrary point-to-point or collective
    /// communication through `group`. If any participant hangs inside
    /// it, this call blocks indefinitely: there is no timeout and no
    /// retry at this layer.
    pub fn measure<F>(
        &self,
        group: &mut dyn ProcessGroup,
        operation: F,
    ) -> Result<Option<TimingSample>>
    where
        F: FnOnce(&mut dyn ProcessGroup) -> Result<()>,
    {
        if self.reporter >= group.size() {
            return Err(GroupError::InvalidRank {
                rank: self.reporter,
                size: group.size(),
            }
            .into());
        }

        group.barrier();
        let start = (group.rank() == self.reporter).then(|| group.now());

        operation(group)?;

        group.barrier();
        let sample = start.map(|start| TimingSample {
            start,
            stop: group.now(),
        });

        if let Some(sample) = sample {
            debug!(
                "rank {} measured {:?} across {} participants",
                self.reporter,
                sample.elapsed(),
                group.size()
            );
        }
        Ok(sample)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::LocalProcessGroup;

    #[test]
    fn test_only_the_reporter_gets_a_sample() {
        let harness = TimingHarness::new(0);
        let samples =
            LocalProcessGroup::run(3, |group| harness.measure(group, |_| Ok(()))).unwrap();

        assert!(samples[0].is_some());
        assert!(samples[1].is_none());
        assert!(samples[2].is_none());
    }

    #[test]
    fn test_sample_is_ordered() {
        let harness = TimingHarness::new(0);
        let samples =
            LocalProcessGroup::run(2, |group| harness.measure(group, |_| Ok(()))).unwrap();

        let sample = samples[0].expect("reporter sample");
        assert!(sample.stop >= sample.start);
    }

    #[test]
    fn test_reporter_outside_group_is_rejected() {
        let harness = TimingHarness::new(5);
        let result = LocalProcessGroup::run(2, |group| harness.measure(group, |_| Ok(())));
        assert!(result.is_err());
    }

    #[test]
    fn test_interval_covers_the_slowest_participant() {
        let harness = TimingHarness::new(0);
        let samples = LocalProcessGroup::run(2, |group| {
            harness.measure(group, |g| {
                // Only the non-reporter sleeps; the closing barrier must
                // still stretch the reporter's interval past it.
                if g.rank() == 1 {
                    std::thread::sleep(Duration::from_millis(50));
                }
                Ok(())
            })
        })
        .unwrap();

        let sample = samples[0].expect("reporter sample");
        assert!(sample.elapsed() >= Duration::from_millis(50));
    }
}
