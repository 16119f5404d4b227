//! DAXPY reduction workload
//!
//! Every participant reduces a fixed-size vector pair with a fused
//! multiply-add, then the scalars funnel into the reporter through an
//! any-source gather. The measured interval covers the local compute
//! overlapped with the unordered many-to-one collection; the input
//! vectors are drawn before the opening barrier.

use super::Workload;
use crate::defaults::MESSAGE_TAG;
use crate::group::{GroupError, ProcessGroup, ProcessGroupExt, Rank, Source};
use crate::harness::{TimingHarness, TimingSample};
use anyhow::Result;
use rand::Rng;

/// Local multiply-add reduction with an unordered gather at the reporter
pub struct DaxpyWorkload {
    vector_len: usize,
    scale: f64,
}

impl DaxpyWorkload {
    pub fn new(vector_len: usize, scale: f64) -> Self {
        Self { vector_len, scale }
    }
}

/// Reduce a vector pair to `Σ (x[i] * scale + y[i])`
pub fn fused_multiply_add(x: &[f64], y: &[f64], scale: f64) -> f64 {
    x.iter()
        .zip(y.iter())
        .map(|(x, y)| x * scale + y)
        .sum()
}

/// Collect one scalar from every non-reporter rank at the reporter
///
/// The reporter receives `size - 1` values with a wildcarded source, so
/// only the multiset of delivered scalars is defined; arrival order may
/// differ between runs. Returns the collected values on the reporter
/// and `None` elsewhere.
pub fn gather_at(
    group: &mut dyn ProcessGroup,
    reporter: Rank,
    value: f64,
) -> Result<Option<Vec<f64>>, GroupError> {
    if group.rank() == reporter {
        let mut collected = Vec::with_capacity(group.size() - 1);
        for _ in 0..group.size() - 1 {
            collected.push(group.recv_value::<f64>(Source::Any, MESSAGE_TAG)?);
        }
        Ok(Some(collected))
    } else {
        group.send_value(&value, reporter, MESSAGE_TAG)?;
        Ok(None)
    }
}

/// Draw a vector of `len` samples uniform in `[0, 4096)`
fn generate_vector(len: usize) -> Vec<f64> {
    let mut rng = rand::thread_rng();
    (0..len).map(|_| rng.gen_range(0.0..4096.0)).collect()
}

impl Workload for DaxpyWorkload {
    fn name(&self) -> &'static str {
        "daxpy"
    }

    fn validate(&self, participants: usize) -> Result<()> {
        if participants == 0 {
            anyhow::bail!("the daxpy workload needs at least 1 participant");
        }
        Ok(())
    }

    fn run(
        &self,
        group: &mut dyn ProcessGroup,
        harness: &TimingHarness,
    ) -> Result<Option<TimingSample>> {
        let x = generate_vector(self.vector_len);
        let y = generate_vector(self.vector_len);
        let scale = self.scale;
        let reporter = harness.reporter();

        harness.measure(group, |g| {
            let value = fused_multiply_add(&x, &y, scale);
            // The reporter discards the gathered scalars; delivery is
            // what the benchmark measures.
            gather_at(g, reporter, value)?;
            Ok(())
        })
    }
}
