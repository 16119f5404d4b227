//! Utility functions shared across the benchmark suite
//!
//! Formatting helpers for human-readable log output, timestamping, and
//! the eager parameter validation that keeps malformed configurations
//! from ever reaching a participant group.

use anyhow::{bail, Result};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Largest accepted transfer payload, in elements
///
/// Each element is four bytes, so this caps a single payload at 4 GiB
/// before the buffered channel would have to absorb it.
pub const MAX_PAYLOAD_SIZE: usize = 1 << 30;

/// Largest accepted participant count
///
/// Every participant is an OS thread; anything past this is a typo,
/// not a benchmark.
pub const MAX_PARTICIPANTS: usize = 4096;

/// Get current timestamp as nanoseconds since Unix epoch
///
/// Falls back to 0 if the system clock is before the epoch rather than
/// panicking.
pub fn current_timestamp_ns() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos() as u64
}

/// Format a duration in a human-readable way
///
/// Picks the unit by magnitude: nanoseconds, microseconds,
/// milliseconds, then seconds.
pub fn format_duration(duration: Duration) -> String {
    let nanos = duration.as_nanos();
    if nanos < 1_000 {
        format!("{}ns", nanos)
    } else if nanos < 1_000_000 {
        format!("{:.2}μs", nanos as f64 / 1_000.0)
    } else if nanos < 1_000_000_000 {
        format!("{:.2}ms", nanos as f64 / 1_000_000.0)
    } else {
        format!("{:.2}s", duration.as_secs_f64())
    }
}

/// Validate a participant count before any thread spawns
pub fn validate_participants(participants: usize) -> Result<()> {
    if participants == 0 {
        bail!("participant count must be at least 1");
    }
    if participants > MAX_PARTICIPANTS {
        bail!(
            "participant count {} exceeds the maximum of {}",
            participants,
            MAX_PARTICIPANTS
        );
    }
    Ok(())
}

/// Validate a transfer payload size before any thread spawns
pub fn validate_payload_size(payload_size: usize) -> Result<()> {
    if payload_size == 0 {
        bail!("payload size must be at least 1 element");
    }
    if payload_size > MAX_PAYLOAD_SIZE {
        bail!(
            "payload size {} exceeds the maximum of {} elements",
            payload_size,
            MAX_PAYLOAD_SIZE
        );
    }
    Ok(())
}
