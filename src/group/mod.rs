use serde::{de::DeserializeOwned, Serialize};
use std::time::Instant;
use thiserror::Error;

pub mod local;

pub use local::{LocalEndpoint, LocalProcessGroup};

/// Zero-based participant identity within a fixed-size group
pub type Rank = usize;

/// Integer classifier used to match a send with its receive
pub type Tag = u64;

/// Source selector for a receive operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// Match only messages sent by the given rank
    Rank(Rank),
    /// Match a message from any sender; arrival order across senders
    /// is unspecified and may differ between runs
    Any,
}

impl Source {
    /// Whether a message from `sender` satisfies this selector
    pub fn matches(&self, sender: Rank) -> bool {
        match self {
            Source::Rank(rank) => *rank == sender,
            Source::Any => true,
        }
    }
}

/// A message in transit between two participants
///
/// The payload is opaque bytes; typed values go through the bincode
/// helpers on [`ProcessGroupExt`].
#[derive(Debug, Clone)]
pub struct Envelope {
    pub source: Rank,
    pub tag: Tag,
    pub payload: Vec<u8>,
}

/// Errors surfaced by the process-group substrate
///
/// These are fatal for the run. The substrate performs no retry: a
/// transport-level fault terminates the benchmark, and a missing
/// counterpart call is a hang rather than an error (see the crate docs).
#[derive(Debug, Error)]
pub enum GroupError {
    #[error("rank {rank} is out of range for a group of {size} participants")]
    InvalidRank { rank: Rank, size: usize },

    #[error("peer {rank} disconnected before the exchange completed")]
    Disconnected { rank: Rank },

    #[error("all peers disconnected while a receive was pending")]
    ChannelClosed,

    #[error("payload codec error: {0}")]
    Codec(#[from] bincode::Error),
}

/// Minimal blocking interface a participant holds onto its group
///
/// This is the explicit handle that replaces ambient global group state:
/// the harness and every workload receive it as an argument, so a mock
/// or purpose-built group can stand in during tests. All operations are
/// blocking; there is no asynchronous variant, no cancellation, and no
/// timeout.
pub trait ProcessGroup: Send {
    /// This participant's zero-based rank
    fn rank(&self) -> Rank;

    /// Total number of participants in the group
    fn size(&self) -> usize;

    /// Block until every participant in the group has arrived
    fn barrier(&mut self);

    /// Deliver `payload` to `dest`, classified by `tag`
    ///
    /// Sends are buffered: the call completes once the payload is queued
    /// for the destination, without waiting for the matching receive.
    fn send(&mut self, payload: &[u8], dest: Rank, tag: Tag) -> Result<(), GroupError>;

    /// Block until a message matching `(source, tag)` arrives
    ///
    /// Messages that arrive but do not match are held back for later
    /// receives, so two in-flight exchanges with distinct tags cannot
    /// steal each other's payloads.
    fn recv(&mut self, source: Source, tag: Tag) -> Result<Envelope, GroupError>;

    /// Monotonic clock reading used for timing samples
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Typed-payload helpers layered over the byte-oriented [`ProcessGroup`]
///
/// Values are serialized with bincode, mirroring the wire format used
/// for every exchange in this crate. Implemented for all groups,
/// including `dyn ProcessGroup` behind a reference.
pub trait ProcessGroupExt: ProcessGroup {
    /// Serialize `value` and send it to `dest`
    fn send_value<T: Serialize>(&mut self, value: &T, dest: Rank, tag: Tag) -> Result<(), GroupError> {
        let bytes = bincode::serialize(value)?;
        self.send(&bytes, dest, tag)
    }

    /// Receive a message matching `(source, tag)` and deserialize its payload
    fn recv_value<T: DeserializeOwned>(&mut self, source: Source, tag: Tag) -> Result<T, GroupError> {
        let envelope = self.recv(source, tag)?;
        Ok(bincode::deserialize(&envelope.payload)?)
    }
}

impl<G: ProcessGroup + ?Sized> ProcessGroupExt for G {}
