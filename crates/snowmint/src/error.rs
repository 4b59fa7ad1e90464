/// A result type defaulting to the crate [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All error variants that `snowmint` can emit.
///
/// Every error is local to the call that produced it: a failing call never
/// mutates generator state, and nothing is retried on the caller's behalf.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The worker ID passed at construction is outside `0..=31`.
    #[error("worker ID must be between 0 and {max}, got {worker_id}", max = crate::SnowmintId::MAX_WORKER_ID)]
    InvalidWorkerId {
        /// The rejected value.
        worker_id: i128,
    },

    /// The process ID passed at construction is outside `0..=31`.
    #[error("process ID must be between 0 and {max}, got {process_id}", max = crate::SnowmintId::MAX_PROCESS_ID)]
    InvalidProcessId {
        /// The rejected value.
        process_id: i128,
    },

    /// A restored sequence value does not fit in 12 bits.
    #[error("sequence must be between 0 and {max}, got {sequence}", max = crate::SnowmintId::MAX_SEQUENCE)]
    InvalidSequence {
        /// The rejected value.
        sequence: u16,
    },

    /// A restored watermark lies outside the timestamps the layout can encode.
    #[error("last timestamp {last_timestamp} ms is outside the representable range")]
    InvalidLastTimestamp {
        /// The rejected value, in Unix milliseconds.
        last_timestamp: u64,
    },

    /// The clock reads earlier than the last issued timestamp.
    ///
    /// The generator refuses to emit an ID since doing so could produce a
    /// duplicate or a non-monotonic value. The caller decides whether to
    /// retry, alert, or fall back.
    #[error("clock moved backwards: now {now} ms, last issued {last_timestamp} ms")]
    ClockRegression {
        /// The offending clock reading, in Unix milliseconds.
        now: u64,
        /// The watermark the reading fell behind, in Unix milliseconds.
        last_timestamp: u64,
    },

    /// The sequence for the current millisecond is exhausted and the clock
    /// did not advance within the bounded wait.
    #[error("clock stalled at {last_timestamp} ms after {attempts} wait attempts")]
    ClockStalled {
        /// The millisecond whose sequence space is exhausted.
        last_timestamp: u64,
        /// Number of wait attempts made before giving up.
        attempts: u32,
    },

    /// The clock reads earlier than [`CUSTOM_EPOCH`].
    ///
    /// [`CUSTOM_EPOCH`]: crate::CUSTOM_EPOCH
    #[error("clock reads {now} ms, before the epoch at {epoch} ms", epoch = crate::CUSTOM_EPOCH_MILLIS)]
    ClockBeforeEpoch {
        /// The offending clock reading, in Unix milliseconds.
        now: u64,
    },

    /// The elapsed time since the epoch no longer fits in the 42-bit
    /// timestamp field.
    #[error("clock reads {now} ms, past the last representable timestamp")]
    TimestampOverflow {
        /// The offending clock reading, in Unix milliseconds.
        now: u64,
    },

    /// An identifier string is not a non-negative 64-bit decimal integer.
    #[error("malformed ID {input:?}")]
    MalformedId {
        /// The rejected input.
        input: String,
    },

    /// The operation failed because the lock was **poisoned**.
    ///
    /// This occurs when a thread panics while holding the lock. When the
    /// `parking-lot` feature is enabled, mutexes do **not** poison, so this
    /// variant is never produced.
    #[error("generator lock poisoned")]
    LockPoisoned,
}

#[cfg(not(feature = "parking-lot"))]
use crate::generator::{MutexGuard, PoisonError};
#[cfg(not(feature = "parking-lot"))]
impl<T> From<PoisonError<MutexGuard<'_, T>>> for Error {
    fn from(_: PoisonError<MutexGuard<'_, T>>) -> Self {
        Self::LockPoisoned
    }
}
