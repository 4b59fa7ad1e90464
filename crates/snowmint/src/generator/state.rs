use core::cmp::Ordering;

use crate::{CUSTOM_EPOCH_MILLIS, Error, Poll, Result, SnowmintId};

/// The mutable state behind every generator.
///
/// Holds the fixed identity of the generator slot, the watermark of the last
/// issued timestamp and the intra-millisecond sequence. Transitions are pure:
/// [`GeneratorState::poll`] returns the successor state instead of mutating,
/// so a failed call can never leave a partially updated generator behind.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct GeneratorState {
    worker_id: u8,
    process_id: u8,
    last_timestamp: Option<u64>,
    sequence: u16,
}

impl GeneratorState {
    /// Validates the slot identity and returns a state that has never issued
    /// an ID.
    ///
    /// Any primitive integer is accepted. A `u128` above `i128::MAX` is
    /// reported as `i128::MAX` in the error.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidWorkerId`] if `worker_id` is outside `0..=31`
    /// - [`Error::InvalidProcessId`] if `process_id` is outside `0..=31`
    pub fn new(worker_id: impl TryInto<i128>, process_id: impl TryInto<i128>) -> Result<Self> {
        Self::from_components(worker_id, process_id, None, 0)
    }

    /// Builds a state from explicit component values.
    ///
    /// This is primarily useful for restoring a persisted watermark, or for
    /// controlling the starting point of the generator manually.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidWorkerId`] if `worker_id` is outside `0..=31`
    /// - [`Error::InvalidProcessId`] if `process_id` is outside `0..=31`
    /// - [`Error::InvalidSequence`] if `sequence` is above 4095
    /// - [`Error::InvalidLastTimestamp`] if `last_timestamp` is not a
    ///   representable Unix millisecond (before the epoch or past the 42-bit
    ///   range)
    pub fn from_components(
        worker_id: impl TryInto<i128>,
        process_id: impl TryInto<i128>,
        last_timestamp: Option<u64>,
        sequence: u16,
    ) -> Result<Self> {
        let worker_id = widen(worker_id);
        let worker_id = narrow(worker_id, SnowmintId::MAX_WORKER_ID)
            .ok_or(Error::InvalidWorkerId { worker_id })?;
        let process_id = widen(process_id);
        let process_id = narrow(process_id, SnowmintId::MAX_PROCESS_ID)
            .ok_or(Error::InvalidProcessId { process_id })?;
        if sequence > SnowmintId::MAX_SEQUENCE {
            return Err(Error::InvalidSequence { sequence });
        }
        if let Some(last_timestamp) = last_timestamp {
            let delta = last_timestamp.checked_sub(CUSTOM_EPOCH_MILLIS);
            if delta.is_none_or(|delta| delta > SnowmintId::MAX_TIMESTAMP) {
                return Err(Error::InvalidLastTimestamp { last_timestamp });
            }
        }
        Ok(Self {
            worker_id,
            process_id,
            last_timestamp,
            sequence,
        })
    }

    /// The worker identity encoded into every ID.
    pub const fn worker_id(&self) -> u8 {
        self.worker_id
    }

    /// The process identity encoded into every ID.
    pub const fn process_id(&self) -> u8 {
        self.process_id
    }

    /// Unix milliseconds of the last issued ID, or `None` if nothing has been
    /// issued yet.
    pub const fn last_timestamp(&self) -> Option<u64> {
        self.last_timestamp
    }

    /// Sequence of the last issued ID.
    pub const fn sequence(&self) -> u16 {
        self.sequence
    }

    /// Computes the outcome of a generation attempt at `now` (Unix ms).
    ///
    /// Returns the successor state together with the poll result. On
    /// [`Poll::Pending`] the successor equals `self`.
    ///
    /// # Errors
    ///
    /// - [`Error::ClockRegression`] if `now` is behind the watermark
    /// - [`Error::ClockBeforeEpoch`] if `now` predates the custom epoch
    /// - [`Error::TimestampOverflow`] if `now` no longer fits the layout
    pub(crate) fn poll(&self, now: u64) -> Result<(Self, Poll)> {
        let Some(last_timestamp) = self.last_timestamp else {
            return self.rollover_to(now);
        };

        match now.cmp(&last_timestamp) {
            Ordering::Equal => {
                if self.sequence < SnowmintId::MAX_SEQUENCE {
                    let next = Self {
                        sequence: self.sequence + 1,
                        ..*self
                    };
                    Ok((next, Poll::Ready { id: next.compose(now)? }))
                } else {
                    Ok((
                        *self,
                        Poll::Pending {
                            yield_until: last_timestamp + 1,
                        },
                    ))
                }
            }
            Ordering::Greater => self.rollover_to(now),
            Ordering::Less => Err(Self::cold_clock_behind(now, last_timestamp)),
        }
    }

    fn rollover_to(&self, now: u64) -> Result<(Self, Poll)> {
        let next = Self {
            last_timestamp: Some(now),
            sequence: 0,
            ..*self
        };
        Ok((next, Poll::Ready { id: next.compose(now)? }))
    }

    fn compose(&self, now: u64) -> Result<SnowmintId> {
        let Some(delta) = now.checked_sub(CUSTOM_EPOCH_MILLIS) else {
            #[cfg(feature = "tracing")]
            tracing::warn!(now, "clock reads before the custom epoch");
            return Err(Error::ClockBeforeEpoch { now });
        };
        if delta > SnowmintId::MAX_TIMESTAMP {
            return Err(Error::TimestampOverflow { now });
        }
        Ok(SnowmintId::from(
            delta,
            self.worker_id,
            self.process_id,
            self.sequence,
        ))
    }

    #[cold]
    #[inline(never)]
    fn cold_clock_behind(now: u64, last_timestamp: u64) -> Error {
        #[cfg(feature = "tracing")]
        tracing::warn!(now, last_timestamp, "clock moved backwards");
        Error::ClockRegression {
            now,
            last_timestamp,
        }
    }
}

fn widen(value: impl TryInto<i128>) -> i128 {
    value.try_into().unwrap_or(i128::MAX)
}

fn narrow(value: i128, max: u8) -> Option<u8> {
    u8::try_from(value).ok().filter(|v| *v <= max)
}
