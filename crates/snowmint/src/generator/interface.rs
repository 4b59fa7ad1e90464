use core::{ops::ControlFlow, time::Duration};

use crate::{Backoff, Components, GeneratorState, Poll, Result, SnowmintId, TimeSource};

/// A minimal interface for generating [`SnowmintId`]s.
///
/// Implementations differ only in how they serialize access to their
/// [`GeneratorState`]; the generation algorithm is shared.
pub trait IdGenerator<T>: Sized
where
    T: TimeSource,
{
    /// Creates a new generator for the `(worker_id, process_id)` slot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidWorkerId`] or [`Error::InvalidProcessId`] if
    /// either value is outside `0..=31`.
    ///
    /// [`Error::InvalidWorkerId`]: crate::Error::InvalidWorkerId
    /// [`Error::InvalidProcessId`]: crate::Error::InvalidProcessId
    fn new(worker_id: impl TryInto<i128>, process_id: impl TryInto<i128>, time: T) -> Result<Self>;

    /// Attempts to generate the next available ID without waiting.
    ///
    /// The returned [`Poll`] contains either:
    /// - the newly generated ID, or
    /// - the timestamp to wait for if the current millisecond is exhausted.
    ///
    /// # Errors
    ///
    /// Returns an error if the clock moved backwards or reads outside the
    /// representable range, or if the underlying lock is poisoned.
    fn try_poll_id(&self) -> Result<Poll>;

    /// Returns a copy of the current generator state.
    ///
    /// # Errors
    ///
    /// May return an error if the underlying implementation uses a lock and it
    /// is poisoned.
    fn state(&self) -> Result<GeneratorState>;

    /// Generates the next ID, calling `sleep` to wait out an exhausted
    /// millisecond.
    ///
    /// Waiting follows the bounded [`Backoff`] schedule. `sleep` is the only
    /// suspension point, which makes the wait observable and controllable in
    /// tests. A clock that steps backwards while the call is already waiting
    /// only costs another attempt.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ClockStalled`] if the clock does not advance within the
    /// wait budget, plus everything [`IdGenerator::try_poll_id`] can return.
    ///
    /// [`Error::ClockStalled`]: crate::Error::ClockStalled
    fn next_id_with(&self, mut sleep: impl FnMut(Duration)) -> Result<SnowmintId> {
        let mut backoff = Backoff::new();
        loop {
            match backoff.step(self.try_poll_id())? {
                ControlFlow::Break(id) => break Ok(id),
                ControlFlow::Continue(dur) => sleep(dur),
            }
        }
    }

    /// Generates the next ID, blocking the current thread while an exhausted
    /// millisecond is waited out.
    ///
    /// # Errors
    ///
    /// See [`IdGenerator::next_id_with`].
    fn next_id(&self) -> Result<SnowmintId> {
        self.next_id_with(std::thread::sleep)
    }

    /// Generates the next ID in its decimal transport form.
    ///
    /// # Errors
    ///
    /// See [`IdGenerator::next_id_with`].
    fn next_id_string(&self) -> Result<String> {
        self.next_id().map(|id| id.to_string())
    }

    /// Returns the absolute creation time of a decimal-encoded ID.
    ///
    /// # Errors
    ///
    /// See [`crate::get_timestamp`].
    fn get_timestamp(id: &str) -> Result<u64> {
        crate::get_timestamp(id)
    }

    /// Splits a decimal-encoded ID into its fields.
    ///
    /// # Errors
    ///
    /// See [`crate::decompose`].
    fn decompose(id: &str) -> Result<Components> {
        crate::decompose(id)
    }
}
