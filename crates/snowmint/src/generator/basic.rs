use core::{cell::Cell, time::Duration};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{GeneratorState, IdGenerator, Poll, Result, SnowmintId, TimeSource};

/// A non-concurrent ID generator suitable for single-threaded environments.
///
/// This generator is lightweight and fast, but **not thread-safe**: its state
/// lives in a [`Cell`], so the type is `!Sync` and the compiler confines each
/// instance to one thread.
///
/// ## Features
/// - ❌ Not thread-safe
/// - ✅ No locking on the hot path
///
/// ## Recommended When
/// - The generator is owned by a single thread or task
/// - You want the fastest generator
///
/// ## See Also
/// - [`LockIdGenerator`]
///
/// [`LockIdGenerator`]: crate::LockIdGenerator
pub struct BasicIdGenerator<T>
where
    T: TimeSource,
{
    state: Cell<GeneratorState>,
    time: T,
}

impl<T> BasicIdGenerator<T>
where
    T: TimeSource,
{
    /// Creates a new [`BasicIdGenerator`] for a worker/process slot.
    ///
    /// The generator starts with no watermark and sequence zero, and uses the
    /// provided `time` to fetch the current time during ID generation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidWorkerId`] or [`Error::InvalidProcessId`] if
    /// either value is outside `0..=31`.
    ///
    /// # Example
    /// ```
    /// use snowmint::{BasicIdGenerator, SystemClock};
    ///
    /// let generator = BasicIdGenerator::new(1, 1, SystemClock).unwrap();
    /// let id = generator.next_id().unwrap();
    /// assert_eq!(id.worker_id(), 1);
    /// assert_eq!(id.process_id(), 1);
    /// ```
    ///
    /// [`Error::InvalidWorkerId`]: crate::Error::InvalidWorkerId
    /// [`Error::InvalidProcessId`]: crate::Error::InvalidProcessId
    pub fn new(worker_id: impl TryInto<i128>, process_id: impl TryInto<i128>, time: T) -> Result<Self> {
        Ok(Self::from_state(GeneratorState::new(worker_id, process_id)?, time))
    }

    /// Creates a new ID generator from explicit component values.
    ///
    /// This constructor is primarily useful for advanced use cases such as
    /// restoring state from persistent storage or controlling the starting
    /// point of the generator manually.
    ///
    /// # Errors
    ///
    /// See [`GeneratorState::from_components`].
    pub fn from_components(
        worker_id: impl TryInto<i128>,
        process_id: impl TryInto<i128>,
        last_timestamp: Option<u64>,
        sequence: u16,
        time: T,
    ) -> Result<Self> {
        let state =
            GeneratorState::from_components(worker_id, process_id, last_timestamp, sequence)?;
        Ok(Self::from_state(state, time))
    }

    /// Creates a generator resuming from a previously captured state.
    pub fn from_state(state: GeneratorState, time: T) -> Self {
        Self {
            state: Cell::new(state),
            time,
        }
    }

    /// Returns a copy of the current state.
    pub fn state(&self) -> GeneratorState {
        self.state.get()
    }

    /// Attempts to generate the next available ID without waiting.
    ///
    /// # Errors
    ///
    /// Returns an error if the clock moved backwards or reads outside the
    /// representable range. The state is left untouched in that case.
    ///
    /// # Example
    /// ```
    /// use snowmint::{BasicIdGenerator, Poll, SystemClock};
    ///
    /// let generator = BasicIdGenerator::new(0, 0, SystemClock).unwrap();
    ///
    /// let id = loop {
    ///     match generator.try_poll_id().unwrap() {
    ///         Poll::Ready { id } => break id,
    ///         Poll::Pending { .. } => std::thread::yield_now(),
    ///     }
    /// };
    /// ```
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn try_poll_id(&self) -> Result<Poll> {
        let now = self.time.current_millis();
        let (next, poll) = self.state.get().poll(now)?;
        self.state.set(next);
        Ok(poll)
    }

    /// Generates the next ID, blocking while an exhausted millisecond is
    /// waited out.
    ///
    /// # Errors
    ///
    /// See [`IdGenerator::next_id_with`].
    pub fn next_id(&self) -> Result<SnowmintId> {
        <Self as IdGenerator<T>>::next_id(self)
    }

    /// Generates the next ID, calling `sleep` to wait out an exhausted
    /// millisecond.
    ///
    /// # Errors
    ///
    /// See [`IdGenerator::next_id_with`].
    pub fn next_id_with(&self, sleep: impl FnMut(Duration)) -> Result<SnowmintId> {
        <Self as IdGenerator<T>>::next_id_with(self, sleep)
    }

    /// Generates the next ID in its decimal transport form.
    ///
    /// # Errors
    ///
    /// See [`IdGenerator::next_id_with`].
    pub fn next_id_string(&self) -> Result<String> {
        <Self as IdGenerator<T>>::next_id_string(self)
    }
}

impl<T> IdGenerator<T> for BasicIdGenerator<T>
where
    T: TimeSource,
{
    fn new(worker_id: impl TryInto<i128>, process_id: impl TryInto<i128>, time: T) -> Result<Self> {
        Self::new(worker_id, process_id, time)
    }

    fn try_poll_id(&self) -> Result<Poll> {
        self.try_poll_id()
    }

    fn state(&self) -> Result<GeneratorState> {
        Ok(self.state())
    }
}
