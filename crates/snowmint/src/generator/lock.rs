use core::time::Duration;
use std::sync::Arc;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{GeneratorState, IdGenerator, Mutex, Poll, Result, SnowmintId, TimeSource};

/// A lock-based ID generator suitable for multi-threaded environments.
///
/// This generator wraps its state in an [`Arc<Mutex<_>>`], allowing safe
/// shared use across threads. Clones share the same state, so cloning is the
/// way to hand one logical generator to several threads.
///
/// The lock is held only while the state transition is computed, never while
/// an exhausted millisecond is waited out.
///
/// ## Features
/// - ✅ Thread-safe
/// - ✅ Clones share one sequence space
///
/// ## Recommended When
/// - You're in a multi-threaded environment
/// - Fair access across threads is important
///
/// ## See Also
/// - [`BasicIdGenerator`]
///
/// [`BasicIdGenerator`]: crate::BasicIdGenerator
pub struct LockIdGenerator<T>
where
    T: TimeSource,
{
    #[cfg(feature = "cache-padded")]
    pub(crate) state: Arc<crossbeam_utils::CachePadded<Mutex<GeneratorState>>>,
    #[cfg(not(feature = "cache-padded"))]
    pub(crate) state: Arc<Mutex<GeneratorState>>,
    pub(crate) time: T,
}

impl<T> Clone for LockIdGenerator<T>
where
    T: TimeSource + Clone,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            time: self.time.clone(),
        }
    }
}

impl<T> LockIdGenerator<T>
where
    T: TimeSource,
{
    /// Creates a new [`LockIdGenerator`] for a worker/process slot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidWorkerId`] or [`Error::InvalidProcessId`] if
    /// either value is outside `0..=31`.
    ///
    /// # Example
    /// ```
    /// use snowmint::{LockIdGenerator, MonotonicClock};
    ///
    /// let generator = LockIdGenerator::new(3, 7, MonotonicClock::default()).unwrap();
    ///
    /// let handle = {
    ///     let generator = generator.clone();
    ///     std::thread::spawn(move || generator.next_id().unwrap())
    /// };
    /// let local = generator.next_id().unwrap();
    /// let remote = handle.join().unwrap();
    /// assert_ne!(local, remote);
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
            #[cfg(feature = "cache-padded")]
            state: Arc::new(crossbeam_utils::CachePadded::new(Mutex::new(state))),
            #[cfg(not(feature = "cache-padded"))]
            state: Arc::new(Mutex::new(state)),
            time,
        }
    }

    /// Returns a copy of the current state.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockPoisoned`] if another thread panicked while holding
    /// the lock (std mutex only).
    ///
    /// [`Error::LockPoisoned`]: crate::Error::LockPoisoned
    pub fn state(&self) -> Result<GeneratorState> {
        #[cfg(feature = "parking-lot")]
        let state = self.state.lock();
        #[cfg(not(feature = "parking-lot"))]
        let state = self.state.lock()?;
        Ok(*state)
    }

    /// Attempts to generate the next available ID without waiting.
    ///
    /// The clock is read while the lock is held, so the watermark observed by
    /// concurrent callers is always consistent with their readings.
    ///
    /// # Errors
    ///
    /// - the clock moved backwards or reads outside the representable range;
    ///   the state is left untouched in that case
    /// - [`Error::LockPoisoned`] if the lock is poisoned (std mutex only)
    ///
    /// [`Error::LockPoisoned`]: crate::Error::LockPoisoned
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn try_poll_id(&self) -> Result<Poll> {
        let mut state = {
            #[cfg(feature = "parking-lot")]
            {
                self.state.lock()
            }
            #[cfg(not(feature = "parking-lot"))]
            {
                self.state.lock()?
            }
        };

        let now = self.time.current_millis();
        let (next, poll) = state.poll(now)?;
        *state = next;
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

impl<T> IdGenerator<T> for LockIdGenerator<T>
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
        self.state()
    }
}
