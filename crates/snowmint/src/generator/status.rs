use crate::SnowmintId;

/// Represents the result of a single generation attempt.
///
/// This type models the outcome of `IdGenerator::try_poll_id()`:
///
/// - [`Poll::Ready`] indicates a new ID was successfully generated.
/// - [`Poll::Pending`] means the sequence space of the current millisecond is
///   exhausted and no ID can be produced until the clock reaches
///   `yield_until`.
///
/// Polling never blocks. Callers that want the bounded wait should use
/// `IdGenerator::next_id` or drive a [`Backoff`] themselves.
///
/// # Example
///
/// ```
/// use snowmint::{BasicIdGenerator, Poll, TimeSource};
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn current_millis(&self) -> u64 {
///         1_735_689_600_001
///     }
/// }
///
/// let generator = BasicIdGenerator::from_components(0, 1, Some(1_735_689_600_001), 4095, FixedTime).unwrap();
/// match generator.try_poll_id().unwrap() {
///     Poll::Ready { id } => println!("ID: {id}"),
///     Poll::Pending { yield_until } => println!("Back off until: {yield_until}"),
/// }
/// ```
///
/// [`Backoff`]: crate::Backoff
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Poll {
    /// A unique ID was generated and is ready to use.
    Ready {
        /// The generated ID.
        id: SnowmintId,
    },
    /// No ID could be generated because the sequence has been exhausted for the
    /// current millisecond.
    ///
    /// You should wait until the clock reaches or exceeds `yield_until`
    /// before attempting to generate a new ID again.
    Pending {
        /// The next timestamp (inclusive, Unix milliseconds) at which you may
        /// resume generating IDs.
        yield_until: u64,
    },
}
