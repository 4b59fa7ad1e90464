use core::time::Duration;
use std::{rc::Rc, sync::Arc};

/// Raw millisecond value of [`CUSTOM_EPOCH`].
pub const CUSTOM_EPOCH_MILLIS: u64 = 1_735_689_600_000;

/// Custom epoch: Wednesday, January 1, 2025 00:00:00 UTC
///
/// Every [`SnowmintId`] timestamp is measured in milliseconds from this
/// instant.
///
/// [`SnowmintId`]: crate::SnowmintId
pub const CUSTOM_EPOCH: Duration = Duration::from_millis(CUSTOM_EPOCH_MILLIS);

/// A trait for time sources that return a wall-clock timestamp.
///
/// This abstraction allows you to plug in the system clock, a monotonic
/// timer, or a mocked time source in tests.
///
/// The unit is **milliseconds since the Unix epoch**. Generators translate the
/// reading to the [`CUSTOM_EPOCH`] themselves, so readings before the epoch
/// can be detected and rejected.
///
/// # Example
///
/// ```
/// use snowmint::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn current_millis(&self) -> u64 {
///         1_735_689_600_000
///     }
/// }
///
/// let time = FixedTime;
/// assert_eq!(time.current_millis(), snowmint::CUSTOM_EPOCH_MILLIS);
/// ```
pub trait TimeSource {
    /// Returns the current time in milliseconds since the Unix epoch.
    fn current_millis(&self) -> u64;
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn current_millis(&self) -> u64 {
        (**self).current_millis()
    }
}

impl<T: TimeSource + ?Sized> TimeSource for Arc<T> {
    fn current_millis(&self) -> u64 {
        (**self).current_millis()
    }
}

impl<T: TimeSource + ?Sized> TimeSource for Rc<T> {
    fn current_millis(&self) -> u64 {
        (**self).current_millis()
    }
}
