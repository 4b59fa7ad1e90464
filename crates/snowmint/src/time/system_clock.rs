use super::{SystemTime, TimeSource, UNIX_EPOCH};

/// The host wall clock.
///
/// Readings follow `SystemTime`, so they can jump backwards when the system
/// clock is stepped (NTP, manual changes). Generators surface such jumps as
/// [`Error::ClockRegression`]; use [`MonotonicClock`] to avoid them.
///
/// [`Error::ClockRegression`]: crate::Error::ClockRegression
/// [`MonotonicClock`]: crate::MonotonicClock
#[derive(Copy, Clone, Debug, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn current_millis(&self) -> u64 {
        // A host clock before 1970 reads as 0, which the generator then
        // rejects as a pre-epoch reading.
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| {
                u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
            })
    }
}
