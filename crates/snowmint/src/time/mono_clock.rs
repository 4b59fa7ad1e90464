use std::sync::Arc;

use super::{Instant, SystemClock, TimeSource};

#[derive(Debug)]
struct Anchor {
    start: Instant,
    unix_millis: u64,
}

/// A monotonic time source reporting Unix milliseconds.
///
/// The wall clock is sampled once at construction; every later reading adds
/// the monotonic time elapsed since then. The clock therefore never goes
/// backward, even if the system clock is adjusted externally, at the cost of
/// drifting from wall time by however much the host clock is later corrected.
///
/// Clones share the same anchor, so every generator built from one clock
/// observes the same timeline.
///
/// # Example
///
/// ```
/// use snowmint::{MonotonicClock, TimeSource};
///
/// let clock = MonotonicClock::new();
/// let first = clock.current_millis();
/// std::thread::sleep(std::time::Duration::from_millis(2));
/// assert!(clock.current_millis() >= first);
/// ```
#[derive(Clone, Debug)]
pub struct MonotonicClock {
    anchor: Arc<Anchor>,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    /// Anchors a new clock at the current wall-clock time.
    pub fn new() -> Self {
        Self::with_anchor(SystemClock.current_millis())
    }

    /// Anchors a new clock so that "now" reads as `unix_millis`.
    pub fn with_anchor(unix_millis: u64) -> Self {
        Self {
            anchor: Arc::new(Anchor {
                start: Instant::now(),
                unix_millis,
            }),
        }
    }
}

impl TimeSource for MonotonicClock {
    fn current_millis(&self) -> u64 {
        let elapsed = u64::try_from(self.anchor.start.elapsed().as_millis()).unwrap_or(u64::MAX);
        self.anchor.unix_millis.saturating_add(elapsed)
    }
}
