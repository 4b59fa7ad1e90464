use core::{ops::ControlFlow, time::Duration};

use crate::{Error, Poll, Result, SnowmintId};

/// Maximum number of waits before an exhausted millisecond is reported as
/// [`Error::ClockStalled`].
pub const MAX_WAIT_ATTEMPTS: u32 = 50;

/// Upper bound on a single wait step.
pub const MAX_WAIT_STEP: Duration = Duration::from_millis(10);

/// Bounded wait schedule for an exhausted millisecond.
///
/// Attempt `n` (1-based) waits `min(10, n)` milliseconds, and attempt 51 fails
/// instead of waiting, so a frozen clock costs at most ~455ms before the
/// caller gets [`Error::ClockStalled`]. The budget covers the whole call: a
/// caller that keeps losing freshly opened milliseconds to other holders of a
/// shared generator still gives up after [`MAX_WAIT_ATTEMPTS`] waits.
///
/// Generators drive this internally; it is public so callers polling with
/// `try_poll_id` can reuse the same schedule.
///
/// ```
/// use core::time::Duration;
/// use snowmint::Backoff;
///
/// let mut backoff = Backoff::new();
/// assert_eq!(backoff.next_delay(101).unwrap(), Duration::from_millis(1));
/// assert_eq!(backoff.next_delay(101).unwrap(), Duration::from_millis(2));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Backoff {
    yield_until: Option<u64>,
    attempts: u32,
}

impl Backoff {
    /// Creates a schedule with no attempts made.
    pub const fn new() -> Self {
        Self {
            yield_until: None,
            attempts: 0,
        }
    }

    /// Number of waits made so far.
    pub const fn attempts(&self) -> u32 {
        self.attempts
    }

    /// The millisecond the caller is waiting for, if it has waited at all.
    pub const fn yield_until(&self) -> Option<u64> {
        self.yield_until
    }

    /// Returns how long to wait before polling again for `yield_until`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ClockStalled`] once [`MAX_WAIT_ATTEMPTS`] waits have
    /// elapsed.
    pub fn next_delay(&mut self, yield_until: u64) -> Result<Duration> {
        self.yield_until = Some(yield_until);
        if self.attempts >= MAX_WAIT_ATTEMPTS {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                last_timestamp = yield_until - 1,
                attempts = self.attempts,
                "clock stalled, giving up"
            );
            return Err(Error::ClockStalled {
                last_timestamp: yield_until - 1,
                attempts: self.attempts,
            });
        }
        self.attempts += 1;
        Ok(Duration::from_millis(u64::from(self.attempts)).min(MAX_WAIT_STEP))
    }

    /// Folds one poll outcome into the schedule.
    ///
    /// Returns `Break` with a ready ID, or `Continue` with the delay before the
    /// next poll. Once the caller is waiting, a clock reading behind the
    /// watermark means the clock has not advanced yet and costs one more
    /// attempt instead of failing the call.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ClockStalled`] when the budget is spent, and passes
    /// every other polling error through.
    pub fn step(&mut self, polled: Result<Poll>) -> Result<ControlFlow<SnowmintId, Duration>> {
        match polled {
            Ok(Poll::Ready { id }) => Ok(ControlFlow::Break(id)),
            Ok(Poll::Pending { yield_until }) => {
                self.next_delay(yield_until).map(ControlFlow::Continue)
            }
            Err(err @ Error::ClockRegression { .. }) => match self.yield_until {
                Some(yield_until) => self.next_delay(yield_until).map(ControlFlow::Continue),
                None => Err(err),
            },
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_ramps_then_caps() {
        let mut backoff = Backoff::new();
        let delays: Vec<u64> = (0..12)
            .map(|_| backoff.next_delay(7).unwrap().as_millis() as u64)
            .collect();
        assert_eq!(delays, [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 10, 10]);
    }

    #[test]
    fn fails_after_budget() {
        let mut backoff = Backoff::new();
        let total: Duration = (0..MAX_WAIT_ATTEMPTS)
            .map(|_| backoff.next_delay(7).unwrap())
            .sum();
        assert_eq!(total, Duration::from_millis(455));
        assert_eq!(
            backoff.next_delay(7),
            Err(Error::ClockStalled {
                last_timestamp: 6,
                attempts: MAX_WAIT_ATTEMPTS
            })
        );
    }

    #[test]
    fn budget_spans_every_millisecond_of_a_call() {
        let mut backoff = Backoff::new();
        for attempt in 0..u64::from(MAX_WAIT_ATTEMPTS) {
            backoff.next_delay(100 + attempt).unwrap();
        }
        assert_eq!(
            backoff.next_delay(200),
            Err(Error::ClockStalled {
                last_timestamp: 199,
                attempts: MAX_WAIT_ATTEMPTS
            })
        );
    }

    #[test]
    fn regression_while_waiting_costs_an_attempt() {
        let mut backoff = Backoff::new();
        let regression = Error::ClockRegression {
            now: 41,
            last_timestamp: 42,
        };

        // Before any wait the regression is the caller's problem.
        assert_eq!(
            backoff.step(Err(regression.clone())),
            Err(regression.clone())
        );

        assert_eq!(
            backoff.step(Ok(Poll::Pending { yield_until: 43 })),
            Ok(ControlFlow::Continue(Duration::from_millis(1)))
        );
        assert_eq!(
            backoff.step(Err(regression)),
            Ok(ControlFlow::Continue(Duration::from_millis(2)))
        );
        assert_eq!(backoff.yield_until(), Some(43));

        let id = SnowmintId::from(43, 0, 0, 0);
        assert_eq!(
            backoff.step(Ok(Poll::Ready { id })),
            Ok(ControlFlow::Break(id))
        );
    }

    #[test]
    fn other_errors_pass_through_while_waiting() {
        let mut backoff = Backoff::new();
        backoff.next_delay(43).unwrap();
        assert_eq!(
            backoff.step(Err(Error::LockPoisoned)),
            Err(Error::LockPoisoned)
        );
    }
}
