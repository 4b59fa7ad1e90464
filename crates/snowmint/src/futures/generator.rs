use core::{future::Future, ops::ControlFlow};

use super::SleepProvider;
use crate::{Backoff, IdGenerator, Result, SnowmintId, TimeSource};

/// Extension trait for asynchronously generating IDs.
///
/// The async path follows the same bounded [`Backoff`] schedule as
/// [`IdGenerator::next_id`], but waits with the [`SleepProvider`] instead of
/// blocking the thread. Dropping the returned future cancels the wait.
pub trait IdGeneratorAsyncExt<T>
where
    T: TimeSource,
{
    /// Returns a future that resolves to the next available ID.
    ///
    /// # Errors
    ///
    /// Resolves to the same errors as [`IdGenerator::next_id`], including
    /// [`Error::ClockStalled`] once the wait budget is spent.
    ///
    /// [`Error::ClockStalled`]: crate::Error::ClockStalled
    fn try_next_id_async<S>(&self) -> impl Future<Output = Result<SnowmintId>>
    where
        S: SleepProvider;
}

impl<G, T> IdGeneratorAsyncExt<T> for G
where
    G: IdGenerator<T> + Sync,
    T: TimeSource,
{
    fn try_next_id_async<S>(&self) -> impl Future<Output = Result<SnowmintId>>
    where
        S: SleepProvider,
    {
        async {
            let mut backoff = Backoff::new();
            loop {
                let dur = match backoff.step(self.try_poll_id())? {
                    ControlFlow::Break(id) => return Ok(id),
                    ControlFlow::Continue(dur) => dur,
                };
                S::sleep_for(dur).await;
            }
        }
    }
}
