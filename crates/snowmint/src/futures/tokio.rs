use core::{future::Future, time::Duration};

use super::{IdGeneratorAsyncExt, SleepProvider};
use crate::{IdGenerator, Result, SnowmintId, TimeSource};

/// An implementation of [`SleepProvider`] using Tokio's timer.
///
/// This is the default provider for use in async applications built on Tokio.
pub struct TokioSleep;
impl SleepProvider for TokioSleep {
    fn sleep_for(dur: Duration) -> impl Future<Output = ()> + Send {
        tokio::time::sleep(dur)
    }
}

/// An implementation of [`SleepProvider`] using Tokio's yield.
///
/// This strategy avoids timer-based delays by yielding to the scheduler
/// immediately. Each yield still counts as one attempt of the bounded wait,
/// so a frozen clock fails faster than with [`TokioSleep`].
pub struct TokioYield;
impl SleepProvider for TokioYield {
    fn sleep_for(_dur: Duration) -> impl Future<Output = ()> + Send {
        tokio::task::yield_now()
    }
}

/// Extension trait for asynchronously generating IDs using the
/// [`tokio`](https://docs.rs/tokio) async runtime.
///
/// This trait provides a convenience method that uses [`TokioSleep`] as the
/// sleep provider.
pub trait IdGeneratorAsyncTokioExt<T>
where
    T: TimeSource,
{
    /// Returns a future that resolves to the next available ID using
    /// [`TokioSleep`].
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying generator fails.
    fn next_id_async(&self) -> impl Future<Output = Result<SnowmintId>>;
}

impl<G, T> IdGeneratorAsyncTokioExt<T> for G
where
    G: IdGenerator<T> + Sync,
    T: TimeSource,
{
    fn next_id_async(&self) -> impl Future<Output = Result<SnowmintId>> {
        <Self as IdGeneratorAsyncExt<T>>::try_next_id_async::<TokioSleep>(self)
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashSet,
        sync::atomic::{AtomicUsize, Ordering},
    };

    use futures::future::try_join_all;

    use super::*;
    use crate::{CUSTOM_EPOCH_MILLIS, Error, LockIdGenerator, MAX_WAIT_ATTEMPTS, MonotonicClock};

    const NUM_TASKS: usize = 8;
    const IDS_PER_TASK: usize = 4096 * 4; // Enough to cross several exhausted milliseconds

    /// Replays fixed readings, then repeats the last one.
    struct ScriptedTime {
        readings: &'static [u64],
        next: AtomicUsize,
    }

    impl TimeSource for ScriptedTime {
        fn current_millis(&self) -> u64 {
            let i = self.next.fetch_add(1, Ordering::Relaxed);
            self.readings[i.min(self.readings.len() - 1)]
        }
    }

    struct FrozenTime;
    impl TimeSource for FrozenTime {
        fn current_millis(&self) -> u64 {
            CUSTOM_EPOCH_MILLIS + 1
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn lock_can_call_next_id_async() {
        let generator = LockIdGenerator::new(2, 3, MonotonicClock::default()).unwrap();
        let id = generator.next_id_async().await.unwrap();
        assert_eq!(id.worker_id(), 2);
        assert_eq!(id.process_id(), 3);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn generates_many_unique_ids_across_tasks() {
        let generator = LockIdGenerator::new(0, 0, MonotonicClock::default()).unwrap();

        let tasks = (0..NUM_TASKS).map(|_| {
            let generator = generator.clone();
            tokio::spawn(async move {
                let mut ids = Vec::with_capacity(IDS_PER_TASK);
                for _ in 0..IDS_PER_TASK {
                    ids.push(generator.next_id_async().await?);
                }
                Ok::<_, Error>(ids)
            })
        });

        let mut seen = HashSet::with_capacity(NUM_TASKS * IDS_PER_TASK);
        for ids in try_join_all(tasks).await.unwrap() {
            for id in ids.unwrap() {
                assert!(seen.insert(id), "duplicate id {id}");
            }
        }
        assert_eq!(seen.len(), NUM_TASKS * IDS_PER_TASK);
    }

    #[tokio::test]
    async fn frozen_clock_stalls_async() {
        let generator = LockIdGenerator::from_components(
            0,
            0,
            Some(CUSTOM_EPOCH_MILLIS + 1),
            4095,
            FrozenTime,
        )
        .unwrap();

        let err = generator
            .try_next_id_async::<TokioYield>()
            .await
            .unwrap_err();
        assert_eq!(
            err,
            Error::ClockStalled {
                last_timestamp: CUSTOM_EPOCH_MILLIS + 1,
                attempts: MAX_WAIT_ATTEMPTS,
            }
        );
    }

    #[tokio::test]
    async fn clock_stepping_back_while_waiting_async() {
        const EXHAUSTED: u64 = CUSTOM_EPOCH_MILLIS + 42;
        const READINGS: [u64; 3] = [EXHAUSTED, EXHAUSTED - 1, EXHAUSTED + 1];
        let generator = LockIdGenerator::from_components(
            0,
            0,
            Some(EXHAUSTED),
            4095,
            ScriptedTime {
                readings: &READINGS,
                next: AtomicUsize::new(0),
            },
        )
        .unwrap();

        let id = generator.try_next_id_async::<TokioYield>().await.unwrap();
        assert_eq!(id.unix_millis(), EXHAUSTED + 1);
        assert_eq!(id.sequence(), 0);
    }
}
