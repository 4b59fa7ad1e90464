//! # snowmint
//!
//! Time-ordered, 64-bit unique IDs for fleets of cooperating generators.
//!
//! Every ID packs a 42-bit millisecond timestamp (relative to
//! [`CUSTOM_EPOCH`], 2025-01-01T00:00:00Z), a 5-bit worker ID, a 5-bit
//! process ID and a 12-bit sequence. IDs from one generator are strictly
//! increasing; IDs from different `(worker, process)` slots are ordered by
//! their timestamp field only.
//!
//! ```
//! use snowmint::{LockIdGenerator, SystemClock};
//!
//! let generator = LockIdGenerator::new(1, 1, SystemClock)?;
//! let id = generator.next_id_string()?;
//!
//! let parts = snowmint::decompose(&id)?;
//! assert_eq!((parts.worker_id, parts.process_id), (1, 1));
//! # Ok::<(), snowmint::Error>(())
//! ```
//!
//! ## Clock handling
//!
//! A generator refuses to issue IDs when the clock reads behind the last
//! issued timestamp ([`Error::ClockRegression`]) or before the epoch
//! ([`Error::ClockBeforeEpoch`]). When the 4096 sequence values of a
//! millisecond are spent, it waits for the next millisecond with a bounded
//! [`Backoff`] and fails with [`Error::ClockStalled`] if the clock is frozen.
//!
//! ## Features
//!
//! - `parking-lot`: use `parking_lot::Mutex` in [`LockIdGenerator`]
//! - `cache-padded`: pad the shared lock to a cache line
//! - `async-tokio`: `next_id_async` driven by the tokio timer
//! - `serde`: field adapters in [`mod@serde`] and `Serialize` for [`Components`]
//! - `tracing`: trace spans on generation and warnings on clock faults

#![cfg_attr(docsrs, feature(doc_cfg))]

mod error;
mod futures;
mod generator;
mod id;
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
#[cfg(feature = "serde")]
pub mod serde;
mod time;

pub use crate::error::*;
pub use crate::futures::*;
pub use crate::generator::*;
pub use crate::id::*;
pub use crate::time::*;
