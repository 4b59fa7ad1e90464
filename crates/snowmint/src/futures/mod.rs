mod generator;
mod sleep_provider;
#[cfg(feature = "async-tokio")]
mod tokio;

pub use generator::*;
pub use sleep_provider::*;
#[cfg_attr(docsrs, doc(cfg(feature = "async-tokio")))]
#[cfg(feature = "async-tokio")]
pub use self::tokio::*;
