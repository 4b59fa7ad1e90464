//! Field adapters for serializing [`SnowmintId`] with `#[serde(with = "..")]`.
//!
//! [`SnowmintId`]: crate::SnowmintId

mod snowmint;

pub use snowmint::*;
