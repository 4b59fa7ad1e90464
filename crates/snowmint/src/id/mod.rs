mod components;
mod decode;
mod snowmint;

pub use components::*;
pub use decode::*;
pub use snowmint::*;
