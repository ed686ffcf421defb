#[allow(clippy::module_inception)]
mod alphabet;
mod codec;
mod tables;

pub use alphabet::*;
pub use codec::*;
pub use tables::*;
