mod builder;
#[allow(clippy::module_inception)]
mod config;

pub use builder::*;
pub use config::*;
