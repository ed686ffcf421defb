mod generator;
mod id;
#[cfg(test)]
mod tests;

pub use generator::*;
pub use id::*;
