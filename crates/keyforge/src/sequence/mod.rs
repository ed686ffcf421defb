mod counter;
mod mutex;

pub use counter::*;
