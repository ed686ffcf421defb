mod calendar;
mod interface;
mod system_clock;

pub use calendar::*;
pub use interface::*;
pub use system_clock::*;
