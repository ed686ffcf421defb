mod crc32;
mod interface;

pub use crc32::*;
pub use interface::*;
