mod error;
mod log;

pub use self::error::*;
pub use self::log::*;
