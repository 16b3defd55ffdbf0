mod clap_utils;
mod convert;
mod line_reader;

pub use clap_utils::parse_toggle;

pub use convert::parse_number;
pub use convert::split_exact;

pub use line_reader::create_buffered;
pub use line_reader::open_buffered;
pub use line_reader::LineEnding;
pub use line_reader::LineReader;
