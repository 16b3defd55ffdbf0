pub mod command;
pub mod demux;
pub mod fileformat;
pub mod runtime;
pub mod umi;
pub mod utils;
