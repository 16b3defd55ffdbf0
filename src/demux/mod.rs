mod demuxer;
mod output;
mod pipe;

pub use demuxer::DemuxStats;
pub use demuxer::Demuxer;

pub use output::DemuxRecord;
pub use output::GroupOutput;
pub use output::OutputNaming;

pub use pipe::demux_pairs;
pub use pipe::CompositeDecoder;
pub use pipe::DemuxMode;
pub use pipe::PairDecoder;
pub use pipe::PairedIndexDecoder;
