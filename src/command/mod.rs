pub mod count;
pub mod demux;
pub mod inspect;

pub use count::Count;
pub use count::CountCMD;
pub use count::CountParams;

pub use demux::Demux;
pub use demux::DemuxCMD;
pub use demux::DemuxParams;

pub use inspect::Inspect;
pub use inspect::InspectCMD;
pub use inspect::InspectParams;
