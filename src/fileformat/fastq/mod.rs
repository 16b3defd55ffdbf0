mod composite;
mod dge;
mod illumina;
mod paired;
mod reader;
mod sequence;

pub use composite::composite;
pub use composite::parse_composite_id;

pub use dge::extract_barcode;
pub use dge::DgeBarcode;
pub use dge::DGE_BARCODE_LENGTH;

pub use illumina::decode_position;
pub use illumina::decode_read_info;
pub use illumina::IlluminaPosition;
pub use illumina::IlluminaReadInfo;

pub use paired::PairedSequence;

pub use reader::FastqReader;

pub use sequence::check_lines;
pub use sequence::FastqLines;
pub use sequence::FastqParseOptions;
pub use sequence::FastqRecord;
pub use sequence::SequenceFlavor;
