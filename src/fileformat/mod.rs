pub mod fastq;
pub mod sam;

mod paired_fastq_list;
mod well_barcode;

pub use paired_fastq_list::read_paired_fastq_list;
pub use paired_fastq_list::read_paired_fastq_list_file;
pub use paired_fastq_list::FastqPathPair;

pub use well_barcode::WellBarcodeTable;
