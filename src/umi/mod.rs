pub mod counter;
pub mod gene_umi;
pub mod info_printer;
pub mod pipe;

pub use counter::AcceptAll;
pub use counter::AlignmentCounter;
pub use counter::Verdict;

pub use gene_umi::GeneUmiCounter;
pub use gene_umi::GENE_UMI_PREFERRED_TAGS;

pub use info_printer::InfoPrinter;

pub use pipe::AuxNames;
pub use pipe::CategoryStats;
pub use pipe::PipeStats;
pub use pipe::SamAlignmentPipe;
