use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use crate::demux::{
    demux_pairs, CompositeDecoder, DemuxMode, DemuxStats, Demuxer, OutputNaming, PairDecoder,
    PairedIndexDecoder,
};
use crate::fileformat::fastq::{FastqParseOptions, FastqReader};
use crate::fileformat::{read_paired_fastq_list_file, FastqPathPair, WellBarcodeTable};
use crate::utils::{open_buffered, LineEnding};

pub const DEFAULT_BATCH_SIZE: usize = 131072;
pub const DEFAULT_GROUP_CAPACITY: usize = 131072;
pub const DEFAULT_MAIN_NAME: &str = "demux";

/// Commandline option: Split paired FASTQ files into one file per well
#[derive(Args)]
pub struct DemuxCMD {
    /// TSV of plate, well and barcode, without header
    #[arg(short = 'b', long = "barcodes", value_parser)]
    pub path_barcodes: PathBuf,

    /// FASTQ for read 1
    #[arg(long = "r1", value_parser, requires = "path_r2", conflicts_with = "path_pairs")]
    pub path_r1: Option<PathBuf>,

    /// FASTQ for read 2
    #[arg(long = "r2", value_parser, requires = "path_r1")]
    pub path_r2: Option<PathBuf>,

    /// TSV listing read 1 and read 2 FASTQ paths, one pair per line
    #[arg(long = "pairs", value_parser)]
    pub path_pairs: Option<PathBuf>,

    /// The pair list has no header line
    #[arg(long = "pairs-no-header")]
    pub pairs_no_header: bool,

    /// Output directory
    #[arg(short = 'o', value_parser)]
    pub path_out: PathBuf,

    /// Prefix of output file names
    #[arg(short = 'n', long = "name", default_value = DEFAULT_MAIN_NAME)]
    pub main_name: String,

    /// composite: DGE pairs fused into one record; paired-index: pairs routed by index sequence
    #[arg(long = "mode", default_value = "composite")]
    pub mode: DemuxMode,

    /// Read pairs read per batch
    #[arg(long = "batch-size", default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,

    /// Records buffered per well before writing; 0 buffers everything until the end
    #[arg(long = "group-capacity", default_value_t = DEFAULT_GROUP_CAPACITY)]
    pub group_capacity: usize,

    /// Do not flush output files after each buffer write
    #[arg(long = "no-flush")]
    pub no_flush: bool,

    /// Skip the sentinel and length checks of FASTQ records
    #[arg(long = "no-check-sequence")]
    pub no_check_sequence: bool,

    #[arg(long = "line-ending", default_value = "unix")]
    pub line_ending: LineEnding,
}

impl DemuxCMD {
    pub fn try_execute(&mut self) -> Result<()> {
        let pairs = match (&self.path_r1, &self.path_r2, &self.path_pairs) {
            (Some(r1), Some(r2), None) => vec![FastqPathPair {
                r1: r1.clone(),
                r2: r2.clone(),
            }],
            (None, None, Some(list)) => {
                read_paired_fastq_list_file(list, !self.pairs_no_header, self.line_ending)?
            }
            _ => bail!("Specify either --r1 and --r2, or --pairs"),
        };

        let params = DemuxParams {
            path_barcodes: self.path_barcodes.clone(),
            pairs,
            path_out: self.path_out.clone(),
            main_name: self.main_name.clone(),
            mode: self.mode,
            batch_size: self.batch_size,
            group_capacity: self.group_capacity,
            flush_stream: !self.no_flush,
            fastq_opts: FastqParseOptions {
                parse_sequence: !self.no_check_sequence,
                ..Default::default()
            },
            line_ending: self.line_ending,
        };

        let stats = Demux::run(&params)?;
        log::info!("{}", stats);
        log::info!("Demux has finished succesfully");
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct DemuxParams {
    pub path_barcodes: PathBuf,
    pub pairs: Vec<FastqPathPair>,
    pub path_out: PathBuf,
    pub main_name: String,
    pub mode: DemuxMode,
    pub batch_size: usize,
    pub group_capacity: usize,
    pub flush_stream: bool,
    pub fastq_opts: FastqParseOptions,
    pub line_ending: LineEnding,
}

pub struct Demux {}

impl Demux {
    ///////////////////////////////
    /// Load the barcode table, open one output per well and demultiplex every pair of files
    pub fn run(params: &DemuxParams) -> Result<DemuxStats> {
        let table = WellBarcodeTable::from_path(&params.path_barcodes, params.line_ending)?;
        log::info!("Read {} barcodes for {} wells", table.len(), table.wells().len());

        std::fs::create_dir_all(&params.path_out).with_context(|| {
            format!("Failed to create output directory {:?}", params.path_out)
        })?;

        // Pairing needs part 1 of the identifier; composite identifiers are rebuilt from the
        // seven position fields and paired-index routing needs the index sequence
        let opts = FastqParseOptions {
            parse_id_level_1: true,
            parse_id_level_2: true,
            ..params.fastq_opts
        };

        match params.mode {
            DemuxMode::Composite => {
                let naming = OutputNaming::new(&params.path_out, &params.main_name, false);
                Demux::run_with(&CompositeDecoder { opts }, params, table, &naming)
            }
            DemuxMode::PairedIndex => {
                let naming = OutputNaming::new(&params.path_out, &params.main_name, true);
                Demux::run_with(&PairedIndexDecoder { opts }, params, table, &naming)
            }
        }
    }

    fn run_with<D: PairDecoder>(
        decoder: &D,
        params: &DemuxParams,
        table: WellBarcodeTable,
        naming: &OutputNaming,
    ) -> Result<DemuxStats> {
        let mut demuxer: Demuxer<D::Record, BufWriter<File>> = Demuxer::new(
            table,
            params.group_capacity,
            params.flush_stream,
            |well| naming.open(well),
        )?;

        for pair in &params.pairs {
            log::info!("Demultiplexing {:?} and {:?}", pair.r1, pair.r2);
            let mut reader_r1 = FastqReader::new(open_buffered(&pair.r1)?, params.line_ending);
            let mut reader_r2 = FastqReader::new(open_buffered(&pair.r2)?, params.line_ending);
            demux_pairs(
                decoder,
                &mut reader_r1,
                &mut reader_r2,
                &mut demuxer,
                params.batch_size,
            )?;
        }

        let (stats, _) = demuxer.finish()?;
        if stats.skipped > 0 {
            log::warn!("Skipped {} malformed read pairs", stats.skipped);
        }
        Ok(stats)
    }
}
