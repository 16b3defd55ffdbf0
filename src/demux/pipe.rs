use std::io::{BufRead, Write};

use crate::demux::demuxer::Demuxer;
use crate::demux::output::DemuxRecord;
use crate::fileformat::fastq::{
    composite, FastqLines, FastqParseOptions, FastqReader, FastqRecord, PairedSequence,
    SequenceFlavor,
};
use crate::runtime::{Error, Result};

///////////////////////////////
/// How a raw read pair becomes one routable record
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DemuxMode {
    /// DGE pairs fused into one composite record per pair
    Composite,
    /// Pairs routed by the read 1 index sequence; both reads written
    PairedIndex,
}

impl std::str::FromStr for DemuxMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "composite" | "dge" => Ok(DemuxMode::Composite),
            "paired-index" | "conv" => Ok(DemuxMode::PairedIndex),
            _ => Err(format!(
                "Invalid demux mode '{}', expected composite or paired-index",
                s
            )),
        }
    }
}

pub trait PairDecoder {
    type Record: DemuxRecord;
    fn decode(&self, r1: FastqLines, r2: FastqLines) -> Result<Self::Record>;
}

///////////////////////////////
/// Read 1 is DGE (well and UMI in its sequence line), read 2 carries the payload
pub struct CompositeDecoder {
    pub opts: FastqParseOptions,
}

impl PairDecoder for CompositeDecoder {
    type Record = FastqRecord;

    fn decode(&self, r1: FastqLines, r2: FastqLines) -> Result<FastqRecord> {
        let first = FastqRecord::decode(r1, SequenceFlavor::DgeIllumina, &self.opts)?;
        let second = FastqRecord::decode(r2, SequenceFlavor::Illumina, &self.opts)?;
        let pair = PairedSequence::new(first, second)?;
        composite(&pair.first, &pair.second)
    }
}

///////////////////////////////
/// Both reads are Conv Illumina records; the well is the read 1 index sequence
pub struct PairedIndexDecoder {
    pub opts: FastqParseOptions,
}

impl PairDecoder for PairedIndexDecoder {
    type Record = PairedSequence;

    fn decode(&self, r1: FastqLines, r2: FastqLines) -> Result<PairedSequence> {
        let first = FastqRecord::decode(r1, SequenceFlavor::ConvIllumina, &self.opts)?;
        let second = FastqRecord::decode(r2, SequenceFlavor::ConvIllumina, &self.opts)?;
        PairedSequence::new(first, second)
    }
}

///////////////////////////////
/// Read both files in batches, decode each pair and hand it to the demuxer.
/// A pair that fails to decode is logged and skipped
pub fn demux_pairs<D, R1, R2, W>(
    decoder: &D,
    reader_r1: &mut FastqReader<R1>,
    reader_r2: &mut FastqReader<R2>,
    demuxer: &mut Demuxer<D::Record, W>,
    batch_size: usize,
) -> Result<()>
where
    D: PairDecoder,
    R1: BufRead,
    R2: BufRead,
    W: Write,
{
    let batch_size = batch_size.max(1);
    loop {
        let batch_r1 = reader_r1.read_batch(batch_size)?;
        let batch_r2 = reader_r2.read_batch(batch_size)?;
        if batch_r1.len() != batch_r2.len() {
            return Err(Error::malformed(
                "paired FASTQ input",
                format!(
                    "{} read 1 records against {} read 2 records",
                    reader_r1.records_read(),
                    reader_r2.records_read()
                ),
                "the same number of records in both files",
            ));
        }
        if batch_r1.is_empty() {
            break;
        }

        for (l1, l2) in batch_r1.into_iter().zip(batch_r2) {
            match decoder.decode(l1, l2) {
                Ok(rec) => {
                    demuxer.add_sequence(rec)?;
                }
                Err(e) => {
                    log::warn!("{}: {}", e.category(), e);
                    demuxer.note_skipped();
                }
            }
        }
        demuxer.write_sequences(false)?;
        log::debug!("Processed {} read pairs", reader_r1.records_read());
    }
    Ok(())
}
