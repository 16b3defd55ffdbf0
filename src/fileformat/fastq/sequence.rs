use std::io::Write;

use crate::fileformat::fastq::dge::{self, DgeBarcode};
use crate::fileformat::fastq::illumina::{self, IlluminaPosition, IlluminaReadInfo};
use crate::fileformat::fastq::composite;
use crate::runtime::{Error, Result};

///////////////////////////////
/// The four raw lines of one FASTQ record, without line terminators
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FastqLines {
    pub id: String,
    pub seq: String,
    pub option: String,
    pub qual: String,
}

impl FastqLines {
    pub fn new<S: Into<String>>(id: S, seq: S, option: S, qual: S) -> Self {
        FastqLines {
            id: id.into(),
            seq: seq.into(),
            option: option.into(),
            qual: qual.into(),
        }
    }

    pub fn write_to<W: Write>(&self, w: &mut W) -> std::io::Result<()> {
        writeln!(w, "{}", self.id)?;
        writeln!(w, "{}", self.seq)?;
        writeln!(w, "{}", self.option)?;
        writeln!(w, "{}", self.qual)
    }
}

///////////////////////////////
/// How the identifier and sequence lines of a record are decoded
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SequenceFlavor {
    /// No decomposition; empty group id
    Plain,
    /// Identifier split into instrument/position and read info; group id is the index sequence
    Illumina,
    /// Illumina, with well and UMI barcodes at the start of the sequence line; group id is the well
    DgeIllumina,
    /// Illumina, where the index sequence is the well barcode
    ConvIllumina,
    /// Synthesized from a DGE pair; identifier carries the position and barcodes
    CompositedDge,
}

///////////////////////////////
/// Validation depth used when decoding FASTQ records
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FastqParseOptions {
    /// Check the '@' and '+' sentinels and that sequence and quality have equal length
    pub parse_sequence: bool,
    /// Split the identifier into its two space-separated parts
    pub parse_id_level_1: bool,
    /// Decode the fields of both identifier parts
    pub parse_id_level_2: bool,
}

impl Default for FastqParseOptions {
    fn default() -> Self {
        FastqParseOptions {
            parse_sequence: true,
            parse_id_level_1: true,
            parse_id_level_2: false,
        }
    }
}

impl FastqParseOptions {
    pub fn validate(&self) -> Result<()> {
        if self.parse_id_level_2 && !self.parse_id_level_1 {
            return Err(Error::invalid_config(
                "sequence identifier level 2 parsing requires level 1 parsing",
            ));
        }
        Ok(())
    }
}

///////////////////////////////
/// A decoded FASTQ record. Which metadata is present depends on flavor and parse options
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FastqRecord {
    pub lines: FastqLines,
    pub flavor: SequenceFlavor,
    pub read_length: usize,
    pub id_part_1: Option<String>,
    pub id_part_2: Option<String>,
    pub position: Option<IlluminaPosition>,
    pub read_info: Option<IlluminaReadInfo>,
    pub barcode: Option<DgeBarcode>,
    pub group_id: String,
}

impl FastqRecord {
    fn undecoded(lines: FastqLines, flavor: SequenceFlavor) -> Self {
        FastqRecord {
            read_length: lines.seq.len(),
            lines,
            flavor,
            id_part_1: None,
            id_part_2: None,
            position: None,
            read_info: None,
            barcode: None,
            group_id: String::new(),
        }
    }

    ///////////////////////////////
    /// Decode raw lines as the given flavor at the given depth
    pub fn decode(
        lines: FastqLines,
        flavor: SequenceFlavor,
        opts: &FastqParseOptions,
    ) -> Result<FastqRecord> {
        opts.validate()?;
        if opts.parse_sequence {
            check_lines(&lines)?;
        }

        let mut rec = FastqRecord::undecoded(lines, flavor);
        match flavor {
            SequenceFlavor::Plain => {}
            SequenceFlavor::Illumina | SequenceFlavor::ConvIllumina => {
                rec.decode_illumina_id(opts)?;
                if let Some(info) = &rec.read_info {
                    rec.group_id = info.index_sequence.clone();
                }
                if flavor == SequenceFlavor::ConvIllumina {
                    rec.barcode = rec.read_info.as_ref().map(|info| DgeBarcode {
                        well: info.index_sequence.clone(),
                        umi: String::new(),
                    });
                }
            }
            SequenceFlavor::DgeIllumina => {
                rec.decode_illumina_id(opts)?;
                let barcode = dge::extract_barcode(&rec.lines.seq)?;
                rec.group_id = barcode.well.clone();
                rec.barcode = Some(barcode);
            }
            SequenceFlavor::CompositedDge => {
                if opts.parse_id_level_1 {
                    let (position, barcode) = composite::parse_composite_id(&rec.lines.id)?;
                    rec.id_part_1 = Some(rec.lines.id.clone());
                    rec.group_id = barcode.well.clone();
                    rec.position = Some(position);
                    rec.barcode = Some(barcode);
                }
            }
        }
        Ok(rec)
    }

    fn decode_illumina_id(&mut self, opts: &FastqParseOptions) -> Result<()> {
        if !opts.parse_id_level_1 {
            return Ok(());
        }
        let (part_1, part_2) = illumina::split_id_line(&self.lines.id)?;
        if opts.parse_id_level_2 {
            self.position = Some(illumina::decode_position(&part_1)?);
            self.read_info = Some(illumina::decode_read_info(&part_2)?);
        }
        self.id_part_1 = Some(part_1);
        self.id_part_2 = Some(part_2);
        Ok(())
    }

    pub fn write_to<W: Write>(&self, w: &mut W) -> std::io::Result<()> {
        self.lines.write_to(w)
    }
}

///////////////////////////////
/// Sentinel and length checks shared by every flavor
pub fn check_lines(lines: &FastqLines) -> Result<()> {
    if !lines.id.starts_with('@') {
        return Err(Error::malformed(
            "FASTQ identifier line",
            &lines.id,
            "a line starting with '@'",
        ));
    }
    if !lines.option.starts_with('+') {
        return Err(Error::malformed(
            "FASTQ option line",
            &lines.option,
            "a line starting with '+'",
        ));
    }
    if lines.seq.len() != lines.qual.len() {
        return Err(Error::malformed(
            "FASTQ quality line",
            &lines.qual,
            format!(
                "the sequence line length {} (lengths of sequence line and quality line are not equal)",
                lines.seq.len()
            ),
        ));
    }
    Ok(())
}
