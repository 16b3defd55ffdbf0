use crate::fileformat::fastq::dge::DgeBarcode;
use crate::fileformat::fastq::illumina::IlluminaPosition;
use crate::fileformat::fastq::sequence::{FastqLines, FastqRecord, SequenceFlavor};
use crate::runtime::{Error, Result};

///////////////////////////////
/// Fuse a DGE read pair into one record: identifier part 1 and barcode come from read 1,
/// sequence and quality come from read 2
pub fn composite(r1: &FastqRecord, r2: &FastqRecord) -> Result<FastqRecord> {
    let id_part_1 = r1.id_part_1.as_ref().ok_or_else(|| {
        Error::invalid_config("composite records need read 1 identifier part 1 to be parsed")
    })?;
    let barcode = r1.barcode.as_ref().ok_or_else(|| {
        Error::malformed(
            "composite read 1",
            &r1.lines.id,
            "a DGE record with well and UMI barcodes",
        )
    })?;

    let lines = FastqLines {
        id: format!("{}:{}", id_part_1, barcode.joined()),
        seq: r2.lines.seq.clone(),
        option: "+".to_string(),
        qual: r2.lines.qual.clone(),
    };

    Ok(FastqRecord {
        read_length: r2.read_length,
        id_part_1: Some(lines.id.clone()),
        id_part_2: None,
        position: r1.position.clone(),
        read_info: None,
        barcode: Some(barcode.clone()),
        group_id: barcode.well.clone(),
        flavor: SequenceFlavor::CompositedDge,
        lines,
    })
}

///////////////////////////////
/// Decode `[@]<instrument>:<run>:<flowcell>:<lane>:<tile>:<x>:<y>:<well+umi>`.
/// Also used on SAM QNAMEs, which lack the '@'
pub fn parse_composite_id(id: &str) -> Result<(IlluminaPosition, DgeBarcode)> {
    let fields: Vec<&str> = id.split(':').collect();
    if fields.len() != 8 {
        return Err(Error::malformed(
            "composite DGE identifier",
            id,
            "8 fields separated by ':'",
        ));
    }
    let position = IlluminaPosition::from_fields(&fields[..7])?;
    let barcode = DgeBarcode::split(fields[7])?;
    Ok((position, barcode))
}
