use crate::runtime::{Error, Result};
use crate::utils::{parse_number, split_exact};

///////////////////////////////
/// Instrument and cluster position, from identifier part 1
/// `@<instrument>:<run>:<flowcell>:<lane>:<tile>:<x>:<y>`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IlluminaPosition {
    pub instrument: String,
    pub run: u64,
    pub flowcell: String,
    pub lane: u64,
    pub tile: u64,
    pub x: u64,
    pub y: u64,
}

impl IlluminaPosition {
    /// Identifier part 1 for this position, including the leading '@'
    pub fn to_id_part_1(&self) -> String {
        format!(
            "@{}:{}:{}:{}:{}:{}:{}",
            self.instrument, self.run, self.flowcell, self.lane, self.tile, self.x, self.y
        )
    }

    /// Decode the seven position fields; `fields[0]` may still carry the '@'
    pub fn from_fields(fields: &[&str]) -> Result<IlluminaPosition> {
        if fields.len() != 7 {
            return Err(Error::malformed(
                "Illumina sequence identifier",
                fields.join(":"),
                "7 fields separated by ':'",
            ));
        }
        Ok(IlluminaPosition {
            instrument: fields[0].trim_start_matches('@').to_string(),
            run: parse_number("run number", fields[1], "u64")?,
            flowcell: fields[2].to_string(),
            lane: parse_number("flowcell lane", fields[3], "u64")?,
            tile: parse_number("tile number", fields[4], "u64")?,
            x: parse_number("x-position", fields[5], "u64")?,
            y: parse_number("y-position", fields[6], "u64")?,
        })
    }
}

///////////////////////////////
/// Read info, from identifier part 2: `<read>:<is filtered>:<control number>:<index sequence>`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IlluminaReadInfo {
    pub read_number: u64,
    pub is_filtered: char,
    pub control_number: u64,
    pub index_sequence: String,
}

///////////////////////////////
/// Split the identifier line on its single space. Part 1 keeps the '@'
pub fn split_id_line(id: &str) -> Result<(String, String)> {
    let parts = split_exact(id, ' ', 2, "Illumina sequence identifier line")?;
    Ok((parts[0].to_string(), parts[1].to_string()))
}

pub fn decode_position(part_1: &str) -> Result<IlluminaPosition> {
    let fields = split_exact(part_1, ':', 7, "Illumina sequence identifier part 1")?;
    IlluminaPosition::from_fields(&fields)
}

pub fn decode_read_info(part_2: &str) -> Result<IlluminaReadInfo> {
    let fields = split_exact(part_2, ':', 4, "Illumina sequence identifier part 2")?;

    let mut filtered = fields[1].chars();
    let is_filtered = match (filtered.next(), filtered.next()) {
        (Some(c), None) => c,
        _ => {
            return Err(Error::conversion("is-filtered flag", fields[1], "char"));
        }
    };

    Ok(IlluminaReadInfo {
        read_number: parse_number("read number", fields[0], "u64")?,
        is_filtered,
        control_number: parse_number("control number", fields[2], "u64")?,
        index_sequence: fields[3].to_string(),
    })
}
