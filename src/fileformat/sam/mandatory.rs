use regex::Regex;

use crate::fileformat::fastq::parse_composite_id;
use crate::fileformat::sam::constants::*;
use crate::fileformat::sam::options::AlignmentShape;
use crate::runtime::{Error, Result};
use crate::utils::parse_number;

pub const MANDATORY_COLUMNS: usize = 11;

///////////////////////////////
/// The 11 mandatory alignment columns, converted and checked
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MandatoryFields {
    pub qname: String,
    pub flag: u16,
    pub rname: String,
    pub pos: u32,
    pub mapq: u8,
    pub cigar: String,
    pub rnext: String,
    pub pnext: u32,
    pub tlen: i32,
    pub seq: String,
    pub qual: String,
}

impl MandatoryFields {
    ///////////////////////////////
    /// Build from the first 11 columns of an alignment line
    pub fn parse(columns: &[&str], shape: AlignmentShape) -> Result<MandatoryFields> {
        if columns.len() < MANDATORY_COLUMNS {
            return Err(Error::malformed(
                "SAM alignment line",
                columns.join("\t"),
                "11 mandatory TAB-separated columns",
            ));
        }

        let fields = MandatoryFields {
            qname: checked("QNAME", columns[0], &QNAME_PATTERN)?,
            flag: ranged("FLAG", columns[1], 0, FLAG_MAX, "u16")? as u16,
            rname: checked("RNAME", columns[2], &RNAME_PATTERN)?,
            pos: ranged("POS", columns[3], 0, POS_MAX, "u32")? as u32,
            mapq: ranged("MAPQ", columns[4], 0, MAPQ_MAX, "u8")? as u8,
            cigar: checked("CIGAR", columns[5], &CIGAR_PATTERN)?,
            rnext: checked("RNEXT", columns[6], &RNEXT_PATTERN)?,
            pnext: ranged("PNEXT", columns[7], 0, POS_MAX, "u32")? as u32,
            tlen: ranged("TLEN", columns[8], -TLEN_MAX, TLEN_MAX, "i32")? as i32,
            seq: checked("SEQ", columns[9], &SEQ_PATTERN)?,
            qual: checked("QUAL", columns[10], &QUAL_PATTERN)?,
        };

        if fields.seq != "*" && fields.qual != "*" && fields.seq.len() != fields.qual.len() {
            return Err(Error::malformed(
                "SAM QUAL",
                &fields.qual,
                format!("the SEQ length {}", fields.seq.len()),
            ));
        }

        if shape == AlignmentShape::CompositedDgeFeatureCounts {
            parse_composite_id(&fields.qname)?;
        }
        Ok(fields)
    }
}

fn checked(field: &str, value: &str, re: &Regex) -> Result<String> {
    if !re.is_match(value) {
        return Err(Error::malformed(format!("SAM {}", field), value, re.as_str()));
    }
    Ok(value.to_string())
}

/// Integer within the SAM range of the column, reported as a failed conversion to `target`
fn ranged(field: &str, value: &str, min: i64, max: i64, target: &str) -> Result<i64> {
    let n: i64 = parse_number(field, value, target)?;
    if n < min || n > max {
        return Err(Error::conversion(field, value, target));
    }
    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const LINE: [&str; 11] = [
        "NB501:42:HX:4:11401:10000:2000:AAAAAACCCCCCCCCC",
        "0",
        "chr1",
        "100",
        "255",
        "4M",
        "*",
        "0",
        "0",
        "ACGT",
        "IIII",
    ];

    fn with(index: usize, value: &'static str) -> Vec<&'static str> {
        let mut cols = LINE.to_vec();
        cols[index] = value;
        cols
    }

    #[test]
    fn standard_line() {
        let m = MandatoryFields::parse(&LINE, AlignmentShape::Standard).unwrap();
        assert_eq!(m.rname, "chr1");
        assert_eq!(m.pos, 100);
        assert_eq!(m.mapq, 255);
    }

    #[rstest]
    #[case(1, "65535", true)]
    #[case(1, "65536", false)]
    #[case(1, "-1", false)]
    #[case(3, "2147483647", true)]
    #[case(3, "2147483648", false)]
    #[case(4, "256", false)]
    #[case(7, "2147483648", false)]
    #[case(8, "-2147483647", true)]
    #[case(8, "-2147483648", false)]
    #[case(8, "2147483647", true)]
    #[case(1, "one", false)]
    fn numeric_ranges(#[case] index: usize, #[case] value: &'static str, #[case] ok: bool) {
        let cols = with(index, value);
        assert_eq!(MandatoryFields::parse(&cols, AlignmentShape::Standard).is_ok(), ok);
    }

    #[rstest]
    #[case(1, "65536", "u16")]
    #[case(3, "2147483648", "u32")]
    #[case(4, "256", "u8")]
    #[case(8, "-2147483648", "i32")]
    fn out_of_range_names_target_type(
        #[case] index: usize,
        #[case] value: &'static str,
        #[case] target: &str,
    ) {
        let err =
            MandatoryFields::parse(&with(index, value), AlignmentShape::Standard).unwrap_err();
        match err {
            Error::Conversion { target: t, value: v, .. } => {
                assert_eq!(t, target);
                assert_eq!(v, value);
            }
            other => panic!("expected a conversion error, got {:?}", other),
        }
    }

    #[test]
    fn seq_and_qual_lengths() {
        assert!(MandatoryFields::parse(&with(10, "III"), AlignmentShape::Standard).is_err());
        assert!(MandatoryFields::parse(&with(10, "*"), AlignmentShape::Standard).is_ok());
    }

    #[test]
    fn string_grammar() {
        assert!(MandatoryFields::parse(&with(5, "4Q"), AlignmentShape::Standard).is_err());
        assert!(MandatoryFields::parse(&with(2, "=x"), AlignmentShape::Standard).is_err());
    }

    #[test]
    fn composite_qname_shape() {
        let shape = AlignmentShape::CompositedDgeFeatureCounts;
        assert!(MandatoryFields::parse(&LINE, shape).is_ok());
        assert!(MandatoryFields::parse(&with(0, "read1"), shape).is_err());
        assert!(MandatoryFields::parse(&with(0, "read1"), AlignmentShape::Standard).is_ok());
    }

    #[test]
    fn too_few_columns() {
        assert!(MandatoryFields::parse(&LINE[..10], AlignmentShape::Standard).is_err());
    }
}
