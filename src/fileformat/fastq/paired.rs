use crate::fileformat::fastq::sequence::{FastqRecord, SequenceFlavor};
use crate::runtime::{Error, Result};

///////////////////////////////
/// Two reads of one cluster. The group id is that of read 1
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PairedSequence {
    pub first: FastqRecord,
    pub second: FastqRecord,
    pub group_id: String,
}

impl PairedSequence {
    pub fn new(first: FastqRecord, second: FastqRecord) -> Result<PairedSequence> {
        check_pairing(&first, &second)?;
        Ok(PairedSequence {
            group_id: first.group_id.clone(),
            first,
            second,
        })
    }
}

///////////////////////////////
/// Plain reads pair when their identifier lines are identical;
/// Illumina-derived reads pair on a non-empty, identical identifier part 1
pub fn check_pairing(first: &FastqRecord, second: &FastqRecord) -> Result<()> {
    if first.flavor == SequenceFlavor::Plain && second.flavor == SequenceFlavor::Plain {
        if first.lines.id != second.lines.id {
            return Err(Error::malformed(
                "FASTQ pair",
                &second.lines.id,
                format!("the read 1 identifier '{}'", first.lines.id),
            ));
        }
        return Ok(());
    }

    match (&first.id_part_1, &second.id_part_1) {
        (Some(a), Some(b)) if !a.is_empty() && a == b => Ok(()),
        (Some(a), Some(b)) => Err(Error::malformed(
            "FASTQ pair identifier part 1",
            b,
            format!("the non-empty read 1 identifier part 1 '{}'", a),
        )),
        _ => Err(Error::invalid_config(
            "pairing Illumina reads requires sequence identifier part 1 to be parsed",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fileformat::fastq::sequence::{FastqLines, FastqParseOptions};

    fn rec(id: &str, flavor: SequenceFlavor) -> FastqRecord {
        FastqRecord::decode(
            FastqLines::new(id, "AAAAAACCCCCCCCCCGG", "+", "IIIIIIIIIIIIIIIIII"),
            flavor,
            &FastqParseOptions::default(),
        )
        .unwrap()
    }

    #[test]
    fn plain_pairs_need_identical_ids() {
        let a = rec("@read1", SequenceFlavor::Plain);
        assert!(PairedSequence::new(a.clone(), a.clone()).is_ok());
        let b = rec("@read2", SequenceFlavor::Plain);
        assert!(PairedSequence::new(a, b).is_err());
    }

    #[test]
    fn illumina_pairs_compare_part_1() {
        let a = rec("@I:1:F:1:1:1:1 1:N:0:ACGT", SequenceFlavor::DgeIllumina);
        let b = rec("@I:1:F:1:1:1:1 2:N:0:ACGT", SequenceFlavor::Illumina);
        let p = PairedSequence::new(a, b).unwrap();
        assert_eq!(p.group_id, "AAAAAA");

        let a = rec("@I:1:F:1:1:1:1 1:N:0:ACGT", SequenceFlavor::DgeIllumina);
        let c = rec("@I:1:F:1:1:1:2 2:N:0:ACGT", SequenceFlavor::Illumina);
        assert!(PairedSequence::new(a, c).is_err());
    }

    #[test]
    fn unparsed_part_1_cannot_pair() {
        let opts = FastqParseOptions {
            parse_id_level_1: false,
            ..Default::default()
        };
        let r = FastqRecord::decode(
            FastqLines::new("@I 1", "A", "+", "I"),
            SequenceFlavor::Illumina,
            &opts,
        )
        .unwrap();
        let err = PairedSequence::new(r.clone(), r).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { .. }));
    }
}
