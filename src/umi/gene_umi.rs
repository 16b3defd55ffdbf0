use rustc_hash::FxHashSet;

use crate::fileformat::fastq::parse_composite_id;
use crate::fileformat::sam::{
    AlignmentLine, SamParseOptions, ASSIGNMENT_STATUS_TAG, NUMBER_OF_TARGET_FEATURES_TAG,
    TARGET_FEATURES_TAG,
};
use crate::runtime::{Error, Result};
use crate::umi::counter::{AlignmentCounter, Verdict};

pub const GENE_UMI_PREFERRED_TAGS: [&str; 3] = [
    ASSIGNMENT_STATUS_TAG,
    NUMBER_OF_TARGET_FEATURES_TAG,
    TARGET_FEATURES_TAG,
];

///////////////////////////////
/// Keeps the first alignment of every (gene, UMI) pair and rejects the rest.
/// Only alignments assigned to exactly one feature are considered; the UMI is
/// decoded from the composite QNAME
#[derive(Debug, Default)]
pub struct GeneUmiCounter {
    seen: FxHashSet<String>,
}

impl GeneUmiCounter {
    pub fn new() -> Self {
        GeneUmiCounter::default()
    }

    ///////////////////////////////
    /// Parse options with the featureCounts tags preferred
    pub fn parse_options() -> SamParseOptions {
        SamParseOptions::default().with_preferred_tags(GENE_UMI_PREFERRED_TAGS)
    }

    ///////////////////////////////
    /// The counter reads XN and XT, so those must be parsed
    pub fn check_options(opts: &SamParseOptions) -> Result<()> {
        if !opts.parse_align_line || !opts.parse_opt_align_fields {
            return Err(Error::invalid_config(
                "gene/UMI counting requires parsing alignment lines and their optional fields",
            ));
        }
        if opts.use_preferred_tags {
            for tag in [NUMBER_OF_TARGET_FEATURES_TAG, TARGET_FEATURES_TAG] {
                if !opts.preferred_tags.contains(tag) {
                    return Err(Error::invalid_config(format!(
                        "gene/UMI counting requires the {} tag to be preferred",
                        tag
                    )));
                }
            }
        }
        Ok(())
    }

    /// Number of distinct (gene, UMI) pairs kept so far
    pub fn unique_count(&self) -> usize {
        self.seen.len()
    }
}

impl AlignmentCounter for GeneUmiCounter {
    fn alignment_aux_name(&self) -> &str {
        "uniquely aligned"
    }

    fn count_alignment_line(&mut self, line: &AlignmentLine) -> Result<Verdict> {
        let n_features = line.optional.number_of_target_features()?;
        let gene = match (n_features, line.optional.target_features()) {
            (Some(1), Some(features)) => features[0].to_string(),
            _ => return Ok(Verdict::reject()),
        };

        let qname = line.qname.as_deref().ok_or_else(|| {
            Error::invalid_config("gene/UMI counting requires the QNAME column to be parsed")
        })?;
        let (_, barcode) = parse_composite_id(qname)?;

        let key = format!("{}{}", gene, barcode.umi);
        Ok(Verdict {
            emit: self.seen.insert(key),
            aux: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alignment(qname: &str, opt: &str) -> AlignmentLine {
        let raw = format!("{}\t0\tchr1\t1\t255\t4M\t*\t0\t0\tACGT\tIIII\t{}", qname, opt);
        AlignmentLine::parse(raw, &GeneUmiCounter::parse_options()).unwrap()
    }

    const Q1: &str = "I:1:F:1:1:1:1:AAAAAACCCCCCCCCC";
    const Q2: &str = "I:1:F:1:1:1:2:AAAAAACCCCCCCCCC";
    const Q3: &str = "I:1:F:1:1:1:3:AAAAAAGGGGGGGGGG";

    #[test]
    fn first_of_each_gene_umi_pair_is_kept() {
        let mut c = GeneUmiCounter::new();
        let gene_a = "XS:Z:Assigned\tXN:i:1\tXT:Z:GeneA";
        let gene_b = "XS:Z:Assigned\tXN:i:1\tXT:Z:GeneB";

        assert!(c.count_alignment_line(&alignment(Q1, gene_a)).unwrap().emit);
        // same UMI, same gene, different read
        assert!(!c.count_alignment_line(&alignment(Q2, gene_a)).unwrap().emit);
        assert!(c.count_alignment_line(&alignment(Q2, gene_b)).unwrap().emit);
        assert!(c.count_alignment_line(&alignment(Q3, gene_a)).unwrap().emit);
        assert_eq!(c.unique_count(), 3);
    }

    #[test]
    fn multi_feature_alignments_are_never_counted() {
        let mut c = GeneUmiCounter::new();
        let v = c
            .count_alignment_line(&alignment(Q1, "XS:Z:Assigned\tXN:i:2\tXT:Z:GeneA,GeneB"))
            .unwrap();
        assert_eq!(v, Verdict::reject());
        let v = c
            .count_alignment_line(&alignment(Q1, "XS:Z:Unassigned_NoFeatures\tXN:i:0"))
            .unwrap();
        assert_eq!(v, Verdict::reject());
        assert_eq!(c.unique_count(), 0);
    }

    #[test]
    fn qname_must_be_composite() {
        let mut c = GeneUmiCounter::new();
        assert!(c
            .count_alignment_line(&alignment("plain_read", "XN:i:1\tXT:Z:GeneA"))
            .is_err());
    }

    #[test]
    fn options_must_expose_feature_tags() {
        assert!(GeneUmiCounter::check_options(&GeneUmiCounter::parse_options()).is_ok());
        assert!(GeneUmiCounter::check_options(&SamParseOptions::default()).is_err());
        let opts = SamParseOptions {
            use_preferred_tags: false,
            ..Default::default()
        };
        assert!(GeneUmiCounter::check_options(&opts).is_ok());
    }
}
