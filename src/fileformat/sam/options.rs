use rustc_hash::FxHashSet;

use crate::runtime::{Error, Result};

///////////////////////////////
/// Which columns an alignment line is expected to carry beyond the SAM standard
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AlignmentShape {
    #[default]
    Standard,
    /// QNAME is a composite DGE identifier and featureCounts tags (XS, XN, XT) may follow
    CompositedDgeFeatureCounts,
}

///////////////////////////////
/// Validation depths for SAM lines. Each depth requires the one before it
#[derive(Clone, Debug)]
pub struct SamParseOptions {
    /// Split header lines into record type and fields
    pub parse_header_line: bool,
    /// Split header fields into TAG:VALUE and check the record type's tag sets
    pub parse_header_fields: bool,
    /// Check header tags and values against their grammar
    pub parse_header_fields_attribs: bool,
    /// Split alignment lines into columns
    pub parse_align_line: bool,
    /// Convert and check the 11 mandatory columns
    pub parse_mand_align_fields: bool,
    /// Split optional columns into TAG:TYPE:VALUE
    pub parse_opt_align_fields: bool,
    /// Check optional tags, types and values against their grammar
    pub parse_opt_align_fields_attribs: bool,
    /// Only parse optional fields whose tag is in `preferred_tags`
    pub use_preferred_tags: bool,
    pub preferred_tags: FxHashSet<String>,
    pub shape: AlignmentShape,
}

impl Default for SamParseOptions {
    fn default() -> Self {
        SamParseOptions {
            parse_header_line: false,
            parse_header_fields: false,
            parse_header_fields_attribs: false,
            parse_align_line: true,
            parse_mand_align_fields: false,
            parse_opt_align_fields: true,
            parse_opt_align_fields_attribs: false,
            use_preferred_tags: true,
            preferred_tags: FxHashSet::default(),
            shape: AlignmentShape::Standard,
        }
    }
}

impl SamParseOptions {
    pub fn with_preferred_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.preferred_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn validate(&self) -> Result<()> {
        let order = [
            (
                self.parse_header_fields && !self.parse_header_line,
                "parsing header fields requires parsing header lines",
            ),
            (
                self.parse_header_fields_attribs && !self.parse_header_fields,
                "checking header field tags and values requires parsing header fields",
            ),
            (
                self.parse_mand_align_fields && !self.parse_align_line,
                "parsing mandatory alignment fields requires parsing alignment lines",
            ),
            (
                self.parse_opt_align_fields && !self.parse_align_line,
                "parsing optional alignment fields requires parsing alignment lines",
            ),
            (
                self.parse_opt_align_fields_attribs && !self.parse_opt_align_fields,
                "checking optional field tags, types and values requires parsing optional fields",
            ),
        ];
        for (violated, msg) in order {
            if violated {
                return Err(Error::invalid_config(msg));
            }
        }
        Ok(())
    }

    ///////////////////////////////
    /// Should the optional field with this raw text be parsed
    pub fn wants_optional_field(&self, raw: &str) -> bool {
        if !self.use_preferred_tags {
            return true;
        }
        self.preferred_tags.iter().any(|tag| raw.starts_with(tag.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_consistent() {
        assert!(SamParseOptions::default().validate().is_ok());
    }

    #[test]
    fn depth_order() {
        let opts = SamParseOptions {
            parse_header_fields_attribs: true,
            parse_header_line: true,
            ..Default::default()
        };
        assert!(matches!(opts.validate(), Err(Error::InvalidConfig { .. })));

        let opts = SamParseOptions {
            parse_align_line: false,
            ..Default::default()
        };
        assert!(opts.validate().is_err());
    }

    #[test]
    fn preferred_tags() {
        let opts = SamParseOptions::default().with_preferred_tags(["XN", "XT"]);
        assert!(opts.wants_optional_field("XN:i:1"));
        assert!(!opts.wants_optional_field("NM:i:0"));
        let opts = SamParseOptions {
            use_preferred_tags: false,
            ..opts
        };
        assert!(opts.wants_optional_field("NM:i:0"));
    }
}
