use std::io::Write;

use crate::fileformat::sam::mandatory::{MandatoryFields, MANDATORY_COLUMNS};
use crate::fileformat::sam::optional::OptionalFields;
use crate::fileformat::sam::options::SamParseOptions;
use crate::runtime::{Error, Result};

///////////////////////////////
/// One alignment line. The raw text is kept and written back unchanged
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlignmentLine {
    pub raw: String,
    /// QNAME column, when the line was split
    pub qname: Option<String>,
    pub mandatory: Option<MandatoryFields>,
    pub optional: OptionalFields,
}

impl AlignmentLine {
    pub fn parse(raw: String, opts: &SamParseOptions) -> Result<AlignmentLine> {
        let mut line = AlignmentLine {
            raw,
            qname: None,
            mandatory: None,
            optional: OptionalFields::default(),
        };
        if !opts.parse_align_line {
            return Ok(line);
        }

        let columns: Vec<&str> = line.raw.split('\t').collect();
        if columns.len() < MANDATORY_COLUMNS {
            return Err(Error::malformed(
                "SAM alignment line",
                &line.raw,
                "at least 11 TAB-separated columns",
            ));
        }
        let qname = columns[0].to_string();
        let mandatory = if opts.parse_mand_align_fields {
            Some(MandatoryFields::parse(&columns[..MANDATORY_COLUMNS], opts.shape)?)
        } else {
            None
        };
        let optional = if opts.parse_opt_align_fields {
            OptionalFields::parse(&columns[MANDATORY_COLUMNS..], opts)?
        } else {
            OptionalFields::default()
        };

        line.qname = Some(qname);
        line.mandatory = mandatory;
        line.optional = optional;
        Ok(line)
    }

    pub fn write_to<W: Write>(&self, w: &mut W) -> std::io::Result<()> {
        writeln!(w, "{}", self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAW: &str = "I:1:F:1:1:1:1:AAAAAACCCCCCCCCC\t0\tchr1\t1\t255\t4M\t*\t0\t0\tACGT\tIIII\tXS:Z:Assigned\tXN:i:1\tXT:Z:GeneA";

    #[test]
    fn default_depth() {
        let opts = SamParseOptions::default().with_preferred_tags(["XS", "XN", "XT"]);
        let line = AlignmentLine::parse(RAW.to_string(), &opts).unwrap();
        assert_eq!(line.qname.as_deref(), Some("I:1:F:1:1:1:1:AAAAAACCCCCCCCCC"));
        assert!(line.mandatory.is_none());
        assert_eq!(line.optional.value("XT"), Some("GeneA"));
    }

    #[test]
    fn deep_parse() {
        let opts = SamParseOptions {
            parse_mand_align_fields: true,
            use_preferred_tags: false,
            parse_opt_align_fields_attribs: true,
            ..Default::default()
        };
        let line = AlignmentLine::parse(RAW.to_string(), &opts).unwrap();
        assert_eq!(line.mandatory.unwrap().cigar, "4M");
        assert_eq!(line.optional.len(), 3);
    }

    #[test]
    fn raw_is_written_back() {
        let opts = SamParseOptions::default();
        let line = AlignmentLine::parse(RAW.to_string(), &opts).unwrap();
        let mut out = Vec::new();
        line.write_to(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), format!("{}\n", RAW));
    }

    #[test]
    fn too_few_columns() {
        let opts = SamParseOptions::default();
        assert!(AlignmentLine::parse("a\tb\tc".to_string(), &opts).is_err());
        let unparsed = SamParseOptions {
            parse_align_line: false,
            parse_opt_align_fields: false,
            ..Default::default()
        };
        assert!(AlignmentLine::parse("a\tb\tc".to_string(), &unparsed).is_ok());
    }
}
