use std::fmt;

use itertools::Itertools;
use regex::Regex;
use rustc_hash::FxHashSet;

use crate::fileformat::sam::constants::*;
use crate::fileformat::sam::options::SamParseOptions;
use crate::runtime::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HeaderRecordType {
    Hd,
    Sq,
    Rg,
    Pg,
    Co,
}

impl std::str::FromStr for HeaderRecordType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "@HD" => Ok(HeaderRecordType::Hd),
            "@SQ" => Ok(HeaderRecordType::Sq),
            "@RG" => Ok(HeaderRecordType::Rg),
            "@PG" => Ok(HeaderRecordType::Pg),
            "@CO" => Ok(HeaderRecordType::Co),
            _ => Err(Error::malformed(
                "SAM header record type",
                s,
                "one of @HD, @SQ, @RG, @PG, @CO",
            )),
        }
    }
}

impl fmt::Display for HeaderRecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HeaderRecordType::Hd => "@HD",
            HeaderRecordType::Sq => "@SQ",
            HeaderRecordType::Rg => "@RG",
            HeaderRecordType::Pg => "@PG",
            HeaderRecordType::Co => "@CO",
        };
        f.write_str(s)
    }
}

impl HeaderRecordType {
    pub fn mandatory_tags(&self) -> &'static [&'static str] {
        match self {
            HeaderRecordType::Hd => &["VN"],
            HeaderRecordType::Sq => &["SN", "LN"],
            HeaderRecordType::Rg => &["ID"],
            HeaderRecordType::Pg => &["ID"],
            HeaderRecordType::Co => &[],
        }
    }

    pub fn optional_tags(&self) -> &'static [&'static str] {
        match self {
            HeaderRecordType::Hd => &["SO", "GO"],
            HeaderRecordType::Sq => &["AH", "AN", "AS", "M5", "SP", "UR"],
            HeaderRecordType::Rg => &[
                "CN", "DS", "DT", "FO", "KS", "LB", "PG", "PI", "PL", "PM", "PU", "SM",
            ],
            HeaderRecordType::Pg => &["PN", "CL", "PP", "DS", "VN"],
            HeaderRecordType::Co => &[],
        }
    }

    /// Grammar of a tag's value within this record type, if it has one
    pub fn value_pattern(&self, tag: &str) -> Option<&'static Regex> {
        let re: &'static Regex = match (self, tag) {
            (HeaderRecordType::Hd, "VN") => &*HD_VN_PATTERN,
            (HeaderRecordType::Sq, "SN") => &*SQ_SN_PATTERN,
            (HeaderRecordType::Sq, "AN") => &*SQ_AN_PATTERN,
            (HeaderRecordType::Sq, "M5") => &*SQ_M5_PATTERN,
            (HeaderRecordType::Rg, "FO") => &*RG_FO_PATTERN,
            (HeaderRecordType::Rg, "PL") => &*RG_PL_PATTERN,
            _ => return None,
        };
        Some(re)
    }
}

///////////////////////////////
/// One `TAG:VALUE` field of a header data line
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderField {
    pub tag: String,
    pub value: String,
}

impl HeaderField {
    pub fn parse(raw: &str) -> Result<HeaderField> {
        match raw.split_once(':') {
            Some((tag, value)) if !tag.is_empty() && !value.is_empty() => Ok(HeaderField {
                tag: tag.to_string(),
                value: value.to_string(),
            }),
            _ => Err(Error::malformed(
                "SAM header field",
                raw,
                "TAG:VALUE with non-empty tag and value",
            )),
        }
    }
}

///////////////////////////////
/// An @HD, @SQ, @RG or @PG line
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderDataLine {
    pub raw: String,
    pub record_type: Option<HeaderRecordType>,
    pub fields: Vec<HeaderField>,
}

impl HeaderDataLine {
    pub fn parse(raw: String, opts: &SamParseOptions) -> Result<HeaderDataLine> {
        let mut line = HeaderDataLine {
            raw,
            record_type: None,
            fields: Vec::new(),
        };
        if !opts.parse_header_line {
            return Ok(line);
        }

        let mut parts = line.raw.split('\t');
        let record_type: HeaderRecordType = parts.next().unwrap_or_default().parse()?;
        if record_type == HeaderRecordType::Co {
            return Err(Error::malformed(
                "SAM header data line",
                &line.raw,
                "a record type other than @CO",
            ));
        }
        let raw_fields: Vec<&str> = parts.collect();
        if raw_fields.is_empty() {
            return Err(Error::malformed(
                "SAM header data line",
                &line.raw,
                "at least one TAB-separated TAG:VALUE field",
            ));
        }

        if opts.parse_header_fields {
            let fields = raw_fields
                .iter()
                .map(|f| HeaderField::parse(f))
                .collect::<Result<Vec<_>>>()?;
            check_tag_sets(record_type, &fields)?;
            if opts.parse_header_fields_attribs {
                for field in &fields {
                    check_field_grammar(record_type, field)?;
                }
            }
            line.fields = fields;
        }
        line.record_type = Some(record_type);
        Ok(line)
    }

    pub fn value(&self, tag: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.tag == tag)
            .map(|f| f.value.as_str())
    }
}

///////////////////////////////
/// Mandatory tags must all be present, every other tag must be optional for the record type,
/// and no tag may repeat
fn check_tag_sets(record_type: HeaderRecordType, fields: &[HeaderField]) -> Result<()> {
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    for field in fields {
        let tag = field.tag.as_str();
        let known = record_type.mandatory_tags().contains(&tag)
            || record_type.optional_tags().contains(&tag);
        if !known {
            return Err(Error::malformed(
                format!("{} header tag", record_type),
                tag,
                format!(
                    "one of {}",
                    record_type
                        .mandatory_tags()
                        .iter()
                        .chain(record_type.optional_tags())
                        .join(", ")
                ),
            ));
        }
        if !seen.insert(tag) {
            return Err(Error::malformed(
                format!("{} header tag", record_type),
                tag,
                "a tag that appears once per line",
            ));
        }
    }
    for tag in record_type.mandatory_tags() {
        if !seen.contains(tag) {
            return Err(Error::malformed(
                format!("{} header line", record_type),
                fields.iter().map(|f| f.tag.as_str()).join(","),
                format!(
                    "mandatory tags {}",
                    record_type.mandatory_tags().iter().join(", ")
                ),
            ));
        }
    }
    Ok(())
}

fn check_field_grammar(record_type: HeaderRecordType, field: &HeaderField) -> Result<()> {
    if !HEADER_TAG_PATTERN.is_match(&field.tag) {
        return Err(Error::malformed(
            "SAM header tag",
            &field.tag,
            HEADER_TAG_PATTERN.as_str(),
        ));
    }
    if let Some(re) = record_type.value_pattern(&field.tag) {
        if !re.is_match(&field.value) {
            return Err(Error::malformed(
                format!("{} {} value", record_type, field.tag),
                &field.value,
                re.as_str(),
            ));
        }
    }
    Ok(())
}

///////////////////////////////
/// An @CO line. The payload is everything after the record type, tabs included
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderCommentLine {
    pub raw: String,
    pub text: Option<String>,
}

impl HeaderCommentLine {
    pub fn parse(raw: String, opts: &SamParseOptions) -> Result<HeaderCommentLine> {
        if !opts.parse_header_line {
            return Ok(HeaderCommentLine { raw, text: None });
        }
        let mut parts = raw.split('\t');
        let record_type = parts.next().unwrap_or_default();
        if record_type != "@CO" {
            return Err(Error::malformed("SAM header comment line", &raw, "'@CO' record type"));
        }
        let text = parts.join("\t");
        Ok(HeaderCommentLine {
            text: Some(text),
            raw,
        })
    }
}
