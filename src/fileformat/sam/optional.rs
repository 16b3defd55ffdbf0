use crate::fileformat::sam::constants::*;
use crate::fileformat::sam::options::SamParseOptions;
use crate::runtime::{Error, Result};
use crate::utils::parse_number;

pub const NUMBER_OF_TARGET_FEATURES_TAG: &str = "XN";
pub const TARGET_FEATURES_TAG: &str = "XT";
pub const ASSIGNMENT_STATUS_TAG: &str = "XS";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypedValue {
    pub tag: String,
    pub type_code: char,
    pub value: String,
}

///////////////////////////////
/// One optional alignment column. `parsed` is None when the field was not selected for parsing
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionalField {
    pub raw: String,
    pub parsed: Option<TypedValue>,
}

impl OptionalField {
    pub fn unparsed(raw: &str) -> OptionalField {
        OptionalField {
            raw: raw.to_string(),
            parsed: None,
        }
    }

    ///////////////////////////////
    /// Split `TAG:TYPE:VALUE` on its first two colons; the value may contain further colons
    pub fn parse(raw: &str, check_attribs: bool) -> Result<OptionalField> {
        let mut parts = raw.splitn(3, ':');
        let (tag, type_str, value) = match (parts.next(), parts.next(), parts.next()) {
            (Some(t), Some(y), Some(v)) if !t.is_empty() && !y.is_empty() => (t, y, v),
            _ => {
                return Err(Error::malformed(
                    "SAM optional field",
                    raw,
                    "TAG:TYPE:VALUE",
                ))
            }
        };

        let mut type_chars = type_str.chars();
        let type_code = match (type_chars.next(), type_chars.next()) {
            (Some(c), None) => c,
            _ => {
                return Err(Error::malformed(
                    "SAM optional field type",
                    type_str,
                    "a single type character",
                ))
            }
        };

        if check_attribs {
            check_grammar(tag, type_code, value)?;
        }

        Ok(OptionalField {
            raw: raw.to_string(),
            parsed: Some(TypedValue {
                tag: tag.to_string(),
                type_code,
                value: value.to_string(),
            }),
        })
    }
}

fn check_grammar(tag: &str, type_code: char, value: &str) -> Result<()> {
    if !OPT_TAG_PATTERN.is_match(tag) {
        return Err(Error::malformed(
            "SAM optional field tag",
            tag,
            OPT_TAG_PATTERN.as_str(),
        ));
    }
    let type_str = type_code.to_string();
    if !OPT_TYPE_PATTERN.is_match(&type_str) {
        return Err(Error::malformed(
            "SAM optional field type",
            type_str,
            OPT_TYPE_PATTERN.as_str(),
        ));
    }
    if let Some(expected) = standard_optional_type(tag) {
        let compatible = expected == type_code
            || (is_integer_type(expected) && is_integer_type(type_code));
        if !compatible {
            return Err(Error::malformed(
                format!("SAM optional field {} type", tag),
                type_str,
                format!("the standard type '{}'", expected),
            ));
        }
    }
    if let Some(re) = optional_value_pattern(type_code) {
        if !re.is_match(value) {
            return Err(Error::malformed(
                format!("SAM optional field {} value", tag),
                value,
                re.as_str(),
            ));
        }
    }
    Ok(())
}

///////////////////////////////
/// Optional columns of one alignment line, in input order
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OptionalFields {
    pub fields: Vec<OptionalField>,
}

impl OptionalFields {
    pub fn parse(columns: &[&str], opts: &SamParseOptions) -> Result<OptionalFields> {
        let fields = columns
            .iter()
            .map(|raw| {
                if opts.wants_optional_field(raw) {
                    OptionalField::parse(raw, opts.parse_opt_align_fields_attribs)
                } else {
                    Ok(OptionalField::unparsed(raw))
                }
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(OptionalFields { fields })
    }

    pub fn get(&self, tag: &str) -> Option<&TypedValue> {
        self.fields
            .iter()
            .filter_map(|f| f.parsed.as_ref())
            .find(|v| v.tag == tag)
    }

    pub fn value(&self, tag: &str) -> Option<&str> {
        self.get(tag).map(|v| v.value.as_str())
    }

    ///////////////////////////////
    /// Number of features the read was assigned to, from XN
    pub fn number_of_target_features(&self) -> Result<Option<u64>> {
        match self.value(NUMBER_OF_TARGET_FEATURES_TAG) {
            Some(v) => Ok(Some(parse_number("XN target feature count", v, "u64")?)),
            None => Ok(None),
        }
    }

    ///////////////////////////////
    /// Features the read was assigned to, from the comma-separated XT
    pub fn target_features(&self) -> Option<Vec<&str>> {
        self.value(TARGET_FEATURES_TAG)
            .map(|v| v.split(',').collect())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_on_first_two_colons() {
        let f = OptionalField::parse("XT:Z:a:b", false).unwrap();
        let v = f.parsed.unwrap();
        assert_eq!(v.tag, "XT");
        assert_eq!(v.type_code, 'Z');
        assert_eq!(v.value, "a:b");
        assert!(OptionalField::parse("XT:Z", false).is_err());
        assert!(OptionalField::parse("XT::v", false).is_err());
    }

    #[test]
    fn attribute_checks() {
        assert!(OptionalField::parse("NM:i:3", true).is_ok());
        assert!(OptionalField::parse("NM:Z:3", true).is_err());
        assert!(OptionalField::parse("NM:C:3", true).is_ok());
        assert!(OptionalField::parse("NM:i:x", true).is_err());
        assert!(OptionalField::parse("1M:i:3", true).is_err());
        assert!(OptionalField::parse("XQ:Q:3", true).is_err());
        assert!(OptionalField::parse("NM:i:x", false).is_ok());
    }

    #[test]
    fn preferred_fields_only() {
        let opts = SamParseOptions::default().with_preferred_tags(["XN", "XT"]);
        let cols = ["NM:i:0", "XS:Z:Assigned", "XN:i:1", "XT:Z:GeneA,GeneB"];
        let f = OptionalFields::parse(&cols, &opts).unwrap();
        assert_eq!(f.len(), 4);
        assert_eq!(f.value("NM"), None);
        assert_eq!(f.number_of_target_features().unwrap(), Some(1));
        assert_eq!(f.target_features().unwrap(), vec!["GeneA", "GeneB"]);
    }

    #[test]
    fn unparsable_target_feature_count() {
        let opts = SamParseOptions {
            use_preferred_tags: false,
            ..Default::default()
        };
        let f = OptionalFields::parse(&["XN:i:many"], &opts).unwrap();
        assert!(f.number_of_target_features().is_err());
    }
}
