use std::sync::LazyLock;

use regex::Regex;

fn anchored(pattern: &str) -> Regex {
    // Patterns are literals below
    Regex::new(&format!("^(?:{})$", pattern)).expect("static SAM grammar pattern")
}

macro_rules! grammar {
    ($name:ident, $pattern:expr) => {
        pub static $name: LazyLock<Regex> = LazyLock::new(|| anchored($pattern));
    };
}

/////////////////////////////// Mandatory alignment columns
grammar!(QNAME_PATTERN, r"[!-?A-~]{1,254}");
grammar!(RNAME_PATTERN, r"\*|[!-()+-<>-~][!-~]*");
grammar!(CIGAR_PATTERN, r"\*|([0-9]+[MIDNSHPX=])+");
grammar!(RNEXT_PATTERN, r"\*|=|[!-()+-<>-~][!-~]*");
grammar!(SEQ_PATTERN, r"\*|[A-Za-z=.]+");
grammar!(QUAL_PATTERN, r"[!-~]+");

pub const FLAG_MAX: i64 = 65535;
pub const POS_MAX: i64 = 2147483647;
pub const MAPQ_MAX: i64 = 255;
pub const TLEN_MAX: i64 = 2147483647;

/////////////////////////////// Optional alignment fields
grammar!(OPT_TAG_PATTERN, r"[A-Za-z][A-Za-z0-9]");
grammar!(OPT_TYPE_PATTERN, r"[AcCsSiIfZHB]");
grammar!(OPT_VALUE_A_PATTERN, r"[!-~]");
grammar!(OPT_VALUE_I_PATTERN, r"[-+]?[0-9]+");
grammar!(OPT_VALUE_F_PATTERN, r"[-+]?[0-9]*\.?[0-9]+([eE][-+]?[0-9]+)?");
grammar!(OPT_VALUE_Z_PATTERN, r"[ !-~]*");
grammar!(OPT_VALUE_H_PATTERN, r"([0-9A-F][0-9A-F])*");
grammar!(
    OPT_VALUE_B_PATTERN,
    r"[cCsSiIf](,[-+]?[0-9]*\.?[0-9]+([eE][-+]?[0-9]+)?)*"
);

///////////////////////////////
/// Value grammar for an optional field type
pub fn optional_value_pattern(type_code: char) -> Option<&'static Regex> {
    let re: &'static Regex = match type_code {
        'A' => &*OPT_VALUE_A_PATTERN,
        'c' | 'C' | 's' | 'S' | 'i' | 'I' => &*OPT_VALUE_I_PATTERN,
        'f' => &*OPT_VALUE_F_PATTERN,
        'Z' => &*OPT_VALUE_Z_PATTERN,
        'H' => &*OPT_VALUE_H_PATTERN,
        'B' => &*OPT_VALUE_B_PATTERN,
        _ => return None,
    };
    Some(re)
}

pub fn is_integer_type(type_code: char) -> bool {
    matches!(type_code, 'c' | 'C' | 's' | 'S' | 'i' | 'I')
}

///////////////////////////////
/// Predefined optional tags and their types. Tags starting with X, Y or Z are free for local use
pub static STANDARD_OPTIONAL_TAGS: &[(&str, char)] = &[
    ("AM", 'i'), ("AS", 'i'), ("BC", 'Z'), ("BQ", 'Z'), ("BZ", 'Z'), ("CB", 'Z'),
    ("CC", 'Z'), ("CG", 'B'), ("CM", 'i'), ("CO", 'Z'), ("CP", 'i'), ("CQ", 'Z'),
    ("CR", 'Z'), ("CS", 'Z'), ("CT", 'Z'), ("CY", 'Z'), ("E2", 'Z'), ("FI", 'i'),
    ("FS", 'Z'), ("FZ", 'B'), ("H0", 'i'), ("H1", 'i'), ("H2", 'i'), ("HI", 'i'),
    ("IH", 'i'), ("LB", 'Z'), ("MC", 'Z'), ("MD", 'Z'), ("MI", 'Z'), ("ML", 'B'),
    ("MM", 'Z'), ("MN", 'i'), ("MQ", 'i'), ("NH", 'i'), ("NM", 'i'), ("OA", 'Z'),
    ("OC", 'Z'), ("OP", 'i'), ("OQ", 'Z'), ("OX", 'Z'), ("PG", 'Z'), ("PQ", 'i'),
    ("PT", 'Z'), ("PU", 'Z'), ("Q2", 'Z'), ("QT", 'Z'), ("QX", 'Z'), ("R2", 'Z'),
    ("RG", 'Z'), ("RX", 'Z'), ("SA", 'Z'), ("SM", 'i'), ("TC", 'i'), ("TS", 'A'),
    ("U2", 'Z'), ("UQ", 'i'),
];

pub fn standard_optional_type(tag: &str) -> Option<char> {
    STANDARD_OPTIONAL_TAGS
        .iter()
        .find(|(t, _)| *t == tag)
        .map(|(_, c)| *c)
}

/////////////////////////////// Header
grammar!(HEADER_TAG_PATTERN, r"[A-Za-z][A-Za-z0-9]");
grammar!(HD_VN_PATTERN, r"[0-9]+\.[0-9]+");
grammar!(SQ_SN_PATTERN, r"[!-)+-<>-~][!-~]*");
grammar!(
    SQ_AN_PATTERN,
    r"[0-9A-Za-z][0-9A-Za-z\*+\.@ |\-]*(,[0-9A-Za-z][0-9A-Za-z\*+\.@ |\-]*)*"
);
grammar!(SQ_M5_PATTERN, r"[\*0-9A-F]{32}");
grammar!(RG_FO_PATTERN, r"\*|[ACMGRSVTWYHKDBN]+");
grammar!(
    RG_PL_PATTERN,
    r"CAPILLARY|LS454|ILLUMINA|SOLID|HELICOS|IONTORRENT|ONT|PACBIO"
);
