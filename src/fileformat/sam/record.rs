use crate::fileformat::sam::alignment::AlignmentLine;
use crate::fileformat::sam::header::{HeaderCommentLine, HeaderDataLine};
use crate::fileformat::sam::options::SamParseOptions;
use crate::runtime::Result;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineKind {
    HeaderData,
    HeaderComment,
    Alignment,
}

impl LineKind {
    /// Prefix test: '@CO' is a comment, any other '@' line is header data
    pub fn of(line: &str) -> LineKind {
        if !line.starts_with('@') {
            LineKind::Alignment
        } else if line.starts_with("@CO") {
            LineKind::HeaderComment
        } else {
            LineKind::HeaderData
        }
    }
}

///////////////////////////////
/// Classifies lines of one SAM stream. With detection off, the prefix test stops
/// at the first alignment line and every later line is taken to be an alignment
#[derive(Clone, Debug)]
pub struct LineClassifier {
    detect: bool,
    in_alignment_section: bool,
}

impl LineClassifier {
    pub fn new(detect: bool) -> Self {
        LineClassifier {
            detect,
            in_alignment_section: false,
        }
    }

    pub fn classify(&mut self, line: &str) -> LineKind {
        if !self.detect && self.in_alignment_section {
            return LineKind::Alignment;
        }
        let kind = LineKind::of(line);
        if kind == LineKind::Alignment {
            self.in_alignment_section = true;
        }
        kind
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SamRecord {
    HeaderData(HeaderDataLine),
    HeaderComment(HeaderCommentLine),
    Alignment(AlignmentLine),
}

impl SamRecord {
    pub fn parse(raw: String, kind: LineKind, opts: &SamParseOptions) -> Result<SamRecord> {
        Ok(match kind {
            LineKind::HeaderData => SamRecord::HeaderData(HeaderDataLine::parse(raw, opts)?),
            LineKind::HeaderComment => {
                SamRecord::HeaderComment(HeaderCommentLine::parse(raw, opts)?)
            }
            LineKind::Alignment => SamRecord::Alignment(AlignmentLine::parse(raw, opts)?),
        })
    }

    pub fn kind(&self) -> LineKind {
        match self {
            SamRecord::HeaderData(_) => LineKind::HeaderData,
            SamRecord::HeaderComment(_) => LineKind::HeaderComment,
            SamRecord::Alignment(_) => LineKind::Alignment,
        }
    }

    pub fn raw(&self) -> &str {
        match self {
            SamRecord::HeaderData(l) => &l.raw,
            SamRecord::HeaderComment(l) => &l.raw,
            SamRecord::Alignment(l) => &l.raw,
        }
    }
}
