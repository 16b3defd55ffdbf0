use crate::fileformat::sam::{AlignmentLine, HeaderCommentLine, HeaderDataLine};
use crate::runtime::Result;

///////////////////////////////
/// Decision for one line: write it to the output, and whether it matched the
/// counter's auxiliary category (only used for statistics)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Verdict {
    pub emit: bool,
    pub aux: bool,
}

impl Verdict {
    pub fn accept() -> Self {
        Verdict {
            emit: true,
            aux: false,
        }
    }

    pub fn reject() -> Self {
        Verdict {
            emit: false,
            aux: false,
        }
    }
}

///////////////////////////////
/// Policy deciding which SAM lines the pipe writes. Every line is accepted unless overridden
pub trait AlignmentCounter {
    /// Names of the auxiliary category of each line kind in the pipe statistics
    fn header_data_aux_name(&self) -> &str {
        "auxiliary"
    }

    fn header_comment_aux_name(&self) -> &str {
        "auxiliary"
    }

    fn alignment_aux_name(&self) -> &str {
        "auxiliary"
    }

    fn count_header_data_line(&mut self, _line: &HeaderDataLine) -> Result<Verdict> {
        Ok(Verdict::accept())
    }

    fn count_header_comment_line(&mut self, _line: &HeaderCommentLine) -> Result<Verdict> {
        Ok(Verdict::accept())
    }

    fn count_alignment_line(&mut self, _line: &AlignmentLine) -> Result<Verdict> {
        Ok(Verdict::accept())
    }
}

/// Passes every line through
#[derive(Clone, Copy, Debug, Default)]
pub struct AcceptAll;

impl AlignmentCounter for AcceptAll {}
