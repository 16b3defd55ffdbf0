use std::io::Write;

use itertools::Itertools;

use crate::fileformat::fastq::parse_composite_id;
use crate::fileformat::sam::{AlignmentLine, HeaderCommentLine, HeaderDataLine};
use crate::runtime::{Error, Result};
use crate::umi::counter::{AlignmentCounter, Verdict};

///////////////////////////////
/// Describes every line to its sink instead of passing lines through
pub struct InfoPrinter<W: Write> {
    out: W,
}

impl<W: Write> InfoPrinter<W> {
    pub fn new(out: W) -> Self {
        InfoPrinter { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn print(&mut self, text: String) -> Result<Verdict> {
        writeln!(self.out, "{}", text).map_err(|e| Error::io("info printer output", e))?;
        Ok(Verdict {
            emit: false,
            aux: true,
        })
    }
}

impl<W: Write> AlignmentCounter for InfoPrinter<W> {
    fn header_data_aux_name(&self) -> &str {
        "described"
    }

    fn header_comment_aux_name(&self) -> &str {
        "described"
    }

    fn alignment_aux_name(&self) -> &str {
        "described"
    }

    fn count_header_data_line(&mut self, line: &HeaderDataLine) -> Result<Verdict> {
        let text = match line.record_type {
            Some(t) => format!(
                "Header data line: record type {}; fields: {}",
                t,
                line.fields
                    .iter()
                    .map(|f| format!("{}={}", f.tag, f.value))
                    .join(", ")
            ),
            None => format!("Header data line: {}", line.raw),
        };
        self.print(text)
    }

    fn count_header_comment_line(&mut self, line: &HeaderCommentLine) -> Result<Verdict> {
        let text = match &line.text {
            Some(t) => format!("Header comment line: {}", t),
            None => format!("Header comment line: {}", line.raw),
        };
        self.print(text)
    }

    fn count_alignment_line(&mut self, line: &AlignmentLine) -> Result<Verdict> {
        let mut text = format!("Alignment line: QNAME {}", line.qname.as_deref().unwrap_or("?"));
        if let Some(m) = &line.mandatory {
            text.push_str(&format!(
                "; FLAG {}; RNAME {}; POS {}; MAPQ {}; CIGAR {}; RNEXT {}; PNEXT {}; TLEN {}",
                m.flag, m.rname, m.pos, m.mapq, m.cigar, m.rnext, m.pnext, m.tlen
            ));
        }
        if !line.optional.is_empty() {
            text.push_str("; optional fields: ");
            text.push_str(&line.optional.fields.iter().map(|f| f.raw.as_str()).join(" "));
        }
        match line.qname.as_deref().map(parse_composite_id) {
            Some(Ok((p, b))) => text.push_str(&format!(
                "; instrument {}; run {}; flowcell {}; lane {}; tile {}; x {}; y {}; well {}; UMI {}",
                p.instrument, p.run, p.flowcell, p.lane, p.tile, p.x, p.y, b.well, b.umi
            )),
            _ => text.push_str("; QNAME is not a composite DGE identifier"),
        }
        self.print(text)
    }
}
