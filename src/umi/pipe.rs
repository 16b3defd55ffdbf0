use std::fmt;
use std::io::{BufRead, ErrorKind, Write};

use crate::fileformat::sam::{LineClassifier, LineKind, SamParseOptions, SamRecord};
use crate::runtime::{Error, Result};
use crate::umi::counter::{AlignmentCounter, Verdict};
use crate::utils::LineReader;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CategoryStats {
    pub read: u64,
    pub aux: u64,
    pub written: u64,
}

impl CategoryStats {
    fn record(&mut self, verdict: Verdict) {
        if verdict.aux {
            self.aux += 1;
        }
        if verdict.emit {
            self.written += 1;
        }
    }
}

/// Counter-given names of the auxiliary categories
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuxNames {
    pub header_data: String,
    pub header_comment: String,
    pub alignment: String,
}

impl AuxNames {
    pub fn of<C: AlignmentCounter + ?Sized>(counter: &C) -> Self {
        AuxNames {
            header_data: counter.header_data_aux_name().to_string(),
            header_comment: counter.header_comment_aux_name().to_string(),
            alignment: counter.alignment_aux_name().to_string(),
        }
    }
}

///////////////////////////////
/// Line counts of one pipe run, per line kind
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PipeStats {
    pub aux_names: AuxNames,
    pub header_data: CategoryStats,
    pub header_comment: CategoryStats,
    pub alignment: CategoryStats,
    /// Lines that failed to decode, parse or count
    pub skipped: u64,
}

impl PipeStats {
    pub fn total_read(&self) -> u64 {
        self.header_data.read + self.header_comment.read + self.alignment.read
    }

    pub fn total_written(&self) -> u64 {
        self.header_data.written + self.header_comment.written + self.alignment.written
    }

    fn category_mut(&mut self, kind: LineKind) -> &mut CategoryStats {
        match kind {
            LineKind::HeaderData => &mut self.header_data,
            LineKind::HeaderComment => &mut self.header_comment,
            LineKind::Alignment => &mut self.alignment,
        }
    }
}

impl fmt::Display for PipeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let categories = [
            ("header data", &self.aux_names.header_data, &self.header_data),
            ("header comment", &self.aux_names.header_comment, &self.header_comment),
            ("sequence alignment", &self.aux_names.alignment, &self.alignment),
        ];
        for (name, aux_name, c) in categories {
            writeln!(f, "Read {} {} lines", c.read, name)?;
            writeln!(f, "Read {} {} {} lines", c.aux, aux_name, name)?;
            writeln!(f, "Write {} selected {} lines", c.written, name)?;
        }
        writeln!(f, "Read {} lines in total", self.total_read())?;
        write!(f, "Write {} selected lines in total", self.total_written())
    }
}

///////////////////////////////
/// Streams a SAM file through a counter, writing the lines it accepts
pub struct SamAlignmentPipe {
    pub opts: SamParseOptions,
    /// Prefix-test every line; when off, detection stops at the first alignment line
    pub detect: bool,
}

impl SamAlignmentPipe {
    pub fn new(opts: SamParseOptions) -> Result<Self> {
        opts.validate()?;
        Ok(SamAlignmentPipe { opts, detect: true })
    }

    ///////////////////////////////
    /// Run the pipe to end of input. Lines that are not UTF-8, fail to parse, or that the
    /// counter rejects with an error, are logged and skipped
    pub fn run<R, W, C>(
        &self,
        input: &mut LineReader<R>,
        output: &mut W,
        counter: &mut C,
    ) -> Result<PipeStats>
    where
        R: BufRead,
        W: Write,
        C: AlignmentCounter + ?Sized,
    {
        let mut stats = PipeStats {
            aux_names: AuxNames::of(counter),
            ..Default::default()
        };
        let mut classifier = LineClassifier::new(self.detect);
        let mut line = String::new();

        loop {
            match input.read_line(&mut line) {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) if e.kind() == ErrorKind::InvalidData => {
                    log::warn!("Runtime error: {}", e);
                    stats.skipped += 1;
                    continue;
                }
                Err(e) => return Err(Error::io("SAM input", e)),
            }
            let kind = classifier.classify(&line);
            stats.category_mut(kind).read += 1;

            let verdict = SamRecord::parse(std::mem::take(&mut line), kind, &self.opts)
                .and_then(|rec| Ok((count(counter, &rec)?, rec)));
            let (verdict, rec) = match verdict {
                Ok(v) => v,
                Err(e) => {
                    log::warn!(
                        "{}: line {}: {}",
                        e.category(),
                        input.lines_read(),
                        e
                    );
                    stats.skipped += 1;
                    continue;
                }
            };

            stats.category_mut(kind).record(verdict);
            if verdict.emit {
                writeln!(output, "{}", rec.raw()).map_err(|e| Error::io("SAM output", e))?;
            }
        }
        output.flush().map_err(|e| Error::io("SAM output", e))?;
        Ok(stats)
    }
}

fn count<C: AlignmentCounter + ?Sized>(counter: &mut C, rec: &SamRecord) -> Result<Verdict> {
    match rec {
        SamRecord::HeaderData(l) => counter.count_header_data_line(l),
        SamRecord::HeaderComment(l) => counter.count_header_comment_line(l),
        SamRecord::Alignment(l) => counter.count_alignment_line(l),
    }
}
