use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::fileformat::fastq::{FastqRecord, PairedSequence};
use crate::runtime::Result;
use crate::utils::create_buffered;

///////////////////////////////
/// Where one well's records go: a single stream, or one stream per read of a pair
#[derive(Debug)]
pub enum GroupOutput<W: Write> {
    Single(W),
    Paired { r1: W, r2: W },
}

impl<W: Write> GroupOutput<W> {
    pub fn flush(&mut self) -> std::io::Result<()> {
        match self {
            GroupOutput::Single(w) => w.flush(),
            GroupOutput::Paired { r1, r2 } => {
                r1.flush()?;
                r2.flush()
            }
        }
    }
}

///////////////////////////////
/// Anything the demuxer can route by group id
pub trait DemuxRecord {
    fn group_id(&self) -> &str;
    fn write_to<W: Write>(&self, out: &mut GroupOutput<W>) -> std::io::Result<()>;
}

fn wrong_output(what: &str) -> std::io::Error {
    std::io::Error::new(
        std::io::ErrorKind::InvalidInput,
        format!("{} cannot be written to this kind of group output", what),
    )
}

impl DemuxRecord for FastqRecord {
    fn group_id(&self) -> &str {
        &self.group_id
    }

    fn write_to<W: Write>(&self, out: &mut GroupOutput<W>) -> std::io::Result<()> {
        match out {
            GroupOutput::Single(w) => FastqRecord::write_to(self, w),
            GroupOutput::Paired { .. } => Err(wrong_output("a single FASTQ record")),
        }
    }
}

impl DemuxRecord for PairedSequence {
    fn group_id(&self) -> &str {
        &self.group_id
    }

    fn write_to<W: Write>(&self, out: &mut GroupOutput<W>) -> std::io::Result<()> {
        match out {
            GroupOutput::Paired { r1, r2 } => {
                self.first.write_to(r1)?;
                self.second.write_to(r2)
            }
            GroupOutput::Single(_) => Err(wrong_output("a FASTQ pair")),
        }
    }
}

///////////////////////////////
/// Output file names: `<main>.<well>.fastq`, or `<main>.R1.<well>.fastq` and
/// `<main>.R2.<well>.fastq` for pairs, inside the output directory
#[derive(Clone, Debug)]
pub struct OutputNaming {
    pub dir: PathBuf,
    pub main_name: String,
    pub paired: bool,
}

impl OutputNaming {
    pub fn new<P: AsRef<Path>, S: Into<String>>(dir: P, main_name: S, paired: bool) -> Self {
        OutputNaming {
            dir: dir.as_ref().to_path_buf(),
            main_name: main_name.into(),
            paired,
        }
    }

    pub fn single_path(&self, well: &str) -> PathBuf {
        self.dir.join(format!("{}.{}.fastq", self.main_name, well))
    }

    pub fn paired_paths(&self, well: &str) -> (PathBuf, PathBuf) {
        (
            self.dir.join(format!("{}.R1.{}.fastq", self.main_name, well)),
            self.dir.join(format!("{}.R2.{}.fastq", self.main_name, well)),
        )
    }

    ///////////////////////////////
    /// Create the file(s) for one well
    pub fn open(&self, well: &str) -> Result<GroupOutput<BufWriter<File>>> {
        if self.paired {
            let (p1, p2) = self.paired_paths(well);
            Ok(GroupOutput::Paired {
                r1: create_buffered(p1)?,
                r2: create_buffered(p2)?,
            })
        } else {
            Ok(GroupOutput::Single(create_buffered(self.single_path(well))?))
        }
    }
}
