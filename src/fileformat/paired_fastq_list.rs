use std::io::Read;
use std::path::{Path, PathBuf};

use crate::runtime::{Error, Result};
use crate::utils::{open_buffered, LineEnding};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FastqPathPair {
    pub r1: PathBuf,
    pub r2: PathBuf,
}

///////////////////////////////
/// Read a TSV of read 1 and read 2 paths. The column count is taken from the first row
pub fn read_paired_fastq_list(
    src: impl Read,
    has_header: bool,
    ending: LineEnding,
) -> Result<Vec<FastqPathPair>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(has_header)
        .terminator(ending.csv_terminator())
        .from_reader(src);

    if has_header {
        let header = reader
            .headers()
            .map_err(|e| Error::malformed("paired FASTQ list header", e.to_string(), "TSV"))?;
        if header.len() != 2 {
            return Err(Error::malformed(
                "paired FASTQ list header",
                header.iter().collect::<Vec<_>>().join("\t"),
                "2 columns",
            ));
        }
    }

    let mut pairs = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| {
            Error::malformed("paired FASTQ list row", e.to_string(), "2 TAB-separated paths")
        })?;
        if record.len() != 2 {
            return Err(Error::malformed(
                "paired FASTQ list row",
                record.iter().collect::<Vec<_>>().join("\t"),
                "2 TAB-separated paths",
            ));
        }
        pairs.push(FastqPathPair {
            r1: PathBuf::from(&record[0]),
            r2: PathBuf::from(&record[1]),
        });
    }
    Ok(pairs)
}

pub fn read_paired_fastq_list_file<P: AsRef<Path>>(
    path: P,
    has_header: bool,
    ending: LineEnding,
) -> Result<Vec<FastqPathPair>> {
    let path = path.as_ref();
    let src = open_buffered(path)?;
    read_paired_fastq_list(src, has_header, ending)
        .map_err(|e| Error::file_not_valid(path, Some(e.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_header() {
        let text = "r1\tr2\na_R1.fastq\ta_R2.fastq\nb_R1.fastq\tb_R2.fastq\n";
        let pairs = read_paired_fastq_list(text.as_bytes(), true, LineEnding::Unix).unwrap();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[1].r2, PathBuf::from("b_R2.fastq"));
    }

    #[test]
    fn without_header() {
        let text = "a_R1.fastq\ta_R2.fastq\n";
        let pairs = read_paired_fastq_list(text.as_bytes(), false, LineEnding::Unix).unwrap();
        assert_eq!(pairs[0].r1, PathBuf::from("a_R1.fastq"));
    }

    #[test]
    fn three_columns() {
        let text = "r1\tr2\tr3\na\tb\tc\n";
        assert!(read_paired_fastq_list(text.as_bytes(), true, LineEnding::Unix).is_err());
        let text = "a\tb\tc\n";
        assert!(read_paired_fastq_list(text.as_bytes(), false, LineEnding::Unix).is_err());
    }
}
