use std::io::BufRead;

use crate::fileformat::fastq::sequence::FastqLines;
use crate::runtime::{Error, Result};
use crate::utils::{LineEnding, LineReader};

///////////////////////////////
/// Reads raw 4-line FASTQ records. Decoding is left to the caller so a bad record
/// can be skipped without losing the stream position
pub struct FastqReader<R: BufRead> {
    lines: LineReader<R>,
    records_read: u64,
}

impl<R: BufRead> FastqReader<R> {
    pub fn new(inner: R, ending: LineEnding) -> Self {
        FastqReader {
            lines: LineReader::new(inner, ending),
            records_read: 0,
        }
    }

    ///////////////////////////////
    /// Next record, or None at end of input. A truncated record is an error
    pub fn read_record(&mut self) -> Result<Option<FastqLines>> {
        let mut rec = FastqLines::default();
        let fields = [&mut rec.id, &mut rec.seq, &mut rec.option, &mut rec.qual];
        for (i, field) in fields.into_iter().enumerate() {
            let got = self
                .lines
                .read_line(field)
                .map_err(|e| Error::io("FASTQ input", e))?;
            if !got {
                if i == 0 {
                    return Ok(None);
                }
                return Err(Error::malformed(
                    "FASTQ record",
                    format!("{} line(s) at end of input", i),
                    "4 lines per record",
                ));
            }
        }
        self.records_read += 1;
        Ok(Some(rec))
    }

    ///////////////////////////////
    /// Read up to `batch_size` records. An empty batch means end of input
    pub fn read_batch(&mut self, batch_size: usize) -> Result<Vec<FastqLines>> {
        let mut batch = Vec::with_capacity(batch_size.min(4096));
        while batch.len() < batch_size {
            match self.read_record()? {
                Some(rec) => batch.push(rec),
                None => break,
            }
        }
        Ok(batch)
    }

    pub fn records_read(&self) -> u64 {
        self.records_read
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_RECORDS: &str = "@a\nAC\n+\nII\n@b\nGT\n+\nJJ\n";

    #[test]
    fn batches() {
        let mut reader = FastqReader::new(TWO_RECORDS.as_bytes(), LineEnding::Unix);
        let first = reader.read_batch(1).unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].id, "@a");
        let rest = reader.read_batch(10).unwrap();
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].qual, "JJ");
        assert!(reader.read_batch(10).unwrap().is_empty());
        assert_eq!(reader.records_read(), 2);
    }

    #[test]
    fn truncated_record() {
        let mut reader = FastqReader::new("@a\nAC\n+\n".as_bytes(), LineEnding::Unix);
        assert!(reader.read_record().is_err());
    }

    #[test]
    fn windows_endings() {
        let mut reader = FastqReader::new("@a\r\nAC\r\n+\r\nII\r\n".as_bytes(), LineEnding::Windows);
        let rec = reader.read_record().unwrap().unwrap();
        assert_eq!(rec, FastqLines::new("@a", "AC", "+", "II"));
    }
}
