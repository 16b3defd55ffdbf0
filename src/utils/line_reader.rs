use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter};
use std::path::Path;

use crate::runtime::{Error, Result};

///////////////////////////////
/// Line delimiter convention of a text file
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LineEnding {
    /// `\n`
    #[default]
    Unix,
    /// `\r\n`
    Windows,
    /// `\r`
    Macintosh,
}

impl std::str::FromStr for LineEnding {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "unix" => Ok(LineEnding::Unix),
            "windows" => Ok(LineEnding::Windows),
            "macintosh" | "mac" => Ok(LineEnding::Macintosh),
            _ => Err(format!(
                "Invalid line ending '{}', expected unix, windows or macintosh",
                s
            )),
        }
    }
}

impl LineEnding {
    /// Byte that ends a line when reading
    pub fn delimiter(&self) -> u8 {
        match self {
            LineEnding::Unix | LineEnding::Windows => b'\n',
            LineEnding::Macintosh => b'\r',
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Unix => "\n",
            LineEnding::Windows => "\r\n",
            LineEnding::Macintosh => "\r",
        }
    }

    pub fn csv_terminator(&self) -> csv::Terminator {
        match self {
            LineEnding::Windows => csv::Terminator::CRLF,
            _ => csv::Terminator::Any(self.delimiter()),
        }
    }
}

///////////////////////////////
/// Reads delimiter-terminated lines, stripping the delimiter
pub struct LineReader<R: BufRead> {
    inner: R,
    ending: LineEnding,
    buf: Vec<u8>,
    lines_read: u64,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(inner: R, ending: LineEnding) -> Self {
        LineReader {
            inner,
            ending,
            buf: Vec::new(),
            lines_read: 0,
        }
    }

    ///////////////////////////////
    /// Read the next line into `line`, replacing its content. Returns false at end of input.
    /// A line that is not valid UTF-8 is consumed and reported as `InvalidData`
    pub fn read_line(&mut self, line: &mut String) -> std::io::Result<bool> {
        self.buf.clear();
        let n = self.inner.read_until(self.ending.delimiter(), &mut self.buf)?;
        if n == 0 {
            return Ok(false);
        }
        if self.buf.last() == Some(&self.ending.delimiter()) {
            self.buf.pop();
        }
        if self.ending == LineEnding::Windows && self.buf.last() == Some(&b'\r') {
            self.buf.pop();
        }
        line.clear();
        self.lines_read += 1;
        let text = std::str::from_utf8(&self.buf).map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("line {} is not valid UTF-8: {}", self.lines_read, e),
            )
        })?;
        line.push_str(text);
        Ok(true)
    }

    pub fn lines_read(&self) -> u64 {
        self.lines_read
    }
}

///////////////////////////////
/// Open a file for buffered reading
pub fn open_buffered<P: AsRef<Path>>(path: P) -> Result<BufReader<File>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::file_not_found(path));
    }
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    Ok(BufReader::new(file))
}

///////////////////////////////
/// Create (truncate) a file for buffered writing
pub fn create_buffered<P: AsRef<Path>>(path: P) -> Result<BufWriter<File>> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| Error::io(path, e))?;
    Ok(BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_lines(text: &str, ending: LineEnding) -> Vec<String> {
        let mut reader = LineReader::new(text.as_bytes(), ending);
        let mut out = Vec::new();
        let mut line = String::new();
        while reader.read_line(&mut line).unwrap() {
            out.push(line.clone());
        }
        out
    }

    #[test]
    fn unix_lines() {
        assert_eq!(all_lines("a\nb\n", LineEnding::Unix), vec!["a", "b"]);
        assert_eq!(all_lines("a\nb", LineEnding::Unix), vec!["a", "b"]);
    }

    #[test]
    fn windows_lines() {
        assert_eq!(all_lines("a\r\nb\r\n", LineEnding::Windows), vec!["a", "b"]);
    }

    #[test]
    fn macintosh_lines() {
        assert_eq!(all_lines("a\rb\r", LineEnding::Macintosh), vec!["a", "b"]);
    }

    #[test]
    fn invalid_utf8_is_reported_and_consumed() {
        let bytes: &[u8] = b"a\n\xFFb\nc\n";
        let mut reader = LineReader::new(bytes, LineEnding::Unix);
        let mut line = String::new();
        assert!(reader.read_line(&mut line).unwrap());
        assert_eq!(line, "a");
        let err = reader.read_line(&mut line).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
        assert!(line.is_empty());
        assert!(reader.read_line(&mut line).unwrap());
        assert_eq!(line, "c");
        assert_eq!(reader.lines_read(), 3);
    }

    #[test]
    fn parse_ending() {
        assert_eq!("windows".parse::<LineEnding>().unwrap(), LineEnding::Windows);
        assert!("dos".parse::<LineEnding>().is_err());
    }

    #[test]
    fn missing_file() {
        let err = open_buffered("/nonexistent/definitely/not/here.txt").unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }
}
