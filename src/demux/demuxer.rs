use std::fmt;
use std::io::Write;

use rustc_hash::FxHashMap;

use crate::demux::output::{DemuxRecord, GroupOutput};
use crate::fileformat::WellBarcodeTable;
use crate::runtime::{Error, Result};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DemuxStats {
    pub grouped: u64,
    pub ungrouped: u64,
    /// Records dropped because they could not be decoded
    pub skipped: u64,
    /// Buffer flushes triggered by a full buffer
    pub capacity_flushes: u64,
}

impl fmt::Display for DemuxStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Number of grouped FASTQ sequences: {};  Number of un-grouped FASTQ sequences: {}",
            self.grouped, self.ungrouped
        )
    }
}

struct Group<T, W: Write> {
    buffer: Vec<T>,
    output: GroupOutput<W>,
    written: u64,
}

///////////////////////////////
/// Routes records to per-well buffers by looking up their group id in the barcode table.
/// A full buffer is written out before the next record is stored; capacity 0 never
/// triggers a write before `write_sequences`
pub struct Demuxer<T: DemuxRecord, W: Write> {
    table: WellBarcodeTable,
    groups: FxHashMap<String, Group<T, W>>,
    capacity: usize,
    flush_stream: bool,
    stats: DemuxStats,
}

impl<T: DemuxRecord, W: Write> Demuxer<T, W> {
    ///////////////////////////////
    /// Every well of the table gets its output opened now, whether or not it receives records
    pub fn new<F>(
        table: WellBarcodeTable,
        capacity: usize,
        flush_stream: bool,
        mut open: F,
    ) -> Result<Self>
    where
        F: FnMut(&str) -> Result<GroupOutput<W>>,
    {
        let mut groups = FxHashMap::default();
        for well in table.wells() {
            let output = open(well)?;
            groups.insert(
                well.clone(),
                Group {
                    buffer: Vec::new(),
                    output,
                    written: 0,
                },
            );
        }
        log::debug!("Opened outputs for {} wells", groups.len());
        Ok(Demuxer {
            table,
            groups,
            capacity,
            flush_stream,
            stats: DemuxStats::default(),
        })
    }

    ///////////////////////////////
    /// Store a record in its well's buffer. Returns false if its group id is not in the table
    pub fn add_sequence(&mut self, rec: T) -> Result<bool> {
        let well = match self.table.well_of(rec.group_id()) {
            Some(well) => well,
            None => {
                self.stats.ungrouped += 1;
                return Ok(false);
            }
        };
        let group = self
            .groups
            .get_mut(well)
            .ok_or_else(|| Error::invalid_config(format!("no output opened for well {}", well)))?;

        if self.capacity > 0 && group.buffer.len() >= self.capacity {
            write_group(well, group, self.flush_stream)?;
            self.stats.capacity_flushes += 1;
        }
        group.buffer.push(rec);
        self.stats.grouped += 1;
        Ok(true)
    }

    ///////////////////////////////
    /// Write buffered records. With `flush_all` every non-empty buffer is written,
    /// otherwise only buffers that reached capacity
    pub fn write_sequences(&mut self, flush_all: bool) -> Result<()> {
        for well in self.table.wells() {
            let Some(group) = self.groups.get_mut(well) else {
                continue;
            };
            let full = self.capacity > 0 && group.buffer.len() >= self.capacity;
            if flush_all || full {
                write_group(well, group, self.flush_stream)?;
            }
            if flush_all {
                group
                    .output
                    .flush()
                    .map_err(|e| Error::io(format!("output for well {}", well), e))?;
            }
        }
        Ok(())
    }

    pub fn note_skipped(&mut self) {
        self.stats.skipped += 1;
    }

    pub fn stats(&self) -> DemuxStats {
        self.stats
    }

    pub fn buffered(&self, well: &str) -> usize {
        self.groups.get(well).map(|g| g.buffer.len()).unwrap_or(0)
    }

    pub fn written(&self, well: &str) -> u64 {
        self.groups.get(well).map(|g| g.written).unwrap_or(0)
    }

    ///////////////////////////////
    /// Write everything still buffered and hand back the outputs, keyed by well
    pub fn finish(mut self) -> Result<(DemuxStats, FxHashMap<String, GroupOutput<W>>)> {
        self.write_sequences(true)?;
        let outputs = self
            .groups
            .into_iter()
            .map(|(well, g)| (well, g.output))
            .collect();
        Ok((self.stats, outputs))
    }
}

fn write_group<T: DemuxRecord, W: Write>(
    well: &str,
    group: &mut Group<T, W>,
    flush_stream: bool,
) -> Result<()> {
    for rec in group.buffer.drain(..) {
        rec.write_to(&mut group.output)
            .map_err(|e| Error::io(format!("output for well {}", well), e))?;
        group.written += 1;
    }
    if flush_stream {
        group
            .output
            .flush()
            .map_err(|e| Error::io(format!("output for well {}", well), e))?;
    }
    Ok(())
}
