use std::io::Read;
use std::path::Path;

use rustc_hash::FxHashMap;

use crate::runtime::{Error, Result};
use crate::utils::{open_buffered, LineEnding};

#[derive(Debug, serde::Deserialize, Eq, PartialEq)]
struct WellBarcodeRow {
    #[allow(dead_code)]
    plate: String,
    well: String,
    barcode: String,
}

///////////////////////////////
/// Barcode to well lookup, read once from a headerless TSV of plate, well and barcode
#[derive(Clone, Debug, Default)]
pub struct WellBarcodeTable {
    barcode_to_well: FxHashMap<String, String>,
    /// Distinct wells, in table order
    wells: Vec<String>,
}

impl WellBarcodeTable {
    pub fn from_path<P: AsRef<Path>>(path: P, ending: LineEnding) -> Result<WellBarcodeTable> {
        let path = path.as_ref();
        let src = open_buffered(path)?;
        WellBarcodeTable::read(src, ending)
            .map_err(|e| Error::file_not_valid(path, Some(e.to_string())))
    }

    ///////////////////////////////
    /// Read the table. A repeated barcode is an error
    pub fn read(src: impl Read, ending: LineEnding) -> Result<WellBarcodeTable> {
        let mut table = WellBarcodeTable::default();
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .terminator(ending.csv_terminator())
            .from_reader(src);

        for (i, result) in reader.records().enumerate() {
            let record = result
                .map_err(|e| Error::malformed("well barcode table", e.to_string(), "TSV rows"))?;
            if record.len() != 3 {
                return Err(Error::malformed(
                    format!("well barcode table row {}", i + 1),
                    record.iter().collect::<Vec<_>>().join("\t"),
                    "3 columns: plate, well, barcode",
                ));
            }
            let row: WellBarcodeRow = record
                .deserialize(None)
                .map_err(|e| Error::malformed("well barcode table row", e.to_string(), "3 text columns"))?;
            table.insert(row.well, row.barcode)?;
        }

        if table.is_empty() {
            log::warn!("Warning: empty well barcode table");
        }
        Ok(table)
    }

    ///////////////////////////////
    /// Build from (well, barcode) pairs. A repeated barcode is an error, as when reading
    pub fn from_pairs<I, S>(pairs: I) -> Result<WellBarcodeTable>
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        let mut table = WellBarcodeTable::default();
        for (well, barcode) in pairs {
            table.insert(well.into(), barcode.into())?;
        }
        Ok(table)
    }

    pub fn insert(&mut self, well: String, barcode: String) -> Result<()> {
        if let Some(existing) = self.barcode_to_well.get(&barcode) {
            return Err(Error::malformed(
                "well barcode table",
                barcode.as_str(),
                format!("a barcode listed once (already assigned to well {})", existing),
            ));
        }
        if !self.wells.contains(&well) {
            self.wells.push(well.clone());
        }
        self.barcode_to_well.insert(barcode, well);
        Ok(())
    }

    pub fn well_of(&self, barcode: &str) -> Option<&str> {
        self.barcode_to_well.get(barcode).map(String::as_str)
    }

    pub fn wells(&self) -> &[String] {
        &self.wells
    }

    pub fn len(&self) -> usize {
        self.barcode_to_well.len()
    }

    pub fn is_empty(&self) -> bool {
        self.barcode_to_well.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_table() {
        let text = "P1\t1\tAAAAAA\nP1\t2\tCCCCCC\nP1\t2\tCCCCCA\n";
        let t = WellBarcodeTable::read(text.as_bytes(), LineEnding::Unix).unwrap();
        assert_eq!(t.len(), 3);
        assert_eq!(t.well_of("CCCCCA"), Some("2"));
        assert_eq!(t.well_of("GGGGGG"), None);
        assert_eq!(t.wells(), &["1".to_string(), "2".to_string()]);
    }

    #[test]
    fn windows_table() {
        let text = "P1\t1\tAAAAAA\r\nP1\t2\tCCCCCC\r\n";
        let t = WellBarcodeTable::read(text.as_bytes(), LineEnding::Windows).unwrap();
        assert_eq!(t.well_of("CCCCCC"), Some("2"));
    }

    #[test]
    fn duplicate_barcode_is_fatal() {
        let text = "P1\t1\tAAAAAA\nP1\t2\tAAAAAA\n";
        assert!(WellBarcodeTable::read(text.as_bytes(), LineEnding::Unix).is_err());
    }

    #[test]
    fn pairs_reject_duplicates() {
        let t = WellBarcodeTable::from_pairs([("1", "AAAAAA"), ("2", "CCCCCC")]).unwrap();
        assert_eq!(t.well_of("AAAAAA"), Some("1"));
        assert!(WellBarcodeTable::from_pairs([("1", "AAAAAA"), ("2", "AAAAAA")]).is_err());
    }

    #[test]
    fn wrong_column_count() {
        let text = "P1\t1\n";
        assert!(WellBarcodeTable::read(text.as_bytes(), LineEnding::Unix).is_err());
    }
}
