use crate::runtime::{Error, Result};

pub const WELL_BARCODE_LENGTH: usize = 6;
pub const UMI_BARCODE_LENGTH: usize = 10;
pub const DGE_BARCODE_LENGTH: usize = WELL_BARCODE_LENGTH + UMI_BARCODE_LENGTH;

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct DgeBarcode {
    pub well: String,
    pub umi: String,
}

impl DgeBarcode {
    /// Well followed by UMI, as embedded in read 1 and in composite identifiers
    pub fn joined(&self) -> String {
        format!("{}{}", self.well, self.umi)
    }

    pub fn split(barcode: &str) -> Result<DgeBarcode> {
        if barcode.len() != DGE_BARCODE_LENGTH || !barcode.is_char_boundary(WELL_BARCODE_LENGTH) {
            return Err(Error::malformed(
                "DGE barcode",
                barcode,
                format!("exactly {} characters", DGE_BARCODE_LENGTH),
            ));
        }
        Ok(DgeBarcode {
            well: barcode[..WELL_BARCODE_LENGTH].to_string(),
            umi: barcode[WELL_BARCODE_LENGTH..].to_string(),
        })
    }
}

///////////////////////////////
/// Well barcode is [0,6) and UMI is [6,16) of the sequence line
pub fn extract_barcode(seq: &str) -> Result<DgeBarcode> {
    if seq.len() < DGE_BARCODE_LENGTH || !seq.is_char_boundary(DGE_BARCODE_LENGTH) {
        return Err(Error::malformed(
            "DGE sequence line",
            seq,
            format!("at least {} bases of well and UMI barcode", DGE_BARCODE_LENGTH),
        ));
    }
    DgeBarcode::split(&seq[..DGE_BARCODE_LENGTH])
}
