/// Download name of the PIC document.
pub const PIC_FILENAME: &str = "PIC.png";
/// Download name of the SAF document, whichever SAF template was used.
pub const SAF_FILENAME: &str = "SAF.png";

/// The two PNG documents produced on submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportBundle {
    /// PIC document.
    pub pic: Vec<u8>,
    /// SAF document.
    pub saf: Vec<u8>,
}

impl ExportBundle {
    /// `(filename, bytes)` pairs in download order.
    pub fn files(&self) -> [(&'static str, &[u8]); 2] {
        [
            (PIC_FILENAME, self.pic.as_slice()),
            (SAF_FILENAME, self.saf.as_slice()),
        ]
    }
}
