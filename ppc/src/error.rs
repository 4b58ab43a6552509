/// Error denotes configuration errors in bit ranges and encoding forms.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Invalid bit range [{msb}, {lsb}]: indices must satisfy 0 <= msb <= lsb <= 31")]
    InvalidBitRange { msb: u8, lsb: u8 },

    #[error("Overlapping bit ranges [{0}] and [{1}]")]
    OverlappingRanges(String, String),

    #[error("Unknown encoding form: {0}")]
    UnknownForm(String),
}
