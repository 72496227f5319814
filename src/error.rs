//! Error type shared by the encoder and the symbol accessors.

use thiserror::Error;

use crate::qrcode::QrCodeEcc;

/// Errors that can occur while encoding text or querying a finished symbol.
///
/// None of these are transient: encoding is a pure function of its input, so
/// retrying with the same arguments always fails the same way.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QrError {
    /// The payload does not fit in any allowed version at the requested level.
    ///
    /// Ways to handle this: lower the error correction level, drop a forced
    /// version, or shorten the text.
    #[error("data too long: {length} bytes, max capacity = {capacity} bytes at level {ecl:?}")]
    DataTooLong {
        /// Payload length in bytes, including any UTF-8 signature prefix.
        length: usize,
        /// Largest byte capacity that was considered.
        capacity: usize,
        /// The requested error correction level.
        ecl: QrCodeEcc,
    },

    /// The serialized data stream outgrew the chosen version's data codewords.
    ///
    /// Version selection rules this out, so seeing it indicates a defect.
    #[error("code length overflow: {used_bits} bits > {capacity_bits} bits")]
    CapacityExceeded {
        /// Bits required by mode indicators, length fields and payloads.
        used_bits: usize,
        /// Bits available in the data codewords.
        capacity_bits: usize,
    },

    /// A module coordinate lies outside `[0, size)`.
    #[error("module ({row}, {col}) is outside a {size}x{size} symbol")]
    OutOfRange {
        /// Requested row.
        row: i32,
        /// Requested column.
        col: i32,
        /// Symbol width in modules.
        size: i32,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, QrError>;
