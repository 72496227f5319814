//! # qrsymbol
//!
//! A Rust library for encoding text into QR Code symbols.
//!
//! `qrsymbol` turns a UTF-8 string into a square grid of dark and light modules that follows
//! the QR Code Model 2 standard. It supports versions 1 to 40 and all four error correction levels.
//! Text is always carried in 8-bit byte mode. A UTF-8 signature is added in front of any payload
//! that contains multi-byte characters.
//!
//! ## Features
//!
//! - Automatic selection of the smallest version that fits, or a caller-forced version.
//! - Reed-Solomon error correction with block interleaving.
//! - Automatic mask selection by penalty score, evaluated in parallel, or a caller-forced mask.
//! - Reference renderers for PNG/in-memory images (square, dot, rounded and blob styles), SVG and text.
//! - Safe Rust implementation with no unsafe code.
//!
//! ## Installation
//!
//! Add to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! qrsymbol = "0.1" # Replace with the latest version
//! ```
//!
//! ## Example
//!
//! Encode a string and inspect the grid:
//!
//! ```rust
//! use qrsymbol::{encode, QrCodeEcc};
//!
//! let qr = encode("HELLO WORLD", QrCodeEcc::Quartile).unwrap();
//! assert_eq!(qr.version().value(), 1);
//! assert_eq!(qr.module_count(), 21);
//! assert!(qr.is_dark(0, 0).unwrap());
//! ```
//!
//! Render it with rounded, merged modules:
//!
//! ```rust
//! use qrsymbol::helper::{to_image, ModuleStyle, RenderOptions};
//! use qrsymbol::{encode, QrCodeEcc};
//!
//! let qr = encode("https://example.com", QrCodeEcc::High).unwrap();
//! let options = RenderOptions { style: ModuleStyle::Blob, ..RenderOptions::default() };
//! let img = to_image(&qr, &options);
//! assert_eq!(img.width(), img.height());
//! ```
//!
//! ## Modules
//!
//! - [`qrcode`]: Core QR code encoding functionality.
//! - [`helper`]: Utilities for rendering QR codes in various formats.
//! - [`math`], [`rsblock`], [`segment`], [`penalty`]: the building blocks the encoder is made of.

pub mod error;
pub mod helper;
pub mod math;
mod matrix;
pub mod penalty;
pub mod qrcode;
pub mod rsblock;
pub mod segment;

pub use error::{QrError, Result};
pub use qrcode::{format_bits, version_bits, EncodeOptions, Mask, QrCode, QrCodeEcc, Version};

/// Encodes `text` at the given error correction level.
///
/// Shorthand for [`QrCode::encode_text`].
///
/// # Errors
///
/// Returns [`QrError::DataTooLong`] if the UTF-8 payload does not fit in a version 40 symbol.
pub fn encode(text: &str, ecl: QrCodeEcc) -> Result<QrCode> {
    QrCode::encode_text(text, ecl)
}
