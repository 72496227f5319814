#![forbid(unsafe_code)]
//! QR code encoding functionality.
//!
//! This module holds the symbol encoder: version selection, codeword
//! construction with Reed-Solomon error correction, and mask selection over
//! freshly built candidate matrices. Text is always encoded in byte mode.
use log::{debug, trace};
use rayon::prelude::*;

use crate::error::{QrError, Result};
use crate::math::Polynomial;
use crate::matrix::ModuleMatrix;
use crate::penalty::{penalty_score, Penalty};
use crate::rsblock::{byte_capacity, num_raw_data_modules, rs_blocks, RsBlock};
use crate::segment::{BitBuffer, QrSegment};

/// A QR Code symbol, representing a square grid of dark and light modules.
///
/// Covers QR Code Model 2 versions 1 to 40 and all four error correction
/// levels. Instances are immutable after creation, so renderers may read
/// them freely.
///
/// # Example
///
/// ```rust
/// use qrsymbol::qrcode::{QrCode, QrCodeEcc};
///
/// let qr = QrCode::encode_text("Hello, World!", QrCodeEcc::Low).unwrap();
///
/// println!("Version: {}", qr.version().value());
/// assert!(qr.is_dark(0, 0).unwrap());
/// ```
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct QrCode {
    version: Version,

    ecl: QrCodeEcc,

    mask: Mask,

    /// The width and height of this QR Code, measured in modules, between
    /// 21 and 177 (inclusive). This is equal to version * 4 + 17.
    size: usize,

    /// The modules of this QR Code (false = light, true = dark), row-major.
    modules: Vec<bool>,
}

impl QrCode {
    /// Encodes a text string into a QR code at the given error correction level.
    ///
    /// The smallest version that holds the UTF-8 payload is chosen and the
    /// mask with the lowest penalty score is applied.
    ///
    /// # Errors
    ///
    /// Returns [`QrError::DataTooLong`] if the payload exceeds the version 40
    /// capacity at `ecl`.
    pub fn encode_text(text: &str, ecl: QrCodeEcc) -> Result<Self> {
        Self::encode_with_options(text, &EncodeOptions::new(ecl))
    }

    /// Encodes a text string with explicit options.
    ///
    /// A forced version skips selection but is still checked against the
    /// capacity table; a forced mask skips the penalty search.
    ///
    /// # Example
    ///
    /// ```rust
    /// use qrsymbol::qrcode::{EncodeOptions, Mask, QrCode, QrCodeEcc, Version};
    ///
    /// let options = EncodeOptions::new(QrCodeEcc::High)
    ///     .version(Version::new(5))
    ///     .mask(Mask::new(2));
    /// let qr = QrCode::encode_with_options("pinned", &options).unwrap();
    /// assert_eq!(qr.size(), 37);
    /// ```
    pub fn encode_with_options(text: &str, options: &EncodeOptions) -> Result<Self> {
        let ecl = options.ecl;
        let seg = QrSegment::make_bytes(text);
        let version = match options.version {
            Some(version) => {
                let capacity = byte_capacity(version, ecl);
                if seg.len() > capacity {
                    return Err(QrError::DataTooLong { length: seg.len(), capacity, ecl });
                }
                version
            }
            None => select_version(seg.len(), ecl)?,
        };
        debug!("encoding {} payload bytes at version {} level {:?}", seg.len(), version.value(), ecl);

        let codewords = encode_segments_to_codewords(std::slice::from_ref(&seg), version, ecl)?;
        let mask = match options.mask {
            Some(mask) => mask,
            None => best_mask(version, ecl, &codewords),
        };
        Ok(Self::encode_codewords(&codewords, ecl, version, mask))
    }

    /// Builds the final symbol from interleaved codewords with a fixed mask.
    ///
    /// # Panics
    ///
    /// Panics if `codewords` does not fill the version exactly.
    pub fn encode_codewords(codewords: &[u8], ecl: QrCodeEcc, version: Version, mask: Mask) -> Self {
        assert_eq!(codewords.len(), num_raw_data_modules(version) / 8, "Illegal argument");
        let matrix = ModuleMatrix::build(version, ecl, mask, codewords, false);
        let size = matrix.size();
        Self {
            version,
            ecl,
            mask,
            size,
            modules: matrix.into_modules(),
        }
    }

    /// Returns this QR Code's version, in the range [1, 40].
    pub fn version(&self) -> Version {
        self.version
    }

    /// Returns this QR Code's size, in the range [21, 177].
    pub fn size(&self) -> i32 {
        self.size as i32
    }

    /// Returns the number of modules per side; same value as [`size`](Self::size).
    pub fn module_count(&self) -> usize {
        self.size
    }

    /// Returns this QR Code's error correction level.
    pub fn error_correction_level(&self) -> QrCodeEcc {
        self.ecl
    }

    /// Returns this QR Code's mask, in the range [0, 7].
    pub fn mask(&self) -> Mask {
        self.mask
    }

    /// Returns whether the module at `(row, col)` is dark.
    ///
    /// # Errors
    ///
    /// Returns [`QrError::OutOfRange`] if either coordinate is outside `[0, size)`.
    pub fn is_dark(&self, row: i32, col: i32) -> Result<bool> {
        let range = 0..self.size();
        if !range.contains(&row) || !range.contains(&col) {
            return Err(QrError::OutOfRange { row, col, size: self.size() });
        }
        Ok(self.modules[row as usize * self.size + col as usize])
    }

    /// Returns the color of the module at the given coordinates.
    ///
    /// Returns `true` for dark modules and `false` for light modules. Coordinates outside the QR
    /// code's bounds return `false`, which lets renderers draw quiet zones without bounds checks.
    ///
    /// # Arguments
    ///
    /// * `x` - X-coordinate (0 is left).
    /// * `y` - Y-coordinate (0 is top).
    pub fn get_module(&self, x: i32, y: i32) -> bool {
        self.is_dark(y, x).unwrap_or(false)
    }

    /// The committed grid, row-major, `size * size` entries.
    pub fn modules(&self) -> &[bool] {
        &self.modules
    }
}

/// Options for [`QrCode::encode_with_options`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct EncodeOptions {
    /// Error correction level.
    pub ecl: QrCodeEcc,
    /// Forced version; `None` picks the smallest that fits.
    pub version: Option<Version>,
    /// Forced mask; `None` picks the lowest penalty.
    pub mask: Option<Mask>,
}

impl EncodeOptions {
    pub fn new(ecl: QrCodeEcc) -> Self {
        Self { ecl, version: None, mask: None }
    }

    pub fn version(mut self, version: Version) -> Self {
        self.version = Some(version);
        self
    }

    pub fn mask(mut self, mask: Mask) -> Self {
        self.mask = Some(mask);
        self
    }
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self::new(QrCodeEcc::Medium)
    }
}

/// Returns the smallest version whose byte capacity at `ecl` holds `length` bytes.
///
/// # Errors
///
/// Returns [`QrError::DataTooLong`] if not even version 40 is large enough.
pub fn select_version(length: usize, ecl: QrCodeEcc) -> Result<Version> {
    (Version::MIN.value()..=Version::MAX.value())
        .map(Version::new)
        .find(|&version| length <= byte_capacity(version, ecl))
        .ok_or(QrError::DataTooLong {
            length,
            capacity: byte_capacity(Version::MAX, ecl),
            ecl,
        })
}

/// Serializes segments into the final interleaved codeword sequence: data
/// codewords with terminator and padding, split into Reed-Solomon blocks,
/// then data and EC codewords interleaved column by column.
///
/// # Errors
///
/// Returns [`QrError::CapacityExceeded`] if the segments need more bits than
/// the version's data codewords hold.
pub fn encode_segments_to_codewords(
    segs: &[QrSegment],
    version: Version,
    ecl: QrCodeEcc,
) -> Result<Vec<u8>> {
    let blocks = rs_blocks(version, ecl);
    let datacapacitybits: usize = blocks.iter().map(|b| b.data_count).sum::<usize>() * 8;
    let datausedbits = QrSegment::get_total_bits(segs, version)
        .filter(|&n| n <= datacapacitybits)
        .ok_or_else(|| QrError::CapacityExceeded {
            used_bits: segs.iter().map(|s| 4 + s.bit_length()).sum::<usize>()
                + segs.len() * usize::from(QrSegment::num_char_count_bits(version)),
            capacity_bits: datacapacitybits,
        })?;

    // Concatenate all segments to create the data bit string
    let mut bb = BitBuffer::new();
    let ccbits = QrSegment::num_char_count_bits(version);
    for seg in segs {
        bb.append_bits(QrSegment::MODE_BITS, 4);
        bb.append_bits(seg.len() as u32, ccbits);
        seg.write(&mut bb);
    }
    debug_assert_eq!(bb.len(), datausedbits);

    // Add terminator and pad up to a byte if applicable
    if bb.len() + 4 <= datacapacitybits {
        bb.append_bits(0, 4);
    }
    while bb.len() % 8 != 0 {
        bb.append_bit(false);
    }

    // Pad with alternating bytes until data capacity is reached
    for &padbyte in [0xec, 0x11].iter().cycle() {
        if bb.len() >= datacapacitybits {
            break;
        }
        bb.append_bits(padbyte, 8);
    }

    Ok(add_ecc_and_interleave(bb.as_bytes(), &blocks))
}

/// Splits `data` into blocks, appends each block's EC codewords and
/// interleaves the result in the order the standard mandates.
fn add_ecc_and_interleave(data: &[u8], blocks: &[RsBlock]) -> Vec<u8> {
    let mut offset: usize = 0;
    let mut dcdata: Vec<&[u8]> = Vec::with_capacity(blocks.len());
    let mut ecdata: Vec<Vec<u8>> = Vec::with_capacity(blocks.len());
    let mut generator: Option<Polynomial> = None;
    for block in blocks {
        let dat = &data[offset..offset + block.data_count];
        offset += block.data_count;

        let eccount = block.ec_count();
        let rs = match generator.take() {
            Some(g) if g.len() == eccount + 1 => g,
            _ => Polynomial::error_correction(eccount),
        };
        let remainder = Polynomial::new(dat, eccount).modulo(&rs);
        let coefficients = remainder.coefficients();
        let mut ecc = vec![0u8; eccount];
        ecc[eccount - coefficients.len()..].copy_from_slice(coefficients);

        dcdata.push(dat);
        ecdata.push(ecc);
        generator = Some(rs);
    }
    debug_assert_eq!(offset, data.len());

    let total: usize = blocks.iter().map(|b| b.total_count).sum();
    let mut result = Vec::with_capacity(total);
    interleave(&dcdata, &mut result);
    interleave(&ecdata, &mut result);
    debug_assert_eq!(result.len(), total);
    result
}

/// Appends index 0 of every block, then index 1 of every block, and so on,
/// skipping blocks that are already exhausted.
fn interleave<T: AsRef<[u8]>>(blocks: &[T], out: &mut Vec<u8>) {
    let longest = blocks.iter().map(|b| b.as_ref().len()).max().unwrap_or(0);
    for i in 0..longest {
        out.extend(blocks.iter().filter_map(|b| b.as_ref().get(i)));
    }
}

/// Builds all eight candidate matrices in test mode and returns the mask with
/// the lowest penalty, the lower index winning ties.
fn best_mask(version: Version, ecl: QrCodeEcc, codewords: &[u8]) -> Mask {
    let scores: Vec<(Mask, Penalty)> = (0u8..8)
        .into_par_iter()
        .map(|i| {
            let mask = Mask::new(i);
            let matrix = ModuleMatrix::build(version, ecl, mask, codewords, true);
            let size = matrix.size();
            (mask, penalty_score(&matrix.into_modules(), size))
        })
        .collect();

    for (mask, penalty) in &scores {
        trace!("mask {} penalty {:?} total {}", mask.value(), penalty, penalty.total());
    }
    let (mask, penalty) = choose_mask(&scores).unwrap_or((Mask::new(0), Penalty::default()));
    debug!("committing mask {} with penalty {}", mask.value(), penalty.total());
    mask
}

/// Lowest total penalty wins; among equal totals the lower mask index wins.
fn choose_mask(scores: &[(Mask, Penalty)]) -> Option<(Mask, Penalty)> {
    scores
        .iter()
        .min_by_key(|(mask, penalty)| (penalty.total(), *mask))
        .copied()
}

/// Returns the 15-bit format information word for a level and mask: five
/// data bits, ten BCH bits, XORed with 0x5412.
pub fn format_bits(ecl: QrCodeEcc, mask: Mask) -> u32 {
    let data = u32::from((ecl.format_bits() << 3) | mask.value());
    let mut rem: u32 = data;
    for _ in 0..10 {
        rem = (rem << 1) ^ ((rem >> 9) * 0x537);
    }
    ((data << 10) | rem) ^ 0x5412
}

/// Returns the 18-bit version information word: six data bits and twelve
/// BCH bits. Only drawn for versions 7 and up.
pub fn version_bits(version: Version) -> u32 {
    let ver = u32::from(version.value());
    let mut rem: u32 = ver;
    for _ in 0..12 {
        rem = (rem << 1) ^ ((rem >> 11) * 0x1f25);
    }
    (ver << 12) | rem
}

/// Error correction level for a QR code.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum QrCodeEcc {
    /// Tolerates ~7% erroneous codewords.
    Low,
    /// Tolerates ~15% erroneous codewords.
    Medium,
    /// Tolerates ~25% erroneous codewords.
    Quartile,
    /// Tolerates ~30% erroneous codewords.
    High,
}

impl QrCodeEcc {
    /// Index into the per-level tables (L, M, Q, H order).
    pub(crate) fn ordinal(self) -> usize {
        use QrCodeEcc::*;
        match self {
            Low => 0,
            Medium => 1,
            Quartile => 2,
            High => 3,
        }
    }

    /// Returns the 2-bit value written into the format information.
    ///
    /// This is a protocol mapping (L=1, M=0, Q=3, H=2), not a strength order.
    pub fn format_bits(self) -> u8 {
        use QrCodeEcc::*;
        match self {
            Low => 1,
            Medium => 0,
            Quartile => 3,
            High => 2,
        }
    }
}

/// A QR code version (1–40).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Version(u8);

impl Version {
    /// The minimum version number supported in the QR Code Model 2 standard.
    pub const MIN: Version = Version(1);

    /// The maximum version number supported in the QR Code Model 2 standard.
    pub const MAX: Version = Version(40);

    /// Creates a version object from the given number.
    ///
    /// # Panics
    ///
    /// Panics if the number is outside the range [1, 40].
    pub const fn new(ver: u8) -> Self {
        assert!(
            Version::MIN.value() <= ver && ver <= Version::MAX.value(),
            "Version number out of range"
        );
        Self(ver)
    }

    /// Returns the value, which is in the range [1, 40].
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Modules per side for this version.
    pub const fn module_count(self) -> usize {
        self.0 as usize * 4 + 17
    }
}

impl TryFrom<u8> for Version {
    type Error = u8;

    fn try_from(ver: u8) -> core::result::Result<Self, u8> {
        if (Version::MIN.value()..=Version::MAX.value()).contains(&ver) {
            Ok(Self(ver))
        } else {
            Err(ver)
        }
    }
}

/// A mask pattern (0–7).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Mask(u8);

impl Mask {
    /// Creates a mask object from the given number.
    ///
    /// # Panics
    ///
    /// Panics if the number is outside the range [0, 7].
    pub const fn new(mask: u8) -> Self {
        assert!(mask <= 7, "Mask value out of range");
        Self(mask)
    }

    /// Returns the value, which is in the range [0, 7].
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Whether this mask flips the data module at `(row, col)`.
    pub fn is_inverted(self, row: usize, col: usize) -> bool {
        let (i, j) = (row, col);
        match self.0 {
            0 => (i + j) % 2 == 0,
            1 => i % 2 == 0,
            2 => j % 3 == 0,
            3 => (i + j) % 3 == 0,
            4 => (i / 2 + j / 3) % 2 == 0,
            5 => (i * j) % 2 + (i * j) % 3 == 0,
            6 => ((i * j) % 2 + (i * j) % 3) % 2 == 0,
            7 => ((i * j) % 3 + (i + j) % 2) % 2 == 0,
            _ => unreachable!(),
        }
    }
}

impl TryFrom<u8> for Mask {
    type Error = u8;

    fn try_from(mask: u8) -> core::result::Result<Self, u8> {
        if mask <= 7 {
            Ok(Self(mask))
        } else {
            Err(mask)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rsblock::data_codewords;

    #[test]
    fn test_format_bits_known_values() {
        assert_eq!(format_bits(QrCodeEcc::Medium, Mask::new(0)), 0x5412);
        assert_eq!(format_bits(QrCodeEcc::Low, Mask::new(0)), 0x77C4);
        assert_eq!(format_bits(QrCodeEcc::High, Mask::new(7)), 0x083B);
        assert_eq!(format_bits(QrCodeEcc::Quartile, Mask::new(7)), 0x2BED);
    }

    #[test]
    fn test_version_bits_known_values() {
        assert_eq!(version_bits(Version::new(7)), 0x07C94);
        assert_eq!(version_bits(Version::new(21)), 0x15683);
        assert_eq!(version_bits(Version::new(40)), 0x28C69);
    }

    #[test]
    fn test_format_bits_are_a_protocol_mapping() {
        assert_eq!(QrCodeEcc::Low.format_bits(), 1);
        assert_eq!(QrCodeEcc::Medium.format_bits(), 0);
        assert_eq!(QrCodeEcc::Quartile.format_bits(), 3);
        assert_eq!(QrCodeEcc::High.format_bits(), 2);
    }

    #[test]
    fn test_select_version() {
        assert_eq!(select_version(0, QrCodeEcc::High), Ok(Version::new(1)));
        assert_eq!(select_version(17, QrCodeEcc::Low), Ok(Version::new(1)));
        assert_eq!(select_version(18, QrCodeEcc::Low), Ok(Version::new(2)));
        assert_eq!(select_version(11, QrCodeEcc::Quartile), Ok(Version::new(1)));
        assert_eq!(select_version(2953, QrCodeEcc::Low), Ok(Version::MAX));
        assert_eq!(
            select_version(2954, QrCodeEcc::Low),
            Err(QrError::DataTooLong { length: 2954, capacity: 2953, ecl: QrCodeEcc::Low })
        );
        assert!(select_version(1274, QrCodeEcc::High).is_err());
    }

    #[test]
    fn test_hello_world_data_codewords() {
        let seg = QrSegment::make_bytes("HELLO WORLD");
        let version = Version::new(1);
        let codewords = encode_segments_to_codewords(&[seg], version, QrCodeEcc::Quartile).unwrap();
        assert_eq!(
            codewords,
            [
                64, 180, 132, 84, 196, 196, 242, 5, 116, 245, 36, 196, 64, // data
                43, 245, 36, 39, 171, 198, 24, 185, 196, 41, 84, 197, 159, // ec
            ]
        );
    }

    #[test]
    fn test_padding_alternates() {
        let seg = QrSegment::make_bytes("A");
        let codewords = encode_segments_to_codewords(&[seg], Version::new(1), QrCodeEcc::Low).unwrap();
        // 0100 00000001 01000001 0000 -> 0x40 0x14 0x10, then EC/11 padding.
        assert_eq!(&codewords[..3], &[0x40, 0x14, 0x10]);
        let pads: Vec<u8> = codewords[3..19].to_vec();
        let expected: Vec<u8> = [0xEC, 0x11].iter().cycle().take(16).copied().collect();
        assert_eq!(pads, expected);
    }

    #[test]
    fn test_terminator_fills_last_nibble() {
        // 17 bytes at 1-L: 4 + 8 + 136 = 148 of 152 bits, terminator fits exactly.
        let seg = QrSegment::make_bytes(&"a".repeat(17));
        let codewords = encode_segments_to_codewords(&[seg], Version::new(1), QrCodeEcc::Low).unwrap();
        assert_eq!(codewords.len(), 26);
        // Last data codeword: low nibble of 'a' (0x1) followed by the terminator.
        assert_eq!(codewords[18], 0x10);
    }

    #[test]
    fn test_capacity_exceeded() {
        let seg = QrSegment::make_bytes(&"a".repeat(18));
        let err = encode_segments_to_codewords(&[seg], Version::new(1), QrCodeEcc::Low).unwrap_err();
        assert_eq!(err, QrError::CapacityExceeded { used_bits: 156, capacity_bits: 152 });

        // A length that overflows the 8-bit length field.
        let seg = QrSegment::make_bytes(&"a".repeat(300));
        assert!(matches!(
            encode_segments_to_codewords(&[seg], Version::new(9), QrCodeEcc::Low),
            Err(QrError::CapacityExceeded { .. })
        ));
    }

    #[test]
    fn test_interleave_uneven_blocks() {
        let blocks: [&[u8]; 3] = [&[1, 4], &[2, 5], &[3, 6, 7]];
        let mut out = Vec::new();
        interleave(&blocks, &mut out);
        assert_eq!(out, [1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_codeword_count_fills_version() {
        // Seven bytes fit every version, 1-H included.
        for ver in [1u8, 5, 10, 15, 27, 40] {
            let version = Version::new(ver);
            for ecl in [QrCodeEcc::Low, QrCodeEcc::Medium, QrCodeEcc::Quartile, QrCodeEcc::High] {
                let seg = QrSegment::make_bytes("qr-code");
                let codewords = encode_segments_to_codewords(&[seg], version, ecl).unwrap();
                assert_eq!(codewords.len(), num_raw_data_modules(version) / 8);
                assert!(data_codewords(version, ecl) < codewords.len());
            }
        }
    }

    #[test]
    fn test_ten_bytes_overflow_version_1_high() {
        let seg = QrSegment::make_bytes("interleave");
        assert_eq!(
            encode_segments_to_codewords(&[seg.clone()], Version::new(1), QrCodeEcc::High),
            Err(QrError::CapacityExceeded { used_bits: 92, capacity_bits: 72 })
        );
        assert!(encode_segments_to_codewords(&[seg], Version::new(1), QrCodeEcc::Quartile).is_ok());
    }

    fn scored(total: i32) -> Penalty {
        Penalty { runs: total, ..Penalty::default() }
    }

    #[test]
    fn test_choose_mask_prefers_lowest_total() {
        let scores: Vec<(Mask, Penalty)> = [500, 420, 430, 410, 900, 411, 600, 700]
            .iter()
            .enumerate()
            .map(|(i, &t)| (Mask::new(i as u8), scored(t)))
            .collect();
        assert_eq!(choose_mask(&scores), Some((Mask::new(3), scored(410))));
    }

    #[test]
    fn test_choose_mask_ties_go_to_lower_index() {
        let scores: Vec<(Mask, Penalty)> = [500, 420, 300, 410, 900, 300, 600, 700]
            .iter()
            .enumerate()
            .map(|(i, &t)| (Mask::new(i as u8), scored(t)))
            .collect();
        assert_eq!(choose_mask(&scores).map(|(m, _)| m), Some(Mask::new(2)));

        // Input order does not matter, only the index.
        let reversed: Vec<(Mask, Penalty)> = scores.iter().rev().copied().collect();
        assert_eq!(choose_mask(&reversed).map(|(m, _)| m), Some(Mask::new(2)));
        assert_eq!(choose_mask(&[]), None);
    }

    #[test]
    fn test_committed_mask_has_minimum_penalty() {
        let digits = "0123456789".repeat(20);
        let cases = [
            ("HELLO WORLD", QrCodeEcc::Quartile),
            ("https://example.com/path?q=1", QrCodeEcc::Medium),
            ("é€😀 mixed", QrCodeEcc::Low),
            (digits.as_str(), QrCodeEcc::High),
        ];
        for (text, ecl) in cases {
            let qr = QrCode::encode_text(text, ecl).unwrap();
            let seg = QrSegment::make_bytes(text);
            let codewords = encode_segments_to_codewords(&[seg], qr.version(), ecl).unwrap();
            let totals: Vec<i32> = (0u8..8)
                .map(|m| {
                    let matrix = ModuleMatrix::build(qr.version(), ecl, Mask::new(m), &codewords, true);
                    let size = matrix.size();
                    penalty_score(&matrix.into_modules(), size).total()
                })
                .collect();
            let best = totals.iter().copied().min().unwrap();
            let expected = totals.iter().position(|&t| t == best).unwrap() as u8;
            assert_eq!(qr.mask(), Mask::new(expected), "{:?} at {:?}: {:?}", text, ecl, totals);
        }
    }

    #[test]
    fn test_forced_version_is_validated() {
        let options = EncodeOptions::new(QrCodeEcc::High).version(Version::new(1));
        let err = QrCode::encode_with_options("this text is too long", &options).unwrap_err();
        assert_eq!(err, QrError::DataTooLong { length: 21, capacity: 7, ecl: QrCodeEcc::High });
    }

    #[test]
    fn test_forced_mask_is_committed() {
        for m in 0..8 {
            let options = EncodeOptions::new(QrCodeEcc::Medium).mask(Mask::new(m));
            let qr = QrCode::encode_with_options("mask", &options).unwrap();
            assert_eq!(qr.mask(), Mask::new(m));
        }
    }

    #[test]
    fn test_try_from() {
        assert_eq!(Version::try_from(0), Err(0));
        assert_eq!(Version::try_from(41), Err(41));
        assert_eq!(Version::try_from(40), Ok(Version::MAX));
        assert_eq!(Mask::try_from(8), Err(8));
        assert_eq!(Mask::try_from(7), Ok(Mask::new(7)));
    }

    #[test]
    #[should_panic]
    fn test_version_out_of_range_panics() {
        Version::new(41);
    }

    #[test]
    fn test_mask_formulas() {
        assert!(Mask::new(0).is_inverted(0, 0));
        assert!(!Mask::new(0).is_inverted(0, 1));
        assert!(Mask::new(1).is_inverted(2, 5));
        assert!(!Mask::new(1).is_inverted(3, 5));
        assert!(Mask::new(2).is_inverted(7, 3));
        assert!(!Mask::new(2).is_inverted(3, 7));
        assert!(Mask::new(3).is_inverted(1, 2));
        assert!(Mask::new(4).is_inverted(1, 2));
        assert!(!Mask::new(4).is_inverted(2, 2));
        assert!(Mask::new(5).is_inverted(0, 9));
        assert!(!Mask::new(5).is_inverted(1, 1));
        assert!(Mask::new(6).is_inverted(1, 1));
        assert!(!Mask::new(6).is_inverted(1, 3));
        assert!(Mask::new(7).is_inverted(0, 0));
    }
}
