//! Byte-mode data segments and the bit buffer they serialize into.

use crate::qrcode::Version;

/// UTF-8 signature prepended to payloads that contain multi-byte characters,
/// so readers can tell the byte-mode content is UTF-8.
pub const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// A segment of text encoded in 8-bit byte mode.
///
/// Owns the original text and the byte payload derived from it. Immutable
/// once created.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct QrSegment {
    text: String,
    data: Vec<u8>,
}

impl QrSegment {
    /// The 4-bit mode indicator for byte mode.
    pub const MODE_BITS: u32 = 0x4;

    /// Creates a byte-mode segment for the given text.
    ///
    /// The payload is the UTF-8 encoding of `text`. When any character needs
    /// more than one byte, [`UTF8_BOM`] is placed in front of it.
    pub fn make_bytes(text: &str) -> Self {
        let bytes = text.as_bytes();
        let mut data = Vec::with_capacity(bytes.len() + UTF8_BOM.len());
        if text.chars().count() != bytes.len() {
            data.extend_from_slice(&UTF8_BOM);
        }
        data.extend_from_slice(bytes);
        Self {
            text: text.to_owned(),
            data,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// The serialized payload bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Payload length in bytes; this is the value written to the length field.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Payload length in bits.
    pub fn bit_length(&self) -> usize {
        self.data.len() * 8
    }

    /// Width of the length field in bits for the given version.
    pub fn num_char_count_bits(version: Version) -> u8 {
        [8, 16, 16][usize::from((version.value() + 7) / 17)]
    }

    /// Appends every payload byte, MSB first.
    pub fn write(&self, bb: &mut BitBuffer) {
        for &b in &self.data {
            bb.append_bits(u32::from(b), 8);
        }
    }

    /// Bits needed to serialize `segs` at `version`: mode indicator, length
    /// field and payload for each. Returns `None` if a length does not fit its
    /// length field.
    pub fn get_total_bits(segs: &[Self], version: Version) -> Option<usize> {
        let ccbits: u8 = Self::num_char_count_bits(version);
        let limit: usize = 1usize << ccbits;
        let mut result: usize = 0;
        for seg in segs {
            if seg.len() >= limit {
                return None;
            }
            result = result.checked_add(4 + usize::from(ccbits))?;
            result = result.checked_add(seg.bit_length())?;
        }
        Some(result)
    }
}

/// An append-only sequence of bits, packed MSB-first into bytes.
#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct BitBuffer {
    data: Vec<u8>,
    length: usize,
}

impl BitBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bits written so far.
    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// The packed bytes; a trailing partial byte is zero-filled.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Returns the bit at `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<bool> {
        if index >= self.length {
            return None;
        }
        Some(((self.data[index >> 3] >> (7 - (index & 7))) & 1) != 0)
    }

    /// Appends the low `len` bits of `val`, most significant first.
    ///
    /// # Panics
    ///
    /// Panics if `len > 31` or `val` has bits set above `len`.
    pub fn append_bits(&mut self, val: u32, len: u8) {
        assert!(len <= 31 && (val >> len) == 0, "Value out of range");
        for i in (0..len).rev() {
            self.append_bit(((val >> i) & 1) != 0);
        }
    }

    pub fn append_bit(&mut self, bit: bool) {
        let index: usize = self.length >> 3;
        if index == self.data.len() {
            self.data.push(0);
        }
        if bit {
            self.data[index] |= 0x80 >> (self.length & 7);
        }
        self.length += 1;
    }
}
