//! Module matrix construction: function patterns, format and version
//! information, and data placement with masking.

use crate::qrcode::{format_bits, version_bits, Mask, QrCodeEcc, Version};
use crate::rsblock::alignment_pattern_positions;

/// A square grid under construction.
///
/// Each cell is `None` until something is drawn there, so function patterns
/// placed first are never overwritten by data.
#[derive(Clone, Debug)]
pub(crate) struct ModuleMatrix {
    size: usize,
    cells: Vec<Option<bool>>,
}

impl ModuleMatrix {
    pub fn new(version: Version) -> Self {
        let size = usize::from(version.value()) * 4 + 17;
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    /// Builds a complete symbol for one mask.
    ///
    /// In `test` mode format and version information are drawn light, which
    /// is how candidates are scored during mask selection.
    pub fn build(
        version: Version,
        ecl: QrCodeEcc,
        mask: Mask,
        codewords: &[u8],
        test: bool,
    ) -> Self {
        let mut matrix = Self::new(version);
        let far = matrix.size - 7;
        matrix.setup_finder_pattern(0, 0);
        matrix.setup_finder_pattern(far, 0);
        matrix.setup_finder_pattern(0, far);
        matrix.setup_alignment_patterns(version);
        matrix.setup_timing_patterns();
        matrix.setup_format_info(ecl, mask, test);
        if version.value() >= 7 {
            matrix.setup_version_info(version, test);
        }
        matrix.map_data(codewords, mask);
        matrix
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, row: usize, col: usize) -> Option<bool> {
        self.cells[row * self.size + col]
    }

    fn set(&mut self, row: usize, col: usize, isdark: bool) {
        self.cells[row * self.size + col] = Some(isdark);
    }

    /// Resolves the grid to plain booleans, row-major. Cells never drawn are light.
    pub fn into_modules(self) -> Vec<bool> {
        debug_assert!(self.cells.iter().all(Option::is_some), "Unset module left in matrix");
        self.cells.into_iter().map(|c| c.unwrap_or(false)).collect()
    }

    /// Draws a 7x7 finder with its light separator, clipped to the grid.
    fn setup_finder_pattern(&mut self, row: usize, col: usize) {
        let size = self.size as i32;
        for r in -1i32..=7 {
            let y = row as i32 + r;
            if y < 0 || y >= size {
                continue;
            }
            for c in -1i32..=7 {
                let x = col as i32 + c;
                if x < 0 || x >= size {
                    continue;
                }
                let isdark = ((0..=6).contains(&r) && (c == 0 || c == 6))
                    || ((0..=6).contains(&c) && (r == 0 || r == 6))
                    || ((2..=4).contains(&r) && (2..=4).contains(&c));
                self.set(y as usize, x as usize, isdark);
            }
        }
    }

    /// Draws 5x5 alignment patterns at every table pairing whose centre is
    /// still free; pairings that land on a finder are skipped.
    fn setup_alignment_patterns(&mut self, version: Version) {
        let positions = alignment_pattern_positions(version);
        for &pos0 in positions {
            for &pos1 in positions {
                let (row, col) = (usize::from(pos0), usize::from(pos1));
                if self.get(row, col).is_some() {
                    continue;
                }
                for r in -2i32..=2 {
                    for c in -2i32..=2 {
                        let dist = r.abs().max(c.abs());
                        self.set(
                            (row as i32 + r) as usize,
                            (col as i32 + c) as usize,
                            dist != 1,
                        );
                    }
                }
            }
        }
    }

    fn setup_timing_patterns(&mut self) {
        for i in 8..self.size - 8 {
            if self.get(i, 6).is_none() {
                self.set(i, 6, i % 2 == 0);
            }
            if self.get(6, i).is_none() {
                self.set(6, i, i % 2 == 0);
            }
        }
    }

    /// Writes both copies of the 15-bit format word around the finders, plus
    /// the dark module next to the bottom-left finder.
    fn setup_format_info(&mut self, ecl: QrCodeEcc, mask: Mask, test: bool) {
        let bits: u32 = format_bits(ecl, mask);
        let size = self.size;
        for i in 0..15 {
            let bit = !test && get_bit(bits, i);

            // Vertical strip: top-left column 8, then bottom-left.
            let row = match i {
                0..=5 => i,
                6..=7 => i + 1,
                _ => size - 15 + i,
            };
            self.set(row, 8, bit);

            // Horizontal strip: top-right row 8, then top-left.
            let col = match i {
                0..=7 => size - i - 1,
                8 => 7,
                _ => 14 - i,
            };
            self.set(8, col, bit);
        }
        self.set(size - 8, 8, true);
    }

    /// Writes both 6x3 copies of the 18-bit version word (versions 7 and up).
    fn setup_version_info(&mut self, version: Version, test: bool) {
        let bits: u32 = version_bits(version);
        let size = self.size;
        for i in 0..18 {
            let bit = !test && get_bit(bits, i);
            let a = i / 3;
            let b = i % 3 + size - 11;
            self.set(a, b, bit);
            self.set(b, a, bit);
        }
    }

    /// Fills every free cell in the zigzag order of the standard: column
    /// pairs right to left, skipping the vertical timing column, alternately
    /// upward and downward. Codeword bits are XORed with the mask; cells left
    /// once the codewords run out stay light.
    fn map_data(&mut self, codewords: &[u8], mask: Mask) {
        let size = self.size;
        let totalbits = codewords.len() * 8;
        let mut i: usize = 0;
        let mut right: usize = size - 1;
        let mut upward = true;
        while right >= 1 {
            if right == 6 {
                right = 5;
            }
            for vert in 0..size {
                let row = if upward { size - 1 - vert } else { vert };
                for j in 0..2 {
                    let col = right - j;
                    if self.get(row, col).is_some() {
                        continue;
                    }
                    let isdark = if i < totalbits {
                        let bit = get_bit(u32::from(codewords[i >> 3]), 7 - (i & 7));
                        bit ^ mask.is_inverted(row, col)
                    } else {
                        false
                    };
                    self.set(row, col, isdark);
                    i += 1;
                }
            }
            upward = !upward;
            if right < 2 {
                break;
            }
            right -= 2;
        }
    }
}

pub(crate) fn get_bit(x: u32, i: usize) -> bool {
    ((x >> i) & 1) != 0
}
