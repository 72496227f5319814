//! Static tables indexed by (version, error correction level) or by version:
//! Reed-Solomon block structure, byte-mode capacity and alignment pattern
//! centres, all as published in the QR Code standard.

use crate::qrcode::{QrCodeEcc, Version};

/// One Reed-Solomon block: `total_count` codewords of which `data_count` carry data.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct RsBlock {
    pub total_count: usize,
    pub data_count: usize,
}

impl RsBlock {
    pub const fn new(total_count: usize, data_count: usize) -> Self {
        Self { total_count, data_count }
    }

    /// Number of error correction codewords in this block.
    pub const fn ec_count(&self) -> usize {
        self.total_count - self.data_count
    }
}

/// Returns the ordered block list for a version and level.
///
/// Short blocks come first, matching the interleaving order the standard
/// mandates.
pub fn rs_blocks(version: Version, ecl: QrCodeEcc) -> Vec<RsBlock> {
    let row = &RS_BLOCK_TABLE[(usize::from(version.value()) - 1) * 4 + ecl.ordinal()];
    let mut blocks = Vec::new();
    for group in row.chunks_exact(3) {
        let block = RsBlock::new(usize::from(group[1]), usize::from(group[2]));
        blocks.extend(std::iter::repeat(block).take(usize::from(group[0])));
    }
    blocks
}

/// Total data codewords available at a version and level.
pub fn data_codewords(version: Version, ecl: QrCodeEcc) -> usize {
    rs_blocks(version, ecl).iter().map(|b| b.data_count).sum()
}

/// Maximum byte-mode payload, in bytes, at a version and level.
pub fn byte_capacity(version: Version, ecl: QrCodeEcc) -> usize {
    usize::from(CAPACITY_TABLE[usize::from(version.value()) - 1][ecl.ordinal()])
}

/// Number of modules available for data and EC codewords (plus remainder
/// bits) once every function pattern is drawn.
pub fn num_raw_data_modules(version: Version) -> usize {
    let ver = usize::from(version.value());
    let mut result: usize = (16 * ver + 128) * ver + 64;
    if ver >= 2 {
        let numalign: usize = ver / 7 + 2;
        result -= (25 * numalign - 10) * numalign - 55;
        if ver >= 7 {
            result -= 36;
        }
    }
    result
}

/// Alignment pattern centre coordinates for a version; every pairing of two
/// entries is a candidate centre.
pub fn alignment_pattern_positions(version: Version) -> &'static [u8] {
    ALIGNMENT_PATTERN_POSITIONS[usize::from(version.value()) - 1]
}

// Rows are (count, total, data) groups, one row per (version, level) with the
// levels in L, M, Q, H order. A zero count marks an absent second group.
static RS_BLOCK_TABLE: [[u8; 6]; 160] = [
    [1, 26, 19, 0, 0, 0], // 1
    [1, 26, 16, 0, 0, 0],
    [1, 26, 13, 0, 0, 0],
    [1, 26, 9, 0, 0, 0],
    [1, 44, 34, 0, 0, 0], // 2
    [1, 44, 28, 0, 0, 0],
    [1, 44, 22, 0, 0, 0],
    [1, 44, 16, 0, 0, 0],
    [1, 70, 55, 0, 0, 0], // 3
    [1, 70, 44, 0, 0, 0],
    [2, 35, 17, 0, 0, 0],
    [2, 35, 13, 0, 0, 0],
    [1, 100, 80, 0, 0, 0], // 4
    [2, 50, 32, 0, 0, 0],
    [2, 50, 24, 0, 0, 0],
    [4, 25, 9, 0, 0, 0],
    [1, 134, 108, 0, 0, 0], // 5
    [2, 67, 43, 0, 0, 0],
    [2, 33, 15, 2, 34, 16],
    [2, 33, 11, 2, 34, 12],
    [2, 86, 68, 0, 0, 0], // 6
    [4, 43, 27, 0, 0, 0],
    [4, 43, 19, 0, 0, 0],
    [4, 43, 15, 0, 0, 0],
    [2, 98, 78, 0, 0, 0], // 7
    [4, 49, 31, 0, 0, 0],
    [2, 32, 14, 4, 33, 15],
    [4, 39, 13, 1, 40, 14],
    [2, 121, 97, 0, 0, 0], // 8
    [2, 60, 38, 2, 61, 39],
    [4, 40, 18, 2, 41, 19],
    [4, 40, 14, 2, 41, 15],
    [2, 146, 116, 0, 0, 0], // 9
    [3, 58, 36, 2, 59, 37],
    [4, 36, 16, 4, 37, 17],
    [4, 36, 12, 4, 37, 13],
    [2, 86, 68, 2, 87, 69], // 10
    [4, 69, 43, 1, 70, 44],
    [6, 43, 19, 2, 44, 20],
    [6, 43, 15, 2, 44, 16],
    [4, 101, 81, 0, 0, 0], // 11
    [1, 80, 50, 4, 81, 51],
    [4, 50, 22, 4, 51, 23],
    [3, 36, 12, 8, 37, 13],
    [2, 116, 92, 2, 117, 93], // 12
    [6, 58, 36, 2, 59, 37],
    [4, 46, 20, 6, 47, 21],
    [7, 42, 14, 4, 43, 15],
    [4, 133, 107, 0, 0, 0], // 13
    [8, 59, 37, 1, 60, 38],
    [8, 44, 20, 4, 45, 21],
    [12, 33, 11, 4, 34, 12],
    [3, 145, 115, 1, 146, 116], // 14
    [4, 64, 40, 5, 65, 41],
    [11, 36, 16, 5, 37, 17],
    [11, 36, 12, 5, 37, 13],
    [5, 109, 87, 1, 110, 88], // 15
    [5, 65, 41, 5, 66, 42],
    [5, 54, 24, 7, 55, 25],
    [11, 36, 12, 7, 37, 13],
    [5, 122, 98, 1, 123, 99], // 16
    [7, 73, 45, 3, 74, 46],
    [15, 43, 19, 2, 44, 20],
    [3, 45, 15, 13, 46, 16],
    [1, 135, 107, 5, 136, 108], // 17
    [10, 74, 46, 1, 75, 47],
    [1, 50, 22, 15, 51, 23],
    [2, 42, 14, 17, 43, 15],
    [5, 150, 120, 1, 151, 121], // 18
    [9, 69, 43, 4, 70, 44],
    [17, 50, 22, 1, 51, 23],
    [2, 42, 14, 19, 43, 15],
    [3, 141, 113, 4, 142, 114], // 19
    [3, 70, 44, 11, 71, 45],
    [17, 47, 21, 4, 48, 22],
    [9, 39, 13, 16, 40, 14],
    [3, 135, 107, 5, 136, 108], // 20
    [3, 67, 41, 13, 68, 42],
    [15, 54, 24, 5, 55, 25],
    [15, 43, 15, 10, 44, 16],
    [4, 144, 116, 4, 145, 117], // 21
    [17, 68, 42, 0, 0, 0],
    [17, 50, 22, 6, 51, 23],
    [19, 46, 16, 6, 47, 17],
    [2, 139, 111, 7, 140, 112], // 22
    [17, 74, 46, 0, 0, 0],
    [7, 54, 24, 16, 55, 25],
    [34, 37, 13, 0, 0, 0],
    [4, 151, 121, 5, 152, 122], // 23
    [4, 75, 47, 14, 76, 48],
    [11, 54, 24, 14, 55, 25],
    [16, 45, 15, 14, 46, 16],
    [6, 147, 117, 4, 148, 118], // 24
    [6, 73, 45, 14, 74, 46],
    [11, 54, 24, 16, 55, 25],
    [30, 46, 16, 2, 47, 17],
    [8, 132, 106, 4, 133, 107], // 25
    [8, 75, 47, 13, 76, 48],
    [7, 54, 24, 22, 55, 25],
    [22, 45, 15, 13, 46, 16],
    [10, 142, 114, 2, 143, 115], // 26
    [19, 74, 46, 4, 75, 47],
    [28, 50, 22, 6, 51, 23],
    [33, 46, 16, 4, 47, 17],
    [8, 152, 122, 4, 153, 123], // 27
    [22, 73, 45, 3, 74, 46],
    [8, 53, 23, 26, 54, 24],
    [12, 45, 15, 28, 46, 16],
    [3, 147, 117, 10, 148, 118], // 28
    [3, 73, 45, 23, 74, 46],
    [4, 54, 24, 31, 55, 25],
    [11, 45, 15, 31, 46, 16],
    [7, 146, 116, 7, 147, 117], // 29
    [21, 73, 45, 7, 74, 46],
    [1, 53, 23, 37, 54, 24],
    [19, 45, 15, 26, 46, 16],
    [5, 145, 115, 10, 146, 116], // 30
    [19, 75, 47, 10, 76, 48],
    [15, 54, 24, 25, 55, 25],
    [23, 45, 15, 25, 46, 16],
    [13, 145, 115, 3, 146, 116], // 31
    [2, 74, 46, 29, 75, 47],
    [42, 54, 24, 1, 55, 25],
    [23, 45, 15, 28, 46, 16],
    [17, 145, 115, 0, 0, 0], // 32
    [10, 74, 46, 23, 75, 47],
    [10, 54, 24, 35, 55, 25],
    [19, 45, 15, 35, 46, 16],
    [17, 145, 115, 1, 146, 116], // 33
    [14, 74, 46, 21, 75, 47],
    [29, 54, 24, 19, 55, 25],
    [11, 45, 15, 46, 46, 16],
    [13, 145, 115, 6, 146, 116], // 34
    [14, 74, 46, 23, 75, 47],
    [44, 54, 24, 7, 55, 25],
    [59, 46, 16, 1, 47, 17],
    [12, 151, 121, 7, 152, 122], // 35
    [12, 75, 47, 26, 76, 48],
    [39, 54, 24, 14, 55, 25],
    [22, 45, 15, 41, 46, 16],
    [6, 151, 121, 14, 152, 122], // 36
    [6, 75, 47, 34, 76, 48],
    [46, 54, 24, 10, 55, 25],
    [2, 45, 15, 64, 46, 16],
    [17, 152, 122, 4, 153, 123], // 37
    [29, 74, 46, 14, 75, 47],
    [49, 54, 24, 10, 55, 25],
    [24, 45, 15, 46, 46, 16],
    [4, 152, 122, 18, 153, 123], // 38
    [13, 74, 46, 32, 75, 47],
    [48, 54, 24, 14, 55, 25],
    [42, 45, 15, 32, 46, 16],
    [20, 147, 117, 4, 148, 118], // 39
    [40, 75, 47, 7, 76, 48],
    [43, 54, 24, 22, 55, 25],
    [10, 45, 15, 67, 46, 16],
    [19, 148, 118, 6, 149, 119], // 40
    [18, 75, 47, 31, 76, 48],
    [34, 54, 24, 34, 55, 25],
    [20, 45, 15, 61, 46, 16],
];

// Byte-mode capacity in bytes, columns L, M, Q, H.
static CAPACITY_TABLE: [[u16; 4]; 40] = [
    [  17,   14,   11,    7], // 1
    [  32,   26,   20,   14], // 2
    [  53,   42,   32,   24], // 3
    [  78,   62,   46,   34], // 4
    [ 106,   84,   60,   44], // 5
    [ 134,  106,   74,   58], // 6
    [ 154,  122,   86,   64], // 7
    [ 192,  152,  108,   84], // 8
    [ 230,  180,  130,   98], // 9
    [ 271,  213,  151,  119], // 10
    [ 321,  251,  177,  137], // 11
    [ 367,  287,  203,  155], // 12
    [ 425,  331,  241,  177], // 13
    [ 458,  362,  258,  194], // 14
    [ 520,  412,  292,  220], // 15
    [ 586,  450,  322,  250], // 16
    [ 644,  504,  364,  280], // 17
    [ 718,  560,  394,  310], // 18
    [ 792,  624,  442,  338], // 19
    [ 858,  666,  482,  382], // 20
    [ 929,  711,  509,  403], // 21
    [1003,  779,  565,  439], // 22
    [1091,  857,  611,  461], // 23
    [1171,  911,  661,  511], // 24
    [1273,  997,  715,  535], // 25
    [1367, 1059,  751,  593], // 26
    [1465, 1125,  805,  625], // 27
    [1528, 1190,  868,  658], // 28
    [1628, 1264,  908,  698], // 29
    [1732, 1370,  982,  742], // 30
    [1840, 1452, 1030,  790], // 31
    [1952, 1538, 1112,  842], // 32
    [2068, 1628, 1168,  898], // 33
    [2188, 1722, 1228,  958], // 34
    [2303, 1809, 1283,  983], // 35
    [2431, 1911, 1351, 1051], // 36
    [2563, 1989, 1423, 1093], // 37
    [2699, 2099, 1499, 1139], // 38
    [2809, 2213, 1579, 1219], // 39
    [2953, 2331, 1663, 1273], // 40
];

static ALIGNMENT_PATTERN_POSITIONS: [&[u8]; 40] = [
    &[],
    &[6, 18],
    &[6, 22],
    &[6, 26],
    &[6, 30],
    &[6, 34],
    &[6, 22, 38],
    &[6, 24, 42],
    &[6, 26, 46],
    &[6, 28, 50],
    &[6, 30, 54],
    &[6, 32, 58],
    &[6, 34, 62],
    &[6, 26, 46, 66],
    &[6, 26, 48, 70],
    &[6, 26, 50, 74],
    &[6, 30, 54, 78],
    &[6, 30, 56, 82],
    &[6, 30, 58, 86],
    &[6, 34, 62, 90],
    &[6, 28, 50, 72, 94],
    &[6, 26, 50, 74, 98],
    &[6, 30, 54, 78, 102],
    &[6, 28, 54, 80, 106],
    &[6, 32, 58, 84, 110],
    &[6, 30, 58, 86, 114],
    &[6, 34, 62, 90, 118],
    &[6, 26, 50, 74, 98, 122],
    &[6, 30, 54, 78, 102, 126],
    &[6, 26, 52, 78, 104, 130],
    &[6, 30, 56, 82, 108, 134],
    &[6, 34, 60, 86, 112, 138],
    &[6, 30, 58, 86, 114, 142],
    &[6, 34, 62, 90, 118, 146],
    &[6, 30, 54, 78, 102, 126, 150],
    &[6, 24, 50, 76, 102, 128, 154],
    &[6, 28, 54, 80, 106, 132, 158],
    &[6, 32, 58, 84, 110, 136, 162],
    &[6, 26, 54, 82, 110, 138, 166],
    &[6, 30, 58, 86, 114, 142, 170],
];
