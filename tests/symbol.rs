//! Integration tests for the public encoding API.
//!
//! These exercise whole symbols: size, determinism, error reporting and a
//! bit-exact comparison against the well-known "HELLO WORLD" 1-Q symbol.

use qrsymbol::rsblock::byte_capacity;
use qrsymbol::{encode, EncodeOptions, Mask, QrCode, QrCodeEcc, QrError, Version};

const LEVELS: [QrCodeEcc; 4] = [QrCodeEcc::Low, QrCodeEcc::Medium, QrCodeEcc::Quartile, QrCodeEcc::High];

const HELLO_WORLD_Q: [&str; 21] = [
    "#######.#..#..#######",
    "#.....#..#....#.....#",
    "#.###.#.#..#..#.###.#",
    "#.###.#.#.##..#.###.#",
    "#.###.#..##.#.#.###.#",
    "#.....#.##.#..#.....#",
    "#######.#.#.#.#######",
    "........#.###........",
    ".#.#.####..#####.##.#",
    "..####...#....##...#.",
    ".#..#.##.#.##..#.##.#",
    "#.###..#.####.#.##.##",
    ".#.##.#.#.##.####.#..",
    "........##..#...#.#..",
    "#######.##.#..######.",
    "#.....#.#####..#....#",
    "#.###.#..#..###...##.",
    "#.###.#.#.#....######",
    "#.###.#...#.#.#.#.#.#",
    "#.....#.#.##.#.......",
    "#######...#.#..#.###.",
];

fn render(qr: &QrCode) -> Vec<String> {
    (0..qr.size())
        .map(|row| {
            (0..qr.size())
                .map(|col| if qr.is_dark(row, col).unwrap() { '#' } else { '.' })
                .collect()
        })
        .collect()
}

#[test]
fn hello_world_matches_reference_symbol() {
    let qr = encode("HELLO WORLD", QrCodeEcc::Quartile).unwrap();
    assert_eq!(qr.version(), Version::new(1));
    assert_eq!(qr.module_count(), 21);
    assert_eq!(qr.mask(), Mask::new(7));
    assert_eq!(qr.error_correction_level(), QrCodeEcc::Quartile);
    assert_eq!(render(&qr), HELLO_WORLD_Q);
}

#[test]
fn module_count_follows_version_for_every_level() {
    for ver in 1..=40u8 {
        let version = Version::new(ver);
        for ecl in LEVELS {
            let options = EncodeOptions::new(ecl).version(version).mask(Mask::new(0));
            let qr = QrCode::encode_with_options("size", &options).unwrap();
            assert_eq!(qr.module_count(), usize::from(ver) * 4 + 17, "version {} {:?}", ver, ecl);
            assert_eq!(qr.modules().len(), qr.module_count() * qr.module_count());
        }
    }
}

#[test]
fn encoding_is_deterministic() {
    let text = "The quick brown fox jumps over the lazy dog";
    for ecl in LEVELS {
        let first = encode(text, ecl).unwrap();
        let second = encode(text, ecl).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.modules(), second.modules());
    }
}

#[test]
fn concurrent_encoders_agree() {
    let text = "shared tables, independent encoders";
    let expected = encode(text, QrCodeEcc::High).unwrap();
    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4).map(|_| s.spawn(|| encode(text, QrCodeEcc::High).unwrap())).collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn out_of_range_queries_fail() {
    let qr = encode("bounds", QrCodeEcc::Medium).unwrap();
    let n = qr.size();
    for (row, col) in [(-1, 0), (n, 0), (0, -1), (0, n), (n, n)] {
        assert_eq!(qr.is_dark(row, col), Err(QrError::OutOfRange { row, col, size: n }));
        assert!(!qr.get_module(col, row));
    }
    assert!(qr.is_dark(n - 1, n - 1).is_ok());
}

#[test]
fn dark_module_is_always_set() {
    for ver in [1u8, 2, 7, 20, 40] {
        for m in 0..8 {
            let options = EncodeOptions::new(QrCodeEcc::Low).version(Version::new(ver)).mask(Mask::new(m));
            let qr = QrCode::encode_with_options("dark", &options).unwrap();
            assert!(qr.is_dark(qr.size() - 8, 8).unwrap(), "version {} mask {}", ver, m);
        }
    }
}

#[test]
fn finder_patterns_do_not_depend_on_mask() {
    let reference = QrCode::encode_with_options("finder", &EncodeOptions::new(QrCodeEcc::Medium).mask(Mask::new(0))).unwrap();
    let n = reference.size();
    for m in 1..8 {
        let qr = QrCode::encode_with_options("finder", &EncodeOptions::new(QrCodeEcc::Medium).mask(Mask::new(m))).unwrap();
        for (r0, c0) in [(0, 0), (0, n - 7), (n - 7, 0)] {
            for r in r0..r0 + 7 {
                for c in c0..c0 + 7 {
                    assert_eq!(qr.is_dark(r, c), reference.is_dark(r, c));
                }
            }
        }
    }
}

#[test]
fn version_40_capacity_limits() {
    let fits = "a".repeat(2953);
    assert_eq!(encode(&fits, QrCodeEcc::Low).unwrap().version(), Version::MAX);

    let too_long = "a".repeat(2954);
    assert_eq!(
        encode(&too_long, QrCodeEcc::Low).unwrap_err(),
        QrError::DataTooLong { length: 2954, capacity: 2953, ecl: QrCodeEcc::Low }
    );

    let too_long_h = "a".repeat(1274);
    assert_eq!(
        encode(&too_long_h, QrCodeEcc::High).unwrap_err(),
        QrError::DataTooLong { length: 1274, capacity: 1273, ecl: QrCodeEcc::High }
    );
}

#[test]
fn utf8_signature_counts_toward_capacity() {
    // 1475 two-byte characters plus the three-byte signature fill version 40-L exactly.
    let fits = "é".repeat(1475);
    assert_eq!(encode(&fits, QrCodeEcc::Low).unwrap().version(), Version::MAX);

    let over = "é".repeat(1476);
    assert!(matches!(
        encode(&over, QrCodeEcc::Low),
        Err(QrError::DataTooLong { length: 2955, .. })
    ));
}

#[test]
fn smallest_fitting_version_is_chosen() {
    for ecl in LEVELS {
        for ver in [1u8, 2, 9, 10, 26, 27] {
            let version = Version::new(ver);
            let qr = encode(&"z".repeat(byte_capacity(version, ecl)), ecl).unwrap();
            assert_eq!(qr.version(), version);
            let qr = encode(&"z".repeat(byte_capacity(version, ecl) + 1), ecl).unwrap();
            assert_eq!(qr.version().value(), ver + 1);
        }
    }
}

#[test]
fn forced_version_skips_selection() {
    let options = EncodeOptions::new(QrCodeEcc::Low).version(Version::new(10));
    let qr = QrCode::encode_with_options("tiny", &options).unwrap();
    assert_eq!(qr.version(), Version::new(10));
    assert_eq!(qr.size(), 57);
}

#[test]
fn empty_text_encodes() {
    let qr = encode("", QrCodeEcc::High).unwrap();
    assert_eq!(qr.version(), Version::MIN);
}

#[test]
fn default_options_use_medium() {
    let qr = QrCode::encode_with_options("default", &EncodeOptions::default()).unwrap();
    assert_eq!(qr.error_correction_level(), QrCodeEcc::Medium);
}
