//! Mask penalty scoring.
//!
//! Four additive rules from the QR Code standard, evaluated over a complete
//! grid (function patterns included). Lower is better.

const PENALTY_N1: i32 = 3;
const PENALTY_N2: i32 = 3;
const PENALTY_N3: i32 = 40;
const PENALTY_N4: i32 = 10;

/// Per-rule penalty breakdown for one candidate grid.
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct Penalty {
    /// Runs of five or more same-colored modules in a row or column.
    pub runs: i32,
    /// Uniform 2x2 blocks, overlaps counted.
    pub blocks: i32,
    /// 1:1:3:1:1 finder-like sequences with a light margin of four.
    pub finder_like: i32,
    /// Deviation of the dark proportion from 50%.
    pub balance: i32,
}

impl Penalty {
    pub fn total(&self) -> i32 {
        self.runs + self.blocks + self.finder_like + self.balance
    }
}

/// Scores a square, row-major grid of `size * size` modules.
///
/// # Panics
///
/// Panics if `modules.len() != size * size`.
pub fn penalty_score(modules: &[bool], size: usize) -> Penalty {
    assert_eq!(modules.len(), size * size, "Grid does not match size");
    let at = |row: usize, col: usize| modules[row * size + col];
    let mut penalty = Penalty::default();

    for row in 0..size {
        let (runs, finder) = score_line(size, |i| at(row, i));
        penalty.runs += runs;
        penalty.finder_like += finder;
    }
    for col in 0..size {
        let (runs, finder) = score_line(size, |i| at(i, col));
        penalty.runs += runs;
        penalty.finder_like += finder;
    }

    for row in 0..size.saturating_sub(1) {
        for col in 0..size - 1 {
            let color = at(row, col);
            if color == at(row, col + 1) && color == at(row + 1, col) && color == at(row + 1, col + 1) {
                penalty.blocks += PENALTY_N2;
            }
        }
    }

    let dark = modules.iter().filter(|&&m| m).count();
    penalty.balance = balance_penalty(dark, modules.len());
    penalty
}

/// Run and finder-like penalties along one row or column.
///
/// Run lengths are collected light-first and light-last, so odd indices are
/// dark runs. The area outside the symbol counts as light, which is why the
/// two outer light runs are widened by `size`.
fn score_line(size: usize, module: impl Fn(usize) -> bool) -> (i32, i32) {
    let mut runs: Vec<i32> = vec![0];
    let mut color = false;
    let mut penalty: i32 = 0;
    for i in 0..size {
        let isdark = module(i);
        if isdark != color {
            runs.push(0);
            color = isdark;
        }
        let last = runs.len() - 1;
        runs[last] += 1;
        match runs[last] {
            5 => penalty += PENALTY_N1,
            len if len > 5 => penalty += 1,
            _ => {}
        }
    }
    if color {
        runs.push(0);
    }
    let margin = size as i32;
    let last = runs.len() - 1;
    runs[0] += margin;
    runs[last] += margin;

    let finder = runs
        .windows(7)
        .step_by(2)
        .filter(|w| is_finder_like(w))
        .count() as i32;
    (penalty, finder * PENALTY_N3)
}

/// `w` is light, dark, light, dark, light, dark, light. Matches 1:1:3:1:1
/// dark-light-dark-light-dark with at least 4n light on one side.
fn is_finder_like(w: &[i32]) -> bool {
    let n = w[1];
    n > 0
        && w[2] == n
        && w[3] == n * 3
        && w[4] == n
        && w[5] == n
        && (w[0] >= n * 4 || w[6] >= n * 4)
}

/// +10 for every full 5% step the dark proportion lies away from 50%.
///
/// The percentage is floored to its 5% multiple below and above, and the
/// closer of the two to 50% decides the penalty.
fn balance_penalty(dark: usize, total: usize) -> i32 {
    if total == 0 {
        return 0;
    }
    let percent = (dark * 100 / total) as i32;
    let prev = percent / 5 * 5;
    let next = prev + 5;
    let steps = (prev - 50).abs().min((next - 50).abs()) / 5;
    steps * PENALTY_N4
}
