//! Arithmetic over GF(256) and polynomials with GF(256) coefficients.
//!
//! The field is generated by x^8 + x^4 + x^3 + x^2 + 1 (0x11d), the QR Code
//! choice. Exponent and logarithm tables are built at compile time, so they are
//! plain read-only statics shared by every encoder.

/// Exponent table: `EXP_TABLE[i] = α^i`, with `EXP_TABLE[255] = 1`.
static EXP_TABLE: [u8; 256] = build_exp_table();

/// Logarithm table: `LOG_TABLE[α^i] = i`. Entry 0 is unused.
static LOG_TABLE: [u8; 256] = build_log_table(&EXP_TABLE);

const fn build_exp_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 8 {
        table[i] = 1 << i;
        i += 1;
    }
    while i < 256 {
        table[i] = table[i - 4] ^ table[i - 5] ^ table[i - 6] ^ table[i - 8];
        i += 1;
    }
    table
}

const fn build_log_table(exp: &[u8; 256]) -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 255 {
        table[exp[i] as usize] = i as u8;
        i += 1;
    }
    table
}

/// GF(256) field operations using log/exp tables.
pub struct Gf256;

impl Gf256 {
    /// Returns α^n for any integer exponent (reduced modulo 255).
    pub fn exp(n: i32) -> u8 {
        EXP_TABLE[n.rem_euclid(255) as usize]
    }

    /// Returns the discrete logarithm of `n`, or `None` for zero.
    pub fn log(n: u8) -> Option<u8> {
        if n == 0 {
            None
        } else {
            Some(LOG_TABLE[usize::from(n)])
        }
    }

    pub fn mul(a: u8, b: u8) -> u8 {
        if a == 0 || b == 0 {
            return 0;
        }
        let log_a = usize::from(LOG_TABLE[usize::from(a)]);
        let log_b = usize::from(LOG_TABLE[usize::from(b)]);
        EXP_TABLE[(log_a + log_b) % 255]
    }

    /// Divides `a` by `b`.
    ///
    /// # Panics
    ///
    /// Panics if `b` is zero.
    pub fn div(a: u8, b: u8) -> u8 {
        assert!(b != 0, "Division by zero in GF(256)");
        if a == 0 {
            return 0;
        }
        let log_a = i32::from(LOG_TABLE[usize::from(a)]);
        let log_b = i32::from(LOG_TABLE[usize::from(b)]);
        Self::exp(log_a - log_b)
    }
}

/// A polynomial over GF(256), coefficients stored highest degree first.
///
/// Leading zero coefficients are trimmed on construction, keeping at least one
/// coefficient so the zero polynomial is `[0]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Polynomial {
    coefficients: Vec<u8>,
}

impl Polynomial {
    /// Builds `coefficients · x^shift`.
    pub fn new(coefficients: &[u8], shift: usize) -> Self {
        let zeros = coefficients.iter().take_while(|&&c| c == 0).count();
        let offset = zeros.min(coefficients.len().saturating_sub(1));
        let mut num = Vec::with_capacity(coefficients.len() - offset + shift);
        num.extend_from_slice(&coefficients[offset..]);
        num.resize(num.len() + shift, 0);
        Self { coefficients: num }
    }

    /// The Reed-Solomon generator (x - α^0)(x - α^1)…(x - α^(degree-1)).
    pub fn error_correction(degree: usize) -> Self {
        let mut generator = Polynomial::new(&[1], 0);
        for i in 0..degree {
            // Exponents stay below 255 since degree is at most 30.
            generator = generator.multiply(&Polynomial::new(&[1, Gf256::exp(i as i32)], 0));
        }
        generator
    }

    pub fn coefficients(&self) -> &[u8] {
        &self.coefficients
    }

    /// Coefficient at `index`, counted from the highest degree term.
    pub fn get(&self, index: usize) -> u8 {
        self.coefficients[index]
    }

    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }

    pub fn multiply(&self, other: &Polynomial) -> Polynomial {
        let mut num = vec![0u8; self.len() + other.len() - 1];
        for (i, &a) in self.coefficients.iter().enumerate() {
            for (j, &b) in other.coefficients.iter().enumerate() {
                num[i + j] ^= Gf256::mul(a, b);
            }
        }
        Polynomial::new(&num, 0)
    }

    /// Remainder of the division of `self` by `divisor`.
    ///
    /// # Panics
    ///
    /// Panics if the leading coefficient of `divisor` is zero.
    pub fn modulo(&self, divisor: &Polynomial) -> Polynomial {
        let lead = divisor.get(0);
        let mut num = self.coefficients.clone();
        let steps = (num.len() + 1).saturating_sub(divisor.len());
        for i in 0..steps {
            if num[i] == 0 {
                continue;
            }
            let factor = Gf256::div(num[i], lead);
            for (n, &d) in num[i..].iter_mut().zip(divisor.coefficients.iter()) {
                *n ^= Gf256::mul(d, factor);
            }
        }
        Polynomial::new(&num[steps..], 0)
    }
}
