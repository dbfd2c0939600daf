//! Signed prime factorizations of integers, kept as unevaluated display
//! objects.
//!
//! ```
//! use spinferm::factor::factorize;
//!
//! let f = factorize(-12);
//! assert_eq!(f.to_string(), "-2²·3");
//! assert_eq!(f.value(), -12);
//! ```

use std::fmt;
use itertools::Itertools;
use once_cell::sync::Lazy;

/// Upper bound of the sieved prime table.
const SIEVE_LIMIT: usize = 1 << 12;

/// All primes below [`SIEVE_LIMIT`], used as the first round of trial
/// divisors.
static SMALL_PRIMES: Lazy<Vec<u64>> = Lazy::new(|| {
    let mut is_prime = vec![true; SIEVE_LIMIT];
    is_prime[0] = false;
    is_prime[1] = false;
    let mut k = 2;
    while k * k < SIEVE_LIMIT {
        if is_prime[k] {
            (k * k..SIEVE_LIMIT).step_by(k).for_each(|j| { is_prime[j] = false; });
        }
        k += 1;
    }
    is_prime.into_iter().enumerate()
        .filter_map(|(n, p)| p.then_some(n as u64))
        .collect()
});

/// Sign of a factorized integer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sign {
    Neg,
    Zero,
    Pos,
}

impl Sign {
    /// Return the sign of an integer.
    pub fn of(n: i64) -> Self {
        match n.signum() {
            -1 => Self::Neg,
            0 => Self::Zero,
            _ => Self::Pos,
        }
    }

    /// Return `-1`, `0`, or `1`.
    pub fn as_int(&self) -> i64 {
        match self {
            Self::Neg => -1,
            Self::Zero => 0,
            Self::Pos => 1,
        }
    }
}

/// The product `sign × ∏ pᵏ` of an integer, kept unevaluated.
///
/// Primes are held in increasing order. A magnitude of 1 has no factors; zero
/// has [`Sign::Zero`] and no factors.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Factorization {
    sign: Sign,
    factors: Vec<(u64, u32)>,
}

/// Factorize an integer.
pub fn factorize(n: i64) -> Factorization {
    let sign = Sign::of(n);
    let mut m: u64 = n.unsigned_abs();
    let mut factors: Vec<(u64, u32)> = Vec::new();
    if m <= 1 { return Factorization { sign, factors }; }
    let mut divide_out = |m: &mut u64, p: u64| {
        let mut k: u32 = 0;
        while *m % p == 0 {
            *m /= p;
            k += 1;
        }
        if k > 0 { factors.push((p, k)); }
    };
    for &p in SMALL_PRIMES.iter() {
        if p * p > m { break; }
        divide_out(&mut m, p);
    }
    let mut p = SIEVE_LIMIT as u64 | 1;
    while p.checked_mul(p).is_some_and(|pp| pp <= m) {
        divide_out(&mut m, p);
        p += 2;
    }
    if m > 1 { factors.push((m, 1)); }
    Factorization { sign, factors }
}

const SUPERSCRIPTS: [char; 10] = ['⁰', '¹', '²', '³', '⁴', '⁵', '⁶', '⁷', '⁸', '⁹'];

fn superscript(k: u32) -> String {
    k.to_string().chars()
        .map(|c| SUPERSCRIPTS[c.to_digit(10).unwrap_or(0) as usize])
        .collect()
}

impl Factorization {
    /// Return the sign.
    pub fn sign(&self) -> Sign { self.sign }

    /// Return the `(prime, exponent)` pairs in increasing order of prime.
    pub fn factors(&self) -> &[(u64, u32)] { &self.factors }

    /// Return `true` if the magnitude is 1.
    pub fn is_unit(&self) -> bool {
        self.sign != Sign::Zero && self.factors.is_empty()
    }

    /// Multiply the factors back out, without the sign.
    pub fn magnitude(&self) -> u64 {
        if self.sign == Sign::Zero { return 0; }
        self.factors.iter()
            .map(|(p, k)| p.pow(*k))
            .product()
    }

    /// Multiply everything back out.
    pub fn value(&self) -> i64 {
        let v = self.sign.as_int() as i128 * self.magnitude() as i128;
        i64::try_from(v)
            .unwrap_or_else(|_| panic!("factorization value out of range"))
    }

    fn render_magnitude(&self, latex: bool) -> String {
        if self.sign == Sign::Zero { return "0".to_string(); }
        if self.factors.is_empty() { return "1".to_string(); }
        self.factors.iter()
            .map(|(p, k)| {
                match (*k, latex) {
                    (1, _) => p.to_string(),
                    (k, false) => format!("{p}{}", superscript(k)),
                    (k, true) => format!("{p}^{{{k}}}"),
                }
            })
            .join(if latex { " \\cdot " } else { "·" })
    }

    /// Render the magnitude only (`"2²·3"`).
    pub fn magnitude_string(&self) -> String { self.render_magnitude(false) }

    /// Render as LaTeX (`"-2^{2} \cdot 3"`).
    pub fn latex(&self) -> String {
        let sign = if self.sign == Sign::Neg { "-" } else { "" };
        format!("{sign}{}", self.render_magnitude(true))
    }
}

impl fmt::Display for Factorization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.sign == Sign::Neg { write!(f, "-")?; }
        write!(f, "{}", self.render_magnitude(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn small_values() {
        assert_eq!(factorize(0).to_string(), "0");
        assert_eq!(factorize(1).to_string(), "1");
        assert_eq!(factorize(-1).to_string(), "-1");
        assert!(factorize(-1).is_unit());
        assert_eq!(factorize(12).to_string(), "2²·3");
        assert_eq!(factorize(-7).factors(), &[(7, 1)]);
        assert_eq!(factorize(360).latex(), "2^{3} \\cdot 3^{2} \\cdot 5");
    }

    #[test]
    fn large_values() {
        // 2^63 and a prime above the sieve
        let f = factorize(i64::MIN);
        assert_eq!(f.factors(), &[(2, 63)]);
        assert_eq!(f.value(), i64::MIN);
        let p: i64 = 1_000_000_007;
        assert_eq!(factorize(p).factors(), &[(p as u64, 1)]);
        assert_eq!(factorize(4099 * 4099).factors(), &[(4099, 2)]);
    }

    proptest! {
        #[test]
        fn multiplies_back(n in -10_000_000_000_i64..10_000_000_000) {
            let f = factorize(n);
            prop_assert_eq!(f.sign().as_int(), n.signum());
            prop_assert_eq!(f.magnitude(), n.unsigned_abs());
            prop_assert!(f.factors().windows(2).all(|w| w[0].0 < w[1].0));
        }
    }
}
