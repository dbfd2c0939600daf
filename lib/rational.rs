//! Exact rational numbers.
//!
//! [`Rational`] is a reduced fraction of two `i64`s with positive denominator.
//! It implements [`Num`], so that `Complex<Rational>` (see [`CRational`]) can
//! be used for exact complex arithmetic through [`num_complex`].
//!
//! Intermediate results are computed in `i128` and reduced before being
//! narrowed back down; if a reduced result does not fit in an `i64`, the
//! operation panics in the same way that primitive integer overflow does.
//!
//! ```
//! use spinferm::rational::Rational;
//!
//! let a = Rational::new(3, 4);
//! let b = Rational::new(-1, 6);
//! assert_eq!(a + b, Rational::new(7, 12));
//! assert_eq!(Rational::approximate(0.375, 1e-10), Ok(Rational::new(3, 8)));
//! assert_eq!(Rational::from_decimal("-1.25e-3"), Some(Rational::new(-1, 800)));
//! ```

use std::{
    cmp::Ordering,
    fmt,
    ops::{ Add, Div, Mul, Neg, Rem, Sub },
    str::FromStr,
};
use num_complex::Complex;
use num_traits::{ Num, One, Signed, Zero };
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RationalError {
    /// Returned when a numerator or denominator fails to parse as an integer.
    #[error("error parsing rational: invalid integer '{0}'")]
    InvalidInteger(String),

    /// Returned when a parsed denominator is zero.
    #[error("error parsing rational: zero denominator")]
    ZeroDenominator,

    /// Returned when attempting to rationalize a NaN or infinite value.
    #[error("error in rationalization: non-finite value {0}")]
    NonFinite(f64),

    /// Returned when a finite value is too large in magnitude for an `i64`
    /// numerator.
    #[error("error in rationalization: value {0} out of range")]
    OutOfRange(f64),

    /// Returned when no fraction with denominator at most
    /// [`MAX_APPROX_DENOM`] lies within tolerance of a value.
    #[error("error in rationalization: {0} cannot be represented within tolerance")]
    Unrepresentable(f64),
}
use RationalError::*;
pub type RationalResult<T> = Result<T, RationalError>;

/// Exact complex rational number.
pub type CRational = Complex<Rational>;

/// Largest denominator produced by [`Rational::approximate`].
pub const MAX_APPROX_DENOM: i128 = 1_000_000_000;

fn gcd(mut a: i128, mut b: i128) -> i128 {
    a = a.abs();
    b = b.abs();
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

fn narrow(x: i128) -> i64 {
    i64::try_from(x)
        .unwrap_or_else(|_| panic!("overflow in rational arithmetic"))
}

/// A reduced fraction `num / den` with `den > 0`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rational {
    num: i64,
    den: i64,
}

impl Rational {
    /// Create a new rational number, reducing to lowest terms.
    ///
    /// *Panics* if `den` is zero.
    pub fn new(num: i64, den: i64) -> Self {
        Self::from_wide(num as i128, den as i128)
    }

    /// Like [`new`][Self::new], but returning `None` for a zero denominator.
    pub fn checked_new(num: i64, den: i64) -> Option<Self> {
        (den != 0).then(|| Self::new(num, den))
    }

    fn from_wide(num: i128, den: i128) -> Self {
        if den == 0 { panic!("rational with zero denominator"); }
        let g = gcd(num, den);
        let (mut num, mut den) = (num / g, den / g);
        if den < 0 {
            num = -num;
            den = -den;
        }
        Self { num: narrow(num), den: narrow(den) }
    }

    /// Create a rational number equal to an integer.
    pub const fn from_integer(n: i64) -> Self { Self { num: n, den: 1 } }

    /// Return the numerator.
    pub fn numer(&self) -> i64 { self.num }

    /// Return the (always positive) denominator.
    pub fn denom(&self) -> i64 { self.den }

    /// Return `true` if `self` has denominator 1.
    pub fn is_integer(&self) -> bool { self.den == 1 }

    /// Return the integer value of `self`, if it is an integer.
    pub fn to_integer(&self) -> Option<i64> {
        self.is_integer().then_some(self.num)
    }

    /// Return the multiplicative inverse.
    ///
    /// *Panics* if `self` is zero.
    pub fn recip(&self) -> Self {
        Self::from_wide(self.den as i128, self.num as i128)
    }

    /// Convert to the nearest `f64`.
    pub fn to_f64(&self) -> f64 { self.num as f64 / self.den as f64 }

    /// Find a rational approximation to `x` via continued fractions.
    ///
    /// Convergents are generated until one lies within `tol * |x|` of `x`,
    /// with zero mapped to zero exactly. Denominators are bounded by
    /// [`MAX_APPROX_DENOM`]; if the bound is reached before any convergent is
    /// close enough, `x` is reported as unrepresentable rather than rounded.
    ///
    /// *Fails* if `x` is not finite or too large for an `i64` numerator.
    pub fn approximate(x: f64, tol: f64) -> RationalResult<Self> {
        if !x.is_finite() { return Err(NonFinite(x)); }
        if x.abs() >= i64::MAX as f64 { return Err(OutOfRange(x)); }
        if x == 0.0 { return Ok(Self::zero()); }
        let target = tol.abs() * x.abs();
        // (h1 / k1) is the latest convergent, (h0 / k0) the one before
        let (mut h0, mut h1): (i128, i128) = (0, 1);
        let (mut k0, mut k1): (i128, i128) = (1, 0);
        let mut r = x;
        for _ in 0..64 {
            let a = r.floor();
            let ai = a as i128;
            let h2 = ai * h1 + h0;
            let k2 = ai * k1 + k0;
            if k2 > MAX_APPROX_DENOM || h2.abs() > i64::MAX as i128 { break; }
            (h0, h1) = (h1, h2);
            (k0, k1) = (k1, k2);
            if (x - h1 as f64 / k1 as f64).abs() <= target {
                return Ok(Self::from_wide(h1, k1));
            }
            let frac = r - a;
            if frac == 0.0 { break; }
            r = frac.recip();
        }
        Err(Unrepresentable(x))
    }

    /// Parse a decimal literal such as `"0.25"`, `"-3."`, or `"1.5e-7"`
    /// exactly.
    ///
    /// Returns `None` if `s` is not a decimal literal or its value does not
    /// fit in an `i64` fraction.
    pub fn from_decimal(s: &str) -> Option<Self> {
        let s = s.trim();
        let (mant, exp) =
            match s.split_once(['e', 'E']) {
                Some((m, e)) => (m, e.parse::<i32>().ok()?),
                None => (s, 0),
            };
        let (neg, mant) =
            match mant.strip_prefix('-') {
                Some(rest) => (true, rest),
                None => (false, mant.strip_prefix('+').unwrap_or(mant)),
            };
        let (int, frac) = mant.split_once('.').unwrap_or((mant, ""));
        let is_digits = |t: &str| t.chars().all(|c| c.is_ascii_digit());
        if (int.is_empty() && frac.is_empty()) || !is_digits(int) || !is_digits(frac) {
            return None;
        }
        let digits: i128 = format!("{int}{frac}").parse().ok()?;
        let shift = exp.checked_sub(i32::try_from(frac.len()).ok()?)?;
        let pow = 10_i128.checked_pow(shift.unsigned_abs())?;
        let (num, den) =
            if shift >= 0 { (digits.checked_mul(pow)?, 1) } else { (digits, pow) };
        let g = gcd(num, den);
        let num = i64::try_from(num / g).ok()?;
        let den = i64::try_from(den / g).ok()?;
        Some(Self::new(if neg { -num } else { num }, den))
    }
}

impl Default for Rational {
    fn default() -> Self { Self::zero() }
}

impl From<i64> for Rational {
    fn from(n: i64) -> Self { Self::from_integer(n) }
}

impl From<i32> for Rational {
    fn from(n: i32) -> Self { Self::from_integer(n as i64) }
}

impl PartialOrd for Rational {
    fn partial_cmp(&self, rhs: &Self) -> Option<Ordering> { Some(self.cmp(rhs)) }
}

impl Ord for Rational {
    fn cmp(&self, rhs: &Self) -> Ordering {
        (self.num as i128 * rhs.den as i128)
            .cmp(&(rhs.num as i128 * self.den as i128))
    }
}

impl Add for Rational {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        let (a, b) = (self.num as i128, self.den as i128);
        let (c, d) = (rhs.num as i128, rhs.den as i128);
        Self::from_wide(a * d + c * b, b * d)
    }
}

impl Sub for Rational {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self { self + (-rhs) }
}

impl Mul for Rational {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::from_wide(
            self.num as i128 * rhs.num as i128,
            self.den as i128 * rhs.den as i128,
        )
    }
}

impl Div for Rational {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        if rhs.num == 0 { panic!("attempt to divide a rational by zero"); }
        Self::from_wide(
            self.num as i128 * rhs.den as i128,
            self.den as i128 * rhs.num as i128,
        )
    }
}

impl Rem for Rational {
    type Output = Self;

    // truncated remainder, matching the sign convention of the primitives
    fn rem(self, rhs: Self) -> Self {
        if rhs.num == 0 { panic!("attempt to take a rational remainder by zero"); }
        let q = self / rhs;
        let trunc = Self::from_integer(q.num / q.den);
        self - rhs * trunc
    }
}

impl Neg for Rational {
    type Output = Self;

    fn neg(self) -> Self {
        Self { num: narrow(-(self.num as i128)), den: self.den }
    }
}

impl Zero for Rational {
    fn zero() -> Self { Self::from_integer(0) }

    fn is_zero(&self) -> bool { self.num == 0 }
}

impl One for Rational {
    fn one() -> Self { Self::from_integer(1) }
}

impl Num for Rational {
    type FromStrRadixErr = RationalError;

    fn from_str_radix(s: &str, radix: u32) -> RationalResult<Self> {
        let parse_int = |t: &str| -> RationalResult<i64> {
            i64::from_str_radix(t.trim(), radix)
                .map_err(|_| InvalidInteger(t.trim().to_string()))
        };
        match s.split_once('/') {
            Some((n, d)) => {
                let num = parse_int(n)?;
                let den = parse_int(d)?;
                Self::checked_new(num, den).ok_or(ZeroDenominator)
            },
            None => parse_int(s).map(Self::from_integer),
        }
    }
}

impl Signed for Rational {
    fn abs(&self) -> Self {
        if self.num < 0 { -*self } else { *self }
    }

    fn abs_sub(&self, other: &Self) -> Self {
        if self <= other { Self::zero() } else { *self - *other }
    }

    fn signum(&self) -> Self { Self::from_integer(self.num.signum()) }

    fn is_positive(&self) -> bool { self.num > 0 }

    fn is_negative(&self) -> bool { self.num < 0 }
}

impl FromStr for Rational {
    type Err = RationalError;

    fn from_str(s: &str) -> RationalResult<Self> { Self::from_str_radix(s, 10) }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.den == 1 {
            write!(f, "{}", self.num)
        } else {
            write!(f, "{}/{}", self.num, self.den)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn reduces_to_lowest_terms() {
        let q = Rational::new(6, -4);
        assert_eq!(q.numer(), -3);
        assert_eq!(q.denom(), 2);
        assert_eq!(q.to_string(), "-3/2");
        assert_eq!(Rational::new(10, 5).to_string(), "2");
    }

    #[test]
    fn arithmetic() {
        let a = Rational::new(1, 2);
        let b = Rational::new(1, 3);
        assert_eq!(a + b, Rational::new(5, 6));
        assert_eq!(a - b, Rational::new(1, 6));
        assert_eq!(a * b, Rational::new(1, 6));
        assert_eq!(a / b, Rational::new(3, 2));
        assert_eq!(Rational::new(7, 2) % Rational::from(2), Rational::new(3, 2));
        assert_eq!(Rational::new(-7, 2) % Rational::from(2), Rational::new(-3, 2));
        assert!(a > b);
    }

    #[test]
    fn parses() {
        assert_eq!("-3/6".parse::<Rational>(), Ok(Rational::new(-1, 2)));
        assert_eq!(" 4 ".parse::<Rational>(), Ok(Rational::from(4)));
        assert_eq!("1/0".parse::<Rational>(), Err(ZeroDenominator));
        assert!(matches!("x/2".parse::<Rational>(), Err(InvalidInteger(_))));
    }

    #[test]
    fn approximates_floats() {
        assert_eq!(Rational::approximate(-7.0, 1e-10), Ok(Rational::from(-7)));
        assert_eq!(Rational::approximate(0.1, 1e-10), Ok(Rational::new(1, 10)));
        assert_eq!(
            Rational::approximate(-2.0 / 3.0, 1e-10),
            Ok(Rational::new(-2, 3)),
        );
        assert_eq!(Rational::approximate(0.0, 1e-10), Ok(Rational::zero()));
        assert_eq!(Rational::approximate(1e-6, 1e-10), Ok(Rational::new(1, 1_000_000)));
        assert!(matches!(Rational::approximate(f64::NAN, 1e-10), Err(NonFinite(_))));
        assert!(matches!(Rational::approximate(f64::INFINITY, 1e-10), Err(NonFinite(_))));
        assert_eq!(Rational::approximate(1e19, 1e-10), Err(OutOfRange(1e19)));
    }

    #[test]
    fn small_floats_are_not_rounded_to_zero() {
        for x in [1e-11, -3e-10, 1e-12] {
            assert_eq!(Rational::approximate(x, 1e-10), Err(Unrepresentable(x)));
        }
    }

    #[test]
    fn decimals() {
        assert_eq!(Rational::from_decimal("0.25"), Some(Rational::new(1, 4)));
        assert_eq!(Rational::from_decimal("-3."), Some(Rational::from(-3)));
        assert_eq!(Rational::from_decimal(".5"), Some(Rational::new(1, 2)));
        assert_eq!(Rational::from_decimal("1e-12"), Some(Rational::new(1, 1_000_000_000_000)));
        assert_eq!(Rational::from_decimal("+2.5E2"), Some(Rational::from(250)));
        assert_eq!(Rational::from_decimal("1e40"), None);
        assert_eq!(Rational::from_decimal("."), None);
        assert_eq!(Rational::from_decimal("nan"), None);
        assert_eq!(Rational::from_decimal("mu"), None);
    }

    #[test]
    fn complex_rationals() {
        let i = CRational::i();
        let half = CRational::new(Rational::new(1, 2), Rational::zero());
        assert_eq!(i * i, -CRational::one());
        assert_eq!((half + i).conj(), CRational::new(Rational::new(1, 2), -Rational::one()));
        assert_eq!(CRational::one() / i, -i);
    }

    proptest! {
        #[test]
        fn add_sub_inverse(a in -1000_i64..1000, b in 1_i64..1000, c in -1000_i64..1000, d in 1_i64..1000) {
            let x = Rational::new(a, b);
            let y = Rational::new(c, d);
            prop_assert_eq!(x + y - y, x);
            prop_assert!(x.denom() > 0);
        }

        #[test]
        fn approximate_recovers_small_fractions(p in -500_i64..500, q in 1_i64..500) {
            let x = Rational::new(p, q);
            prop_assert_eq!(Rational::approximate(x.to_f64(), 1e-12), Ok(x));
        }
    }
}
