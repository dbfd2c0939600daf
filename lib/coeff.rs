//! Exact, possibly symbolic, operator coefficients.
//!
//! A [`Coeff`] is a polynomial in any number of named, real-valued free
//! parameters whose monomial coefficients are exact complex rationals
//! ([`CRational`]). Plain numbers are constant polynomials. The polynomial is
//! always held in canonical form (monomials sorted, no zero entries), so that
//! structural equality coincides with algebraic equality.
//!
//! ```
//! use spinferm::coeff::Coeff;
//!
//! let t = Coeff::param("t");
//! let mu = Coeff::param("mu");
//! let c = &t * &t * 2 - &mu + Coeff::from(3);
//! assert_eq!(c.to_string(), "3 - mu + 2*t^2");
//! assert_eq!(c.subs("t", &Coeff::from(2)).subs("mu", &Coeff::from(1)).as_integer(), Some(10));
//! ```

use std::{
    collections::{ BTreeMap, BTreeSet },
    fmt,
    iter::{ Product, Sum },
    ops::{ Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign },
    str::FromStr,
};
use itertools::Itertools;
use num_traits::{ One, Signed, Zero };
use thiserror::Error;
use crate::rational::{ CRational, Rational, RationalError };

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoeffError {
    /// Returned when a float cannot be turned into an exact rational.
    #[error("error in coefficient creation: {0}")]
    Rationalize(#[from] RationalError),

    /// Returned when a coefficient string is neither a number nor a parameter
    /// name.
    #[error("error parsing coefficient: '{0}'")]
    Parse(String),
}
use CoeffError::*;
pub type CoeffResult<T> = Result<T, CoeffError>;

/// Relative tolerance used when rationalizing floats.
pub const RATIONALIZE_TOL: f64 = 1e-10;

/// A product of free parameters raised to positive integer powers.
///
/// Factors are kept sorted by parameter name, with no zero powers. The empty
/// monomial is the constant 1.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Monomial(Vec<(String, u32)>);

impl Monomial {
    /// The monomial of a single parameter.
    pub fn param(name: &str) -> Self { Self(vec![(name.to_string(), 1)]) }

    /// Return `true` if `self` is the constant monomial.
    pub fn is_const(&self) -> bool { self.0.is_empty() }

    /// Iterate over `(name, power)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.0.iter().map(|(name, p)| (name.as_str(), *p))
    }

    /// Return the power of a parameter in `self`.
    pub fn power_of(&self, name: &str) -> u32 {
        self.0.iter()
            .find(|(n, _)| n == name)
            .map(|(_, p)| *p)
            .unwrap_or(0)
    }

    fn without(&self, name: &str) -> Self {
        Self(self.0.iter().filter(|(n, _)| n != name).cloned().collect())
    }

    fn mul(&self, rhs: &Self) -> Self {
        let merged: Vec<(String, u32)> =
            self.0.iter().cloned()
            .merge_by(rhs.0.iter().cloned(), |l, r| l.0 <= r.0)
            .coalesce(|l, r| {
                if l.0 == r.0 { Ok((l.0, l.1 + r.1)) } else { Err((l, r)) }
            })
            .collect();
        Self(merged)
    }

    fn render(&self, latex: bool) -> String {
        self.0.iter()
            .map(|(name, p)| {
                let name = if latex { latex_param(name) } else { name.clone() };
                match (*p, latex) {
                    (1, _) => name,
                    (p, false) => format!("{name}^{p}"),
                    (p, true) => format!("{name}^{{{p}}}"),
                }
            })
            .join(if latex { " " } else { "*" })
    }
}

// greek parameter names get their LaTeX macro
fn latex_param(name: &str) -> String {
    const GREEK: &[&str] = &[
        "alpha", "beta", "gamma", "delta", "epsilon", "zeta", "eta", "theta",
        "kappa", "lambda", "mu", "nu", "xi", "pi", "rho", "sigma", "tau",
        "phi", "chi", "psi", "omega", "Gamma", "Delta", "Theta", "Lambda",
        "Xi", "Pi", "Sigma", "Phi", "Psi", "Omega",
    ];
    if GREEK.contains(&name) { format!("\\{name}") } else { name.to_string() }
}

// `i` is reserved for the imaginary unit
fn is_param_name(s: &str) -> bool {
    if s == "i" { return false; }
    let mut chars = s.chars();
    chars.next().is_some_and(|c| c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
}

/// Render a complex rational, returning the string and whether it needs to be
/// parenthesized when multiplied by something.
pub(crate) fn render_crational(c: &CRational, latex: bool) -> (String, bool) {
    let rat = |q: &Rational| -> String {
        match (q.is_integer(), latex) {
            (true, _) => q.numer().to_string(),
            (false, false) => q.to_string(),
            (false, true) => {
                let sign = if q.is_negative() { "-" } else { "" };
                format!("{}\\frac{{{}}}{{{}}}", sign, q.numer().abs(), q.denom())
            },
        }
    };
    let imag = |q: &Rational| -> String {
        if q.is_one() {
            "i".to_string()
        } else if (-*q).is_one() {
            "-i".to_string()
        } else if latex {
            format!("{} i", rat(q))
        } else if q.is_integer() {
            format!("{}i", rat(q))
        } else {
            format!("{}*i", rat(q))
        }
    };
    if c.im.is_zero() {
        (rat(&c.re), false)
    } else if c.re.is_zero() {
        (imag(&c.im), false)
    } else {
        let op = if c.im.is_negative() { "-" } else { "+" };
        let s = format!("{} {} {}", rat(&c.re), op, imag(&c.im.abs()));
        (s, true)
    }
}

/// An exact coefficient: a polynomial in real free parameters over the
/// complex rationals.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Coeff {
    terms: BTreeMap<Monomial, CRational>,
}

impl Coeff {
    /// A constant coefficient.
    pub fn constant(c: CRational) -> Self {
        let mut terms = BTreeMap::new();
        if !c.is_zero() { terms.insert(Monomial::default(), c); }
        Self { terms }
    }

    /// A real rational constant.
    pub fn real(q: Rational) -> Self {
        Self::constant(CRational::new(q, Rational::zero()))
    }

    /// The rational constant `num / den`.
    ///
    /// *Panics* if `den` is zero.
    pub fn frac(num: i64, den: i64) -> Self { Self::real(Rational::new(num, den)) }

    /// The imaginary unit.
    pub fn i() -> Self { Self::constant(CRational::i()) }

    /// A single free parameter.
    pub fn param(name: &str) -> Self {
        let mut terms = BTreeMap::new();
        terms.insert(Monomial::param(name), CRational::one());
        Self { terms }
    }

    /// Rationalize a float, with relative tolerance [`RATIONALIZE_TOL`].
    ///
    /// *Fails* if `x` is not finite, out of range, or has no close enough
    /// fraction; nonzero values are never rounded to zero.
    pub fn from_f64(x: f64) -> CoeffResult<Self> {
        Ok(Self::real(Rational::approximate(x, RATIONALIZE_TOL)?))
    }

    /// Rationalize a complex float.
    pub fn from_c64(re: f64, im: f64) -> CoeffResult<Self> {
        let re = Rational::approximate(re, RATIONALIZE_TOL)?;
        let im = Rational::approximate(im, RATIONALIZE_TOL)?;
        Ok(Self::constant(CRational::new(re, im)))
    }

    /// Return the number of monomials in `self`.
    pub fn num_terms(&self) -> usize { self.terms.len() }

    /// Iterate over `(monomial, coefficient)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (&Monomial, &CRational)> + '_ {
        self.terms.iter()
    }

    /// Return `true` if `self` contains no free parameters.
    pub fn is_constant(&self) -> bool {
        self.terms.keys().all(Monomial::is_const)
    }

    /// Return the value of `self` if it contains no free parameters.
    pub fn as_constant(&self) -> Option<CRational> {
        match self.terms.len() {
            0 => Some(CRational::zero()),
            1 => self.terms.get(&Monomial::default()).copied(),
            _ => None,
        }
    }

    /// Return the value of `self` if it is a real integer.
    pub fn as_integer(&self) -> Option<i64> {
        let c = self.as_constant()?;
        if c.im.is_zero() { c.re.to_integer() } else { None }
    }

    /// Return the names of all free parameters, sorted.
    pub fn params(&self) -> Vec<&str> {
        self.terms.keys()
            .flat_map(|mono| mono.0.iter().map(|(name, _)| name.as_str()))
            .collect::<BTreeSet<&str>>()
            .into_iter()
            .collect()
    }

    fn accumulate(&mut self, mono: Monomial, c: CRational) {
        if c.is_zero() { return; }
        let sum = self.terms.get(&mono).copied().unwrap_or_else(CRational::zero) + c;
        if sum.is_zero() {
            self.terms.remove(&mono);
        } else {
            self.terms.insert(mono, sum);
        }
    }

    /// Multiply by a constant.
    pub fn scale(&self, c: CRational) -> Self {
        if c.is_zero() { return Self::zero(); }
        let terms =
            self.terms.iter()
            .map(|(mono, v)| (mono.clone(), *v * c))
            .collect();
        Self { terms }
    }

    /// Complex conjugate, with all free parameters taken to be real.
    pub fn conj(&self) -> Self {
        let terms =
            self.terms.iter()
            .map(|(mono, v)| (mono.clone(), v.conj()))
            .collect();
        Self { terms }
    }

    /// Multiply by the imaginary unit.
    pub fn mul_i(&self) -> Self { self.scale(CRational::i()) }

    /// Divide by the imaginary unit.
    pub fn div_i(&self) -> Self { self.scale(-CRational::i()) }

    /// Raise to a non-negative integer power.
    pub fn pow(&self, p: u32) -> Self {
        (0..p).fold(Self::one(), |acc, _| &acc * self)
    }

    /// Substitute `value` for every occurrence of the parameter `name`.
    pub fn subs(&self, name: &str, value: &Self) -> Self {
        self.terms.iter()
            .map(|(mono, c)| {
                let rest = Self {
                    terms: std::iter::once((mono.without(name), *c)).collect(),
                };
                &rest * &value.pow(mono.power_of(name))
            })
            .sum()
    }

    /// Return `true` if `self` would need parentheses as one factor of a
    /// product.
    pub fn is_compound(&self) -> bool {
        match self.terms.len() {
            0 => false,
            1 => self.terms.iter()
                .all(|(mono, c)| mono.is_const() && render_crational(c, false).1),
            _ => true,
        }
    }

    fn render(&self, latex: bool) -> String {
        if self.terms.is_empty() { return "0".to_string(); }
        let mut out = String::new();
        for (k, (mono, c)) in self.terms.iter().enumerate() {
            let term: String =
                if mono.is_const() {
                    render_crational(c, latex).0
                } else if c.is_one() {
                    mono.render(latex)
                } else if (-*c).is_one() {
                    format!("-{}", mono.render(latex))
                } else {
                    let (cs, paren) = render_crational(c, latex);
                    let sep = if latex { " " } else { "*" };
                    if paren {
                        format!("({cs}){sep}{}", mono.render(latex))
                    } else {
                        format!("{cs}{sep}{}", mono.render(latex))
                    }
                };
            if k == 0 {
                out.push_str(&term);
            } else if let Some(rest) = term.strip_prefix('-') {
                out.push_str(" - ");
                out.push_str(rest);
            } else {
                out.push_str(" + ");
                out.push_str(&term);
            }
        }
        out
    }

    /// Render as LaTeX.
    pub fn latex(&self) -> String { self.render(true) }
}

impl fmt::Display for Coeff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(false))
    }
}

impl FromStr for Coeff {
    type Err = CoeffError;

    /// Parse an integer (`"-7"`), a fraction (`"3/2"`), a decimal (`"0.25"`,
    /// `"1e-12"`, read exactly), or an optionally negated parameter name
    /// (`"-mu"`). Other float syntax is rationalized.
    fn from_str(s: &str) -> CoeffResult<Self> {
        let s = s.trim();
        if let Ok(q) = s.parse::<Rational>() {
            return Ok(Self::real(q));
        }
        if let Some(q) = Rational::from_decimal(s) {
            return Ok(Self::real(q));
        }
        if let Ok(x) = s.parse::<f64>() {
            return Self::from_f64(x);
        }
        let (neg, name) =
            match s.strip_prefix('-') {
                Some(rest) => (true, rest.trim()),
                None => (false, s),
            };
        if is_param_name(name) {
            let p = Self::param(name);
            Ok(if neg { -p } else { p })
        } else {
            Err(Parse(s.to_string()))
        }
    }
}

impl From<CRational> for Coeff {
    fn from(c: CRational) -> Self { Self::constant(c) }
}

impl From<Rational> for Coeff {
    fn from(q: Rational) -> Self { Self::real(q) }
}

impl From<i64> for Coeff {
    fn from(n: i64) -> Self { Self::real(Rational::from(n)) }
}

impl From<i32> for Coeff {
    fn from(n: i32) -> Self { Self::real(Rational::from(n)) }
}

impl From<&Coeff> for Coeff {
    fn from(c: &Coeff) -> Self { c.clone() }
}

impl<'a> Add<&'a Coeff> for &'a Coeff {
    type Output = Coeff;

    fn add(self, rhs: &'a Coeff) -> Coeff {
        let mut out = self.clone();
        out += rhs;
        out
    }
}

impl<'a> Sub<&'a Coeff> for &'a Coeff {
    type Output = Coeff;

    fn sub(self, rhs: &'a Coeff) -> Coeff {
        let mut out = self.clone();
        out -= rhs;
        out
    }
}

impl<'a> Mul<&'a Coeff> for &'a Coeff {
    type Output = Coeff;

    fn mul(self, rhs: &'a Coeff) -> Coeff {
        let mut out = Coeff::zero();
        for ((m_l, c_l), (m_r, c_r)) in self.terms.iter().cartesian_product(rhs.terms.iter()) {
            out.accumulate(m_l.mul(m_r), *c_l * *c_r);
        }
        out
    }
}

impl AddAssign<&Coeff> for Coeff {
    fn add_assign(&mut self, rhs: &Coeff) {
        rhs.terms.iter()
            .for_each(|(mono, c)| { self.accumulate(mono.clone(), *c); });
    }
}

impl SubAssign<&Coeff> for Coeff {
    fn sub_assign(&mut self, rhs: &Coeff) {
        rhs.terms.iter()
            .for_each(|(mono, c)| { self.accumulate(mono.clone(), -*c); });
    }
}

impl MulAssign<&Coeff> for Coeff {
    fn mul_assign(&mut self, rhs: &Coeff) { *self = &*self * rhs; }
}

impl Neg for &Coeff {
    type Output = Coeff;

    fn neg(self) -> Coeff { self.scale(-CRational::one()) }
}

impl Neg for Coeff {
    type Output = Coeff;

    fn neg(self) -> Coeff { -&self }
}

macro_rules! impl_binop_owned {
    ( $trait:ident, $fn:ident, $assign_trait:ident, $assign_fn:ident ) => {
        impl $trait<Coeff> for Coeff {
            type Output = Coeff;

            fn $fn(self, rhs: Coeff) -> Coeff { (&self).$fn(&rhs) }
        }

        impl $trait<&Coeff> for Coeff {
            type Output = Coeff;

            fn $fn(self, rhs: &Coeff) -> Coeff { (&self).$fn(rhs) }
        }

        impl $trait<Coeff> for &Coeff {
            type Output = Coeff;

            fn $fn(self, rhs: Coeff) -> Coeff { self.$fn(&rhs) }
        }

        impl $trait<i64> for Coeff {
            type Output = Coeff;

            fn $fn(self, rhs: i64) -> Coeff { (&self).$fn(&Coeff::from(rhs)) }
        }

        impl $trait<i64> for &Coeff {
            type Output = Coeff;

            fn $fn(self, rhs: i64) -> Coeff { self.$fn(&Coeff::from(rhs)) }
        }

        impl $assign_trait<Coeff> for Coeff {
            fn $assign_fn(&mut self, rhs: Coeff) { self.$assign_fn(&rhs); }
        }
    }
}
impl_binop_owned!(Add, add, AddAssign, add_assign);
impl_binop_owned!(Sub, sub, SubAssign, sub_assign);
impl_binop_owned!(Mul, mul, MulAssign, mul_assign);

impl Zero for Coeff {
    fn zero() -> Self { Self { terms: BTreeMap::new() } }

    fn is_zero(&self) -> bool { self.terms.is_empty() }
}

impl One for Coeff {
    fn one() -> Self { Self::constant(CRational::one()) }
}

impl Sum for Coeff {
    fn sum<I>(iter: I) -> Self
    where I: Iterator<Item = Self>
    {
        iter.fold(Self::zero(), |mut acc, c| { acc += &c; acc })
    }
}

impl Product for Coeff {
    fn product<I>(iter: I) -> Self
    where I: Iterator<Item = Self>
    {
        iter.fold(Self::one(), |acc, c| &acc * &c)
    }
}
