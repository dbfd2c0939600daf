//! Pauli (spin-1/2) operators.
//!
//! Terms are products of single-site Pauli matrices. Products are reduced with
//! the usual rules
//!
//! <blockquote>
//!   <p style="font-size:20px">
//!     <i>σ</i><sub><i>a</i></sub> <i>σ</i><sub><i>b</i></sub>
//!       = <i>δ</i><sub><i>ab</i></sub>
//!       + <i>i</i> <i>ε</i><sub><i>abc</i></sub> <i>σ</i><sub><i>c</i></sub>
//!   </p>
//! </blockquote>
//!
//! so that a canonical term holds at most one Pauli per site, sorted by site.
//!
//! ```
//! use spinferm::pauli::{ parse_term, QubitOperator };
//!
//! let xy = QubitOperator::term(parse_term("X0 Y1").unwrap(), 3);
//! let yx = QubitOperator::term(parse_term("Y0 X1").unwrap(), 3);
//! // the two terms commute
//! assert_eq!(&xy * &yx, &yx * &xy);
//! assert_eq!((&xy * &yx).to_string(), "3² Z₀ Z₁");
//! ```

use std::fmt;
use num_traits::{ One, Zero };
use thiserror::Error;
use crate::{
    algebra::{ Algebra, OpExpr, Variant },
    coeff::Coeff,
    expr::{ OpSymbol, SymbolKind },
    rational::CRational,
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TermError {
    /// Returned when a factor of a term string has an unrecognized operator
    /// label.
    #[error("error parsing term: invalid operator label in '{0}'")]
    InvalidLabel(String),

    /// Returned when a factor of a term string has a missing or invalid site
    /// index.
    #[error("error parsing term: invalid site index in '{0}'")]
    InvalidSite(String),
}
use TermError::*;
pub type TermResult<T> = Result<T, TermError>;

/// A single Pauli matrix.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Pauli {
    X,
    Y,
    Z,
}

impl Pauli {
    /// Return `true` if `self` is `X`.
    pub fn is_x(&self) -> bool { matches!(self, Self::X) }

    /// Return `true` if `self` is `Y`.
    pub fn is_y(&self) -> bool { matches!(self, Self::Y) }

    /// Return `true` if `self` is `Z`.
    pub fn is_z(&self) -> bool { matches!(self, Self::Z) }

    /// Return the letter naming `self`.
    pub fn letter(&self) -> char {
        match self {
            Self::X => 'X',
            Self::Y => 'Y',
            Self::Z => 'Z',
        }
    }

    /// Compute the product `self × rhs` as a phase and an optional Pauli (the
    /// identity being `None`).
    pub fn product(self, rhs: Self) -> (CRational, Option<Self>) {
        use Pauli::*;
        let i = CRational::i();
        match (self, rhs) {
            (X, X) | (Y, Y) | (Z, Z) => (CRational::one(), None),
            (X, Y) => (i, Some(Z)),
            (Y, Z) => (i, Some(X)),
            (Z, X) => (i, Some(Y)),
            (Y, X) => (-i, Some(Z)),
            (Z, Y) => (-i, Some(X)),
            (X, Z) => (-i, Some(Y)),
        }
    }
}

impl fmt::Display for Pauli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Marker for the Pauli algebra.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Spin;

impl Algebra for Spin {
    type Factor = (usize, Pauli);

    const VARIANT: Variant = Variant::Spin;

    fn site(factor: &(usize, Pauli)) -> usize { factor.0 }

    fn symbol(factor: &(usize, Pauli)) -> OpSymbol {
        OpSymbol::new(factor.0, SymbolKind::Pauli(factor.1))
    }

    fn adjoint(factor: &(usize, Pauli)) -> (usize, Pauli) { *factor }

    fn reduce(mut factors: Vec<(usize, Pauli)>)
        -> (CRational, Vec<(usize, Pauli)>)
    {
        // stable sort: operators on different sites commute, those on the
        // same site keep their relative order
        factors.sort_by_key(|(k, _)| *k);
        let mut phase = CRational::one();
        let mut reduced: Vec<(usize, Pauli)> = Vec::with_capacity(factors.len());
        for (k, p) in factors.into_iter() {
            match reduced.last().copied() {
                Some((k_last, p_last)) if k_last == k => {
                    reduced.pop();
                    let (ph, mb_p) = p_last.product(p);
                    phase = phase * ph;
                    if let Some(p_new) = mb_p { reduced.push((k, p_new)); }
                },
                _ => { reduced.push((k, p)); },
            }
        }
        (phase, reduced)
    }
}

/// A linear combination of Pauli strings.
pub type QubitOperator = OpExpr<Spin>;

/// Parse a whitespace-separated Pauli string such as `"X0 Y1 Z3"`.
///
/// The returned factors are in the order given; they are only reduced once
/// used to build a [`QubitOperator`].
pub fn parse_term(s: &str) -> TermResult<Vec<(usize, Pauli)>> {
    s.split_whitespace()
        .map(|tok| {
            let mut chars = tok.chars();
            let p =
                match chars.next() {
                    Some('X') | Some('x') => Pauli::X,
                    Some('Y') | Some('y') => Pauli::Y,
                    Some('Z') | Some('z') => Pauli::Z,
                    _ => { return Err(InvalidLabel(tok.to_string())); },
                };
            let k: usize =
                chars.as_str().parse()
                .map_err(|_| InvalidSite(tok.to_string()))?;
            Ok((k, p))
        })
        .collect()
}

impl OpExpr<Spin> {
    /// A single Pauli on one site.
    pub fn pauli<C>(site: usize, p: Pauli, coeff: C) -> Self
    where C: Into<Coeff>
    {
        Self::term(vec![(site, p)], coeff)
    }

    /// Build an operator from `(term string, coefficient)` pairs.
    pub fn from_strs<'a, I, C>(terms: I) -> TermResult<Self>
    where
        I: IntoIterator<Item = (&'a str, C)>,
        C: Into<Coeff>,
    {
        let mut new = Self::zero();
        for (s, c) in terms.into_iter() {
            new.add_term(parse_term(s)?, c.into());
        }
        Ok(new)
    }

    /// Return `true` if every coefficient is real, i.e. the operator is
    /// Hermitian when all free parameters are real.
    pub fn is_hermitian(&self) -> bool {
        self.terms()
            .all(|(_, c)| c.iter().all(|(_, v)| v.im.is_zero()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Pauli::*;

    #[test]
    fn product_table() {
        let i = CRational::i();
        assert_eq!(X.product(Y), (i, Some(Z)));
        assert_eq!(Y.product(X), (-i, Some(Z)));
        assert_eq!(Z.product(Z), (CRational::one(), None));
        assert_eq!(X.product(Z), (-i, Some(Y)));
    }

    #[test]
    fn reduction() {
        let (phase, t) = Spin::reduce(vec![(1, X), (0, Z), (1, Y), (1, Y)]);
        assert_eq!(phase, CRational::one());
        assert_eq!(t, vec![(0, Z), (1, X)]);
        let (phase, t) = Spin::reduce(vec![(2, Z), (2, X)]);
        assert_eq!(phase, CRational::i());
        assert_eq!(t, vec![(2, Y)]);
    }

    #[test]
    fn anticommutation() {
        let x = QubitOperator::pauli(0, X, 1);
        let y = QubitOperator::pauli(0, Y, 1);
        assert!((&(&x * &y) + &(&y * &x)).is_zero());
        let x1 = QubitOperator::pauli(1, X, 1);
        assert_eq!(&x1 * &y, &y * &x1);
    }

    #[test]
    fn parsing() {
        assert_eq!(parse_term("X0 y12"), Ok(vec![(0, X), (12, Y)]));
        assert_eq!(parse_term(""), Ok(vec![]));
        assert_eq!(parse_term("W0"), Err(InvalidLabel("W0".to_string())));
        assert_eq!(parse_term("Z"), Err(InvalidSite("Z".to_string())));
        let op = QubitOperator::from_strs([("X0 X1", 2), ("Z0", -1)]).unwrap();
        assert_eq!(op.get(&[(0, X), (1, X)]), Coeff::from(2));
        assert!(op.is_hermitian());
    }
}
