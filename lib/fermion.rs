//! Fermionic creation and annihilation operators.
//!
//! Products of ladder operators are stored exactly as written; use
//! [`normal_ordered`] to bring an operator into the canonical form where all
//! creation operators stand to the left of all annihilation operators, each
//! group in descending order of site index. Normal ordering applies the
//! canonical anticommutation relations
//!
//! <blockquote>
//!   <p style="font-size:20px">
//!     { <i>a</i><sub><i>p</i></sub>, <i>a</i><sup>†</sup><sub><i>q</i></sub> }
//!       = <i>δ</i><sub><i>pq</i></sub>,
//!     { <i>a</i><sub><i>p</i></sub>, <i>a</i><sub><i>q</i></sub> } = 0
//!   </p>
//! </blockquote>
//!
//! ```
//! use spinferm::fermion::{ normal_ordered, parse_term, FermionOperator };
//!
//! // a_0 a†_0 = 1 - a†_0 a_0
//! let op = FermionOperator::term(parse_term("0 0^").unwrap(), 1);
//! let expected = FermionOperator::identity(1)
//!     - FermionOperator::term(parse_term("0^ 0").unwrap(), 1);
//! assert_eq!(normal_ordered(&op), expected);
//! ```

use std::fmt;
use num_traits::{ One, Zero };
use tracing::trace;
use crate::{
    algebra::{ Algebra, OpExpr, Variant },
    coeff::Coeff,
    expr::{ OpSymbol, SymbolKind },
    pauli::{ TermError, TermResult },
    rational::CRational,
};

/// A single ladder operator.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Ladder {
    /// Annihilation, *a*.
    Annihilate,
    /// Creation, *a*<sup>†</sup>.
    Create,
}

impl Ladder {
    /// Return `true` if `self` is `Create`.
    pub fn is_create(&self) -> bool { matches!(self, Self::Create) }

    /// Return `true` if `self` is `Annihilate`.
    pub fn is_annihilate(&self) -> bool { matches!(self, Self::Annihilate) }

    /// Return the Hermitian adjoint.
    pub fn flip(self) -> Self {
        match self {
            Self::Create => Self::Annihilate,
            Self::Annihilate => Self::Create,
        }
    }
}

impl fmt::Display for Ladder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create => write!(f, "^"),
            Self::Annihilate => Ok(()),
        }
    }
}

/// Marker for the fermionic ladder algebra.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Fermion;

impl Algebra for Fermion {
    type Factor = (usize, Ladder);

    const VARIANT: Variant = Variant::Fermion;

    fn site(factor: &(usize, Ladder)) -> usize { factor.0 }

    fn symbol(factor: &(usize, Ladder)) -> OpSymbol {
        match factor.1 {
            Ladder::Create => OpSymbol::new(factor.0, SymbolKind::Create),
            Ladder::Annihilate => OpSymbol::new(factor.0, SymbolKind::Annihilate),
        }
    }

    fn adjoint(factor: &(usize, Ladder)) -> (usize, Ladder) {
        (factor.0, factor.1.flip())
    }

    // products are kept as written
    fn reduce(factors: Vec<(usize, Ladder)>) -> (CRational, Vec<(usize, Ladder)>) {
        (CRational::one(), factors)
    }
}

/// A linear combination of products of fermionic ladder operators.
pub type FermionOperator = OpExpr<Fermion>;

/// Parse a whitespace-separated ladder string in the usual `"3^ 2"` notation,
/// where a trailing `^` marks a creation operator.
pub fn parse_term(s: &str) -> TermResult<Vec<(usize, Ladder)>> {
    s.split_whitespace()
        .map(|tok| {
            let (idx, ladder) =
                match tok.strip_suffix('^') {
                    Some(rest) => (rest, Ladder::Create),
                    None => (tok, Ladder::Annihilate),
                };
            let k: usize =
                idx.parse()
                .map_err(|_| TermError::InvalidSite(tok.to_string()))?;
            Ok((k, ladder))
        })
        .collect()
}

/// Return `true` if a term is in normal order.
pub fn term_is_normal_ordered(term: &[(usize, Ladder)]) -> bool {
    term.windows(2)
        .all(|w| {
            let (l, r) = (w[0], w[1]);
            match (l.1, r.1) {
                (Ladder::Annihilate, Ladder::Create) => false,
                (a, b) if a == b => l.0 > r.0,
                _ => true,
            }
        })
}

fn normal_order_term(
    mut term: Vec<(usize, Ladder)>,
    mut coeff: Coeff,
    acc: &mut FermionOperator,
) {
    for i in 1..term.len() {
        for j in (1..=i).rev() {
            let right = term[j];
            let left = term[j - 1];
            if right.1.is_create() && left.1.is_annihilate() {
                term.swap(j - 1, j);
                coeff = -coeff;
                if right.0 == left.0 {
                    // a_k a†_k = 1 - a†_k a_k
                    let contracted: Vec<(usize, Ladder)> =
                        term[..j - 1].iter().chain(term[j + 1..].iter())
                        .copied()
                        .collect();
                    normal_order_term(contracted, -&coeff, acc);
                }
            } else if right.1 == left.1 {
                if right.0 == left.0 {
                    // nilpotent
                    return;
                } else if right.0 > left.0 {
                    term.swap(j - 1, j);
                    coeff = -coeff;
                }
            }
        }
    }
    acc.add_term(term, coeff);
}

/// Bring every term of an operator into normal order.
pub fn normal_ordered(op: &FermionOperator) -> FermionOperator {
    let mut acc = FermionOperator::zero();
    for (term, coeff) in op.terms() {
        normal_order_term(term.to_vec(), coeff.clone(), &mut acc);
    }
    trace!(n_in = op.len(), n_out = acc.len(), "normal ordered");
    acc
}

/// The total number operator `coeff × Σₖ a†ₖ aₖ` over `n_sites` modes.
pub fn number_operator<C>(n_sites: usize, coeff: C) -> FermionOperator
where C: Into<Coeff>
{
    let coeff: Coeff = coeff.into();
    (0..n_sites)
        .map(|k| FermionOperator::number(k, coeff.clone()))
        .sum()
}

impl OpExpr<Fermion> {
    /// A single ladder operator.
    pub fn ladder<C>(site: usize, ladder: Ladder, coeff: C) -> Self
    where C: Into<Coeff>
    {
        Self::term(vec![(site, ladder)], coeff)
    }

    /// The number operator `coeff × a†ₖ aₖ`.
    pub fn number<C>(site: usize, coeff: C) -> Self
    where C: Into<Coeff>
    {
        Self::term(vec![(site, Ladder::Create), (site, Ladder::Annihilate)], coeff)
    }

    /// The hopping term `coeff × (a†ₚ a_q + a†_q aₚ)`.
    pub fn hopping<C>(p: usize, q: usize, coeff: C) -> Self
    where C: Into<Coeff>
    {
        let coeff: Coeff = coeff.into();
        let mut new = Self::zero();
        new.add_term(vec![(p, Ladder::Create), (q, Ladder::Annihilate)], coeff.clone());
        new.add_term(vec![(q, Ladder::Create), (p, Ladder::Annihilate)], coeff.conj());
        new
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

    /// Return `true` if every term with nonzero coefficient is in normal
    /// order.
    pub fn is_normal_ordered(&self) -> bool {
        self.terms()
            .filter(|(_, c)| !c.is_zero())
            .all(|(t, _)| term_is_normal_ordered(t))
    }

    /// Return the Hermitian conjugate, in normal order.
    pub fn hermitian_conjugated(&self) -> Self { normal_ordered(&self.adjoint()) }

    /// Return `true` if `self` equals its Hermitian conjugate, with all free
    /// parameters taken to be real.
    pub fn is_hermitian(&self) -> bool {
        normal_ordered(self) == self.hermitian_conjugated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Ladder::*;

    fn op(s: &str) -> FermionOperator {
        FermionOperator::term(parse_term(s).unwrap(), 1)
    }

    #[test]
    fn parsing() {
        assert_eq!(parse_term("3^ 2"), Ok(vec![(3, Create), (2, Annihilate)]));
        assert!(parse_term("a^").is_err());
    }

    #[test]
    fn orders_creation_left_descending() {
        // a_1 a†_2 a†_0 = a†_2 a†_0 a_1 (two transpositions)
        let n = normal_ordered(&op("1 2^ 0^"));
        assert_eq!(n, op("2^ 0^ 1"));
        // a†_0 a†_1 = -a†_1 a†_0
        assert_eq!(normal_ordered(&op("0^ 1^")), -op("1^ 0^"));
        assert!(n.is_normal_ordered());
        assert!(!op("0^ 1^").is_normal_ordered());
    }

    #[test]
    fn anticommutators() {
        for p in 0..3 {
            for q in 0..3 {
                let a_p = FermionOperator::ladder(p, Annihilate, 1);
                let ad_q = FermionOperator::ladder(q, Create, 1);
                let anti = normal_ordered(&(&(&a_p * &ad_q) + &(&ad_q * &a_p)));
                let expected =
                    if p == q { FermionOperator::identity(1) } else { FermionOperator::zero() };
                assert_eq!(anti, expected);
                let a_q = FermionOperator::ladder(q, Annihilate, 1);
                assert!(normal_ordered(&(&(&a_p * &a_q) + &(&a_q * &a_p))).is_zero());
            }
        }
    }

    #[test]
    fn nilpotent() {
        assert!(normal_ordered(&op("2^ 2^")).is_zero());
        assert!(normal_ordered(&op("1 3^ 1")).is_zero());
    }

    #[test]
    fn number_operator_is_projector() {
        let n = FermionOperator::number(1, 1);
        assert_eq!(normal_ordered(&(&n * &n)), n);
        let total = number_operator(3, 1);
        assert_eq!(total.len(), 3);
        assert_eq!(total.get(&[(2, Create), (2, Annihilate)]), Coeff::from(1));
        // [N, a†_0] = a†_0
        let ad = FermionOperator::ladder(0, Create, 1);
        let comm = normal_ordered(&(&(&total * &ad) - &(&ad * &total)));
        assert_eq!(comm, ad);
    }

    #[test]
    fn hermiticity() {
        let h = FermionOperator::hopping(0, 1, Coeff::param("t"));
        assert!(h.is_hermitian());
        let pair = op("0 1");
        assert!(!pair.is_hermitian());
        assert!((&pair + &pair.adjoint()).is_hermitian());
        assert_eq!(pair.hermitian_conjugated(), op("1^ 0^"));
    }
}
