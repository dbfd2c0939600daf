//! Generic operator expressions over a choice of operator algebra.
//!
//! An [`OpExpr`] is a mapping from operator terms (ordered products of single
//! factors) to [`Coeff`]s. What a factor is, how its display symbol is named,
//! and how a product of factors is brought into canonical form are all
//! determined by an [`Algebra`]:
//!
//! | algebra                            | factor          | canonical products                  |
//! |------------------------------------|-----------------|-------------------------------------|
//! | [`Spin`][crate::pauli::Spin]       | `(usize, Pauli)`| one Pauli per site, sorted by site  |
//! | [`Fermion`][crate::fermion::Fermion] | `(usize, Ladder)` | none; see [`normal_ordered`][crate::fermion::normal_ordered] |
//! | [`Majorana`][crate::majorana::Majorana] | `usize`      | strictly increasing indices         |
//!
//! The empty term is the identity.
//!
//! ```
//! use spinferm::coeff::Coeff;
//! use spinferm::pauli::{ Pauli, QubitOperator };
//!
//! let x0 = QubitOperator::term(vec![(0, Pauli::X)], Coeff::from(1));
//! let y0 = QubitOperator::term(vec![(0, Pauli::Y)], Coeff::from(1));
//! let z0 = QubitOperator::term(vec![(0, Pauli::Z)], Coeff::i());
//! assert_eq!(&x0 * &y0, z0);
//! ```

use std::{
    fmt,
    hash::Hash,
    iter::Sum,
    ops::{ Add, AddAssign, Mul, Neg, Sub, SubAssign },
};
use itertools::Itertools;
use num_traits::{ One, Zero };
use rustc_hash::FxHashMap;
use crate::{
    coeff::Coeff,
    expr::OpSymbol,
    format::format_expr,
    rational::CRational,
};

/// Choice of operator algebra, selecting the symbol-naming rule used when
/// formatting.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Pauli (spin-1/2) operators.
    Spin,
    /// Fermionic creation and annihilation operators.
    Fermion,
    /// Majorana operators.
    Majorana,
}

/// Describes an operator algebra.
pub trait Algebra: Copy + Clone + fmt::Debug + PartialEq + Eq {
    /// A single-operator factor of a term.
    type Factor: Copy + Clone + fmt::Debug + PartialEq + Eq + Hash + Ord;

    /// Symbol-naming rule.
    const VARIANT: Variant;

    /// Return the site index a factor acts on.
    fn site(factor: &Self::Factor) -> usize;

    /// Return the display symbol of a factor.
    fn symbol(factor: &Self::Factor) -> OpSymbol;

    /// Return the Hermitian adjoint of a single factor.
    fn adjoint(factor: &Self::Factor) -> Self::Factor;

    /// Bring a product of factors into canonical form, returning the phase
    /// picked up along the way.
    fn reduce(factors: Vec<Self::Factor>) -> (CRational, Vec<Self::Factor>);
}

/// A linear combination of operator terms.
///
/// Entries with zero coefficient may be present (see [`insert`][Self::insert])
/// but are ignored by equality and dropped by [`compress`][Self::compress].
#[derive(Clone, Debug)]
pub struct OpExpr<A: Algebra> {
    terms: FxHashMap<Vec<A::Factor>, Coeff>,
}

impl<A: Algebra> Default for OpExpr<A> {
    fn default() -> Self { Self::zero() }
}

impl<A: Algebra> OpExpr<A> {
    /// The zero operator.
    pub fn zero() -> Self { Self { terms: FxHashMap::default() } }

    /// A multiple of the identity.
    pub fn identity<C>(coeff: C) -> Self
    where C: Into<Coeff>
    {
        Self::term(Vec::new(), coeff)
    }

    /// A single term, reduced to canonical form.
    pub fn term<C>(factors: Vec<A::Factor>, coeff: C) -> Self
    where C: Into<Coeff>
    {
        let mut new = Self::zero();
        new.add_term(factors, coeff.into());
        new
    }

    /// Add a term to `self`, reducing it to canonical form first. Entries that
    /// cancel to zero are removed.
    pub fn add_term(&mut self, factors: Vec<A::Factor>, coeff: Coeff) {
        if coeff.is_zero() { return; }
        let (phase, factors) = A::reduce(factors);
        let coeff = coeff.scale(phase);
        if coeff.is_zero() { return; }
        let cancelled =
            match self.terms.get_mut(&factors) {
                Some(c) => { *c += &coeff; c.is_zero() },
                None => { self.terms.insert(factors.clone(), coeff); false },
            };
        if cancelled { self.terms.remove(&factors); }
    }

    /// Set the coefficient of a term verbatim, without reduction. Zero is a
    /// valid coefficient here.
    pub fn insert(&mut self, factors: Vec<A::Factor>, coeff: Coeff)
        -> Option<Coeff>
    {
        self.terms.insert(factors, coeff)
    }

    /// Return the coefficient of a term, or zero if absent.
    pub fn get(&self, factors: &[A::Factor]) -> Coeff {
        self.terms.get(factors).cloned().unwrap_or_else(Coeff::zero)
    }

    /// Return the number of stored entries.
    pub fn len(&self) -> usize { self.terms.len() }

    /// Return `true` if no entries are stored.
    pub fn is_empty(&self) -> bool { self.terms.is_empty() }

    /// Return `true` if every stored coefficient is zero.
    pub fn is_zero(&self) -> bool { self.terms.values().all(Coeff::is_zero) }

    /// Iterate over all stored `(term, coefficient)` pairs in arbitrary order.
    pub fn terms(&self) -> impl Iterator<Item = (&[A::Factor], &Coeff)> + '_ {
        self.terms.iter().map(|(t, c)| (t.as_slice(), c))
    }

    /// Return all stored `(term, coefficient)` pairs, ordered by term length
    /// and then by factors.
    pub fn sorted_terms(&self) -> Vec<(&[A::Factor], &Coeff)> {
        self.terms()
            .sorted_by(|(l, _), (r, _)| l.len().cmp(&r.len()).then_with(|| l.cmp(r)))
            .collect()
    }

    /// Remove all zero-valued entries.
    pub fn compress(&mut self) {
        self.terms.retain(|_, c| !c.is_zero());
    }

    /// Multiply every coefficient by `c`.
    pub fn scale(&self, c: &Coeff) -> Self {
        let mut new = Self::zero();
        self.terms.iter()
            .for_each(|(t, v)| { new.add_term(t.clone(), v * c); });
        new
    }

    /// Apply a function to every coefficient.
    pub fn map_coeffs<F>(&self, mut f: F) -> Self
    where F: FnMut(&Coeff) -> Coeff
    {
        let mut new = Self::zero();
        self.terms.iter()
            .for_each(|(t, v)| { new.add_term(t.clone(), f(v)); });
        new
    }

    /// Substitute a value for a free parameter in every coefficient.
    pub fn subs(&self, name: &str, value: &Coeff) -> Self {
        self.map_coeffs(|c| c.subs(name, value))
    }

    /// Return the Hermitian adjoint.
    ///
    /// Each term is reversed and its factors adjointed, then brought back into
    /// canonical form; coefficients are conjugated with all free parameters
    /// taken to be real.
    pub fn adjoint(&self) -> Self {
        let mut new = Self::zero();
        for (t, v) in self.terms.iter() {
            let adj: Vec<A::Factor> = t.iter().rev().map(A::adjoint).collect();
            new.add_term(adj, v.conj());
        }
        new
    }

    /// Return one more than the largest site index appearing in any term, or
    /// zero if there are none.
    pub fn n_sites(&self) -> usize {
        self.terms.keys()
            .flat_map(|t| t.iter().map(A::site))
            .max()
            .map(|k| k + 1)
            .unwrap_or(0)
    }

    /// Return the length of the longest term with nonzero coefficient.
    pub fn many_body_order(&self) -> usize {
        self.terms.iter()
            .filter(|(_, c)| !c.is_zero())
            .map(|(t, _)| t.len())
            .max()
            .unwrap_or(0)
    }

    /// Return the product `self × rhs`.
    pub fn multiply(&self, rhs: &Self) -> Self {
        let mut new = Self::zero();
        for ((t_l, c_l), (t_r, c_r)) in self.terms.iter().cartesian_product(rhs.terms.iter()) {
            let factors: Vec<A::Factor> = t_l.iter().chain(t_r.iter()).copied().collect();
            new.add_term(factors, c_l * c_r);
        }
        new
    }

    fn plus(&self, rhs: &Self) -> Self {
        let mut out = self.clone();
        out += rhs;
        out
    }

    fn minus(&self, rhs: &Self) -> Self {
        let mut out = self.clone();
        out -= rhs;
        out
    }

    /// Raise to a non-negative integer power.
    pub fn pow(&self, p: u32) -> Self {
        (0..p).fold(Self::identity(Coeff::one()), |acc, _| acc.multiply(self))
    }
}

impl<A: Algebra> PartialEq for OpExpr<A> {
    fn eq(&self, other: &Self) -> bool {
        self.terms.iter()
            .all(|(t, c)| other.terms.get(t).map_or(c.is_zero(), |d| c == d))
            && other.terms.iter()
                .all(|(t, d)| self.terms.get(t).map_or(d.is_zero(), |c| c == d))
    }
}

impl<A: Algebra> Eq for OpExpr<A> { }

impl<A: Algebra> FromIterator<(Vec<A::Factor>, Coeff)> for OpExpr<A> {
    fn from_iter<I>(iter: I) -> Self
    where I: IntoIterator<Item = (Vec<A::Factor>, Coeff)>
    {
        let mut new = Self::zero();
        iter.into_iter().for_each(|(t, c)| { new.add_term(t, c); });
        new
    }
}

impl<A: Algebra> AddAssign<&OpExpr<A>> for OpExpr<A> {
    fn add_assign(&mut self, rhs: &OpExpr<A>) {
        rhs.terms.iter()
            .for_each(|(t, c)| { self.add_term(t.clone(), c.clone()); });
    }
}

impl<A: Algebra> SubAssign<&OpExpr<A>> for OpExpr<A> {
    fn sub_assign(&mut self, rhs: &OpExpr<A>) {
        rhs.terms.iter()
            .for_each(|(t, c)| { self.add_term(t.clone(), -c); });
    }
}

impl<A: Algebra> AddAssign<OpExpr<A>> for OpExpr<A> {
    fn add_assign(&mut self, rhs: OpExpr<A>) {
        rhs.terms.into_iter()
            .for_each(|(t, c)| { self.add_term(t, c); });
    }
}

impl<A: Algebra> SubAssign<OpExpr<A>> for OpExpr<A> {
    fn sub_assign(&mut self, rhs: OpExpr<A>) { *self -= &rhs; }
}

macro_rules! impl_binop {
    ( $trait:ident, $fn:ident, $method:ident ) => {
        impl<A: Algebra> $trait<&OpExpr<A>> for &OpExpr<A> {
            type Output = OpExpr<A>;

            fn $fn(self, rhs: &OpExpr<A>) -> OpExpr<A> { self.$method(rhs) }
        }

        impl<A: Algebra> $trait<OpExpr<A>> for OpExpr<A> {
            type Output = OpExpr<A>;

            fn $fn(self, rhs: OpExpr<A>) -> OpExpr<A> { self.$method(&rhs) }
        }

        impl<A: Algebra> $trait<&OpExpr<A>> for OpExpr<A> {
            type Output = OpExpr<A>;

            fn $fn(self, rhs: &OpExpr<A>) -> OpExpr<A> { self.$method(rhs) }
        }

        impl<A: Algebra> $trait<OpExpr<A>> for &OpExpr<A> {
            type Output = OpExpr<A>;

            fn $fn(self, rhs: OpExpr<A>) -> OpExpr<A> { self.$method(&rhs) }
        }
    }
}
impl_binop!(Add, add, plus);
impl_binop!(Sub, sub, minus);
impl_binop!(Mul, mul, multiply);

impl<A: Algebra> Mul<&Coeff> for &OpExpr<A> {
    type Output = OpExpr<A>;

    fn mul(self, rhs: &Coeff) -> OpExpr<A> { self.scale(rhs) }
}

impl<A: Algebra> Mul<Coeff> for OpExpr<A> {
    type Output = OpExpr<A>;

    fn mul(self, rhs: Coeff) -> OpExpr<A> { self.scale(&rhs) }
}

impl<A: Algebra> Neg for &OpExpr<A> {
    type Output = OpExpr<A>;

    fn neg(self) -> OpExpr<A> { self.scale(&-Coeff::one()) }
}

impl<A: Algebra> Neg for OpExpr<A> {
    type Output = OpExpr<A>;

    fn neg(self) -> OpExpr<A> { -&self }
}

impl<A: Algebra> Sum for OpExpr<A> {
    fn sum<I>(iter: I) -> Self
    where I: Iterator<Item = Self>
    {
        iter.fold(Self::zero(), |mut acc, op| { acc += op; acc })
    }
}

impl<A: Algebra> fmt::Display for OpExpr<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_expr(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pauli::{ Pauli::*, QubitOperator };

    #[test]
    fn accumulates_and_cancels() {
        let mut op = QubitOperator::zero();
        op.add_term(vec![(0, X), (1, Z)], Coeff::from(2));
        op.add_term(vec![(1, Z), (0, X)], Coeff::from(3));
        assert_eq!(op.len(), 1);
        assert_eq!(op.get(&[(0, X), (1, Z)]), Coeff::from(5));
        op.add_term(vec![(0, X), (1, Z)], Coeff::from(-5));
        assert!(op.is_empty());
    }

    #[test]
    fn equality_ignores_zeros() {
        let mut a = QubitOperator::identity(1);
        a.insert(vec![(2, Y)], Coeff::zero());
        let b = QubitOperator::identity(1);
        assert_eq!(a, b);
        assert_eq!(a.len(), 2);
        a.compress();
        assert_eq!(a.len(), 1);
    }

    #[test]
    fn sites_and_order() {
        let op: QubitOperator =
            [
                (vec![(0, X), (3, X)], Coeff::from(1)),
                (vec![(1, Z)], Coeff::param("g")),
            ]
            .into_iter()
            .collect();
        assert_eq!(op.n_sites(), 4);
        assert_eq!(op.many_body_order(), 2);
        let sorted = op.sorted_terms();
        assert_eq!(sorted[0].0, &[(1, Z)]);
    }

    #[test]
    fn adjoint_and_powers() {
        let op = QubitOperator::term(vec![(0, X)], Coeff::i());
        assert_eq!(op.adjoint(), -&op);
        assert_eq!(op.pow(2), QubitOperator::identity(-1));
        assert_eq!(op.pow(0), QubitOperator::identity(1));
    }
}
