//! Majorana operators.
//!
//! Each fermionic mode *j* carries two self-adjoint Majorana operators,
//! *γ*<sub>2*j*</sub> and *γ*<sub>2*j*+1</sub>, with
//!
//! <blockquote>
//!   <p style="font-size:20px">
//!     { <i>γ</i><sub><i>k</i></sub>, <i>γ</i><sub><i>l</i></sub> }
//!       = 2 <i>δ</i><sub><i>kl</i></sub>
//!   </p>
//! </blockquote>
//!
//! and
//!
//! <blockquote>
//!   <p style="font-size:20px">
//!     <i>a</i><sub><i>j</i></sub>
//!       = (<i>γ</i><sub>2<i>j</i></sub> + <i>i</i> <i>γ</i><sub>2<i>j</i>+1</sub>) / 2,
//!     <i>a</i><sup>†</sup><sub><i>j</i></sub>
//!       = (<i>γ</i><sub>2<i>j</i></sub> − <i>i</i> <i>γ</i><sub>2<i>j</i>+1</sub>) / 2
//!   </p>
//! </blockquote>
//!
//! Canonical terms hold strictly increasing Majorana indices.
//!
//! ```
//! use spinferm::coeff::Coeff;
//! use spinferm::fermion::FermionOperator;
//! use spinferm::majorana::{ fermion_to_majorana, MajoranaOperator };
//!
//! // a†_0 a_0 = 1/2 + (i/2) γ_0 γ_1
//! let n = FermionOperator::number(0, 1);
//! let expected = MajoranaOperator::identity(Coeff::frac(1, 2))
//!     + MajoranaOperator::term(vec![0, 1], Coeff::frac(1, 2) * Coeff::i());
//! assert_eq!(fermion_to_majorana(&n), expected);
//! ```

use num_traits::{ One, Zero };
use tracing::debug;
use crate::{
    algebra::{ Algebra, OpExpr, Variant },
    coeff::Coeff,
    expr::{ OpSymbol, SymbolKind },
    fermion::{ normal_ordered, FermionOperator, Ladder },
    rational::CRational,
};

/// Marker for the Majorana algebra.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Majorana;

impl Algebra for Majorana {
    type Factor = usize;

    const VARIANT: Variant = Variant::Majorana;

    fn site(factor: &usize) -> usize { factor / 2 }

    fn symbol(factor: &usize) -> OpSymbol { OpSymbol::new(*factor, SymbolKind::Gamma) }

    fn adjoint(factor: &usize) -> usize { *factor }

    fn reduce(mut factors: Vec<usize>) -> (CRational, Vec<usize>) {
        // insertion sort, counting transpositions of distinct operators
        let mut odd = false;
        for i in 1..factors.len() {
            let mut j = i;
            while j > 0 && factors[j - 1] > factors[j] {
                factors.swap(j - 1, j);
                odd = !odd;
                j -= 1;
            }
        }
        let mut reduced: Vec<usize> = Vec::with_capacity(factors.len());
        for k in factors.into_iter() {
            if reduced.last() == Some(&k) {
                reduced.pop();
            } else {
                reduced.push(k);
            }
        }
        let phase = if odd { -CRational::one() } else { CRational::one() };
        (phase, reduced)
    }
}

/// A linear combination of products of Majorana operators.
pub type MajoranaOperator = OpExpr<Majorana>;

impl OpExpr<Majorana> {
    /// A single Majorana operator.
    pub fn gamma<C>(index: usize, coeff: C) -> Self
    where C: Into<Coeff>
    {
        Self::term(vec![index], coeff)
    }

    /// Return `true` if `self` equals its Hermitian conjugate, with all free
    /// parameters taken to be real.
    pub fn is_hermitian(&self) -> bool { *self == self.adjoint() }
}

fn ladder_to_majorana(site: usize, ladder: Ladder) -> MajoranaOperator {
    let half = Coeff::frac(1, 2);
    let half_i = half.mul_i();
    let mut op = MajoranaOperator::gamma(2 * site, half);
    match ladder {
        Ladder::Annihilate => { op.add_term(vec![2 * site + 1], half_i); },
        Ladder::Create => { op.add_term(vec![2 * site + 1], -half_i); },
    }
    op
}

/// Express a fermionic operator in terms of Majorana operators.
pub fn fermion_to_majorana(op: &FermionOperator) -> MajoranaOperator {
    let mut acc = MajoranaOperator::zero();
    for (term, c) in op.terms() {
        let prod: MajoranaOperator =
            term.iter()
            .fold(MajoranaOperator::identity(c.clone()), |prod, (k, l)| {
                &prod * &ladder_to_majorana(*k, *l)
            });
        acc += prod;
    }
    debug!(n_in = op.len(), n_out = acc.len(), "fermion -> majorana");
    acc
}

fn gamma_to_fermion(index: usize) -> FermionOperator {
    let site = index / 2;
    if index % 2 == 0 {
        // γ_2j = a_j + a†_j
        FermionOperator::ladder(site, Ladder::Annihilate, 1)
            + FermionOperator::ladder(site, Ladder::Create, 1)
    } else {
        // γ_2j+1 = i (a†_j - a_j)
        FermionOperator::ladder(site, Ladder::Create, Coeff::i())
            + FermionOperator::ladder(site, Ladder::Annihilate, -Coeff::i())
    }
}

/// Express a Majorana operator in terms of fermionic ladder operators, in
/// normal order.
pub fn majorana_to_fermion(op: &MajoranaOperator) -> FermionOperator {
    let mut acc = FermionOperator::zero();
    for (term, c) in op.terms() {
        if c.is_zero() { continue; }
        let prod: FermionOperator =
            term.iter()
            .fold(FermionOperator::identity(c.clone()), |prod, k| {
                normal_ordered(&(&prod * &gamma_to_fermion(*k)))
            });
        acc += prod;
    }
    debug!(n_in = op.len(), n_out = acc.len(), "majorana -> fermion");
    acc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fermion::parse_term;

    #[test]
    fn reduction() {
        assert_eq!(Majorana::reduce(vec![1, 0]), (-CRational::one(), vec![0, 1]));
        assert_eq!(Majorana::reduce(vec![3, 3]), (CRational::one(), vec![]));
        // γ2 γ0 γ2 = -γ0 γ2 γ2 = -γ0
        assert_eq!(Majorana::reduce(vec![2, 0, 2]), (-CRational::one(), vec![0]));
        assert_eq!(Majorana::site(&5), 2);
    }

    #[test]
    fn squares_to_one() {
        for k in 0..6 {
            let g = MajoranaOperator::gamma(k, 1);
            assert_eq!(g.pow(2), MajoranaOperator::identity(1));
            assert!(g.is_hermitian());
        }
        let g01 = MajoranaOperator::term(vec![0, 1], 1);
        assert!(!g01.is_hermitian());
        assert!(MajoranaOperator::term(vec![0, 1], Coeff::i()).is_hermitian());
    }

    #[test]
    fn round_trip_through_fermions() {
        let ops = [
            "0^ 1",
            "1 0",
            "2^ 1^ 0",
            "0 0^",
            "",
        ];
        for s in ops {
            let op = FermionOperator::term(parse_term(s).unwrap(), Coeff::param("t"));
            let back = majorana_to_fermion(&fermion_to_majorana(&op));
            assert_eq!(back, normal_ordered(&op), "failed on '{s}'");
        }
    }

    #[test]
    fn gammas_to_fermions() {
        let g = MajoranaOperator::gamma(1, 1);
        let expected =
            FermionOperator::ladder(0, Ladder::Create, Coeff::i())
            - FermionOperator::ladder(0, Ladder::Annihilate, Coeff::i());
        assert_eq!(majorana_to_fermion(&g), expected);
    }
}
