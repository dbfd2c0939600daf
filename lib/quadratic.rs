//! Quadratic (Bogoliubov-de Gennes) fermionic Hamiltonians.
//!
//! A Hamiltonian quadratic in the ladder operators can always be written as
//!
//! <blockquote>
//!   <p style="font-size:20px">
//!     <i>H</i>
//!       = Σ<sub><i>pq</i></sub> <i>M</i><sub><i>pq</i></sub>
//!         <i>a</i><sup>†</sup><sub><i>p</i></sub> <i>a</i><sub><i>q</i></sub>
//!       + ½ Σ<sub><i>pq</i></sub> (
//!         <i>Δ</i><sub><i>pq</i></sub>
//!         <i>a</i><sup>†</sup><sub><i>p</i></sub> <i>a</i><sup>†</sup><sub><i>q</i></sub>
//!         + h.c. )
//!       + <i>c</i>
//!   </p>
//! </blockquote>
//!
//! with *M* Hermitian and *Δ* antisymmetric. [`QuadraticHamiltonian`] holds the
//! two blocks and the constant, with entries kept as exact [`Coeff`]s so that
//! symbolic model parameters survive.
//!
//! ```
//! use spinferm::coeff::Coeff;
//! use spinferm::fermion::FermionOperator;
//! use spinferm::quadratic::QuadraticHamiltonian;
//!
//! let h = FermionOperator::hopping(0, 1, Coeff::param("t"))
//!     + FermionOperator::number(1, 3);
//! let q = QuadraticHamiltonian::from_fermion_operator(&h, None).unwrap();
//! assert_eq!(q.hermitian_part()[[0, 1]], Coeff::param("t"));
//! assert_eq!(q.hermitian_part()[[1, 1]], Coeff::from(3));
//! assert!(q.conserves_particle_number());
//! ```

use itertools::Itertools;
use ndarray as nd;
use num_traits::Zero;
use thiserror::Error;
use tracing::debug;
use crate::{
    coeff::Coeff,
    fermion::{ normal_ordered, FermionOperator, Ladder },
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuadError {
    /// Returned when an operator contains a term that is neither a constant
    /// nor a product of two ladder operators.
    #[error("operator is not quadratic: found term '{0}'")]
    NotQuadratic(String),

    /// Returned when an operator or a Hermitian block is not Hermitian.
    #[error("operator is not hermitian")]
    NotHermitian,

    /// Returned when a pairing block is not antisymmetric.
    #[error("pairing block is not antisymmetric")]
    NotAntisymmetric,

    /// Returned when blocks are not square or do not agree in size.
    #[error("block shape mismatch: {0:?} and {1:?}")]
    ShapeMismatch(Vec<usize>, Vec<usize>),

    /// Returned when a term acts on a site outside of the requested range.
    #[error("site index {0} out of range for {1} sites")]
    SiteOutOfRange(usize, usize),
}
use QuadError::*;
pub type QuadResult<T> = Result<T, QuadError>;

/// A quadratic fermionic Hamiltonian in block form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuadraticHamiltonian {
    hermitian: nd::Array2<Coeff>,
    antisymmetric: nd::Array2<Coeff>,
    constant: Coeff,
}

fn render_term(term: &[(usize, Ladder)]) -> String {
    term.iter().map(|(k, l)| format!("{k}{l}")).join(" ")
}

fn check_hermitian(m: &nd::Array2<Coeff>) -> QuadResult<()> {
    m.indexed_iter()
        .all(|((p, q), mpq)| *mpq == m[[q, p]].conj())
        .then_some(())
        .ok_or(NotHermitian)
}

fn check_antisymmetric(d: &nd::Array2<Coeff>) -> QuadResult<()> {
    d.indexed_iter()
        .all(|((p, q), dpq)| *dpq == -&d[[q, p]])
        .then_some(())
        .ok_or(NotAntisymmetric)
}

impl QuadraticHamiltonian {
    /// Create a new Hamiltonian from its blocks.
    ///
    /// *Fails* if the blocks are not square and of equal size, if
    /// `hermitian` is not Hermitian, or if `antisymmetric` is not
    /// antisymmetric.
    pub fn new(
        hermitian: nd::Array2<Coeff>,
        antisymmetric: nd::Array2<Coeff>,
        constant: Coeff,
    ) -> QuadResult<Self>
    {
        let (n, m) = hermitian.dim();
        if n != m || antisymmetric.dim() != (n, n) {
            return Err(ShapeMismatch(
                hermitian.shape().to_vec(), antisymmetric.shape().to_vec()));
        }
        check_hermitian(&hermitian)?;
        check_antisymmetric(&antisymmetric)?;
        Ok(Self { hermitian, antisymmetric, constant })
    }

    /// Extract the blocks of a quadratic fermionic operator over `n_sites`
    /// modes, defaulting to the number of sites the operator acts on.
    ///
    /// *Fails* if any normal-ordered term is not quadratic, if a term acts
    /// outside of `n_sites`, or if the operator is not Hermitian.
    pub fn from_fermion_operator(op: &FermionOperator, n_sites: Option<usize>)
        -> QuadResult<Self>
    {
        let n = n_sites.unwrap_or_else(|| op.n_sites());
        let mut hermitian: nd::Array2<Coeff> = nd::Array2::zeros((n, n));
        let mut antisymmetric: nd::Array2<Coeff> = nd::Array2::zeros((n, n));
        let mut annihilating: nd::Array2<Coeff> = nd::Array2::zeros((n, n));
        let mut constant = Coeff::zero();
        let check_site = |k: usize| -> QuadResult<usize> {
            (k < n).then_some(k).ok_or(SiteOutOfRange(k, n))
        };
        let ordered = normal_ordered(op);
        for (term, c) in ordered.terms() {
            match term {
                [] => { constant += c; },
                [(p, Ladder::Create), (q, Ladder::Annihilate)] => {
                    let (p, q) = (check_site(*p)?, check_site(*q)?);
                    hermitian[[p, q]] += c;
                },
                // normal ordering leaves p > q in the remaining two cases
                [(p, Ladder::Create), (q, Ladder::Create)] => {
                    let (p, q) = (check_site(*p)?, check_site(*q)?);
                    antisymmetric[[p, q]] += c;
                    antisymmetric[[q, p]] -= c;
                },
                [(p, Ladder::Annihilate), (q, Ladder::Annihilate)] => {
                    let (p, q) = (check_site(*p)?, check_site(*q)?);
                    annihilating[[p, q]] += c;
                },
                _ => { return Err(NotQuadratic(render_term(term))); },
            }
        }
        check_hermitian(&hermitian)?;
        // h.c. of Δ_pq a†_p a†_q is -conj(Δ_pq) a_p a_q
        let pairs_match =
            (0..n).cartesian_product(0..n)
            .filter(|(p, q)| p > q)
            .all(|(p, q)| annihilating[[p, q]] == -antisymmetric[[p, q]].conj());
        if !pairs_match { return Err(NotHermitian); }
        debug!(n_sites = n, n_terms = ordered.len(), "extracted quadratic hamiltonian");
        Ok(Self { hermitian, antisymmetric, constant })
    }

    /// Return the number of modes.
    pub fn n_sites(&self) -> usize { self.hermitian.nrows() }

    /// Return the Hermitian (particle-conserving) block *M*.
    pub fn hermitian_part(&self) -> &nd::Array2<Coeff> { &self.hermitian }

    /// Return the antisymmetric (pairing) block *Δ*.
    pub fn antisymmetric_part(&self) -> &nd::Array2<Coeff> { &self.antisymmetric }

    /// Return the constant energy offset.
    pub fn constant(&self) -> &Coeff { &self.constant }

    /// Return `true` if the pairing block vanishes.
    pub fn conserves_particle_number(&self) -> bool {
        self.antisymmetric.iter().all(Coeff::is_zero)
    }

    /// Substitute a value for a free parameter in every entry.
    pub fn subs(&self, name: &str, value: &Coeff) -> Self {
        Self {
            hermitian: self.hermitian.mapv(|c| c.subs(name, value)),
            antisymmetric: self.antisymmetric.mapv(|c| c.subs(name, value)),
            constant: self.constant.subs(name, value),
        }
    }

    /// Rebuild the fermionic operator, in normal order.
    pub fn to_fermion_operator(&self) -> FermionOperator {
        let n = self.n_sites();
        let mut op = FermionOperator::identity(self.constant.clone());
        for ((p, q), mpq) in self.hermitian.indexed_iter() {
            op.add_term(vec![(p, Ladder::Create), (q, Ladder::Annihilate)], mpq.clone());
        }
        for (p, q) in (0..n).cartesian_product(0..n).filter(|(p, q)| p > q) {
            let dpq = &self.antisymmetric[[p, q]];
            op.add_term(vec![(p, Ladder::Create), (q, Ladder::Create)], dpq.clone());
            op.add_term(
                vec![(p, Ladder::Annihilate), (q, Ladder::Annihilate)], -dpq.conj());
        }
        op
    }

    /// Return the `2n × 2n` Bogoliubov-de Gennes matrix
    /// `[[M, Δ], [-Δ*, -M*]]`.
    pub fn bdg_matrix(&self) -> nd::Array2<Coeff> {
        let n = self.n_sites();
        nd::Array2::from_shape_fn((2 * n, 2 * n), |(i, j)| {
            match (i < n, j < n) {
                (true, true) => self.hermitian[[i, j]].clone(),
                (true, false) => self.antisymmetric[[i, j - n]].clone(),
                (false, true) => -self.antisymmetric[[i - n, j]].conj(),
                (false, false) => -self.hermitian[[i - n, j - n]].conj(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fermion::parse_term;

    fn ints(m: &nd::Array2<Coeff>) -> Vec<Vec<i64>> {
        m.outer_iter()
            .map(|row| row.iter().map(|c| c.as_integer().unwrap()).collect())
            .collect()
    }

    #[test]
    fn pairing_terms() {
        let d = Coeff::param("d");
        let op =
            FermionOperator::term(parse_term("1^ 0^").unwrap(), d.clone())
            + FermionOperator::term(parse_term("0 1").unwrap(), d.clone());
        let q = QuadraticHamiltonian::from_fermion_operator(&op, None).unwrap();
        assert_eq!(q.antisymmetric_part()[[1, 0]], d);
        assert_eq!(q.antisymmetric_part()[[0, 1]], -&d);
        assert!(!q.conserves_particle_number());
        assert_eq!(q.to_fermion_operator(), normal_ordered(&op));
    }

    #[test]
    fn rejects_bad_input() {
        let quartic = FermionOperator::term(parse_term("1^ 0^ 1 0").unwrap(), 1);
        assert_eq!(
            QuadraticHamiltonian::from_fermion_operator(&quartic, None),
            Err(NotQuadratic("1^ 0^ 1 0".to_string())),
        );
        let half_hopping = FermionOperator::term(parse_term("0^ 1").unwrap(), 1);
        assert_eq!(
            QuadraticHamiltonian::from_fermion_operator(&half_hopping, None),
            Err(NotHermitian),
        );
        let pairing = FermionOperator::term(parse_term("1^ 0^").unwrap(), 1);
        assert_eq!(
            QuadraticHamiltonian::from_fermion_operator(&pairing, None),
            Err(NotHermitian),
        );
        let linear = FermionOperator::ladder(0, Ladder::Create, 1);
        assert!(matches!(
            QuadraticHamiltonian::from_fermion_operator(&linear, None),
            Err(NotQuadratic(_)),
        ));
        let n = FermionOperator::number(3, 1);
        assert_eq!(
            QuadraticHamiltonian::from_fermion_operator(&n, Some(2)),
            Err(SiteOutOfRange(3, 2)),
        );
    }

    #[test]
    fn new_validates() {
        let m: nd::Array2<Coeff> = nd::Array2::zeros((2, 2));
        let mut d: nd::Array2<Coeff> = nd::Array2::zeros((2, 2));
        d[[0, 1]] = Coeff::from(1);
        assert_eq!(
            QuadraticHamiltonian::new(m.clone(), d.clone(), Coeff::zero()),
            Err(NotAntisymmetric),
        );
        d[[1, 0]] = Coeff::from(-1);
        assert!(QuadraticHamiltonian::new(m.clone(), d.clone(), Coeff::zero()).is_ok());
        let mut m_bad = m.clone();
        m_bad[[0, 1]] = Coeff::i();
        assert_eq!(
            QuadraticHamiltonian::new(m_bad, d, Coeff::zero()),
            Err(NotHermitian),
        );
        assert!(matches!(
            QuadraticHamiltonian::new(m, nd::Array2::zeros((3, 3)), Coeff::zero()),
            Err(ShapeMismatch(..)),
        ));
    }

    #[test]
    fn bdg_blocks() {
        let mut m: nd::Array2<Coeff> = nd::Array2::zeros((2, 2));
        m[[0, 0]] = Coeff::from(1);
        m[[0, 1]] = Coeff::i();
        m[[1, 0]] = -Coeff::i();
        let mut d: nd::Array2<Coeff> = nd::Array2::zeros((2, 2));
        d[[0, 1]] = Coeff::from(2);
        d[[1, 0]] = Coeff::from(-2);
        let q = QuadraticHamiltonian::new(m, d, Coeff::from(5)).unwrap();
        let bdg = q.bdg_matrix();
        assert_eq!(bdg.dim(), (4, 4));
        assert_eq!(bdg[[0, 1]], Coeff::i());
        assert_eq!(bdg[[2, 3]], Coeff::i());
        assert_eq!(bdg[[2, 1]], Coeff::from(-2));
        assert_eq!(bdg[[0, 3]], Coeff::from(2));
        assert_eq!(bdg[[2, 2]], Coeff::from(-1));
        assert_eq!(ints(q.antisymmetric_part()), vec![vec![0, 2], vec![-2, 0]]);
        let back =
            QuadraticHamiltonian::from_fermion_operator(&q.to_fermion_operator(), Some(2))
            .unwrap();
        assert_eq!(back, q);
    }
}
