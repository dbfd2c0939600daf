//! Example Hamiltonians on open chains.
//!
//! Model parameters may be plain numbers or symbolic [`Coeff`]s:
//!
//! ```
//! use spinferm::coeff::Coeff;
//! use spinferm::models::anisotropic_chain;
//!
//! let h = anisotropic_chain(2, Coeff::param("alpha"), Coeff::param("beta"), 0);
//! assert_eq!(h.to_string(), "alpha X₀ X₁ + beta Y₀ Y₁");
//! ```

use crate::{
    coeff::Coeff,
    fermion::{ FermionOperator, Ladder },
    pauli::{ Pauli, QubitOperator },
};

/// The anisotropic (XY) spin chain in a transverse field over `n` sites,
///
/// <blockquote>
///   <p style="font-size:20px">
///     <i>H</i>
///       = Σ<sub><i>i</i>=0</sub><sup><i>n</i>−2</sup>
///         (<i>α</i> <i>X</i><sub><i>i</i></sub> <i>X</i><sub><i>i</i>+1</sub>
///         + <i>β</i> <i>Y</i><sub><i>i</i></sub> <i>Y</i><sub><i>i</i>+1</sub>)
///       + <i>g</i> Σ<sub><i>i</i>=0</sub><sup><i>n</i>−1</sup> <i>Z</i><sub><i>i</i></sub>
///   </p>
/// </blockquote>
pub fn anisotropic_chain<A, B, G>(n: usize, alpha: A, beta: B, g: G) -> QubitOperator
where
    A: Into<Coeff>,
    B: Into<Coeff>,
    G: Into<Coeff>,
{
    let (alpha, beta, g): (Coeff, Coeff, Coeff) = (alpha.into(), beta.into(), g.into());
    let mut h = QubitOperator::zero();
    for i in 0..n.saturating_sub(1) {
        h.add_term(vec![(i, Pauli::X), (i + 1, Pauli::X)], alpha.clone());
        h.add_term(vec![(i, Pauli::Y), (i + 1, Pauli::Y)], beta.clone());
    }
    for i in 0..n {
        h.add_term(vec![(i, Pauli::Z)], g.clone());
    }
    h
}

/// The Kitaev (p-wave superconducting) chain over `n` sites,
///
/// <blockquote>
///   <p style="font-size:20px">
///     <i>H</i>
///       = −<i>μ</i> Σ<sub><i>i</i></sub>
///         <i>a</i><sup>†</sup><sub><i>i</i></sub> <i>a</i><sub><i>i</i></sub>
///       + Σ<sub><i>i</i>=0</sub><sup><i>n</i>−2</sup> [
///         −<i>t</i> (<i>a</i><sup>†</sup><sub><i>i</i></sub> <i>a</i><sub><i>i</i>+1</sub>
///           + <i>a</i><sup>†</sup><sub><i>i</i>+1</sub> <i>a</i><sub><i>i</i></sub>)
///         + <i>Δ</i> (<i>a</i><sub><i>i</i></sub> <i>a</i><sub><i>i</i>+1</sub>
///           + <i>a</i><sup>†</sup><sub><i>i</i>+1</sub> <i>a</i><sup>†</sup><sub><i>i</i></sub>) ]
///   </p>
/// </blockquote>
///
/// Terms are stored as written; normal order them with
/// [`normal_ordered`][crate::fermion::normal_ordered] if needed.
pub fn p_wave_chain<T, D, M>(n: usize, t: T, delta: D, mu: M) -> FermionOperator
where
    T: Into<Coeff>,
    D: Into<Coeff>,
    M: Into<Coeff>,
{
    use Ladder::*;
    let (t, delta, mu): (Coeff, Coeff, Coeff) = (t.into(), delta.into(), mu.into());
    let mut h = FermionOperator::zero();
    for i in 0..n {
        h.add_term(vec![(i, Create), (i, Annihilate)], -&mu);
    }
    for i in 0..n.saturating_sub(1) {
        h.add_term(vec![(i, Create), (i + 1, Annihilate)], -&t);
        h.add_term(vec![(i + 1, Create), (i, Annihilate)], -&t);
        h.add_term(vec![(i, Annihilate), (i + 1, Annihilate)], delta.clone());
        h.add_term(vec![(i + 1, Create), (i, Create)], delta.clone());
    }
    h
}
