//! The Jordan-Wigner transformation between fermionic and spin operators.
//!
//! Fermionic modes are mapped onto a chain of qubits by
//!
//! <blockquote>
//!   <p style="font-size:20px">
//!     <i>a</i><sup>†</sup><sub><i>j</i></sub>
//!       = ½ (<i>X</i><sub><i>j</i></sub> − <i>i</i> <i>Y</i><sub><i>j</i></sub>)
//!         <i>Z</i><sub>0</sub> ⋯ <i>Z</i><sub><i>j</i>−1</sub>,
//!     <i>a</i><sub><i>j</i></sub>
//!       = ½ (<i>X</i><sub><i>j</i></sub> + <i>i</i> <i>Y</i><sub><i>j</i></sub>)
//!         <i>Z</i><sub>0</sub> ⋯ <i>Z</i><sub><i>j</i>−1</sub>
//!   </p>
//! </blockquote>
//!
//! so that *Z*<sub><i>k</i></sub> = 1 − 2 *n*<sub><i>k</i></sub>. Note that
//! this fixes the sign convention of the *z* coupling: a spin-up qubit is an
//! empty mode.
//!
//! ```
//! use spinferm::fermion::FermionOperator;
//! use spinferm::jordan_wigner::jordan_wigner;
//! use spinferm::pauli::{ Pauli, QubitOperator };
//!
//! let n = FermionOperator::number(2, 2);
//! let expected = QubitOperator::identity(1) - QubitOperator::pauli(2, Pauli::Z, 1);
//! assert_eq!(jordan_wigner(&n), expected);
//! ```

use tracing::debug;
use crate::{
    coeff::Coeff,
    fermion::{ normal_ordered, FermionOperator, Ladder },
    pauli::{ Pauli, QubitOperator },
};

// ½ (X_j ∓ i Y_j) Z_0 ⋯ Z_{j-1}
fn ladder_to_qubits(site: usize, ladder: Ladder) -> QubitOperator {
    let half = Coeff::frac(1, 2);
    let y_coeff =
        match ladder {
            Ladder::Create => -half.mul_i(),
            Ladder::Annihilate => half.mul_i(),
        };
    let string = |p: Pauli| -> Vec<(usize, Pauli)> {
        (0..site).map(|k| (k, Pauli::Z)).chain(std::iter::once((site, p))).collect()
    };
    let mut op = QubitOperator::term(string(Pauli::X), half);
    op.add_term(string(Pauli::Y), y_coeff);
    op
}

/// Map a fermionic operator to a spin operator.
pub fn jordan_wigner(op: &FermionOperator) -> QubitOperator {
    let mut acc = QubitOperator::zero();
    for (term, c) in op.terms() {
        let prod: QubitOperator =
            term.iter()
            .fold(QubitOperator::identity(c.clone()), |prod, (k, l)| {
                &prod * &ladder_to_qubits(*k, *l)
            });
        acc += prod;
    }
    debug!(n_in = op.len(), n_out = acc.len(), "jordan-wigner");
    acc
}

// 1 - 2 n_k
fn parity(site: usize) -> FermionOperator {
    FermionOperator::identity(1) - FermionOperator::number(site, 2)
}

fn pauli_to_fermions(site: usize, p: Pauli) -> FermionOperator {
    let local =
        match p {
            Pauli::Z => { return parity(site); },
            Pauli::X => {
                FermionOperator::ladder(site, Ladder::Create, 1)
                    + FermionOperator::ladder(site, Ladder::Annihilate, 1)
            },
            Pauli::Y => {
                FermionOperator::ladder(site, Ladder::Create, Coeff::i())
                    - FermionOperator::ladder(site, Ladder::Annihilate, Coeff::i())
            },
        };
    let string: FermionOperator =
        (0..site)
        .fold(FermionOperator::identity(1), |acc, k| {
            normal_ordered(&(&acc * &parity(k)))
        });
    normal_ordered(&(&string * &local))
}

/// Map a spin operator back to a fermionic operator, in normal order.
pub fn reverse_jordan_wigner(op: &QubitOperator) -> FermionOperator {
    let mut acc = FermionOperator::zero();
    for (term, c) in op.terms() {
        let prod: FermionOperator =
            term.iter()
            .fold(FermionOperator::identity(c.clone()), |prod, (k, p)| {
                normal_ordered(&(&prod * &pauli_to_fermions(*k, *p)))
            });
        acc += prod;
    }
    debug!(n_in = op.len(), n_out = acc.len(), "reverse jordan-wigner");
    acc
}
