//! Construction, conversion, and typesetting of spin, fermionic, and Majorana
//! Hamiltonians for one-dimensional quantum chains.
//!
//! Operators are linear combinations of operator products with exact
//! coefficients ([`coeff::Coeff`]): complex rationals, optionally multiplied
//! by monomials in real free parameters, so that model parameters may be left
//! symbolic. Three operator algebras are provided ([`pauli`], [`fermion`],
//! [`majorana`]), all sharing the generic [`algebra::OpExpr`] container, along
//! with the Jordan-Wigner transformation ([`jordan_wigner`]) and the block
//! decomposition of quadratic fermionic Hamiltonians ([`quadratic`]).
//!
//! Any operator can be turned into an unevaluated sum-of-products display
//! expression ([`expr::Expr`]) by the formatters in [`format`], which show
//! integer coefficients as signed prime factorizations.
//!
//! ```
//! use spinferm::{
//!     format::format_fermion,
//!     jordan_wigner::reverse_jordan_wigner,
//!     models::anisotropic_chain,
//! };
//!
//! let h = anisotropic_chain(2, 1, 1, 0);
//! // with equal couplings the pairing terms cancel, leaving only hopping
//! let f = reverse_jordan_wigner(&h);
//! assert_eq!(f.len(), 2);
//! println!("{}", format_fermion(&f));
//! ```

pub mod rational;
pub mod coeff;
pub mod factor;

pub mod algebra;
pub mod pauli;
pub mod fermion;
pub mod majorana;

pub mod jordan_wigner;
pub mod quadratic;
pub mod models;

pub mod expr;
pub mod format;
