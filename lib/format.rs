//! Conversion of operator expressions into display [`Expr`]s.
//!
//! Every coefficient is brought into canonical form first. Integer
//! coefficients are then shown as a sign times an unevaluated prime
//! factorization, so that e.g. 12 appears as `2²·3`; everything else is shown
//! as-is. For Majorana operators, whose physically meaningful coefficients are
//! typically imaginary, the integer check is applied to the coefficient
//! divided by *i* and the result is shown as the factorization times *i*.
//!
//! ```
//! use spinferm::format::format_spin;
//! use spinferm::pauli::QubitOperator;
//!
//! let op = QubitOperator::from_strs([("X0 X1", 12), ("Z1", -1)]).unwrap();
//! assert_eq!(format_spin(&op).to_string(), "-Z₁ + 2²·3 X₀ X₁");
//! ```

use itertools::Itertools;
use ndarray as nd;
use num_traits::Zero;
use crate::{
    algebra::{ Algebra, OpExpr, Variant },
    coeff::Coeff,
    expr::Expr,
    factor::factorize,
    fermion::FermionOperator,
    majorana::MajoranaOperator,
    pauli::QubitOperator,
};

/// Convert a single coefficient according to the rules of `variant`.
pub fn format_coeff(coeff: &Coeff, variant: Variant) -> Expr {
    match variant {
        Variant::Spin | Variant::Fermion => {
            match coeff.as_integer() {
                Some(n) => Expr::Factored(factorize(n)),
                None => Expr::Number(coeff.clone()),
            }
        },
        Variant::Majorana => {
            match coeff.div_i().as_integer() {
                Some(n) => Expr::product(vec![Expr::Factored(factorize(n)), Expr::ImagUnit]),
                None => Expr::Number(coeff.clone()),
            }
        },
    }
}

/// Convert an operator expression into an unevaluated sum of products.
///
/// Terms are emitted in order of length and then factors. A single term is
/// returned without a sum around it, a pure identity term becomes just its
/// coefficient, and an empty expression becomes the number 0.
pub fn format_expr<A>(op: &OpExpr<A>) -> Expr
where A: Algebra
{
    let terms: Vec<Expr> =
        op.sorted_terms().into_iter()
        .filter(|(_, c)| A::VARIANT != Variant::Majorana || !c.is_zero())
        .map(|(term, c)| {
            let coeff = format_coeff(c, A::VARIANT);
            if term.is_empty() { return coeff; }
            let mut factors: Vec<Expr> = Vec::with_capacity(term.len() + 1);
            factors.push(coeff);
            factors.extend(term.iter().map(|f| Expr::Symbol(A::symbol(f))));
            Expr::product(factors)
        })
        .collect();
    Expr::sum(terms)
}

/// Format a spin (Pauli) operator.
pub fn format_spin(op: &QubitOperator) -> Expr { format_expr(op) }

/// Format a fermionic operator.
pub fn format_fermion(op: &FermionOperator) -> Expr { format_expr(op) }

/// Format a Majorana operator, dropping zero-valued terms.
pub fn format_majorana(op: &MajoranaOperator) -> Expr { format_expr(op) }

/// Render a matrix of coefficients, one row per line in Unicode or as a
/// `pmatrix` environment in LaTeX. Integer entries are shown plainly.
pub fn format_matrix(m: &nd::Array2<Coeff>, latex: bool) -> String {
    let entries: Vec<Vec<String>> =
        m.outer_iter()
        .map(|row| {
            row.iter()
                .map(|c| if latex { c.latex() } else { c.to_string() })
                .collect()
        })
        .collect();
    if latex {
        let body = entries.iter().map(|row| row.join(" & ")).join(" \\\\\n");
        return format!("\\begin{{pmatrix}}\n{body}\n\\end{{pmatrix}}");
    }
    let width = entries.iter().flatten().map(|s| s.chars().count()).max().unwrap_or(0);
    entries.iter()
        .map(|row| {
            let cells = row.iter().map(|s| format!("{s:>width$}")).join("  ");
            format!("[ {cells} ]")
        })
        .join("\n")
}
