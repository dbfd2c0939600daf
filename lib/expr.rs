//! Unevaluated sum-of-products display expressions.
//!
//! An [`Expr`] is what the formatters in [`format`][crate::format] produce: a
//! tree of numbers, signed prime factorizations, and noncommuting operator
//! symbols that is rendered as-is, without any further simplification.
//! [`Expr::expand`] multiplies everything back out for comparison.
//!
//! ```
//! use spinferm::expr::{ Expr, OpSymbol, SymbolKind };
//! use spinferm::factor::factorize;
//!
//! let e = Expr::product(vec![
//!     Expr::Factored(factorize(-12)),
//!     Expr::Symbol(OpSymbol::new(1, SymbolKind::Create)),
//!     Expr::Symbol(OpSymbol::new(0, SymbolKind::Annihilate)),
//! ]);
//! assert_eq!(e.to_string(), "-2²·3 c†₁ c₀");
//! assert_eq!(e.latex(), "-2^{2} \\cdot 3 c^{\\dagger}_{1} c_{0}");
//! ```

use std::{ collections::BTreeMap, fmt };
use itertools::Itertools;
use num_traits::{ One, Zero };
use crate::{
    coeff::Coeff,
    factor::Factorization,
    pauli::Pauli,
};

/// Which operator a symbol stands for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SymbolKind {
    /// A Pauli matrix.
    Pauli(Pauli),
    /// A fermionic creation operator.
    Create,
    /// A fermionic annihilation operator.
    Annihilate,
    /// A Majorana operator.
    Gamma,
}

/// A noncommuting operator symbol carrying an index subscript.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OpSymbol {
    site: usize,
    kind: SymbolKind,
}

const SUBSCRIPTS: [char; 10] = ['₀', '₁', '₂', '₃', '₄', '₅', '₆', '₇', '₈', '₉'];

fn subscript(k: usize) -> String {
    k.to_string().chars()
        .map(|c| SUBSCRIPTS[c.to_digit(10).unwrap_or(0) as usize])
        .collect()
}

impl OpSymbol {
    /// Create a new symbol.
    pub fn new(site: usize, kind: SymbolKind) -> Self { Self { site, kind } }

    /// Return the subscript index.
    pub fn site(&self) -> usize { self.site }

    /// Return the operator kind.
    pub fn kind(&self) -> SymbolKind { self.kind }

    /// Render as LaTeX.
    pub fn latex(&self) -> String {
        let k = self.site;
        match self.kind {
            SymbolKind::Pauli(p) => format!("{p}_{{{k}}}"),
            SymbolKind::Create => format!("c^{{\\dagger}}_{{{k}}}"),
            SymbolKind::Annihilate => format!("c_{{{k}}}"),
            SymbolKind::Gamma => format!("\\gamma_{{{k}}}"),
        }
    }
}

impl fmt::Display for OpSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let k = subscript(self.site);
        match self.kind {
            SymbolKind::Pauli(p) => write!(f, "{p}{k}"),
            SymbolKind::Create => write!(f, "c†{k}"),
            SymbolKind::Annihilate => write!(f, "c{k}"),
            SymbolKind::Gamma => write!(f, "γ{k}"),
        }
    }
}

/// An unevaluated symbolic expression.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Expr {
    /// The literal 1.
    One,
    /// A coefficient, shown in simplified form.
    Number(Coeff),
    /// A signed prime factorization.
    Factored(Factorization),
    /// The imaginary unit.
    ImagUnit,
    /// An operator symbol.
    Symbol(OpSymbol),
    /// A noncommutative product, in order.
    Mul(Vec<Expr>),
    /// A sum.
    Add(Vec<Expr>),
}

impl Expr {
    /// Build a product, flattening nested products. A product of one factor
    /// is that factor; the empty product is [`Expr::One`].
    pub fn product(factors: Vec<Expr>) -> Self {
        let mut flat: Vec<Expr> =
            factors.into_iter()
            .flat_map(|e| {
                match e {
                    Self::Mul(inner) => inner,
                    other => vec![other],
                }
            })
            .collect();
        match flat.len() {
            0 => Self::One,
            1 => flat.pop().unwrap_or(Self::One),
            _ => Self::Mul(flat),
        }
    }

    /// Build a sum. A sum of one term is that term; the empty sum is zero.
    pub fn sum(mut terms: Vec<Expr>) -> Self {
        match terms.len() {
            0 => Self::Number(Coeff::zero()),
            1 => terms.pop().unwrap_or(Self::One),
            _ => Self::Add(terms),
        }
    }

    /// Return `true` if `self` is a sum.
    pub fn is_add(&self) -> bool { matches!(self, Self::Add(_)) }

    /// Return `true` if `self` is a product.
    pub fn is_mul(&self) -> bool { matches!(self, Self::Mul(_)) }

    /// Return the number of top-level terms: the length of a sum, or 1.
    pub fn num_terms(&self) -> usize {
        match self {
            Self::Add(terms) => terms.len(),
            _ => 1,
        }
    }

    /// Collect every operator symbol appearing anywhere in `self`.
    pub fn symbols(&self) -> Vec<OpSymbol> {
        match self {
            Self::Symbol(s) => vec![*s],
            Self::Mul(items) | Self::Add(items) => {
                items.iter().flat_map(Self::symbols).collect()
            },
            _ => Vec::new(),
        }
    }

    /// Multiply everything out into a map from symbol sequence to coefficient.
    /// Symbols do not commute; entries that cancel are dropped.
    pub fn expand(&self) -> BTreeMap<Vec<OpSymbol>, Coeff> {
        let scalar = |c: Coeff| -> BTreeMap<Vec<OpSymbol>, Coeff> {
            let mut map = BTreeMap::new();
            if !c.is_zero() { map.insert(Vec::new(), c); }
            map
        };
        match self {
            Self::One => scalar(Coeff::one()),
            Self::Number(c) => scalar(c.clone()),
            Self::Factored(f) => scalar(Coeff::from(f.value())),
            Self::ImagUnit => scalar(Coeff::i()),
            Self::Symbol(s) => {
                let mut map = BTreeMap::new();
                map.insert(vec![*s], Coeff::one());
                map
            },
            Self::Mul(factors) => {
                factors.iter()
                    .fold(scalar(Coeff::one()), |acc, factor| {
                        let rhs = factor.expand();
                        let mut out: BTreeMap<Vec<OpSymbol>, Coeff> = BTreeMap::new();
                        for ((s_l, c_l), (s_r, c_r)) in acc.iter().cartesian_product(rhs.iter()) {
                            let key: Vec<OpSymbol> =
                                s_l.iter().chain(s_r.iter()).copied().collect();
                            *out.entry(key).or_insert_with(Coeff::zero) += &(c_l * c_r);
                        }
                        out.retain(|_, c| !c.is_zero());
                        out
                    })
            },
            Self::Add(terms) => {
                let mut out: BTreeMap<Vec<OpSymbol>, Coeff> = BTreeMap::new();
                for (s, c) in terms.iter().flat_map(Self::expand) {
                    *out.entry(s).or_insert_with(Coeff::zero) += &c;
                }
                out.retain(|_, c| !c.is_zero());
                out
            },
        }
    }

    fn render(&self, latex: bool) -> String {
        match self {
            Self::One => "1".to_string(),
            Self::Number(c) => if latex { c.latex() } else { c.to_string() },
            Self::Factored(f) => if latex { f.latex() } else { f.to_string() },
            Self::ImagUnit => "i".to_string(),
            Self::Symbol(s) => if latex { s.latex() } else { s.to_string() },
            Self::Mul(factors) => render_product(factors, latex),
            Self::Add(terms) => {
                let mut out = String::new();
                for (k, term) in terms.iter().enumerate() {
                    let s = term.render(latex);
                    if k == 0 {
                        out.push_str(&s);
                    } else if let Some(rest) = s.strip_prefix('-') {
                        out.push_str(" - ");
                        out.push_str(rest);
                    } else {
                        out.push_str(" + ");
                        out.push_str(&s);
                    }
                }
                out
            },
        }
    }

    /// Render as LaTeX.
    pub fn latex(&self) -> String { self.render(true) }
}

// a leading ±1 is shown as a bare sign when something follows it
fn render_product(factors: &[Expr], latex: bool) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(factors.len());
    let mut sign = "";
    for (k, factor) in factors.iter().enumerate() {
        let unit_sign: Option<i64> =
            match factor {
                Expr::One => Some(1),
                Expr::Factored(f) => f.is_unit().then(|| f.sign().as_int()),
                Expr::Number(c) => c.as_integer().filter(|n| n.abs() == 1),
                _ => None,
            };
        if let (0, Some(s)) = (k, unit_sign) {
            if factors.len() > 1 {
                if s < 0 { sign = "-"; }
                continue;
            }
        }
        let s =
            match factor {
                Expr::Number(c) if c.is_compound() => {
                    if latex {
                        format!("\\left({}\\right)", c.latex())
                    } else {
                        format!("({c})")
                    }
                },
                Expr::Add(_) => {
                    if latex {
                        format!("\\left({}\\right)", factor.latex())
                    } else {
                        format!("({})", factor)
                    }
                },
                _ => factor.render(latex),
            };
        parts.push(s);
    }
    format!("{sign}{}", parts.join(" "))
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factor::factorize;

    fn sym(site: usize, kind: SymbolKind) -> Expr {
        Expr::Symbol(OpSymbol::new(site, kind))
    }

    #[test]
    fn symbols() {
        assert_eq!(OpSymbol::new(0, SymbolKind::Pauli(Pauli::X)).to_string(), "X₀");
        assert_eq!(OpSymbol::new(12, SymbolKind::Create).to_string(), "c†₁₂");
        assert_eq!(OpSymbol::new(3, SymbolKind::Annihilate).to_string(), "c₃");
        assert_eq!(OpSymbol::new(5, SymbolKind::Gamma).to_string(), "γ₅");
        assert_eq!(OpSymbol::new(5, SymbolKind::Gamma).latex(), "\\gamma_{5}");
    }

    #[test]
    fn unit_coefficients() {
        let x0 = sym(0, SymbolKind::Pauli(Pauli::X));
        let e = Expr::product(vec![Expr::Factored(factorize(1)), x0.clone()]);
        assert_eq!(e.to_string(), "X₀");
        let e = Expr::product(vec![Expr::Factored(factorize(-1)), Expr::ImagUnit, x0]);
        assert_eq!(e.to_string(), "-i X₀");
    }

    #[test]
    fn sums() {
        let e = Expr::sum(vec![
            Expr::product(vec![Expr::Factored(factorize(3)), sym(0, SymbolKind::Gamma)]),
            Expr::product(vec![Expr::Factored(factorize(-4)), sym(1, SymbolKind::Gamma)]),
            Expr::product(vec![Expr::Number(Coeff::frac(1, 2) + Coeff::param("t")), sym(2, SymbolKind::Gamma)]),
        ]);
        assert_eq!(e.to_string(), "3 γ₀ - 2² γ₁ + (1/2 + t) γ₂");
        assert_eq!(e.num_terms(), 3);
        assert_eq!(e.symbols().len(), 3);
        assert_eq!(Expr::sum(vec![]), Expr::Number(Coeff::zero()));
    }

    #[test]
    fn expansion_is_noncommutative() {
        let a = sym(0, SymbolKind::Create);
        let b = sym(1, SymbolKind::Annihilate);
        let ab = Expr::product(vec![Expr::Factored(factorize(6)), a.clone(), b.clone()]);
        let ba = Expr::product(vec![Expr::Factored(factorize(6)), b, a]);
        assert_ne!(ab.expand(), ba.expand());
        let diff = Expr::sum(vec![
            ab.clone(),
            Expr::product(vec![Expr::Factored(factorize(-1)), ab]),
        ]);
        assert!(diff.expand().is_empty());
        let i2 = Expr::product(vec![Expr::ImagUnit, Expr::ImagUnit]);
        assert_eq!(i2.expand().get(&Vec::new()), Some(&Coeff::from(-1)));
    }
}
