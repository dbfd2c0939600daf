use ndarray as nd;
use num_traits::Zero;
use proptest::prelude::*;
use spinferm::{
    coeff::Coeff,
    expr::{ Expr, SymbolKind },
    factor::Sign,
    fermion::{ normal_ordered, FermionOperator },
    format::{ format_fermion, format_majorana, format_spin },
    jordan_wigner::{ jordan_wigner, reverse_jordan_wigner },
    majorana::{ fermion_to_majorana, majorana_to_fermion, MajoranaOperator },
    models::{ anisotropic_chain, p_wave_chain },
    pauli::QubitOperator,
    quadratic::QuadraticHamiltonian,
};

fn ints(m: &nd::Array2<Coeff>) -> Vec<Vec<i64>> {
    m.outer_iter()
        .map(|row| {
            row.iter()
                .map(|c| c.as_integer().expect("non-integer matrix entry"))
                .collect()
        })
        .collect()
}

#[test]
fn p_wave_blocks() {
    let h = p_wave_chain(4, 3, 5, 7);
    let q = QuadraticHamiltonian::from_fermion_operator(&h, Some(4)).unwrap();
    assert_eq!(
        ints(q.hermitian_part()),
        vec![
            vec![-7, -3,  0,  0],
            vec![-3, -7, -3,  0],
            vec![ 0, -3, -7, -3],
            vec![ 0,  0, -3, -7],
        ],
    );
    assert_eq!(
        ints(q.antisymmetric_part()),
        vec![
            vec![0, -5,  0,  0],
            vec![5,  0, -5,  0],
            vec![0,  5,  0, -5],
            vec![0,  0,  5,  0],
        ],
    );
    assert!(q.constant().is_zero());
    assert_eq!(q.to_fermion_operator(), normal_ordered(&h));
}

#[test]
fn p_wave_blocks_symbolic() {
    let (t, d, mu) = (Coeff::param("t"), Coeff::param("Delta"), Coeff::param("mu"));
    let h = p_wave_chain(4, t.clone(), d.clone(), mu.clone());
    let q = QuadraticHamiltonian::from_fermion_operator(&h, None).unwrap();
    assert_eq!(q.n_sites(), 4);
    assert_eq!(q.hermitian_part()[[2, 2]], -&mu);
    assert_eq!(q.hermitian_part()[[1, 2]], -&t);
    assert_eq!(q.antisymmetric_part()[[1, 0]], d);
    let numeric = q
        .subs("t", &Coeff::from(3))
        .subs("Delta", &Coeff::from(5))
        .subs("mu", &Coeff::from(7));
    let direct = QuadraticHamiltonian::from_fermion_operator(&p_wave_chain(4, 3, 5, 7), None)
        .unwrap();
    assert_eq!(numeric, direct);
    let bdg = q.bdg_matrix();
    assert_eq!(bdg.dim(), (8, 8));
    assert_eq!(bdg[[4, 4]], mu);
    assert_eq!(bdg[[5, 0]], -&d);
}

#[test]
fn spin_chain_round_trip() {
    let h = anisotropic_chain(4, 3, 5, -7);
    let f = reverse_jordan_wigner(&h);
    assert!(f.is_normal_ordered());
    let back = jordan_wigner(&f);
    assert_eq!(back, h);
    let expected = format_spin(&h).expand();
    let found = format_spin(&back).expand();
    assert_eq!(found.len(), expected.len());
    for (symbols, c) in expected.iter() {
        assert_eq!(found.get(symbols), Some(c), "mismatch at {symbols:?}");
    }
}

#[test]
fn spin_chain_is_quadratic() {
    let h = anisotropic_chain(4, Coeff::param("alpha"), Coeff::param("beta"), Coeff::param("g"));
    let f = reverse_jordan_wigner(&h);
    let q = QuadraticHamiltonian::from_fermion_operator(&f, Some(4)).unwrap();
    // Z_k = 1 - 2 n_k
    assert_eq!(q.hermitian_part()[[0, 0]], Coeff::from(-2) * Coeff::param("g"));
    assert_eq!(q.constant(), &(Coeff::from(4) * Coeff::param("g")));
    assert_eq!(jordan_wigner(&q.to_fermion_operator()), h);
}

#[test]
fn identity_formats_to_coefficient() {
    let c = Coeff::frac(-3, 4) + Coeff::param("x");
    assert_eq!(format_spin(&QubitOperator::identity(c.clone())), Expr::Number(c.clone()));
    assert_eq!(format_fermion(&FermionOperator::identity(c.clone())), Expr::Number(c));
    let e = format_fermion(&FermionOperator::identity(30));
    assert_eq!(e.to_string(), "2·3·5");
    assert_eq!(e.expand().get(&Vec::new()), Some(&Coeff::from(30)));
}

#[test]
fn majorana_zeros_vanish() {
    let f = p_wave_chain(3, 1, 1, 0);
    let mut m = fermion_to_majorana(&f);
    m.insert(vec![0, 5], Coeff::from(0));
    let e = format_majorana(&m);
    assert!(e.symbols().iter().all(|s| s.kind() == SymbolKind::Gamma));
    let zero_terms: Vec<_> =
        m.terms().filter(|(_, c)| c.as_integer() == Some(0)).collect();
    assert!(!zero_terms.is_empty());
    let shown = e.expand();
    assert!(!shown.keys().any(|k| k.len() == 2 && k[0].site() == 0 && k[1].site() == 5));
    assert_eq!(majorana_to_fermion(&m), normal_ordered(&f));
}

#[test]
fn kitaev_point_is_majorana_dimerized() {
    // at t = Δ, μ = 0 only i γ_{2j+1} γ_{2j+2} couplings survive
    let f = p_wave_chain(3, 1, 1, 0);
    let m = fermion_to_majorana(&f);
    let expected: MajoranaOperator =
        (0..2)
        .map(|j| MajoranaOperator::term(vec![2 * j + 1, 2 * j + 2], Coeff::i()))
        .sum();
    assert_eq!(m, expected);
    assert_eq!(format_majorana(&m).to_string(), "i γ₁ γ₂ + i γ₃ γ₄");
}

#[test]
fn small_parameters_survive() {
    let tiny: Coeff = "1e-11".parse().unwrap();
    assert!(!tiny.is_zero());
    let m = MajoranaOperator::term(vec![0, 1], tiny.mul_i());
    assert_eq!(m.len(), 1);
    assert_ne!(format_majorana(&m), Expr::Number(Coeff::zero()));

    let delta: Coeff = "1e-12".parse().unwrap();
    let h = p_wave_chain(2, Coeff::frac(1, 10), delta.clone(), 0);
    let q = QuadraticHamiltonian::from_fermion_operator(&h, None).unwrap();
    assert_eq!(q.antisymmetric_part()[[1, 0]], delta);
    assert!(!q.conserves_particle_number());
    assert!(Coeff::from_f64(1e-12).is_err());
}

proptest! {
    #[test]
    fn integer_coefficients_keep_sign_and_magnitude(n in -1_000_000_i64..1_000_000) {
        prop_assume!(n != 0);
        match format_spin(&QubitOperator::identity(n)) {
            Expr::Factored(f) => {
                prop_assert_eq!(f.sign(), Sign::of(n));
                prop_assert_eq!(f.value(), n);
            },
            other => { prop_assert!(false, "unexpected {:?}", other); },
        }
    }
}
