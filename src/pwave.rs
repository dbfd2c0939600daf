//! Build the p-wave (Kitaev) chain and print its fermion, Majorana, and spin
//! forms along with its Bogoliubov-de Gennes blocks.
//!
//! ```text
//! pwave --sites 4 --t 3 --delta 5 --mu 7
//! pwave --mu 0 --latex
//! ```

use std::error::Error;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use spinferm::{
    coeff::Coeff,
    expr::Expr,
    fermion::normal_ordered,
    format::{ format_fermion, format_majorana, format_matrix, format_spin },
    jordan_wigner::jordan_wigner,
    majorana::fermion_to_majorana,
    models::p_wave_chain,
    quadratic::QuadraticHamiltonian,
};

/// p-wave superconducting chain
#[derive(Parser, Debug)]
#[command(name = "pwave")]
#[command(about = "Print the p-wave chain and its Bogoliubov-de Gennes blocks")]
struct Args {
    /// Number of sites
    #[arg(short, long, default_value = "4")]
    sites: usize,

    /// Hopping amplitude
    #[arg(long, default_value = "t", allow_hyphen_values = true)]
    t: Coeff,

    /// Pairing amplitude
    #[arg(long, default_value = "Delta", allow_hyphen_values = true)]
    delta: Coeff,

    /// Chemical potential
    #[arg(long, default_value = "mu", allow_hyphen_values = true)]
    mu: Coeff,

    /// Print the full 2n × 2n BdG matrix as well
    #[arg(long)]
    bdg: bool,

    /// Print LaTeX instead of Unicode
    #[arg(long)]
    latex: bool,
}

fn show(e: &Expr, latex: bool) -> String {
    if latex { e.latex() } else { e.to_string() }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let fermion = normal_ordered(
        &p_wave_chain(args.sites, args.t.clone(), args.delta.clone(), args.mu.clone()));
    info!(sites = args.sites, n_terms = fermion.len(), "built p-wave chain");
    let majorana = fermion_to_majorana(&fermion);
    let spin = jordan_wigner(&fermion);

    println!("fermion:\n{}\n", show(&format_fermion(&fermion), args.latex));
    println!("majorana:\n{}\n", show(&format_majorana(&majorana), args.latex));
    println!("spin:\n{}\n", show(&format_spin(&spin), args.latex));

    let quad = QuadraticHamiltonian::from_fermion_operator(&fermion, Some(args.sites))?;
    println!("hermitian block:\n{}\n", format_matrix(quad.hermitian_part(), args.latex));
    println!("antisymmetric block:\n{}", format_matrix(quad.antisymmetric_part(), args.latex));
    if args.bdg {
        println!("\nbdg matrix:\n{}", format_matrix(&quad.bdg_matrix(), args.latex));
    }
    Ok(())
}
