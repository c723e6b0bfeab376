use crate::cli::BondsArgs;
use crate::commands::load_structure;
use crate::error::Result;
use pdbsoup::core::models::atom::AtomProxy;
use pdbsoup::core::models::soup::Soup;
use std::io::{self, Write};
use tracing::info;

pub fn run(args: BondsArgs) -> Result<()> {
    let result = load_structure(&args.load)?;
    info!(
        "Listing {} bonds found with the configured strategy.",
        result.bond_pairs
    );
    let stdout = io::stdout();
    write_bonds(&mut stdout.lock(), &result.soup)?;
    Ok(())
}

fn atom_label(atom: &AtomProxy<'_>) -> String {
    let residue = atom.residue();
    format!(
        "{}{}:{}:{}",
        residue.name(),
        residue.number(),
        residue.chain(),
        atom.name()
    )
}

/// Writes each bond once, lower atom index first.
pub fn write_bonds(out: &mut impl Write, soup: &Soup) -> io::Result<()> {
    for bond in soup.bonds().filter(|bond| bond.is_forward()) {
        let (a, b) = bond.atoms();
        writeln!(
            out,
            "{:>6} {:>6}  {:<16} {:<16} {:.3}",
            a.index(),
            b.index(),
            atom_label(&a),
            atom_label(&b),
            bond.length()
        )?;
    }
    Ok(())
}
