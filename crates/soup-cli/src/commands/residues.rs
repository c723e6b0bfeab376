use crate::cli::ResiduesArgs;
use crate::commands::load_structure;
use crate::error::Result;
use pdbsoup::core::models::residue::ResidueProxy;
use pdbsoup::core::models::soup::Soup;
use std::io::{self, Write};

pub fn run(args: ResiduesArgs) -> Result<()> {
    let result = load_structure(&args.load)?;
    let stdout = io::stdout();
    write_residues(&mut stdout.lock(), &result.soup, args.chain.as_deref())?;
    Ok(())
}

fn format_residue(residue: &ResidueProxy<'_>) -> String {
    let normal = match residue.normal() {
        Some(n) => format!("{:>7.3} {:>7.3} {:>7.3}", n.x, n.y, n.z),
        None => "-".to_string(),
    };
    format!(
        "{:<2} {:>4}{} {:<3} {} {}",
        residue.chain(),
        residue.number(),
        residue.insertion_code().unwrap_or(' '),
        residue.name(),
        residue.secondary_structure(),
        normal
    )
}

pub fn write_residues(out: &mut impl Write, soup: &Soup, chain: Option<&str>) -> io::Result<()> {
    for residue in soup
        .residues()
        .filter(|residue| chain.is_none_or(|wanted| residue.chain() == wanted))
    {
        writeln!(out, "{}", format_residue(&residue))?;
    }
    Ok(())
}
