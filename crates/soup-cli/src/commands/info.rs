use crate::cli::InfoArgs;
use crate::commands::load_structure;
use crate::error::Result;
use pdbsoup::core::models::soup::Soup;
use pdbsoup::workflows::load::LoadResult;
use std::io::{self, Write};
use tracing::info;

pub fn run(args: InfoArgs) -> Result<()> {
    let result = load_structure(&args.load)?;
    info!("Writing structure summary.");
    let stdout = io::stdout();
    write_summary(&mut stdout.lock(), &result)?;
    Ok(())
}

/// One `(chain, tags)` entry per contiguous chain run, in file order.
pub fn chain_secondary_structure(soup: &Soup) -> Vec<(String, String)> {
    let mut chains: Vec<(String, String)> = Vec::new();
    for residue in soup.residues() {
        let tag = residue.secondary_structure().as_char();
        match chains.last_mut() {
            Some((chain, tags)) if chain.as_str() == residue.chain() => tags.push(tag),
            _ => chains.push((residue.chain().to_string(), tag.to_string())),
        }
    }
    chains
}

pub fn write_summary(out: &mut impl Write, result: &LoadResult) -> io::Result<()> {
    let soup = &result.soup;
    let title = if soup.title().is_empty() {
        "(untitled)"
    } else {
        soup.title()
    };
    writeln!(out, "Title:        {}", title)?;
    writeln!(out, "Models:       {}", result.metadata.model_count)?;
    writeln!(out, "Atoms:        {}", soup.atom_count())?;
    writeln!(out, "Residues:     {}", soup.residue_count())?;
    writeln!(out, "Bonds:        {}", soup.bond_count() / 2)?;
    writeln!(out, "H-bonds:      {}", result.secondary.hydrogen_bonds)?;
    writeln!(out, "Max length:   {:.3}", soup.max_length())?;
    writeln!(
        out,
        "Residue kinds: {} protein, {} nucleic, {} water, {} grid, {} other",
        result.classification.protein,
        result.classification.nucleic,
        result.classification.water,
        result.classification.grid,
        result.classification.other
    )?;
    writeln!(out, "Skipped lines: {}", result.metadata.line_issues.len())?;
    writeln!(out, "Secondary structure:")?;
    for (chain, tags) in chain_secondary_structure(soup) {
        let chain = if chain.is_empty() { "_" } else { chain.as_str() };
        writeln!(out, "  {:>2} {}", chain, tags)?;
    }
    Ok(())
}
