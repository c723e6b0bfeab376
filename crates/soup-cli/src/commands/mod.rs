pub mod bonds;
pub mod info;
pub mod residues;

use crate::cli::LoadArgs;
use crate::config::PartialSoupConfig;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use pdbsoup::engine::progress::ProgressReporter;
use pdbsoup::workflows::load::{self, LoadResult};
use tracing::info;

/// Resolves the configuration and runs the load workflow on `--input`.
///
/// A file without usable atom records is reported as an error here; the
/// library itself only records the reason on the returned soup.
pub fn load_structure(args: &LoadArgs) -> Result<LoadResult> {
    let config = PartialSoupConfig::resolve(args)?;
    info!("Loading input structure from {:?}", &args.input);

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());
    let result = load::run_from_path(&args.input, &config, &reporter)?;

    if let Some(reason) = result.soup.parse_error() {
        return Err(CliError::EmptyStructure {
            path: args.input.clone(),
            reason: reason.to_string(),
        });
    }
    Ok(result)
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::fmt::Write as _;

    /// A three-residue chain A (two alanines and a water) plus one
    /// glycine on chain B, in fixed-column PDB form.
    pub fn sample_pdb() -> String {
        let atoms: [(&str, &str, &str, char, i32, [f32; 3], &str); 13] = [
            ("ATOM", "N", "ALA", 'A', 1, [0.000, 0.000, 0.000], "N"),
            ("ATOM", "CA", "ALA", 'A', 1, [1.458, 0.000, 0.000], "C"),
            ("ATOM", "C", "ALA", 'A', 1, [2.009, 1.420, 0.000], "C"),
            ("ATOM", "O", "ALA", 'A', 1, [1.251, 2.390, 0.000], "O"),
            ("ATOM", "N", "ALA", 'A', 2, [3.332, 1.536, 0.000], "N"),
            ("ATOM", "CA", "ALA", 'A', 2, [3.970, 2.846, 0.000], "C"),
            ("ATOM", "C", "ALA", 'A', 2, [5.486, 2.705, 0.000], "C"),
            ("ATOM", "O", "ALA", 'A', 2, [6.009, 1.593, 0.000], "O"),
            ("HETATM", "O", "HOH", 'A', 101, [20.0, 20.0, 20.0], "O"),
            ("ATOM", "N", "GLY", 'B', 1, [0.000, 10.000, 0.000], "N"),
            ("ATOM", "CA", "GLY", 'B', 1, [1.458, 10.000, 0.000], "C"),
            ("ATOM", "C", "GLY", 'B', 1, [2.009, 11.420, 0.000], "C"),
            ("ATOM", "O", "GLY", 'B', 1, [1.251, 12.390, 0.000], "O"),
        ];
        let mut text = String::from("TITLE     SAMPLE STRUCTURE\n");
        for (serial, (record, name, res, chain, seq, pos, element)) in atoms.iter().enumerate() {
            let padded = if name.len() < 4 {
                format!(" {:<3}", name)
            } else {
                name.to_string()
            };
            writeln!(
                text,
                "{:<6}{:>5} {:<4} {:>3} {}{:>4}    {:>8.3}{:>8.3}{:>8.3}{:>6.2}{:>6.2}          {:>2}",
                record, serial + 1, padded, res, chain, seq, pos[0], pos[1], pos[2], 1.0, 20.0, element
            )
            .unwrap();
        }
        text.push_str("END\n");
        text
    }
}
