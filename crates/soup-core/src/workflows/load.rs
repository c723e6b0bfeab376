use crate::core::io::pdb::{PdbError, PdbFile, PdbMetadata, PdbReadOptions};
use crate::core::models::soup::Soup;
use crate::engine::bonding::infer_bonds;
use crate::engine::config::SoupConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Phase, Progress, ProgressReporter};
use crate::engine::secondary::{
    ClassificationSummary, SecondarySummary, assign_secondary_structure, classify_residues,
};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{info, instrument, warn};

#[derive(Debug)]
pub struct LoadResult {
    pub soup: Soup,
    pub metadata: PdbMetadata,
    pub classification: ClassificationSummary,
    pub bond_pairs: usize,
    pub secondary: SecondarySummary,
}

/// Loads a structure and runs the full analysis pipeline on it.
///
/// Only I/O failures are errors. An input without usable atom records
/// yields an empty soup whose [`Soup::parse_error`] carries the reason.
#[instrument(skip_all, name = "load_workflow")]
pub fn run(
    reader: &mut impl BufRead,
    config: &SoupConfig,
    reporter: &ProgressReporter,
) -> Result<LoadResult, EngineError> {
    config.validate()?;

    // === Phase 1: Parse ===
    reporter.report(Progress::PhaseStart {
        phase: Phase::Parse,
    });
    let options = PdbReadOptions {
        first_model_only: config.parse.first_model_only,
    };
    let (mut soup, metadata) = PdbFile::read_with_options(reader, &options)?;
    info!(
        "Parsed {} atoms in {} residues.",
        soup.atom_count(),
        soup.residue_count()
    );
    if !metadata.line_issues.is_empty() {
        reporter.report(Progress::Message(format!(
            "Skipped {} malformed line(s).",
            metadata.line_issues.len()
        )));
    }
    reporter.report(Progress::PhaseFinish);

    if soup.is_empty() {
        let error = PdbError::NoAtomLines;
        warn!("{}", error);
        soup.parse_error = Some(error.to_string());
        return Ok(LoadResult {
            soup,
            metadata,
            classification: ClassificationSummary::default(),
            bond_pairs: 0,
            secondary: SecondarySummary::default(),
        });
    }

    // === Phase 2: Residue classification ===
    reporter.report(Progress::PhaseStart {
        phase: Phase::Classify,
    });
    let classification = classify_residues(&mut soup);
    info!(
        "Classified residues: {} protein, {} nucleic, {} water, {} grid, {} other.",
        classification.protein,
        classification.nucleic,
        classification.water,
        classification.grid,
        classification.other
    );
    reporter.report(Progress::PhaseFinish);

    // === Phase 3: Bond inference ===
    reporter.report(Progress::PhaseStart {
        phase: Phase::Bonding,
    });
    let bond_pairs = infer_bonds(&mut soup, &config.bonding, reporter);
    info!(
        "Inferred {} bonds with the {} strategy.",
        bond_pairs, config.bonding.strategy
    );
    reporter.report(Progress::PhaseFinish);

    // === Phase 4: Secondary structure ===
    reporter.report(Progress::PhaseStart {
        phase: Phase::SecondaryStructure,
    });
    let secondary = assign_secondary_structure(&mut soup, &config.secondary, reporter);
    info!(
        "Found {} backbone hydrogen bonds: {} helix and {} sheet residues.",
        secondary.hydrogen_bonds, secondary.helix_residues, secondary.sheet_residues
    );
    reporter.report(Progress::PhaseFinish);

    Ok(LoadResult {
        soup,
        metadata,
        classification,
        bond_pairs,
        secondary,
    })
}

pub fn run_from_path(
    path: &Path,
    config: &SoupConfig,
    reporter: &ProgressReporter,
) -> Result<LoadResult, EngineError> {
    let file = File::open(path).map_err(PdbError::from)?;
    let mut reader = BufReader::new(file);
    run(&mut reader, config, reporter)
}

pub fn run_from_str(
    text: &str,
    config: &SoupConfig,
    reporter: &ProgressReporter,
) -> Result<LoadResult, EngineError> {
    let mut reader = text.as_bytes();
    run(&mut reader, config, reporter)
}
