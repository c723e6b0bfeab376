//! # Workflows Module
//!
//! High-level entry points that run the whole pipeline on an input.
//!
//! - **Load Workflow** ([`load`]) - Parse a PDB file, classify residues, infer
//!   bonds and assign secondary structure, reporting progress per phase.

pub mod load;
