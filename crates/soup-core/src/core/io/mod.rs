//! Provides input functionality for molecular structure file formats.
//!
//! Formats implement the [`traits::StructureFile`] trait, which turns text
//! into a [`crate::core::models::soup::Soup`] plus format-specific metadata.
//! The fixed-column PDB format is the one format currently supported.

pub mod pdb;
pub mod traits;
