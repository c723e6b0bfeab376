//! # Engine Module
//!
//! The analysis layer of pdbsoup. Given a soup populated by the reader, the
//! engine classifies residues, infers covalent bonds from geometry and derives
//! backbone hydrogen bonds, helices, sheets and per-residue normals.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Parser, bonding and secondary-structure settings
//! - **Bond Inference** ([`bonding`]) - Distance-based bond detection strategies
//! - **Secondary Structure** ([`secondary`]) - Residue classification and H-bond patterns
//! - **Progress Monitoring** ([`progress`]) - Phase events for front ends
//! - **Error Handling** ([`error`]) - Engine-level error type
//!
//! Bonding and secondary-structure analysis never fail: missing atoms degrade
//! a residue to a non-polymer instead of raising an error.

pub mod bonding;
pub mod config;
pub mod error;
pub mod progress;
pub mod secondary;
