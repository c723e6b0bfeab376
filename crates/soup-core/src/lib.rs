//! # pdbsoup Core Library
//!
//! A columnar structure engine for macromolecular models: fixed-column PDB
//! parsing into typed tables, geometric bond inference and backbone
//! hydrogen-bond secondary-structure assignment.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture.
//!
//! - **[`core`]: The Foundation.** The columnar [`Soup`](core::models::soup::Soup)
//!   with its interned string tables and row proxies, the spatial hash, geometry
//!   helpers and the PDB reader.
//!
//! - **[`engine`]: The Analysis Core.** Residue classification, bond inference
//!   strategies, hydrogen-bond patterns and normal averaging, plus configuration
//!   and progress reporting.
//!
//! - **[`workflows`]: The Public API.** Complete procedures such as loading a
//!   structure file into a fully analysed soup.

pub mod core;
pub mod engine;
pub mod workflows;
