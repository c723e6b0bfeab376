//! # Core Module
//!
//! This module provides the stateless building blocks of the soup engine:
//! the columnar data model, structure-file reading and spatial indexing.
//!
//! ## Architecture
//!
//! - **Molecular Representation** ([`models`]) - Column tables, interned names and row proxies
//! - **File I/O** ([`io`]) - The `StructureFile` trait and the PDB reader
//! - **Spatial Indexing** ([`spatial`]) - Bucketed proximity queries over point sets
//! - **Utilities** ([`utils`]) - Residue and element name tables, small geometry helpers
//!
//! Nothing in this layer infers bonds or secondary structure; that work lives
//! in [`crate::engine`] and reads the models defined here.

pub mod io;
pub mod models;
pub mod spatial;
pub mod utils;
