//! # Core Models Module
//!
//! This module contains the columnar data model that every other layer of the
//! library reads and writes.
//!
//! ## Overview
//!
//! A loaded structure is a [`soup::Soup`]: three append-only column tables
//! (atoms, residues, bonds), a handful of interned string tables, and the
//! per-residue data derived during analysis. Instead of one heap object per
//! atom, callers hold cheap proxies that pair a reference to the soup with a
//! row index.
//!
//! ## Key Components
//!
//! - [`store`] - Growable table of fixed, typed columns
//! - [`intern`] - Value-to-id string tables
//! - [`soup`] - The complete molecular model and its table layout
//! - [`builder`] - Sequential construction of a soup in file order
//! - [`atom`], [`residue`], [`topology`] - Row proxies for atoms, residues and bonds
//! - [`normals`] - Per-residue orientation candidates and averaged normals
//!
//! ## Usage
//!
//! ```ignore
//! use pdbsoup::core::models::builder::{NewAtom, SoupBuilder};
//! use nalgebra::Point3;
//!
//! let mut builder = SoupBuilder::new();
//! builder.start_residue("ALA", "A", 1, None);
//! builder.add_atom(NewAtom::new("CA", "C", Point3::new(0.0, 0.0, 0.0)));
//! let soup = builder.build();
//!
//! let residue = soup.residue(0).unwrap();
//! assert_eq!(residue.atom_by_name("CA").map(|a| a.index()), Some(0));
//! ```

pub mod atom;
pub mod builder;
pub mod intern;
pub mod normals;
pub mod residue;
pub mod soup;
pub mod store;
pub mod topology;
