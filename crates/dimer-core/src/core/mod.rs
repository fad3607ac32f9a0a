//! # Core Module
//!
//! Fundamental building blocks for dimer assembly.
//!
//! - **Molecular Representation** ([`models`]) - Atoms and ordered atom collections
//! - **Element Data** ([`elements`]) - Canonical element symbols and standard atomic masses
//! - **File I/O** ([`io`]) - Reading and writing XYZ coordinate files
//! - **Geometry** ([`utils`]) - Rigid-body transforms and number formatting helpers

pub mod elements;
pub mod io;
pub mod models;
pub mod utils;
