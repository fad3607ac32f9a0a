//! Provides input/output functionality for molecular file formats.
//!
//! Formats implement the [`traits::MolecularFile`] trait, which supplies path-based
//! helpers on top of reader/writer primitives. The XYZ format is the only one the
//! dimer workflows need.

pub mod traits;
pub mod xyz;
