//! # DimerGen Core Library
//!
//! Assembles "dimer" geometries from a monomer molecule and an atomic cluster: both
//! structures are centred on their centre of mass, the cluster is rotated and pushed
//! out along the z-axis, and the concatenated result is written as an XYZ file.
//!
//! ## Architectural Philosophy
//!
//! The library keeps the same three-layer split throughout:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Atom`, `MolecularSystem`),
//!   the element mass table, rigid-body geometry helpers and XYZ file I/O.
//!
//! - **[`engine`]: The Logic Core.** Placement and batch configuration, the geometry
//!   combiner that turns two structures into one, output naming, errors and progress
//!   reporting.
//!
//! - **[`workflows`]: The Public API.** Complete procedures built from the layers
//!   below, such as generating every monomer/cluster combination found in two
//!   directories.

pub mod core;
pub mod engine;
pub mod workflows;
