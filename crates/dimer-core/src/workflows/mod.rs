//! # Workflows Module
//!
//! High-level entry points that tie the [`engine`](crate::engine) and
//! [`core`](crate::core) together.
//!
//! - **Generation Workflow** ([`generate`]) - Enumerates monomer and cluster files,
//!   builds one dimer per configured placement and writes it to disk.

pub mod generate;
