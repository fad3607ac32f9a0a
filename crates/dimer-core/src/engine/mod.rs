//! # Engine Module
//!
//! Configuration, the geometry combiner and the supporting machinery (naming,
//! progress, errors) used by the workflows.

pub mod combine;
pub mod config;
pub mod error;
pub mod naming;
pub mod progress;
