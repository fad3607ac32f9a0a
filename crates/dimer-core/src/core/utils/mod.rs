pub mod format;
pub mod geometry;
