pub mod atom;
pub mod system;
