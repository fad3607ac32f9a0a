pub mod combine;
pub mod generate;
