pub mod chemical;
pub mod experiment;
