pub mod confidence;
pub mod fibonacci;
pub mod opportunity;
pub mod risk;
pub mod signal;
