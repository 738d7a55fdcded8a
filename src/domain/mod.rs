pub mod entities;
pub mod error;
pub mod indicators;
pub mod ports;
pub mod values;
