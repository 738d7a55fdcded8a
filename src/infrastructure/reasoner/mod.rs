pub mod http;
pub mod rule;
