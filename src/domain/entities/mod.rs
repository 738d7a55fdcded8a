pub mod candle;
pub mod decision;
pub mod snapshot;
