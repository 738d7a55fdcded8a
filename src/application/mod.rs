pub mod backtest;
pub mod collect;
pub mod core;
pub mod decide;
pub mod opportunities;
pub mod query;
