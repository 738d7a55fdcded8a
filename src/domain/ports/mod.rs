pub mod decision_repository;
pub mod market_data;
pub mod notifier;
pub mod publisher;
pub mod reasoner;
pub mod signals;
pub mod snapshot_repository;
