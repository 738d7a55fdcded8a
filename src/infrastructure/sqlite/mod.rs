pub mod decision_repo;
pub mod migrations;
pub mod snapshot_repo;
