pub mod feeds;
pub mod notify;
pub mod publish;
pub mod reasoner;
pub mod signals;
pub mod sqlite;
