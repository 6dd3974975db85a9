//! Git access for the commit session.

pub mod gateway;

pub use gateway::GitGateway;
