pub mod audit;
pub mod auth;
pub mod branch;
pub mod matches;
pub mod messages;
pub mod orders;
pub mod tickets;
