// src/handlers/mod.rs

pub mod audit;
pub mod auth;
pub mod branches;
pub mod dashboard;
pub mod matches;
pub mod messages;
pub mod orders;
pub mod tickets;
