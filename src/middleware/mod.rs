// src/middleware/mod.rs

pub mod auth;
pub mod client_meta;
pub mod rbac;
