//! CLI commands

pub mod repos;
pub mod mirror;
pub mod id;
