//! API handlers module

pub mod agent;
pub mod health;
pub mod knowledge;
