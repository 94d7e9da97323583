//! Domain models for the rack simulation

pub mod actor;
pub mod rack;
