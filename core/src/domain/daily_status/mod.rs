//! Per-day interaction status and the greeting derived from it.

pub mod ports;
pub mod services;
pub mod value_objects;
