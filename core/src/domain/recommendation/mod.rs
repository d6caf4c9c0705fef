//! Rule-based meal recommendation: catalog lookup, exclusion filtering and
//! deterministic selection.

pub mod engine;
pub mod ports;
pub mod services;
pub mod value_objects;
