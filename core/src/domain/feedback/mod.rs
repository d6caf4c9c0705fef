pub mod entities;
pub mod ports;
pub mod scorer;
pub mod services;
pub mod value_objects;
