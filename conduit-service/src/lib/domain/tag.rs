pub mod associator;
pub mod models;
pub mod ports;
