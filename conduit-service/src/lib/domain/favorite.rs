pub mod manager;
pub mod ports;
