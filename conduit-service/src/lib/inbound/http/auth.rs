//! Request authentication: token discovery and the identity gate.

pub mod extractor;
pub mod gate;
