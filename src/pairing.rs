//! Pairing-domain identifiers and per-instance registration records.

pub mod id;
pub mod registration;

pub use id::*;
pub use registration::*;
