#![forbid(unsafe_code)]

pub mod structs;
pub mod variant;

pub use structs::*;
pub use variant::*;
