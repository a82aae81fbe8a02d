#![warn(clippy::pedantic)]

pub mod error;
pub mod float;
pub mod varint;

pub use error::WireError;
