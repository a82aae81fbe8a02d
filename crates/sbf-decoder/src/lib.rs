#![warn(clippy::pedantic)]

pub mod bounded;
pub mod config;
pub mod decoder;
pub mod error;
pub mod pool;

pub use bounded::read_exact;
pub use config::{BufferTier, DecoderConfig, INLINE_STRING_CAPACITY};
pub use decoder::BinaryDecoder;
pub use error::DecodeError;
pub use pool::{ScratchBuf, ScratchPool};
