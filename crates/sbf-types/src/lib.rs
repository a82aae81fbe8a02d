#![warn(clippy::pedantic)]

pub mod error;
pub mod schema;
pub mod fixed;

pub use error::TypeError;
pub use fixed::FixedValue;
pub use schema::{EnumSchema, FixedSchema, Name, RecordField, RecordSchema, Schema, SchemaKind};
