use crate::schema::SchemaKind;

/// Errors raised when a typed value would violate its schema.
///
/// These are programming errors rather than stream corruption: a caller
/// handed a [`FixedValue`](crate::FixedValue) content of the wrong length,
/// or tried to attach a schema that cannot describe it. The receiving
/// value is always left exactly as it was before the failed call.
///
/// ```text
/// ┌──────────────────────────────────────────────────────┐
/// │ TypeError (this crate)                               │
/// │   ├── FixedLengthMismatch  content/schema size wrong │
/// │   └── SchemaKindMismatch   schema is not Fixed       │
/// └──────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeError {
    /// The assigned content or schema size differs from the pinned length.
    #[error("fixed length mismatch: expected {expected} bytes, got {actual}")]
    FixedLengthMismatch { expected: usize, actual: usize },

    /// A schema of some other kind was assigned to a fixed value.
    #[error("schema kind mismatch: expected fixed, found {found}")]
    SchemaKindMismatch { found: SchemaKind },
}
