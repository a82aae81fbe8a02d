use crate::error::TypeError;
use crate::schema::{FixedSchema, Schema};

/// A byte sequence whose length is pinned by its `fixed` schema.
///
/// Nothing on the wire says how long a fixed value is; the length lives
/// entirely in the schema. `FixedValue` keeps the two in lock-step:
///
/// ```text
///   content.len() == schema.size        (always, after construction)
/// ```
///
/// The constructors establish that once and every mutator re-checks it.
/// A rejected mutation returns an error and leaves the value untouched, so
/// there is never a half-written state to observe.
///
/// Equality is structural: two values are equal when their schemas are
/// equal (not merely the same object) and their bytes match. The derived
/// `Hash` hashes the schema and then the content in order, so equal
/// values always hash equal.
///
/// # Example
///
/// ```rust
/// use sbf_types::{FixedSchema, FixedValue};
///
/// let schema = FixedSchema::new("org.example.Md5", 16);
/// let mut digest = FixedValue::new(schema);
/// assert_eq!(digest.content(), &[0u8; 16]);
///
/// digest.set_content(&[0xAB; 16]).unwrap();
/// assert!(digest.set_content(&[0u8; 10]).is_err());
/// assert_eq!(digest.content(), &[0xAB; 16]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FixedValue {
    schema: FixedSchema,
    content: Vec<u8>,
}

impl FixedValue {
    /// Create a zero-filled value of `schema.size` bytes.
    #[must_use]
    pub fn new(schema: FixedSchema) -> Self {
        let content = vec![0u8; schema.size];
        Self { schema, content }
    }

    /// Create a value holding a copy of `content`.
    ///
    /// # Errors
    ///
    /// [`TypeError::FixedLengthMismatch`] if `content.len() != schema.size`.
    pub fn with_content(schema: FixedSchema, content: &[u8]) -> Result<Self, TypeError> {
        let mut value = Self::new(schema);
        value.set_content(content)?;
        Ok(value)
    }

    /// Replace the content with a copy of `content`.
    ///
    /// # Errors
    ///
    /// [`TypeError::FixedLengthMismatch`] if the length differs from the
    /// current content length. The existing content is kept.
    pub fn set_content(&mut self, content: &[u8]) -> Result<(), TypeError> {
        if content.len() != self.content.len() {
            return Err(TypeError::FixedLengthMismatch {
                expected: self.content.len(),
                actual: content.len(),
            });
        }
        self.content.copy_from_slice(content);
        Ok(())
    }

    /// Attach a different schema.
    ///
    /// # Errors
    ///
    /// - [`TypeError::SchemaKindMismatch`] if `schema` is not `fixed`.
    /// - [`TypeError::FixedLengthMismatch`] if its size differs from the
    ///   current content length.
    pub fn set_schema(&mut self, schema: Schema) -> Result<(), TypeError> {
        let fixed = match schema {
            Schema::Fixed(fixed) => fixed,
            other => {
                return Err(TypeError::SchemaKindMismatch {
                    found: other.kind(),
                });
            }
        };

        if fixed.size != self.content.len() {
            return Err(TypeError::FixedLengthMismatch {
                expected: self.content.len(),
                actual: fixed.size,
            });
        }

        self.schema = fixed;
        Ok(())
    }

    #[must_use]
    pub fn schema(&self) -> &FixedSchema {
        &self.schema
    }

    #[must_use]
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Mutable view of the content. The slice cannot change length, so the
    /// schema invariant holds whatever is written through it.
    pub fn content_mut(&mut self) -> &mut [u8] {
        &mut self.content
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.content.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    #[must_use]
    pub fn into_content(self) -> Vec<u8> {
        self.content
    }
}

impl AsRef<[u8]> for FixedValue {
    fn as_ref(&self) -> &[u8] {
        &self.content
    }
}

#[cfg(test)]
mod tests {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    use super::*;
    use crate::schema::SchemaKind;

    fn md5() -> FixedSchema {
        FixedSchema::new("org.example.Md5", 16)
    }

    fn hash_of(value: &FixedValue) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn new_is_zero_filled() {
        let value = FixedValue::new(md5());
        assert_eq!(value.len(), 16);
        assert!(value.content().iter().all(|&b| b == 0));
    }

    #[test]
    fn zero_size_schema() {
        let value = FixedValue::new(FixedSchema::new("Empty", 0));
        assert!(value.is_empty());
        assert!(FixedValue::with_content(FixedSchema::new("Empty", 0), &[]).is_ok());
    }

    #[test]
    fn with_content_checks_length() {
        assert!(FixedValue::with_content(md5(), &[0u8; 16]).is_ok());

        let err = FixedValue::with_content(md5(), &[0u8; 10]).unwrap_err();
        assert_eq!(
            err,
            TypeError::FixedLengthMismatch {
                expected: 16,
                actual: 10
            }
        );
    }

    #[test]
    fn set_content_is_visible() {
        let mut value = FixedValue::new(md5());
        let bytes: Vec<u8> = (0..16).collect();
        value.set_content(&bytes).unwrap();
        assert_eq!(value.content(), bytes.as_slice());
    }

    #[test]
    fn rejected_content_leaves_value_untouched() {
        let mut value = FixedValue::with_content(md5(), &[0x5A; 16]).unwrap();

        assert!(value.set_content(&[0xFF; 10]).is_err());
        assert!(value.set_content(&[0xFF; 17]).is_err());
        assert_eq!(value.content(), &[0x5A; 16]);
    }

    #[test]
    fn set_schema_requires_fixed_kind() {
        let mut value = FixedValue::new(md5());
        let err = value.set_schema(Schema::Bytes).unwrap_err();
        assert_eq!(
            err,
            TypeError::SchemaKindMismatch {
                found: SchemaKind::Bytes
            }
        );
        assert_eq!(value.schema(), &md5());
    }

    #[test]
    fn set_schema_requires_same_size() {
        let mut value = FixedValue::new(md5());
        let err = value.set_schema(Schema::fixed("Sha1", 20)).unwrap_err();
        assert_eq!(
            err,
            TypeError::FixedLengthMismatch {
                expected: 16,
                actual: 20
            }
        );
        assert_eq!(value.schema(), &md5());

        value.set_schema(Schema::fixed("org.example.Uuid", 16)).unwrap();
        assert_eq!(value.schema().name.name, "Uuid");
    }

    #[test]
    fn equal_values_hash_equal() {
        let a = FixedValue::with_content(md5(), &[7; 16]).unwrap();
        let b = FixedValue::with_content(md5(), &[7; 16]).unwrap();
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn single_byte_difference_is_unequal() {
        let a = FixedValue::with_content(md5(), &[7; 16]).unwrap();
        let mut bytes = [7u8; 16];
        bytes[15] = 8;
        let b = FixedValue::with_content(md5(), &bytes).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn same_bytes_different_schema_is_unequal() {
        let a = FixedValue::new(md5());
        let b = FixedValue::new(FixedSchema::new("org.example.Uuid", 16));
        assert_ne!(a, b);
    }

    #[test]
    fn content_hash_is_order_sensitive() {
        let mut forward = [0u8; 16];
        forward[0] = 1;
        forward[1] = 2;
        let mut swapped = [0u8; 16];
        swapped[0] = 2;
        swapped[1] = 1;

        let a = FixedValue::with_content(md5(), &forward).unwrap();
        let b = FixedValue::with_content(md5(), &swapped).unwrap();
        assert_ne!(hash_of(&a), hash_of(&b));
    }
}
