// Floats travel as their raw IEEE-754 bits in little-endian order, with no
// length prefix. Decoding is a bit-cast, never a numeric conversion, so every
// NaN payload and both infinities come back exactly as written.

/// Encoded size of a `float` value.
pub const FLOAT_SIZE: usize = 4;

/// Encoded size of a `double` value.
pub const DOUBLE_SIZE: usize = 8;

/// Reinterpret 4 little-endian bytes as an `f32`.
#[must_use]
pub fn f32_from_wire(bytes: [u8; FLOAT_SIZE]) -> f32 {
    f32::from_bits(u32::from_le_bytes(bytes))
}

/// Reinterpret 8 little-endian bytes as an `f64`.
#[must_use]
pub fn f64_from_wire(bytes: [u8; DOUBLE_SIZE]) -> f64 {
    f64::from_bits(u64::from_le_bytes(bytes))
}

/// Raw wire bytes of an `f32`.
#[must_use]
pub fn f32_to_wire(value: f32) -> [u8; FLOAT_SIZE] {
    value.to_bits().to_le_bytes()
}

/// Raw wire bytes of an `f64`.
#[must_use]
pub fn f64_to_wire(value: f64) -> [u8; DOUBLE_SIZE] {
    value.to_bits().to_le_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_as_float() {
        assert_eq!(f32_from_wire([0x00, 0x00, 0x80, 0x3F]), 1.0);
    }

    #[test]
    fn one_as_double() {
        assert_eq!(
            f64_from_wire([0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xF0, 0x3F]),
            1.0
        );
    }

    #[test]
    fn negative_zero_keeps_sign_bit() {
        let value = f32_from_wire([0x00, 0x00, 0x00, 0x80]);
        assert_eq!(value, 0.0);
        assert!(value.is_sign_negative());
    }

    #[test]
    fn infinities_pass_through() {
        assert_eq!(f32_from_wire([0x00, 0x00, 0x80, 0x7F]), f32::INFINITY);
        assert_eq!(f32_from_wire([0x00, 0x00, 0x80, 0xFF]), f32::NEG_INFINITY);
        assert_eq!(
            f64_from_wire([0, 0, 0, 0, 0, 0, 0xF0, 0x7F]),
            f64::INFINITY
        );
    }

    #[test]
    fn nan_payload_is_bit_exact() {
        // Signalling NaN with a non-canonical payload
        let bytes = [0x01, 0x00, 0x80, 0x7F];
        let value = f32_from_wire(bytes);
        assert!(value.is_nan());
        assert_eq!(value.to_bits(), 0x7F80_0001);
        assert_eq!(f32_to_wire(value), bytes);

        let bytes = [0xEF, 0xBE, 0xAD, 0xDE, 0x00, 0x00, 0xF8, 0xFF];
        let value = f64_from_wire(bytes);
        assert!(value.is_nan());
        assert_eq!(f64_to_wire(value), bytes);
    }
}
