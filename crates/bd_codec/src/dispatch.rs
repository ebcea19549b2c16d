//! Conversion between primitive field values and slots.
//!
//! The supported primitive set is closed: 32-bit integers, 64-bit integers
//! and text. Anything else is reported as [`CodecError::UnsupportedType`].

use crate::container::Slot;
use crate::error::CodecError;
use crate::info::{FieldRef, FieldValue, PrimitiveKind};

/// Converts `value` of field `field` into the slot of kind `expected`.
///
/// # Errors
///
/// [`CodecError::UnsupportedType`] if the value is outside the primitive set
/// or is not of the expected kind.
///
/// # Examples
///
/// ```
/// use bd_codec::container::Slot;
/// use bd_codec::dispatch::encode_primitive;
/// use bd_codec::info::{FieldRef, PrimitiveKind};
///
/// let slot = encode_primitive("zip", PrimitiveKind::Int32, FieldRef::Int32(10001));
/// assert_eq!(slot, Ok(Slot::Int32(10001)));
///
/// let err = encode_primitive("flag", PrimitiveKind::Int32, FieldRef::Opaque("bool"));
/// assert!(err.is_err());
/// ```
pub fn encode_primitive(
    field: &'static str,
    expected: PrimitiveKind,
    value: FieldRef<'_>,
) -> Result<Slot, CodecError> {
    match (expected, value) {
        (PrimitiveKind::Int32, FieldRef::Int32(v)) => Ok(Slot::Int32(v)),
        (PrimitiveKind::Int64, FieldRef::Int64(v)) => Ok(Slot::Int64(v)),
        (PrimitiveKind::Text, FieldRef::Text(v)) => Ok(Slot::Text(v.into())),
        (_, other) => Err(CodecError::UnsupportedType {
            field: field.into(),
            runtime_type: other.type_name(),
        }),
    }
}

/// Reads the primitive of kind `expected` stored in `slot`.
///
/// # Errors
///
/// [`CodecError::SlotMismatch`] if the slot holds another kind.
pub fn decode_primitive(
    field: &'static str,
    slot: &Slot,
    expected: PrimitiveKind,
) -> Result<FieldValue, CodecError> {
    match (expected, slot) {
        (PrimitiveKind::Int32, Slot::Int32(v)) => Ok(FieldValue::Int32(*v)),
        (PrimitiveKind::Int64, Slot::Int64(v)) => Ok(FieldValue::Int64(*v)),
        (PrimitiveKind::Text, Slot::Text(v)) => Ok(FieldValue::Text(v.clone())),
        (expected, found) => Err(CodecError::SlotMismatch {
            field: field.into(),
            expected: expected.slot_kind(),
            found: found.kind(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::{Container, SlotKind};

    #[test]
    fn encode_each_kind() {
        assert_eq!(
            encode_primitive("a", PrimitiveKind::Int64, FieldRef::Int64(-7)),
            Ok(Slot::Int64(-7))
        );
        assert_eq!(
            encode_primitive("a", PrimitiveKind::Text, FieldRef::Text("x")),
            Ok(Slot::Text("x".into()))
        );
    }

    #[test]
    fn encode_rejects_kind_mismatch() {
        let err = encode_primitive("id", PrimitiveKind::Int64, FieldRef::Int32(1)).unwrap_err();
        assert_eq!(
            err,
            CodecError::UnsupportedType {
                field: "id".into(),
                runtime_type: "i32",
            }
        );
    }

    #[test]
    fn decode_rejects_slot_mismatch() {
        let slot = Slot::Nested(Container::new());
        let err = decode_primitive("name", &slot, PrimitiveKind::Text).unwrap_err();
        assert_eq!(
            err,
            CodecError::SlotMismatch {
                field: "name".into(),
                expected: SlotKind::Text,
                found: SlotKind::Nested,
            }
        );
    }

    #[test]
    fn decode_text() {
        let value = decode_primitive("name", &Slot::Text("Bo".into()), PrimitiveKind::Text);
        assert!(matches!(value, Ok(FieldValue::Text(text)) if text == "Bo"));
    }
}
