use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::any::type_name;

use crate::container::SlotKind;
use crate::error::CodecError;
use crate::info::{FieldRef, FieldValue, PrimitiveKind, Record, RecordRef, TypeKind};

/// A type that may appear as a record field.
///
/// Implemented for the primitive set (`i32`, `i64`, `String`), for
/// `Option<T>` and `Box<T>` of field types, and by
/// [`#[derive(Record)]`](crate::derive::Record) for records. Other common
/// types implement it with [`TypeKind::Unknown`] so that a record holding
/// them can be described, and is then rejected when a codec is derived.
pub trait FieldType: Sized + 'static {
    /// Whether the field may hold null.
    const NULLABLE: bool = false;

    /// The kind reported to the introspector.
    fn type_kind() -> TypeKind;

    /// Borrows the value for encoding.
    fn as_field(&self) -> FieldRef<'_>;

    /// Rebuilds the value of field `field` from a decoded value, `None` if the
    /// field was absent.
    fn from_field(field: &'static str, value: Option<FieldValue>) -> Result<Self, CodecError>;
}

#[inline]
fn mismatched(field: &'static str, expected: SlotKind, found: &FieldValue) -> CodecError {
    CodecError::SlotMismatch {
        field: field.into(),
        expected,
        found: found.kind(),
    }
}

#[inline]
fn missing(field: &'static str) -> CodecError {
    CodecError::MissingRequiredField(field.into())
}

// -----------------------------------------------------------------------------
// Primitives

impl FieldType for i32 {
    #[inline]
    fn type_kind() -> TypeKind {
        TypeKind::Primitive(PrimitiveKind::Int32)
    }

    #[inline]
    fn as_field(&self) -> FieldRef<'_> {
        FieldRef::Int32(*self)
    }

    fn from_field(field: &'static str, value: Option<FieldValue>) -> Result<Self, CodecError> {
        match value {
            Some(FieldValue::Int32(v)) => Ok(v),
            Some(other) => Err(mismatched(field, SlotKind::Int32, &other)),
            None => Err(missing(field)),
        }
    }
}

impl FieldType for i64 {
    #[inline]
    fn type_kind() -> TypeKind {
        TypeKind::Primitive(PrimitiveKind::Int64)
    }

    #[inline]
    fn as_field(&self) -> FieldRef<'_> {
        FieldRef::Int64(*self)
    }

    fn from_field(field: &'static str, value: Option<FieldValue>) -> Result<Self, CodecError> {
        match value {
            Some(FieldValue::Int64(v)) => Ok(v),
            Some(other) => Err(mismatched(field, SlotKind::Int64, &other)),
            None => Err(missing(field)),
        }
    }
}

impl FieldType for String {
    #[inline]
    fn type_kind() -> TypeKind {
        TypeKind::Primitive(PrimitiveKind::Text)
    }

    #[inline]
    fn as_field(&self) -> FieldRef<'_> {
        FieldRef::Text(self)
    }

    fn from_field(field: &'static str, value: Option<FieldValue>) -> Result<Self, CodecError> {
        match value {
            Some(FieldValue::Text(v)) => Ok(v),
            Some(other) => Err(mismatched(field, SlotKind::Text, &other)),
            None => Err(missing(field)),
        }
    }
}

// -----------------------------------------------------------------------------
// Wrappers

impl<T: FieldType> FieldType for Option<T> {
    const NULLABLE: bool = true;

    #[inline]
    fn type_kind() -> TypeKind {
        T::type_kind()
    }

    #[inline]
    fn as_field(&self) -> FieldRef<'_> {
        match self {
            Some(value) => value.as_field(),
            None => FieldRef::Null,
        }
    }

    fn from_field(field: &'static str, value: Option<FieldValue>) -> Result<Self, CodecError> {
        match value {
            Some(value) => T::from_field(field, Some(value)).map(Some),
            None => Ok(None),
        }
    }
}

impl<T: FieldType> FieldType for Box<T> {
    const NULLABLE: bool = T::NULLABLE;

    #[inline]
    fn type_kind() -> TypeKind {
        T::type_kind()
    }

    #[inline]
    fn as_field(&self) -> FieldRef<'_> {
        (**self).as_field()
    }

    #[inline]
    fn from_field(field: &'static str, value: Option<FieldValue>) -> Result<Self, CodecError> {
        T::from_field(field, value).map(Box::new)
    }
}

// -----------------------------------------------------------------------------
// Records

/// Rebuilds a nested record of type `T` from a decoded value.
///
/// Used by the `FieldType` impls generated for records.
pub fn record_from_field<T: Record>(
    field: &'static str,
    value: Option<FieldValue>,
) -> Result<T, CodecError> {
    match value {
        Some(FieldValue::Record(boxed)) => match boxed.downcast::<T>() {
            Ok(record) => Ok(*record),
            Err(_) => Err(CodecError::UnsupportedType {
                field: field.into(),
                runtime_type: type_name::<T>(),
            }),
        },
        Some(other) => Err(mismatched(field, SlotKind::Nested, &other)),
        None => Err(missing(field)),
    }
}

/// Returns the kind of record type `T`.
///
/// Used by the `FieldType` impls generated for records.
#[inline]
pub fn record_kind<T: Record>() -> TypeKind {
    TypeKind::Composite(RecordRef::of::<T>())
}

// -----------------------------------------------------------------------------
// Unsupported types

macro_rules! impl_unsupported_field {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FieldType for $ty {
                #[inline]
                fn type_kind() -> TypeKind {
                    TypeKind::Unknown(type_name::<Self>())
                }

                #[inline]
                fn as_field(&self) -> FieldRef<'_> {
                    FieldRef::Opaque(type_name::<Self>())
                }

                fn from_field(
                    field: &'static str,
                    _value: Option<FieldValue>,
                ) -> Result<Self, CodecError> {
                    Err(CodecError::UnsupportedType {
                        field: field.into(),
                        runtime_type: type_name::<Self>(),
                    })
                }
            }
        )*
    };
}

impl_unsupported_field!(
    bool, char, f32, f64, i8, i16, i128, isize, u8, u16, u32, u64, u128, usize
);

impl<T: 'static> FieldType for Vec<T> {
    #[inline]
    fn type_kind() -> TypeKind {
        TypeKind::Unknown(type_name::<Self>())
    }

    #[inline]
    fn as_field(&self) -> FieldRef<'_> {
        FieldRef::Opaque(type_name::<Self>())
    }

    fn from_field(field: &'static str, _value: Option<FieldValue>) -> Result<Self, CodecError> {
        Err(CodecError::UnsupportedType {
            field: field.into(),
            runtime_type: type_name::<Self>(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitive_kinds() {
        assert_eq!(i32::type_kind(), TypeKind::Primitive(PrimitiveKind::Int32));
        assert_eq!(i64::type_kind(), TypeKind::Primitive(PrimitiveKind::Int64));
        assert_eq!(String::type_kind(), TypeKind::Primitive(PrimitiveKind::Text));
        assert!(!<String as FieldType>::NULLABLE);
    }

    #[test]
    fn option_is_nullable() {
        assert!(<Option<i64> as FieldType>::NULLABLE);
        assert!(<Box<Option<i64>> as FieldType>::NULLABLE);
        assert!(None::<i32>.as_field().is_null());
        assert_eq!(Option::<i32>::from_field("n", None), Ok(None));
        assert_eq!(
            Option::<i32>::from_field("n", Some(FieldValue::Int32(4))),
            Ok(Some(4))
        );
    }

    #[test]
    fn unsupported_types_are_unknown() {
        assert_eq!(bool::type_kind(), TypeKind::Unknown("bool"));
        assert!(matches!(Vec::<i32>::type_kind(), TypeKind::Unknown(_)));
        assert_eq!(true.as_field().type_name(), "bool");
    }

    #[test]
    fn mismatched_value() {
        let err = i64::from_field("id", Some(FieldValue::Int32(1))).unwrap_err();
        assert_eq!(
            err,
            CodecError::SlotMismatch {
                field: "id".into(),
                expected: SlotKind::Int64,
                found: SlotKind::Int32,
            }
        );
        assert_eq!(
            String::from_field("name", None),
            Err(CodecError::MissingRequiredField("name".into()))
        );
    }
}
