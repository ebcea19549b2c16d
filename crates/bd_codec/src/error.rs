use alloc::borrow::Cow;

use thiserror::Error;

use crate::container::SlotKind;

// -----------------------------------------------------------------------------
// DerivationError

/// Failure to build a codec plan for a type.
///
/// Derivation errors are cached by the [`CodecRegistry`](crate::plan::CodecRegistry):
/// a type that failed once keeps failing with the same error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DerivationError {
    #[error("`{type_path}` is not a record: {reason}")]
    NotARecord {
        type_path: &'static str,
        reason: Cow<'static, str>,
    },

    #[error("field `{field}` of `{type_path}` has unsupported type `{field_type}`")]
    UnsupportedField {
        type_path: &'static str,
        field: &'static str,
        field_type: &'static str,
    },

    #[error("field `{field}` of `{type_path}` refers back to a type under derivation")]
    CyclicType {
        type_path: &'static str,
        field: &'static str,
    },
}

// -----------------------------------------------------------------------------
// CodecError

/// Failure while encoding a value into, or decoding it from, a container.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CodecError {
    #[error(transparent)]
    Derivation(#[from] DerivationError),

    #[error("field `{field}` holds a value of unsupported type `{runtime_type}`")]
    UnsupportedType {
        field: Cow<'static, str>,
        runtime_type: &'static str,
    },

    #[error("required field `{0}` is missing")]
    MissingRequiredField(Cow<'static, str>),

    #[error("field `{0}` is not a constructor parameter")]
    UnexpectedField(Cow<'static, str>),

    #[error("field `{field}` expects a {expected} slot, found {found}")]
    SlotMismatch {
        field: Cow<'static, str>,
        expected: SlotKind,
        found: SlotKind,
    },

    #[error("sequence declares {declared} items but only {available} are present")]
    SizeMismatch { declared: usize, available: usize },

    #[error("field `{field}` holds an invalid length {length}")]
    InvalidLength {
        field: Cow<'static, str>,
        length: i64,
    },
}

// -----------------------------------------------------------------------------
// ParcelError

/// Malformed or oversized byte stream.
#[cfg(feature = "parcel")]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParcelError {
    #[error("unexpected end of parcel: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof { needed: usize, remaining: usize },

    #[error("bad container magic {0:#010x}")]
    BadMagic(u32),

    #[error("unknown slot tag {0}")]
    UnknownTag(u8),

    #[error("invalid UTF-8 in parcel string")]
    InvalidUtf8,

    #[error("container body declares {declared} bytes but {consumed} were read")]
    LengthMismatch { declared: usize, consumed: usize },

    #[error("duplicate key `{0}` in parcel container")]
    DuplicateKey(alloc::string::String),

    #[error("containers nested deeper than {0} levels")]
    TooDeep(usize),

    #[error("parcel length {length} exceeds the limit of {limit} bytes")]
    TooLarge { length: usize, limit: usize },
}

// -----------------------------------------------------------------------------
// TransportError

/// Failure of a transport adapter.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TransportError {
    #[error(transparent)]
    Codec(#[from] CodecError),

    #[cfg(feature = "parcel")]
    #[error(transparent)]
    Parcel(#[from] ParcelError),
}

impl From<DerivationError> for TransportError {
    #[inline]
    fn from(value: DerivationError) -> Self {
        Self::Codec(CodecError::Derivation(value))
    }
}
