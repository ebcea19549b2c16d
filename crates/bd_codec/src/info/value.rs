use alloc::boxed::Box;
use alloc::string::String;
use core::any::Any;
use core::fmt;

use bd_utils::hash::HashMap;

use crate::container::SlotKind;
use crate::error::CodecError;
use crate::info::{FieldType, Fields};

// -----------------------------------------------------------------------------
// FieldRef

/// A borrowed view of one field value.
#[derive(Clone, Copy)]
pub enum FieldRef<'a> {
    /// An absent optional value.
    Null,
    Int32(i32),
    Int64(i64),
    Text(&'a str),
    Record(&'a dyn Fields),
    /// A value of a type outside the supported set, carrying its type name.
    Opaque(&'static str),
}

impl FieldRef<'_> {
    /// Returns the runtime type name of the value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Int32(_) => core::any::type_name::<i32>(),
            Self::Int64(_) => core::any::type_name::<i64>(),
            Self::Text(_) => core::any::type_name::<String>(),
            Self::Record(record) => record.reflect_record_info().type_path(),
            Self::Opaque(type_name) => *type_name,
        }
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl fmt::Debug for FieldRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("Null"),
            Self::Int32(v) => f.debug_tuple("Int32").field(v).finish(),
            Self::Int64(v) => f.debug_tuple("Int64").field(v).finish(),
            Self::Text(v) => f.debug_tuple("Text").field(v).finish(),
            Self::Record(v) => f
                .debug_tuple("Record")
                .field(&v.reflect_record_info().type_path())
                .finish(),
            Self::Opaque(v) => f.debug_tuple("Opaque").field(v).finish(),
        }
    }
}

// -----------------------------------------------------------------------------
// FieldValue

/// An owned, decoded field value waiting to be passed to a constructor.
pub enum FieldValue {
    Int32(i32),
    Int64(i64),
    Text(String),
    /// A fully constructed nested record.
    Record(Box<dyn Any>),
}

impl FieldValue {
    /// The slot tag this value was decoded from.
    #[inline]
    pub const fn kind(&self) -> SlotKind {
        match self {
            Self::Int32(_) => SlotKind::Int32,
            Self::Int64(_) => SlotKind::Int64,
            Self::Text(_) => SlotKind::Text,
            Self::Record(_) => SlotKind::Nested,
        }
    }
}

impl fmt::Debug for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int32(v) => f.debug_tuple("Int32").field(v).finish(),
            Self::Int64(v) => f.debug_tuple("Int64").field(v).finish(),
            Self::Text(v) => f.debug_tuple("Text").field(v).finish(),
            Self::Record(_) => f.write_str("Record(..)"),
        }
    }
}

// -----------------------------------------------------------------------------
// FieldArgs

/// Named constructor arguments.
///
/// A nullable field left out of the arguments is bound to null.
///
/// # Examples
///
/// ```
/// use bd_codec::info::{FieldArgs, FieldValue};
///
/// let mut args = FieldArgs::new();
/// args.insert("age", FieldValue::Int32(30));
///
/// assert_eq!(args.take::<i32>("age"), Ok(30));
/// assert_eq!(args.take::<Option<String>>("nick"), Ok(None));
/// assert!(args.take::<i32>("age").is_err());
/// ```
#[derive(Debug, Default)]
pub struct FieldArgs {
    values: HashMap<&'static str, FieldValue>,
}

impl FieldArgs {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: HashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Binds `name` to `value`, returning the previous binding.
    #[inline]
    pub fn insert(&mut self, name: &'static str, value: FieldValue) -> Option<FieldValue> {
        self.values.insert(name, value)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the bound names, in arbitrary order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.values.keys().copied()
    }

    /// Removes the binding of `name` and converts it to `T`.
    pub fn take<T: FieldType>(&mut self, name: &'static str) -> Result<T, CodecError> {
        T::from_field(name, self.values.remove(name))
    }
}
