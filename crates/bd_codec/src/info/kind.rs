use core::any::TypeId;
use core::fmt;

use crate::container::SlotKind;
use crate::info::{FieldType, Record, RecordInfo};

// -----------------------------------------------------------------------------
// PrimitiveKind

/// The closed set of primitive field kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Int32,
    Int64,
    Text,
}

impl PrimitiveKind {
    /// The slot tag a primitive of this kind is stored as.
    #[inline]
    pub const fn slot_kind(self) -> SlotKind {
        match self {
            Self::Int32 => SlotKind::Int32,
            Self::Int64 => SlotKind::Int64,
            Self::Text => SlotKind::Text,
        }
    }
}

// -----------------------------------------------------------------------------
// RecordRef

/// A reference to a composite type.
///
/// The [`RecordInfo`] is obtained through a function pointer and only on
/// demand, so a type may refer to itself without recursing while it is
/// being described.
#[derive(Clone, Copy)]
pub struct RecordRef {
    ty_id: TypeId,
    type_path: &'static str,
    record_info: fn() -> &'static RecordInfo,
}

impl RecordRef {
    /// Creates the reference of record type `T`.
    #[inline]
    pub fn of<T: Record>() -> Self {
        Self {
            ty_id: TypeId::of::<T>(),
            type_path: core::any::type_name::<T>(),
            record_info: T::record_info,
        }
    }

    #[inline]
    pub const fn ty_id(&self) -> TypeId {
        self.ty_id
    }

    #[inline]
    pub const fn type_path(&self) -> &'static str {
        self.type_path
    }

    /// Returns the referenced type's [`RecordInfo`].
    #[inline]
    pub fn record_info(&self) -> &'static RecordInfo {
        (self.record_info)()
    }
}

impl PartialEq for RecordRef {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.ty_id == other.ty_id
    }
}

impl Eq for RecordRef {}

impl fmt::Debug for RecordRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RecordRef").field(&self.type_path).finish()
    }
}

// -----------------------------------------------------------------------------
// TypeKind

/// What a field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    /// One of the closed primitive kinds.
    Primitive(PrimitiveKind),
    /// Another record, stored as a nested container.
    Composite(RecordRef),
    /// A type outside the supported set, carrying its type name.
    Unknown(&'static str),
}

// -----------------------------------------------------------------------------
// FieldDescriptor

/// Describes one field of a record: name, nullability and kind.
///
/// # Examples
///
/// ```
/// use bd_codec::info::{FieldDescriptor, PrimitiveKind, TypeKind};
///
/// let age = FieldDescriptor::new::<i32>("age");
/// assert_eq!(age.name(), "age");
/// assert!(!age.is_nullable());
/// assert_eq!(age.kind(), TypeKind::Primitive(PrimitiveKind::Int32));
///
/// let nick = FieldDescriptor::new::<Option<String>>("nick");
/// assert!(nick.is_nullable());
/// assert_eq!(nick.kind(), TypeKind::Primitive(PrimitiveKind::Text));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    name: &'static str,
    nullable: bool,
    kind: TypeKind,
}

impl FieldDescriptor {
    /// Creates the descriptor of a field `name` with type `T`.
    #[inline]
    pub fn new<T: FieldType>(name: &'static str) -> Self {
        Self {
            name,
            nullable: T::NULLABLE,
            kind: T::type_kind(),
        }
    }

    /// Creates a descriptor from its parts, for hand-written records.
    #[inline]
    pub const fn from_parts(name: &'static str, nullable: bool, kind: TypeKind) -> Self {
        Self {
            name,
            nullable,
            kind,
        }
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn is_nullable(&self) -> bool {
        self.nullable
    }

    #[inline]
    pub const fn kind(&self) -> TypeKind {
        self.kind
    }
}
