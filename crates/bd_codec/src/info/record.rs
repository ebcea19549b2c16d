use core::any::Any;

use crate::error::CodecError;
use crate::info::{FieldArgs, FieldRef, RecordInfo};

// -----------------------------------------------------------------------------
// Fields

/// Read access to the fields of a record by name.
///
/// This is the object-safe half of [`Record`], used by the derivation engine
/// to walk nested values without knowing their concrete types.
pub trait Fields: Any + DynamicRecord {
    /// Returns the current value of field `name`, `None` if there is no such field.
    fn field(&self, name: &str) -> Option<FieldRef<'_>>;
}

// -----------------------------------------------------------------------------
// Record

/// A composite type: a fixed set of named fields with a single canonical way
/// to construct an instance from them.
///
/// Automatically implemented by [`#[derive(Record)]`](crate::derive::Record).
///
/// # Manually Impl
///
/// ```
/// use bd_codec::CodecError;
/// use bd_codec::info::{
///     FieldArgs, FieldDescriptor, FieldRef, FieldType, Fields, NonGenericInfoCell,
///     Record, RecordInfo,
/// };
///
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// impl Fields for Point {
///     fn field(&self, name: &str) -> Option<FieldRef<'_>> {
///         match name {
///             "x" => Some(self.x.as_field()),
///             "y" => Some(self.y.as_field()),
///             _ => None,
///         }
///     }
/// }
///
/// impl Record for Point {
///     fn record_info() -> &'static RecordInfo {
///         static CELL: NonGenericInfoCell = NonGenericInfoCell::new();
///         CELL.get_or_init(|| {
///             RecordInfo::new::<Self>(&[
///                 FieldDescriptor::new::<i32>("x"),
///                 FieldDescriptor::new::<i32>("y"),
///             ])
///         })
///     }
///
///     fn construct(mut args: FieldArgs) -> Result<Self, CodecError> {
///         Ok(Self {
///             x: args.take::<i32>("x")?,
///             y: args.take::<i32>("y")?,
///         })
///     }
/// }
///
/// assert_eq!(Point::record_info().field_len(), 2);
/// ```
pub trait Record: Fields + Sized {
    /// A static accessor to the record's shape.
    fn record_info() -> &'static RecordInfo;

    /// Builds an instance from named field values.
    ///
    /// Nullable fields missing from `args` are bound to null; a missing
    /// required field is a [`CodecError::MissingRequiredField`].
    fn construct(args: FieldArgs) -> Result<Self, CodecError>;
}

// -----------------------------------------------------------------------------
// DynamicRecord

/// Provide dynamic dispatch for types that implement [`Record`].
///
/// Auto impl for all types that implemented [`Record`].
pub trait DynamicRecord {
    /// Returns the [`RecordInfo`] of the value's concrete type.
    fn reflect_record_info(&self) -> &'static RecordInfo;
}

impl<T: Record> DynamicRecord for T {
    #[inline]
    fn reflect_record_info(&self) -> &'static RecordInfo {
        T::record_info()
    }
}
