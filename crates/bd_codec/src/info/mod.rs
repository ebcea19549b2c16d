//! Type introspection: the shape of a record and how to rebuild it.
//!
//! ## Menu
//!
//! - [`Record`]: the capability of a composite type, normally implemented by
//!   [`#[derive(Record)]`](crate::derive::Record).
//!     - [`Record::record_info`]: static [`RecordInfo`] with the ordered
//!       [`FieldDescriptor`]s and constructor parameter names.
//!     - [`Record::construct`]: the single canonical construction from a
//!       complete set of named [`FieldArgs`].
//! - [`Fields`]: object-safe accessor, reads a field by name as a [`FieldRef`].
//! - [`DynamicRecord`]: dynamic dispatch for [`Record::record_info`].
//! - [`FieldType`]: implemented by every type that may appear as a field,
//!   yields its [`TypeKind`] and nullability.
//! - [`describe`] and [`construct`]: the validated entry points used by the
//!   derivation engine.
//! - [`NonGenericInfoCell`] and [`GenericInfoCell`]: static storage for
//!   [`RecordInfo`]s.

// -----------------------------------------------------------------------------
// Modules

mod cell;
mod field_type;
mod introspect;
mod kind;
mod record;
mod record_info;
mod value;

// -----------------------------------------------------------------------------
// Exports

pub use cell::{GenericInfoCell, NonGenericInfoCell};
pub use field_type::{FieldType, record_from_field, record_kind};
pub use introspect::{construct, describe, describe_info};
pub use kind::{FieldDescriptor, PrimitiveKind, RecordRef, TypeKind};
pub use record::{DynamicRecord, Fields, Record};
pub use record_info::RecordInfo;
pub use value::{FieldArgs, FieldRef, FieldValue};
