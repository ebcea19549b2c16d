use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::fmt;

use crate::error::CodecError;
use crate::info::{FieldArgs, FieldDescriptor, Record};

/// Static description of a [`Record`] type.
///
/// Holds the ordered field descriptors, the names of the constructor
/// parameters and a type-erased constructor.
///
/// The parameter names default to the field names; hand-written records whose
/// constructor disagrees with their declared fields can override them with
/// [`RecordInfo::with_params`], which [`describe`](crate::info::describe)
/// then rejects.
pub struct RecordInfo {
    ty_id: TypeId,
    type_path: &'static str,
    fields: Box<[FieldDescriptor]>,
    params: Box<[&'static str]>,
    construct: fn(FieldArgs) -> Result<Box<dyn Any>, CodecError>,
}

impl RecordInfo {
    /// Creates the info of record `T` with the given fields, in declaration order.
    pub fn new<T: Record>(fields: &[FieldDescriptor]) -> Self {
        Self {
            ty_id: TypeId::of::<T>(),
            type_path: core::any::type_name::<T>(),
            fields: fields.into(),
            params: fields.iter().map(FieldDescriptor::name).collect(),
            construct: construct_erased::<T>,
        }
    }

    /// Replaces the constructor parameter names.
    pub fn with_params(mut self, params: &[&'static str]) -> Self {
        self.params = params.into();
        self
    }

    #[inline]
    pub const fn ty_id(&self) -> TypeId {
        self.ty_id
    }

    #[inline]
    pub const fn type_path(&self) -> &'static str {
        self.type_path
    }

    /// Returns the field descriptors in declaration order.
    #[inline]
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Returns the descriptor of field `name`.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.name() == name)
    }

    #[inline]
    pub fn field_len(&self) -> usize {
        self.fields.len()
    }

    /// Returns the constructor parameter names.
    #[inline]
    pub fn params(&self) -> &[&'static str] {
        &self.params
    }

    /// Constructs a boxed instance of the described type.
    #[inline]
    pub fn construct_erased(&self, args: FieldArgs) -> Result<Box<dyn Any>, CodecError> {
        (self.construct)(args)
    }

    /// Check if the given type matches this one.
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.ty_id == TypeId::of::<T>()
    }
}

impl fmt::Debug for RecordInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordInfo")
            .field("type_path", &self.type_path)
            .field("fields", &self.fields)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

fn construct_erased<T: Record>(args: FieldArgs) -> Result<Box<dyn Any>, CodecError> {
    crate::info::construct::<T>(args).map(|value| Box::new(value) as Box<dyn Any>)
}
