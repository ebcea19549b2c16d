use alloc::sync::Arc;
use core::fmt;
use core::marker::PhantomData;

use super::{Codec, CodecRegistry, RecordPlan};
use crate::container::Container;
use crate::error::{CodecError, DerivationError};
use crate::info::{self, FieldDescriptor, Record};

/// The derived codec of record `T`.
///
/// Cheap to clone; clones share the same plan.
pub struct RecordCodec<T> {
    plan: Arc<RecordPlan>,
    marker: PhantomData<fn() -> T>,
}

impl<T: Record> RecordCodec<T> {
    /// Derives the codec of `T` through the [global registry](CodecRegistry::global).
    ///
    /// # Errors
    ///
    /// See [`CodecRegistry::codec`].
    #[inline]
    pub fn derive() -> Result<Self, DerivationError> {
        CodecRegistry::global().codec::<T>()
    }

    /// The field descriptors of `T`, in declaration order.
    #[inline]
    pub fn descriptors(&self) -> &'static [FieldDescriptor] {
        self.plan.record_info().fields()
    }
}

impl<T> RecordCodec<T> {
    #[inline]
    pub(super) fn from_plan(plan: Arc<RecordPlan>) -> Self {
        Self {
            plan,
            marker: PhantomData,
        }
    }

    /// The underlying plan.
    #[inline]
    pub fn plan(&self) -> &Arc<RecordPlan> {
        &self.plan
    }

    /// Returns `true` if both codecs share one plan.
    #[inline]
    pub fn same_plan(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.plan, &other.plan)
    }
}

impl<T: Record> Codec<T> for RecordCodec<T> {
    #[inline]
    fn write(&self, container: &mut Container, value: &T) -> Result<(), CodecError> {
        self.plan.write(container, value)
    }

    fn decode(&self, container: &Container) -> Result<T, CodecError> {
        info::construct::<T>(self.plan.read_args(container)?)
    }
}

impl<T> Clone for RecordCodec<T> {
    #[inline]
    fn clone(&self) -> Self {
        Self::from_plan(self.plan.clone())
    }
}

impl<T> fmt::Debug for RecordCodec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RecordCodec")
            .field(&self.plan.record_info().type_path())
            .finish()
    }
}

/// Derives the codec of record `T` through the global registry.
///
/// # Examples
///
/// ```
/// use bd_codec::derive::Record;
/// use bd_codec::{Codec, derive_codec};
///
/// #[derive(Record, Debug, PartialEq)]
/// struct Address {
///     city: String,
///     zip: i32,
/// }
///
/// let codec = derive_codec::<Address>().unwrap();
/// let value = Address { city: "NYC".into(), zip: 10001 };
///
/// let container = codec.encode(&value).unwrap();
/// assert_eq!(container.get_text("city"), Some("NYC"));
/// assert_eq!(container.get_i32("zip"), Some(10001));
/// assert_eq!(codec.decode(&container).unwrap(), value);
/// ```
#[inline]
pub fn derive_codec<T: Record>() -> Result<RecordCodec<T>, DerivationError> {
    RecordCodec::derive()
}
