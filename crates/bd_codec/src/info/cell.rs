use alloc::boxed::Box;
use core::any::TypeId;
use std::sync::{OnceLock, PoisonError, RwLock};

use bd_utils::TypeIdMap;

use crate::info::RecordInfo;

// -----------------------------------------------------------------------------
// NonGenericInfoCell

/// Container for static storage of a non-generic record's [`RecordInfo`].
///
/// The info is built on first access and lives for the rest of the program.
///
/// # Example
///
/// ```ignore
/// fn record_info() -> &'static RecordInfo {
///     static CELL: NonGenericInfoCell = NonGenericInfoCell::new();
///     CELL.get_or_init(|| RecordInfo::new::<Self>(&[/* ... */]))
/// }
/// ```
pub struct NonGenericInfoCell(OnceLock<RecordInfo>);

impl NonGenericInfoCell {
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns the stored info, initializing it with `f` on first call.
    #[inline]
    pub fn get_or_init(&'static self, f: impl FnOnce() -> RecordInfo) -> &'static RecordInfo {
        self.0.get_or_init(f)
    }
}

// -----------------------------------------------------------------------------
// GenericInfoCell

/// Container for static storage of a generic record's [`RecordInfo`]s.
///
/// A `static` inside a generic function is shared by every instantiation,
/// so the infos are keyed by the concrete type's [`TypeId`]. Each entry is
/// leaked once and never freed.
///
/// # Example
///
/// ```ignore
/// fn record_info() -> &'static RecordInfo {
///     static CELL: GenericInfoCell = GenericInfoCell::new();
///     CELL.get_or_insert::<Self>(|| RecordInfo::new::<Self>(&[/* ... */]))
/// }
/// ```
pub struct GenericInfoCell(RwLock<TypeIdMap<&'static RecordInfo>>);

impl GenericInfoCell {
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(TypeIdMap::new()))
    }

    /// Returns the info stored for `G`, initializing it with `f` on first call.
    pub fn get_or_insert<G: 'static>(
        &'static self,
        f: impl FnOnce() -> RecordInfo,
    ) -> &'static RecordInfo {
        let type_id = TypeId::of::<G>();

        if let Some(info) = self
            .0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
        {
            return *info;
        }

        // Built outside the lock so that `f` may query other records' info.
        let info = f();
        let mut map = self.0.write().unwrap_or_else(PoisonError::into_inner);
        *map.get_or_insert_with(type_id, || &*Box::leak(Box::new(info)))
    }
}

#[cfg(test)]
mod tests {
    use core::marker::PhantomData;

    use super::*;
    use crate::error::CodecError;
    use crate::info::{FieldArgs, FieldRef, Fields, Record};

    /// Queries the info of `Shell<()>` while building its own.
    struct Shell<T>(PhantomData<T>);

    impl<T: 'static> Fields for Shell<T> {
        fn field(&self, _: &str) -> Option<FieldRef<'_>> {
            None
        }
    }

    impl<T: 'static> Record for Shell<T> {
        fn record_info() -> &'static RecordInfo {
            static CELL: GenericInfoCell = GenericInfoCell::new();
            CELL.get_or_insert::<Self>(|| {
                if TypeId::of::<T>() != TypeId::of::<()>() {
                    let _ = Shell::<()>::record_info();
                }
                RecordInfo::new::<Self>(&[])
            })
        }

        fn construct(_: FieldArgs) -> Result<Self, CodecError> {
            Ok(Self(PhantomData))
        }
    }

    #[test]
    fn init_may_query_the_same_cell() {
        let info = Shell::<u8>::record_info();

        assert!(info.is::<Shell<u8>>());
        assert!(core::ptr::eq(info, Shell::<u8>::record_info()));
        assert!(Shell::<()>::record_info().is::<Shell<()>>());
    }
}
