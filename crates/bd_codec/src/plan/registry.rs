use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::TypeId;
use core::fmt;
use std::sync::{Mutex, PoisonError, RwLock};

use bd_utils::TypeIdMap;

use super::plan::{FieldPlan, RecordPlan, Step};
use super::RecordCodec;
use crate::error::DerivationError;
use crate::info::{self, FieldDescriptor, Record, RecordInfo, RecordRef, TypeKind};

type Derived = Result<Arc<RecordPlan>, DerivationError>;

// -----------------------------------------------------------------------------
// CodecRegistry

/// Memoized codec derivation.
///
/// Each record type is derived at most once per registry; the result,
/// success or failure, is cached and shared. Nested record types are derived
/// through the same registry, so a type used in several places shares one
/// plan.
///
/// Derivations are serialized; lookups of already derived types only take a
/// read lock.
///
/// # Examples
///
/// ```
/// use bd_codec::derive::Record;
/// use bd_codec::plan::CodecRegistry;
///
/// #[derive(Record)]
/// struct Address {
///     city: String,
///     zip: i32,
/// }
///
/// let registry = CodecRegistry::new();
/// let first = registry.codec::<Address>().unwrap();
/// let second = registry.codec::<Address>().unwrap();
///
/// assert!(first.same_plan(&second));
/// assert_eq!(registry.len(), 1);
/// ```
pub struct CodecRegistry {
    plans: RwLock<TypeIdMap<Derived>>,
    derivation: Mutex<()>,
}

impl CodecRegistry {
    /// Creates an empty registry.
    pub const fn new() -> Self {
        Self {
            plans: RwLock::new(TypeIdMap::new()),
            derivation: Mutex::new(()),
        }
    }

    /// The process-wide registry used by [`RecordCodec::derive`].
    pub fn global() -> &'static CodecRegistry {
        static GLOBAL: CodecRegistry = CodecRegistry::new();
        &GLOBAL
    }

    /// Returns the codec of record `T`, deriving it on first request.
    ///
    /// # Errors
    ///
    /// - [`DerivationError::NotARecord`] if `T`'s declared shape is inconsistent.
    /// - [`DerivationError::UnsupportedField`] if some field, transitively, has
    ///   a type outside the supported set.
    /// - [`DerivationError::CyclicType`] if `T` contains itself, directly or
    ///   transitively.
    pub fn codec<T: Record>(&self) -> Result<RecordCodec<T>, DerivationError> {
        self.plan(RecordRef::of::<T>()).map(RecordCodec::from_plan)
    }

    /// Returns the plan of `record`, deriving it on first request.
    pub fn plan(&self, record: RecordRef) -> Result<Arc<RecordPlan>, DerivationError> {
        if let Some(derived) = self.lookup(record.ty_id()) {
            return derived;
        }

        let _guard = self
            .derivation
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        Derivation {
            registry: self,
            in_progress: Vec::new(),
        }
        .derive(record)
    }

    /// Returns `true` if a result, success or failure, is cached for `type_id`.
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.plans
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&type_id)
    }

    /// Returns the number of cached results.
    pub fn len(&self) -> usize {
        self.plans
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lookup(&self, type_id: TypeId) -> Option<Derived> {
        self.plans
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .cloned()
    }

    fn store(&self, type_id: TypeId, derived: Derived) -> Derived {
        self.plans
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .get_or_insert_with(type_id, || derived)
            .clone()
    }
}

impl Default for CodecRegistry {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CodecRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodecRegistry")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// Derivation

/// One derivation pass, holding the stack of records being derived.
struct Derivation<'r> {
    registry: &'r CodecRegistry,
    in_progress: Vec<TypeId>,
}

impl Derivation<'_> {
    fn derive(&mut self, record: RecordRef) -> Derived {
        if let Some(derived) = self.registry.lookup(record.ty_id()) {
            return derived;
        }

        let derived = self.build(record.record_info());
        match &derived {
            Ok(plan) => log::debug!("derived codec for `{}`: {plan:?}", record.type_path()),
            Err(e) => log::warn!("cannot derive codec for `{}`: {e}", record.type_path()),
        }
        self.registry.store(record.ty_id(), derived)
    }

    fn build(&mut self, info: &'static RecordInfo) -> Derived {
        let descriptors = info::describe_info(info)?;

        self.in_progress.push(info.ty_id());
        let fields = descriptors
            .iter()
            .map(|descriptor| self.field(info, descriptor))
            .collect::<Result<_, _>>();
        self.in_progress.pop();

        Ok(Arc::new(RecordPlan::new(info, fields?)))
    }

    fn field(
        &mut self,
        owner: &'static RecordInfo,
        descriptor: &'static FieldDescriptor,
    ) -> Result<FieldPlan, DerivationError> {
        let step = match descriptor.kind() {
            TypeKind::Primitive(kind) => Step::Primitive(kind),
            TypeKind::Composite(nested) => {
                if self.in_progress.contains(&nested.ty_id()) {
                    return Err(DerivationError::CyclicType {
                        type_path: owner.type_path(),
                        field: descriptor.name(),
                    });
                }
                Step::Nested(self.derive(nested)?)
            }
            TypeKind::Unknown(field_type) => {
                return Err(DerivationError::UnsupportedField {
                    type_path: owner.type_path(),
                    field: descriptor.name(),
                    field_type,
                });
            }
        };

        Ok(FieldPlan { descriptor, step })
    }
}
