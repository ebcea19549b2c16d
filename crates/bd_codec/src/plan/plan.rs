use alloc::boxed::Box;
use alloc::format;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::Any;
use core::fmt;

use crate::container::{Container, Slot, SlotKind};
use crate::dispatch;
use crate::error::{CodecError, DerivationError};
use crate::info::{FieldArgs, FieldDescriptor, FieldRef, FieldValue, Fields};
use crate::info::{PrimitiveKind, RecordInfo};

// -----------------------------------------------------------------------------
// RecordPlan

/// The derived codec of one record type.
///
/// Holds one step per declared field, in declaration order. Nested steps
/// share the plan of the nested record type, so a plan is an acyclic graph.
pub struct RecordPlan {
    info: &'static RecordInfo,
    fields: Box<[FieldPlan]>,
}

pub(super) struct FieldPlan {
    pub(super) descriptor: &'static FieldDescriptor,
    pub(super) step: Step,
}

pub(super) enum Step {
    Primitive(PrimitiveKind),
    Nested(Arc<RecordPlan>),
}

impl RecordPlan {
    #[inline]
    pub(super) fn new(info: &'static RecordInfo, fields: Box<[FieldPlan]>) -> Self {
        Self { info, fields }
    }

    /// The info of the record this plan encodes.
    #[inline]
    pub fn record_info(&self) -> &'static RecordInfo {
        self.info
    }

    /// Iterates the field descriptors, in declaration order.
    pub fn descriptors(&self) -> impl ExactSizeIterator<Item = &'static FieldDescriptor> + '_ {
        self.fields.iter().map(|field| field.descriptor)
    }

    /// Returns the plan of nested field `name`.
    pub fn nested(&self, name: &str) -> Option<&Arc<RecordPlan>> {
        self.fields.iter().find_map(|field| match &field.step {
            Step::Nested(plan) if field.descriptor.name() == name => Some(plan),
            _ => None,
        })
    }

    /// Writes every non-null field of `value` into `container`.
    ///
    /// `container` is only modified once every field has been encoded.
    pub(crate) fn write(
        &self,
        container: &mut Container,
        value: &dyn Fields,
    ) -> Result<(), CodecError> {
        for (name, slot) in self.encode_fields(value)? {
            container.insert(name, slot);
        }
        Ok(())
    }

    fn encode_fields(&self, value: &dyn Fields) -> Result<Vec<(&'static str, Slot)>, CodecError> {
        let mut entries = Vec::with_capacity(self.fields.len());

        for field in self.fields.iter() {
            let name = field.descriptor.name();

            let Some(current) = value.field(name) else {
                return Err(DerivationError::NotARecord {
                    type_path: self.info.type_path(),
                    reason: format!("no accessor for field `{name}`").into(),
                }
                .into());
            };

            if current.is_null() {
                if field.descriptor.is_nullable() {
                    continue;
                }
                return Err(CodecError::MissingRequiredField(name.into()));
            }

            let slot = match &field.step {
                Step::Primitive(kind) => dispatch::encode_primitive(name, *kind, current)?,
                Step::Nested(plan) => match current {
                    FieldRef::Record(record) if plan.is_plan_of(record) => {
                        let mut nested = Container::with_capacity(plan.fields.len());
                        plan.write(&mut nested, record)?;
                        Slot::Nested(nested)
                    }
                    other => {
                        return Err(CodecError::UnsupportedType {
                            field: name.into(),
                            runtime_type: other.type_name(),
                        });
                    }
                },
            };
            entries.push((name, slot));
        }

        Ok(entries)
    }

    /// Reads the constructor arguments of this record from `container`.
    ///
    /// Absent nullable fields are left unbound, keys without a matching
    /// field are ignored.
    pub(crate) fn read_args(&self, container: &Container) -> Result<FieldArgs, CodecError> {
        let mut args = FieldArgs::with_capacity(self.fields.len());

        for field in self.fields.iter() {
            let name = field.descriptor.name();

            let Some(slot) = container.get(name) else {
                if field.descriptor.is_nullable() {
                    continue;
                }
                return Err(CodecError::MissingRequiredField(name.into()));
            };

            let value = match &field.step {
                Step::Primitive(kind) => dispatch::decode_primitive(name, slot, *kind)?,
                Step::Nested(plan) => {
                    let Some(nested) = slot.as_nested() else {
                        return Err(CodecError::SlotMismatch {
                            field: name.into(),
                            expected: SlotKind::Nested,
                            found: slot.kind(),
                        });
                    };
                    FieldValue::Record(plan.read_erased(nested)?)
                }
            };
            args.insert(name, value);
        }

        Ok(args)
    }

    #[inline]
    fn is_plan_of(&self, record: &dyn Fields) -> bool {
        self.info.ty_id() == record.reflect_record_info().ty_id()
    }

    fn read_erased(&self, container: &Container) -> Result<Box<dyn Any>, CodecError> {
        self.info.construct_erased(self.read_args(container)?)
    }
}

impl fmt::Debug for RecordPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for field in self.fields.iter() {
            match &field.step {
                Step::Primitive(kind) => map.entry(&field.descriptor.name(), kind),
                Step::Nested(plan) => map.entry(&field.descriptor.name(), plan),
            };
        }
        map.finish()
    }
}
