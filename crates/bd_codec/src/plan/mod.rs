//! Codec derivation: turning a [`Record`](crate::info::Record) type into a
//! reusable codec.
//!
//! A derived codec is a [`RecordPlan`]: one step per field, primitive steps
//! going through the [dispatcher](crate::dispatch) and nested steps holding
//! the plan of the nested record. Plans are built once per type and shared
//! through the [`CodecRegistry`].

// -----------------------------------------------------------------------------
// Modules

mod codec;
mod plan;
mod record_codec;
mod registry;

#[cfg(test)]
mod tests;

// -----------------------------------------------------------------------------
// Exports

pub use codec::Codec;
pub use plan::RecordPlan;
pub use record_codec::{RecordCodec, derive_codec};
pub use registry::CodecRegistry;
