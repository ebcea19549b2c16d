//! Parsing of the derive input.

// -----------------------------------------------------------------------------
// Modules

mod record_struct;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use record_struct::RecordStruct;
