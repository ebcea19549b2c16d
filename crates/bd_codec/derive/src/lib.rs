//! See [`Record`].
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;

// -----------------------------------------------------------------------------
// Macros

/// # Record Derivation
///
/// `#[derive(Record)]` implements the following traits of `bd_codec::info`:
///
/// - `Fields`: reads each field by its name.
/// - `Record`: the field descriptors, in declaration order, and the
///   constructor binding every field by name.
/// - `FieldType`: so the record can itself be a field of another record.
///
/// Only structs with named fields are supported. Each field type must
/// implement `FieldType`; for generic records this bound is added to the
/// generated impls.
///
/// ```rust, ignore
/// #[derive(Record)]
/// struct Person {
///     name: String,
///     age: i32,
///     nickname: Option<String>,
///     address: Address,
/// }
/// ```
///
/// A field whose type is outside the supported set still compiles; deriving
/// a codec for the record then fails with `DerivationError::UnsupportedField`.
#[proc_macro_derive(Record)]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    let record = match derive_data::RecordStruct::from_ast(&ast) {
        Ok(record) => record,
        Err(err) => return err.into_compile_error().into(),
    };

    impls::impl_record(&record).into()
}
