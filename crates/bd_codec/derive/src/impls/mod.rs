//! Code generation of the `Record` impls.

// -----------------------------------------------------------------------------
// Modules

mod trait_field_type;
mod trait_fields;
mod trait_record;

// -----------------------------------------------------------------------------
// Internal API

use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::RecordStruct;

use trait_field_type::impl_trait_field_type;
use trait_fields::impl_trait_fields;
use trait_record::impl_trait_record;

/// Generates `Fields`, `Record` and `FieldType` for `record`.
pub(crate) fn impl_record(record: &RecordStruct) -> TokenStream {
    let fields_impl = impl_trait_fields(record);
    let record_impl = impl_trait_record(record);
    let field_type_impl = impl_trait_field_type(record);

    quote! {
        #fields_impl

        #record_impl

        #field_type_impl
    }
}
