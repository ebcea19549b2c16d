use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::RecordStruct;

/// Generate implementation code for `FieldType`, describing the record as a
/// composite field.
pub(crate) fn impl_trait_field_type(record: &RecordStruct) -> TokenStream {
    let bd_codec_path = record.bd_codec_path();
    let info_ = crate::path::info_(bd_codec_path);
    let field_type_ = crate::path::field_type_(bd_codec_path);
    let field_ref_ = crate::path::field_ref_(bd_codec_path);
    let field_value_ = crate::path::field_value_(bd_codec_path);
    let type_kind_ = crate::path::type_kind_(bd_codec_path);
    let codec_error_ = crate::path::codec_error_(bd_codec_path);

    let ident = record.ident();
    let generics = record.impl_generics();
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    quote! {
        impl #impl_generics #field_type_ for #ident #ty_generics #where_clause {
            #[inline]
            fn type_kind() -> #type_kind_ {
                #info_::record_kind::<Self>()
            }

            #[inline]
            fn as_field(&self) -> #field_ref_<'_> {
                #field_ref_::Record(self)
            }

            #[inline]
            fn from_field(
                field: &'static str,
                value: ::core::option::Option<#field_value_>,
            ) -> ::core::result::Result<Self, #codec_error_> {
                #info_::record_from_field::<Self>(field, value)
            }
        }
    }
}
