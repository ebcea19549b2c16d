use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::RecordStruct;

/// Generate implementation code for `Fields`.
pub(crate) fn impl_trait_fields(record: &RecordStruct) -> TokenStream {
    let bd_codec_path = record.bd_codec_path();
    let fields_ = crate::path::fields_(bd_codec_path);
    let field_ref_ = crate::path::field_ref_(bd_codec_path);
    let field_type_ = crate::path::field_type_(bd_codec_path);

    let arms = record.fields().iter().map(|field| {
        let member = field.member;
        let name = &field.name;
        quote! {
            #name => ::core::option::Option::Some(#field_type_::as_field(&self.#member)),
        }
    });

    let ident = record.ident();
    let generics = record.impl_generics();
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    quote! {
        impl #impl_generics #fields_ for #ident #ty_generics #where_clause {
            fn field(&self, name: &str) -> ::core::option::Option<#field_ref_<'_>> {
                match name {
                    #(#arms)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    }
}
