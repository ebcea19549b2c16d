use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::RecordStruct;

/// Generate implementation code for `Record`.
///
/// The `RecordInfo` is stored in a `NonGenericInfoCell`, or in a
/// `GenericInfoCell` keyed by `Self` for generic records.
pub(crate) fn impl_trait_record(record: &RecordStruct) -> TokenStream {
    let bd_codec_path = record.bd_codec_path();
    let record_ = crate::path::record_(bd_codec_path);
    let record_info_ = crate::path::record_info_(bd_codec_path);
    let field_descriptor_ = crate::path::field_descriptor_(bd_codec_path);
    let field_args_ = crate::path::field_args_(bd_codec_path);
    let codec_error_ = crate::path::codec_error_(bd_codec_path);

    let descriptors = record.fields().iter().map(|field| {
        let name = &field.name;
        let ty = field.ty;
        quote! { #field_descriptor_::new::<#ty>(#name) }
    });

    let info_tokens = quote! {
        #record_info_::new::<Self>(&[ #(#descriptors),* ])
    };

    let cell_tokens = if record.impl_with_generic() {
        let info_cell = crate::path::generic_info_cell_(bd_codec_path);
        quote! {
            static CELL: #info_cell = #info_cell::new();
            CELL.get_or_insert::<Self>(|| #info_tokens)
        }
    } else {
        let info_cell = crate::path::non_generic_info_cell_(bd_codec_path);
        quote! {
            static CELL: #info_cell = #info_cell::new();
            CELL.get_or_init(|| #info_tokens)
        }
    };

    let bindings = record.fields().iter().map(|field| {
        let member = field.member;
        let name = &field.name;
        let ty = field.ty;
        quote! { #member: args.take::<#ty>(#name)?, }
    });

    // A record without fields never reads its arguments.
    let args_ident = if record.fields().is_empty() {
        quote! { _args }
    } else {
        quote! { mut args }
    };

    let ident = record.ident();
    let generics = record.impl_generics();
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    quote! {
        impl #impl_generics #record_ for #ident #ty_generics #where_clause {
            fn record_info() -> &'static #record_info_ {
                #cell_tokens
            }

            fn construct(
                #args_ident: #field_args_,
            ) -> ::core::result::Result<Self, #codec_error_> {
                ::core::result::Result::Ok(Self {
                    #(#bindings)*
                })
            }
        }
    }
}
