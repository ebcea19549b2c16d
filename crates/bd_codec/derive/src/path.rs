//! Paths of the `bd_codec` items used by generated code.

use proc_macro2::TokenStream;
use quote::quote;

// -----------------------------------------------------------------------------
// Crate Path

/// Get the correct access path to the `bd_codec` crate.
///
/// 1. For crates that depend on `bd_codec`, `::bd_codec` is returned.
/// 2. For crates that depend on `bundler`, `::bundler::codec` is returned.
/// 3. Otherwise `::bd_codec` is returned, which may be incorrect.
///
/// This reads the caller's `Cargo.toml`, so it is resolved once per derive
/// and passed around.
pub(crate) fn bd_codec() -> syn::Path {
    bd_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("bd_codec"))
}

// -----------------------------------------------------------------------------
// Items

#[inline(always)]
pub(crate) fn info_(bd_codec_path: &syn::Path) -> TokenStream {
    quote! { #bd_codec_path::info }
}

#[inline(always)]
pub(crate) fn codec_error_(bd_codec_path: &syn::Path) -> TokenStream {
    quote! { #bd_codec_path::CodecError }
}

#[inline(always)]
pub(crate) fn fields_(bd_codec_path: &syn::Path) -> TokenStream {
    quote! { #bd_codec_path::info::Fields }
}

#[inline(always)]
pub(crate) fn record_(bd_codec_path: &syn::Path) -> TokenStream {
    quote! { #bd_codec_path::info::Record }
}

#[inline(always)]
pub(crate) fn field_type_(bd_codec_path: &syn::Path) -> TokenStream {
    quote! { #bd_codec_path::info::FieldType }
}

#[inline(always)]
pub(crate) fn field_ref_(bd_codec_path: &syn::Path) -> TokenStream {
    quote! { #bd_codec_path::info::FieldRef }
}

#[inline(always)]
pub(crate) fn field_value_(bd_codec_path: &syn::Path) -> TokenStream {
    quote! { #bd_codec_path::info::FieldValue }
}

#[inline(always)]
pub(crate) fn field_args_(bd_codec_path: &syn::Path) -> TokenStream {
    quote! { #bd_codec_path::info::FieldArgs }
}

#[inline(always)]
pub(crate) fn field_descriptor_(bd_codec_path: &syn::Path) -> TokenStream {
    quote! { #bd_codec_path::info::FieldDescriptor }
}

#[inline(always)]
pub(crate) fn record_info_(bd_codec_path: &syn::Path) -> TokenStream {
    quote! { #bd_codec_path::info::RecordInfo }
}

#[inline(always)]
pub(crate) fn type_kind_(bd_codec_path: &syn::Path) -> TokenStream {
    quote! { #bd_codec_path::info::TypeKind }
}

#[inline(always)]
pub(crate) fn non_generic_info_cell_(bd_codec_path: &syn::Path) -> TokenStream {
    quote! { #bd_codec_path::info::NonGenericInfoCell }
}

#[inline(always)]
pub(crate) fn generic_info_cell_(bd_codec_path: &syn::Path) -> TokenStream {
    quote! { #bd_codec_path::info::GenericInfoCell }
}
