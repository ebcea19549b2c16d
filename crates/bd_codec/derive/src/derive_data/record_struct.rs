use syn::ext::IdentExt;
use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Fields, GenericParam, Generics, Ident, Type};

/// A struct with named fields, ready for code generation.
pub(crate) struct RecordStruct<'a> {
    bd_codec_path: syn::Path,
    ident: &'a Ident,
    generics: &'a Generics,
    fields: Vec<RecordField<'a>>,
}

/// One named field.
pub(crate) struct RecordField<'a> {
    /// The member used to access the field.
    pub member: &'a Ident,
    /// The field name, without any raw identifier prefix.
    pub name: String,
    pub ty: &'a Type,
}

impl<'a> RecordStruct<'a> {
    pub fn from_ast(ast: &'a DeriveInput) -> syn::Result<Self> {
        let named = match &ast.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(named) => named,
                Fields::Unnamed(_) | Fields::Unit => {
                    return Err(syn::Error::new(
                        ast.ident.span(),
                        "`#[derive(Record)]` requires a struct with named fields",
                    ));
                }
            },
            Data::Enum(data) => {
                return Err(syn::Error::new(
                    data.enum_token.span(),
                    "`#[derive(Record)]` does not support enums",
                ));
            }
            Data::Union(data) => {
                return Err(syn::Error::new(
                    data.union_token.span(),
                    "`#[derive(Record)]` does not support unions",
                ));
            }
        };

        if let Some(lifetime) = ast.generics.lifetimes().next() {
            return Err(syn::Error::new(
                lifetime.span(),
                "`#[derive(Record)]` does not support lifetime parameters",
            ));
        }

        let fields = named
            .named
            .iter()
            .filter_map(|field| {
                let member = field.ident.as_ref()?;
                Some(RecordField {
                    member,
                    name: member.unraw().to_string(),
                    ty: &field.ty,
                })
            })
            .collect();

        Ok(Self {
            bd_codec_path: crate::path::bd_codec(),
            ident: &ast.ident,
            generics: &ast.generics,
            fields,
        })
    }

    #[inline]
    pub fn bd_codec_path(&self) -> &syn::Path {
        &self.bd_codec_path
    }

    #[inline]
    pub fn ident(&self) -> &'a Ident {
        self.ident
    }

    #[inline]
    pub fn generics(&self) -> &'a Generics {
        self.generics
    }

    #[inline]
    pub fn fields(&self) -> &[RecordField<'a>] {
        &self.fields
    }

    /// Whether the record has type or const parameters, so that its info
    /// must be stored per instantiation.
    pub fn impl_with_generic(&self) -> bool {
        !self
            .generics
            .params
            .iter()
            .all(|param| matches!(param, GenericParam::Lifetime(_)))
    }

    /// The generics of the generated impls, with a `FieldType` bound on every
    /// field type when the record is generic.
    pub fn impl_generics(&self) -> Generics {
        let mut generics = self.generics.clone();
        if !self.impl_with_generic() {
            return generics;
        }

        let field_type_ = crate::path::field_type_(&self.bd_codec_path);
        let where_clause = generics.make_where_clause();
        for field in &self.fields {
            let ty = field.ty;
            where_clause
                .predicates
                .push(syn::parse_quote!(#ty: #field_type_));
        }
        generics
    }
}
