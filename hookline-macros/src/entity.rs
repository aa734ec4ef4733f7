//! Entity derive.
//!
//! This module contains:
//! - `#[derive(Entity)]` - Derive macro for implementing the `Entity` trait

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Attribute, Data, DeriveInput, Fields, Index, LitStr, parse_macro_input};

/// Options read from `#[entity(...)]` on the type.
struct ContainerArgs {
    suffix: Option<LitStr>,
}

impl ContainerArgs {
    fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut suffix = None;
        for attr in attrs.iter().filter(|attr| attr.path().is_ident("entity")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("suffix") {
                    suffix = Some(meta.value()?.parse::<LitStr>()?);
                    Ok(())
                } else {
                    Err(meta.error("unknown entity attribute, expected `suffix`"))
                }
            })?;
        }
        Ok(Self { suffix })
    }
}

fn is_marked_id(attrs: &[Attribute]) -> syn::Result<bool> {
    let mut marked = false;
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("entity")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("id") {
                marked = true;
                Ok(())
            } else {
                Err(meta.error("unknown entity field attribute, expected `id`"))
            }
        })?;
    }
    Ok(marked)
}

/// The expression reading the identifier field off `self`.
fn id_accessor(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let fields = match &input.data {
        Data::Struct(data) => &data.fields,
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "#[derive(Entity)] can only be used on structs",
            ));
        }
    };

    let mut marked = Vec::new();
    for (i, field) in fields.iter().enumerate() {
        if is_marked_id(&field.attrs)? {
            marked.push((i, field));
        }
    }

    match marked.as_slice() {
        [(i, field)] => Ok(match &field.ident {
            Some(ident) => quote! { self.#ident },
            None => {
                let index = Index::from(*i);
                quote! { self.#index }
            }
        }),
        [] => match fields {
            Fields::Named(named) => named
                .named
                .iter()
                .find(|field| field.ident.as_ref().is_some_and(|ident| ident == "id"))
                .map(|_| quote! { self.id })
                .ok_or_else(|| {
                    syn::Error::new_spanned(
                        &input.ident,
                        "no identifier field, add a field named `id` or mark one with #[entity(id)]",
                    )
                }),
            _ => Err(syn::Error::new_spanned(
                &input.ident,
                "mark the identifier field with #[entity(id)]",
            )),
        },
        [_, (_, second), ..] => Err(syn::Error::new_spanned(
            second,
            "only one field can be marked #[entity(id)]",
        )),
    }
}

/// Implementation of `#[derive(Entity)]`.
pub fn derive_entity_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(expanded) => TokenStream::from(expanded),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let args = ContainerArgs::from_attrs(&input.attrs)?;
    let suffix = args
        .suffix
        .unwrap_or_else(|| LitStr::new(&format!("@{name}"), name.span()));
    let id = id_accessor(input)?;

    Ok(quote! {
        impl #impl_generics ::hookline::Entity for #name #ty_generics #where_clause {
            const SUFFIX: &'static str = #suffix;

            fn hook_index(&self) -> u32 {
                ::core::convert::From::from(#id)
            }
        }
    })
}
