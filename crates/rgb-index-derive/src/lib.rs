//! Derive macros for rgb-index field selectors.
//!
//! `#[derive(Fields)]` emits one zero-sized selector type per named field of
//! a struct, named `{Struct}{Field}` with the field name in PascalCase:
//!
//! ```ignore
//! #[derive(Fields)]
//! struct Foo {
//!     i: i32,
//!     last_seen: u64,
//!     #[field(skip)]
//!     scratch: Vec<u8>,
//! }
//!
//! // Generates `FooI` and `FooLastSeen`, each implementing `rgb_index::Field`.
//! let store = IndexedStore::<Foo, (FooI, FooLastSeen)>::new();
//! ```
//!
//! # Rules
//!
//! - Only structs with named fields can derive `Fields`
//! - Generic structs are rejected: selectors are plain marker types
//! - Every field not marked `#[field(skip)]` must implement `IndexValue`
//! - Selectors get the struct's visibility

use heck::ToUpperCamelCase;
use proc_macro::TokenStream;
use quote::{format_ident, quote, quote_spanned};
use syn::{Attribute, Data, DeriveInput, Fields, Meta};

/// Check if a field has `#[field(skip)]`
fn is_skipped(attrs: &[Attribute]) -> bool {
    for attr in attrs {
        if attr.path().is_ident("field") {
            if let Meta::List(meta_list) = &attr.meta {
                let tokens = meta_list.tokens.to_string();
                if tokens.trim() == "skip" {
                    return true;
                }
            }
        }
    }
    false
}

/// Derive field selectors for a record struct.
///
/// # Examples
///
/// ```ignore
/// #[derive(Fields)]
/// pub struct Position { x: i32, y: i32, z: i32 }
///
/// // PositionX, PositionY, PositionZ
/// let store = IndexedStore::<Position, (PositionX, PositionZ)>::new();
/// ```
#[proc_macro_derive(Fields, attributes(field))]
pub fn derive_fields(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let vis = &input.vis;

    if !input.generics.params.is_empty() {
        return TokenStream::from(quote_spanned! {
            name.span() =>
            compile_error!("generic structs cannot derive Fields; implement rgb_index::Field by hand for each concrete type");
        });
    }

    let named = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            Fields::Unnamed(_) | Fields::Unit => {
                return TokenStream::from(quote_spanned! {
                    name.span() =>
                    compile_error!("Fields can only be derived for structs with named fields; use rgb_index::field! instead");
                });
            }
        },
        Data::Enum(_) => {
            return TokenStream::from(quote_spanned! {
                name.span() =>
                compile_error!("enums cannot derive Fields; index a struct that holds the enum instead");
            });
        }
        Data::Union(_) => {
            return TokenStream::from(quote_spanned! {
                name.span() =>
                compile_error!("unions cannot derive Fields; use a struct instead");
            });
        }
    };

    let selectors = named
        .iter()
        .filter(|field| !is_skipped(&field.attrs))
        .filter_map(|field| {
            let ident = field.ident.as_ref()?;
            let ty = &field.ty;
            let field_name = ident.to_string();
            let field_name = field_name.trim_start_matches("r#");
            let selector = format_ident!("{}{}", name, field_name.to_upper_camel_case());
            let doc = format!("Field selector for `{name}::{field_name}`.");

            Some(quote! {
                #[doc = #doc]
                #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
                #vis struct #selector;

                impl ::rgb_index::Field for #selector {
                    type Record = #name;
                    type Value = #ty;
                    const NAME: &'static str = #field_name;

                    fn get(record: &#name) -> &#ty {
                        &record.#ident
                    }
                }
            })
        });

    let expanded = quote! {
        #(#selectors)*
    };

    TokenStream::from(expanded)
}
