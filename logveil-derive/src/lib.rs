//! Derive macro for `logveil`.
//!
//! `#[derive(Securable)]` generates the build-time visitor that the redaction
//! engine uses instead of runtime reflection. For every struct or enum it
//! emits:
//! - a structural `analyze` (can this type ever carry a `#[hide]` field?)
//! - a read-only detector (is a hidden field populated right now?)
//! - an in-place walker that conceals hidden fields on a private copy
//!
//! Policy (the placeholder, scope filtering, caching) lives in the `logveil`
//! crate; this crate only reads attributes and writes the traversal code.

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::default_trait_access,
    clippy::doc_markdown,
    clippy::if_not_else,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::needless_ifs,
    clippy::use_self,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::enum_glob_use,
    clippy::struct_excessive_bools,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::result_large_err,
    clippy::future_not_send,
    clippy::option_if_let_else,
    clippy::from_over_into,
    clippy::manual_inspect
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

#[allow(unused_extern_crates)]
extern crate proc_macro;

use proc_macro2::TokenStream;
use proc_macro_crate::{crate_name, FoundCrate};
use quote::{format_ident, quote};
use syn::{parse_macro_input, parse_quote, spanned::Spanned, Data, DeriveInput, Result};

mod container;
mod derive_enum;
mod derive_struct;
mod generics;
mod strategy;
mod transform;
use container::{parse_container_options, ContainerOptions};
use derive_enum::derive_enum;
use derive_struct::derive_struct;
use generics::{add_concealable_bounds, add_securable_bounds, add_static_bounds};
use transform::VisitorBodies;

/// Derives `logveil::Securable` for structs and enums.
///
/// # Field Attributes
///
/// - **No annotation**: the field is walked. Its type must implement `Securable`; the engine
///   only descends into it when the type can carry hidden fields and one is populated.
///
/// - `#[hide]`, `#[hide = true]` or `#[hide = "true"]`: the field is secured as a whole. Text
///   becomes the `<hidden>` placeholder (empty text stays empty), anything else becomes its
///   zero value. Nothing below the field is inspected. The type must implement `Concealable`.
///   Any other value (`#[hide = false]`, `#[hide = "no"]`) leaves the field visible.
///
/// - `#[securable(opaque)]`: the field is never analyzed, inspected or rewritten. Use it for
///   foreign types that do not implement `Securable` (timestamps, decimals, handles).
///
/// # Container Attributes
///
/// - `#[securable(concealable)]`: also implement `Concealable` so the type itself can sit behind
///   `#[hide]` on another type's field. Concealing resets the value to `Default::default()`, so
///   the type must implement `Default` and `PartialEq`.
///
/// Unions are rejected at compile time.
#[proc_macro_derive(Securable, attributes(hide, securable))]
pub fn derive_securable(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

/// Returns the token stream to reference the logveil crate root.
///
/// Handles crate renaming (e.g., `veil = { package = "logveil", ... }`)
/// and internal usage (when derive is used inside the logveil crate itself).
fn crate_root() -> TokenStream {
    match crate_name("logveil") {
        Ok(FoundCrate::Itself) => quote! { crate },
        Ok(FoundCrate::Name(name)) => {
            let ident = format_ident!("{}", name);
            quote! { ::#ident }
        }
        Err(_) => quote! { ::logveil },
    }
}

fn expand(input: DeriveInput) -> Result<TokenStream> {
    let DeriveInput {
        ident,
        generics,
        data,
        attrs,
        ..
    } = input;

    let ContainerOptions { concealable } = parse_container_options(&attrs)?;

    let crate_root = crate_root();

    let bodies = match &data {
        Data::Struct(data) => derive_struct(data, &generics)?,
        Data::Enum(data) => derive_enum(data, &generics)?,
        Data::Union(u) => {
            return Err(syn::Error::new(
                u.union_token.span(),
                "`Securable` cannot be derived for unions",
            ));
        }
    };

    let VisitorBodies {
        analyze_body,
        detect_body,
        hide_body,
        walked_generics,
        hidden_generics,
    } = bodies;

    let static_generics = add_static_bounds(generics);
    let securable_generics = add_securable_bounds(static_generics.clone(), &walked_generics);
    let securable_generics = add_concealable_bounds(securable_generics, &hidden_generics);
    let (impl_generics, ty_generics, where_clause) = securable_generics.split_for_impl();

    let concealable_impl = if concealable {
        let mut concealable_generics = static_generics;
        let self_ty: syn::Type = {
            let (_, ty_generics, _) = concealable_generics.split_for_impl();
            parse_quote!(#ident #ty_generics)
        };
        let where_clause = concealable_generics.make_where_clause();
        where_clause
            .predicates
            .push(parse_quote!(#self_ty: ::core::default::Default + ::core::cmp::PartialEq));
        let (impl_generics, ty_generics, where_clause) = concealable_generics.split_for_impl();
        quote! {
            impl #impl_generics #crate_root::Concealable for #ident #ty_generics #where_clause {
                fn is_concealed(&self) -> bool {
                    *self == <Self as ::core::default::Default>::default()
                }

                fn conceal(&mut self) {
                    *self = <Self as ::core::default::Default>::default();
                }
            }
        }
    } else {
        quote! {}
    };

    Ok(quote! {
        impl #impl_generics #crate_root::Securable for #ident #ty_generics #where_clause {
            fn scope_path() -> ::core::option::Option<&'static str> {
                ::core::option::Option::Some(::core::module_path!())
            }

            fn analyze() -> bool {
                #analyze_body
            }

            fn has_populated_secured(&self, __scope: &#crate_root::ScopeFilter) -> bool {
                #detect_body
            }

            fn hide_secured(
                &mut self,
                __walk: &mut #crate_root::Walk<'_>,
            ) -> ::core::result::Result<(), #crate_root::RedactError> {
                #hide_body
            }
        }

        #concealable_impl
    })
}
