//! Generic type parameter handling and trait bound management.
//!
//! Every type parameter gets `'static` because descriptors are keyed by
//! `TypeId`. `Securable` and `Concealable` bounds are added only for generics
//! that appear in walked or hidden fields.
//!
//! ## PhantomData Handling
//!
//! `PhantomData<T>` is skipped when collecting generics:
//!
//! ```ignore
//! struct TypedId<T> {
//!     id: String,
//!     _marker: PhantomData<T>,  // T should NOT require Securable
//! }
//! ```
//!
//! `PhantomData<T>` is opaque to the engine for every `T`, so requiring
//! `T: Securable` would only reject valid markers.

use syn::{parse_quote, Ident};

use crate::crate_root;

pub(crate) fn collect_generics_from_type(
    ty: &syn::Type,
    generics: &syn::Generics,
    result: &mut Vec<Ident>,
) {
    match ty {
        syn::Type::Path(path) => {
            let Some(segment) = path.path.segments.last() else {
                return;
            };
            if segment.ident == "PhantomData" {
                return;
            }

            if let syn::PathArguments::AngleBracketed(args) = &segment.arguments {
                for arg in &args.args {
                    if let syn::GenericArgument::Type(inner_ty) = arg {
                        collect_generics_from_type(inner_ty, generics, result);
                    }
                }
            }

            for param in generics.type_params() {
                if segment.ident == param.ident && !result.iter().any(|g| g == &param.ident) {
                    result.push(param.ident.clone());
                }
            }
        }
        syn::Type::Array(array) => collect_generics_from_type(&array.elem, generics, result),
        syn::Type::Group(group) => collect_generics_from_type(&group.elem, generics, result),
        syn::Type::Paren(paren) => collect_generics_from_type(&paren.elem, generics, result),
        _ => {}
    }
}

/// Adds `'static` to every type parameter and lifetime.
pub(crate) fn add_static_bounds(mut generics: syn::Generics) -> syn::Generics {
    for param in generics.type_params_mut() {
        param.bounds.push(parse_quote!('static));
    }
    let lifetimes: Vec<syn::Lifetime> = generics
        .lifetimes()
        .map(|def| def.lifetime.clone())
        .collect();
    if !lifetimes.is_empty() {
        let where_clause = generics.make_where_clause();
        for lifetime in lifetimes {
            where_clause.predicates.push(parse_quote!(#lifetime: 'static));
        }
    }
    generics
}

/// Adds `Securable` bounds to generic parameters used in walked fields.
pub(crate) fn add_securable_bounds(
    mut generics: syn::Generics,
    used_generics: &[Ident],
) -> syn::Generics {
    let root = crate_root();
    for param in generics.type_params_mut() {
        if used_generics.iter().any(|g| g == &param.ident) {
            param.bounds.push(parse_quote!(#root::Securable));
        }
    }
    generics
}

/// Adds `Concealable` bounds to generic parameters used in hidden fields.
pub(crate) fn add_concealable_bounds(
    mut generics: syn::Generics,
    used_generics: &[Ident],
) -> syn::Generics {
    let root = crate_root();
    for param in generics.type_params_mut() {
        if used_generics.iter().any(|g| g == &param.ident) {
            param.bounds.push(parse_quote!(#root::Concealable));
        }
    }
    generics
}
