//! Shared field code generation for struct and enum derivation.
//!
//! Each field contributes up to three fragments, one per generated method:
//!
//! | Strategy | `analyze` | `has_populated_secured` | `hide_secured` |
//! |----------|-----------|-------------------------|----------------|
//! | `Walk` | `might_contain_secured::<T>()` | `detect(field, scope)` | `walk.field(..)?` |
//! | `Hide` | `true` | `!is_concealed(field)` | `walk.conceal(..)?` |
//! | `Opaque` | - | - | - |

use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote, quote_spanned};
use syn::{spanned::Spanned, Fields, Index, Result};

use crate::{
    crate_root,
    generics::collect_generics_from_type,
    strategy::{parse_field_strategy, Strategy},
};

/// Generated method bodies plus the generics that need bounds.
pub(crate) struct VisitorBodies {
    pub(crate) analyze_body: TokenStream,
    pub(crate) detect_body: TokenStream,
    pub(crate) hide_body: TokenStream,
    pub(crate) walked_generics: Vec<Ident>,
    pub(crate) hidden_generics: Vec<Ident>,
}

/// Accumulated generics during field processing.
pub(crate) struct DeriveContext<'a> {
    pub(crate) generics: &'a syn::Generics,
    pub(crate) walked_generics: Vec<Ident>,
    pub(crate) hidden_generics: Vec<Ident>,
}

impl<'a> DeriveContext<'a> {
    pub(crate) fn new(generics: &'a syn::Generics) -> Self {
        Self {
            generics,
            walked_generics: Vec::new(),
            hidden_generics: Vec::new(),
        }
    }
}

/// Code for one set of fields (a struct body or an enum variant).
pub(crate) struct FieldSetCode {
    /// Brace-pattern entries binding every non-opaque field (`name` or `0: field_0`).
    pub(crate) pattern: Vec<TokenStream>,
    pub(crate) has_hidden: bool,
    pub(crate) analyzes: Vec<TokenStream>,
    pub(crate) detects: Vec<TokenStream>,
    pub(crate) hides: Vec<TokenStream>,
}

impl FieldSetCode {
    /// `Self { a, 1: field_1, .. }` style pattern for `path`.
    pub(crate) fn pattern_for(&self, path: &TokenStream) -> TokenStream {
        let entries = &self.pattern;
        quote! { #path { #(#entries,)* .. } }
    }

    pub(crate) fn detect_expr(&self) -> TokenStream {
        any_of(&self.detects)
    }
}

/// Joins boolean expressions with `||`, `false` when empty.
pub(crate) fn any_of(exprs: &[TokenStream]) -> TokenStream {
    let mut iter = exprs.iter();
    match iter.next() {
        None => quote! { false },
        Some(first) => quote! { #first #(|| #iter)* },
    }
}

/// Builds the fragments for all fields of a struct or variant.
///
/// `label_prefix` names the enum variant so error paths read `Variant::field`.
pub(crate) fn generate_field_set(
    ctx: &mut DeriveContext<'_>,
    fields: &Fields,
    label_prefix: Option<&Ident>,
) -> Result<FieldSetCode> {
    let root = crate_root();
    let mut code = FieldSetCode {
        pattern: Vec::new(),
        has_hidden: false,
        analyzes: Vec::new(),
        detects: Vec::new(),
        hides: Vec::new(),
    };

    for (index, field) in fields.iter().enumerate() {
        let strategy = parse_field_strategy(&field.attrs)?;
        let span = field.span();
        let ty = &field.ty;
        let (binding, member, name) = match &field.ident {
            Some(ident) => (ident.clone(), quote! { #ident }, ident.to_string()),
            None => {
                let binding = format_ident!("field_{index}");
                let member = Index::from(index);
                (binding.clone(), quote! { #member: #binding }, index.to_string())
            }
        };
        let label = label_prefix.map_or(name.clone(), |variant| format!("{variant}::{name}"));

        match strategy {
            Strategy::Opaque => continue,
            Strategy::Walk => {
                collect_generics_from_type(ty, ctx.generics, &mut ctx.walked_generics);
                code.analyzes.push(quote_spanned! { span =>
                    #root::might_contain_secured::<#ty>()
                });
                code.detects.push(quote_spanned! { span =>
                    #root::detect(#binding, __scope)
                });
                code.hides.push(quote_spanned! { span =>
                    __walk.field(#label, #binding)?;
                });
            }
            Strategy::Hide => {
                collect_generics_from_type(ty, ctx.generics, &mut ctx.hidden_generics);
                code.has_hidden = true;
                code.detects.push(quote_spanned! { span =>
                    !#root::Concealable::is_concealed(#binding)
                });
                code.hides.push(quote_spanned! { span =>
                    __walk.conceal(#label, #binding)?;
                });
            }
        }
        code.pattern.push(member);
    }

    Ok(code)
}

/// Analysis expression for a set of field sets (one for a struct, one per variant).
pub(crate) fn analyze_expr<'a>(sets: impl IntoIterator<Item = &'a FieldSetCode>) -> TokenStream {
    let mut analyzes = Vec::new();
    for set in sets {
        if set.has_hidden {
            return quote! { true };
        }
        analyzes.extend(set.analyzes.iter().cloned());
    }
    any_of(&analyzes)
}

pub(crate) fn ok_unit() -> TokenStream {
    quote! { ::core::result::Result::Ok(()) }
}
