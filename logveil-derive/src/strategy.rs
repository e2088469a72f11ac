//! Parsing of the secured tag (`#[hide]`) and `#[securable(...)]` field attributes.
//!
//! This module maps attribute syntax to traversal decisions and produces
//! structured errors for invalid forms.

use proc_macro2::Span;
use syn::{spanned::Spanned, Attribute, Expr, Lit, Meta, Result};

/// The one literal value of the secured tag that enables it.
const HIDE_ENABLED: &str = "true";

/// Field treatment based on its attributes.
///
/// | Attribute | Strategy | Behavior |
/// |-----------|----------|----------|
/// | None, `#[hide = false]` | `Walk` | Descend when the type may carry hidden fields |
/// | `#[hide]`, `#[hide = true]` | `Hide` | Conceal the whole field, never descend |
/// | `#[securable(opaque)]` | `Opaque` | Never touched, no trait bounds |
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Strategy {
    /// Visible field: analyzed, detected and walked through `Securable`.
    Walk,
    /// Secured field: concealed as a unit through `Concealable`.
    Hide,
    /// Excluded from every stage.
    Opaque,
}

fn set_strategy(target: &mut Option<Strategy>, next: Strategy, span: Span) -> Result<()> {
    if target.is_some() {
        return Err(syn::Error::new(
            span,
            "multiple #[hide] / #[securable] attributes specified on the same field",
        ));
    }
    *target = Some(next);
    Ok(())
}

fn parse_hide(attr: &Attribute) -> Result<Strategy> {
    match &attr.meta {
        Meta::Path(_) => Ok(Strategy::Hide),
        Meta::NameValue(nv) => {
            let Expr::Lit(expr) = &nv.value else {
                return Err(syn::Error::new(
                    nv.value.span(),
                    "expected a literal: #[hide = true] or #[hide = \"true\"]",
                ));
            };
            match &expr.lit {
                Lit::Bool(value) if value.value => Ok(Strategy::Hide),
                Lit::Str(value) if value.value() == HIDE_ENABLED => Ok(Strategy::Hide),
                // Any other value leaves the field visible.
                Lit::Bool(_) | Lit::Str(_) => Ok(Strategy::Walk),
                other => Err(syn::Error::new(
                    other.span(),
                    "expected a boolean or string literal for #[hide = ...]",
                )),
            }
        }
        Meta::List(_) => Err(syn::Error::new(
            attr.span(),
            "list syntax is not supported for #[hide]; use #[hide] or #[hide = true]",
        )),
    }
}

fn parse_securable(attr: &Attribute) -> Result<Strategy> {
    let Meta::List(list) = &attr.meta else {
        return Err(syn::Error::new(
            attr.span(),
            "expected #[securable(opaque)] on a field",
        ));
    };
    let mut opaque = false;
    list.parse_nested_meta(|meta| {
        if meta.path.is_ident("opaque") {
            opaque = true;
            Ok(())
        } else {
            Err(meta.error("unknown field option; expected `opaque`"))
        }
    })?;
    if opaque {
        Ok(Strategy::Opaque)
    } else {
        Err(syn::Error::new(
            attr.span(),
            "expected #[securable(opaque)] on a field",
        ))
    }
}

pub(crate) fn parse_field_strategy(attrs: &[Attribute]) -> Result<Strategy> {
    let mut strategy: Option<Strategy> = None;
    for attr in attrs {
        if attr.path().is_ident("hide") {
            set_strategy(&mut strategy, parse_hide(attr)?, attr.span())?;
        } else if attr.path().is_ident("securable") {
            set_strategy(&mut strategy, parse_securable(attr)?, attr.span())?;
        }
    }

    // Default: no tag means visible
    Ok(strategy.unwrap_or(Strategy::Walk))
}

#[cfg(test)]
mod tests {
    use quote::quote;
    use syn::DeriveInput;

    use super::*;

    fn parse_attrs(tokens: proc_macro2::TokenStream) -> Vec<Attribute> {
        let input: DeriveInput = syn::parse2(quote! {
            #tokens
            struct Dummy;
        })
        .expect("should parse as DeriveInput");
        input.attrs
    }

    #[test]
    fn no_attribute_returns_walk() {
        let attrs = parse_attrs(quote! {});
        assert_eq!(parse_field_strategy(&attrs).unwrap(), Strategy::Walk);
    }

    #[test]
    fn bare_hide_returns_hide() {
        let attrs = parse_attrs(quote! { #[hide] });
        assert_eq!(parse_field_strategy(&attrs).unwrap(), Strategy::Hide);
    }

    #[test]
    fn enabled_literals_return_hide() {
        let attrs = parse_attrs(quote! { #[hide = true] });
        assert_eq!(parse_field_strategy(&attrs).unwrap(), Strategy::Hide);

        let attrs = parse_attrs(quote! { #[hide = "true"] });
        assert_eq!(parse_field_strategy(&attrs).unwrap(), Strategy::Hide);
    }

    #[test]
    fn other_literals_leave_field_visible() {
        let attrs = parse_attrs(quote! { #[hide = false] });
        assert_eq!(parse_field_strategy(&attrs).unwrap(), Strategy::Walk);

        let attrs = parse_attrs(quote! { #[hide = "yes"] });
        assert_eq!(parse_field_strategy(&attrs).unwrap(), Strategy::Walk);
    }

    #[test]
    fn non_literal_value_errors() {
        let attrs = parse_attrs(quote! { #[hide = 1] });
        let result = parse_field_strategy(&attrs);
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("boolean or string literal"));
    }

    #[test]
    fn list_syntax_errors() {
        let attrs = parse_attrs(quote! { #[hide(always)] });
        let result = parse_field_strategy(&attrs);
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("list syntax is not supported"));
    }

    #[test]
    fn opaque_is_parsed() {
        let attrs = parse_attrs(quote! { #[securable(opaque)] });
        assert_eq!(parse_field_strategy(&attrs).unwrap(), Strategy::Opaque);
    }

    #[test]
    fn unknown_field_option_errors() {
        let attrs = parse_attrs(quote! { #[securable(skip)] });
        let result = parse_field_strategy(&attrs);
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("unknown field option"));
    }

    #[test]
    fn hide_and_opaque_together_error() {
        let attrs = parse_attrs(quote! {
            #[hide]
            #[securable(opaque)]
        });
        let result = parse_field_strategy(&attrs);
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("multiple #[hide] / #[securable] attributes"));
    }

    #[test]
    fn other_attributes_ignored() {
        let attrs = parse_attrs(quote! {
            #[serde(rename = "pwd")]
            #[doc = "password"]
        });
        assert_eq!(parse_field_strategy(&attrs).unwrap(), Strategy::Walk);
    }
}
