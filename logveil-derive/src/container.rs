//! Container-level attribute parsing for `#[derive(Securable)]`.
//!
//! This module handles attributes on the struct/enum itself, not on fields.

use syn::{Attribute, Meta, Result};

/// Options parsed from container-level `#[securable(...)]` attributes.
#[derive(Clone, Debug, Default)]
pub(crate) struct ContainerOptions {
    /// If true, also generate a `Concealable` impl backed by `Default`.
    pub(crate) concealable: bool,
}

/// Parses container-level `#[securable(...)]` attributes.
pub(crate) fn parse_container_options(attrs: &[Attribute]) -> Result<ContainerOptions> {
    let mut options = ContainerOptions::default();

    for attr in attrs {
        if attr.path().is_ident("hide") {
            return Err(syn::Error::new_spanned(
                attr,
                "#[hide] marks fields; to hide a whole type, add #[securable(concealable)] \
                 here and #[hide] on the field that holds it",
            ));
        }
        if !attr.path().is_ident("securable") {
            continue;
        }

        match &attr.meta {
            Meta::Path(_) => {
                // Bare #[securable] on container - no meaning, ignore
            }
            Meta::List(list) => {
                list.parse_nested_meta(|meta| {
                    if meta.path.is_ident("concealable") {
                        options.concealable = true;
                        Ok(())
                    } else {
                        Err(meta.error(format!(
                            "unknown container option `{}`; expected `concealable`",
                            meta.path
                                .get_ident()
                                .map_or_else(|| "?".to_string(), ToString::to_string)
                        )))
                    }
                })?;
            }
            Meta::NameValue(nv) => {
                return Err(syn::Error::new_spanned(
                    nv,
                    "name-value syntax is not supported for container-level #[securable]",
                ));
            }
        }
    }

    Ok(options)
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
    fn no_attribute_returns_defaults() {
        let attrs = parse_attrs(quote! {});
        let options = parse_container_options(&attrs).unwrap();
        assert!(!options.concealable);
    }

    #[test]
    fn concealable_is_parsed() {
        let attrs = parse_attrs(quote! { #[securable(concealable)] });
        let options = parse_container_options(&attrs).unwrap();
        assert!(options.concealable);
    }

    #[test]
    fn unknown_option_errors() {
        let attrs = parse_attrs(quote! { #[securable(opaque)] });
        let result = parse_container_options(&attrs);
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("unknown container option"));
    }

    #[test]
    fn hide_on_container_errors() {
        let attrs = parse_attrs(quote! { #[hide] });
        let result = parse_container_options(&attrs);
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("#[hide] marks fields"));
    }

    #[test]
    fn bare_securable_on_container_is_ignored() {
        let attrs = parse_attrs(quote! { #[securable] });
        let options = parse_container_options(&attrs).unwrap();
        assert!(!options.concealable);
    }
}
