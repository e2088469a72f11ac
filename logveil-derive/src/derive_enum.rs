//! Enum-specific `Securable` derivation.
//!
//! One match arm per variant. An enum might contain secured fields when any
//! variant can carry a hidden field.

use quote::quote;
use syn::{DataEnum, Result};

use crate::transform::{
    analyze_expr, generate_field_set, ok_unit, DeriveContext, FieldSetCode, VisitorBodies,
};

pub(crate) fn derive_enum(data: &DataEnum, generics: &syn::Generics) -> Result<VisitorBodies> {
    let mut ctx = DeriveContext::new(generics);
    let mut sets: Vec<FieldSetCode> = Vec::new();
    let mut detect_arms = Vec::new();
    let mut hide_arms = Vec::new();
    let ok = ok_unit();

    for variant in &data.variants {
        let variant_ident = &variant.ident;
        let fields = generate_field_set(&mut ctx, &variant.fields, Some(variant_ident))?;
        let pattern = fields.pattern_for(&quote! { Self::#variant_ident });
        let detect_expr = fields.detect_expr();
        let hides = &fields.hides;

        detect_arms.push(quote! {
            #pattern => #detect_expr
        });
        hide_arms.push(quote! {
            #pattern => {
                #(#hides)*
                #ok
            }
        });
        sets.push(fields);
    }

    // An uninhabited enum needs `match *self {}`; otherwise matching on the
    // reference keeps field bindings borrowed.
    let (detect_body, hide_body) = if data.variants.is_empty() {
        (quote! { match *self {} }, quote! { match *self {} })
    } else {
        (
            quote! {
                match self {
                    #(#detect_arms),*
                }
            },
            quote! {
                match self {
                    #(#hide_arms),*
                }
            },
        )
    };

    Ok(VisitorBodies {
        analyze_body: analyze_expr(&sets),
        detect_body,
        hide_body,
        walked_generics: ctx.walked_generics,
        hidden_generics: ctx.hidden_generics,
    })
}
