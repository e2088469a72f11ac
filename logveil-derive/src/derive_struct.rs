//! Struct-specific `Securable` derivation.
//!
//! Named, tuple and unit structs all bind their fields with a brace pattern
//! (`Self { name, 0: field_0, .. }`), so opaque fields are simply left out.

use quote::quote;
use syn::{DataStruct, Result};

use crate::transform::{analyze_expr, generate_field_set, ok_unit, DeriveContext, VisitorBodies};

pub(crate) fn derive_struct(data: &DataStruct, generics: &syn::Generics) -> Result<VisitorBodies> {
    let mut ctx = DeriveContext::new(generics);
    let fields = generate_field_set(&mut ctx, &data.fields, None)?;

    let pattern = fields.pattern_for(&quote! { Self });
    let detect_expr = fields.detect_expr();
    let hides = &fields.hides;
    let ok = ok_unit();

    let detect_body = if fields.detects.is_empty() {
        quote! { false }
    } else {
        quote! {
            let #pattern = self;
            #detect_expr
        }
    };
    let hide_body = if fields.hides.is_empty() {
        ok
    } else {
        quote! {
            let #pattern = self;
            #(#hides)*
            #ok
        }
    };

    Ok(VisitorBodies {
        analyze_body: analyze_expr([&fields]),
        detect_body,
        hide_body,
        walked_generics: ctx.walked_generics,
        hidden_generics: ctx.hidden_generics,
    })
}
