use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, LitStr, Path};

pub fn derive_read_model(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let options = extract_options(&input);
    let collection = options.collection;
    let krate = options.krate;

    let id_field = match extract_id_field(&input) {
        Some(field) => field,
        None => {
            return syn::Error::new_spanned(
                name,
                "ReadModel derive: no field marked with #[readmodel(id)] and no field named `id`",
            )
            .to_compile_error()
            .into();
        }
    };

    let expanded = quote! {
        impl #krate::ReadModel for #name {
            const COLLECTION: &'static str = #collection;

            fn id(&self) -> &str {
                &self.#id_field
            }
        }
    };

    TokenStream::from(expanded)
}

struct Options {
    collection: String,
    krate: Path,
}

/// Reads struct-level `#[readmodel(collection = "...", crate = "...")]`.
fn extract_options(input: &DeriveInput) -> Options {
    let mut collection = None;
    let mut krate = None;

    for attr in &input.attrs {
        if !attr.path().is_ident("readmodel") {
            continue;
        }

        let _ = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("collection") {
                let value: LitStr = meta.value()?.parse()?;
                collection = Some(value.value());
            } else if meta.path.is_ident("crate") {
                let value: LitStr = meta.value()?.parse()?;
                krate = Some(value.parse::<Path>()?);
            }
            Ok(())
        });
    }

    Options {
        collection: collection
            .unwrap_or_else(|| format!("{}s", to_snake_case(&input.ident.to_string()))),
        krate: krate.unwrap_or_else(|| syn::parse_quote!(::devflow)),
    }
}

fn extract_id_field(input: &DeriveInput) -> Option<syn::Ident> {
    let Data::Struct(data_struct) = &input.data else {
        return None;
    };
    let Fields::Named(fields) = &data_struct.fields else {
        return None;
    };

    for field in &fields.named {
        for attr in &field.attrs {
            if !attr.path().is_ident("readmodel") {
                continue;
            }
            let mut is_id = false;
            let _ = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("id") {
                    is_id = true;
                }
                Ok(())
            });
            if is_id {
                return field.ident.clone();
            }
        }
    }

    // Default: a field named "id"
    fields
        .named
        .iter()
        .filter_map(|field| field.ident.as_ref())
        .find(|ident| *ident == "id")
        .cloned()
}

fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    for (i, ch) in s.chars().enumerate() {
        if ch.is_uppercase() {
            if i > 0 {
                result.push('_');
            }
            result.extend(ch.to_lowercase());
        } else {
            result.push(ch);
        }
    }
    result
}
