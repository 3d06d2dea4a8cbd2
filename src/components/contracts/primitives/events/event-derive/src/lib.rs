//! Implements the functionality to convert a struct type to an `EventRecord`
//! in Rust through the use of a procedural macros.
#![recursion_limit = "128"]

use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Ident};

/// Module events parser.
///
/// Converts a given input struct into an `EventRecord` where the keys are the attribute
/// names assigned to the values of the entries.
#[proc_macro_derive(Event)]
pub fn derive_event(input_struct: TokenStream) -> TokenStream {
    let ast = syn::parse_macro_input!(input_struct as DeriveInput);

    // check for struct type and parse out fields
    let fields = match ast.data {
        Data::Struct(st) => st.fields,
        _ => {
            return syn::Error::new_spanned(&ast.ident, "Event must be derived on a struct")
                .to_compile_error()
                .into()
        }
    };

    // parse out all the field names in the struct as `Ident`s
    let idents: Vec<&Ident> = fields
        .iter()
        .filter_map(|field| field.ident.as_ref())
        .collect::<Vec<&Ident>>();

    // convert all the field names into strings
    let keys: Vec<String> = idents
        .iter()
        .map(|ident| ident.to_string())
        .collect::<Vec<String>>();

    // get the name identifier of the struct input AST
    let name: &Ident = &ast.ident;
    let (impl_generics, ty_generics, where_clause) = ast.generics.split_for_impl();

    // start codegen for events functionality that converts a struct into an event record
    let tokens = quote! {

        impl #impl_generics Event for #name #ty_generics #where_clause {

            fn emit_event(field_type: String, input_struct: #name) -> EventRecord {
                let mut attributes = Vec::new();
                #(
                    attributes.push(EventAttribute {
                        key: #keys.to_string(),
                        value: format!("{:?}", input_struct.#idents),
                    });
                )*
                EventRecord {
                    type_: format!("{}_{}", field_type, stringify!(#name)),
                    attributes,
                }
            }

            fn emit_serde_event(field_type: String, input_struct: #name) -> EventRecord {
                let mut attributes = Vec::new();
                #(
                    attributes.push(EventAttribute {
                        key: #keys.to_string(),
                        value: to_string(&input_struct.#idents).unwrap_or_default(),
                    });
                )*
                EventRecord {
                    type_: format!("{}_{}", field_type, stringify!(#name)),
                    attributes,
                }
            }
        }
    };
    TokenStream::from(tokens)
}
