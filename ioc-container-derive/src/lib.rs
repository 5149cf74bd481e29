//! Derive macro for ioc-container
//!
//! `#[derive(Component)]` turns a struct with named fields into a
//! container-built component:
//!
//! - every `#[inject]` field of type `Arc<T>` becomes a constructor
//!   parameter, bound by the field's name (or `#[inject(name = "...")]`)
//! - every other field is filled with `Default::default()`
//! - `#[component(expose = "dyn Trait")]` on the struct makes the instance
//!   resolvable as that trait object
//!
//! The macro implements `Managed` and `Component`. `Lifecycle` is written by
//! hand so the hooks stay visible next to the type.
//!
//! # Example
//!
//! ```rust,ignore
//! use ioc_container::{Component, Container, Lifecycle};
//! use std::sync::Arc;
//!
//! trait Database: Send + Sync {}
//!
//! #[derive(Component)]
//! #[component(expose = "dyn Database")]
//! struct Postgres;
//!
//! impl Database for Postgres {}
//! impl Lifecycle for Postgres {}
//!
//! #[derive(Component)]
//! struct UserRepository {
//!     #[inject(name = "postgres")]
//!     db: Arc<dyn Database>,
//!     // Non-injected fields use Default
//!     queries: std::sync::atomic::AtomicU64,
//! }
//!
//! impl Lifecycle for UserRepository {}
//!
//! let mut container = Container::new();
//! container.register::<Postgres>()?;
//! container.register::<UserRepository>()?;
//! ```

use proc_macro::TokenStream;
use quote::quote;
use syn::{Attribute, Data, DeriveInput, Fields, LitStr, Type, parse_macro_input};

/// Derive macro for container components.
///
/// # Attributes
///
/// - `#[inject]` - Field is a constructor parameter. The field type must be `Arc<T>`;
///   `T` may be a trait object.
/// - `#[inject(name = "primary")]` - Bind the parameter to another name than the field's.
/// - `#[component(expose = "dyn Trait")]` - Struct-level, repeatable. Adds a view.
///
/// # Generated Code
///
/// ```rust,ignore
/// #[derive(Component)]
/// struct Car {
///     #[inject]
///     engine: Arc<Engine>,
///     mileage: u64,
/// }
///
/// // impl Managed for Car {
/// //     fn expose(views: &mut Views<Self>) {}
/// // }
/// // impl Component for Car {
/// //     fn constructors() -> Vec<Constructor<Self>> {
/// //         vec![Constructor::builder()
/// //             .param::<Engine>("engine")
/// //             .build(|args| Ok(Self {
/// //                 engine: args.next::<Engine>()?,
/// //                 mileage: Default::default(),
/// //             }))]
/// //     }
/// // }
/// ```
#[proc_macro_derive(Component, attributes(inject, component))]
pub fn derive_component(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand_component(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand_component(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => Some(&fields.named),
            Fields::Unit => None,
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    input,
                    "Component can only be derived for unit structs or structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "Component can only be derived for structs",
            ));
        }
    };

    let exposed = parse_exposed(&input.attrs)?;

    let mut params = Vec::new();
    let mut field_inits = Vec::new();

    for field in fields.into_iter().flatten() {
        let Some(field_name) = field.ident.as_ref() else {
            continue;
        };

        match parse_inject(&field.attrs)? {
            Some(binding) => {
                let Some(inner) = extract_arc_inner_type(&field.ty) else {
                    return Err(syn::Error::new_spanned(
                        &field.ty,
                        "Fields marked with #[inject] must have type Arc<T>",
                    ));
                };
                let binding = binding.unwrap_or_else(|| field_name.to_string());
                params.push(quote! { .param::<#inner>(#binding) });
                field_inits.push(quote! { #field_name: __args.next::<#inner>()? });
            }
            None => {
                field_inits.push(quote! {
                    #field_name: ::std::default::Default::default()
                });
            }
        }
    }

    let construct = if fields.is_some() {
        quote! { Self { #(#field_inits),* } }
    } else {
        quote! { Self }
    };

    Ok(quote! {
        impl #impl_generics ::ioc_container::Managed for #name #ty_generics #where_clause {
            fn expose(views: &mut ::ioc_container::Views<Self>) {
                #( views.expose::<#exposed>(|this| this); )*
                let _ = views;
            }
        }

        impl #impl_generics ::ioc_container::Component for #name #ty_generics #where_clause {
            fn constructors() -> ::std::vec::Vec<::ioc_container::Constructor<Self>> {
                ::std::vec![
                    ::ioc_container::Constructor::builder()
                        #(#params)*
                        .build(|__args: &mut ::ioc_container::Arguments| {
                            let _ = &__args;
                            ::std::result::Result::Ok(#construct)
                        })
                ]
            }
        }
    })
}

/// `None` when the field has no `#[inject]`, `Some(None)` for a bare
/// `#[inject]`, `Some(Some(name))` for `#[inject(name = "...")]`
fn parse_inject(attrs: &[Attribute]) -> syn::Result<Option<Option<String>>> {
    for attr in attrs {
        if !attr.path().is_ident("inject") {
            continue;
        }

        if attr.meta.require_path_only().is_ok() {
            return Ok(Some(None));
        }

        let mut binding = None;
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let value: LitStr = meta.value()?.parse()?;
                binding = Some(value.value());
                Ok(())
            } else {
                Err(meta.error("expected `name = \"...\"`"))
            }
        })?;
        return Ok(Some(binding));
    }
    Ok(None)
}

/// Collect every `#[component(expose = "...")]` type
fn parse_exposed(attrs: &[Attribute]) -> syn::Result<Vec<Type>> {
    let mut exposed = Vec::new();
    for attr in attrs {
        if !attr.path().is_ident("component") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("expose") {
                let value: LitStr = meta.value()?.parse()?;
                exposed.push(value.parse::<Type>()?);
                Ok(())
            } else {
                Err(meta.error("expected `expose = \"dyn Trait\"`"))
            }
        })?;
    }
    Ok(exposed)
}

/// Extract T from Arc<T>
fn extract_arc_inner_type(ty: &Type) -> Option<&Type> {
    if let Type::Path(type_path) = ty {
        let segment = type_path.path.segments.last()?;
        if segment.ident == "Arc" {
            if let syn::PathArguments::AngleBracketed(args) = &segment.arguments {
                if let Some(syn::GenericArgument::Type(inner)) = args.args.first() {
                    return Some(inner);
                }
            }
        }
    }
    None
}
