//! Declaration macros for ncore types.
//!
//! Provides the `#[object_type]` attribute and the `primitive_type!` macro.
//! Both generate the same three pieces for a named type:
//! 1. A `'static` type descriptor and the `TypeOf` impl returning its token
//! 2. The capability traits (`ObjectType`/`IsA` or `Primitive`)
//! 3. An unmangled `<Name>TypeOf` C export that writes the token through an
//!    output pointer
//!
//! Generated code refers to the core crate as `::ncore`.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::{Attribute, Ident, ItemEnum, Path, Token, Type, parse_macro_input};

/// Declares an opaque object type.
///
/// Applied to an uninhabited enum that serves as the type's marker. The
/// argument lists the full ancestor chain, direct base first, ending at the
/// root `NObject`. The chain is checked at compile time: each entry's
/// declared base must be the entry that follows it.
///
/// # Example
///
/// ```ignore
/// #[object_type(extends(NObjectPart, NObject))]
/// pub enum NBiometricPart {}
///
/// pub type HNBiometricPart = Handle<NBiometricPart>;
/// ```
#[proc_macro_attribute]
pub fn object_type(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as ObjectTypeArgs);
    let marker = parse_macro_input!(item as ItemEnum);

    expand_object_type(&args, &marker)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Declares the type identity of a by-value primitive.
///
/// `primitive_type!(NInt32 = i32)` introduces the alias `NInt32` and attaches
/// the identity to `i32`. `primitive_type!(NBoolean)` attaches it to an
/// existing type of that name.
///
/// The target type must be `Copy` and valid for every bit pattern of its
/// size, since aligned storage reinterprets raw bytes as the declared type.
#[proc_macro]
pub fn primitive_type(input: TokenStream) -> TokenStream {
    let args = parse_macro_input!(input as PrimitiveTypeArgs);
    expand_primitive_type(&args).into()
}

// --------------------------------------------------------------------------
// Argument parsing
// --------------------------------------------------------------------------

struct ObjectTypeArgs {
    ancestors: Vec<Path>,
}

impl Parse for ObjectTypeArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let keyword: Ident = input.parse()?;
        if keyword != "extends" {
            return Err(syn::Error::new(
                keyword.span(),
                "expected `extends(Base, ..., NObject)`",
            ));
        }

        let content;
        syn::parenthesized!(content in input);
        let ancestors: Punctuated<Path, Token![,]> = Punctuated::parse_terminated(&content)?;
        if ancestors.is_empty() {
            return Err(syn::Error::new(
                keyword.span(),
                "`extends` must list at least the root type `NObject`",
            ));
        }

        Ok(Self {
            ancestors: ancestors.into_iter().collect(),
        })
    }
}

struct PrimitiveTypeArgs {
    attrs: Vec<Attribute>,
    name: Ident,
    repr: Option<Type>,
}

impl Parse for PrimitiveTypeArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let attrs = input.call(Attribute::parse_outer)?;
        let name: Ident = input.parse()?;
        let repr = if input.peek(Token![=]) {
            input.parse::<Token![=]>()?;
            Some(input.parse()?)
        } else {
            None
        };
        if input.peek(Token![;]) {
            input.parse::<Token![;]>()?;
        }

        Ok(Self { attrs, name, repr })
    }
}

// --------------------------------------------------------------------------
// Expansion
// --------------------------------------------------------------------------

fn expand_object_type(args: &ObjectTypeArgs, marker: &ItemEnum) -> syn::Result<TokenStream2> {
    if !marker.variants.is_empty() {
        return Err(syn::Error::new_spanned(
            &marker.variants,
            "object type markers must be uninhabited enums",
        ));
    }
    if !marker.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &marker.generics,
            "object type markers cannot be generic",
        ));
    }

    let (Some(base), Some(root)) = (args.ancestors.first(), args.ancestors.last()) else {
        return Err(syn::Error::new_spanned(
            &marker.ident,
            "`extends` must list at least the root type `NObject`",
        ));
    };

    let name = &marker.ident;
    let name_str = name.to_string();
    let ancestors = &args.ancestors;

    let chain_checks = ancestors.windows(2).map(|pair| {
        let (child, parent) = (&pair[0], &pair[1]);
        quote! { ::ncore::__private::assert_base::<#child, #parent>(); }
    });

    let export = type_of_export(name, &quote!(#name));

    Ok(quote! {
        #marker

        impl ::ncore::TypeOf for #name {
            fn type_of() -> ::ncore::HNType {
                static DESCRIPTOR: ::ncore::TypeDescriptor = ::ncore::TypeDescriptor::object(
                    #name_str,
                    <#base as ::ncore::TypeOf>::type_of as fn() -> ::ncore::HNType,
                );
                ::ncore::HNType::from_descriptor(&DESCRIPTOR)
            }
        }

        impl ::ncore::ObjectType for #name {
            type Base = #base;
        }

        unsafe impl ::ncore::IsA<#name> for #name {}
        #( unsafe impl ::ncore::IsA<#ancestors> for #name {} )*

        const _: fn() = || {
            #( #chain_checks )*
            ::ncore::__private::assert_root::<#root>();
        };

        #export
    })
}

fn expand_primitive_type(args: &PrimitiveTypeArgs) -> TokenStream2 {
    let name = &args.name;
    let name_str = name.to_string();
    let attrs = &args.attrs;

    let (alias, target) = match &args.repr {
        Some(ty) => (
            quote! {
                #( #attrs )*
                pub type #name = #ty;
            },
            quote!(#ty),
        ),
        None => (TokenStream2::new(), quote!(#name)),
    };

    let export = type_of_export(name, &target);

    quote! {
        #alias

        impl ::ncore::TypeOf for #target {
            fn type_of() -> ::ncore::HNType {
                static DESCRIPTOR: ::ncore::TypeDescriptor = ::ncore::TypeDescriptor::primitive(
                    #name_str,
                    ::core::mem::size_of::<#target>(),
                    ::core::mem::align_of::<#target>(),
                );
                ::ncore::HNType::from_descriptor(&DESCRIPTOR)
            }
        }

        unsafe impl ::ncore::Primitive for #target {}

        #export
    }
}

/// The `<Name>TypeOf(HNType *) -> NResult` C export.
fn type_of_export(name: &Ident, target: &TokenStream2) -> TokenStream2 {
    let export = format_ident!("{}TypeOf", name);
    let doc = format!("Writes the type token of `{name}` to `ph_value`.");

    quote! {
        #[doc = #doc]
        ///
        /// # Safety
        ///
        /// `ph_value` must be null or valid for a write of one `HNType`.
        #[allow(non_snake_case)]
        #[unsafe(no_mangle)]
        pub unsafe extern "C" fn #export(ph_value: *mut ::ncore::HNType) -> ::ncore::NResult {
            // SAFETY: the pointer contract is forwarded to our caller.
            unsafe { ::ncore::ffi::write_type_of::<#target>(ph_value) }
        }
    }
}
