//! # mame derive
//!
//! Procedural macros for the mame unit-test harness.
//!
//! This crate provides the `#[mame::test]` attribute that enables mame's
//! test discovery: the annotated function is left untouched and a
//! registration for it is submitted to the process-wide collection.
//!
//! The macro is re-exported by the main `mame` crate, so users typically
//! don't need to import this crate directly.

extern crate proc_macro;

use proc_macro::TokenStream;
use quote::quote;
use syn::ItemFn;

/// Marks a function as a mame test case.
///
/// The function keeps its exact shape; it must be a plain (non-async)
/// function taking `&mame::TestContext` and returning `mame::TestResult`.
/// The registered test name is the function name.
///
/// ```rust,ignore
/// #[mame::test]
/// fn parses_empty_input(t: &mame::TestContext) -> mame::TestResult {
///     mame::check_true!(t, parse("").is_ok());
///     Ok(())
/// }
/// ```
#[proc_macro_attribute]
pub fn test(args: TokenStream, input: TokenStream) -> TokenStream {
    match expand_test(args.into(), input.into()) {
        Ok(tokens) => tokens.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

fn expand_test(
    args: proc_macro2::TokenStream,
    input: proc_macro2::TokenStream,
) -> syn::Result<proc_macro2::TokenStream> {
    if !args.is_empty() {
        return Err(syn::Error::new_spanned(
            args,
            "#[mame::test] takes no arguments",
        ));
    }

    let input_fn: ItemFn = syn::parse2(input)?;

    if let Some(asyncness) = &input_fn.sig.asyncness {
        return Err(syn::Error::new_spanned(
            asyncness,
            "mame test functions are synchronous; remove `async`",
        ));
    }
    if input_fn.sig.inputs.len() != 1 {
        return Err(syn::Error::new_spanned(
            &input_fn.sig,
            "mame test functions take exactly one argument: &mame::TestContext",
        ));
    }

    let func_name = &input_fn.sig.ident;
    let test_name = func_name.to_string();

    Ok(quote! {
        #input_fn

        ::mame::inventory::submit! {
            ::mame::TestRegistration {
                name: #test_name,
                test_fn: #func_name,
            }
        }
    })
}
