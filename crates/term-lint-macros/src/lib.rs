//! # term-lint-macros
//!
//! Procedural macros for term-lint.
//!
//! - `#[term_lint::ignore]` marks a type, trait, impl block or associated
//!   function as exempt from forbidden-term checks. It expands to the item
//!   unchanged; the marker is read back from source by the discovery.
//! - `term_lint::check!()` generates a `#[test]` running the check for the
//!   invoking crate.
//!
//! Use these through the `term-lint` facade crate, not directly.

#![forbid(unsafe_code)]

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::parse::{Parse, ParseStream};
use syn::{Expr, ExprLit, Lit, LitStr, MetaNameValue, Token};

/// Marks an item as exempt from forbidden-term checks.
///
/// Accepted forms:
///
/// ```rust,ignore
/// #[term_lint::ignore]
/// #[term_lint::ignore(reason = "name fixed by the wire format")]
/// ```
///
/// Any other argument is a compile error. The item itself is emitted as is.
#[proc_macro_attribute]
pub fn ignore(args: TokenStream, input: TokenStream) -> TokenStream {
    match parse_ignore_args(args.into()) {
        Ok(_) => input,
        Err(err) => {
            let mut output = err.to_compile_error();
            output.extend(TokenStream2::from(input));
            output.into()
        }
    }
}

/// Validates `ignore` arguments, returning the reason if one was given.
fn parse_ignore_args(args: TokenStream2) -> syn::Result<Option<String>> {
    if args.is_empty() {
        return Ok(None);
    }

    let meta: MetaNameValue = syn::parse2(args)?;
    if !meta.path.is_ident("reason") {
        return Err(syn::Error::new_spanned(
            &meta.path,
            "expected `reason = \"...\"`",
        ));
    }

    match &meta.value {
        Expr::Lit(ExprLit {
            lit: Lit::Str(reason),
            ..
        }) => {
            let reason = reason.value();
            if reason.trim().is_empty() {
                return Err(syn::Error::new_spanned(
                    &meta.value,
                    "reason must not be empty",
                ));
            }
            Ok(Some(reason))
        }
        other => Err(syn::Error::new_spanned(
            other,
            "reason must be a string literal",
        )),
    }
}

/// Generates a test that runs term-lint on the invoking crate.
///
/// ```rust,ignore
/// // tests/naming.rs
/// term_lint::check!();
/// term_lint::check!(config = "tests/term-lint.toml");
/// ```
///
/// Without `config`, `term-lint.toml` (or `.term-lint.toml`) in the crate's
/// manifest directory is used when present.
#[proc_macro]
pub fn check(input: TokenStream) -> TokenStream {
    match syn::parse::<CheckArgs>(input) {
        Ok(args) => expand_check(&args).into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// Arguments of `check!()`.
struct CheckArgs {
    config: Option<LitStr>,
}

impl Parse for CheckArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut config = None;

        while !input.is_empty() {
            let key: syn::Ident = input.parse()?;
            input.parse::<Token![=]>()?;
            let value: LitStr = input.parse()?;

            match key.to_string().as_str() {
                "config" => {
                    if config.is_some() {
                        return Err(syn::Error::new_spanned(key, "duplicate `config` argument"));
                    }
                    config = Some(value);
                }
                other => {
                    return Err(syn::Error::new_spanned(
                        &key,
                        format!("unknown argument `{other}`, expected `config`"),
                    ));
                }
            }

            if !input.is_empty() {
                input.parse::<Token![,]>()?;
            }
        }

        Ok(Self { config })
    }
}

fn expand_check(args: &CheckArgs) -> TokenStream2 {
    let config = match &args.config {
        Some(path) => quote!(::core::option::Option::Some(#path)),
        None => quote!(::core::option::Option::None),
    };

    quote! {
        #[test]
        fn term_lint_check() {
            ::term_lint::__internal::run_check(
                env!("CARGO_MANIFEST_DIR"),
                env!("CARGO_PKG_NAME"),
                #config,
            );
        }
    }
}
