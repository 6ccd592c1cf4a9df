/*!
Procedural macros for `uemacs`.
*/
#![warn(
    clippy::as_conversions,
    clippy::option_if_let_else,
    clippy::redundant_pub_crate,
    clippy::semicolon_if_nothing_returned,
    clippy::unused_self,
    clippy::unwrap_used,
    clippy::use_debug,
    clippy::use_self,
    clippy::wildcard_dependencies,
    missing_docs
)]

mod action;
mod register;

use proc_macro::TokenStream;

/// Derive (1) an iterator over the registered source code accessors, (2) re-exports of the
/// accessor types from their `actual::<name>` modules, and (3) construction of each accessor
/// from the loaded `Config`.
#[proc_macro_derive(Register)]
pub fn register(input: TokenStream) -> TokenStream {
    register::register(input)
}

/// Derive the subcommand name of every variant (its name in lowercase) as `name()`, plus one
/// public constant per variant, named after the variant in all caps.
#[proc_macro_derive(Action)]
pub fn action(input: TokenStream) -> TokenStream {
    action::action(input)
}
