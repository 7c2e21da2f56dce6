//! Defines Clutter runtime macros.

#![doc(test(
    no_crate_inject,
    attr(deny(warnings, rust_2018_idioms), allow(dead_code, unused_variables))
))]

extern crate proc_macro;

use proc_macro::TokenStream;

mod helpers;
mod runtime_macro;

/// Macro definition for the Clutter runtime.
///
/// This macro should be used once only in a project.
///
/// _Runs the async function on a tokio runtime and waits for every task spawned through
/// `clutter::utils::task::run` (a playing timeline, event callbacks) before returning._
///
/// # Example
/// ```
/// #[clutter::runtime]
/// async fn main() {
///     // whatever
/// }
/// ```
#[proc_macro_attribute]
pub fn runtime(_: TokenStream, item: TokenStream) -> TokenStream {
    runtime_macro::runtime_macro(item, false)
}

/// Same as `#[clutter::runtime]` but for tests.
#[proc_macro_attribute]
pub fn test(_: TokenStream, item: TokenStream) -> TokenStream {
    runtime_macro::runtime_macro(item, true)
}
