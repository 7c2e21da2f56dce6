extern crate proc_macro;

use proc_macro2::TokenStream;
use quote::quote;

/// Determines what crate name should be used to refer to `clutter`.
/// crate::... or clutter::... depending.
pub fn clutter_crate_path() -> TokenStream {
    match is_internal() {
        true => quote!(crate),
        false => quote!(clutter),
    }
}

/// Same as [`clutter_crate_path`] but as the string form expected by `#[tokio::test(crate = "...")]`.
pub fn tokio_crate_path() -> String {
    match is_internal() {
        true => String::from("crate::utils::tokio"),
        false => String::from("clutter::utils::tokio"),
    }
}

fn is_internal() -> bool {
    let is_internal = std::env::var("CARGO_CRATE_NAME")
        .map(|pkg_name| pkg_name == "clutter")
        .unwrap_or_default();

    #[cfg(doctest)]
    let is_internal = false;

    is_internal
}
