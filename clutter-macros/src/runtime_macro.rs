use proc_macro::TokenStream;

use quote::quote;
use syn::{parse_macro_input, ItemFn, ReturnType, Stmt};

use crate::helpers::{clutter_crate_path, tokio_crate_path};

/// See `#[clutter_macros::runtime]` for details.
pub fn runtime_macro(item: TokenStream, test: bool) -> TokenStream {
    let clutter = clutter_crate_path();
    let tokio_path = tokio_crate_path();

    let input = parse_macro_input!(item as ItemFn);
    let ItemFn {
        attrs,
        vis,
        sig,
        block,
    } = input;

    if sig.asyncness.is_none() {
        return syn::Error::new_spanned(sig.fn_token, "the `async` keyword is missing")
            .to_compile_error()
            .into();
    }

    let mut stmts = block.stmts;

    // Check if the function has an explicit return type
    let has_return_type = match &sig.output {
        ReturnType::Default => false,
        ReturnType::Type(_, ty) => match &**ty {
            syn::Type::Tuple(tuple) if tuple.elems.is_empty() => false,
            _ => true,
        },
    };

    // The trailing expression is the return value: it must run after every task is done.
    let return_expr = if has_return_type {
        match stmts.pop() {
            Some(Stmt::Expr(expr, None)) => Some(expr),
            Some(stmt) => {
                stmts.push(stmt);
                None
            }
            None => None,
        }
    } else {
        None
    };

    let tokio_main_attr = match test {
        true => quote! {#[#clutter::utils::tokio::test(crate = #tokio_path)]},
        false => quote! {#[#clutter::utils::tokio::main(crate = #tokio_path)]},
    };

    let mut body = vec![quote! {
        #clutter::utils::task::init_task_channel().await;
    }];

    body.extend(stmts.into_iter().map(|stmt| match stmt {
        // A trailing unit "()" would be returned too early.
        Stmt::Expr(syn::Expr::Tuple(ref tuple), _) if tuple.elems.is_empty() => quote!(),
        _ => quote! { #stmt },
    }));

    body.push(quote! {
        #clutter::utils::task::wait_for_tasks().await;
    });

    if let Some(return_stmt) = return_expr {
        body.push(quote! { #return_stmt });
    }

    let expanded = quote! {
        #tokio_main_attr
        #(#attrs)*
        #vis #sig {
            #(#body)*
        }
    };

    TokenStream::from(expanded)
}
