use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, ItemFn};

/// Instrument a function with a [`tracing`] span.
///
/// Equivalent to `#[tracing::instrument(ret(level = "trace"), ...)]`, but
/// additionally emits a `call` event at trace level when the function is
/// entered. Any arguments are forwarded to `tracing::instrument`.
#[proc_macro_attribute]
pub fn trace_instrument(meta: TokenStream, input: TokenStream) -> TokenStream {
    let meta = proc_macro2::TokenStream::from(meta);
    let ItemFn {
        attrs,
        vis,
        sig,
        block,
    } = parse_macro_input!(input as ItemFn);

    let instrument = if meta.is_empty() {
        quote! { #[::tracing::instrument(ret(level = "trace"))] }
    } else {
        quote! { #[::tracing::instrument(ret(level = "trace"), #meta)] }
    };

    quote! {
        #instrument
        #(#attrs)*
        #vis #sig {
            ::tracing::trace!("call");
            #block
        }
    }
    .into()
}
