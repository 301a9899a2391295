//! The `#[test]` attribute behind `diffed_testhelpers::test`.

use proc_macro2::TokenStream;
use unsynn::*;

keyword! {
    KFn = "fn";
}

unsynn! {
    // Attributes, visibility and qualifiers ahead of `fn`.
    struct Preamble {
        items: Any<Cons<Except<KFn>, TokenTree>>,
    }

    // Generics, arguments, return type and where clause.
    struct Signature {
        items: Any<Cons<Except<BraceGroup>, TokenTree>>,
    }

    struct Body {
        items: BraceGroup,
    }

    struct TestFn {
        preamble: Preamble, _fn: KFn, name: Ident,
        signature: Signature, body: Body
    }
}

impl quote::ToTokens for Preamble {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        self.items.to_tokens(tokens)
    }
}

impl quote::ToTokens for Signature {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        self.items.to_tokens(tokens)
    }
}

impl quote::ToTokens for Body {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        tokens.extend(self.items.0.stream())
    }
}

fn is_async(preamble: &Preamble) -> bool {
    let mut tokens = TokenStream::new();
    quote::ToTokens::to_tokens(preamble, &mut tokens);
    tokens
        .into_iter()
        .any(|tt| matches!(tt, proc_macro2::TokenTree::Ident(ident) if ident == "async"))
}

fn error(message: &str) -> proc_macro::TokenStream {
    quote::quote! { ::core::compile_error!(#message); }.into()
}

/// Marks a test that logs through the shared tracing subscriber.
///
/// The body runs inside an `info`-level `test` span carrying the function
/// name, after `diffed_testhelpers::setup()` has installed the subscriber.
/// Log lines from tests running in parallel can then be told apart.
///
/// ```ignore
/// use diffed_testhelpers::test;
///
/// #[test]
/// fn renders_hunks() {
///     // subscriber and colored backtraces are installed here
/// }
/// ```
///
/// Async tests name their harness as an argument, e.g.
/// `#[diffed_testhelpers::test(tokio::test)]`. Their body only gets
/// `setup()`, since an entered span must not be held across `.await`.
#[proc_macro_attribute]
pub fn test(
    attr: proc_macro::TokenStream,
    item: proc_macro::TokenStream,
) -> proc_macro::TokenStream {
    let item = TokenStream::from(item);
    let mut tokens = item.to_token_iter();
    let Ok(TestFn {
        preamble,
        _fn,
        name,
        signature,
        body,
    }) = tokens.parse::<TestFn>()
    else {
        return error("#[diffed_testhelpers::test] expects a function");
    };

    let is_async = is_async(&preamble);
    if is_async && attr.is_empty() {
        return error(
            "async tests need a harness, e.g. #[diffed_testhelpers::test(tokio::test)]",
        );
    }

    let harness = if attr.is_empty() {
        quote::quote! { #[::core::prelude::rust_2024::test] }
    } else {
        let attr = TokenStream::from(attr);
        quote::quote! { #[#attr] }
    };

    let enter = if is_async {
        quote::quote! { ::diffed_testhelpers::setup(); }
    } else {
        quote::quote! {
            let _span = ::diffed_testhelpers::enter(::core::stringify!(#name));
        }
    };

    quote::quote! {
        #harness
        #preamble fn #name #signature {
            #enter

            #body
        }
    }
    .into()
}
