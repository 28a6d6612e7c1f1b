use crate::{
    args::{MethodArgs, parse_marker},
    helper::strip_attrs,
};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{
    Error, FnArg, ImplItem, ImplItemFn, ItemImpl, ReturnType, Type, ext::IdentExt,
    spanned::Spanned,
};

/// Expand a `#[graph_fields]` impl block.
pub fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    // Phase 1: parse inputs.
    if !attr.is_empty() {
        return Error::new(attr.span(), "#[graph_fields] takes no arguments").to_compile_error();
    }
    let mut block = match syn::parse2::<ItemImpl>(item) {
        Ok(block) => block,
        Err(err) => return err.to_compile_error(),
    };
    if let Some((_, path, _)) = &block.trait_ {
        return Error::new(path.span(), "#[graph_fields] belongs on an inherent impl block")
            .to_compile_error();
    }

    // Phase 2: collect marked methods.
    let mut errors = darling::Error::accumulator();
    let mut fields = Vec::new();

    for impl_item in &mut block.items {
        let ImplItem::Fn(method) = impl_item else {
            continue;
        };
        let Some(args) = errors
            .handle(parse_marker::<MethodArgs>(&method.attrs, "graph_field"))
            .flatten()
        else {
            continue;
        };
        strip_attrs(&mut method.attrs, "graph_field");

        if let Some(field) = errors.handle(manual_field(method, &args)) {
            fields.push(field);
        }
    }
    if let Err(err) = errors.finish() {
        return err.write_errors();
    }

    // Phase 3: emit the block and the manual field list.
    let self_ty = &block.self_ty;

    quote! {
        #block

        impl ::graft::schema::record::ManualFields for #self_ty {
            fn manual_fields() -> ::std::vec::Vec<::graft::schema::record::ManualField> {
                ::std::vec![#(#fields),*]
            }
        }
    }
}

// manual_field
// one ManualField expression for a marked method
fn manual_field(method: &ImplItemFn, args: &MethodArgs) -> Result<TokenStream, darling::Error> {
    let sig = &method.sig;
    let ident = &sig.ident;
    let key = ident.unraw().to_string();

    let mut inputs = sig.inputs.iter();
    match inputs.next() {
        Some(FnArg::Receiver(receiver))
            if receiver.reference.is_some() && receiver.mutability.is_none() => {}
        _ => {
            return Err(darling::Error::custom("graph fields must take `&self`").with_span(sig));
        }
    }
    let takes_context = match inputs.next() {
        None => false,
        Some(FnArg::Typed(arg)) if matches!(*arg.ty, Type::Reference(_)) => true,
        Some(other) => {
            return Err(darling::Error::custom(
                "graph fields take `&self` and optionally `&Context`",
            )
            .with_span(other));
        }
    };
    if let Some(extra) = inputs.next() {
        return Err(darling::Error::custom("too many arguments for a graph field").with_span(extra));
    }

    let ReturnType::Type(_, ret) = &sig.output else {
        return Err(darling::Error::custom("graph fields must return a value").with_span(sig));
    };

    let call = if takes_context {
        quote!(this.#ident(ctx))
    } else {
        quote!(this.#ident())
    };
    let ctx = if takes_context {
        quote!(ctx)
    } else {
        quote!(_ctx)
    };
    let name = args.name.as_ref().map(|name| quote!(.with_name(#name)));
    let description = args
        .description
        .as_ref()
        .map(|d| quote!(.with_description(#d)));

    Ok(quote! {
        ::graft::schema::record::ManualField::new(
            #key,
            ::graft::schema::resolver::Resolver::new(
                <#ret as ::graft::schema::types::GraphValue>::type_ref(),
                |parent, #ctx| {
                    let this = <Self as ::graft::schema::record::Record>::from_parent(parent)?;
                    let value = #call;

                    ::core::result::Result::Ok(::graft::__reexports::serde_json::to_value(value)?)
                },
            ),
        )
        #name
        #description
    })
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_rejected(output: &TokenStream, message: &str) {
        let output = output.to_string();

        assert!(output.contains("compile_error"), "{output}");
        assert!(output.contains(message), "{output}");
    }

    fn expand_method(method: TokenStream) -> TokenStream {
        expand(quote!(), quote!(impl Person { #method }))
    }

    #[test]
    fn block_takes_no_arguments() {
        let output = expand(quote!(rename), quote!(impl Person {}));

        assert_rejected(&output, "#[graph_fields] takes no arguments");
    }

    #[test]
    fn trait_impls_are_rejected() {
        let output = expand(quote!(), quote!(impl Default for Person { }));

        assert_rejected(&output, "#[graph_fields] belongs on an inherent impl block");
    }

    #[test]
    fn receiver_must_be_shared_self() {
        for method in [
            quote!(#[graph_field] fn grow(&mut self) -> i32 { 0 }),
            quote!(#[graph_field] fn consume(self) -> i32 { 0 }),
            quote!(#[graph_field] fn make() -> i32 { 0 }),
        ] {
            assert_rejected(&expand_method(method), "graph fields must take `&self`");
        }
    }

    #[test]
    fn second_argument_must_be_a_reference() {
        let output = expand_method(quote!(#[graph_field] fn nth(&self, n: usize) -> i32 { 0 }));

        assert_rejected(&output, "graph fields take `&self` and optionally `&Context`");
    }

    #[test]
    fn extra_arguments_are_rejected() {
        let output = expand_method(quote! {
            #[graph_field]
            fn label(&self, ctx: &Context, prefix: &str) -> String { String::new() }
        });

        assert_rejected(&output, "too many arguments for a graph field");
    }

    #[test]
    fn unit_return_is_rejected() {
        let output = expand_method(quote!(#[graph_field] fn touch(&self) {}));

        assert_rejected(&output, "graph fields must return a value");
    }

    #[test]
    fn marked_methods_become_manual_fields() {
        let output = expand(
            quote!(),
            quote! {
                impl Person {
                    #[graph_field(description = "Shouted")]
                    fn r#type(&self, ctx: &Context) -> String { String::new() }

                    fn helper(&self) -> i32 { 0 }
                }
            },
        )
        .to_string();

        assert!(!output.contains("compile_error"), "{output}");
        assert!(!output.contains("graph_field"), "{output}");
        assert!(output.contains("\"type\""), "{output}");
        assert!(output.contains("\"Shouted\""), "{output}");
        assert!(!output.contains("\"helper\""), "{output}");
    }
}
