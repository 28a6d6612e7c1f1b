use crate::{
    args::{FieldArgs, Shape, TypeArgs, parse_marker},
    helper::{doc_string, strip_attrs},
};
use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};
use syn::{Error, Fields, Ident, Item, ItemStruct, LitStr, Type, ext::IdentExt, spanned::Spanned};

/// Expand a decorated struct.
pub fn expand(attr: TokenStream, item: TokenStream, shape: Shape) -> TokenStream {
    // Phase 1: parse inputs.
    let args = match TypeArgs::parse(attr) {
        Ok(args) => args,
        Err(err) => return err.write_errors(),
    };
    let item = match syn::parse2::<Item>(item) {
        Ok(Item::Struct(item)) => item,
        Ok(other) => {
            return Error::new(other.span(), "graph types must be structs with named fields")
                .to_compile_error();
        }
        Err(err) => return err.to_compile_error(),
    };

    match RecordGen::new(args, shape, item) {
        Ok(record) => record.generate(),
        Err(err) => err.write_errors(),
    }
}

///
/// FieldGen
///

struct FieldGen {
    ident: Ident,
    key: String,
    ty: Type,
    args: FieldArgs,
}

///
/// RecordGen
///

struct RecordGen {
    item: ItemStruct,
    args: TypeArgs,
    shape: Shape,
    doc: Option<String>,
    fields: Vec<FieldGen>,
}

impl RecordGen {
    fn new(args: TypeArgs, shape: Shape, mut item: ItemStruct) -> Result<Self, darling::Error> {
        // Phase 2: validate the struct shape.
        if !item.generics.params.is_empty() {
            return Err(darling::Error::custom("graph types cannot be generic")
                .with_span(&item.generics));
        }
        let Fields::Named(named) = &mut item.fields else {
            return Err(darling::Error::custom(
                "graph types must be structs with named fields",
            )
            .with_span(&item.fields));
        };

        // Phase 3: collect field markers and strip them from the output.
        let mut errors = darling::Error::accumulator();
        let mut fields = Vec::with_capacity(named.named.len());

        for field in &mut named.named {
            let Some(ident) = field.ident.clone() else {
                continue;
            };
            let args = errors
                .handle(parse_marker::<FieldArgs>(&field.attrs, "graph"))
                .flatten()
                .unwrap_or_default();

            if let Some(getter) = args.getter.as_ref().filter(|g| g.get_ident().is_none()) {
                errors.push(
                    darling::Error::custom("`getter` must name a method on the struct")
                        .with_span(getter),
                );
            }
            if args.resolver.is_some() && args.getter.is_some() {
                errors.push(
                    darling::Error::custom("`resolver` and `getter` cannot be combined")
                        .with_span(&ident),
                );
            }

            strip_attrs(&mut field.attrs, "graph");
            if let Some(default) = &args.default {
                field.attrs.push(serde_default_attr(default));
            }

            fields.push(FieldGen {
                key: ident.unraw().to_string(),
                ident,
                ty: field.ty.clone(),
                args,
            });
        }
        errors.finish()?;

        let doc = doc_string(&item.attrs);
        let shape = shape.merge(&args);

        Ok(Self {
            item,
            args,
            shape,
            doc,
            fields,
        })
    }

    // Phase 4: emit the struct and its impls.
    fn generate(&self) -> TokenStream {
        let item = &self.item;
        let ident = &item.ident;

        let instance = self.instance_impl();
        let record = self.record_impl();
        let ctor = self.ctor_tokens();

        quote! {
            #[derive(
                Clone,
                Debug,
                PartialEq,
                ::graft::__reexports::serde::Serialize,
                ::graft::__reexports::serde::Deserialize,
            )]
            #[serde(crate = "::graft::__reexports::serde")]
            #item

            impl ::graft::schema::types::GraphValue for #ident {
                fn type_ref() -> ::graft::schema::types::TypeRef {
                    ::graft::schema::types::TypeRef::named(
                        <Self as ::graft::schema::record::Record>::NAME,
                    )
                    .non_null()
                }
            }

            #instance
            #record
            #ctor
        }
    }

    fn instance_impl(&self) -> TokenStream {
        let ident = &self.item.ident;

        let arms = self.fields.iter().map(|field| {
            let field_ident = &field.ident;
            let key = &field.key;

            match &field.args.getter {
                Some(getter) => quote_spanned! { getter.span() =>
                    #key => ::core::result::Result::Ok(
                        ::core::convert::Into::<::graft::schema::resolver::Attribute>::into(
                            self.#getter(),
                        ),
                    ),
                },
                None => quote! {
                    #key => ::graft::schema::resolver::Attribute::value(&self.#field_ident),
                },
            }
        });

        quote! {
            impl ::graft::schema::record::Instance for #ident {
                fn attribute(
                    &self,
                    name: &str,
                ) -> ::core::result::Result<
                    ::graft::schema::resolver::Attribute,
                    ::graft::schema::error::ResolveError,
                > {
                    match name {
                        #(#arms)*
                        _ => ::core::result::Result::Err(
                            ::graft::schema::error::ResolveError::UnknownAttribute {
                                type_name: <Self as ::graft::schema::record::Record>::NAME
                                    .to_string(),
                                attribute: name.to_string(),
                            },
                        ),
                    }
                }
            }
        }
    }

    fn record_impl(&self) -> TokenStream {
        let ident = &self.item.ident;
        let name = LitStr::new(&ident.to_string(), ident.span());

        let doc = self.doc.as_ref().map(|doc| quote!(.doc(#doc)));
        let fields = self.fields.iter().map(declared_field);
        let supertypes = self.args.implements.iter().map(|path| {
            quote!(.supertype(<#path as ::graft::schema::record::Record>::NAME))
        });
        // `methods` requires a #[graph_fields] block; without it one is used if present
        let manual = if self.args.methods.is_present() {
            quote! {
                .extend_manual_fields(
                    <Self as ::graft::schema::record::ManualFields>::manual_fields(),
                )
            }
        } else {
            quote! {
                .extend_manual_fields({
                    use ::graft::schema::record::{FromManualFields as _, NoManualFields as _};

                    (&::graft::schema::record::ManualFieldSource::<Self>::new())
                        .collect_manual_fields()
                })
            }
        };

        let is_input = self.shape.is_input;
        let is_interface = self.shape.is_interface;
        let description = match &self.args.description {
            Some(d) => quote!(::core::option::Option::Some(#d.to_string())),
            None => quote!(::core::option::Option::None),
        };

        // decorate listed supertypes first so interface lookup finds them
        let force_supertypes = self.args.implements.iter().map(|path| {
            quote!(<#path as ::graft::schema::record::Record>::graph_type();)
        });

        quote! {
            impl ::graft::schema::record::Record for #ident {
                const NAME: &'static str = #name;

                #[allow(unused_imports, clippy::needless_borrow)]
                fn definition() -> ::graft::schema::record::RecordDefinition {
                    ::graft::schema::record::RecordDefinition::for_record::<Self>()
                        #doc
                        #(#fields)*
                        #(#supertypes)*
                        #manual
                }

                fn options() -> ::graft::schema::TypeOptions {
                    ::graft::schema::TypeOptions {
                        is_input: #is_input,
                        is_interface: #is_interface,
                        description: #description,
                    }
                }

                fn graph_type() -> ::std::sync::Arc<::graft::schema::GraphType> {
                    static GRAPH_TYPE: ::std::sync::OnceLock<
                        ::std::sync::Arc<::graft::schema::GraphType>,
                    > = ::std::sync::OnceLock::new();

                    ::std::sync::Arc::clone(GRAPH_TYPE.get_or_init(|| {
                        #(#force_supertypes)*

                        ::graft::schema::decorate(
                            <Self as ::graft::schema::record::Record>::definition(),
                            <Self as ::graft::schema::record::Record>::options(),
                        )
                    }))
                }
            }
        }
    }

    fn ctor_tokens(&self) -> TokenStream {
        let ident = &self.item.ident;

        quote! {
            #[cfg(not(target_arch = "wasm32"))]
            #[::graft::__reexports::ctor::ctor(unsafe, anonymous, crate_path = ::graft::__reexports::ctor)]
            fn __ctor() {
                <#ident as ::graft::schema::record::Record>::graph_type();
            }
        }
    }
}

fn declared_field(field: &FieldGen) -> TokenStream {
    let key = &field.key;
    let ty = &field.ty;
    let type_ref = quote!(<#ty as ::graft::schema::types::GraphValue>::type_ref());

    let descriptor = field.args.has_descriptor().then(|| {
        let name = field
            .args
            .name
            .as_ref()
            .map(|name| quote!(.with_name(#name)));
        let description = field
            .args
            .description
            .as_ref()
            .map(|d| quote!(.with_description(#d)));
        let resolver = field.args.resolver.as_ref().map(|path| {
            quote! {
                .with_resolver(::graft::schema::resolver::Resolver::new(#type_ref, #path))
            }
        });

        quote! {
            .descriptor(
                ::graft::schema::field::FieldDescriptor::new()
                    #name
                    #description
                    #resolver
            )
        }
    });

    quote! {
        .field(
            ::graft::schema::record::DeclaredField::new(#key, #type_ref)
                #descriptor
        )
    }
}

fn serde_default_attr(default: &darling::util::Override<syn::Path>) -> syn::Attribute {
    match default {
        darling::util::Override::Inherit => syn::parse_quote!(#[serde(default)]),
        darling::util::Override::Explicit(path) => {
            let path = LitStr::new(&quote!(#path).to_string().replace(' ', ""), path.span());
            syn::parse_quote!(#[serde(default = #path)])
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    fn expand_struct(attr: TokenStream, item: TokenStream) -> String {
        expand(attr, item, Shape::default()).to_string()
    }

    fn assert_rejected(output: &str, message: &str) {
        assert!(output.contains("compile_error"), "{output}");
        assert!(output.contains(message), "{output}");
    }

    #[test]
    fn non_structs_are_rejected() {
        let output = expand_struct(quote!(), quote!(enum Color { Red, Green }));

        assert_rejected(&output, "graph types must be structs with named fields");
    }

    #[test]
    fn tuple_structs_are_rejected() {
        let output = expand_struct(quote!(), quote!(struct Id(String);));

        assert_rejected(&output, "graph types must be structs with named fields");
    }

    #[test]
    fn generic_structs_are_rejected() {
        let output = expand_struct(quote!(), quote!(struct Page<T> { items: Vec<T> }));

        assert_rejected(&output, "graph types cannot be generic");
    }

    #[test]
    fn resolver_and_getter_are_exclusive() {
        let output = expand_struct(
            quote!(),
            quote! {
                struct Greeter {
                    #[graph(resolver = shout, getter = loud)]
                    name: String,
                }
            },
        );

        assert_rejected(&output, "`resolver` and `getter` cannot be combined");
    }

    #[test]
    fn getter_must_be_a_bare_method_name() {
        let output = expand_struct(
            quote!(),
            quote! {
                struct Greeter {
                    #[graph(getter = util::loud)]
                    name: String,
                }
            },
        );

        assert_rejected(&output, "`getter` must name a method on the struct");
    }

    #[test]
    fn unknown_type_arguments_are_rejected() {
        let output = expand_struct(quote!(bogus), quote!(struct Person { name: String }));

        assert_rejected(&output, "bogus");
    }

    #[test]
    fn duplicate_field_markers_are_rejected() {
        let output = expand_struct(
            quote!(),
            quote! {
                struct Person {
                    #[graph]
                    #[graph(name = "label")]
                    name: String,
                }
            },
        );

        assert_rejected(&output, "duplicate #[graph] attribute");
    }

    #[test]
    fn raw_field_names_key_without_prefix() {
        let output = expand_struct(quote!(), quote!(struct Tagged { r#type: String }));

        assert!(!output.contains("compile_error"), "{output}");
        assert!(output.contains("\"type\" =>"), "{output}");
        assert!(!output.contains("\"r#type\""), "{output}");
    }

    #[test]
    fn methods_flag_requires_a_fields_block() {
        let with_flag = expand_struct(quote!(methods), quote!(struct Person { name: String }));
        let without = expand_struct(quote!(), quote!(struct Person { name: String }));

        assert!(with_flag.contains("ManualFields >"), "{with_flag}");
        assert!(!with_flag.contains("ManualFieldSource"), "{with_flag}");
        assert!(without.contains("ManualFieldSource"), "{without}");
    }
}
