//! Attribute macros that turn plain structs into decorated graph types.
//!
//! Generated code refers to the `graft` facade crate only.

use proc_macro::TokenStream;

mod args;
mod helper;
mod methods;
mod record;

use args::Shape;

/// Decorate a struct as an object type, or as an input/interface type when
/// configured with `input` or `interface`.
#[proc_macro_attribute]
pub fn graph_type(attr: TokenStream, item: TokenStream) -> TokenStream {
    record::expand(attr.into(), item.into(), Shape::default()).into()
}

/// Shorthand for `#[graph_type(input)]`.
#[proc_macro_attribute]
pub fn graph_input(attr: TokenStream, item: TokenStream) -> TokenStream {
    record::expand(attr.into(), item.into(), Shape::INPUT).into()
}

/// Shorthand for `#[graph_type(interface)]`.
#[proc_macro_attribute]
pub fn graph_interface(attr: TokenStream, item: TokenStream) -> TokenStream {
    record::expand(attr.into(), item.into(), Shape::INTERFACE).into()
}

/// Turn `#[graph_field]` methods of an inherent impl block into manual
/// schema fields.
#[proc_macro_attribute]
pub fn graph_fields(attr: TokenStream, item: TokenStream) -> TokenStream {
    methods::expand(attr.into(), item.into()).into()
}
