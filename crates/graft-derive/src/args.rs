use darling::{
    FromMeta,
    ast::NestedMeta,
    util::{Flag, Override, PathList},
};
use proc_macro2::TokenStream;
use syn::{Attribute, Meta, Path};

///
/// TypeArgs
///
/// Arguments of `#[graph_type(..)]` and its aliases.
///

#[derive(Debug, Default, FromMeta)]
#[darling(default)]
pub struct TypeArgs {
    pub input: Flag,
    pub interface: Flag,
    pub description: Option<String>,
    pub implements: PathList,
    pub methods: Flag,
}

impl TypeArgs {
    pub fn parse(attr: TokenStream) -> Result<Self, darling::Error> {
        let items = NestedMeta::parse_meta_list(attr)?;

        Self::from_list(&items)
    }
}

///
/// Shape
///
/// Resolved kind flags after aliases have been applied.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct Shape {
    pub is_input: bool,
    pub is_interface: bool,
}

impl Shape {
    pub const INPUT: Self = Self {
        is_input: true,
        is_interface: false,
    };

    pub const INTERFACE: Self = Self {
        is_input: false,
        is_interface: true,
    };

    pub fn merge(self, args: &TypeArgs) -> Self {
        Self {
            is_input: self.is_input || args.input.is_present(),
            is_interface: self.is_interface || args.interface.is_present(),
        }
    }
}

///
/// FieldArgs
///
/// Arguments of the per-field `#[graph(..)]` marker.
///

#[derive(Debug, Default, FromMeta)]
#[darling(default)]
pub struct FieldArgs {
    pub name: Option<String>,
    pub description: Option<String>,
    pub resolver: Option<Path>,
    pub getter: Option<Path>,
    pub default: Option<Override<Path>>,
}

impl FieldArgs {
    /// True when the marker contributes a field descriptor.
    pub const fn has_descriptor(&self) -> bool {
        self.name.is_some() || self.description.is_some() || self.resolver.is_some()
    }
}

///
/// MethodArgs
///
/// Arguments of `#[graph_field(..)]` inside a `#[graph_fields]` block.
///

#[derive(Debug, Default, FromMeta)]
#[darling(default)]
pub struct MethodArgs {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Parse every attribute named `name` from a list, accepting the bare form.
/// Returns `None` when the attribute is absent.
pub fn parse_marker<T>(attrs: &[Attribute], name: &str) -> Result<Option<T>, darling::Error>
where
    T: FromMeta + Default,
{
    let mut found = None;

    for attr in attrs.iter().filter(|a| a.path().is_ident(name)) {
        if found.is_some() {
            return Err(darling::Error::custom(format!("duplicate #[{name}] attribute"))
                .with_span(attr));
        }

        let parsed = match &attr.meta {
            Meta::Path(_) => T::default(),
            meta => T::from_meta(meta)?,
        };
        found = Some(parsed);
    }

    Ok(found)
}
