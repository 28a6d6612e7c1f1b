use crate::{resolver::Resolver, types::TypeRef, wire::WireField};

///
/// FieldDescriptor
///
/// Per-field metadata: external name override, description, optional
/// resolver and whether the field belongs to an input type.
///

#[derive(Clone, Debug, Default)]
pub struct FieldDescriptor {
    name: Option<String>,
    description: Option<String>,
    resolver: Option<Resolver>,
    is_input: bool,
}

impl FieldDescriptor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_resolver(mut self, resolver: Resolver) -> Self {
        self.resolver = Some(resolver);
        self
    }

    #[must_use]
    pub const fn with_input(mut self, is_input: bool) -> Self {
        self.is_input = is_input;
        self
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub const fn resolver(&self) -> Option<&Resolver> {
        self.resolver.as_ref()
    }

    #[must_use]
    pub const fn is_input(&self) -> bool {
        self.is_input
    }

    /// Build the wire field for an already converted type.
    ///
    /// Input fields carry no resolver on the wire.
    #[must_use]
    pub fn wire_field(&self, ty: TypeRef) -> WireField {
        let resolver = if self.is_input {
            None
        } else {
            self.resolver.clone()
        };

        WireField::new(ty, self.description.clone(), resolver)
    }
}

/// Field-descriptor factory used by the synthesizer.
#[must_use]
pub fn field(resolver: Resolver, is_input: bool, description: Option<String>) -> FieldDescriptor {
    FieldDescriptor {
        name: None,
        description,
        resolver: Some(resolver),
        is_input,
    }
}

///
/// TESTS
///
