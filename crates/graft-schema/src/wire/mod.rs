//! Wire schema-type constructs: the objects a query engine would consume.
//!
//! All three constructs share a core of name, description and a lazily
//! built field table; only objects carry an interface list.

mod lazy;

pub use lazy::{FieldThunk, LazyFields};

use crate::{error::SchemaError, kind::Kind, resolver::Resolver, types::TypeRef};
use std::{collections::BTreeMap, sync::Arc};

/// External field name to wire field.
pub type FieldTable = BTreeMap<String, WireField>;

///
/// WireField
///

#[derive(Clone, Debug)]
pub struct WireField {
    ty: TypeRef,
    description: Option<String>,
    resolver: Option<Resolver>,
}

impl WireField {
    #[must_use]
    pub const fn new(ty: TypeRef, description: Option<String>, resolver: Option<Resolver>) -> Self {
        Self {
            ty,
            description,
            resolver,
        }
    }

    #[must_use]
    pub const fn ty(&self) -> &TypeRef {
        &self.ty
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub const fn resolver(&self) -> Option<&Resolver> {
        self.resolver.as_ref()
    }
}

///
/// TypeCore
///

#[derive(Debug)]
struct TypeCore {
    name: String,
    description: Option<String>,
    fields: LazyFields,
}

impl TypeCore {
    fn new(name: String, thunk: FieldThunk, description: Option<String>) -> Arc<Self> {
        Arc::new(Self {
            fields: LazyFields::new(name.clone(), thunk),
            name,
            description,
        })
    }
}

macro_rules! wire_accessors {
    ($ty:ident) => {
        impl $ty {
            #[must_use]
            pub fn name(&self) -> &str {
                &self.core.name
            }

            #[must_use]
            pub fn description(&self) -> Option<&str> {
                self.core.description.as_deref()
            }

            /// Build the field table on first access.
            pub fn fields(&self) -> Result<&FieldTable, SchemaError> {
                self.core.fields.get()
            }

            #[must_use]
            pub fn fields_built(&self) -> bool {
                self.core.fields.is_built()
            }

            /// True when both handles point at the same construct.
            #[must_use]
            pub fn same_type(&self, other: &Self) -> bool {
                Arc::ptr_eq(&self.core, &other.core)
            }
        }
    };
}

///
/// ObjectType
///

#[derive(Clone, Debug)]
pub struct ObjectType {
    core: Arc<TypeCore>,
    interfaces: Arc<[InterfaceType]>,
}

impl ObjectType {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        thunk: FieldThunk,
        description: Option<String>,
        interfaces: Vec<InterfaceType>,
    ) -> Self {
        Self {
            core: TypeCore::new(name.into(), thunk, description),
            interfaces: interfaces.into(),
        }
    }

    #[must_use]
    pub fn interfaces(&self) -> &[InterfaceType] {
        &self.interfaces
    }
}

wire_accessors!(ObjectType);

///
/// InputObjectType
///

#[derive(Clone, Debug)]
pub struct InputObjectType {
    core: Arc<TypeCore>,
}

impl InputObjectType {
    #[must_use]
    pub fn new(name: impl Into<String>, thunk: FieldThunk, description: Option<String>) -> Self {
        Self {
            core: TypeCore::new(name.into(), thunk, description),
        }
    }
}

wire_accessors!(InputObjectType);

///
/// InterfaceType
///

#[derive(Clone, Debug)]
pub struct InterfaceType {
    core: Arc<TypeCore>,
}

impl InterfaceType {
    #[must_use]
    pub fn new(name: impl Into<String>, thunk: FieldThunk, description: Option<String>) -> Self {
        Self {
            core: TypeCore::new(name.into(), thunk, description),
        }
    }
}

wire_accessors!(InterfaceType);

///
/// WireType
///

#[derive(Clone, Debug)]
pub enum WireType {
    InputObject(InputObjectType),
    Interface(InterfaceType),
    Object(ObjectType),
}

impl WireType {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::InputObject(ty) => ty.name(),
            Self::Interface(ty) => ty.name(),
            Self::Object(ty) => ty.name(),
        }
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        match self {
            Self::InputObject(ty) => ty.description(),
            Self::Interface(ty) => ty.description(),
            Self::Object(ty) => ty.description(),
        }
    }

    pub fn fields(&self) -> Result<&FieldTable, SchemaError> {
        match self {
            Self::InputObject(ty) => ty.fields(),
            Self::Interface(ty) => ty.fields(),
            Self::Object(ty) => ty.fields(),
        }
    }

    #[must_use]
    pub fn fields_built(&self) -> bool {
        match self {
            Self::InputObject(ty) => ty.fields_built(),
            Self::Interface(ty) => ty.fields_built(),
            Self::Object(ty) => ty.fields_built(),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> Kind {
        match self {
            Self::InputObject(_) => Kind::Input,
            Self::Interface(_) => Kind::Interface,
            Self::Object(_) => Kind::Object,
        }
    }

    /// Interfaces of an object type; empty for the other constructs.
    #[must_use]
    pub fn interfaces(&self) -> &[InterfaceType] {
        match self {
            Self::Object(ty) => ty.interfaces(),
            Self::InputObject(_) | Self::Interface(_) => &[],
        }
    }

    #[must_use]
    pub const fn as_object(&self) -> Option<&ObjectType> {
        match self {
            Self::Object(ty) => Some(ty),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_input(&self) -> Option<&InputObjectType> {
        match self {
            Self::InputObject(ty) => Some(ty),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_interface(&self) -> Option<&InterfaceType> {
        match self {
            Self::Interface(ty) => Some(ty),
            _ => None,
        }
    }
}

///
/// TESTS
///
