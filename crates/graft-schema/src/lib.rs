//! Runtime core of graft: turns plain record definitions into registered,
//! lazily built schema types whose fields resolve against arbitrary parents.

pub mod build;
pub mod convert;
pub mod error;
pub mod field;
pub mod kind;
pub mod naming;
pub mod printer;
pub mod record;
pub mod registry;
pub mod resolver;
pub mod synth;
pub mod types;
pub mod wire;

pub use build::{GraphType, TypeOptions, decorate, decorate_input, decorate_interface};

use thiserror::Error as ThisError;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        build::{GraphType, TypeOptions, decorate, decorate_input, decorate_interface},
        error::{ResolveError, SchemaError},
        field::{FieldDescriptor, field},
        kind::Kind,
        record::{DeclaredField, Instance, ManualField, ManualFields, Record, RecordDefinition},
        resolver::{Attribute, Context, Resolver},
        types::{GraphValue, TypeRef},
    };
}

///
/// Error
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Resolve(#[from] error::ResolveError),

    #[error(transparent)]
    Schema(#[from] error::SchemaError),
}
