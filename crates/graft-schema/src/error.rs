use crate::kind::Kind;
use thiserror::Error as ThisError;

///
/// SchemaError
///
/// Raised while a lazy field table is being built or printed.
/// Decoration itself never fails; these surface on first access.
///

#[derive(Debug, ThisError)]
pub enum SchemaError {
    #[error("input field '{field}' on '{type_name}' references {kind} type '{name}'")]
    InputFieldType {
        type_name: String,
        field: String,
        name: String,
        kind: Kind,
    },

    #[error("output field '{field}' on '{type_name}' references input type '{name}'")]
    OutputFieldType {
        type_name: String,
        field: String,
        name: String,
    },

    #[error("field table for '{type_name}' was re-entered while it was being built")]
    RecursiveFieldTable { type_name: String },

    #[error("field '{field}' on '{type_name}' references unknown type '{name}'")]
    UnknownType {
        type_name: String,
        field: String,
        name: String,
    },
}

///
/// ResolveError
///
/// Resolve-time failures. The default resolver builds a fresh record from
/// the parent's attributes, so mismatches only show up here.
///

#[derive(Debug, ThisError)]
pub enum ResolveError {
    #[error("cannot construct '{type_name}' from parent attributes: {source}")]
    Construction {
        type_name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0}")]
    Custom(String),

    #[error("missing required attribute '{attribute}' for '{type_name}'")]
    MissingAttribute {
        type_name: String,
        attribute: String,
    },

    #[error("field '{field}' on '{type_name}' has no resolver")]
    NoResolver { type_name: String, field: String },

    #[error("parent for '{type_name}' must be an object, found {found}")]
    ParentNotObject {
        type_name: String,
        found: &'static str,
    },

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("failed to serialize resolved value: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("'{type_name}' has no attribute '{attribute}'")]
    UnknownAttribute {
        type_name: String,
        attribute: String,
    },

    #[error("'{type_name}' has no field '{field}'")]
    UnknownField { type_name: String, field: String },
}

impl ResolveError {
    /// Build a free-form error from a user resolver.
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom(message.into())
    }
}
