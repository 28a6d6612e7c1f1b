//! ## Crate layout
//! - `schema`: runtime core (records, resolvers, decoration, registry, printer).
//! - `macros`: attribute macros that decorate plain structs.
//!
//! The `prelude` module covers what decorated code usually needs.

pub use graft_derive as macros;
pub use graft_schema as schema;

pub use graft_derive::{graph_fields, graph_input, graph_interface, graph_type};
pub use graft_schema::{Error, GraphType, TypeOptions, decorate, decorate_input, decorate_interface};

// generated code refers to ::graft, including inside this crate
extern crate self as graft;

/// re-exports
///
/// generated code uses these, so users do not have to depend on them directly
pub mod __reexports {
    pub use ctor;
    pub use serde;
    pub use serde_json;
}

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        macros::{graph_fields, graph_input, graph_interface, graph_type},
        schema::prelude::*,
    };
    pub use serde_json::{Value, json};
}
