//! Resolvers and the default-resolver fallback policy.
//!
//! Precedence for a declared field:
//! 1. an explicit resolver on the field marker is used as is
//! 2. a marker without a resolver yields `null` when the parent has no value
//! 3. otherwise a fresh record is built from the parent and the attribute read

use crate::{
    error::ResolveError,
    record::{DeclaredField, FieldSlot, RecordDefinition},
    types::TypeRef,
};
use serde::Serialize;
use serde_json::Value;
use std::{
    any::{Any, TypeId},
    collections::HashMap,
    fmt,
    sync::Arc,
};

type ResolveFn = dyn Fn(Option<&Value>, &Context) -> Result<Value, ResolveError> + Send + Sync;

///
/// Resolver
///
/// Computes a field value from a parent value and a request context.
/// Clones share the same function.
///

#[derive(Clone)]
pub struct Resolver {
    func: Arc<ResolveFn>,
    return_type: TypeRef,
}

impl Resolver {
    pub fn new<F>(return_type: TypeRef, func: F) -> Self
    where
        F: Fn(Option<&Value>, &Context) -> Result<Value, ResolveError> + Send + Sync + 'static,
    {
        Self {
            func: Arc::new(func),
            return_type,
        }
    }

    pub fn call(&self, parent: Option<&Value>, ctx: &Context) -> Result<Value, ResolveError> {
        (self.func)(parent, ctx)
    }

    #[must_use]
    pub const fn return_type(&self) -> &TypeRef {
        &self.return_type
    }

    /// Same function, different declared return type.
    #[must_use]
    pub fn with_return_type(&self, return_type: TypeRef) -> Self {
        Self {
            func: Arc::clone(&self.func),
            return_type,
        }
    }

    /// True when both resolvers run the same function.
    #[must_use]
    pub fn same_function(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("return_type", &self.return_type)
            .finish_non_exhaustive()
    }
}

///
/// Attribute
///
/// The result of reading an attribute off a constructed record.
///

#[derive(Clone, Debug)]
pub enum Attribute {
    Resolver(Resolver),
    Value(Value),
}

impl Attribute {
    /// Serialize a plain value.
    pub fn value<T: Serialize + ?Sized>(value: &T) -> Result<Self, ResolveError> {
        Ok(Self::Value(serde_json::to_value(value)?))
    }
}

impl From<Resolver> for Attribute {
    fn from(resolver: Resolver) -> Self {
        Self::Resolver(resolver)
    }
}

impl From<Value> for Attribute {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

///
/// Context
///
/// Request-scoped data handed to every resolver, keyed by type.
///

#[derive(Default)]
pub struct Context {
    data: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl Context {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, replacing any previous value of the same type.
    #[must_use]
    pub fn with_data<T: Any + Send + Sync>(mut self, value: T) -> Self {
        self.data.insert(TypeId::of::<T>(), Box::new(value));
        self
    }

    #[must_use]
    pub fn data<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.data
            .get(&TypeId::of::<T>())
            .and_then(|value| value.downcast_ref::<T>())
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("entries", &self.data.len())
            .finish()
    }
}

/// Pick the resolver for one declared field. The result always reports the
/// field's declared type.
#[must_use]
pub fn bind(def: &Arc<RecordDefinition>, field: &DeclaredField) -> Resolver {
    let resolver = match field.slot() {
        FieldSlot::Resolver(descriptor) => match descriptor.resolver() {
            Some(resolver) => resolver.clone(),
            None => default_resolver(def, field),
        },
        FieldSlot::Declared(_) => placeholder_resolver(def, field),
        FieldSlot::Absent => default_resolver(def, field),
    };

    resolver.with_return_type(field.ty().clone())
}

// default_resolver
// normalizes any parent into the declared record before reading the field
fn default_resolver(def: &Arc<RecordDefinition>, field: &DeclaredField) -> Resolver {
    let def = Arc::clone(def);
    let name = field.name().to_string();

    Resolver::new(field.ty().clone(), move |parent, ctx| {
        resolve_attribute(&def, &name, parent, ctx)
    })
}

// placeholder_resolver
// no default value support yet, so a missing attribute resolves to null
fn placeholder_resolver(def: &Arc<RecordDefinition>, field: &DeclaredField) -> Resolver {
    let def = Arc::clone(def);
    let name = field.name().to_string();

    Resolver::new(field.ty().clone(), move |parent, ctx| {
        let supplied = def.parent_attributes(parent)?.contains_key(&name);

        if supplied {
            resolve_attribute(&def, &name, parent, ctx)
        } else {
            Ok(Value::Null)
        }
    })
}

fn resolve_attribute(
    def: &RecordDefinition,
    name: &str,
    parent: Option<&Value>,
    ctx: &Context,
) -> Result<Value, ResolveError> {
    let instance = def.construct(parent)?;

    match instance.attribute(name)? {
        Attribute::Value(value) => Ok(value),
        // one level of delegation only
        Attribute::Resolver(resolver) => resolver.call(parent, ctx),
    }
}

///
/// TESTS
///
