//! Record definitions: the declared shape of a user record and the
//! construct-from-map capability the default resolver relies on.

use crate::{
    build::{GraphType, TypeOptions},
    error::ResolveError,
    field::FieldDescriptor,
    resolver::{Attribute, Resolver},
    types::{GraphValue, TypeRef},
};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};
use std::{marker::PhantomData, sync::Arc};

/// Builds a fresh instance from attributes already restricted to the
/// record's declared field names.
pub type Constructor =
    fn(&RecordDefinition, Map<String, Value>) -> Result<Box<dyn Instance>, ResolveError>;

///
/// Instance
///
/// A constructed record that can answer attribute reads by internal name.
///

pub trait Instance {
    fn attribute(&self, name: &str) -> Result<Attribute, ResolveError>;
}

///
/// Record
///
/// Implemented by the attribute macros for every decorated struct.
///

pub trait Record: Instance + GraphValue + DeserializeOwned + Serialize + Sized + 'static {
    const NAME: &'static str;

    /// Declared fields, manual fields and supertypes of this record.
    fn definition() -> RecordDefinition;

    /// Decoration options given on the attribute.
    fn options() -> TypeOptions;

    /// The decorated type, created on first call and cached afterwards.
    fn graph_type() -> Arc<GraphType>;

    /// Build `Self` from a parent value the way the default resolver does.
    fn from_parent(parent: Option<&Value>) -> Result<Self, ResolveError> {
        let graph_type = Self::graph_type();
        let attributes = graph_type.definition().parent_attributes(parent)?;

        decode(Self::NAME, attributes)
    }
}

///
/// ManualFields
///
/// Schema fields defined by hand on an `impl` block rather than derived from
/// declared struct fields.
///

pub trait ManualFields {
    fn manual_fields() -> Vec<ManualField>;
}

///
/// ManualFieldSource
///
/// Collects a record's manual fields whether or not it implements
/// [`ManualFields`]. Called as
/// `(&ManualFieldSource::<T>::new()).collect_manual_fields()` with both
/// collector traits in scope; method lookup tries the by-value receiver
/// first, and that impl only applies when `T: ManualFields`.
///

#[doc(hidden)]
pub struct ManualFieldSource<T>(PhantomData<T>);

impl<T> ManualFieldSource<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for ManualFieldSource<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[doc(hidden)]
pub trait FromManualFields {
    fn collect_manual_fields(&self) -> Vec<ManualField>;
}

impl<T: ManualFields> FromManualFields for ManualFieldSource<T> {
    fn collect_manual_fields(&self) -> Vec<ManualField> {
        T::manual_fields()
    }
}

#[doc(hidden)]
pub trait NoManualFields {
    fn collect_manual_fields(&self) -> Vec<ManualField>;
}

impl<T> NoManualFields for &ManualFieldSource<T> {
    fn collect_manual_fields(&self) -> Vec<ManualField> {
        Vec::new()
    }
}

///
/// FieldSlot
///
/// What the record declares at class level under a field's name.
/// Decided once, when the definition is built.
///

#[derive(Clone, Debug, Default)]
pub enum FieldSlot {
    /// Nothing beyond the plain declaration.
    #[default]
    Absent,

    /// A field marker without a resolver (name/description overrides only).
    Declared(FieldDescriptor),

    /// A field marker carrying an explicit resolver.
    Resolver(FieldDescriptor),
}

impl FieldSlot {
    /// Classify a descriptor by whether it carries a resolver.
    #[must_use]
    pub fn from_descriptor(descriptor: FieldDescriptor) -> Self {
        if descriptor.resolver().is_some() {
            Self::Resolver(descriptor)
        } else {
            Self::Declared(descriptor)
        }
    }

    #[must_use]
    pub const fn descriptor(&self) -> Option<&FieldDescriptor> {
        match self {
            Self::Absent => None,
            Self::Declared(descriptor) | Self::Resolver(descriptor) => Some(descriptor),
        }
    }
}

///
/// DeclaredField
///

#[derive(Clone, Debug)]
pub struct DeclaredField {
    name: String,
    ty: TypeRef,
    slot: FieldSlot,
    default: Option<Value>,
}

impl DeclaredField {
    #[must_use]
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            slot: FieldSlot::Absent,
            default: None,
        }
    }

    /// Attach the class-level field marker for this field.
    #[must_use]
    pub fn descriptor(mut self, descriptor: FieldDescriptor) -> Self {
        self.slot = FieldSlot::from_descriptor(descriptor);
        self
    }

    /// Default used when the parent does not supply this attribute.
    /// Only consulted by dynamic records; typed records use serde defaults.
    #[must_use]
    pub fn default_value(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn ty(&self) -> &TypeRef {
        &self.ty
    }

    #[must_use]
    pub const fn slot(&self) -> &FieldSlot {
        &self.slot
    }

    #[must_use]
    pub const fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }
}

///
/// ManualField
///

#[derive(Clone, Debug)]
pub struct ManualField {
    key: String,
    descriptor: FieldDescriptor,
}

impl ManualField {
    #[must_use]
    pub fn new(key: impl Into<String>, resolver: Resolver) -> Self {
        Self {
            key: key.into(),
            descriptor: FieldDescriptor::new().with_resolver(resolver),
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.descriptor = self.descriptor.with_name(name);
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.descriptor = self.descriptor.with_description(description);
        self
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub const fn descriptor(&self) -> &FieldDescriptor {
        &self.descriptor
    }
}

///
/// RecordDefinition
///
/// Everything the compiler needs to know about one record. Frozen once it
/// is decorated.
///

#[derive(Clone, Debug)]
pub struct RecordDefinition {
    name: String,
    doc: Option<String>,
    fields: Vec<DeclaredField>,
    manual_fields: Vec<ManualField>,
    supertypes: Vec<String>,
    constructor: Constructor,
}

impl RecordDefinition {
    /// Start a definition whose instances are [`DynamicRecord`]s.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            fields: Vec::new(),
            manual_fields: Vec::new(),
            supertypes: Vec::new(),
            constructor: DynamicRecord::construct,
        }
    }

    /// Start a definition whose instances are the typed record `R`.
    #[must_use]
    pub fn for_record<R: Record>() -> Self {
        Self {
            constructor: construct_record::<R>,
            ..Self::new(R::NAME)
        }
    }

    #[must_use]
    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    #[must_use]
    pub fn field(mut self, field: DeclaredField) -> Self {
        self.fields.push(field);
        self
    }

    #[must_use]
    pub fn manual_field(mut self, field: ManualField) -> Self {
        self.manual_fields.push(field);
        self
    }

    #[must_use]
    pub fn extend_manual_fields(mut self, fields: impl IntoIterator<Item = ManualField>) -> Self {
        self.manual_fields.extend(fields);
        self
    }

    /// Record a direct supertype by name.
    #[must_use]
    pub fn supertype(mut self, name: impl Into<String>) -> Self {
        self.supertypes.push(name.into());
        self
    }

    #[must_use]
    pub fn constructor(mut self, constructor: Constructor) -> Self {
        self.constructor = constructor;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn doc_string(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    #[must_use]
    pub fn fields(&self) -> &[DeclaredField] {
        &self.fields
    }

    #[must_use]
    pub fn declared_field(&self, name: &str) -> Option<&DeclaredField> {
        self.fields.iter().find(|f| f.name == name)
    }

    #[must_use]
    pub fn manual_fields(&self) -> &[ManualField] {
        &self.manual_fields
    }

    #[must_use]
    pub fn supertypes(&self) -> &[String] {
        &self.supertypes
    }

    /// Restrict a parent value to this record's declared attributes.
    ///
    /// An absent or null parent yields an empty map; any other non-object
    /// parent is rejected.
    pub fn parent_attributes(
        &self,
        parent: Option<&Value>,
    ) -> Result<Map<String, Value>, ResolveError> {
        match parent {
            None | Some(Value::Null) => Ok(Map::new()),
            Some(Value::Object(map)) => Ok(map
                .iter()
                .filter(|(key, _)| self.declared_field(key).is_some())
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect()),
            Some(other) => Err(ResolveError::ParentNotObject {
                type_name: self.name.clone(),
                found: value_kind(other),
            }),
        }
    }

    /// Construct a fresh instance from a parent value.
    pub fn construct(&self, parent: Option<&Value>) -> Result<Box<dyn Instance>, ResolveError> {
        let attributes = self.parent_attributes(parent)?;

        (self.constructor)(self, attributes)
    }
}

///
/// DynamicRecord
///
/// Instance type for definitions built at runtime without a Rust struct.
///

#[derive(Clone, Debug, PartialEq)]
pub struct DynamicRecord {
    type_name: String,
    values: Map<String, Value>,
}

impl DynamicRecord {
    /// Fill every declared field from the attributes, then the declared
    /// default, then null for nullable types. Anything else is missing.
    pub fn from_attributes(
        def: &RecordDefinition,
        mut attributes: Map<String, Value>,
    ) -> Result<Self, ResolveError> {
        let mut values = Map::new();

        for field in def.fields() {
            let value = match attributes.remove(field.name()) {
                Some(value) => value,
                None => match field.default() {
                    Some(default) => default.clone(),
                    None if !field.ty().is_non_null() => Value::Null,
                    None => {
                        return Err(ResolveError::MissingAttribute {
                            type_name: def.name().to_string(),
                            attribute: field.name().to_string(),
                        });
                    }
                },
            };

            values.insert(field.name().to_string(), value);
        }

        Ok(Self {
            type_name: def.name().to_string(),
            values,
        })
    }

    fn construct(
        def: &RecordDefinition,
        attributes: Map<String, Value>,
    ) -> Result<Box<dyn Instance>, ResolveError> {
        Ok(Box::new(Self::from_attributes(def, attributes)?))
    }

    #[must_use]
    pub const fn values(&self) -> &Map<String, Value> {
        &self.values
    }
}

impl Instance for DynamicRecord {
    fn attribute(&self, name: &str) -> Result<Attribute, ResolveError> {
        self.values
            .get(name)
            .cloned()
            .map(Attribute::Value)
            .ok_or_else(|| ResolveError::UnknownAttribute {
                type_name: self.type_name.clone(),
                attribute: name.to_string(),
            })
    }
}

// construct_record
// serde fills in field defaults for typed records
fn construct_record<R: Record>(
    def: &RecordDefinition,
    attributes: Map<String, Value>,
) -> Result<Box<dyn Instance>, ResolveError> {
    let record: R = decode(def.name(), attributes)?;

    Ok(Box::new(record))
}

fn decode<R: DeserializeOwned>(
    type_name: &str,
    attributes: Map<String, Value>,
) -> Result<R, ResolveError> {
    serde_json::from_value(Value::Object(attributes)).map_err(|source| {
        ResolveError::Construction {
            type_name: type_name.to_string(),
            source,
        }
    })
}

const fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

///
/// TESTS
///
