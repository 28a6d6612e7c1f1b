//! Decoration: turn a record definition into a registered wire type.

use crate::{
    error::{ResolveError, SchemaError},
    kind::{Kind, resolve_interfaces},
    printer::print_type,
    record::RecordDefinition,
    registry,
    resolver::Context,
    synth::synthesize,
    wire::{FieldTable, FieldThunk, InputObjectType, InterfaceType, ObjectType, WireType},
};
use serde_json::Value;
use std::{fmt, sync::Arc};
use tracing::debug;

///
/// TypeOptions
///

#[derive(Clone, Debug, Default)]
pub struct TypeOptions {
    pub is_input: bool,
    pub is_interface: bool,
    pub description: Option<String>,
}

impl TypeOptions {
    #[must_use]
    pub const fn input(mut self) -> Self {
        self.is_input = true;
        self
    }

    #[must_use]
    pub const fn interface(mut self) -> Self {
        self.is_interface = true;
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

///
/// GraphType
///
/// A decorated record: its frozen definition, its kind and the wire
/// construct built for it.
///

#[derive(Debug)]
pub struct GraphType {
    definition: Arc<RecordDefinition>,
    kind: Kind,
    wire: WireType,
}

impl GraphType {
    #[must_use]
    pub fn name(&self) -> &str {
        self.definition.name()
    }

    #[must_use]
    pub const fn kind(&self) -> Kind {
        self.kind
    }

    #[must_use]
    pub fn definition(&self) -> &RecordDefinition {
        &self.definition
    }

    #[must_use]
    pub const fn wire(&self) -> &WireType {
        &self.wire
    }

    pub fn fields(&self) -> Result<&FieldTable, SchemaError> {
        self.wire.fields()
    }

    /// Resolve one field, by external name, against a parent value.
    pub fn resolve(
        &self,
        field: &str,
        parent: Option<&Value>,
        ctx: &Context,
    ) -> Result<Value, ResolveError> {
        let wire_field = self
            .fields()?
            .get(field)
            .ok_or_else(|| ResolveError::UnknownField {
                type_name: self.name().to_string(),
                field: field.to_string(),
            })?;

        let resolver = wire_field
            .resolver()
            .ok_or_else(|| ResolveError::NoResolver {
                type_name: self.name().to_string(),
                field: field.to_string(),
            })?;

        resolver.call(parent, ctx)
    }

    pub fn sdl(&self) -> Result<String, SchemaError> {
        print_type(&self.wire)
    }
}

impl fmt::Display for GraphType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.sdl() {
            Ok(sdl) => f.write_str(&sdl),
            Err(err) => write!(f, "# {}: {err}", self.name()),
        }
    }
}

/// Decorate a record definition and register the result.
///
/// Never fails; field problems surface when the field table is first built.
pub fn decorate(definition: RecordDefinition, options: TypeOptions) -> Arc<GraphType> {
    let kind = Kind::classify(&options);
    let definition = Arc::new(definition);

    let description = options
        .description
        .filter(|d| !d.is_empty())
        .or_else(|| definition.doc_string().map(str::to_string));

    let thunk: FieldThunk = {
        let definition = Arc::clone(&definition);
        Box::new(move || synthesize(&definition, kind))
    };

    let name = definition.name().to_string();
    let wire = match kind {
        Kind::Input => WireType::InputObject(InputObjectType::new(name, thunk, description)),
        Kind::Interface => WireType::Interface(InterfaceType::new(name, thunk, description)),
        Kind::Object => {
            let interfaces = resolve_interfaces(&definition);
            WireType::Object(ObjectType::new(name, thunk, description, interfaces))
        }
    };

    let ty = Arc::new(GraphType {
        definition,
        kind,
        wire,
    });

    debug!(
        name = ty.name(),
        kind = %kind,
        interfaces = ty.wire.interfaces().len(),
        "decorated record"
    );
    registry::register(Arc::clone(&ty));

    ty
}

/// Decorate as an input type.
pub fn decorate_input(definition: RecordDefinition) -> Arc<GraphType> {
    decorate(definition, TypeOptions::default().input())
}

/// Decorate as an interface type.
pub fn decorate_interface(definition: RecordDefinition) -> Arc<GraphType> {
    decorate(definition, TypeOptions::default().interface())
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        field::FieldDescriptor,
        record::DeclaredField,
        resolver::Resolver,
        types::TypeRef,
    };
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn string() -> TypeRef {
        TypeRef::named("String").non_null()
    }

    fn int() -> TypeRef {
        TypeRef::named("Int").non_null()
    }

    #[test]
    fn person_resolves_from_a_plain_parent() {
        let person = decorate(
            RecordDefinition::new("BuildPerson")
                .field(DeclaredField::new("name", string()))
                .field(DeclaredField::new("age", int())),
            TypeOptions::default(),
        );
        let parent = json!({ "name": "Patrick", "age": 100 });
        let ctx = Context::new();

        assert_eq!(person.kind(), Kind::Object);
        assert_eq!(person.resolve("age", Some(&parent), &ctx).unwrap(), json!(100));
        assert_eq!(
            person.resolve("name", Some(&parent), &ctx).unwrap(),
            json!("Patrick")
        );
    }

    #[test]
    fn field_table_is_identical_across_accesses() {
        let ty = decorate(
            RecordDefinition::new("BuildIdempotent").field(DeclaredField::new("id", int())),
            TypeOptions::default(),
        );

        assert!(std::ptr::eq(ty.fields().unwrap(), ty.fields().unwrap()));
    }

    #[test]
    fn descriptor_name_is_the_table_key() {
        let ty = decorate(
            RecordDefinition::new("BuildRenamed").field(
                DeclaredField::new("user_id", int())
                    .descriptor(FieldDescriptor::new().with_name("uid")),
            ),
            TypeOptions::default(),
        );

        let fields = ty.fields().unwrap();
        assert!(fields.contains_key("uid"));
        assert!(!fields.contains_key("userId"));
        assert_eq!(
            ty.resolve("uid", Some(&json!({})), &Context::new()).unwrap(),
            Value::Null
        );
    }

    #[test]
    fn interfaces_must_be_decorated_first() {
        let early = decorate(
            RecordDefinition::new("BuildEarly").supertype("BuildLateNode"),
            TypeOptions::default(),
        );
        decorate_interface(
            RecordDefinition::new("BuildLateNode").field(DeclaredField::new("id", int())),
        );
        let late = decorate(
            RecordDefinition::new("BuildLate").supertype("BuildLateNode"),
            TypeOptions::default(),
        );

        assert!(early.wire().interfaces().is_empty());
        assert_eq!(late.wire().interfaces()[0].name(), "BuildLateNode");
    }

    #[test]
    fn non_interface_supertypes_are_skipped() {
        decorate(RecordDefinition::new("BuildPlainBase"), TypeOptions::default());
        let ty = decorate(
            RecordDefinition::new("BuildPlainChild").supertype("BuildPlainBase"),
            TypeOptions::default(),
        );

        assert!(ty.wire().interfaces().is_empty());
    }

    #[test]
    fn explicit_resolver_is_used_verbatim() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let resolver = Resolver::new(string(), move |_, _| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(json!("hello"))
        });

        let ty = decorate(
            RecordDefinition::new("BuildExplicit").field(
                DeclaredField::new("greeting", string())
                    .descriptor(FieldDescriptor::new().with_resolver(resolver.clone())),
            ),
            TypeOptions::default(),
        );

        let bound = ty.fields().unwrap()["greeting"].resolver().unwrap();
        assert!(bound.same_function(&resolver));
        assert_eq!(
            ty.resolve("greeting", None, &Context::new()).unwrap(),
            json!("hello")
        );
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn redecoration_replaces_registry_entry_and_still_prints() {
        let first = decorate(
            RecordDefinition::new("BuildTwice").field(DeclaredField::new("a", int())),
            TypeOptions::default(),
        );
        let second = decorate(
            RecordDefinition::new("BuildTwice").field(DeclaredField::new("b", int())),
            TypeOptions::default(),
        );

        let found = registry::lookup("BuildTwice").unwrap();
        assert!(Arc::ptr_eq(&found, &second));
        assert!(!Arc::ptr_eq(&found, &first));
        assert_eq!(second.sdl().unwrap(), "type BuildTwice {\n  b: Int!\n}");
    }

    #[test]
    fn description_prefers_options_over_doc() {
        let documented = decorate(
            RecordDefinition::new("BuildDocumented").doc("from doc"),
            TypeOptions::default(),
        );
        let overridden = decorate(
            RecordDefinition::new("BuildOverridden").doc("from doc"),
            TypeOptions::default().with_description("from options"),
        );

        assert_eq!(documented.wire().description(), Some("from doc"));
        assert_eq!(overridden.wire().description(), Some("from options"));
    }

    #[test]
    fn input_fields_cannot_be_resolved() {
        let ty = decorate_input(
            RecordDefinition::new("BuildFilter").field(DeclaredField::new("query", string())),
        );

        assert_eq!(ty.kind(), Kind::Input);
        assert!(matches!(
            ty.resolve("query", None, &Context::new()),
            Err(ResolveError::NoResolver { .. })
        ));
        assert!(matches!(
            ty.resolve("missing", None, &Context::new()),
            Err(ResolveError::UnknownField { .. })
        ));
    }

    #[test]
    fn display_renders_schema_errors_as_comments() {
        let ty = decorate(
            RecordDefinition::new("BuildBroken")
                .field(DeclaredField::new("other", TypeRef::named("BuildNowhere"))),
            TypeOptions::default(),
        );

        let rendered = ty.to_string();
        assert!(rendered.starts_with("# BuildBroken: "));
        assert!(rendered.contains("BuildNowhere"));
    }
}
