use crate::{
    convert::convert_field_type,
    error::SchemaError,
    field::{FieldDescriptor, field},
    kind::Kind,
    naming::to_camel_case,
    record::RecordDefinition,
    resolver,
    wire::FieldTable,
};
use std::sync::Arc;
use tracing::trace;

/// Build the field table for a decorated record.
///
/// Declared fields come first; manual fields are applied afterwards and
/// replace any declared entry with the same external name.
pub fn synthesize(def: &Arc<RecordDefinition>, kind: Kind) -> Result<FieldTable, SchemaError> {
    let mut fields = FieldTable::new();

    for declared in def.fields() {
        let descriptor = declared.slot().descriptor();
        let name = external_name(declared.name(), descriptor);
        let description = descriptor
            .and_then(FieldDescriptor::description)
            .map(str::to_string);

        let resolver = resolver::bind(def, declared);
        let ty = convert_field_type(def.name(), &name, resolver.return_type(), kind.is_input())?;

        fields.insert(name, field(resolver, kind.is_input(), description).wire_field(ty));
    }

    for manual in def.manual_fields() {
        let descriptor = manual.descriptor();
        let name = external_name(manual.key(), Some(descriptor));

        let Some(resolver) = descriptor.resolver() else {
            continue;
        };
        let ty = convert_field_type(def.name(), &name, resolver.return_type(), kind.is_input())?;
        let wire = descriptor.clone().with_input(kind.is_input()).wire_field(ty);

        if fields.insert(name.clone(), wire).is_some() {
            trace!(
                record = def.name(),
                field = name.as_str(),
                "manual field replaces declared field"
            );
        }
    }

    Ok(fields)
}

fn external_name(internal: &str, descriptor: Option<&FieldDescriptor>) -> String {
    descriptor
        .and_then(FieldDescriptor::name)
        .map_or_else(|| to_camel_case(internal), str::to_string)
}

///
/// TESTS
///
