use crate::{error::SchemaError, kind::Kind, registry, types::TypeRef};

/// Check a declared field type against the registry.
///
/// Runs inside the lazy field table, so named references may point at
/// records declared after the one being built.
pub fn convert_field_type(
    type_name: &str,
    field: &str,
    ty: &TypeRef,
    is_input: bool,
) -> Result<TypeRef, SchemaError> {
    if ty.is_builtin_scalar() {
        return Ok(ty.clone());
    }

    let name = ty.base_name();
    let Some(target) = registry::lookup(name) else {
        return Err(SchemaError::UnknownType {
            type_name: type_name.to_string(),
            field: field.to_string(),
            name: name.to_string(),
        });
    };

    match (is_input, target.kind()) {
        (true, Kind::Input) | (false, Kind::Interface | Kind::Object) => Ok(ty.clone()),
        (true, kind) => Err(SchemaError::InputFieldType {
            type_name: type_name.to_string(),
            field: field.to_string(),
            name: name.to_string(),
            kind,
        }),
        (false, Kind::Input) => Err(SchemaError::OutputFieldType {
            type_name: type_name.to_string(),
            field: field.to_string(),
            name: name.to_string(),
        }),
    }
}

///
/// TESTS
///
