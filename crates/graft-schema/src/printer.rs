use crate::{error::SchemaError, wire::WireType};
use std::fmt::Write;

/// Render one wire type as SDL. Forces the field table.
pub fn print_type(ty: &WireType) -> Result<String, SchemaError> {
    let fields = ty.fields()?;
    let mut out = String::new();

    if let Some(description) = ty.description() {
        push_description(&mut out, description, "");
    }

    let keyword = match ty {
        WireType::InputObject(_) => "input",
        WireType::Interface(_) => "interface",
        WireType::Object(_) => "type",
    };
    out.push_str(keyword);
    out.push(' ');
    out.push_str(ty.name());

    let interfaces = ty.interfaces();
    if !interfaces.is_empty() {
        let names: Vec<&str> = interfaces.iter().map(|i| i.name()).collect();
        out.push_str(" implements ");
        out.push_str(&names.join(" & "));
    }

    if fields.is_empty() {
        return Ok(out);
    }

    out.push_str(" {\n");
    for (name, field) in fields {
        if let Some(description) = field.description() {
            push_description(&mut out, description, "  ");
        }
        // writing to a String cannot fail
        let _ = writeln!(out, "  {name}: {}", field.ty());
    }
    out.push('}');

    Ok(out)
}

fn push_description(out: &mut String, description: &str, indent: &str) {
    let escaped = description.replace("\"\"\"", "\\\"\"\"");

    if escaped.contains('\n') {
        let _ = writeln!(out, "{indent}\"\"\"");
        for line in escaped.lines() {
            if line.is_empty() {
                out.push('\n');
            } else {
                let _ = writeln!(out, "{indent}{line}");
            }
        }
        let _ = writeln!(out, "{indent}\"\"\"");
    } else {
        let _ = writeln!(out, "{indent}\"\"\"{escaped}\"\"\"");
    }
}

///
/// TESTS
///
