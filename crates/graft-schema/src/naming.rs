use convert_case::{Case, Casing};

/// Convert an internal snake_case identifier to its external camelCase form.
///
/// Only underscores split words, so `field_abc` becomes `fieldAbc` and an
/// identifier without underscores is returned unchanged.
#[must_use]
pub fn to_camel_case(ident: &str) -> String {
    if !ident.contains('_') {
        return ident.to_string();
    }

    ident.from_case(Case::Snake).to_case(Case::Camel)
}

///
/// TESTS
///
