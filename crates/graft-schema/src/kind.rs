use crate::{build::TypeOptions, record::RecordDefinition, registry, wire::InterfaceType};
use derive_more::Display;
use tracing::debug;

///
/// Kind
///
/// Which wire construct a decorated record becomes. Fixed at decoration.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
#[remain::sorted]
pub enum Kind {
    #[display("input")]
    Input,
    #[display("interface")]
    Interface,
    #[display("object")]
    Object,
}

impl Kind {
    /// Classify decoration options. `is_input` is checked first and wins
    /// when both flags are set.
    #[must_use]
    pub const fn classify(options: &TypeOptions) -> Self {
        if options.is_input {
            Self::Input
        } else if options.is_interface {
            Self::Interface
        } else {
            Self::Object
        }
    }

    #[must_use]
    pub const fn is_input(self) -> bool {
        matches!(self, Self::Input)
    }

    #[must_use]
    pub const fn is_interface(self) -> bool {
        matches!(self, Self::Interface)
    }
}

/// Collect the wire interfaces an object type implements.
///
/// Only supertypes already registered as interfaces are kept; anything else
/// is dropped, so an interface must be decorated before its implementors.
#[must_use]
pub fn resolve_interfaces(def: &RecordDefinition) -> Vec<InterfaceType> {
    let mut interfaces = Vec::with_capacity(def.supertypes().len());

    for supertype in def.supertypes() {
        match registry::lookup(supertype) {
            Some(ty) => match ty.wire().as_interface() {
                Some(interface) => interfaces.push(interface.clone()),
                None => debug!(
                    record = def.name(),
                    supertype = supertype.as_str(),
                    kind = %ty.kind(),
                    "supertype is not an interface, skipping"
                ),
            },
            None => debug!(
                record = def.name(),
                supertype = supertype.as_str(),
                "supertype not decorated yet, skipping"
            ),
        }
    }

    interfaces
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_wins_over_interface() {
        let options = TypeOptions {
            is_input: true,
            is_interface: true,
            description: None,
        };

        assert_eq!(Kind::classify(&options), Kind::Input);
    }

    #[test]
    fn defaults_to_object() {
        assert_eq!(Kind::classify(&TypeOptions::default()), Kind::Object);
        assert_eq!(
            Kind::classify(&TypeOptions::default().interface()),
            Kind::Interface
        );
    }
}
