use crate::build::GraphType;
use std::{
    collections::HashMap,
    sync::{Arc, LazyLock, RwLock, RwLockReadGuard, RwLockWriteGuard},
};
use tracing::debug;

///
/// REGISTRY
/// every decorated record, by name; entries are never removed
///

static REGISTRY: LazyLock<RwLock<HashMap<String, Arc<GraphType>>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

fn registry_write() -> RwLockWriteGuard<'static, HashMap<String, Arc<GraphType>>> {
    REGISTRY
        .write()
        .expect("registry RwLock poisoned while acquiring write lock")
}

fn registry_read() -> RwLockReadGuard<'static, HashMap<String, Arc<GraphType>>> {
    REGISTRY
        .read()
        .expect("registry RwLock poisoned while acquiring read lock")
}

/// Store a decorated type under its name. Last registration wins; the
/// replaced entry, if any, is returned.
pub fn register(ty: Arc<GraphType>) -> Option<Arc<GraphType>> {
    let name = ty.name().to_string();
    let previous = registry_write().insert(name, ty);

    if let Some(previous) = &previous {
        debug!(name = previous.name(), "registry entry replaced");
    }

    previous
}

#[must_use]
pub fn lookup(name: &str) -> Option<Arc<GraphType>> {
    registry_read().get(name).cloned()
}

#[must_use]
pub fn contains(name: &str) -> bool {
    registry_read().contains_key(name)
}

/// Registered names, sorted.
#[must_use]
pub fn names() -> Vec<String> {
    let mut names: Vec<String> = registry_read().keys().cloned().collect();
    names.sort_unstable();

    names
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        build::{TypeOptions, decorate},
        record::RecordDefinition,
    };

    #[test]
    fn last_registration_wins() {
        let first = decorate(
            RecordDefinition::new("RegistryTwice").doc("first"),
            TypeOptions::default(),
        );
        let second = decorate(
            RecordDefinition::new("RegistryTwice").doc("second"),
            TypeOptions::default(),
        );

        let found = lookup("RegistryTwice").unwrap();
        assert!(Arc::ptr_eq(&found, &second));
        assert!(!Arc::ptr_eq(&found, &first));
        assert_eq!(found.definition().doc_string(), Some("second"));
    }

    #[test]
    fn unknown_names_are_not_found() {
        assert!(lookup("RegistryNeverDeclared").is_none());
        assert!(!contains("RegistryNeverDeclared"));
    }

    #[test]
    fn names_are_sorted() {
        decorate(RecordDefinition::new("RegistryZeta"), TypeOptions::default());
        decorate(RecordDefinition::new("RegistryAlpha"), TypeOptions::default());

        let names = names();
        let alpha = names.iter().position(|n| n == "RegistryAlpha").unwrap();
        let zeta = names.iter().position(|n| n == "RegistryZeta").unwrap();
        assert!(alpha < zeta);
    }
}
