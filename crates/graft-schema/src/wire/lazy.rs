use crate::{error::SchemaError, wire::FieldTable};
use std::{cell::RefCell, collections::HashSet, fmt, sync::OnceLock};
use tracing::trace;

/// Zero-argument field-table provider, run at most once per winner.
pub type FieldThunk = Box<dyn Fn() -> Result<FieldTable, SchemaError> + Send + Sync>;

thread_local! {
    // cells currently running their thunk on this thread
    static IN_FLIGHT: RefCell<HashSet<usize>> = RefCell::new(HashSet::new());
}

///
/// LazyFields
///
/// Memoized field table. The thunk runs outside any lock; if two threads
/// race, the first stored table wins and both observe it.
///

pub struct LazyFields {
    type_name: String,
    thunk: FieldThunk,
    table: OnceLock<FieldTable>,
}

impl LazyFields {
    #[must_use]
    pub fn new(type_name: impl Into<String>, thunk: FieldThunk) -> Self {
        Self {
            type_name: type_name.into(),
            thunk,
            table: OnceLock::new(),
        }
    }

    /// Return the table, building it on first access.
    pub fn get(&self) -> Result<&FieldTable, SchemaError> {
        if let Some(table) = self.table.get() {
            return Ok(table);
        }

        let table = {
            let _guard = InFlight::enter(self)?;
            (self.thunk)()?
        };

        trace!(
            type_name = self.type_name.as_str(),
            fields = table.len(),
            "field table built"
        );

        Ok(self.table.get_or_init(|| table))
    }

    #[must_use]
    pub fn is_built(&self) -> bool {
        self.table.get().is_some()
    }
}

impl fmt::Debug for LazyFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyFields")
            .field("type_name", &self.type_name)
            .field("table", &self.table.get())
            .finish_non_exhaustive()
    }
}

// InFlight
// marks a cell as being built on this thread until dropped
struct InFlight(usize);

impl InFlight {
    fn enter(cell: &LazyFields) -> Result<Self, SchemaError> {
        let key = std::ptr::from_ref(cell) as usize;

        if IN_FLIGHT.with_borrow_mut(|cells| cells.insert(key)) {
            Ok(Self(key))
        } else {
            Err(SchemaError::RecursiveFieldTable {
                type_name: cell.type_name.clone(),
            })
        }
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        IN_FLIGHT.with_borrow_mut(|cells| cells.remove(&self.0));
    }
}

///
/// TESTS
///
