use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::info;

use super::{TaxTable, TaxTableError};

/// Source of the tax table a calculation should run against.
///
/// Callers take one snapshot per request and keep it for the whole
/// calculation, so a concurrent reload never mixes two tables.
pub trait TaxTableProvider: Send + Sync {
    fn snapshot(&self) -> Arc<TaxTable>;
}

impl TaxTableProvider for Arc<TaxTable> {
    fn snapshot(&self) -> Arc<TaxTable> {
        Arc::clone(self)
    }
}

#[derive(Debug)]
struct StoreState {
    tables: BTreeMap<i32, Arc<TaxTable>>,
    current_year: i32,
}

/// Tax tables for several years, one of which is current.
///
/// Tables can be replaced while calculations are in flight; those
/// calculations finish against the snapshot they started with.
#[derive(Debug)]
pub struct TaxTableStore {
    state: RwLock<StoreState>,
}

impl TaxTableStore {
    /// Creates a store whose current year is `table`'s year.
    pub fn new(table: TaxTable) -> Self {
        let current_year = table.tax_year();
        let mut tables = BTreeMap::new();
        tables.insert(current_year, Arc::new(table));

        Self {
            state: RwLock::new(StoreState {
                tables,
                current_year,
            }),
        }
    }

    /// Adds or replaces the table for its year and returns the one it replaced.
    pub fn install(
        &self,
        table: TaxTable,
    ) -> Option<Arc<TaxTable>> {
        let year = table.tax_year();
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let previous = state.tables.insert(year, Arc::new(table));
        info!(
            tax_year = year,
            replaced = previous.is_some(),
            "tax table installed"
        );
        previous
    }

    /// Makes `year` the table returned by [`TaxTableProvider::snapshot`].
    ///
    /// # Errors
    ///
    /// Returns [`TaxTableError::YearNotLoaded`] if no table exists for `year`.
    pub fn set_current_year(
        &self,
        year: i32,
    ) -> Result<(), TaxTableError> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if !state.tables.contains_key(&year) {
            return Err(TaxTableError::YearNotLoaded(year));
        }
        state.current_year = year;
        Ok(())
    }

    pub fn current_year(&self) -> i32 {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .current_year
    }

    pub fn for_year(
        &self,
        year: i32,
    ) -> Option<Arc<TaxTable>> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .tables
            .get(&year)
            .cloned()
    }

    /// Loaded years, ascending.
    pub fn years(&self) -> Vec<i32> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .tables
            .keys()
            .copied()
            .collect()
    }
}

impl TaxTableProvider for TaxTableStore {
    fn snapshot(&self) -> Arc<TaxTable> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        // The current year is only ever set to a loaded year.
        Arc::clone(&state.tables[&state.current_year])
    }
}
