use crate::pool::QueryExecutor;
use crate::traits::TableMetadata;
use std::marker::PhantomData;
use std::sync::Arc;

/// Generic table store: one table description plus the shared executor
pub struct GenericStore<T: TableMetadata> {
    pub(crate) executor: Arc<dyn QueryExecutor>,
    pub(crate) _phantom: PhantomData<T>,
}

impl<T: TableMetadata> Clone for GenericStore<T> {
    fn clone(&self) -> Self {
        Self {
            executor: Arc::clone(&self.executor),
            _phantom: PhantomData,
        }
    }
}

impl<T: TableMetadata> std::fmt::Debug for GenericStore<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenericStore")
            .field("table", &T::table_name())
            .field("alias", &T::table_alias())
            .finish()
    }
}

impl<T: TableMetadata> GenericStore<T> {
    pub fn new(executor: Arc<dyn QueryExecutor>) -> Self {
        Self {
            executor,
            _phantom: PhantomData,
        }
    }

    /// Get the shared executor
    pub fn executor(&self) -> &Arc<dyn QueryExecutor> {
        &self.executor
    }

    pub fn table_name(&self) -> &'static str {
        T::table_name()
    }
}
