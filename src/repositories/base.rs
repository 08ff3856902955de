//! Shared repository plumbing
//!
//! A repository pairs a table description with a typed key. The key turns
//! into WHERE conditions; everything else is delegated to [`GenericStore`].

use chrono::Utc;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;
use store_object::{
    Condition, GenericStore, InsertOptions, QueryExecutor, QueryOptions, StoreError,
    TableMetadata, WriteResult,
};

/// Typed lookup key for one table
pub trait KeyConditions: Send + Sync {
    /// Conditions for the fields that are set; an empty key yields none
    fn conditions(&self) -> Vec<Condition>;
}

/// CRUD over one table addressed by key `K`
pub struct BaseRepository<T: TableMetadata, K: KeyConditions> {
    store: GenericStore<T>,
    insert_ignore: bool,
    touch_column: Option<&'static str>,
    _key: PhantomData<fn(&K)>,
}

impl<T: TableMetadata, K: KeyConditions> Clone for BaseRepository<T, K> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            insert_ignore: self.insert_ignore,
            touch_column: self.touch_column,
            _key: PhantomData,
        }
    }
}

impl<T: TableMetadata, K: KeyConditions> BaseRepository<T, K> {
    /// Inserts default to `INSERT IGNORE`
    pub fn new(executor: Arc<dyn QueryExecutor>) -> Self {
        Self {
            store: GenericStore::new(executor),
            insert_ignore: true,
            touch_column: None,
            _key: PhantomData,
        }
    }

    /// Plain `INSERT`, so duplicate keys surface as errors
    pub fn plain_insert(mut self) -> Self {
        self.insert_ignore = false;
        self
    }

    /// Stamp `column` with the current UTC time on every `update_one`
    pub fn touch_on_update(mut self, column: &'static str) -> Self {
        self.touch_column = Some(column);
        self
    }

    pub fn store(&self) -> &GenericStore<T> {
        &self.store
    }

    /// Insert one row; a non-empty `on_duplicate` turns it into an upsert
    pub async fn insert<R: Serialize + Sync>(
        &self,
        row: &R,
        on_duplicate: &[&str],
    ) -> Result<WriteResult, StoreError> {
        let options = InsertOptions {
            ignore: Some(self.insert_ignore),
            on_duplicate: on_duplicate.iter().map(|f| f.to_string()).collect(),
        };
        self.store.insert(row, &options).await
    }

    /// Key conditions plus any `options.extra_conditions`
    pub async fn read<R: DeserializeOwned>(
        &self,
        key: &K,
        options: &QueryOptions,
    ) -> Result<Vec<R>, StoreError> {
        self.store.get(&key.conditions(), options).await
    }

    pub async fn read_one<R: DeserializeOwned>(
        &self,
        key: &K,
        options: &QueryOptions,
    ) -> Result<Option<R>, StoreError> {
        self.store.get_one(&key.conditions(), options).await
    }

    pub async fn remove(&self, key: &K) -> Result<WriteResult, StoreError> {
        self.store.delete(&key.conditions(), &QueryOptions::default()).await
    }

    pub async fn count(&self, key: &K) -> Result<i64, StoreError> {
        self.store.count(&key.conditions(), &QueryOptions::default()).await
    }

    /// Write the set fields of `patch` to the rows matching `key`
    pub async fn update_one<R: Serialize + Sync>(
        &self,
        key: &K,
        patch: &R,
    ) -> Result<WriteResult, StoreError> {
        let mut row = match serde_json::to_value(patch)? {
            Value::Object(map) => map,
            other => {
                return Err(StoreError::SerializationError(format!(
                    "expected a JSON object for an update patch, got {}",
                    other
                )));
            }
        };
        if let Some(column) = self.touch_column {
            row.insert(column.to_string(), Value::String(now_timestamp()));
        }
        self.store
            .update(&key.conditions(), &row, &QueryOptions::default())
            .await
    }
}

/// Current UTC time as `YYYY-MM-DD HH:MM:SS`
pub fn now_timestamp() -> String {
    Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
