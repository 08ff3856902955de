//! Keyword repository

use super::base::{BaseRepository, KeyConditions};
use crate::errors::BoardStoreError;
use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::ops::Deref;
use std::sync::Arc;
use store_object::{Condition, QueryExecutor, QueryOptions, TableMetadata, WriteResult};

pub struct KeywordTable;

impl TableMetadata for KeywordTable {
    fn table_name() -> &'static str {
        "keyword"
    }

    fn table_alias() -> Option<&'static str> {
        Some("kw")
    }

    fn immutable_fields() -> &'static [&'static str] {
        &["id", "createdAt"]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordKey {
    pub keyword_id: Option<u64>,
    pub keyword: Option<String>,
}

impl KeywordKey {
    pub fn keyword(keyword: impl Into<String>) -> Self {
        Self {
            keyword: Some(keyword.into()),
            ..Self::default()
        }
    }

    pub fn id(keyword_id: u64) -> Self {
        Self {
            keyword_id: Some(keyword_id),
            ..Self::default()
        }
    }
}

impl KeyConditions for KeywordKey {
    fn conditions(&self) -> Vec<Condition> {
        let mut conditions = Vec::new();
        if let Some(keyword) = self.keyword.as_deref().filter(|k| !k.is_empty()) {
            conditions.push(Condition::eq("kw.keyword", keyword));
        }
        if let Some(id) = self.keyword_id.filter(|id| *id != 0) {
            conditions.push(Condition::eq("kw.id", id));
        }
        conditions
    }
}

/// An author's subscription to a keyword
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordAuthor {
    pub author: String,
    pub keyword: String,
}

#[derive(Deserialize)]
struct KeywordOnly {
    keyword: String,
}

#[derive(Clone)]
pub struct KeywordRepository {
    base: BaseRepository<KeywordTable, KeywordKey>,
}

impl Deref for KeywordRepository {
    type Target = BaseRepository<KeywordTable, KeywordKey>;

    fn deref(&self) -> &Self::Target {
        &self.base
    }
}

impl KeywordRepository {
    pub fn new(executor: Arc<dyn QueryExecutor>) -> Self {
        Self {
            base: BaseRepository::new(executor),
        }
    }

    /// Subscribe an author to a keyword; an existing pair is left as is
    pub async fn add_keyword(
        &self,
        author: &str,
        keyword: &str,
    ) -> Result<WriteResult, BoardStoreError> {
        let row = KeywordAuthor {
            author: author.to_string(),
            keyword: keyword.to_string(),
        };
        Ok(self.base.insert(&row, &[]).await?)
    }

    /// Every distinct keyword in the table
    pub async fn read_unique_keywords(&self) -> Result<Vec<String>, BoardStoreError> {
        let options = QueryOptions::new()
            .field("keyword")
            .group_by("keyword")
            .allow_no_condition();

        let rows: Vec<KeywordOnly> = self.base.read(&KeywordKey::default(), &options).await?;
        Ok(rows.into_iter().map(|row| row.keyword).collect())
    }

    /// Subscribers of each distinct keyword, read concurrently, in input order
    pub async fn read_authors_by_keywords(
        &self,
        keywords: &[String],
    ) -> Result<Vec<KeywordAuthor>, BoardStoreError> {
        let options = QueryOptions::new().fields(["author", "keyword"]);
        let mut seen = HashSet::new();
        let keys: Vec<KeywordKey> = keywords
            .iter()
            .filter(|keyword| seen.insert(keyword.as_str()))
            .map(KeywordKey::keyword)
            .collect();

        let batches = try_join_all(
            keys.iter()
                .map(|key| self.base.read::<KeywordAuthor>(key, &options)),
        )
        .await?;

        Ok(batches.into_iter().flatten().collect())
    }
}
