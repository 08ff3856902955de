//! Post repository

use super::base::{BaseRepository, KeyConditions};
use crate::errors::BoardStoreError;
use serde::{Deserialize, Serialize};
use std::ops::Deref;
use std::sync::Arc;
use store_object::{Condition, QueryExecutor, QueryOptions, TableMetadata, WriteResult};

pub struct PostTable;

impl TableMetadata for PostTable {
    fn table_name() -> &'static str {
        "post"
    }

    fn table_alias() -> Option<&'static str> {
        Some("po")
    }

    fn immutable_fields() -> &'static [&'static str] {
        &["id", "createdAt"]
    }
}

/// Lookup key for posts.
///
/// An `author` ending in `%` is matched with LIKE; a `title` ending in `*`
/// is a boolean-mode full-text search.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostKey {
    pub post_id: Option<u64>,
    pub author: Option<String>,
    pub title: Option<String>,
}

impl PostKey {
    pub fn id(post_id: u64) -> Self {
        Self {
            post_id: Some(post_id),
            ..Self::default()
        }
    }

    pub fn author(author: impl Into<String>) -> Self {
        Self {
            author: Some(author.into()),
            ..Self::default()
        }
    }

    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }
}

impl KeyConditions for PostKey {
    fn conditions(&self) -> Vec<Condition> {
        let mut conditions = Vec::new();
        if let Some(id) = self.post_id.filter(|id| *id != 0) {
            conditions.push(Condition::eq("po.id", id));
        }
        if let Some(author) = self.author.as_deref().filter(|a| !a.is_empty()) {
            conditions.push(if author.ends_with('%') {
                Condition::like("po.author", author)
            } else {
                Condition::eq("po.author", author)
            });
        }
        if let Some(title) = self.title.as_deref().filter(|t| !t.is_empty()) {
            conditions.push(if title.ends_with('*') {
                Condition::full_text("po.title", title, true)
            } else {
                Condition::eq("po.title", title)
            });
        }
        conditions
    }
}

/// Columns written when a post is created
#[derive(Debug, Clone, Serialize)]
pub struct NewPost {
    pub title: String,
    pub author: String,
    pub content: String,
    pub iv: String,
    pub encrypted: String,
}

/// Editable post fields; unset fields are left untouched
#[derive(Debug, Clone, Default, Serialize)]
pub struct PostPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

/// Public view of a post
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRow {
    pub id: u64,
    pub title: String,
    pub content: String,
    pub author: String,
    pub updated_at: String,
    pub created_at: String,
}

/// Password material stored with a post
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PostCredentials {
    pub id: u64,
    pub iv: String,
    pub encrypted: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostSearch {
    /// Posts whose author starts with the value
    Author(String),
    /// Posts whose title contains words starting with the value
    Title(String),
}

/// Page request for the post list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostListQuery {
    pub limit: u64,
    pub offset: u64,
    pub search: Option<PostSearch>,
}

const PUBLIC_FIELDS: [&str; 6] = ["id", "title", "content", "author", "updatedAt", "createdAt"];

#[derive(Clone)]
pub struct PostRepository {
    base: BaseRepository<PostTable, PostKey>,
}

impl Deref for PostRepository {
    type Target = BaseRepository<PostTable, PostKey>;

    fn deref(&self) -> &Self::Target {
        &self.base
    }
}

impl PostRepository {
    pub fn new(executor: Arc<dyn QueryExecutor>) -> Self {
        Self {
            base: BaseRepository::new(executor).touch_on_update("updatedAt"),
        }
    }

    pub async fn create_post(&self, post: &NewPost) -> Result<WriteResult, BoardStoreError> {
        Ok(self.base.insert(post, &[]).await?)
    }

    /// One page of posts, optionally narrowed by author prefix or title words
    pub async fn read_all_post_list(
        &self,
        query: &PostListQuery,
    ) -> Result<Vec<PostRow>, BoardStoreError> {
        let key = match &query.search {
            Some(PostSearch::Author(value)) => PostKey::author(format!("{}%", value)),
            Some(PostSearch::Title(value)) => PostKey::title(format!("{}*", value)),
            None => PostKey::default(),
        };
        let options = QueryOptions::new()
            .fields(PUBLIC_FIELDS)
            .limit(query.limit)
            .offset(query.offset)
            .allow_no_condition();

        Ok(self.base.read(&key, &options).await?)
    }

    pub async fn read_post(&self, post_id: u64) -> Result<PostRow, BoardStoreError> {
        let options = QueryOptions::new().fields(PUBLIC_FIELDS);
        self.base
            .read_one(&PostKey::id(post_id), &options)
            .await?
            .ok_or(BoardStoreError::PostNotFound(post_id))
    }

    pub async fn read_credentials(
        &self,
        post_id: u64,
    ) -> Result<Option<PostCredentials>, BoardStoreError> {
        let options = QueryOptions::new().fields(["id", "iv", "encrypted"]);
        Ok(self.base.read_one(&PostKey::id(post_id), &options).await?)
    }

    pub async fn update_post(
        &self,
        post_id: u64,
        patch: &PostPatch,
    ) -> Result<WriteResult, BoardStoreError> {
        Ok(self.base.update_one(&PostKey::id(post_id), patch).await?)
    }

    pub async fn delete_post(&self, post_id: u64) -> Result<WriteResult, BoardStoreError> {
        Ok(self.base.remove(&PostKey::id(post_id)).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use store_object::QueryOperator;

    #[test]
    fn test_key_author_prefix_uses_like() {
        let conditions = PostKey::author("jan%").conditions();
        assert_eq!(conditions.len(), 1);
        assert_eq!(conditions[0].operator, QueryOperator::Like);
        assert_eq!(conditions[0].field, "po.author");
    }

    #[test]
    fn test_key_title_star_uses_boolean_full_text() {
        let conditions = PostKey::title("rust*").conditions();
        assert!(conditions[0].is_full_text());
        assert!(conditions[0].boolean_mode);
        assert_eq!(conditions[0].field, "po.title");
    }

    #[test]
    fn test_key_exact_values_and_empty_key() {
        let key = PostKey {
            post_id: Some(3),
            author: Some("jane".into()),
            title: Some("hello".into()),
        };
        let operators: Vec<_> = key.conditions().iter().map(|c| c.operator).collect();
        assert_eq!(operators, vec![QueryOperator::Eq; 3]);

        assert!(PostKey::default().conditions().is_empty());
        assert!(PostKey::id(0).conditions().is_empty());
    }
}
