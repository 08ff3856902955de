//! Comment repository
//!
//! Comments are threaded one level deep. A root comment is its own group
//! (`groupId = id`, depth 1); replies share the root's group with depth 2 and
//! a running sequence number.

use super::base::{BaseRepository, KeyConditions};
use crate::errors::BoardStoreError;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::ops::Deref;
use std::sync::Arc;
use store_object::{Condition, QueryExecutor, QueryOptions, SortOrder, TableMetadata, WriteResult};

pub struct CommentTable;

impl TableMetadata for CommentTable {
    fn table_name() -> &'static str {
        "comment"
    }

    fn table_alias() -> Option<&'static str> {
        Some("cmt")
    }

    fn immutable_fields() -> &'static [&'static str] {
        &["id", "createdAt"]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentKey {
    pub comment_id: Option<u64>,
    pub group_id: Option<u64>,
    pub post_id: Option<u64>,
}

impl CommentKey {
    pub fn comment(comment_id: u64) -> Self {
        Self {
            comment_id: Some(comment_id),
            ..Self::default()
        }
    }

    pub fn group(group_id: u64) -> Self {
        Self {
            group_id: Some(group_id),
            ..Self::default()
        }
    }

    pub fn post(post_id: u64) -> Self {
        Self {
            post_id: Some(post_id),
            ..Self::default()
        }
    }
}

impl KeyConditions for CommentKey {
    fn conditions(&self) -> Vec<Condition> {
        [
            ("cmt.id", self.comment_id),
            ("cmt.groupId", self.group_id),
            ("cmt.postId", self.post_id),
        ]
        .into_iter()
        .filter_map(|(field, value)| {
            value
                .filter(|v| *v != 0)
                .map(|v| Condition::eq(field, v))
        })
        .collect()
    }
}

/// A new comment; `group_id` set means a reply to that thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub author: String,
    pub post_id: u64,
    pub content: String,
    pub group_id: Option<u64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CommentInsert<'a> {
    author: &'a str,
    content: &'a str,
    post_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    group_id: Option<u64>,
    sequence: u64,
    depth: u8,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentRow {
    pub id: u64,
    pub post_id: u64,
    pub author: String,
    pub group_id: Option<u64>,
    pub sequence: u64,
    pub depth: u8,
    pub content: String,
    pub created_at: String,
}

#[derive(Clone)]
pub struct CommentRepository {
    base: BaseRepository<CommentTable, CommentKey>,
}

impl Deref for CommentRepository {
    type Target = BaseRepository<CommentTable, CommentKey>;

    fn deref(&self) -> &Self::Target {
        &self.base
    }
}

impl CommentRepository {
    pub fn new(executor: Arc<dyn QueryExecutor>) -> Self {
        Self {
            base: BaseRepository::new(executor).plain_insert(),
        }
    }

    /// Insert a root comment or a reply.
    ///
    /// A root comment takes two statements: the insert, then stamping the
    /// generated id into `groupId`.
    pub async fn create(&self, comment: &NewComment) -> Result<WriteResult, BoardStoreError> {
        let group_id = comment.group_id.filter(|id| *id != 0);
        let (depth, sequence) = match group_id {
            Some(group) => {
                let replies = self.base.count(&CommentKey::group(group)).await?;
                (2, replies.max(0) as u64 + 1)
            }
            None => (1, 1),
        };

        let row = CommentInsert {
            author: &comment.author,
            content: &comment.content,
            post_id: comment.post_id,
            group_id,
            sequence,
            depth,
        };
        let result = self.base.insert(&row, &[]).await?;

        if group_id.is_none() && result.insert_id != 0 {
            let comment_id = result.insert_id;
            self.base
                .update_one(&CommentKey::comment(comment_id), &json!({ "groupId": comment_id }))
                .await?;
        }

        crate::debug_log!(
            "Comment {} created on post {} (depth {}, sequence {})",
            result.insert_id,
            comment.post_id,
            depth,
            sequence
        );
        Ok(result)
    }

    /// All comments of a post, each thread root followed by its replies
    pub async fn read_by_post_id(&self, post_id: u64) -> Result<Vec<CommentRow>, BoardStoreError> {
        let options = QueryOptions::new()
            .fields([
                "id", "postId", "author", "groupId", "sequence", "depth", "content", "createdAt",
            ])
            .order_by("COALESCE(groupId, id)", SortOrder::Asc)
            .order_by("sequence", SortOrder::Asc)
            .order_by("id", SortOrder::Asc);

        Ok(self.base.read(&CommentKey::post(post_id), &options).await?)
    }
}
