//! Repository tests
//!
//! Drive the post, comment and keyword repositories through a recording
//! executor and check the statements they produce.

mod common;

use boardstore::prelude::*;
use chrono::NaiveDateTime;
use common::{INSERT_ID, RecordingExecutor};
use serde_json::json;

fn board(executor: &std::sync::Arc<RecordingExecutor>) -> BoardStore {
    BoardStore::with_executor(executor.clone())
}

const POST_FIELDS: &str = "id, title, content, author, updatedAt, createdAt";

// ========================================
// Posts
// ========================================

#[tokio::test]
async fn test_create_post_uses_insert_ignore() {
    let executor = RecordingExecutor::new();

    let result = board(&executor)
        .posts()
        .create_post(&NewPost {
            title: "Hello".into(),
            author: "jane".into(),
            content: "Body".into(),
            iv: "iv1".into(),
            encrypted: "enc1".into(),
        })
        .await
        .unwrap();

    assert_eq!(result.insert_id, INSERT_ID);
    assert_eq!(
        executor.statements(),
        vec![
            "INSERT IGNORE INTO `post` (`title`, `author`, `content`, `iv`, `encrypted`) VALUES ('Hello', 'jane', 'Body', 'iv1', 'enc1');"
        ]
    );
}

#[tokio::test]
async fn test_post_list_search_shapes() {
    let executor = RecordingExecutor::new();
    let posts = board(&executor).posts();

    posts
        .read_all_post_list(&PostListQuery {
            limit: 10,
            offset: 0,
            search: Some(PostSearch::Author("ja".into())),
        })
        .await
        .unwrap();
    posts
        .read_all_post_list(&PostListQuery {
            limit: 10,
            offset: 20,
            search: Some(PostSearch::Title("rust".into())),
        })
        .await
        .unwrap();
    posts
        .read_all_post_list(&PostListQuery {
            limit: 5,
            offset: 0,
            search: None,
        })
        .await
        .unwrap();

    assert_eq!(
        executor.statements(),
        vec![
            format!("SELECT {POST_FIELDS} FROM `post` `po` WHERE `po`.`author` LIKE 'ja%' LIMIT 0, 10;"),
            format!(
                "SELECT {POST_FIELDS} FROM `post` `po` WHERE MATCH(`po`.`title`) AGAINST('rust*' IN BOOLEAN MODE) LIMIT 20, 10;"
            ),
            format!("SELECT {POST_FIELDS} FROM `post` `po` LIMIT 0, 5;"),
        ]
    );
}

#[tokio::test]
async fn test_post_list_decodes_rows() {
    let executor = RecordingExecutor::new();
    executor.push_rows(vec![json!({
        "id": 1,
        "title": "Hello",
        "content": "Body",
        "author": "jane",
        "updatedAt": "2024-05-01 10:00:00",
        "createdAt": "2024-05-01 09:00:00"
    })]);

    let rows = board(&executor)
        .posts()
        .read_all_post_list(&PostListQuery {
            limit: 10,
            offset: 0,
            search: None,
        })
        .await
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].author, "jane");
    assert_eq!(rows[0].updated_at, "2024-05-01 10:00:00");
}

#[tokio::test]
async fn test_update_post_stamps_updated_at() {
    let executor = RecordingExecutor::new();

    board(&executor)
        .posts()
        .update_post(
            3,
            &PostPatch {
                title: Some("New".into()),
                ..PostPatch::default()
            },
        )
        .await
        .unwrap();

    let statements = executor.statements();
    assert_eq!(statements.len(), 1);
    let sql = &statements[0];
    let prefix = "UPDATE `post` `po` SET `title` = 'New', `updatedAt` = '";
    let suffix = "' WHERE `po`.`id` = 3;";
    assert!(sql.starts_with(prefix), "{sql}");
    assert!(sql.ends_with(suffix), "{sql}");

    let stamp = &sql[prefix.len()..sql.len() - suffix.len()];
    assert!(NaiveDateTime::parse_from_str(stamp, "%Y-%m-%d %H:%M:%S").is_ok());
}

#[tokio::test]
async fn test_delete_post_and_missing_id_guard() {
    let executor = RecordingExecutor::new();
    let posts = board(&executor).posts();

    posts.delete_post(3).await.unwrap();
    let refused = posts.delete_post(0).await.unwrap_err();

    assert!(refused.is_bad_request());
    assert_eq!(
        executor.statements(),
        vec!["DELETE `po` FROM `post` `po` WHERE `po`.`id` = 3;"]
    );
}

#[tokio::test]
async fn test_read_post_not_found() {
    let executor = RecordingExecutor::new();

    let error = board(&executor).posts().read_post(9).await.unwrap_err();

    assert!(matches!(error, BoardStoreError::PostNotFound(9)));
}

#[tokio::test]
async fn test_read_credentials() {
    let executor = RecordingExecutor::new();
    executor.push_rows(vec![json!({"id": 5, "iv": "abc", "encrypted": "def"})]);

    let credentials = board(&executor)
        .posts()
        .read_credentials(5)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(credentials.iv, "abc");
    assert_eq!(credentials.encrypted, "def");
    assert_eq!(
        executor.statements(),
        vec!["SELECT id, iv, encrypted FROM `post` `po` WHERE `po`.`id` = 5;"]
    );
}

#[tokio::test]
async fn test_base_count_through_entity_repository() {
    let executor = RecordingExecutor::new();
    executor.push_rows(vec![json!({"count": 4})]);

    let count = board(&executor)
        .posts()
        .count(&PostKey::author("jane"))
        .await
        .unwrap();

    assert_eq!(count, 4);
    assert_eq!(
        executor.statements(),
        vec!["SELECT COUNT(*) AS count FROM `post` `po` WHERE `po`.`author` = 'jane';"]
    );
}

// ========================================
// Comments
// ========================================

#[tokio::test]
async fn test_create_root_comment_backfills_group() {
    let executor = RecordingExecutor::new();

    board(&executor)
        .comments()
        .create(&NewComment {
            author: "joe".into(),
            post_id: 1,
            content: "hi".into(),
            group_id: None,
        })
        .await
        .unwrap();

    assert_eq!(
        executor.statements(),
        vec![
            "INSERT INTO `comment` (`author`, `content`, `postId`, `sequence`, `depth`) VALUES ('joe', 'hi', 1, 1, 1);",
            "UPDATE `comment` `cmt` SET `groupId` = 42 WHERE `cmt`.`id` = 42;",
        ]
    );
}

#[tokio::test]
async fn test_create_reply_counts_group() {
    let executor = RecordingExecutor::new();
    executor.push_rows(vec![json!({"count": 2})]);

    board(&executor)
        .comments()
        .create(&NewComment {
            author: "ann".into(),
            post_id: 1,
            content: "reply".into(),
            group_id: Some(7),
        })
        .await
        .unwrap();

    assert_eq!(
        executor.statements(),
        vec![
            "SELECT COUNT(*) AS count FROM `comment` `cmt` WHERE `cmt`.`groupId` = 7;",
            "INSERT INTO `comment` (`author`, `content`, `postId`, `groupId`, `sequence`, `depth`) VALUES ('ann', 'reply', 1, 7, 3, 2);",
        ]
    );
}

#[tokio::test]
async fn test_thread_walk_numbers_replies_after_root() {
    let executor = RecordingExecutor::new();
    let comments = board(&executor).comments();
    let reply = |content: &str| NewComment {
        author: "ann".into(),
        post_id: 1,
        content: content.into(),
        group_id: Some(INSERT_ID),
    };

    comments
        .create(&NewComment {
            author: "joe".into(),
            post_id: 1,
            content: "root".into(),
            group_id: None,
        })
        .await
        .unwrap();
    // Group 42 holds the backfilled root, then the root and the first reply
    executor.push_rows(vec![json!({"count": 1})]);
    comments.create(&reply("first")).await.unwrap();
    executor.push_rows(vec![json!({"count": 2})]);
    comments.create(&reply("second")).await.unwrap();

    let statements = executor.statements();
    assert_eq!(statements.len(), 6);
    assert_eq!(
        statements[1],
        "UPDATE `comment` `cmt` SET `groupId` = 42 WHERE `cmt`.`id` = 42;"
    );
    assert_eq!(
        statements[3],
        "INSERT INTO `comment` (`author`, `content`, `postId`, `groupId`, `sequence`, `depth`) VALUES ('ann', 'first', 1, 42, 2, 2);"
    );
    assert_eq!(
        statements[5],
        "INSERT INTO `comment` (`author`, `content`, `postId`, `groupId`, `sequence`, `depth`) VALUES ('ann', 'second', 1, 42, 3, 2);"
    );
}

#[tokio::test]
async fn test_read_comments_by_post() {
    let executor = RecordingExecutor::new();
    executor.push_rows(vec![
        json!({"id": 1, "postId": 1, "author": "a", "groupId": 1, "sequence": 1, "depth": 1, "content": "A", "createdAt": "2024-05-01 09:00:00"}),
        json!({"id": 4, "postId": 1, "author": "b", "groupId": null, "sequence": 1, "depth": 1, "content": "D", "createdAt": "2024-05-01 09:05:00"}),
    ]);

    let comments = board(&executor)
        .comments()
        .read_by_post_id(1)
        .await
        .unwrap();

    assert_eq!(comments.len(), 2);
    assert_eq!(comments[1].group_id, None);
    assert_eq!(
        executor.statements(),
        vec![
            "SELECT id, postId, author, groupId, sequence, depth, content, createdAt FROM `comment` `cmt` WHERE `cmt`.`postId` = 1 ORDER BY COALESCE(groupId, id) ASC, sequence ASC, id ASC;"
        ]
    );
}

// ========================================
// Keywords
// ========================================

#[tokio::test]
async fn test_unique_keywords_read_without_condition() {
    let executor = RecordingExecutor::new();
    executor.push_rows(vec![json!({"keyword": "rust"}), json!({"keyword": "sql"})]);

    let keywords = board(&executor)
        .keywords()
        .read_unique_keywords()
        .await
        .unwrap();

    assert_eq!(keywords, vec!["rust".to_string(), "sql".to_string()]);
    assert_eq!(
        executor.statements(),
        vec!["SELECT keyword FROM `keyword` `kw` GROUP BY `keyword`;"]
    );
}

#[tokio::test]
async fn test_authors_by_distinct_keywords_flattened_in_input_order() {
    let executor = RecordingExecutor::new();
    executor.push_rows(vec![
        json!({"author": "jane", "keyword": "rust"}),
        json!({"author": "joe", "keyword": "rust"}),
    ]);
    executor.push_rows(vec![json!({"author": "ann", "keyword": "sql"})]);

    let authors = board(&executor)
        .keywords()
        .read_authors_by_keywords(&["rust".to_string(), "sql".to_string(), "rust".to_string()])
        .await
        .unwrap();

    let names: Vec<_> = authors.iter().map(|a| a.author.as_str()).collect();
    assert_eq!(names, vec!["jane", "joe", "ann"]);
    assert_eq!(
        executor.statements(),
        vec![
            "SELECT author, keyword FROM `keyword` `kw` WHERE `kw`.`keyword` = 'rust';",
            "SELECT author, keyword FROM `keyword` `kw` WHERE `kw`.`keyword` = 'sql';",
        ]
    );
}

#[tokio::test]
async fn test_keyword_insert_and_upsert() {
    let executor = RecordingExecutor::new();
    let keywords = board(&executor).keywords();

    keywords.add_keyword("jane", "rust").await.unwrap();
    keywords
        .insert(&json!({"author": "jane", "keyword": "rust"}), &["keyword"])
        .await
        .unwrap();

    assert_eq!(
        executor.statements(),
        vec![
            "INSERT IGNORE INTO `keyword` (`author`, `keyword`) VALUES ('jane', 'rust');",
            "INSERT INTO `keyword` (`author`, `keyword`) VALUES ('jane', 'rust') ON DUPLICATE KEY UPDATE `keyword` = VALUES(`keyword`);",
        ]
    );
}

// ========================================
// Coordinator
// ========================================

#[tokio::test]
async fn test_health_check_and_migration() {
    let executor = RecordingExecutor::new();
    let store = board(&executor);

    store.health_check().await.unwrap();
    store.auto_migrate(true).await.unwrap();
    store.close().await;

    let statements = executor.statements();
    assert_eq!(statements[0], "SELECT 1;");
    assert_eq!(
        &statements[1..4],
        &[
            "DROP TABLE IF EXISTS `keyword`;",
            "DROP TABLE IF EXISTS `comment`;",
            "DROP TABLE IF EXISTS `post`;",
        ]
    );
    assert!(statements[4].starts_with("CREATE TABLE IF NOT EXISTS `post`"));
    assert!(statements[4].contains("FULLTEXT KEY `ft_post_title` (`title`)"));
    assert!(statements[5].starts_with("CREATE TABLE IF NOT EXISTS `comment`"));
    assert!(statements[6].contains("UNIQUE KEY `uq_keyword_author` (`author`, `keyword`)"));
    assert!(store.pool().is_none());
}
