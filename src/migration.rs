//! Database migration functionality
//!
//! Creates the board tables if they are missing. Statements go through the
//! coordinator's executor like every other statement.

use crate::core::BoardStore;
use crate::errors::BoardStoreError;

const CREATE_POST_TABLE: &str = "CREATE TABLE IF NOT EXISTS `post` (\
    `id` INT UNSIGNED NOT NULL AUTO_INCREMENT, \
    `title` VARCHAR(255) NOT NULL, \
    `content` TEXT NOT NULL, \
    `author` VARCHAR(64) NOT NULL, \
    `iv` VARCHAR(64) NOT NULL, \
    `encrypted` VARCHAR(255) NOT NULL, \
    `updatedAt` DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP, \
    `createdAt` DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP, \
    PRIMARY KEY (`id`), \
    KEY `idx_post_author` (`author`), \
    FULLTEXT KEY `ft_post_title` (`title`)\
) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4;";

const CREATE_COMMENT_TABLE: &str = "CREATE TABLE IF NOT EXISTS `comment` (\
    `id` INT UNSIGNED NOT NULL AUTO_INCREMENT, \
    `postId` INT UNSIGNED NOT NULL, \
    `groupId` INT UNSIGNED NULL, \
    `author` VARCHAR(64) NOT NULL, \
    `content` TEXT NOT NULL, \
    `sequence` INT UNSIGNED NOT NULL DEFAULT 1, \
    `depth` TINYINT UNSIGNED NOT NULL DEFAULT 1, \
    `createdAt` DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP, \
    PRIMARY KEY (`id`), \
    KEY `idx_comment_post` (`postId`), \
    KEY `idx_comment_group` (`groupId`)\
) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4;";

const CREATE_KEYWORD_TABLE: &str = "CREATE TABLE IF NOT EXISTS `keyword` (\
    `id` INT UNSIGNED NOT NULL AUTO_INCREMENT, \
    `author` VARCHAR(64) NOT NULL, \
    `keyword` VARCHAR(64) NOT NULL, \
    `createdAt` DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP, \
    PRIMARY KEY (`id`), \
    UNIQUE KEY `uq_keyword_author` (`author`, `keyword`), \
    KEY `idx_keyword_keyword` (`keyword`)\
) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4;";

/// Table name and DDL, in creation order
pub const TABLES: [(&str, &str); 3] = [
    ("post", CREATE_POST_TABLE),
    ("comment", CREATE_COMMENT_TABLE),
    ("keyword", CREATE_KEYWORD_TABLE),
];

impl BoardStore {
    /// Create the post, comment and keyword tables.
    /// If recreate is true, drops existing tables first
    pub async fn auto_migrate(&self, recreate: bool) -> Result<(), BoardStoreError> {
        let executor = self.executor();

        if recreate {
            for (table, _) in TABLES.iter().rev() {
                let drop_sql = format!("DROP TABLE IF EXISTS `{}`;", table);
                tracing::info!(table, "Dropping table");
                crate::debug_log!("Dropping table with SQL: {}", drop_sql);
                executor.query_write(&drop_sql).await?;
            }
        }

        for (table, create_sql) in TABLES {
            tracing::info!(table, "Creating table if missing");
            crate::debug_log!("Creating table with SQL: {}", create_sql);
            executor.query_write(create_sql).await?;
        }

        Ok(())
    }
}
