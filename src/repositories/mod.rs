//! Entity repositories
//!
//! Each repository wraps a [`BaseRepository`] for its table and adds the
//! entity-specific operations on top.

pub mod base;
pub mod comment;
pub mod keyword;
pub mod post;

pub use base::{BaseRepository, KeyConditions};
pub use comment::{CommentKey, CommentRepository, CommentRow, CommentTable, NewComment};
pub use keyword::{KeywordAuthor, KeywordKey, KeywordRepository, KeywordTable};
pub use post::{
    NewPost, PostCredentials, PostKey, PostListQuery, PostPatch, PostRepository, PostRow,
    PostSearch, PostTable,
};
