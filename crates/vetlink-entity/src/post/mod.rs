//! Post entity: feed posts, likes, and comments.

pub mod model;

pub use model::{CreatePost, Post, PostComment, PostFilter};
