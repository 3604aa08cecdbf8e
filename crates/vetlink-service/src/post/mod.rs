//! Feed posts, likes, and comments.

pub mod service;

pub use service::PostService;
