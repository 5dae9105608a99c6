//! Content module - post view models and pagination

pub mod pagination;
mod post;

pub use post::{Post, PostFields, PostPagination};
