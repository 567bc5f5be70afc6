//! Paging and sorting types for repokit
//!
//! This crate provides the value objects repositories use to request and
//! return partial query results:
//!
//! - [`Sort`] / [`Order`] - ordering instructions by property
//! - [`Pageable`] - a page request (zero-based page number, page size, sort)
//! - [`Slice`] - a chunk of content that knows whether a next chunk exists
//! - [`Page`] - a slice that also knows the total number of elements

pub mod page;
pub mod pageable;
pub mod slice;
pub mod sort;

use thiserror::Error;

pub use page::Page;
pub use pageable::Pageable;
pub use slice::Slice;
pub use sort::{Direction, Order, Sort};

/// Errors raised when constructing paging values
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required value was out of range
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type using DomainError
pub type Result<T> = std::result::Result<T, DomainError>;
