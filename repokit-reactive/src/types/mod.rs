//! Native reactive wrapper types
//!
//! Thin wrappers over boxed `futures` futures and streams:
//!
//! - [`Mono`] emits at most one element
//! - [`Flux`] emits zero or more elements
//! - [`Publisher`] is the broad interface: any `Stream` behind one type

mod flux;
mod mono;
mod publisher;

pub use flux::Flux;
pub use mono::Mono;
pub use publisher::Publisher;
