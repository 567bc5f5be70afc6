//! # repokit-repository
//!
//! The reactive CRUD repository contract. Single results come back as a
//! [`Mono`], multiple results as a [`Flux`]; nothing touches the store until
//! the returned wrapper is polled.
//!
//! [`InMemoryRepository`] implements the contract over a sorted map and is
//! what the CLI and the tests use.

mod memory;

pub use memory::InMemoryRepository;

use repokit_reactive::{Flux, Mono, Publisher};

/// An entity that knows its own id
pub trait Identifiable {
    type Id: Ord + Clone + Send + Sync + 'static;

    fn id(&self) -> Self::Id;
}

/// Reactive CRUD operations for entities of type `T` keyed by `ID`
///
/// Deleting operations emit `()` once the entities are gone.
pub trait ReactiveCrudRepository<T, ID>: Send + Sync {
    /// Save an entity, emitting the stored instance
    fn save(&self, entity: T) -> Mono<T>;

    fn save_all(&self, entities: Vec<T>) -> Flux<T>;

    /// Save every entity of `entities` as it arrives
    fn save_stream(&self, entities: Publisher<T>) -> Flux<T>;

    fn find_by_id(&self, id: ID) -> Mono<T>;

    /// Look up the first id emitted by `id`
    fn find_by_id_publisher(&self, id: Publisher<ID>) -> Mono<T>;

    fn exists_by_id(&self, id: ID) -> Mono<bool>;

    fn find_all(&self) -> Flux<T>;

    /// Entities with the given ids; unknown ids are skipped
    fn find_all_by_id(&self, ids: Vec<ID>) -> Flux<T>;

    fn find_all_by_id_stream(&self, ids: Publisher<ID>) -> Flux<T>;

    fn count(&self) -> Mono<u64>;

    fn delete_by_id(&self, id: ID) -> Mono<()>;

    fn delete(&self, entity: T) -> Mono<()>;

    fn delete_all_of(&self, entities: Vec<T>) -> Mono<()>;

    fn delete_all(&self) -> Mono<()>;
}
