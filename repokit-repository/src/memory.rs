use crate::{Identifiable, ReactiveCrudRepository};
use futures::future;
use futures::stream::{self, StreamExt};
use parking_lot::RwLock;
use repokit_domain::{Page, Pageable};
use repokit_reactive::{Flux, Mono, Publisher};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Repository keeping entities in memory, ordered by id
///
/// Clones share the same store.
pub struct InMemoryRepository<T: Identifiable> {
    store: Arc<RwLock<BTreeMap<T::Id, T>>>,
}

impl<T> InMemoryRepository<T>
where
    T: Identifiable + Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    /// Repository preloaded with `entities`
    pub fn with_entities<I: IntoIterator<Item = T>>(entities: I) -> Self {
        let store: BTreeMap<T::Id, T> = entities
            .into_iter()
            .map(|entity| (entity.id(), entity))
            .collect();
        tracing::debug!(entities = store.len(), "In-memory repository created");
        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }

    /// One page of entities in id order
    pub fn paged(&self, pageable: Pageable) -> Mono<Page<T>> {
        let store = self.store.clone();
        Mono::from_future(async move {
            let store = store.read();
            let content: Vec<T> = store
                .values()
                .skip(pageable.offset())
                .take(pageable.page_size())
                .cloned()
                .collect();
            Page::new(content, Some(pageable), store.len() as u64)
        })
    }

    /// Emit a snapshot taken when the flux is first polled
    fn deferred<F>(&self, snapshot: F) -> Flux<T>
    where
        F: FnOnce(&BTreeMap<T::Id, T>) -> Vec<T> + Send + 'static,
    {
        let store = self.store.clone();
        Flux::from_stream(
            stream::once(async move { snapshot(&store.read()) }).flat_map(stream::iter),
        )
    }

    fn write<R, F>(&self, update: F) -> Mono<R>
    where
        R: Send + 'static,
        F: FnOnce(&mut BTreeMap<T::Id, T>) -> R + Send + 'static,
    {
        let store = self.store.clone();
        Mono::from_future(async move { update(&mut store.write()) })
    }
}

impl<T> Default for InMemoryRepository<T>
where
    T: Identifiable + Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Identifiable> Clone for InMemoryRepository<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<T> ReactiveCrudRepository<T, T::Id> for InMemoryRepository<T>
where
    T: Identifiable + Clone + Send + Sync + 'static,
{
    fn save(&self, entity: T) -> Mono<T> {
        self.write(move |store| {
            tracing::trace!("Saving entity");
            store.insert(entity.id(), entity.clone());
            entity
        })
    }

    fn save_all(&self, entities: Vec<T>) -> Flux<T> {
        self.save_stream(Publisher::new(stream::iter(entities)))
    }

    fn save_stream(&self, entities: Publisher<T>) -> Flux<T> {
        let store = self.store.clone();
        Flux::from_stream(entities.map(move |entity| {
            store.write().insert(entity.id(), entity.clone());
            entity
        }))
    }

    fn find_by_id(&self, id: T::Id) -> Mono<T> {
        let store = self.store.clone();
        Mono::from_optional(async move { store.read().get(&id).cloned() })
    }

    fn find_by_id_publisher(&self, id: Publisher<T::Id>) -> Mono<T> {
        let store = self.store.clone();
        Mono::from_optional(async move {
            let mut ids = id;
            let id = ids.next().await?;
            store.read().get(&id).cloned()
        })
    }

    fn exists_by_id(&self, id: T::Id) -> Mono<bool> {
        let store = self.store.clone();
        Mono::from_future(async move { store.read().contains_key(&id) })
    }

    fn find_all(&self) -> Flux<T> {
        self.deferred(|store| store.values().cloned().collect())
    }

    fn find_all_by_id(&self, ids: Vec<T::Id>) -> Flux<T> {
        self.deferred(move |store| ids.iter().filter_map(|id| store.get(id).cloned()).collect())
    }

    fn find_all_by_id_stream(&self, ids: Publisher<T::Id>) -> Flux<T> {
        let store = self.store.clone();
        Flux::from_stream(ids.filter_map(move |id| future::ready(store.read().get(&id).cloned())))
    }

    fn count(&self) -> Mono<u64> {
        let store = self.store.clone();
        Mono::from_future(async move { store.read().len() as u64 })
    }

    fn delete_by_id(&self, id: T::Id) -> Mono<()> {
        self.write(move |store| {
            store.remove(&id);
        })
    }

    fn delete(&self, entity: T) -> Mono<()> {
        self.delete_by_id(entity.id())
    }

    fn delete_all_of(&self, entities: Vec<T>) -> Mono<()> {
        self.write(move |store| {
            for entity in &entities {
                store.remove(&entity.id());
            }
        })
    }

    fn delete_all(&self) -> Mono<()> {
        self.write(|store| {
            tracing::trace!(entities = store.len(), "Deleting all entities");
            store.clear();
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Note {
        id: u32,
        text: &'static str,
    }

    impl Identifiable for Note {
        type Id = u32;

        fn id(&self) -> u32 {
            self.id
        }
    }

    fn note(id: u32, text: &'static str) -> Note {
        Note { id, text }
    }

    #[tokio::test]
    async fn test_save_is_lazy() {
        let repository = InMemoryRepository::new();
        let pending = repository.save(note(1, "a"));
        assert_eq!(repository.count().await, Some(0));

        assert_eq!(pending.await, Some(note(1, "a")));
        assert_eq!(repository.count().await, Some(1));
    }

    #[tokio::test]
    async fn test_save_replaces_by_id() {
        let repository = InMemoryRepository::new();
        repository.save(note(1, "a")).await;
        repository.save(note(1, "b")).await;
        assert_eq!(repository.find_by_id(1).await, Some(note(1, "b")));
        assert_eq!(repository.count().await, Some(1));
    }

    #[tokio::test]
    async fn test_find_all_orders_by_id() {
        let repository = InMemoryRepository::with_entities(vec![note(3, "c"), note(1, "a")]);
        let ids: Vec<u32> = repository
            .find_all()
            .collect_list()
            .await
            .into_iter()
            .map(|n| n.id)
            .collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn test_find_missing_is_empty() {
        let repository = InMemoryRepository::<Note>::new();
        assert_eq!(repository.find_by_id(9).await, None);
        assert_eq!(repository.exists_by_id(9).await, Some(false));
    }

    #[tokio::test]
    async fn test_delete_completes_with_unit() {
        let repository = InMemoryRepository::with_entities(vec![note(1, "a"), note(2, "b")]);
        assert_eq!(repository.delete(note(1, "ignored")).await, Some(()));
        assert_eq!(repository.exists_by_id(1).await, Some(false));
        assert_eq!(repository.exists_by_id(2).await, Some(true));
    }

    #[tokio::test]
    async fn test_clones_share_store() {
        let repository = InMemoryRepository::new();
        let other = repository.clone();
        repository.save(note(5, "shared")).await;
        assert_eq!(other.find_by_id(5).await, Some(note(5, "shared")));
    }
}
