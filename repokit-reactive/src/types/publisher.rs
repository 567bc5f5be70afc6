use crate::types::{Flux, Mono};
use crate::wrapper::WrapperType;
use crate::Element;
use futures::stream::{Stream, StreamExt};
use once_cell::sync::Lazy;
use std::any::{Any, TypeId};
use std::fmt;
use std::pin::Pin;
use std::task::{Context, Poll};

static PUBLISHER_TYPE: Lazy<WrapperType> =
    Lazy::new(|| WrapperType::of::<Publisher<Element>>("Publisher"));

crate::impl_reactive!(Publisher<Element>, PUBLISHER_TYPE);

/// A stream that remembers the concrete type it was built from
trait Source<T>: Stream<Item = T> + Send + Unpin + 'static {
    fn source_type(&self) -> TypeId;

    fn source_name(&self) -> &'static str;

    fn into_any(self: Box<Self>) -> Box<dyn Any + Send>;
}

impl<T, S> Source<T> for S
where
    S: Stream<Item = T> + Send + Unpin + 'static,
{
    fn source_type(&self) -> TypeId {
        TypeId::of::<S>()
    }

    fn source_name(&self) -> &'static str {
        std::any::type_name::<S>()
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any + Send> {
        self
    }
}

/// The broad multi-emission interface
///
/// Any `Stream + Send + Unpin` can be published. The concrete source type is
/// kept so adapters can hand well-known sources (such as a [`Flux`]) to a more
/// specific adapter instead of adapting the generic stream.
pub struct Publisher<T> {
    source: Box<dyn Source<T>>,
}

impl<T: Send + 'static> Publisher<T> {
    pub fn new<S>(source: S) -> Self
    where
        S: Stream<Item = T> + Send + Unpin + 'static,
    {
        Self {
            source: Box::new(source),
        }
    }

    /// Publish a stream that is not `Unpin` by boxing it
    pub fn from_stream<S>(stream: S) -> Self
    where
        S: Stream<Item = T> + Send + 'static,
    {
        Self::new(stream.boxed())
    }

    /// `TypeId` of the concrete source stream
    pub fn source_type(&self) -> TypeId {
        // Deref explicitly: the box itself is also a `Source`.
        (*self.source).source_type()
    }

    pub fn source_name(&self) -> &'static str {
        (*self.source).source_name()
    }

    pub fn is_source<S: 'static>(&self) -> bool {
        self.source_type() == TypeId::of::<S>()
    }

    /// Take the concrete source back out, or return the publisher unchanged
    pub fn into_source<S: 'static>(self) -> Result<S, Self> {
        if !self.is_source::<S>() {
            return Err(self);
        }
        match Source::into_any(self.source).downcast::<S>() {
            Ok(source) => Ok(*source),
            Err(_) => unreachable!("source type checked above"),
        }
    }

    /// Adapt into a flux
    pub fn flux(self) -> Flux<T> {
        match self.into_source::<Flux<T>>() {
            Ok(flux) => flux,
            Err(publisher) => Flux::from_stream(publisher),
        }
    }
}

impl<T: Send + 'static> From<Flux<T>> for Publisher<T> {
    fn from(flux: Flux<T>) -> Self {
        Self::new(flux)
    }
}

impl<T: Send + 'static> From<Mono<T>> for Publisher<T> {
    fn from(mono: Mono<T>) -> Self {
        Self::new(mono)
    }
}

impl<T> Stream for Publisher<T> {
    type Item = T;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<T>> {
        self.source.poll_next_unpin(cx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.source.size_hint()
    }
}

impl<T: 'static> fmt::Debug for Publisher<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Publisher")
            .field("source", &(*self.source).source_name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;

    #[test]
    fn test_remembers_source_type() {
        let publisher = Publisher::from(Flux::from_iterable(vec![1, 2]));
        assert!(publisher.is_source::<Flux<i32>>());
        assert!(!publisher.is_source::<Mono<i32>>());
    }

    #[test]
    fn test_boxed_stream_source() {
        let publisher = Publisher::from_stream(stream::iter(vec![1]));
        assert!(publisher.is_source::<futures::stream::BoxStream<'static, i32>>());
    }

    #[tokio::test]
    async fn test_into_source_round_trip() {
        let publisher = Publisher::from(Mono::just(9));
        let publisher = match publisher.into_source::<Flux<i32>>() {
            Ok(_) => panic!("not a flux"),
            Err(publisher) => publisher,
        };
        let mono = publisher.into_source::<Mono<i32>>().unwrap();
        assert_eq!(mono.await, Some(9));
    }

    #[tokio::test]
    async fn test_publisher_streams_source() {
        let publisher = Publisher::new(stream::iter(vec!["a", "b"]));
        let items: Vec<&str> = publisher.collect().await;
        assert_eq!(items, vec!["a", "b"]);
    }

    #[test]
    fn test_debug_names_source() {
        let rendered = format!("{:?}", Publisher::from(Mono::just(1)));
        assert!(rendered.starts_with("Publisher"));
        assert!(rendered.contains("Mono"));
    }

    #[tokio::test]
    async fn test_flux_adaptation() {
        let direct = Publisher::from(Flux::from_iterable(vec![1, 2, 3])).flux();
        assert_eq!(direct.collect_list().await, vec![1, 2, 3]);

        let adapted = Publisher::new(stream::iter(vec![4, 5])).flux();
        assert_eq!(adapted.collect_list().await, vec![4, 5]);
    }
}
