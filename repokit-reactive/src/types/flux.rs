use crate::types::{Mono, Publisher};
use crate::wrapper::{Reactive, WrapperType};
use crate::Element;
use futures::stream::{self, BoxStream, Stream, StreamExt};
use once_cell::sync::Lazy;
use std::fmt;
use std::pin::Pin;
use std::task::{Context, Poll};

static FLUX_TYPE: Lazy<WrapperType> = Lazy::new(|| {
    WrapperType::of::<Flux<Element>>("Flux").extending(<Publisher<Element> as Reactive>::descriptor())
});

crate::impl_reactive!(Flux<Element>, FLUX_TYPE);

/// A producer of zero or more elements
pub struct Flux<T> {
    inner: BoxStream<'static, T>,
}

impl<T: Send + 'static> Flux<T> {
    pub fn from_stream<S>(stream: S) -> Self
    where
        S: Stream<Item = T> + Send + 'static,
    {
        Self {
            inner: stream.boxed(),
        }
    }

    /// A flux emitting each item of `items`, in order
    pub fn from_iterable<I>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let items: Vec<T> = items.into_iter().collect();
        Self::from_stream(stream::iter(items))
    }

    pub fn just(value: T) -> Self {
        Self::from_stream(stream::once(async move { value }))
    }

    pub fn empty() -> Self {
        Self::from_stream(stream::empty())
    }

    /// Transform each element, preserving order
    pub fn map<U, F>(self, f: F) -> Flux<U>
    where
        U: Send + 'static,
        F: FnMut(T) -> U + Send + 'static,
    {
        Flux::from_stream(self.inner.map(f))
    }

    /// A mono emitting the first element, if any
    pub fn next(self) -> Mono<T> {
        Mono::from_stream(self.inner)
    }

    /// Drain every element into a vector
    pub async fn collect_list(self) -> Vec<T> {
        self.inner.collect().await
    }

    /// A mono emitting the number of elements
    pub fn count(self) -> Mono<u64> {
        Mono::from_future(self.inner.fold(0u64, |count, _| async move { count + 1 }))
    }

    pub fn into_stream(self) -> BoxStream<'static, T> {
        self.inner
    }
}

impl<T: Send + 'static> FromIterator<T> for Flux<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_iterable(iter)
    }
}

impl<T> Stream for Flux<T> {
    type Item = T;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<T>> {
        self.inner.poll_next_unpin(cx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> fmt::Debug for Flux<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Flux").finish_non_exhaustive()
    }
}
