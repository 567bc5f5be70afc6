use crate::types::Flux;
use crate::wrapper::WrapperType;
use crate::Element;
use futures::future::{self, BoxFuture, FutureExt};
use futures::stream::{Stream, StreamExt};
use once_cell::sync::Lazy;
use std::fmt;
use std::future::{Future, IntoFuture};
use std::pin::Pin;
use std::task::{Context, Poll};

static MONO_TYPE: Lazy<WrapperType> = Lazy::new(|| WrapperType::of::<Mono<Element>>("Mono"));

crate::impl_reactive!(Mono<Element>, MONO_TYPE);

/// A deferred producer of at most one element
///
/// Nothing runs until the mono is awaited or polled as a stream. Awaiting
/// yields `Some(value)` or `None` when the mono completes empty.
pub struct Mono<T> {
    // None once the value has been taken by polling as a stream
    inner: Option<BoxFuture<'static, Option<T>>>,
}

impl<T: Send + 'static> Mono<T> {
    pub fn just(value: T) -> Self {
        Self::from_optional(future::ready(Some(value)))
    }

    pub fn empty() -> Self {
        Self::from_optional(future::ready(None))
    }

    /// A mono emitting the output of `future`
    pub fn from_future<F>(future: F) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        Self::from_optional(future.map(Some))
    }

    /// A mono emitting the output of `future` when it is `Some`
    pub fn from_optional<F>(future: F) -> Self
    where
        F: Future<Output = Option<T>> + Send + 'static,
    {
        Self {
            inner: Some(future.boxed()),
        }
    }

    /// A mono emitting the first element of `stream`
    pub fn from_stream<S>(stream: S) -> Self
    where
        S: Stream<Item = T> + Send + 'static,
    {
        Self::from_optional(async move {
            let mut stream = Box::pin(stream);
            stream.next().await
        })
    }

    /// Transform the element, if any
    pub fn map<U, F>(self, f: F) -> Mono<U>
    where
        U: Send + 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        match self.inner {
            Some(inner) => Mono::from_optional(inner.map(|value| value.map(f))),
            None => Mono::empty(),
        }
    }

    /// A flux emitting this mono's element, if any
    pub fn flux(self) -> Flux<T> {
        Flux::from_stream(self)
    }
}

impl<T: Send + 'static> IntoFuture for Mono<T> {
    type Output = Option<T>;
    type IntoFuture = BoxFuture<'static, Option<T>>;

    fn into_future(self) -> Self::IntoFuture {
        match self.inner {
            Some(inner) => inner,
            None => future::ready(None).boxed(),
        }
    }
}

impl<T> Stream for Mono<T> {
    type Item = T;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<T>> {
        let Some(inner) = self.inner.as_mut() else {
            return Poll::Ready(None);
        };
        match inner.poll_unpin(cx) {
            Poll::Ready(value) => {
                self.inner = None;
                Poll::Ready(value)
            }
            Poll::Pending => Poll::Pending,
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.inner {
            Some(_) => (0, Some(1)),
            None => (0, Some(0)),
        }
    }
}

impl<T> fmt::Debug for Mono<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mono")
            .field("completed", &self.inner.is_none())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_just_and_empty() {
        assert_eq!(Mono::just(5).await, Some(5));
        assert_eq!(Mono::<u8>::empty().await, None);
    }

    #[tokio::test]
    async fn test_map() {
        assert_eq!(Mono::just(5).map(|n| n * 3).await, Some(15));
        assert_eq!(Mono::<i32>::empty().map(|n| n * 3).await, None);
    }

    #[tokio::test]
    async fn test_from_stream_takes_first() {
        let mono = Mono::from_stream(futures::stream::iter(vec![7, 8, 9]));
        assert_eq!(mono.await, Some(7));
    }

    #[tokio::test]
    async fn test_polled_as_stream_emits_once() {
        let items: Vec<i32> = Mono::just(1).collect().await;
        assert_eq!(items, vec![1]);
    }

    #[tokio::test]
    async fn test_map_is_lazy() {
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::sync::Arc;

        let called = Arc::new(AtomicBool::new(false));
        let flag = called.clone();
        let mapped = Mono::just(1).map(move |n| {
            flag.store(true, Ordering::SeqCst);
            n
        });
        assert!(!called.load(Ordering::SeqCst));
        assert_eq!(mapped.await, Some(1));
        assert!(called.load(Ordering::SeqCst));
    }
}
