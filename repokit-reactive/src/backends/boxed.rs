//! Boxed futures and streams from the `futures` crate.

use crate::adapter::WrapperAdapter;
use crate::conversion::ConversionService;
use crate::converter::Converter;
use crate::error::Result;
use crate::wrapper::{AnyWrapper, WrapperType};
use crate::Element;
use futures::future::{BoxFuture, FutureExt, Shared};
use futures::stream::{self, BoxStream, StreamExt};
use once_cell::sync::Lazy;
use std::sync::Arc;

/// A boxed future that can be cloned and awaited by several consumers
pub type SharedFuture = Shared<BoxFuture<'static, Element>>;

static FUTURE_TYPE: Lazy<WrapperType> =
    Lazy::new(|| WrapperType::of::<BoxFuture<'static, Element>>("BoxFuture"));
static SHARED_FUTURE_TYPE: Lazy<WrapperType> =
    Lazy::new(|| WrapperType::of::<SharedFuture>("SharedFuture"));
static STREAM_TYPE: Lazy<WrapperType> =
    Lazy::new(|| WrapperType::of::<BoxStream<'static, Element>>("BoxStream"));

crate::impl_reactive!(BoxFuture<'static, Element>, FUTURE_TYPE);
crate::impl_reactive!(SharedFuture, SHARED_FUTURE_TYPE);
crate::impl_reactive!(BoxStream<'static, Element>, STREAM_TYPE);

pub(crate) fn single_types() -> Vec<&'static WrapperType> {
    vec![&*FUTURE_TYPE, &*SHARED_FUTURE_TYPE]
}

pub(crate) fn multi_types() -> Vec<&'static WrapperType> {
    vec![&*STREAM_TYPE]
}

pub(crate) fn adapters() -> Vec<Arc<dyn WrapperAdapter>> {
    vec![
        Arc::new(FutureAdapter),
        Arc::new(SharedFutureAdapter),
        Arc::new(StreamAdapter),
    ]
}

pub(crate) fn register_converters(service: &mut ConversionService) -> Result<()> {
    service.register_typed(|future: BoxFuture<'static, Element>| {
        stream::once(future).boxed()
    })?;
    service.register_typed(|shared: SharedFuture| -> BoxFuture<'static, Element> {
        shared.boxed()
    })?;
    Ok(())
}

/// Conversions between boxed wrappers and the native family
#[cfg(feature = "flux")]
pub(crate) fn register_flux_bridges(service: &mut ConversionService) -> Result<()> {
    use crate::types::{Flux, Mono, Publisher};

    service.register_typed(|future: BoxFuture<'static, Element>| Mono::from_future(future))?;
    service.register_typed(|future: BoxFuture<'static, Element>| {
        Flux::from_stream(stream::once(future))
    })?;
    service.register_typed(|shared: SharedFuture| Mono::from_future(shared))?;
    service.register_typed(|stream: BoxStream<'static, Element>| Flux::from_stream(stream))?;
    service.register_typed(|stream: BoxStream<'static, Element>| Mono::from_stream(stream))?;
    service.register_typed(|stream: BoxStream<'static, Element>| Publisher::new(stream))?;
    service.register_typed(|flux: Flux<Element>| flux.into_stream())?;
    service.register_typed(|mono: Mono<Element>| -> BoxStream<'static, Element> {
        StreamExt::boxed(mono)
    })?;
    Ok(())
}

// ============================================================================
// Adapters
// ============================================================================

struct FutureAdapter;

impl WrapperAdapter for FutureAdapter {
    fn wrapper_type(&self) -> &'static WrapperType {
        &FUTURE_TYPE
    }

    fn map(&self, wrapper: AnyWrapper, converter: &Converter) -> Result<AnyWrapper> {
        let future = wrapper.downcast::<BoxFuture<'static, Element>>()?;
        let mapped: BoxFuture<'static, Element> = future.map(converter.clone().into_fn()).boxed();
        Ok(Box::new(mapped))
    }
}

struct SharedFutureAdapter;

impl WrapperAdapter for SharedFutureAdapter {
    fn wrapper_type(&self) -> &'static WrapperType {
        &SHARED_FUTURE_TYPE
    }

    fn map(&self, wrapper: AnyWrapper, converter: &Converter) -> Result<AnyWrapper> {
        let shared = wrapper.downcast::<SharedFuture>()?;
        let mapped: SharedFuture = shared.map(converter.clone().into_fn()).boxed().shared();
        Ok(Box::new(mapped))
    }
}

struct StreamAdapter;

impl WrapperAdapter for StreamAdapter {
    fn wrapper_type(&self) -> &'static WrapperType {
        &STREAM_TYPE
    }

    fn map(&self, wrapper: AnyWrapper, converter: &Converter) -> Result<AnyWrapper> {
        let stream = wrapper.downcast::<BoxStream<'static, Element>>()?;
        let mapped: BoxStream<'static, Element> = stream.map(converter.clone().into_fn()).boxed();
        Ok(Box::new(mapped))
    }
}
