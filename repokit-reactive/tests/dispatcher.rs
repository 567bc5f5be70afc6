//! Integration tests for the capability registry and the wrapper dispatcher

#![cfg(all(feature = "flux", feature = "boxed"))]

use futures::future::{BoxFuture, FutureExt};
use futures::stream::{self, BoxStream, StreamExt};
use proptest::prelude::*;
use repokit_reactive::{
    AnyWrapper, Backend, Backends, Cardinality, Converter, Element, Flux, Mono, Publisher,
    PublisherSpecialization, Reactive, ReactiveConfig, ReactiveConverters, ReactiveError,
    ReactiveWrappers, SharedFuture, WrapperAdapter, WrapperType,
};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn converters() -> ReactiveConverters {
    ReactiveConverters::new(Arc::new(ReactiveWrappers::detect())).unwrap()
}

fn double() -> Converter {
    Converter::new(|v| json!(v.as_i64().unwrap() * 2))
}

fn numbers(values: &[i64]) -> Vec<Element> {
    values.iter().map(|v| json!(v)).collect()
}

fn every_type() -> Vec<&'static WrapperType> {
    vec![
        <Mono<Element> as Reactive>::descriptor(),
        <Flux<Element> as Reactive>::descriptor(),
        <Publisher<Element> as Reactive>::descriptor(),
        <BoxFuture<'static, Element> as Reactive>::descriptor(),
        <SharedFuture as Reactive>::descriptor(),
        <BoxStream<'static, Element> as Reactive>::descriptor(),
    ]
}

// ============================================================================
// Classification
// ============================================================================

#[test]
fn test_single_and_multi_are_exclusive() {
    let wrappers = ReactiveWrappers::detect();
    for ty in every_type() {
        let single = wrappers.is_single_type(ty);
        let multi = wrappers.is_multi_type(ty);
        assert!(single ^ multi, "{} must be exactly one of single or multi", ty);
    }
}

#[test]
fn test_every_classified_type_is_supported() {
    let converters = converters();
    for ty in every_type() {
        assert!(converters.supports(ty), "no adapter for {}", ty);
        assert_eq!(converters.is_single_like(ty), converters.wrappers().is_single_type(ty));
        assert_eq!(converters.is_collection_like(ty), converters.wrappers().is_multi_type(ty));
    }
}

#[test]
fn test_plain_type_is_not_supported() {
    struct Plain;
    let plain = WrapperType::of::<Plain>("Plain");
    let converters = converters();
    assert!(!converters.supports(&plain));
    assert!(!converters.is_single_like(&plain));
    assert!(!converters.is_collection_like(&plain));
}

#[test]
fn test_adapter_registration_order() {
    let names: Vec<&str> = converters().adapter_types().map(|t| t.name()).collect();
    assert_eq!(
        names,
        vec!["BoxFuture", "SharedFuture", "BoxStream", "Flux", "Mono", "Publisher"]
    );
}

// ============================================================================
// Mapping
// ============================================================================

#[tokio::test]
async fn test_multi_map_doubles_in_order() {
    let flux = Flux::from_iterable(numbers(&[1, 2, 3]));
    let mapped: Flux<Element> = converters().map_as(Box::new(flux), &double()).unwrap();
    assert_eq!(mapped.collect_list().await, numbers(&[2, 4, 6]));
}

#[tokio::test]
async fn test_single_map_applies_once() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let converter = Converter::new(move |v| {
        counter.fetch_add(1, Ordering::SeqCst);
        json!(format!("{}!", v.as_str().unwrap()))
    });

    let mono: Mono<Element> = converters()
        .map_as(Box::new(Mono::just(json!("hi"))), &converter)
        .unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(mono.await, Some(json!("hi!")));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_empty_single_never_calls_converter() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let converter = Converter::new(move |v| {
        counter.fetch_add(1, Ordering::SeqCst);
        v
    });

    let mono: Mono<Element> = converters()
        .map_as(Box::new(Mono::<Element>::empty()), &converter)
        .unwrap();
    assert_eq!(mono.await, None);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_boxed_family_is_preserved() {
    let converters = converters();

    let future: BoxFuture<'static, Element> = futures::future::ready(json!(8)).boxed();
    let future: BoxFuture<'static, Element> =
        converters.map_as(Box::new(future), &double()).unwrap();
    assert_eq!(future.await, json!(16));

    let stream: BoxStream<'static, Element> = stream::iter(numbers(&[5, 6])).boxed();
    let stream: BoxStream<'static, Element> =
        converters.map_as(Box::new(stream), &double()).unwrap();
    assert_eq!(stream.collect::<Vec<_>>().await, numbers(&[10, 12]));
}

#[test]
fn test_unregistered_type_is_illegal_state() {
    struct Ticker;
    static TICKER_TYPE: once_cell::sync::Lazy<WrapperType> =
        once_cell::sync::Lazy::new(|| WrapperType::of::<Ticker>("Ticker"));
    repokit_reactive::impl_reactive!(Ticker, TICKER_TYPE);

    let err = converters().map(Box::new(Ticker), &double()).unwrap_err();
    match err {
        ReactiveError::IllegalState(message) => {
            assert_eq!(message, "Cannot apply converter to Ticker");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_publisher_redelegation_matches_direct_mapping() {
    let converters = converters();

    let direct: Mono<Element> = converters
        .map_as(Box::new(Mono::just(json!(4))), &double())
        .unwrap();
    let through_publisher: Mono<Element> = converters
        .map_as(Box::new(Publisher::from(Mono::just(json!(4)))), &double())
        .unwrap();
    assert_eq!(direct.await, through_publisher.await);

    let direct: Flux<Element> = converters
        .map_as(Box::new(Flux::from_iterable(numbers(&[1, 2]))), &double())
        .unwrap();
    let through_publisher: Flux<Element> = converters
        .map_as(
            Box::new(Publisher::from(Flux::from_iterable(numbers(&[1, 2])))),
            &double(),
        )
        .unwrap();
    assert_eq!(direct.collect_list().await, through_publisher.collect_list().await);
}

#[tokio::test]
async fn test_generic_publisher_becomes_flux() {
    let publisher = Publisher::new(stream::iter(numbers(&[3, 1])));
    let flux: Flux<Element> = converters().map_as(Box::new(publisher), &double()).unwrap();
    assert_eq!(flux.collect_list().await, numbers(&[6, 2]));
}

#[tokio::test]
async fn test_custom_publisher_specialization() {
    struct Countdown(std::vec::IntoIter<Element>);

    impl futures::Stream for Countdown {
        type Item = Element;

        fn poll_next(
            mut self: std::pin::Pin<&mut Self>,
            _cx: &mut std::task::Context<'_>,
        ) -> std::task::Poll<Option<Element>> {
            std::task::Poll::Ready(self.0.next())
        }
    }

    static COUNTDOWN_TYPE: once_cell::sync::Lazy<WrapperType> =
        once_cell::sync::Lazy::new(|| WrapperType::of::<Countdown>("Countdown"));
    repokit_reactive::impl_reactive!(Countdown, COUNTDOWN_TYPE);

    struct CountdownAdapter;

    impl WrapperAdapter for CountdownAdapter {
        fn wrapper_type(&self) -> &'static WrapperType {
            &COUNTDOWN_TYPE
        }

        fn map(
            &self,
            wrapper: AnyWrapper,
            converter: &Converter,
        ) -> repokit_reactive::Result<AnyWrapper> {
            let countdown = wrapper.downcast::<Countdown>()?;
            let mapped: Vec<Element> = countdown.0.map(|v| converter.convert(v)).collect();
            Ok(Box::new(Countdown(mapped.into_iter())))
        }
    }

    let adapter: Arc<dyn WrapperAdapter> = Arc::new(CountdownAdapter);
    let converters = ReactiveConverters::builder(Arc::new(ReactiveWrappers::detect()))
        .adapter(adapter.clone(), Cardinality::Multi)
        .specialize_publisher(PublisherSpecialization::new::<Countdown>(adapter).unwrap())
        .build()
        .unwrap();

    assert!(converters.is_collection_like(&COUNTDOWN_TYPE));
    for ty in converters.adapter_types() {
        assert_eq!(
            converters.supports(ty),
            converters.is_single_like(ty) || converters.is_collection_like(ty),
            "{} must be classified iff it has an adapter",
            ty
        );
    }

    let publisher = Publisher::new(Countdown(numbers(&[3, 2, 1]).into_iter()));
    let countdown: Countdown = converters.map_as(Box::new(publisher), &double()).unwrap();
    assert_eq!(countdown.0.collect::<Vec<_>>(), numbers(&[6, 4, 2]));
}

// ============================================================================
// Conversion
// ============================================================================

#[test]
fn test_to_wrapper_identity_returns_same_box() {
    let flux: AnyWrapper = Box::new(Flux::from_iterable(numbers(&[1])));
    let before = &*flux as *const dyn Reactive as *const ();

    let converters = converters();
    let same = converters
        .to_wrapper(flux, <Flux<Element> as Reactive>::descriptor())
        .unwrap();
    assert_eq!(&*same as *const dyn Reactive as *const (), before);

    let as_publisher = converters
        .to_wrapper(same, <Publisher<Element> as Reactive>::descriptor())
        .unwrap();
    assert_eq!(&*as_publisher as *const dyn Reactive as *const (), before);
    assert!(as_publisher.is::<Flux<Element>>());
}

#[tokio::test]
async fn test_to_wrapper_converts_across_backends() {
    let converters = converters();
    let stream: BoxStream<'static, Element> = stream::iter(numbers(&[7, 8])).boxed();

    let mono = converters
        .to_wrapper(Box::new(stream), <Mono<Element> as Reactive>::descriptor())
        .unwrap()
        .downcast::<Mono<Element>>()
        .unwrap();
    assert_eq!(mono.await, Some(json!(7)));

    let shared: SharedFuture = futures::future::ready(json!(1)).boxed().shared();
    let mono: Mono<Element> = converters.convert(Box::new(shared)).unwrap();
    assert_eq!(mono.await, Some(json!(1)));
}

#[test]
fn test_unsupported_conversion() {
    let converters = converters();
    let shared: SharedFuture = futures::future::ready(json!(1)).boxed().shared();
    let err = converters
        .to_wrapper(Box::new(shared), <Flux<Element> as Reactive>::descriptor())
        .unwrap_err();
    match err {
        ReactiveError::UnsupportedConversion { from, to } => {
            assert_eq!(from, "SharedFuture");
            assert_eq!(to, "Flux");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_to_wrapper_broad_target_uses_assignable_conversion() {
    let converters = converters();
    let publisher = <Publisher<Element> as Reactive>::descriptor();

    // No BoxFuture -> Publisher pair; the first registration whose target is
    // a Publisher is BoxFuture -> Flux.
    let future: BoxFuture<'static, Element> = futures::future::ready(json!(5)).boxed();
    let converted = converters.to_wrapper(Box::new(future), publisher).unwrap();
    assert_eq!(converted.wrapper_type().name(), "Flux");
    assert!(publisher.is_assignable_from(converted.wrapper_type()));
    let flux = converted.downcast::<Flux<Element>>().unwrap();
    assert_eq!(flux.collect_list().await, numbers(&[5]));

    // An exact pair wins over any assignable one.
    let stream: BoxStream<'static, Element> = stream::iter(numbers(&[1, 2])).boxed();
    let converted = converters.to_wrapper(Box::new(stream), publisher).unwrap();
    assert!(converted.is::<Publisher<Element>>());

    let converted = converters
        .to_wrapper(Box::new(Mono::just(json!(3))), publisher)
        .unwrap();
    let publisher = converted.downcast::<Publisher<Element>>().unwrap();
    assert!(publisher.is_source::<Mono<Element>>());
}

#[tokio::test]
async fn test_custom_single_adapter_is_classified() {
    struct Ticker(Element);

    static TICKER_TYPE: once_cell::sync::Lazy<WrapperType> =
        once_cell::sync::Lazy::new(|| WrapperType::of::<Ticker>("Ticker"));
    repokit_reactive::impl_reactive!(Ticker, TICKER_TYPE);

    struct TickerAdapter;

    impl WrapperAdapter for TickerAdapter {
        fn wrapper_type(&self) -> &'static WrapperType {
            &TICKER_TYPE
        }

        fn map(
            &self,
            wrapper: AnyWrapper,
            converter: &Converter,
        ) -> repokit_reactive::Result<AnyWrapper> {
            let ticker = wrapper.downcast::<Ticker>()?;
            Ok(Box::new(Ticker(converter.convert(ticker.0))))
        }
    }

    let converters = ReactiveConverters::builder(Arc::new(ReactiveWrappers::detect()))
        .adapter(Arc::new(TickerAdapter), Cardinality::Single)
        .build()
        .unwrap();

    assert!(converters.supports(&TICKER_TYPE));
    assert!(converters.is_single_like(&TICKER_TYPE));
    assert!(!converters.is_collection_like(&TICKER_TYPE));
    assert!(converters.wrappers().single_types().contains(&&*TICKER_TYPE));

    let ticker: Ticker = converters.map_as(Box::new(Ticker(json!(21))), &double()).unwrap();
    assert_eq!(ticker.0, json!(42));

    // The registry handed to the builder is left untouched.
    assert!(!ReactiveWrappers::detect().is_single_type(&TICKER_TYPE));
}

// ============================================================================
// Degradation
// ============================================================================

#[tokio::test]
async fn test_single_backend_still_works() {
    let wrappers = Arc::new(ReactiveWrappers::new(Backends::only(Backend::Flux)));
    let converters = ReactiveConverters::new(wrappers).unwrap();

    let stream_type = <BoxStream<'static, Element> as Reactive>::descriptor();
    assert!(!converters.supports(stream_type));
    assert!(!converters.is_collection_like(stream_type));

    let flux: Flux<Element> = converters
        .map_as(Box::new(Flux::from_iterable(numbers(&[1, 2, 3]))), &double())
        .unwrap();
    assert_eq!(flux.collect_list().await, numbers(&[2, 4, 6]));

    let stream: BoxStream<'static, Element> = stream::iter(numbers(&[1])).boxed();
    assert!(matches!(
        converters.map(Box::new(stream), &double()),
        Err(ReactiveError::IllegalState(_))
    ));
}

#[test]
fn test_from_config_without_specializations() {
    let config =
        ReactiveConfig::from_yaml("backends: [flux]\npublisher_specializations: []\n").unwrap();
    let converters = ReactiveConverters::from_config(&config).unwrap();

    let mapped = converters
        .map(Box::new(Publisher::from(Mono::just(json!(1)))), &double())
        .unwrap();
    assert!(mapped.is::<Flux<Element>>());
    assert!(!converters.wrappers().is_present(Backend::Boxed));
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_multi_map_preserves_order(values in proptest::collection::vec(-1000i64..1000, 0..50)) {
        let flux = Flux::from_iterable(numbers(&values));
        let mapped: Flux<Element> = converters().map_as(Box::new(flux), &double()).unwrap();

        let expected: Vec<Element> = values.iter().map(|v| json!(v * 2)).collect();
        prop_assert_eq!(futures::executor::block_on(mapped.collect_list()), expected);
    }
}
