//! Map sample values through the wrapper dispatcher.

use super::load_config;
use crate::WrapperKind;
use anyhow::{bail, Context, Result};
use futures::future::{BoxFuture, FutureExt};
use futures::stream::{self, BoxStream, StreamExt};
use repokit_reactive::{
    AnyWrapper, Converter, Element, Flux, Mono, Publisher, ReactiveConverters, SharedFuture,
};
use serde_json::json;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct MapOptions {
    pub values: Vec<i64>,
    pub multiply: i64,
    pub wrapper: WrapperKind,
    pub json: bool,
}

/// Wrap the values, map them by the factor and print what comes out
pub async fn map_values(config_path: &Path, opts: MapOptions) -> Result<()> {
    let config = load_config(config_path)?;
    let converters = ReactiveConverters::from_config(&config)?;

    let input = build_wrapper(opts.wrapper, &opts.values);
    tracing::debug!(wrapper = %input.wrapper_type(), values = opts.values.len(), "Mapping values");

    let factor = opts.multiply;
    if let Some(n) = opts.values.iter().find(|n| n.checked_mul(factor).is_none()) {
        bail!("Multiplying {} by {} overflows a 64-bit integer", n, factor);
    }
    let converter = Converter::new(move |value| match value.as_i64() {
        Some(n) => n.checked_mul(factor).map_or(Element::Null, Element::from),
        None => value,
    });
    let mapped = converters
        .map(input, &converter)
        .context("Failed to map values")?;

    let wrapper = mapped.wrapper_type().name();
    let values = drain(mapped).await?;

    if opts.json {
        println!("{}", json!({ "wrapper": wrapper, "values": values }));
    } else {
        println!("{} {}", wrapper, Element::from(values));
    }
    Ok(())
}

fn build_wrapper(kind: WrapperKind, values: &[i64]) -> AnyWrapper {
    let elements: Vec<Element> = values.iter().map(|v| json!(v)).collect();
    let first = elements.first().cloned();

    match kind {
        WrapperKind::Flux => Box::new(Flux::from_iterable(elements)),
        WrapperKind::Mono => Box::new(match first {
            Some(value) => Mono::just(value),
            None => Mono::empty(),
        }),
        WrapperKind::Publisher => Box::new(Publisher::new(stream::iter(elements))),
        WrapperKind::Stream => {
            let stream: BoxStream<'static, Element> = stream::iter(elements).boxed();
            Box::new(stream)
        }
        WrapperKind::Future => {
            let future: BoxFuture<'static, Element> =
                futures::future::ready(first.unwrap_or(Element::Null)).boxed();
            Box::new(future)
        }
    }
}

/// Poll a mapped wrapper to completion
async fn drain(wrapper: AnyWrapper) -> Result<Vec<Element>> {
    if wrapper.is::<Flux<Element>>() {
        return Ok(wrapper.downcast::<Flux<Element>>()?.collect_list().await);
    }
    if wrapper.is::<Mono<Element>>() {
        return Ok(wrapper.downcast::<Mono<Element>>()?.await.into_iter().collect());
    }
    if wrapper.is::<Publisher<Element>>() {
        return Ok(wrapper.downcast::<Publisher<Element>>()?.collect().await);
    }
    if wrapper.is::<BoxStream<'static, Element>>() {
        return Ok(wrapper
            .downcast::<BoxStream<'static, Element>>()?
            .collect()
            .await);
    }
    if wrapper.is::<BoxFuture<'static, Element>>() {
        return Ok(vec![wrapper.downcast::<BoxFuture<'static, Element>>()?.await]);
    }
    if wrapper.is::<SharedFuture>() {
        return Ok(vec![wrapper.downcast::<SharedFuture>()?.await]);
    }
    bail!("Don't know how to drain a {}", wrapper.wrapper_type())
}
