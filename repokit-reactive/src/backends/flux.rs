//! The native `Mono` / `Flux` / `Publisher` family.

use crate::adapter::{PublisherSpecialization, WrapperAdapter};
use crate::config::Specialization;
use crate::conversion::ConversionService;
use crate::converter::Converter;
use crate::error::Result;
use crate::types::{Flux, Mono, Publisher};
use crate::wrapper::{AnyWrapper, Reactive, WrapperType};
use crate::Element;
use std::sync::Arc;

pub(crate) fn single_types() -> Vec<&'static WrapperType> {
    vec![<Mono<Element> as Reactive>::descriptor()]
}

pub(crate) fn multi_types() -> Vec<&'static WrapperType> {
    vec![
        <Flux<Element> as Reactive>::descriptor(),
        <Publisher<Element> as Reactive>::descriptor(),
    ]
}

pub(crate) fn adapters(
    specializations: &[Specialization],
    extra: &[PublisherSpecialization],
) -> Result<Vec<Arc<dyn WrapperAdapter>>> {
    let flux: Arc<dyn WrapperAdapter> = Arc::new(FluxAdapter);
    let mono: Arc<dyn WrapperAdapter> = Arc::new(MonoAdapter);

    let mut resolved = Vec::with_capacity(specializations.len() + extra.len());
    for specialization in specializations {
        resolved.push(match specialization {
            Specialization::Flux => PublisherSpecialization::new::<Flux<Element>>(flux.clone())?,
            Specialization::Mono => PublisherSpecialization::new::<Mono<Element>>(mono.clone())?,
        });
    }
    resolved.extend(extra.iter().cloned());

    let publisher = PublisherAdapter::new(resolved, flux.clone());
    Ok(vec![flux, mono, Arc::new(publisher)])
}

/// Accept a publisher, or a flux viewed as one
pub(crate) fn into_publisher(wrapper: AnyWrapper) -> Result<Publisher<Element>> {
    if wrapper.is::<Flux<Element>>() {
        return Ok(Publisher::from(wrapper.downcast::<Flux<Element>>()?));
    }
    wrapper.downcast::<Publisher<Element>>()
}

pub(crate) fn register_converters(service: &mut ConversionService) -> Result<()> {
    service.register_typed(|mono: Mono<Element>| mono.flux())?;
    service.register_typed(|flux: Flux<Element>| flux.next())?;
    service.register_typed(|mono: Mono<Element>| Publisher::from(mono))?;
    service.register_typed(|flux: Flux<Element>| Publisher::from(flux))?;

    let publisher = <Publisher<Element> as Reactive>::descriptor();
    service.register(publisher, <Flux<Element> as Reactive>::descriptor(), |wrapper| {
        Ok(Box::new(into_publisher(wrapper)?.flux()) as AnyWrapper)
    })?;
    service.register(publisher, <Mono<Element> as Reactive>::descriptor(), |wrapper| {
        Ok(Box::new(Mono::from_stream(into_publisher(wrapper)?)) as AnyWrapper)
    })?;
    Ok(())
}

// ============================================================================
// Adapters
// ============================================================================

pub(crate) struct FluxAdapter;

impl WrapperAdapter for FluxAdapter {
    fn wrapper_type(&self) -> &'static WrapperType {
        <Flux<Element> as Reactive>::descriptor()
    }

    fn map(&self, wrapper: AnyWrapper, converter: &Converter) -> Result<AnyWrapper> {
        let flux = wrapper.downcast::<Flux<Element>>()?;
        Ok(Box::new(flux.map(converter.clone().into_fn())))
    }
}

pub(crate) struct MonoAdapter;

impl WrapperAdapter for MonoAdapter {
    fn wrapper_type(&self) -> &'static WrapperType {
        <Mono<Element> as Reactive>::descriptor()
    }

    fn map(&self, wrapper: AnyWrapper, converter: &Converter) -> Result<AnyWrapper> {
        let mono = wrapper.downcast::<Mono<Element>>()?;
        Ok(Box::new(mono.map(converter.clone().into_fn())))
    }
}

/// Adapter for the broad publisher type
///
/// A publisher whose source matches one of the specializations is unwrapped
/// and mapped by that type's adapter, so a publisher over a mono maps to a
/// mono. Anything else is adapted into a flux.
pub(crate) struct PublisherAdapter {
    specializations: Vec<PublisherSpecialization>,
    fallback: Arc<dyn WrapperAdapter>,
}

impl PublisherAdapter {
    pub(crate) fn new(
        specializations: Vec<PublisherSpecialization>,
        fallback: Arc<dyn WrapperAdapter>,
    ) -> Self {
        Self {
            specializations,
            fallback,
        }
    }
}

impl WrapperAdapter for PublisherAdapter {
    fn wrapper_type(&self) -> &'static WrapperType {
        <Publisher<Element> as Reactive>::descriptor()
    }

    fn map(&self, wrapper: AnyWrapper, converter: &Converter) -> Result<AnyWrapper> {
        let mut publisher = into_publisher(wrapper)?;
        for specialization in &self.specializations {
            match specialization.try_map(publisher, converter) {
                Ok(mapped) => {
                    tracing::trace!(
                        specialization = %specialization.wrapper_type(),
                        "Publisher redelegated"
                    );
                    return mapped;
                }
                Err(unmatched) => publisher = unmatched,
            }
        }
        tracing::trace!(source = publisher.source_name(), "Publisher adapted to Flux");
        self.fallback
            .map(Box::new(Flux::from_stream(publisher)), converter)
    }
}
