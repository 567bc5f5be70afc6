//! The wrapper adapter dispatcher.
//!
//! [`ReactiveConverters`] holds one adapter per wrapper type of every present
//! backend, in registration order, plus a [`ConversionService`] preloaded with
//! the default conversions between those types.

use crate::adapter::{PublisherSpecialization, WrapperAdapter};
use crate::backends;
use crate::config::{ReactiveConfig, Specialization};
use crate::conversion::{register_reactive_converters, ConversionService};
use crate::converter::Converter;
use crate::error::{ReactiveError, Result};
use crate::wrapper::{AnyWrapper, Reactive, WrapperType};
use crate::wrappers::{Cardinality, ReactiveWrappers};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Maps and converts opaque reactive wrappers
#[derive(Clone)]
pub struct ReactiveConverters {
    wrappers: Arc<ReactiveWrappers>,
    adapters: Vec<Arc<dyn WrapperAdapter>>,
    conversions: ConversionService,
}

impl ReactiveConverters {
    /// Dispatcher over the backends of `wrappers` with default settings
    pub fn new(wrappers: Arc<ReactiveWrappers>) -> Result<Self> {
        Self::builder(wrappers).build()
    }

    pub fn builder(wrappers: Arc<ReactiveWrappers>) -> ReactiveConvertersBuilder {
        ReactiveConvertersBuilder::new(wrappers)
    }

    /// Registry and dispatcher built from one configuration
    pub fn from_config(config: &ReactiveConfig) -> Result<Self> {
        let wrappers = Arc::new(ReactiveWrappers::from_config(config));
        Self::builder(wrappers)
            .specializations(config.publisher_specializations.clone())
            .build()
    }

    pub fn wrappers(&self) -> &Arc<ReactiveWrappers> {
        &self.wrappers
    }

    pub fn conversions(&self) -> &ConversionService {
        &self.conversions
    }

    /// Types with an adapter, in dispatch order
    pub fn adapter_types(&self) -> impl Iterator<Item = &'static WrapperType> + '_ {
        self.adapters.iter().map(|adapter| adapter.wrapper_type())
    }

    /// Whether some adapter can handle values of type `ty`
    pub fn supports(&self, ty: &WrapperType) -> bool {
        self.adapter_for(ty).is_some()
    }

    pub fn is_single_like(&self, ty: &WrapperType) -> bool {
        self.wrappers.is_single_type(ty)
    }

    pub fn is_collection_like(&self, ty: &WrapperType) -> bool {
        self.wrappers.is_multi_type(ty)
    }

    /// Turn `value` into a wrapper usable as `target`
    ///
    /// A value whose runtime type is already assignable to `target` is
    /// returned as is. Anything else goes through the conversion service.
    pub fn to_wrapper(&self, value: AnyWrapper, target: &WrapperType) -> Result<AnyWrapper> {
        if target.is_assignable_from(value.wrapper_type()) {
            tracing::trace!(wrapper = %value.wrapper_type(), target = %target, "Already assignable");
            return Ok(value);
        }
        self.conversions.convert(value, target)
    }

    /// Convert `value` into exactly `W`
    pub fn convert<W: Reactive>(&self, value: AnyWrapper) -> Result<W> {
        if value.is::<W>() {
            return value.downcast::<W>();
        }
        self.conversions.convert(value, W::descriptor())?.downcast::<W>()
    }

    /// Apply `converter` to each element of `value`
    ///
    /// The first adapter whose type accepts the runtime type of `value` does
    /// the mapping; the result belongs to the same wrapper family.
    pub fn map(&self, value: AnyWrapper, converter: &Converter) -> Result<AnyWrapper> {
        let ty = value.wrapper_type();
        let adapter = self.adapter_for(ty).ok_or_else(|| {
            ReactiveError::IllegalState(format!("Cannot apply converter to {}", ty))
        })?;
        tracing::trace!(wrapper = %ty, adapter = %adapter.wrapper_type(), "Mapping wrapper");
        adapter.map(value, converter)
    }

    /// [`map`](Self::map) and unwrap the result as `W`
    pub fn map_as<W: Reactive>(&self, value: AnyWrapper, converter: &Converter) -> Result<W> {
        self.map(value, converter)?.downcast::<W>()
    }

    fn adapter_for(&self, ty: &WrapperType) -> Option<&Arc<dyn WrapperAdapter>> {
        self.adapters.iter().find(|adapter| adapter.handles(ty))
    }
}

impl fmt::Debug for ReactiveConverters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReactiveConverters")
            .field("backends", self.wrappers.backends())
            .field("adapters", &self.adapter_types().collect::<Vec<_>>())
            .field("conversions", &self.conversions)
            .finish()
    }
}

// ============================================================================
// Builder
// ============================================================================

type PendingConversion = (
    &'static WrapperType,
    &'static WrapperType,
    Arc<dyn Fn(AnyWrapper) -> Result<AnyWrapper> + Send + Sync>,
);

/// Configures a [`ReactiveConverters`] before its adapters are registered
pub struct ReactiveConvertersBuilder {
    wrappers: Arc<ReactiveWrappers>,
    specializations: Vec<Specialization>,
    extra_specializations: Vec<PublisherSpecialization>,
    adapters: Vec<(Arc<dyn WrapperAdapter>, Cardinality)>,
    conversions: Vec<PendingConversion>,
}

impl ReactiveConvertersBuilder {
    pub fn new(wrappers: Arc<ReactiveWrappers>) -> Self {
        Self {
            wrappers,
            specializations: ReactiveConfig::default().publisher_specializations,
            extra_specializations: Vec::new(),
            adapters: Vec::new(),
            conversions: Vec::new(),
        }
    }

    /// Replace the built-in publisher specializations
    pub fn specializations(mut self, specializations: Vec<Specialization>) -> Self {
        self.specializations = specializations;
        self
    }

    /// Add a publisher specialization, tried after the built-in ones
    pub fn specialize_publisher(mut self, specialization: PublisherSpecialization) -> Self {
        self.extra_specializations.push(specialization);
        self
    }

    /// Register an adapter after those of the present backends
    ///
    /// The built dispatcher's registry classifies the adapter's type with
    /// `cardinality`.
    pub fn adapter(mut self, adapter: Arc<dyn WrapperAdapter>, cardinality: Cardinality) -> Self {
        self.adapters.push((adapter, cardinality));
        self
    }

    /// Register a conversion in addition to the defaults
    pub fn conversion<F>(
        mut self,
        source: &'static WrapperType,
        target: &'static WrapperType,
        convert: F,
    ) -> Self
    where
        F: Fn(AnyWrapper) -> Result<AnyWrapper> + Send + Sync + 'static,
    {
        self.conversions.push((source, target, Arc::new(convert)));
        self
    }

    /// Register every adapter and conversion
    ///
    /// Fails with [`ReactiveError::InvalidArgument`] if two adapters are bound
    /// to the same type, an extra adapter's type is already classified with
    /// the other cardinality, or a conversion pair is registered twice.
    pub fn build(self) -> Result<ReactiveConverters> {
        let present = self.wrappers.backends().clone();

        let mut wrappers = self.wrappers;
        if !self.adapters.is_empty() {
            let mut extended = (*wrappers).clone();
            for (adapter, cardinality) in &self.adapters {
                extended = extended.with_type(adapter.wrapper_type(), *cardinality)?;
            }
            wrappers = Arc::new(extended);
        }

        let mut adapters = Vec::new();
        for backend in present.iter() {
            adapters.extend(backends::adapters(
                backend,
                &self.specializations,
                &self.extra_specializations,
            )?);
        }
        adapters.extend(self.adapters.into_iter().map(|(adapter, _)| adapter));

        let mut seen = HashSet::new();
        for adapter in &adapters {
            if !seen.insert(adapter.wrapper_type()) {
                return Err(ReactiveError::InvalidArgument(format!(
                    "Adapter for {} registered twice",
                    adapter.wrapper_type()
                )));
            }
        }

        let mut conversions = ConversionService::new();
        register_reactive_converters(&mut conversions, &present)?;
        for (source, target, convert) in self.conversions {
            conversions.register(source, target, move |wrapper| convert(wrapper))?;
        }

        tracing::debug!(
            backends = %present,
            adapters = adapters.len(),
            conversions = conversions.len(),
            "Reactive converters registered"
        );

        Ok(ReactiveConverters {
            wrappers,
            adapters,
            conversions,
        })
    }
}
