//! # repokit-reactive
//!
//! Detection and adaptation of reactive wrapper types, so repository methods
//! can return different reactive containers interchangeably.
//!
//! Wrapper families ("backends") are feature-gated:
//!
//! - `flux` (default) - the native [`Mono`], [`Flux`] and [`Publisher`] types
//! - `boxed` (default) - `BoxFuture`, `Shared<BoxFuture>` and `BoxStream` from `futures`
//!
//! Two components do the work:
//!
//! - [`ReactiveWrappers`] classifies wrapper types as single- or
//!   multi-emission, based on the backends that are present.
//! - [`ReactiveConverters`] maps values through an opaque wrapper and converts
//!   between wrapper types, dispatching to one adapter per wrapper type.
//!
//! ## Usage
//!
//! ```ignore
//! use repokit_reactive::{Converter, Element, Flux, ReactiveConverters, ReactiveWrappers};
//! use std::sync::Arc;
//!
//! let wrappers = Arc::new(ReactiveWrappers::detect());
//! let converters = ReactiveConverters::new(wrappers)?;
//!
//! let flux: Flux<Element> = Flux::from_iterable(vec![1.into(), 2.into(), 3.into()]);
//! let doubled = converters.map(Box::new(flux), &Converter::new(|v| (v.as_i64().unwrap() * 2).into()))?;
//! ```

pub mod adapter;
pub mod backend;
mod backends;
pub mod config;
pub mod conversion;
pub mod converter;
pub mod converters;
pub mod error;
pub mod types;
pub mod wrapper;
pub mod wrappers;

pub use adapter::{PublisherSpecialization, WrapperAdapter};
pub use backend::{Backend, Backends, CompiledBackends, PresenceProbe};
pub use config::{ConfigError, ReactiveConfig, Specialization};
pub use conversion::{register_reactive_converters, ConversionService};
pub use converter::Converter;
pub use converters::{ReactiveConverters, ReactiveConvertersBuilder};
pub use error::{ReactiveError, Result};
pub use types::{Flux, Mono, Publisher};
pub use wrapper::{AnyWrapper, Reactive, WrapperType};
pub use wrappers::{Cardinality, ReactiveWrappers};

#[cfg(feature = "boxed")]
pub use backends::boxed::SharedFuture;

/// The dynamically typed value flowing through wrappers handled by the dispatcher
pub type Element = serde_json::Value;
