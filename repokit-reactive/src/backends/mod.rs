//! Per-backend wrapper families: descriptors, adapters and default conversions.
//!
//! Each backend module is compiled only with its cargo feature. The functions
//! here dispatch on [`Backend`] so callers never need their own `cfg` arms.

#[cfg(feature = "boxed")]
pub(crate) mod boxed;
#[cfg(feature = "flux")]
pub(crate) mod flux;

use crate::adapter::{PublisherSpecialization, WrapperAdapter};
use crate::backend::{Backend, Backends};
use crate::config::Specialization;
use crate::conversion::ConversionService;
use crate::error::Result;
use crate::wrapper::WrapperType;
use std::sync::Arc;

/// Single-emission types of `backend`
pub(crate) fn single_types(backend: Backend) -> Vec<&'static WrapperType> {
    match backend {
        #[cfg(feature = "boxed")]
        Backend::Boxed => boxed::single_types(),
        #[cfg(feature = "flux")]
        Backend::Flux => flux::single_types(),
        #[allow(unreachable_patterns)]
        _ => Vec::new(),
    }
}

/// Multi-emission types of `backend`
pub(crate) fn multi_types(backend: Backend) -> Vec<&'static WrapperType> {
    match backend {
        #[cfg(feature = "boxed")]
        Backend::Boxed => boxed::multi_types(),
        #[cfg(feature = "flux")]
        Backend::Flux => flux::multi_types(),
        #[allow(unreachable_patterns)]
        _ => Vec::new(),
    }
}

/// Adapters for `backend`, in registration order
///
/// `specializations` and `extra` configure the publisher adapter and are
/// ignored by backends without one.
#[allow(unused_variables)]
pub(crate) fn adapters(
    backend: Backend,
    specializations: &[Specialization],
    extra: &[PublisherSpecialization],
) -> Result<Vec<Arc<dyn WrapperAdapter>>> {
    match backend {
        #[cfg(feature = "boxed")]
        Backend::Boxed => Ok(boxed::adapters()),
        #[cfg(feature = "flux")]
        Backend::Flux => flux::adapters(specializations, extra),
        #[allow(unreachable_patterns)]
        _ => Ok(Vec::new()),
    }
}

/// Register the default conversions between the wrapper types of `backends`
#[allow(unused_variables)]
pub(crate) fn register_converters(
    service: &mut ConversionService,
    backends: &Backends,
) -> Result<()> {
    #[cfg(feature = "boxed")]
    if backends.contains(Backend::Boxed) {
        boxed::register_converters(service)?;
    }

    #[cfg(feature = "flux")]
    if backends.contains(Backend::Flux) {
        flux::register_converters(service)?;
    }

    #[cfg(all(feature = "boxed", feature = "flux"))]
    if backends.contains(Backend::Boxed) && backends.contains(Backend::Flux) {
        boxed::register_flux_bridges(service)?;
    }

    Ok(())
}
