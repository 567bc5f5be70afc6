//! Capability registry: which wrapper types exist and what they emit.

use crate::backend::{Backend, Backends};
use crate::backends;
use crate::config::ReactiveConfig;
use crate::error::{ReactiveError, Result};
use crate::wrapper::{Reactive, WrapperType};
use std::fmt;

/// How many elements a wrapper type emits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cardinality {
    /// Zero or one element
    Single,
    /// Zero or more elements
    Multi,
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cardinality::Single => f.write_str("single"),
            Cardinality::Multi => f.write_str("multi"),
        }
    }
}

/// Classifies wrapper types as single- or multi-emission
///
/// Built once from a [`Backends`] set and never mutated afterwards; share it
/// behind an `Arc`. A type is single (multi) if it is assignable to one of the
/// single (multi) types of a present backend.
#[derive(Debug, Clone)]
pub struct ReactiveWrappers {
    backends: Backends,
    single_types: Vec<&'static WrapperType>,
    multi_types: Vec<&'static WrapperType>,
}

impl ReactiveWrappers {
    pub fn new(backends: Backends) -> Self {
        let mut single_types = Vec::new();
        let mut multi_types = Vec::new();
        for backend in backends.iter() {
            single_types.extend(backends::single_types(backend));
            multi_types.extend(backends::multi_types(backend));
        }

        tracing::debug!(
            backends = %backends,
            single = single_types.len(),
            multi = multi_types.len(),
            "Reactive wrappers registered"
        );

        Self {
            backends,
            single_types,
            multi_types,
        }
    }

    /// Registry over every compiled backend
    pub fn detect() -> Self {
        Self::new(Backends::detect())
    }

    pub fn from_config(config: &ReactiveConfig) -> Self {
        Self::new(config.backends())
    }

    pub fn backends(&self) -> &Backends {
        &self.backends
    }

    pub fn is_present(&self, backend: Backend) -> bool {
        self.backends.contains(backend)
    }

    /// True if no backend is present
    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }

    /// Whether `ty` emits at most one element
    pub fn is_single_type(&self, ty: &WrapperType) -> bool {
        self.single_types
            .iter()
            .any(|single| single.is_assignable_from(ty))
    }

    /// Whether `ty` emits zero or more elements
    pub fn is_multi_type(&self, ty: &WrapperType) -> bool {
        self.multi_types
            .iter()
            .any(|multi| multi.is_assignable_from(ty))
    }

    pub fn is_single<W: Reactive>(&self) -> bool {
        self.is_single_type(W::descriptor())
    }

    pub fn is_multi<W: Reactive>(&self) -> bool {
        self.is_multi_type(W::descriptor())
    }

    /// Whether `ty` is a wrapper of any present backend
    pub fn supports(&self, ty: &WrapperType) -> bool {
        self.is_single_type(ty) || self.is_multi_type(ty)
    }

    /// Cardinality of `ty`, if it is a wrapper of any present backend
    pub fn cardinality(&self, ty: &WrapperType) -> Option<Cardinality> {
        if self.is_single_type(ty) {
            Some(Cardinality::Single)
        } else if self.is_multi_type(ty) {
            Some(Cardinality::Multi)
        } else {
            None
        }
    }

    /// Copy of this registry that also classifies `ty`
    ///
    /// Used while building a dispatcher with extra adapters, so every adapter
    /// type stays classified. A type that already has the other cardinality
    /// is rejected.
    pub(crate) fn with_type(
        &self,
        ty: &'static WrapperType,
        cardinality: Cardinality,
    ) -> Result<Self> {
        let mut extended = self.clone();
        match self.cardinality(ty) {
            Some(existing) if existing == cardinality => {}
            Some(existing) => {
                return Err(ReactiveError::InvalidArgument(format!(
                    "{} is already classified as {}, not {}",
                    ty, existing, cardinality
                )));
            }
            None => match cardinality {
                Cardinality::Single => extended.single_types.push(ty),
                Cardinality::Multi => extended.multi_types.push(ty),
            },
        }
        Ok(extended)
    }

    pub fn single_types(&self) -> &[&'static WrapperType] {
        &self.single_types
    }

    pub fn multi_types(&self) -> &[&'static WrapperType] {
        &self.multi_types
    }
}

impl Default for ReactiveWrappers {
    fn default() -> Self {
        Self::detect()
    }
}
