//! Registry of wrapper-to-wrapper conversions.

use crate::backend::Backends;
use crate::backends;
use crate::error::{ReactiveError, Result};
use crate::wrapper::{AnyWrapper, Reactive, WrapperType};
use std::fmt;
use std::sync::Arc;

type ConvertFn = Arc<dyn Fn(AnyWrapper) -> Result<AnyWrapper> + Send + Sync>;

#[derive(Clone)]
struct Registration {
    source: &'static WrapperType,
    target: &'static WrapperType,
    convert: ConvertFn,
}

/// Converts wrappers from one type to another
///
/// Lookup tries the exact `(runtime type, target)` pair first, then the first
/// registration (in registration order) whose source accepts the runtime type
/// and whose target fits the requested type.
#[derive(Clone, Default)]
pub struct ConversionService {
    registrations: Vec<Registration>,
}

impl ConversionService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a conversion from `source` to `target`
    ///
    /// Registering a pair twice, or a pair whose ends are the same type, is
    /// rejected.
    pub fn register<F>(
        &mut self,
        source: &'static WrapperType,
        target: &'static WrapperType,
        convert: F,
    ) -> Result<()>
    where
        F: Fn(AnyWrapper) -> Result<AnyWrapper> + Send + Sync + 'static,
    {
        if source == target {
            return Err(ReactiveError::InvalidArgument(format!(
                "Conversion from {} to itself",
                source
            )));
        }
        if self.find_exact(source, target).is_some() {
            return Err(ReactiveError::InvalidArgument(format!(
                "Conversion from {} to {} is already registered",
                source, target
            )));
        }
        tracing::trace!(source = %source, target = %target, "Registering conversion");
        self.registrations.push(Registration {
            source,
            target,
            convert: Arc::new(convert),
        });
        Ok(())
    }

    /// Register a typed conversion from `S` to `T`
    pub fn register_typed<S, T, F>(&mut self, convert: F) -> Result<()>
    where
        S: Reactive,
        T: Reactive,
        F: Fn(S) -> T + Send + Sync + 'static,
    {
        self.register(S::descriptor(), T::descriptor(), move |wrapper| {
            let source = wrapper.downcast::<S>()?;
            Ok(Box::new(convert(source)) as AnyWrapper)
        })
    }

    pub fn can_convert(&self, source: &WrapperType, target: &WrapperType) -> bool {
        self.lookup(source, target).is_some()
    }

    /// Convert `wrapper` into a wrapper assignable to `target`
    pub fn convert(&self, wrapper: AnyWrapper, target: &WrapperType) -> Result<AnyWrapper> {
        let source = wrapper.wrapper_type();
        match self.lookup(source, target) {
            Some(registration) => {
                tracing::trace!(
                    source = %source,
                    target = %registration.target,
                    "Converting wrapper"
                );
                (registration.convert)(wrapper)
            }
            None => Err(ReactiveError::UnsupportedConversion {
                from: source.name().to_string(),
                to: target.name().to_string(),
            }),
        }
    }

    /// Registered `(source, target)` pairs, in registration order
    pub fn pairs(&self) -> impl Iterator<Item = (&'static WrapperType, &'static WrapperType)> + '_ {
        self.registrations.iter().map(|r| (r.source, r.target))
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    fn find_exact(&self, source: &WrapperType, target: &WrapperType) -> Option<&Registration> {
        self.registrations
            .iter()
            .find(|r| r.source == source && r.target == target)
    }

    fn lookup(&self, source: &WrapperType, target: &WrapperType) -> Option<&Registration> {
        self.find_exact(source, target).or_else(|| {
            self.registrations.iter().find(|r| {
                r.source.is_assignable_from(source) && target.is_assignable_from(r.target)
            })
        })
    }
}

impl fmt::Debug for ConversionService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.pairs().map(|(s, t)| format!("{} -> {}", s, t)))
            .finish()
    }
}

/// Register the default conversions between the wrapper types of `backends`
///
/// Conversions between two backends are only added when both are present.
pub fn register_reactive_converters(
    service: &mut ConversionService,
    backends: &Backends,
) -> Result<()> {
    backends::register_converters(service, backends)
}
