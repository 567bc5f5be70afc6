//! Adapter strategies bound to one wrapper type each.

use crate::converter::Converter;
use crate::error::{ReactiveError, Result};
use crate::types::Publisher;
use crate::wrapper::{AnyWrapper, Reactive, WrapperType};
use crate::Element;
use std::fmt;
use std::sync::Arc;

// ============================================================================
// Adapter Trait
// ============================================================================

/// Mapping logic for one concrete wrapper type
pub trait WrapperAdapter: Send + Sync {
    /// The wrapper type this adapter is bound to
    fn wrapper_type(&self) -> &'static WrapperType;

    /// Apply `converter` to every element of `wrapper`, returning a wrapper of
    /// the same family. Nothing is polled here.
    fn map(&self, wrapper: AnyWrapper, converter: &Converter) -> Result<AnyWrapper>;

    /// Whether values of type `ty` can be handed to [`map`](Self::map)
    fn handles(&self, ty: &WrapperType) -> bool {
        self.wrapper_type().is_assignable_from(ty)
    }
}

impl fmt::Debug for dyn WrapperAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WrapperAdapter({})", self.wrapper_type())
    }
}

// ============================================================================
// Publisher Specializations
// ============================================================================

type Unwrap = fn(Publisher<Element>) -> std::result::Result<AnyWrapper, Publisher<Element>>;

/// A concrete source type the publisher adapter hands to its own adapter
///
/// When a [`Publisher`] was built from a `W`, the `W` is taken back out and
/// mapped by `adapter` instead of being adapted as a generic stream.
#[derive(Clone)]
pub struct PublisherSpecialization {
    wrapper_type: &'static WrapperType,
    unwrap: Unwrap,
    adapter: Arc<dyn WrapperAdapter>,
}

impl PublisherSpecialization {
    /// Specialize sources of type `W`, mapped by `adapter`
    ///
    /// Fails with [`ReactiveError::InvalidArgument`] if `adapter` does not
    /// handle `W`.
    pub fn new<W: Reactive>(adapter: Arc<dyn WrapperAdapter>) -> Result<Self> {
        let wrapper_type = W::descriptor();
        if !adapter.handles(wrapper_type) {
            return Err(ReactiveError::InvalidArgument(format!(
                "Adapter for {} cannot map {}",
                adapter.wrapper_type(),
                wrapper_type
            )));
        }
        Ok(Self {
            wrapper_type,
            unwrap: unwrap_source::<W>,
            adapter,
        })
    }

    pub fn wrapper_type(&self) -> &'static WrapperType {
        self.wrapper_type
    }

    /// Map `publisher` through the specialized adapter if its source matches,
    /// otherwise hand the publisher back untouched.
    pub fn try_map(
        &self,
        publisher: Publisher<Element>,
        converter: &Converter,
    ) -> std::result::Result<Result<AnyWrapper>, Publisher<Element>> {
        let source = (self.unwrap)(publisher)?;
        Ok(self.adapter.map(source, converter))
    }
}

impl fmt::Debug for PublisherSpecialization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PublisherSpecialization")
            .field("wrapper_type", &self.wrapper_type)
            .field("adapter", &self.adapter.wrapper_type())
            .finish()
    }
}

fn unwrap_source<W: Reactive>(
    publisher: Publisher<Element>,
) -> std::result::Result<AnyWrapper, Publisher<Element>> {
    publisher
        .into_source::<W>()
        .map(|source| Box::new(source) as AnyWrapper)
}
