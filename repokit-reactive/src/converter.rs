//! Element transforms applied by the dispatcher.

use crate::Element;
use std::fmt;
use std::sync::Arc;

/// A shareable element transform
///
/// Multi-emission wrappers call it once per element, possibly from whatever
/// task polls the stream, so it must not rely on hidden mutable state.
#[derive(Clone)]
pub struct Converter {
    f: Arc<dyn Fn(Element) -> Element + Send + Sync>,
}

impl Converter {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Element) -> Element + Send + Sync + 'static,
    {
        Self { f: Arc::new(f) }
    }

    pub fn identity() -> Self {
        Self::new(|value| value)
    }

    pub fn convert(&self, value: Element) -> Element {
        (self.f)(value)
    }

    /// Owned closure form, for handing to `map` combinators
    pub fn into_fn(self) -> impl Fn(Element) -> Element + Send + Sync + 'static {
        move |value| (self.f)(value)
    }
}

impl fmt::Debug for Converter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Converter")
    }
}
