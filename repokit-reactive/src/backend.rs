//! Wrapper families and presence probing
//!
//! A [`Backend`] is a family of wrapper types that is present or absent as a
//! unit. Which backends can exist is decided at compile time by cargo
//! features; which ones are used is decided once at startup by building a
//! [`Backends`] set, either from the compiled features or from configuration.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A family of reactive wrapper types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// `BoxFuture`, `Shared<BoxFuture>` and `BoxStream` from the `futures` crate
    Boxed,
    /// The native `Mono`, `Flux` and `Publisher` types
    Flux,
}

impl Backend {
    /// Every backend, in adapter registration order
    pub const ALL: [Backend; 2] = [Backend::Boxed, Backend::Flux];

    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Boxed => "boxed",
            Backend::Flux => "flux",
        }
    }

    /// Whether support for this backend was compiled in
    pub fn is_compiled(&self) -> bool {
        match self {
            Backend::Boxed => cfg!(feature = "boxed"),
            Backend::Flux => cfg!(feature = "flux"),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Answers whether a backend is available in the running process
pub trait PresenceProbe {
    fn is_present(&self, backend: Backend) -> bool;
}

impl<F> PresenceProbe for F
where
    F: Fn(Backend) -> bool,
{
    fn is_present(&self, backend: Backend) -> bool {
        self(backend)
    }
}

/// Probe answering from the enabled cargo features
#[derive(Debug, Clone, Copy, Default)]
pub struct CompiledBackends;

impl PresenceProbe for CompiledBackends {
    fn is_present(&self, backend: Backend) -> bool {
        backend.is_compiled()
    }
}

/// The set of backends in use
///
/// Only compiled backends can be members; anything else is dropped when the
/// set is built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Backends {
    present: BTreeSet<Backend>,
}

impl Backends {
    /// All compiled backends
    pub fn detect() -> Self {
        Self::probe(&CompiledBackends)
    }

    /// All backends `probe` reports as present
    pub fn probe(probe: &dyn PresenceProbe) -> Self {
        Self::from_requested(
            Backend::ALL
                .into_iter()
                .filter(|backend| probe.is_present(*backend)),
        )
    }

    /// The requested backends that are compiled in
    ///
    /// Requested backends that were not compiled are treated as absent.
    pub fn from_requested<I>(requested: I) -> Self
    where
        I: IntoIterator<Item = Backend>,
    {
        let mut present = BTreeSet::new();
        for backend in requested {
            if backend.is_compiled() {
                present.insert(backend);
            } else {
                tracing::warn!(
                    backend = %backend,
                    "Backend requested but not compiled in; treating as absent"
                );
            }
        }
        Self { present }
    }

    /// A set holding just `backend` (if compiled)
    pub fn only(backend: Backend) -> Self {
        Self::from_requested([backend])
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn contains(&self, backend: Backend) -> bool {
        self.present.contains(&backend)
    }

    /// Present backends in registration order
    pub fn iter(&self) -> impl Iterator<Item = Backend> + '_ {
        self.present.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.present.len()
    }

    pub fn is_empty(&self) -> bool {
        self.present.is_empty()
    }
}

impl PresenceProbe for Backends {
    fn is_present(&self, backend: Backend) -> bool {
        self.contains(backend)
    }
}

impl FromIterator<Backend> for Backends {
    fn from_iter<I: IntoIterator<Item = Backend>>(iter: I) -> Self {
        Self::from_requested(iter)
    }
}

impl fmt::Display for Backends {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(|b| b.as_str()).collect();
        write!(f, "[{}]", names.join(", "))
    }
}
