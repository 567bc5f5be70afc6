//! Runtime descriptors for wrapper types
//!
//! A [`WrapperType`] is the runtime handle of one wrapper type. Descriptors
//! declare the broad interfaces their type is-a, which makes assignability
//! checks possible without the caller naming concrete types.

use crate::error::{ReactiveError, Result};
use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Runtime handle for one wrapper type
///
/// Identity is the Rust `TypeId`; the name is for display only.
#[derive(Clone)]
pub struct WrapperType {
    id: TypeId,
    name: &'static str,
    supertypes: Vec<WrapperType>,
}

impl WrapperType {
    /// Descriptor for `T` with no declared supertypes
    pub fn of<T: ?Sized + 'static>(name: &'static str) -> Self {
        Self {
            id: TypeId::of::<T>(),
            name,
            supertypes: Vec::new(),
        }
    }

    /// Declare that this type is-a `supertype`
    pub fn extending(mut self, supertype: &WrapperType) -> Self {
        self.supertypes.push(supertype.clone());
        self
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn supertypes(&self) -> &[WrapperType] {
        &self.supertypes
    }

    /// True if a value of type `other` can be used where `self` is expected,
    /// i.e. `other` is `self` or (transitively) declares it as a supertype.
    pub fn is_assignable_from(&self, other: &WrapperType) -> bool {
        self.id == other.id
            || other
                .supertypes
                .iter()
                .any(|parent| self.is_assignable_from(parent))
    }
}

impl PartialEq for WrapperType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for WrapperType {}

impl Hash for WrapperType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for WrapperType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl fmt::Display for WrapperType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// A reactive wrapper value whose type is known at runtime
///
/// Implement with [`impl_reactive!`](crate::impl_reactive) rather than by hand.
pub trait Reactive: Send + 'static {
    /// Descriptor of the implementing type
    fn descriptor() -> &'static WrapperType
    where
        Self: Sized;

    /// Descriptor of this value's runtime type
    fn wrapper_type(&self) -> &'static WrapperType;

    fn as_any(&self) -> &dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any + Send>;
}

/// A wrapper of unknown concrete type
pub type AnyWrapper = Box<dyn Reactive>;

impl dyn Reactive {
    /// True if the runtime type is exactly `W`
    pub fn is<W: Reactive>(&self) -> bool {
        self.as_any().is::<W>()
    }

    pub fn downcast_ref<W: Reactive>(&self) -> Option<&W> {
        self.as_any().downcast_ref::<W>()
    }

    /// Unwrap into the concrete type `W`
    ///
    /// Fails with [`ReactiveError::IllegalState`] naming both types when the
    /// runtime type is not exactly `W`.
    pub fn downcast<W: Reactive>(self: Box<Self>) -> Result<W> {
        let actual = self.wrapper_type().name();
        self.into_any()
            .downcast::<W>()
            .map(|wrapper| *wrapper)
            .map_err(|_| {
                ReactiveError::IllegalState(format!(
                    "Expected a {} but got a {}",
                    W::descriptor(),
                    actual
                ))
            })
    }
}

impl fmt::Debug for dyn Reactive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(..)", self.wrapper_type())
    }
}

/// Implement [`Reactive`] for a wrapper type given the static holding its descriptor
///
/// ```ignore
/// static TICKER_TYPE: Lazy<WrapperType> = Lazy::new(|| WrapperType::of::<Ticker>("Ticker"));
/// impl_reactive!(Ticker, TICKER_TYPE);
/// ```
#[macro_export]
macro_rules! impl_reactive {
    ($ty:ty, $descriptor:path) => {
        impl $crate::wrapper::Reactive for $ty {
            fn descriptor() -> &'static $crate::wrapper::WrapperType
            where
                Self: Sized,
            {
                &*$descriptor
            }

            fn wrapper_type(&self) -> &'static $crate::wrapper::WrapperType {
                &*$descriptor
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }

            fn into_any(self: Box<Self>) -> Box<dyn ::std::any::Any + Send> {
                self
            }
        }
    };
}
