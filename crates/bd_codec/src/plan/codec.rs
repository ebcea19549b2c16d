use alloc::boxed::Box;
use alloc::sync::Arc;

use crate::container::Container;
use crate::error::CodecError;

/// A bidirectional conversion between values of `T` and containers.
///
/// Codecs are immutable once built and may be shared across threads.
pub trait Codec<T> {
    /// Writes the entries of `value` into `container`.
    ///
    /// Existing entries with other keys are left untouched. On error,
    /// `container` is not modified.
    fn write(&self, container: &mut Container, value: &T) -> Result<(), CodecError>;

    /// Reads a value from `container`. Entries the codec does not know are ignored.
    fn decode(&self, container: &Container) -> Result<T, CodecError>;

    /// Creates an empty container and writes `value` into it.
    fn encode(&self, value: &T) -> Result<Container, CodecError> {
        let mut container = Container::new();
        self.write(&mut container, value)?;
        Ok(container)
    }
}

impl<T, C: Codec<T> + ?Sized> Codec<T> for &C {
    #[inline]
    fn write(&self, container: &mut Container, value: &T) -> Result<(), CodecError> {
        (**self).write(container, value)
    }

    #[inline]
    fn decode(&self, container: &Container) -> Result<T, CodecError> {
        (**self).decode(container)
    }
}

impl<T, C: Codec<T> + ?Sized> Codec<T> for Box<C> {
    #[inline]
    fn write(&self, container: &mut Container, value: &T) -> Result<(), CodecError> {
        (**self).write(container, value)
    }

    #[inline]
    fn decode(&self, container: &Container) -> Result<T, CodecError> {
        (**self).decode(container)
    }
}

impl<T, C: Codec<T> + ?Sized> Codec<T> for Arc<C> {
    #[inline]
    fn write(&self, container: &mut Container, value: &T) -> Result<(), CodecError> {
        (**self).write(container, value)
    }

    #[inline]
    fn decode(&self, container: &Container) -> Result<T, CodecError> {
        (**self).decode(container)
    }
}
