use alloc::string::String;
use core::fmt;

use super::Container;

// -----------------------------------------------------------------------------
// SlotKind

/// The tag of a [`Slot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotKind {
    Int32,
    Int64,
    Text,
    Nested,
}

impl SlotKind {
    /// Returns a lowercase name, used in error messages.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Text => "text",
            Self::Nested => "nested",
        }
    }
}

impl fmt::Display for SlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// -----------------------------------------------------------------------------
// Slot

/// A typed value held at a [`Container`] key.
///
/// # Examples
///
/// ```
/// use bd_codec::container::{Slot, SlotKind};
///
/// let slot = Slot::from("Ann");
/// assert_eq!(slot.kind(), SlotKind::Text);
/// assert_eq!(slot.as_text(), Some("Ann"));
/// assert_eq!(slot.as_i32(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot {
    Int32(i32),
    Int64(i64),
    Text(String),
    Nested(Container),
}

impl Slot {
    /// Returns the tag of this slot.
    #[inline]
    pub const fn kind(&self) -> SlotKind {
        match self {
            Self::Int32(_) => SlotKind::Int32,
            Self::Int64(_) => SlotKind::Int64,
            Self::Text(_) => SlotKind::Text,
            Self::Nested(_) => SlotKind::Nested,
        }
    }

    #[inline]
    pub const fn as_i32(&self) -> Option<i32> {
        match self {
            Self::Int32(v) => Some(*v),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int64(v) => Some(*v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_nested(&self) -> Option<&Container> {
        match self {
            Self::Nested(v) => Some(v),
            _ => None,
        }
    }
}

impl From<i32> for Slot {
    #[inline]
    fn from(value: i32) -> Self {
        Self::Int32(value)
    }
}

impl From<i64> for Slot {
    #[inline]
    fn from(value: i64) -> Self {
        Self::Int64(value)
    }
}

impl From<String> for Slot {
    #[inline]
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for Slot {
    #[inline]
    fn from(value: &str) -> Self {
        Self::Text(String::from(value))
    }
}

impl From<Container> for Slot {
    #[inline]
    fn from(value: Container) -> Self {
        Self::Nested(value)
    }
}
