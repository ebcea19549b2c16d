//! The key-value carrier used as the intermediate wire form.
//!
//! A [`Container`] maps string keys to [`Slot`]s. A slot is a 32-bit integer,
//! a 64-bit integer, a text, or another container, which gives containers a
//! tree shape. A key that is not present represents a null/omitted value.

// -----------------------------------------------------------------------------
// Modules

mod container;
mod slot;

#[cfg(feature = "serde")]
mod serde;

// -----------------------------------------------------------------------------
// Exports

pub use container::Container;
pub use slot::{Slot, SlotKind};
