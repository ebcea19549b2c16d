//! Adapters moving encoded values through carriers.
//!
//! - [`Message`] and [`MessageCodec`]: a message envelope whose extras
//!   container receives the encoded value.
//! - [`Parcel`] and [`ParcelCodec`]: a length-tagged byte stream, behind the
//!   `parcel` feature.

// -----------------------------------------------------------------------------
// Modules

mod message;

#[cfg(feature = "parcel")]
mod parcel;

// -----------------------------------------------------------------------------
// Exports

pub use message::{Message, MessageCodec};

#[cfg(feature = "parcel")]
pub use parcel::{Parcel, ParcelCodec, ParcelLimits};
