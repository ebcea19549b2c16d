#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Extern Self

// The derive macro emits `bd_codec::...` paths, which must also resolve
// inside this crate's own tests.
extern crate self as bd_codec;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod error;

pub mod container;
pub mod dispatch;
pub mod info;
pub mod plan;
pub mod sequence;
pub mod transport;

// -----------------------------------------------------------------------------
// Top-Level exports

#[cfg(feature = "parcel")]
pub use error::ParcelError;
pub use error::{CodecError, DerivationError, TransportError};

pub use container::{Container, Slot};
pub use info::Record;
pub use plan::{Codec, CodecRegistry, RecordCodec, derive_codec};
pub use sequence::{SequenceCodec, for_sequence};

#[cfg(feature = "derive")]
pub use bd_codec_derive as derive;
