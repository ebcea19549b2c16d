use alloc::string::String;
use alloc::vec::Vec;

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::container::{Container, Slot};
use crate::error::{ParcelError, TransportError};
use crate::plan::Codec;

// Wire format, little-endian:
//
// container := body_len:u32 body
// body      := magic:u32 count:u32 entry*    (entries sorted by key)
// entry     := key:string tag:u8 value
// string    := len:u32 utf8-bytes
// value     := i32 | i64 | string | container

const CONTAINER_MAGIC: u32 = u32::from_le_bytes(*b"BNDL");

const TAG_INT32: u8 = 1;
const TAG_INT64: u8 = 2;
const TAG_TEXT: u8 = 3;
const TAG_NESTED: u8 = 4;

/// Smallest possible entry: empty key, tag and an `i32`.
const MIN_ENTRY_LEN: usize = 4 + 1 + 4;

// -----------------------------------------------------------------------------
// ParcelLimits

/// Bounds applied when reading a parcel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParcelLimits {
    /// Maximum nesting depth of containers.
    pub max_depth: usize,
    /// Maximum byte length of one container body.
    pub max_len: usize,
}

impl ParcelLimits {
    pub const DEFAULT: Self = Self {
        max_depth: 64,
        max_len: 16 * 1024 * 1024,
    };

    #[inline]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[inline]
    pub const fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = max_len;
        self
    }
}

impl Default for ParcelLimits {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}

// -----------------------------------------------------------------------------
// Parcel

/// A byte stream of length-tagged containers.
///
/// Containers are appended with [`Parcel::write_container`] and consumed in
/// the same order with [`Parcel::read_container`].
///
/// # Examples
///
/// ```
/// use bd_codec::container::Container;
/// use bd_codec::transport::Parcel;
///
/// let mut first = Container::new();
/// first.put_i64("id", 7);
///
/// let mut parcel = Parcel::new();
/// parcel.write_container(&first).unwrap();
/// parcel.write_container(&Container::new()).unwrap();
///
/// let mut parcel = Parcel::from_bytes(parcel.into_bytes());
/// assert_eq!(parcel.read_container().unwrap(), first);
/// assert!(parcel.read_container().unwrap().is_empty());
/// assert_eq!(parcel.remaining(), 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Parcel {
    buf: BytesMut,
    cursor: usize,
    limits: ParcelLimits,
}

impl Parcel {
    /// Creates an empty parcel with default limits.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_limits(limits: ParcelLimits) -> Self {
        Self {
            limits,
            ..Self::default()
        }
    }

    /// Creates a parcel positioned at the start of `bytes`.
    pub fn from_bytes(bytes: impl AsRef<[u8]>) -> Self {
        Self {
            buf: BytesMut::from(bytes.as_ref()),
            ..Self::default()
        }
    }

    /// Replaces the limits used by subsequent reads and writes.
    #[inline]
    pub fn set_limits(&mut self, limits: ParcelLimits) {
        self.limits = limits;
    }

    #[inline]
    pub fn limits(&self) -> ParcelLimits {
        self.limits
    }

    /// Total number of bytes in the parcel.
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Number of bytes not yet read.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.cursor
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    #[inline]
    pub fn into_bytes(self) -> Bytes {
        self.buf.freeze()
    }

    /// Appends `container`.
    ///
    /// # Errors
    ///
    /// [`ParcelError::TooDeep`] or [`ParcelError::TooLarge`] if the container
    /// exceeds the limits; the parcel is then left unchanged.
    pub fn write_container(&mut self, container: &Container) -> Result<(), ParcelError> {
        let start = self.buf.len();
        let written = put_container(&mut self.buf, container, 0, &self.limits);
        if written.is_err() {
            self.buf.truncate(start);
        }
        written
    }

    /// Reads the next container.
    ///
    /// # Errors
    ///
    /// Any [`ParcelError`] for malformed or oversized input. The read
    /// position does not move on error.
    pub fn read_container(&mut self) -> Result<Container, ParcelError> {
        let mut src = &self.buf[self.cursor..];
        let before = src.len();
        let container = take_container(&mut src, 0, &self.limits)?;
        self.cursor += before - src.len();
        Ok(container)
    }
}

// -----------------------------------------------------------------------------
// Writing

fn put_container(
    buf: &mut BytesMut,
    container: &Container,
    depth: usize,
    limits: &ParcelLimits,
) -> Result<(), ParcelError> {
    if depth > limits.max_depth {
        return Err(ParcelError::TooDeep(limits.max_depth));
    }

    let len_at = buf.len();
    buf.put_u32_le(0);
    let body_at = buf.len();

    let mut entries: Vec<(&str, &Slot)> = container.iter().collect();
    entries.sort_unstable_by_key(|(key, _)| *key);

    buf.put_u32_le(CONTAINER_MAGIC);
    buf.put_u32_le(len_u32(entries.len(), limits)?);
    for (key, slot) in entries {
        put_str(buf, key, limits)?;
        match slot {
            Slot::Int32(v) => {
                buf.put_u8(TAG_INT32);
                buf.put_i32_le(*v);
            }
            Slot::Int64(v) => {
                buf.put_u8(TAG_INT64);
                buf.put_i64_le(*v);
            }
            Slot::Text(v) => {
                buf.put_u8(TAG_TEXT);
                put_str(buf, v, limits)?;
            }
            Slot::Nested(v) => {
                buf.put_u8(TAG_NESTED);
                put_container(buf, v, depth + 1, limits)?;
            }
        }
    }

    let body_len = len_u32(buf.len() - body_at, limits)?;
    buf[len_at..body_at].copy_from_slice(&body_len.to_le_bytes());
    Ok(())
}

fn put_str(buf: &mut BytesMut, value: &str, limits: &ParcelLimits) -> Result<(), ParcelError> {
    buf.put_u32_le(len_u32(value.len(), limits)?);
    buf.put_slice(value.as_bytes());
    Ok(())
}

fn len_u32(length: usize, limits: &ParcelLimits) -> Result<u32, ParcelError> {
    let too_large = || ParcelError::TooLarge {
        length,
        limit: limits.max_len,
    };
    if length > limits.max_len {
        return Err(too_large());
    }
    u32::try_from(length).map_err(|_| too_large())
}

// -----------------------------------------------------------------------------
// Reading

fn take_container(
    src: &mut &[u8],
    depth: usize,
    limits: &ParcelLimits,
) -> Result<Container, ParcelError> {
    if depth > limits.max_depth {
        return Err(ParcelError::TooDeep(limits.max_depth));
    }

    let declared = take_len(src, limits)?;
    ensure(src, declared)?;
    let (mut body, rest) = src.split_at(declared);

    let magic = take_u32(&mut body)?;
    if magic != CONTAINER_MAGIC {
        return Err(ParcelError::BadMagic(magic));
    }

    let count = take_len(&mut body, limits)?;
    let mut container = Container::with_capacity(count.min(body.len() / MIN_ENTRY_LEN));
    for _ in 0..count {
        let key = take_string(&mut body, limits)?;
        if container.contains_key(&key) {
            return Err(ParcelError::DuplicateKey(key));
        }

        ensure(&body, 1)?;
        let slot = match body.get_u8() {
            TAG_INT32 => {
                ensure(&body, 4)?;
                Slot::Int32(body.get_i32_le())
            }
            TAG_INT64 => {
                ensure(&body, 8)?;
                Slot::Int64(body.get_i64_le())
            }
            TAG_TEXT => Slot::Text(take_string(&mut body, limits)?),
            TAG_NESTED => Slot::Nested(take_container(&mut body, depth + 1, limits)?),
            tag => return Err(ParcelError::UnknownTag(tag)),
        };
        container.insert(key, slot);
    }

    if !body.is_empty() {
        return Err(ParcelError::LengthMismatch {
            declared,
            consumed: declared - body.len(),
        });
    }

    *src = rest;
    Ok(container)
}

fn take_string(src: &mut &[u8], limits: &ParcelLimits) -> Result<String, ParcelError> {
    let len = take_len(src, limits)?;
    ensure(src, len)?;
    let (bytes, rest) = src.split_at(len);
    let value = core::str::from_utf8(bytes).map_err(|_| ParcelError::InvalidUtf8)?;
    *src = rest;
    Ok(value.into())
}

fn take_len(src: &mut &[u8], limits: &ParcelLimits) -> Result<usize, ParcelError> {
    let length = take_u32(src)? as usize;
    if length > limits.max_len {
        return Err(ParcelError::TooLarge {
            length,
            limit: limits.max_len,
        });
    }
    Ok(length)
}

fn take_u32(src: &mut &[u8]) -> Result<u32, ParcelError> {
    ensure(src, 4)?;
    Ok(src.get_u32_le())
}

#[inline]
fn ensure(src: &[u8], needed: usize) -> Result<(), ParcelError> {
    if src.len() < needed {
        return Err(ParcelError::UnexpectedEof {
            needed,
            remaining: src.len(),
        });
    }
    Ok(())
}

// -----------------------------------------------------------------------------
// ParcelCodec

/// Carries values encoded by `C` through a [`Parcel`].
#[derive(Debug, Clone)]
pub struct ParcelCodec<C> {
    codec: C,
}

impl<C> ParcelCodec<C> {
    #[inline]
    pub const fn new(codec: C) -> Self {
        Self { codec }
    }

    #[inline]
    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Encodes `value` and appends it to `parcel`.
    ///
    /// `flags` are the write flags of the carrier; they do not change the
    /// written bytes.
    pub fn write<T>(&self, parcel: &mut Parcel, value: &T, flags: i32) -> Result<(), TransportError>
    where
        C: Codec<T>,
    {
        let container = self.codec.encode(value)?;
        let start = parcel.len();
        parcel.write_container(&container)?;
        log::trace!(
            "wrote {} bytes to parcel, flags {flags:#x}",
            parcel.len() - start
        );
        Ok(())
    }

    /// Reads the next container from `parcel` and decodes it.
    pub fn read<T>(&self, parcel: &mut Parcel) -> Result<T, TransportError>
    where
        C: Codec<T>,
    {
        let container = parcel.read_container()?;
        Ok(self.codec.decode(&container)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Container {
        let mut address = Container::new();
        address.put_text("city", "NYC");
        address.put_i32("zip", 10001);

        let mut person = Container::new();
        person.put_text("name", "Bo");
        person.put_i64("id", i64::MIN);
        person.put_nested("address", address);
        person
    }

    #[test]
    fn layout_is_sorted_and_tagged() {
        let mut container = Container::new();
        container.put_i32("b", 2);
        container.put_i32("a", 1);

        let mut parcel = Parcel::new();
        parcel.write_container(&container).unwrap();

        #[rustfmt::skip]
        let expected: &[u8] = &[
            28, 0, 0, 0,             // body length
            b'B', b'N', b'D', b'L',  // magic
            2, 0, 0, 0,              // count
            1, 0, 0, 0, b'a', 1, 1, 0, 0, 0,
            1, 0, 0, 0, b'b', 1, 2, 0, 0, 0,
        ];
        assert_eq!(parcel.as_bytes(), expected);
    }

    #[test]
    fn read_back() {
        let mut parcel = Parcel::new();
        parcel.write_container(&sample()).unwrap();

        let mut parcel = Parcel::from_bytes(parcel.as_bytes());
        assert_eq!(parcel.read_container().unwrap(), sample());
        assert_eq!(parcel.remaining(), 0);
    }

    #[test]
    fn truncated_input() {
        let mut parcel = Parcel::new();
        parcel.write_container(&sample()).unwrap();
        let bytes = parcel.into_bytes();

        let mut truncated = Parcel::from_bytes(&bytes[..bytes.len() - 1]);
        assert!(matches!(
            truncated.read_container(),
            Err(ParcelError::UnexpectedEof { .. })
        ));
        assert_eq!(truncated.remaining(), bytes.len() - 1);
    }

    #[test]
    fn bad_magic_and_tag() {
        let mut parcel = Parcel::new();
        parcel.write_container(&Container::new()).unwrap();
        let mut bytes = parcel.as_bytes().to_vec();
        bytes[4] = b'X';
        assert!(matches!(
            Parcel::from_bytes(&bytes).read_container(),
            Err(ParcelError::BadMagic(_))
        ));

        let mut container = Container::new();
        container.put_i32("a", 1);
        let mut parcel = Parcel::new();
        parcel.write_container(&container).unwrap();
        let mut bytes = parcel.as_bytes().to_vec();
        bytes[17] = 9;
        assert_eq!(
            Parcel::from_bytes(&bytes).read_container(),
            Err(ParcelError::UnknownTag(9))
        );
    }

    #[test]
    fn depth_limit() {
        let mut container = Container::new();
        for _ in 0..3 {
            let mut outer = Container::new();
            outer.put_nested("inner", container);
            container = outer;
        }

        let shallow = ParcelLimits::DEFAULT.with_max_depth(2);
        let mut parcel = Parcel::with_limits(shallow);
        assert_eq!(
            parcel.write_container(&container),
            Err(ParcelError::TooDeep(2))
        );
        assert!(parcel.is_empty());

        let mut parcel = Parcel::new();
        parcel.write_container(&container).unwrap();
        parcel.set_limits(shallow);
        assert_eq!(parcel.read_container(), Err(ParcelError::TooDeep(2)));
    }

    #[test]
    fn length_limit() {
        let mut container = Container::new();
        container.put_text("blob", "x".repeat(64));

        let mut parcel = Parcel::with_limits(ParcelLimits::DEFAULT.with_max_len(32));
        assert!(matches!(
            parcel.write_container(&container),
            Err(ParcelError::TooLarge { length: 64, limit: 32 })
        ));
    }
}
