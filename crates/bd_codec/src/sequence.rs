//! Lifting an item codec to a codec of sequences.
//!
//! A sequence of `n` items is stored as:
//!
//! - [`SEQUENCE_SIZE_KEY`] (`"list_size"`): `n` as a 32-bit integer,
//! - `"item_0"` .. `"item_{n-1}"`: each item encoded by the item codec into
//!   its own nested container.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::container::{Container, Slot, SlotKind};
use crate::error::CodecError;
use crate::plan::Codec;

/// The key holding the number of items.
pub const SEQUENCE_SIZE_KEY: &str = "list_size";

const ITEM_KEY_PREFIX: &str = "item_";

/// Returns the key of the item at `index`.
///
/// ```
/// assert_eq!(bd_codec::sequence::item_key(3), "item_3");
/// ```
#[inline]
pub fn item_key(index: usize) -> String {
    format!("{ITEM_KEY_PREFIX}{index}")
}

/// The codec of `Vec<T>` built from a codec of `T`.
///
/// # Examples
///
/// ```
/// use bd_codec::derive::Record;
/// use bd_codec::sequence::for_sequence;
/// use bd_codec::{Codec, RecordCodec};
///
/// #[derive(Record, Debug, PartialEq)]
/// struct Tag {
///     label: String,
/// }
///
/// let codec = for_sequence(RecordCodec::<Tag>::derive().unwrap());
/// let tags = vec![Tag { label: "a".into() }, Tag { label: "b".into() }];
///
/// let container = codec.encode(&tags).unwrap();
/// assert_eq!(container.get_i32("list_size"), Some(2));
/// assert_eq!(
///     container.get_nested("item_1").and_then(|c| c.get_text("label")),
///     Some("b"),
/// );
/// assert_eq!(codec.decode(&container).unwrap(), tags);
/// ```
#[derive(Debug, Clone)]
pub struct SequenceCodec<C> {
    item: C,
}

impl<C> SequenceCodec<C> {
    #[inline]
    pub const fn new(item: C) -> Self {
        Self { item }
    }

    /// The codec applied to each item.
    #[inline]
    pub fn item_codec(&self) -> &C {
        &self.item
    }

    #[inline]
    pub fn into_inner(self) -> C {
        self.item
    }
}

/// Lifts `item` to a codec of sequences.
#[inline]
pub const fn for_sequence<C>(item: C) -> SequenceCodec<C> {
    SequenceCodec::new(item)
}

impl<T, C: Codec<T>> Codec<Vec<T>> for SequenceCodec<C> {
    fn write(&self, container: &mut Container, value: &Vec<T>) -> Result<(), CodecError> {
        let Ok(size) = i32::try_from(value.len()) else {
            return Err(CodecError::InvalidLength {
                field: SEQUENCE_SIZE_KEY.into(),
                length: i64::try_from(value.len()).unwrap_or(i64::MAX),
            });
        };

        let items = value
            .iter()
            .map(|item| self.item.encode(item))
            .collect::<Result<Vec<_>, _>>()?;

        container.put_i32(SEQUENCE_SIZE_KEY, size);
        for (index, item) in items.into_iter().enumerate() {
            container.put_nested(item_key(index), item);
        }
        Ok(())
    }

    fn decode(&self, container: &Container) -> Result<Vec<T>, CodecError> {
        let declared = match container.get(SEQUENCE_SIZE_KEY) {
            Some(Slot::Int32(size)) => *size,
            Some(other) => {
                return Err(CodecError::SlotMismatch {
                    field: SEQUENCE_SIZE_KEY.into(),
                    expected: SlotKind::Int32,
                    found: other.kind(),
                });
            }
            None => return Err(CodecError::MissingRequiredField(SEQUENCE_SIZE_KEY.into())),
        };

        let Ok(declared) = usize::try_from(declared) else {
            return Err(CodecError::InvalidLength {
                field: SEQUENCE_SIZE_KEY.into(),
                length: i64::from(declared),
            });
        };

        let mut items = Vec::with_capacity(declared.min(container.len()));
        for index in 0..declared {
            let key = item_key(index);
            match container.get(&key) {
                Some(Slot::Nested(nested)) => items.push(self.item.decode(nested)?),
                Some(other) => {
                    return Err(CodecError::SlotMismatch {
                        field: key.into(),
                        expected: SlotKind::Nested,
                        found: other.kind(),
                    });
                }
                None => {
                    return Err(CodecError::SizeMismatch {
                        declared,
                        available: available_items(container, declared),
                    });
                }
            }
        }
        Ok(items)
    }
}

/// Counts the item keys below `declared` present in `container`.
fn available_items(container: &Container, declared: usize) -> usize {
    (0..declared)
        .filter(|index| container.contains_key(&item_key(*index)))
        .count()
}

#[cfg(all(test, feature = "derive"))]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::derive::Record;
    use crate::plan::RecordCodec;

    #[derive(Record, Debug, Clone, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    fn codec() -> SequenceCodec<RecordCodec<Point>> {
        for_sequence(RecordCodec::derive().unwrap())
    }

    #[test]
    fn round_trip() {
        let points = vec![Point { x: 1, y: 2 }, Point { x: 3, y: 4 }];
        let container = codec().encode(&points).unwrap();

        assert_eq!(container.len(), 3);
        assert_eq!(container.get_i32("list_size"), Some(2));
        assert_eq!(
            container.get_nested("item_0").and_then(|c| c.get_i32("x")),
            Some(1)
        );
        assert_eq!(codec().decode(&container).unwrap(), points);
    }

    #[test]
    fn empty_sequence() {
        let container = codec().encode(&Vec::<Point>::new()).unwrap();

        assert_eq!(container.len(), 1);
        assert_eq!(container.get_i32(SEQUENCE_SIZE_KEY), Some(0));
        assert!(codec().decode(&container).unwrap().is_empty());
    }

    #[test]
    fn missing_items() {
        let mut container = codec().encode(&vec![Point { x: 1, y: 1 }]).unwrap();
        container.put_i32(SEQUENCE_SIZE_KEY, 3);

        assert_eq!(
            codec().decode(&container),
            Err(CodecError::SizeMismatch {
                declared: 3,
                available: 1,
            })
        );
    }

    #[test]
    fn misnamed_items_are_not_counted() {
        let mut container = codec().encode(&vec![Point { x: 1, y: 1 }]).unwrap();
        container.put_i32(SEQUENCE_SIZE_KEY, 3);
        container.put_nested("item_01", Container::new());
        container.put_nested("item_+2", Container::new());

        assert_eq!(
            codec().decode(&container),
            Err(CodecError::SizeMismatch {
                declared: 3,
                available: 1,
            })
        );
    }

    #[test]
    fn missing_size() {
        assert_eq!(
            codec().decode(&Container::new()),
            Err(CodecError::MissingRequiredField(SEQUENCE_SIZE_KEY.into()))
        );
    }

    #[test]
    fn negative_size() {
        let mut container = Container::new();
        container.put_i32(SEQUENCE_SIZE_KEY, -1);

        assert!(matches!(
            codec().decode(&container),
            Err(CodecError::InvalidLength { length: -1, .. })
        ));
    }

    #[test]
    fn extra_items_are_ignored() {
        let mut container = codec().encode(&vec![Point { x: 5, y: 6 }]).unwrap();
        container.put_nested("item_1", Container::new());

        assert_eq!(codec().decode(&container).unwrap(), [Point { x: 5, y: 6 }]);
    }

    #[test]
    fn nested_sequences() {
        let nested = for_sequence(codec());
        let value = vec![vec![Point { x: 1, y: 2 }], Vec::new()];

        let container = nested.encode(&value).unwrap();
        let inner = container.get_nested("item_0").unwrap();
        assert_eq!(inner.get_i32("list_size"), Some(1));
        assert_eq!(nested.decode(&container).unwrap(), value);
    }
}
