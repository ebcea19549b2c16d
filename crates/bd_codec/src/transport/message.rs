use alloc::string::String;

use crate::container::Container;
use crate::error::CodecError;
use crate::plan::Codec;

// -----------------------------------------------------------------------------
// Message

/// A message envelope: an optional destination address and an extras container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    address: Option<String>,
    extras: Container,
}

impl Message {
    /// Creates a message with no address and empty extras.
    #[inline]
    pub const fn new() -> Self {
        Self {
            address: None,
            extras: Container::new(),
        }
    }

    /// Creates a message sent to `address`.
    #[inline]
    pub fn to(address: impl Into<String>) -> Self {
        Self {
            address: Some(address.into()),
            extras: Container::new(),
        }
    }

    #[inline]
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    #[inline]
    pub fn set_address(&mut self, address: impl Into<String>) {
        self.address = Some(address.into());
    }

    #[inline]
    pub fn extras(&self) -> &Container {
        &self.extras
    }

    #[inline]
    pub fn extras_mut(&mut self) -> &mut Container {
        &mut self.extras
    }

    /// Copies every entry of `extras` into the message, replacing entries
    /// with the same key.
    #[inline]
    pub fn put_extras(&mut self, extras: Container) {
        self.extras.merge(extras);
    }

    #[inline]
    pub fn into_extras(self) -> Container {
        self.extras
    }
}

// -----------------------------------------------------------------------------
// MessageCodec

/// Carries values encoded by `C` in a message's extras.
///
/// # Examples
///
/// ```
/// use bd_codec::derive::Record;
/// use bd_codec::RecordCodec;
/// use bd_codec::transport::{Message, MessageCodec};
///
/// #[derive(Record, Debug, PartialEq)]
/// struct Ping {
///     seq: i64,
/// }
///
/// let codec = MessageCodec::new(RecordCodec::<Ping>::derive().unwrap());
///
/// let message = codec.write_into(Message::to("pong-service"), &Ping { seq: 9 }).unwrap();
/// assert_eq!(message.address(), Some("pong-service"));
/// assert_eq!(message.extras().get_i64("seq"), Some(9));
/// assert_eq!(codec.read(&message).unwrap(), Ping { seq: 9 });
/// ```
#[derive(Debug, Clone)]
pub struct MessageCodec<C> {
    codec: C,
}

impl<C> MessageCodec<C> {
    #[inline]
    pub const fn new(codec: C) -> Self {
        Self { codec }
    }

    #[inline]
    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Decodes a value from the message's extras.
    pub fn read<T>(&self, message: &Message) -> Result<T, CodecError>
    where
        C: Codec<T>,
    {
        self.codec.decode(message.extras())
    }

    /// Encodes `value` into the extras of a new message.
    pub fn write<T>(&self, value: &T) -> Result<Message, CodecError>
    where
        C: Codec<T>,
    {
        self.write_into(Message::new(), value)
    }

    /// Encodes `value` into the extras of `message`, keeping its address and
    /// other extras.
    pub fn write_into<T>(&self, mut message: Message, value: &T) -> Result<Message, CodecError>
    where
        C: Codec<T>,
    {
        message.put_extras(self.codec.encode(value)?);
        Ok(message)
    }
}

#[cfg(all(test, feature = "derive"))]
mod tests {
    use super::*;
    use crate::derive::Record;
    use crate::plan::RecordCodec;
    use crate::sequence::for_sequence;

    #[derive(Record, Debug, Clone, PartialEq)]
    struct Address {
        city: String,
        zip: i32,
    }

    fn codec() -> MessageCodec<RecordCodec<Address>> {
        MessageCodec::new(RecordCodec::derive().unwrap())
    }

    #[test]
    fn write_then_read() {
        let value = Address {
            city: "NYC".into(),
            zip: 10001,
        };
        let message = codec().write(&value).unwrap();

        assert_eq!(message.address(), None);
        assert_eq!(message.extras().len(), 2);
        assert_eq!(codec().read(&message).unwrap(), value);
    }

    #[test]
    fn write_into_keeps_existing_extras() {
        let mut message = Message::to("geo");
        message.extras_mut().put_text("trace", "t-1");
        message.extras_mut().put_i32("zip", 0);

        let value = Address {
            city: "Oslo".into(),
            zip: 150,
        };
        let message = codec().write_into(message, &value).unwrap();

        assert_eq!(message.address(), Some("geo"));
        assert_eq!(message.extras().get_text("trace"), Some("t-1"));
        assert_eq!(message.extras().get_i32("zip"), Some(150));
        assert_eq!(codec().read(&message).unwrap(), value);
    }

    #[test]
    fn read_missing_field() {
        let mut message = Message::new();
        message.extras_mut().put_text("city", "Rome");

        assert_eq!(
            codec().read(&message),
            Err(CodecError::MissingRequiredField("zip".into()))
        );
    }

    #[test]
    fn sequence_in_message() {
        let codec = MessageCodec::new(for_sequence(RecordCodec::<Address>::derive().unwrap()));
        let value = vec![Address {
            city: "Lima".into(),
            zip: 15001,
        }];

        let message = codec.write(&value).unwrap();
        assert_eq!(message.extras().get_i32("list_size"), Some(1));
        let decoded: Vec<Address> = codec.read(&message).unwrap();
        assert_eq!(decoded, value);
    }
}
