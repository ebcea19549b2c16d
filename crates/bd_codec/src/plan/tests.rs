use alloc::string::String;

use crate::error::{CodecError, DerivationError};
use crate::info::{FieldArgs, FieldDescriptor, FieldRef, FieldType, Fields};
use crate::info::{NonGenericInfoCell, Record, RecordInfo, describe};
use crate::plan::{Codec, RecordCodec};

#[cfg(feature = "derive")]
mod derived {
    use alloc::string::ToString;
    use alloc::sync::Arc;
    use alloc::vec::Vec;
    use core::any::TypeId;

    use super::*;
    use crate::container::{Container, SlotKind};
    use crate::derive::Record;
    use crate::plan::CodecRegistry;
    use crate::transport::{Message, MessageCodec};

    #[derive(Record, Debug, Clone, PartialEq)]
    struct Address {
        city: String,
        zip: i32,
    }

    #[derive(Record, Debug, Clone, PartialEq)]
    struct Person {
        name: String,
        age: i32,
        nickname: Option<String>,
        address: Address,
    }

    #[derive(Record, Debug, Clone, PartialEq)]
    struct Resident {
        name: String,
        age: i32,
        address: Option<Address>,
    }

    #[derive(Record, Debug, Clone, PartialEq)]
    struct Account {
        id: i64,
        owner: Option<Person>,
    }

    #[derive(Record, Debug, PartialEq)]
    struct Inner {
        inner: i32,
    }

    #[derive(Record, Debug, PartialEq)]
    struct Outer {
        inner: Inner,
    }

    #[derive(Record, Debug, PartialEq)]
    struct Contacts {
        home: Address,
        work: Option<Address>,
    }

    #[derive(Record, Debug, PartialEq)]
    struct Pair<T> {
        first: T,
        second: T,
    }

    #[derive(Record, Debug, PartialEq)]
    struct Tagged<const N: usize> {
        id: i32,
    }

    #[derive(Record, Debug, PartialEq)]
    struct Holder {
        one: Tagged<1>,
        two: Tagged<2>,
    }

    #[derive(Record)]
    struct Flagged {
        id: i32,
        enabled: bool,
    }

    #[derive(Record)]
    struct Wrapper {
        flagged: Option<Flagged>,
    }

    #[derive(Record)]
    struct Node {
        value: i32,
        next: Option<Box<Node>>,
    }

    #[derive(Record)]
    struct Left {
        right: Option<Box<Right>>,
    }

    #[derive(Record)]
    struct Right {
        left: Left,
    }

    fn ann() -> Person {
        Person {
            name: "Ann".into(),
            age: 30,
            nickname: None,
            address: Address {
                city: "NYC".into(),
                zip: 10001,
            },
        }
    }

    #[test]
    fn describe_in_declaration_order() {
        let fields = describe::<Person>().unwrap();
        let names: Vec<_> = fields.iter().map(FieldDescriptor::name).collect();
        assert_eq!(names, ["name", "age", "nickname", "address"]);

        assert!(fields[2].is_nullable());
        assert!(!fields[3].is_nullable());
        assert_eq!(Person::record_info().params(), ["name", "age", "nickname", "address"]);
    }

    #[test]
    fn encode_person() {
        let codec = RecordCodec::<Person>::derive().unwrap();
        let container = codec.encode(&ann()).unwrap();

        let mut address = Container::new();
        address.put_text("city", "NYC");
        address.put_i32("zip", 10001);
        let mut expected = Container::new();
        expected.put_text("name", "Ann");
        expected.put_i32("age", 30);
        expected.put_nested("address", address);

        assert_eq!(container, expected);
        assert!(!container.contains_key("nickname"));
        assert_eq!(codec.decode(&container).unwrap(), ann());
    }

    #[test]
    fn encode_person_json() {
        let codec = RecordCodec::<Person>::derive().unwrap();
        let person = Person {
            nickname: Some("Annie".into()),
            ..ann()
        };

        let json = serde_json::to_string(&codec.encode(&person).unwrap()).unwrap();
        assert_eq!(
            json,
            r#"{"address":{"city":"NYC","zip":10001},"age":30,"name":"Ann","nickname":"Annie"}"#
        );
    }

    #[test]
    fn resident_scenarios() {
        let codec = RecordCodec::<Resident>::derive().unwrap();

        let ann = Resident {
            name: "Ann".into(),
            age: 30,
            address: None,
        };
        let container = codec.encode(&ann).unwrap();
        assert_eq!(
            serde_json::to_string(&container).unwrap(),
            r#"{"age":30,"name":"Ann"}"#
        );
        assert_eq!(codec.decode(&container).unwrap(), ann);

        let bo = Resident {
            name: "Bo".into(),
            age: 5,
            address: Some(Address {
                city: "NYC".into(),
                zip: 10001,
            }),
        };
        let container = codec.encode(&bo).unwrap();
        assert_eq!(
            serde_json::to_string(&container).unwrap(),
            r#"{"address":{"city":"NYC","zip":10001},"age":5,"name":"Bo"}"#
        );
        assert_eq!(codec.decode(&container).unwrap(), bo);

        let residents = crate::sequence::for_sequence(codec);
        let both = alloc::vec![ann, bo];
        let container = residents.encode(&both).unwrap();
        assert_eq!(
            serde_json::to_string(&container).unwrap(),
            concat!(
                r#"{"item_0":{"age":30,"name":"Ann"},"#,
                r#""item_1":{"address":{"city":"NYC","zip":10001},"age":5,"name":"Bo"},"#,
                r#""list_size":2}"#,
            )
        );
        assert_eq!(residents.decode(&container).unwrap(), both);
    }

    #[test]
    fn nullable_nested_round_trip() {
        let codec = RecordCodec::<Account>::derive().unwrap();

        let empty = Account { id: 1, owner: None };
        let container = codec.encode(&empty).unwrap();
        assert_eq!(container.len(), 1);
        assert_eq!(codec.decode(&container).unwrap(), empty);

        let full = Account {
            id: i64::MAX,
            owner: Some(ann()),
        };
        let container = codec.encode(&full).unwrap();
        assert_eq!(container.get_i64("id"), Some(i64::MAX));
        assert_eq!(codec.decode(&container).unwrap(), full);
    }

    #[test]
    fn same_key_at_two_levels() {
        let codec = RecordCodec::<Outer>::derive().unwrap();
        let value = Outer {
            inner: Inner { inner: 7 },
        };

        let container = codec.encode(&value).unwrap();
        assert_eq!(container.len(), 1);
        assert_eq!(
            container.get_nested("inner").and_then(|c| c.get_i32("inner")),
            Some(7)
        );
        assert_eq!(
            serde_json::to_string(&container).unwrap(),
            r#"{"inner":{"inner":7}}"#
        );
        assert_eq!(codec.decode(&container).unwrap(), value);
    }

    #[test]
    fn missing_required_field() {
        let codec = RecordCodec::<Person>::derive().unwrap();
        let mut container = codec.encode(&ann()).unwrap();
        container.remove("age");

        assert_eq!(
            codec.decode(&container),
            Err(CodecError::MissingRequiredField("age".into()))
        );

        let mut container = codec.encode(&ann()).unwrap();
        let mut address = container.get_nested("address").unwrap().clone();
        address.remove("zip");
        container.put_nested("address", address);
        assert_eq!(
            codec.decode(&container),
            Err(CodecError::MissingRequiredField("zip".into()))
        );
    }

    #[test]
    fn slot_mismatch() {
        let codec = RecordCodec::<Person>::derive().unwrap();
        let mut container = codec.encode(&ann()).unwrap();
        container.put_text("age", "thirty");

        assert_eq!(
            codec.decode(&container),
            Err(CodecError::SlotMismatch {
                field: "age".into(),
                expected: SlotKind::Int32,
                found: SlotKind::Text,
            })
        );

        container.put_i32("age", 30);
        container.put_i32("address", 1);
        assert!(matches!(
            codec.decode(&container),
            Err(CodecError::SlotMismatch {
                expected: SlotKind::Nested,
                ..
            })
        ));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let codec = RecordCodec::<Address>::derive().unwrap();
        let mut container = Container::new();
        container.put_text("city", "Oslo");
        container.put_i32("zip", 150);
        container.put_text("country", "NO");

        assert_eq!(
            codec.decode(&container).unwrap(),
            Address {
                city: "Oslo".into(),
                zip: 150,
            }
        );
    }

    #[test]
    fn write_keeps_other_entries() {
        let codec = RecordCodec::<Address>::derive().unwrap();
        let mut container = Container::new();
        container.put_i64("revision", 3);

        let value = Address {
            city: "Rome".into(),
            zip: 100,
        };
        codec.write(&mut container, &value).unwrap();

        assert_eq!(container.len(), 3);
        assert_eq!(container.get_i64("revision"), Some(3));
        assert_eq!(container.decode_with(&codec).unwrap(), value);
    }

    #[test]
    fn nested_plans_are_shared() {
        let registry = CodecRegistry::new();
        let contacts = registry.codec::<Contacts>().unwrap();
        let address = registry.codec::<Address>().unwrap();

        let home = contacts.plan().nested("home").unwrap();
        let work = contacts.plan().nested("work").unwrap();
        assert!(Arc::ptr_eq(home, work));
        assert!(Arc::ptr_eq(home, address.plan()));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn generic_records() {
        let ints = RecordCodec::<Pair<i32>>::derive().unwrap();
        let texts = RecordCodec::<Pair<String>>::derive().unwrap();

        assert!(!core::ptr::eq(
            Pair::<i32>::record_info(),
            Pair::<String>::record_info()
        ));

        let container = ints.encode(&Pair { first: 1, second: 2 }).unwrap();
        assert_eq!(container.get_i32("second"), Some(2));
        assert!(texts.decode(&container).is_err());

        let value = Pair {
            first: "a".to_string(),
            second: "b".to_string(),
        };
        let container = texts.encode(&value).unwrap();
        assert_eq!(texts.decode(&container).unwrap(), value);
    }

    #[test]
    fn const_generic_records() {
        assert!(!core::ptr::eq(
            Tagged::<1>::record_info(),
            Tagged::<2>::record_info()
        ));
        assert!(Tagged::<2>::record_info().is::<Tagged<2>>());

        let codec = RecordCodec::<Holder>::derive().unwrap();
        let value = Holder {
            one: Tagged { id: 1 },
            two: Tagged { id: 2 },
        };
        let container = codec.encode(&value).unwrap();

        assert_eq!(
            container.get_nested("two").and_then(|c| c.get_i32("id")),
            Some(2)
        );
        assert_eq!(codec.decode(&container).unwrap(), value);
    }

    #[test]
    fn unsupported_field() {
        let registry = CodecRegistry::new();
        let expected = DerivationError::UnsupportedField {
            type_path: core::any::type_name::<Flagged>(),
            field: "enabled",
            field_type: "bool",
        };

        assert_eq!(registry.codec::<Flagged>().unwrap_err(), expected);
        assert_eq!(registry.codec::<Wrapper>().unwrap_err(), expected);
        assert!(registry.contains(TypeId::of::<Flagged>()));
        assert_eq!(registry.codec::<Flagged>().unwrap_err(), expected);
    }

    #[test]
    fn self_referencing_type() {
        let err = RecordCodec::<Node>::derive().unwrap_err();
        assert_eq!(
            err,
            DerivationError::CyclicType {
                type_path: core::any::type_name::<Node>(),
                field: "next",
            }
        );
    }

    #[test]
    fn mutually_referencing_types() {
        let registry = CodecRegistry::new();
        let err = registry.codec::<Left>().unwrap_err();
        assert_eq!(
            err,
            DerivationError::CyclicType {
                type_path: core::any::type_name::<Right>(),
                field: "left",
            }
        );
        assert!(registry.contains(TypeId::of::<Right>()));
        assert_eq!(registry.codec::<Right>().unwrap_err(), err);
    }

    #[test]
    fn concurrent_derivation() {
        let registry = CodecRegistry::new();
        let codecs: Vec<_> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| registry.codec::<Person>().unwrap()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert!(codecs.windows(2).all(|w| w[0].same_plan(&w[1])));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn codec_in_message() {
        let codec = MessageCodec::new(RecordCodec::<Person>::derive().unwrap());
        let message = codec.write_into(Message::to("people"), &ann()).unwrap();

        assert_eq!(
            message
                .extras()
                .get_nested("address")
                .and_then(|a| a.get_i32("zip")),
            Some(10001)
        );
        assert_eq!(codec.read(&message).unwrap(), ann());
    }

    #[cfg(feature = "parcel")]
    #[test]
    fn codec_in_parcel() {
        use crate::error::{ParcelError, TransportError};
        use crate::transport::{Parcel, ParcelCodec};

        let codec = ParcelCodec::new(RecordCodec::<Person>::derive().unwrap());
        let bob = Person {
            name: "Bob".into(),
            nickname: Some("B".into()),
            ..ann()
        };

        let mut parcel = Parcel::new();
        codec.write(&mut parcel, &ann(), 0).unwrap();
        codec.write(&mut parcel, &bob, 1).unwrap();

        let mut parcel = Parcel::from_bytes(parcel.into_bytes());
        assert_eq!(codec.read(&mut parcel).unwrap(), ann());
        assert_eq!(codec.read(&mut parcel).unwrap(), bob);

        let err = codec.read(&mut parcel).unwrap_err();
        assert!(matches!(
            err,
            TransportError::Parcel(ParcelError::UnexpectedEof { .. })
        ));
    }
}

// -----------------------------------------------------------------------------
// Hand-written records

/// Declares `count: i32` but reports it as text.
struct Mislabeled;

impl Fields for Mislabeled {
    fn field(&self, name: &str) -> Option<FieldRef<'_>> {
        (name == "count").then_some(FieldRef::Text("three"))
    }
}

impl Record for Mislabeled {
    fn record_info() -> &'static RecordInfo {
        static CELL: NonGenericInfoCell = NonGenericInfoCell::new();
        CELL.get_or_init(|| RecordInfo::new::<Self>(&[FieldDescriptor::new::<i32>("count")]))
    }

    fn construct(_: FieldArgs) -> Result<Self, CodecError> {
        Ok(Self)
    }
}

/// Declares `id: i32` and `count: i32`, reports `count` as text.
struct Torn;

impl Fields for Torn {
    fn field(&self, name: &str) -> Option<FieldRef<'_>> {
        match name {
            "id" => Some(FieldRef::Int32(7)),
            "count" => Some(FieldRef::Text("three")),
            _ => None,
        }
    }
}

impl Record for Torn {
    fn record_info() -> &'static RecordInfo {
        static CELL: NonGenericInfoCell = NonGenericInfoCell::new();
        CELL.get_or_init(|| {
            RecordInfo::new::<Self>(&[
                FieldDescriptor::new::<i32>("id"),
                FieldDescriptor::new::<i32>("count"),
            ])
        })
    }

    fn construct(_: FieldArgs) -> Result<Self, CodecError> {
        Ok(Self)
    }
}

/// Declares `id: i32` as required but holds null.
struct Hollow;

impl Fields for Hollow {
    fn field(&self, name: &str) -> Option<FieldRef<'_>> {
        (name == "id").then_some(FieldRef::Null)
    }
}

impl Record for Hollow {
    fn record_info() -> &'static RecordInfo {
        static CELL: NonGenericInfoCell = NonGenericInfoCell::new();
        CELL.get_or_init(|| RecordInfo::new::<Self>(&[FieldDescriptor::new::<i32>("id")]))
    }

    fn construct(_: FieldArgs) -> Result<Self, CodecError> {
        Ok(Self)
    }
}

/// Constructor takes `a` and `c`, fields are `a` and `b`.
struct Skewed {
    a: i32,
    b: i32,
}

impl Fields for Skewed {
    fn field(&self, name: &str) -> Option<FieldRef<'_>> {
        match name {
            "a" => Some(self.a.as_field()),
            "b" => Some(self.b.as_field()),
            _ => None,
        }
    }
}

impl Record for Skewed {
    fn record_info() -> &'static RecordInfo {
        static CELL: NonGenericInfoCell = NonGenericInfoCell::new();
        CELL.get_or_init(|| {
            RecordInfo::new::<Self>(&[
                FieldDescriptor::new::<i32>("a"),
                FieldDescriptor::new::<i32>("b"),
            ])
            .with_params(&["a", "c"])
        })
    }

    fn construct(mut args: FieldArgs) -> Result<Self, CodecError> {
        Ok(Self {
            a: args.take::<i32>("a")?,
            b: args.take::<i32>("c")?,
        })
    }
}

/// Declares `x` twice.
struct Doubled;

impl Fields for Doubled {
    fn field(&self, _: &str) -> Option<FieldRef<'_>> {
        Some(FieldRef::Int32(0))
    }
}

impl Record for Doubled {
    fn record_info() -> &'static RecordInfo {
        static CELL: NonGenericInfoCell = NonGenericInfoCell::new();
        CELL.get_or_init(|| {
            RecordInfo::new::<Self>(&[
                FieldDescriptor::new::<i32>("x"),
                FieldDescriptor::new::<i64>("x"),
            ])
        })
    }

    fn construct(_: FieldArgs) -> Result<Self, CodecError> {
        Ok(Self)
    }
}

/// Declares `label: String` without an accessor.
struct Mute;

impl Fields for Mute {
    fn field(&self, _: &str) -> Option<FieldRef<'_>> {
        None
    }
}

impl Record for Mute {
    fn record_info() -> &'static RecordInfo {
        static CELL: NonGenericInfoCell = NonGenericInfoCell::new();
        CELL.get_or_init(|| RecordInfo::new::<Self>(&[FieldDescriptor::new::<String>("label")]))
    }

    fn construct(_: FieldArgs) -> Result<Self, CodecError> {
        Ok(Self)
    }
}

#[test]
fn runtime_type_outside_declared_kind() {
    let codec = RecordCodec::<Mislabeled>::derive().unwrap();
    let err = codec.encode(&Mislabeled).unwrap_err();

    assert_eq!(
        err,
        CodecError::UnsupportedType {
            field: "count".into(),
            runtime_type: core::any::type_name::<String>(),
        }
    );
}

#[test]
fn failed_write_leaves_container_untouched() {
    use crate::container::Container;
    use crate::sequence::for_sequence;

    let mut container = Container::new();
    container.put_text("keep", "me");

    let torn = RecordCodec::<Torn>::derive().unwrap();
    assert!(matches!(
        torn.write(&mut container, &Torn),
        Err(CodecError::UnsupportedType { field, .. }) if field == "count"
    ));
    assert_eq!(container.len(), 1);

    let items = for_sequence(RecordCodec::<Mislabeled>::derive().unwrap());
    assert!(items.write(&mut container, &alloc::vec![Mislabeled]).is_err());
    assert_eq!(container.len(), 1);
    assert_eq!(container.get_text("keep"), Some("me"));
    assert!(!container.contains_key("list_size"));
}

#[test]
fn null_in_required_field() {
    let codec = RecordCodec::<Hollow>::derive().unwrap();
    assert_eq!(
        codec.encode(&Hollow),
        Err(CodecError::MissingRequiredField("id".into()))
    );
}

#[test]
fn constructor_mismatch() {
    let err = RecordCodec::<Skewed>::derive().unwrap_err();
    assert!(matches!(err, DerivationError::NotARecord { .. }));

    let skewed = Skewed { a: 1, b: 2 };
    assert_eq!(skewed.field("b").map(|f| f.type_name()), Some("i32"));
}

#[test]
fn duplicate_field_names() {
    let err = describe::<Doubled>().unwrap_err();
    assert_eq!(
        err,
        DerivationError::NotARecord {
            type_path: core::any::type_name::<Doubled>(),
            reason: "duplicate field `x`".into(),
        }
    );
    assert!(RecordCodec::<Doubled>::derive().is_err());
}

#[test]
fn missing_accessor() {
    let codec = RecordCodec::<Mute>::derive().unwrap();
    assert!(matches!(
        codec.encode(&Mute),
        Err(CodecError::Derivation(DerivationError::NotARecord { .. }))
    ));
}

#[test]
fn construct_rejects_unknown_arguments() {
    use crate::info::{FieldValue, construct};

    let mut args = FieldArgs::new();
    args.insert("label", FieldValue::Text("x".into()));
    args.insert("color", FieldValue::Text("red".into()));

    assert!(matches!(
        construct::<Mute>(args),
        Err(CodecError::UnexpectedField(name)) if name == "color"
    ));
    assert!(matches!(
        construct::<Mute>(FieldArgs::new()),
        Err(CodecError::MissingRequiredField(name)) if name == "label"
    ));
}
