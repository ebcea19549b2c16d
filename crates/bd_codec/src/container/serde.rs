use serde_core::ser::{Serialize, SerializeMap, Serializer};

use super::{Container, Slot};

impl Serialize for Slot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Slot::Int32(v) => serializer.serialize_i32(*v),
            Slot::Int64(v) => serializer.serialize_i64(*v),
            Slot::Text(v) => serializer.serialize_str(v),
            Slot::Nested(v) => v.serialize(serializer),
        }
    }
}

/// Serialized as a map, keys in sorted order.
impl Serialize for Container {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut entries: alloc::vec::Vec<_> = self.iter().collect();
        entries.sort_unstable_by_key(|(k, _)| *k);

        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (key, slot) in entries {
            map.serialize_entry(key, slot)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use crate::container::Container;

    #[test]
    fn renders_logical_shape() {
        let mut inner = Container::new();
        inner.put_i32("inner", 7);
        let mut outer = Container::new();
        outer.put_nested("inner", inner);
        outer.put_i64("id", 5);

        let json = serde_json::to_string(&outer).unwrap();
        assert_eq!(json, r#"{"id":5,"inner":{"inner":7}}"#);
    }
}
