/// Read-only view over a structured config tree.
///
/// The factory only needs to tell objects, arrays and scalars apart, look
/// up keys on objects, and convert a node into a typed value. Any parsed
/// config tree offering that can drive it; JSON and RON values are
/// supported here.

use serde::de::DeserializeOwned;

use crate::core::producer::ValueError;

/// The shape of a schema node.
#[derive(Debug)]
pub enum NodeShape<'a, N> {
    Object,
    Array(&'a [N]),
    Scalar,
}

pub trait SchemaNode: Sized {
    fn shape(&self) -> NodeShape<'_, Self>;

    /// Value stored under `key`. `None` for missing keys and non-objects.
    fn get(&self, key: &str) -> Option<&Self>;

    /// Convert this node into a `T`.
    fn extract<T: DeserializeOwned>(&self) -> Result<T, ValueError>;
}

/// Typed lookup of `key`, falling back to `default` when the key is absent
/// or `node` is not an object.
pub fn get_or<T: DeserializeOwned, N: SchemaNode>(node: &N, key: &str, default: T) -> Result<T, ValueError> {
    match node.get(key) {
        Some(value) => value.extract().map_err(|e| match e {
            ValueError::MalformedSchema(msg) => {
                ValueError::MalformedSchema(format!("invalid `{}`: {}", key, msg))
            }
            other => other,
        }),
        None => Ok(default),
    }
}

impl SchemaNode for serde_json::Value {
    fn shape(&self) -> NodeShape<'_, Self> {
        match self {
            serde_json::Value::Object(_) => NodeShape::Object,
            serde_json::Value::Array(items) => NodeShape::Array(items.as_slice()),
            _ => NodeShape::Scalar,
        }
    }

    fn get(&self, key: &str) -> Option<&Self> {
        self.as_object()?.get(key)
    }

    fn extract<T: DeserializeOwned>(&self) -> Result<T, ValueError> {
        T::deserialize(self).map_err(|e| ValueError::MalformedSchema(e.to_string()))
    }
}

impl SchemaNode for ron::Value {
    fn shape(&self) -> NodeShape<'_, Self> {
        match self {
            ron::Value::Map(_) => NodeShape::Object,
            ron::Value::Seq(items) => NodeShape::Array(items.as_slice()),
            _ => NodeShape::Scalar,
        }
    }

    fn get(&self, key: &str) -> Option<&Self> {
        match self {
            ron::Value::Map(map) => map
                .iter()
                .find(|(k, _)| matches!(k, ron::Value::String(s) if s == key))
                .map(|(_, v)| v),
            _ => None,
        }
    }

    fn extract<T: DeserializeOwned>(&self) -> Result<T, ValueError> {
        self.clone()
            .into_rust()
            .map_err(|e| ValueError::MalformedSchema(e.to_string()))
    }
}
