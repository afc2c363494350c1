/// Schema factory: interprets a schema node into a producer tree.
///
/// | Node                         | Producer                         |
/// |------------------------------|----------------------------------|
/// | `{"const": x}`               | [`Constant`]                     |
/// | `{"range": [a, b]}`          | [`Range`](crate::core::range::Range) |
/// | `{"choice": [..]}`           | [`WeightedChoice`]               |
/// | `{"value": node}`            | whatever `node` builds           |
/// | `[..]`                       | [`WeightedChoice`]               |
/// | scalar                       | [`Constant`]                     |
///
/// Object keys are checked in the order above and the first one present
/// wins. `"initOnly": true` on an object samples the built producer once
/// and replaces it with a constant holding that sample.
///
/// Construction recurses once per nesting level, so pathologically deep
/// schemas can exhaust the stack.

use tracing::debug;

use crate::core::choice::WeightedChoice;
use crate::core::constant::Constant;
use crate::core::producer::{BoxedProducer, ValueError, ValueProducer};
use crate::core::random::SharedRng;
use crate::core::range::bounds_from_node;
use crate::core::scalar::Scalar;
use crate::schema::node::{get_or, NodeShape, SchemaNode};

pub const CONST_KEY: &str = "const";
pub const RANGE_KEY: &str = "range";
pub const CHOICE_KEY: &str = "choice";
pub const VALUE_KEY: &str = "value";
pub const INIT_ONLY_KEY: &str = "initOnly";

/// Builds producers that all draw from one random source.
#[derive(Debug, Clone)]
pub struct SchemaFactory {
    rng: SharedRng,
}

impl Default for SchemaFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaFactory {
    /// A factory using the process-wide random source.
    pub fn new() -> Self {
        Self::with_rng(SharedRng::global())
    }

    pub fn with_rng(rng: SharedRng) -> Self {
        Self { rng }
    }

    pub fn rng(&self) -> &SharedRng {
        &self.rng
    }

    pub fn create<T: Scalar, N: SchemaNode>(&self, node: &N) -> Result<BoxedProducer<T>, ValueError> {
        match node.shape() {
            NodeShape::Object => self.create_from_object(node),
            NodeShape::Array(items) => {
                debug!(options = items.len(), "building weighted choice from sequence");
                Ok(Box::new(WeightedChoice::<T>::from_options(items, self)?))
            }
            NodeShape::Scalar => Ok(Box::new(Constant::<T>::from_node(node)?)),
        }
    }

    fn create_from_object<T: Scalar, N: SchemaNode>(&self, node: &N) -> Result<BoxedProducer<T>, ValueError> {
        let producer: BoxedProducer<T> = if let Some(payload) = node.get(CONST_KEY) {
            Box::new(Constant::<T>::from_node(payload)?)
        } else if let Some(payload) = node.get(RANGE_KEY) {
            self.create_range(payload)?
        } else if let Some(payload) = node.get(CHOICE_KEY) {
            Box::new(WeightedChoice::<T>::from_node(payload, self)?)
        } else if let Some(payload) = node.get(VALUE_KEY) {
            self.create(payload)?
        } else {
            return Err(ValueError::MissingVariant);
        };

        if get_or(node, INIT_ONLY_KEY, false)? {
            debug!(ty = std::any::type_name::<T>(), "freezing initOnly value");
            return Ok(Box::new(Constant::freeze(&producer)?));
        }
        Ok(producer)
    }

    fn create_range<T: Scalar, N: SchemaNode>(&self, payload: &N) -> Result<BoxedProducer<T>, ValueError> {
        // Check the type first so a non-numeric T reports the type, not
        // the failed bound conversion.
        if !T::ARITHMETIC {
            return Err(ValueError::UnsupportedType(std::any::type_name::<T>()));
        }
        let (low, high) = bounds_from_node::<T, N>(payload)?;
        T::build_range(low, high, self.rng.clone())
    }
}

/// Build a producer for `node` using the process-wide random source.
pub fn create<T: Scalar, N: SchemaNode>(node: &N) -> Result<BoxedProducer<T>, ValueError> {
    SchemaFactory::new().create(node)
}

/// Build a producer for `node` and draw one value from it.
pub fn sample_once<T: Scalar, N: SchemaNode>(node: &N) -> Result<T, ValueError> {
    create::<T, N>(node)?.produce()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn factory() -> SchemaFactory {
        SchemaFactory::with_rng(SharedRng::seeded(31))
    }

    #[test]
    fn scalar_is_constant() {
        let p = factory().create::<i32, _>(&json!(9)).unwrap();
        assert_eq!(p.produce_many(5).unwrap(), vec![9; 5]);
    }

    #[test]
    fn const_key() {
        let p = factory().create::<String, _>(&json!({"const": "north"})).unwrap();
        assert_eq!(p.produce().unwrap(), "north");
    }

    #[test]
    fn range_key() {
        let p = factory().create::<i64, _>(&json!({"range": [-3, 3]})).unwrap();
        for v in p.produce_many(500).unwrap() {
            assert!((-3..=3).contains(&v));
        }
    }

    #[test]
    fn key_priority_const_first() {
        let node = json!({"range": [0, 100], "choice": [1], "value": 2, "const": 7});
        let p = factory().create::<u32, _>(&node).unwrap();
        assert_eq!(p.produce().unwrap(), 7);
    }

    #[test]
    fn key_priority_range_before_choice() {
        let node = json!({"choice": [{"const": 1000}], "range": [0, 10]});
        let p = factory().create::<u32, _>(&node).unwrap();
        for v in p.produce_many(100).unwrap() {
            assert!(v <= 10);
        }
    }

    #[test]
    fn value_key_aliases() {
        let p = factory().create::<i32, _>(&json!({"value": {"const": 5}})).unwrap();
        assert_eq!(p.produce().unwrap(), 5);
    }

    #[test]
    fn missing_variant() {
        let result = factory().create::<i32, _>(&json!({"weight": 2}));
        assert_eq!(result.err(), Some(ValueError::MissingVariant));
    }

    #[test]
    fn range_over_non_numeric_type() {
        let result = factory().create::<String, _>(&json!({"range": ["a", "z"]}));
        assert!(matches!(result.err(), Some(ValueError::UnsupportedType(_))));

        let result = factory().create::<bool, _>(&json!({"range": [0, 1]}));
        assert!(matches!(result.err(), Some(ValueError::UnsupportedType("bool"))));
    }

    #[test]
    fn choice_payload_must_be_sequence() {
        let result = factory().create::<i32, _>(&json!({"choice": {"const": 1}}));
        assert!(matches!(result.err(), Some(ValueError::MalformedSchema(_))));
    }

    #[test]
    fn nested_error_aborts_whole_tree() {
        let node = json!({"choice": [{"const": 1}, {"range": [1]}]});
        let result = factory().create::<i32, _>(&node);
        assert!(matches!(result.err(), Some(ValueError::MalformedSchema(_))));
    }

    #[test]
    fn init_only_freezes() {
        let node = json!({"range": [0, 1_000_000], "initOnly": true});
        let p = factory().create::<u64, _>(&node).unwrap();
        let first = p.produce().unwrap();
        assert!(p.produce_many(100).unwrap().iter().all(|v| *v == first));
    }

    #[test]
    fn init_only_false_keeps_sampling() {
        let node = json!({"range": [0, 1_000_000], "initOnly": false});
        let p = factory().create::<u64, _>(&node).unwrap();
        let values = p.produce_many(50).unwrap();
        assert!(values.iter().any(|v| *v != values[0]));
    }

    #[test]
    fn init_only_on_empty_choice_fails_at_build() {
        let node = json!({"choice": [], "initOnly": true});
        let result = factory().create::<i32, _>(&node);
        assert_eq!(result.err(), Some(ValueError::EmptyChoice));
    }

    #[test]
    fn init_only_must_be_bool() {
        let node = json!({"const": 1, "initOnly": "always"});
        let result = factory().create::<i32, _>(&node);
        assert!(matches!(result.err(), Some(ValueError::MalformedSchema(_))));
    }

    #[test]
    fn empty_choice_fails_lazily() {
        let p = factory().create::<i32, _>(&json!([])).unwrap();
        assert_eq!(p.produce(), Err(ValueError::EmptyChoice));
    }

    #[test]
    fn sample_once_uses_global_source() {
        assert_eq!(sample_once::<f64, _>(&json!({"const": 0.25})).unwrap(), 0.25);
    }
}
