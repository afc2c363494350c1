/// Fixed-value producers.

use crate::core::producer::{ValueError, ValueProducer};
use crate::core::scalar::Scalar;
use crate::schema::node::SchemaNode;

/// Returns the same value on every call.
#[derive(Debug, Clone, PartialEq)]
pub struct Constant<T> {
    value: T,
}

impl<T> Constant<T> {
    pub fn new(value: T) -> Self {
        Self { value }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    /// Replace the held value.
    pub fn set(&mut self, value: T) {
        self.value = value;
    }
}

impl<T: Scalar> Constant<T> {
    /// Build from a scalar literal node.
    pub fn from_node<N: SchemaNode>(node: &N) -> Result<Self, ValueError> {
        Ok(Self::new(node.extract()?))
    }

    /// Sample `producer` once and keep that value forever.
    pub fn freeze<P: ValueProducer<T> + ?Sized>(producer: &P) -> Result<Self, ValueError> {
        Ok(Self::new(producer.produce()?))
    }
}

impl<T: Clone + Send + Sync> ValueProducer<T> for Constant<T> {
    fn produce(&self) -> Result<T, ValueError> {
        Ok(self.value.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::random::SharedRng;
    use crate::core::range::Range;
    use serde_json::json;

    #[test]
    fn repeats_value() {
        let c = Constant::new("torch".to_string());
        for _ in 0..100 {
            assert_eq!(c.produce().unwrap(), "torch");
        }
    }

    #[test]
    fn from_scalar_node() {
        let c: Constant<i32> = Constant::from_node(&json!(42)).unwrap();
        assert_eq!(*c.value(), 42);

        let c: Constant<bool> = Constant::from_node(&json!(true)).unwrap();
        assert!(c.produce().unwrap());
    }

    #[test]
    fn literal_type_mismatch() {
        let result: Result<Constant<u8>, _> = Constant::from_node(&json!("many"));
        assert!(matches!(result, Err(ValueError::MalformedSchema(_))));

        let result: Result<Constant<u8>, _> = Constant::from_node(&json!(300));
        assert!(result.is_err());
    }

    #[test]
    fn set_replaces_value() {
        let mut c = Constant::new(1.5f64);
        c.set(2.5);
        assert_eq!(c.produce().unwrap(), 2.5);
    }

    #[test]
    fn freeze_keeps_first_sample() {
        let range = Range::new(0u64, 1_000_000, SharedRng::seeded(8)).unwrap();
        let frozen = Constant::freeze(&range).unwrap();
        let first = frozen.produce().unwrap();
        for _ in 0..50 {
            assert_eq!(frozen.produce().unwrap(), first);
        }
    }
}
