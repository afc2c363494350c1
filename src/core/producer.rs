/// The value-producing capability shared by every schema variant.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValueError {
    #[error("unsupported type for range: {0}")]
    UnsupportedType(&'static str),
    #[error("invalid schema: {0}")]
    MalformedSchema(String),
    #[error("no options provided for weighted choice")]
    EmptyChoice,
    #[error("schema object has none of the keys const, range, choice, value")]
    MissingVariant,
}

/// Something that yields a value of type `T` on every call.
///
/// Calls are independent of each other apart from the random source a
/// producer may share with others. Producers are immutable after
/// construction, so `produce` takes `&self`.
pub trait ValueProducer<T>: Send + Sync {
    fn produce(&self) -> Result<T, ValueError>;

    /// Draw `count` independent samples.
    fn produce_many(&self, count: usize) -> Result<Vec<T>, ValueError> {
        (0..count).map(|_| self.produce()).collect()
    }
}

/// An owned, type-erased producer as returned by the schema factory.
pub type BoxedProducer<T> = Box<dyn ValueProducer<T>>;

impl<T> ValueProducer<T> for BoxedProducer<T> {
    fn produce(&self) -> Result<T, ValueError> {
        self.as_ref().produce()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter;

    impl ValueProducer<u32> for Counter {
        fn produce(&self) -> Result<u32, ValueError> {
            Ok(7)
        }
    }

    #[test]
    fn produce_many_collects_samples() {
        let values = Counter.produce_many(4).unwrap();
        assert_eq!(values, vec![7, 7, 7, 7]);
    }

    #[test]
    fn boxed_producer_delegates() {
        let boxed: BoxedProducer<u32> = Box::new(Counter);
        assert_eq!(boxed.produce().unwrap(), 7);
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            ValueError::UnsupportedType("bool").to_string(),
            "unsupported type for range: bool"
        );
        assert_eq!(
            ValueError::MalformedSchema("choice must be a sequence".to_string()).to_string(),
            "invalid schema: choice must be a sequence"
        );
    }
}
