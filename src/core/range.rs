/// Uniformly sampled numeric ranges.

use crate::core::producer::{ValueError, ValueProducer};
use crate::core::random::SharedRng;
use crate::core::scalar::{Arithmetic, Scalar};
use crate::schema::node::{NodeShape, SchemaNode};

/// Draws an independent sample from `[low, high]` (integral `T`) or
/// `[low, high)` (real `T`) on every call.
#[derive(Debug, Clone)]
pub struct Range<T: Arithmetic> {
    low: T,
    high: T,
    rng: SharedRng,
}

impl<T: Arithmetic> Range<T> {
    pub fn new(low: T, high: T, rng: SharedRng) -> Result<Self, ValueError> {
        T::check_bounds(low, high)?;
        Ok(Self { low, high, rng })
    }

    /// A range with an implicit lower bound of zero.
    pub fn up_to(high: T, rng: SharedRng) -> Result<Self, ValueError> {
        Self::new(T::ZERO, high, rng)
    }

    pub fn bounds(&self) -> (T, T) {
        (self.low, self.high)
    }
}

impl<T: Arithmetic> ValueProducer<T> for Range<T> {
    fn produce(&self) -> Result<T, ValueError> {
        Ok(self.rng.with(|rng| T::sample_between(self.low, self.high, rng)))
    }
}

/// Read `[low, high]` from a two-element sequence node.
pub(crate) fn bounds_from_node<T: Scalar, N: SchemaNode>(node: &N) -> Result<(T, T), ValueError> {
    match node.shape() {
        NodeShape::Array([low, high]) => Ok((low.extract()?, high.extract()?)),
        NodeShape::Array(items) => Err(ValueError::MalformedSchema(format!(
            "range must have exactly 2 bounds, got {}",
            items.len()
        ))),
        _ => Err(ValueError::MalformedSchema(
            "range must be a 2-element sequence".to_string(),
        )),
    }
}
