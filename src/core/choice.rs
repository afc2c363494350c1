/// Weighted choice between sub-producers.
///
/// Options partition `[0, weight_sum)` in declaration order, each taking a
/// slice as wide as its weight. A selector range draws a position in that
/// interval and the option whose slice contains it produces the value.

use tracing::trace;

use crate::core::factory::SchemaFactory;
use crate::core::producer::{BoxedProducer, ValueError, ValueProducer};
use crate::core::random::SharedRng;
use crate::core::range::Range;
use crate::core::scalar::Scalar;
use crate::schema::node::{get_or, NodeShape, SchemaNode};

pub const WEIGHT_KEY: &str = "weight";
pub const DEFAULT_WEIGHT: f64 = 1.0;

struct WeightedOption<T> {
    weight: f64,
    producer: BoxedProducer<T>,
}

pub struct WeightedChoice<T> {
    options: Vec<WeightedOption<T>>,
    weight_sum: f64,
    selector: Range<f64>,
}

impl<T: 'static> WeightedChoice<T> {
    /// Build from `(weight, producer)` pairs.
    ///
    /// An empty list is accepted here; it fails with
    /// [`ValueError::EmptyChoice`] on the first `produce` call.
    pub fn new(options: Vec<(f64, BoxedProducer<T>)>, rng: SharedRng) -> Result<Self, ValueError> {
        let mut weight_sum = 0.0;
        let mut weighted = Vec::with_capacity(options.len());
        for (weight, producer) in options {
            if !weight.is_finite() || weight < 0.0 {
                return Err(ValueError::MalformedSchema(format!(
                    "choice weight must be a finite non-negative number, got {}",
                    weight
                )));
            }
            weight_sum += weight;
            weighted.push(WeightedOption { weight, producer });
        }
        let selector = Range::up_to(weight_sum, rng)?;

        Ok(Self {
            options: weighted,
            weight_sum,
            selector,
        })
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn weight_sum(&self) -> f64 {
        self.weight_sum
    }

    /// Index of the option whose slice holds `position`.
    ///
    /// Running off the end (rounding at `position == weight_sum`, or all
    /// remaining weights zero) selects the last option.
    fn pick(&self, mut position: f64) -> Option<usize> {
        for (index, option) in self.options.iter().enumerate() {
            if position > option.weight {
                position -= option.weight;
            } else {
                return Some(index);
            }
        }
        self.options.len().checked_sub(1)
    }
}

impl<T: Scalar> WeightedChoice<T> {
    /// Build from a `choice` payload, which must be a sequence.
    pub fn from_node<N: SchemaNode>(node: &N, factory: &SchemaFactory) -> Result<Self, ValueError> {
        match node.shape() {
            NodeShape::Array(items) => Self::from_options(items, factory),
            _ => Err(ValueError::MalformedSchema(
                "choice must be a sequence".to_string(),
            )),
        }
    }

    /// Build from option descriptors, each a schema with an optional
    /// `weight` (default 1).
    pub fn from_options<N: SchemaNode>(items: &[N], factory: &SchemaFactory) -> Result<Self, ValueError> {
        let mut options = Vec::with_capacity(items.len());
        for item in items {
            let weight = get_or(item, WEIGHT_KEY, DEFAULT_WEIGHT)?;
            let producer = factory.create::<T, N>(item)?;
            options.push((weight, producer));
        }
        Self::new(options, factory.rng().clone())
    }
}

impl<T: 'static> ValueProducer<T> for WeightedChoice<T> {
    fn produce(&self) -> Result<T, ValueError> {
        if self.options.is_empty() {
            return Err(ValueError::EmptyChoice);
        }
        let position = self.selector.produce()?;
        let index = self.pick(position).ok_or(ValueError::EmptyChoice)?;
        trace!(position, index, "weighted choice selected option");
        self.options[index].producer.produce()
    }
}
