/// Result types the schema factory can produce.

use rand::distributions::uniform::SampleUniform;
use rand::rngs::StdRng;
use rand::Rng;
use serde::de::DeserializeOwned;
use std::fmt::Debug;

use crate::core::producer::{BoxedProducer, ValueError};
use crate::core::random::SharedRng;
use crate::core::range::Range;

/// A type that can be read from a schema literal and handed out by a
/// producer.
///
/// Constants work for every `Scalar`. Ranges only work when the type is
/// also [`Arithmetic`]; for the rest `build_range` keeps its default and
/// fails with [`ValueError::UnsupportedType`].
pub trait Scalar: DeserializeOwned + Clone + Send + Sync + 'static {
    const ARITHMETIC: bool = false;

    fn build_range(low: Self, high: Self, rng: SharedRng) -> Result<BoxedProducer<Self>, ValueError> {
        let _ = (low, high, rng);
        Err(ValueError::UnsupportedType(std::any::type_name::<Self>()))
    }
}

/// Numeric types with uniform-range semantics.
///
/// Integral types sample the closed interval `[low, high]`, real types the
/// half-open `[low, high)`.
pub trait Arithmetic: Scalar + SampleUniform + PartialOrd + Copy + Debug {
    const ZERO: Self;
    const INTEGRAL: bool;

    /// Reject bounds no uniform distribution can be built over.
    fn check_bounds(low: Self, high: Self) -> Result<(), ValueError>;

    /// One uniform draw. Bounds must have passed `check_bounds`.
    fn sample_between(low: Self, high: Self, rng: &mut StdRng) -> Self;
}

fn inverted<T: Debug>(low: T, high: T) -> ValueError {
    ValueError::MalformedSchema(format!(
        "range lower bound {:?} exceeds upper bound {:?}",
        low, high
    ))
}

macro_rules! integral {
    ($($t:ty),*) => {$(
        impl Scalar for $t {
            const ARITHMETIC: bool = true;

            fn build_range(low: Self, high: Self, rng: SharedRng) -> Result<BoxedProducer<Self>, ValueError> {
                Ok(Box::new(Range::new(low, high, rng)?))
            }
        }

        impl Arithmetic for $t {
            const ZERO: Self = 0;
            const INTEGRAL: bool = true;

            fn check_bounds(low: Self, high: Self) -> Result<(), ValueError> {
                if low > high {
                    return Err(inverted(low, high));
                }
                Ok(())
            }

            fn sample_between(low: Self, high: Self, rng: &mut StdRng) -> Self {
                rng.gen_range(low..=high)
            }
        }
    )*};
}

macro_rules! real {
    ($($t:ty),*) => {$(
        impl Scalar for $t {
            const ARITHMETIC: bool = true;

            fn build_range(low: Self, high: Self, rng: SharedRng) -> Result<BoxedProducer<Self>, ValueError> {
                Ok(Box::new(Range::new(low, high, rng)?))
            }
        }

        impl Arithmetic for $t {
            const ZERO: Self = 0.0;
            const INTEGRAL: bool = false;

            fn check_bounds(low: Self, high: Self) -> Result<(), ValueError> {
                if !low.is_finite() || !high.is_finite() || !(high - low).is_finite() {
                    return Err(ValueError::MalformedSchema(format!(
                        "range bounds must be finite, got [{}, {}]",
                        low, high
                    )));
                }
                if low > high {
                    return Err(inverted(low, high));
                }
                Ok(())
            }

            fn sample_between(low: Self, high: Self, rng: &mut StdRng) -> Self {
                // [a, a) is empty; a degenerate range always yields a.
                if low == high {
                    return low;
                }
                rng.gen_range(low..high)
            }
        }
    )*};
}

integral!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
real!(f32, f64);

impl Scalar for bool {}
impl Scalar for char {}
impl Scalar for String {}
