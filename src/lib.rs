//! Value Schema: schema-driven value generation.
//!
//! A small declarative config tree describes how values are made: fixed
//! constants, uniformly sampled ranges, or weighted choices between nested
//! schemas. The factory turns that tree into a composed producer once, and
//! callers draw independent samples from it as often as they like.

pub mod core;
pub mod schema;

pub use crate::core::factory::{create, SchemaFactory};
pub use crate::core::producer::{BoxedProducer, ValueError, ValueProducer};
pub use crate::core::random::SharedRng;
pub use crate::schema::set::{SchemaSet, SchemaSetError};
