pub mod choice;
pub mod constant;
pub mod factory;
pub mod producer;
pub mod random;
pub mod range;
pub mod scalar;
