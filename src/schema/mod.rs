pub mod node;
pub mod set;
