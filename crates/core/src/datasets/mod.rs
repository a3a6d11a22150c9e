//! Concrete dataset adapters.

mod empire;

pub use empire::Empire;
